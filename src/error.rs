// Copyright (c) 2026 minitty contributors. Licensed under Apache License, Version 2.0.

//! Error types. `StartupError` is fatal and user-facing (rendered via
//! `miette`); `TerminalError` is the sole fallible path in the per-byte hot
//! loop.

use miette::Diagnostic;
use thiserror::Error;

/// A boxed source error from an external backend (PTY, window, font).
pub type BackendError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Fatal errors that can occur before or during startup and abort the
/// process with a formatted diagnostic.
#[derive(Debug, Error, Diagnostic)]
pub enum StartupError {
    #[error("failed to spawn shell on pseudoterminal: {0}")]
    #[diagnostic(code(minitty::pty_spawn))]
    PtySpawn(#[source] BackendError),

    #[error("no usable font found among candidate paths")]
    #[diagnostic(
        code(minitty::font_not_found),
        help("install a monospace font such as DejaVu Sans Mono or Liberation Mono")
    )]
    FontNotFound,

    #[error("failed to open display/window")]
    #[diagnostic(code(minitty::window_open))]
    WindowOpen(#[source] BackendError),

    #[error("failed to allocate initial terminal grid")]
    #[diagnostic(code(minitty::grid_alloc))]
    GridAlloc,
}

/// Errors that can arise from within the terminal engine's hot path.
/// Currently only allocation failure during resize, kept separate from
/// [`StartupError`] so the per-byte loop's `Result` surface stays tiny.
#[derive(Debug, Error)]
pub enum TerminalError {
    #[error("failed to allocate grid of {cols}x{rows} cells")]
    AllocFailure { cols: usize, rows: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_error_formats_dimensions() {
        let err = TerminalError::AllocFailure { cols: 80, rows: 24 };
        assert_eq!(err.to_string(), "failed to allocate grid of 80x24 cells");
    }

    #[test]
    fn startup_error_font_not_found_has_help() {
        let err = StartupError::FontNotFound;
        assert!(err.help().is_some());
    }
}
