// Copyright (c) 2026 minitty contributors. Licensed under Apache License, Version 2.0.

use clap::Parser as _;
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;

use minitty::backend::font::{FontBackend, StubFontBackend};
use minitty::backend::pty::PtyBackend;
use minitty::backend::window::RecordingWindowBackend;
use minitty::config::{find_font_path, resolve_font_size, resolve_shell, Cli};
use minitty::core::palette::Palette;
use minitty::error::StartupError;
use minitty::terminal::Terminal;

const DEFAULT_COLS: usize = 80;
const DEFAULT_ROWS: usize = 24;

fn init_logging() {
    let log_dir = std::env::temp_dir().join("minitty-logs");
    let _ = std::fs::create_dir_all(&log_dir);
    let appender = tracing_appender::rolling::daily(log_dir, "minitty.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(appender);
    // The guard flushes the appender on drop; this binary is short-lived
    // and the subscriber lives for the whole process, so leak it rather
    // than thread a guard through `main`'s return paths.
    std::mem::forget(guard);

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(non_blocking)
        .init();
}

fn main() -> miette::Result<()> {
    init_logging();

    let cli = Cli::parse();
    let home = std::env::var("HOME").ok();
    let font_size = resolve_font_size(&cli, home.as_deref());
    let shell = resolve_shell(std::env::var("SHELL").ok().as_deref());

    let font_path = find_font_path().ok_or(StartupError::FontNotFound)?;
    tracing::info!(font_path, font_size, shell = %shell, "starting up");

    let mut font = StubFontBackend::new(font_size / 2, font_size);
    font.load(font_path, font_size).map_err(miette::Report::from)?;

    let palette = Palette::new();
    let terminal = Terminal::new(DEFAULT_COLS, DEFAULT_ROWS);

    let pty = PtyBackend::spawn(&shell, DEFAULT_COLS as u16, DEFAULT_ROWS as u16)
        .map_err(miette::Report::from)?;
    let pty_fd = pty.raw_fd().ok_or(StartupError::PtySpawn(
        std::io::Error::other("pty backend exposed no raw fd to poll").into(),
    ))?;

    // No concrete `WindowBackend` ships with this crate (out of scope);
    // the recording backend below never produces real window events, so
    // the loop runs until the shell exits.
    let window = RecordingWindowBackend::new();

    minitty::event_loop::run(terminal, pty, window, &font, &palette, None, pty_fd).into_diagnostic()?;

    Ok(())
}
