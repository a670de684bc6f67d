// Copyright (c) 2026 minitty contributors. Licensed under Apache License, Version 2.0.

//! The window/GL backend contract. This crate ships no concrete windowing
//! implementation (out of scope); only the trait and a `RecordingWindowBackend`
//! test double used by unit tests and a headless dump mode.

/// Events a window backend can deliver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowEvent {
    /// Decoded text bytes to forward to the PTY.
    Key(Vec<u8>),
    /// New pixel dimensions.
    Resize { width_px: u32, height_px: u32 },
    Close,
}

/// A drawable command the render adapter emits. Pure data; a concrete
/// backend turns these into GL/2D calls.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FilledRect { x: u32, y: u32, w: u32, h: u32, color: (f32, f32, f32) },
    Glyph { x: u32, y: u32, ch: u8, color: (f32, f32, f32) },
    Line { x0: u32, y0: u32, x1: u32, y1: u32, color: (f32, f32, f32) },
    /// A rect drawn with an inverting blend (`GL_ONE_MINUS_DST_COLOR,
    /// GL_ZERO`), so it stays visible against any cell color underneath.
    /// Used only for the cursor.
    InvertRect { x: u32, y: u32, w: u32, h: u32 },
}

/// The window/GL external collaborator contract (`SPEC_FULL.md` §6).
pub trait WindowBackend {
    /// Polls for pending events without blocking.
    fn poll_events(&mut self) -> Vec<WindowEvent>;

    /// Sets the window title (driven by OSC `2;<title>`).
    fn set_title(&mut self, title: &str);

    /// Submits one frame's draw commands and swaps buffers.
    fn present(&mut self, commands: &[DrawCommand]);

    /// A raw file descriptor the event loop can register with its reactor
    /// for readiness polling, if the backend exposes one (e.g. an X11
    /// connection fd). Headless/test backends return `None`.
    fn raw_fd(&self) -> Option<std::os::unix::io::RawFd> { None }
}

/// In-memory test double: records the title and the last frame's commands,
/// and lets tests inject events to be drained by `poll_events`.
#[derive(Debug, Default)]
pub struct RecordingWindowBackend {
    title: String,
    last_frame: Vec<DrawCommand>,
    pending_events: Vec<WindowEvent>,
}

impl RecordingWindowBackend {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    #[must_use]
    pub fn title(&self) -> &str { &self.title }

    #[must_use]
    pub fn last_frame(&self) -> &[DrawCommand] { &self.last_frame }

    pub fn push_event(&mut self, event: WindowEvent) { self.pending_events.push(event); }
}

impl WindowBackend for RecordingWindowBackend {
    fn poll_events(&mut self) -> Vec<WindowEvent> { std::mem::take(&mut self.pending_events) }

    fn set_title(&mut self, title: &str) { self.title = title.to_string(); }

    fn present(&mut self, commands: &[DrawCommand]) {
        self.last_frame = commands.to_vec();
    }
}
