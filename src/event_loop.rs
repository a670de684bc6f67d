// Copyright (c) 2026 minitty contributors. Licensed under Apache License, Version 2.0.

//! The single-threaded event loop: multiplexes the PTY master and the
//! window's input source on one `mio::Poll`, with a ~60Hz frame timeout.
//! No worker threads; see the concurrency model in `SPEC_FULL.md` §5.

use std::os::unix::io::RawFd;
use std::time::Duration;

use mio::unix::SourceFd;
use mio::{Events, Interest, Poll, Token};
use tracing::{info, warn};

use crate::backend::font::FontBackend;
use crate::backend::pty::{PtyBackend, PtyReadResult};
use crate::backend::window::{WindowBackend, WindowEvent};
use crate::core::palette::Palette;
use crate::render::render;
use crate::terminal::Terminal;

const PTY_TOKEN: Token = Token(0);
const WINDOW_TOKEN: Token = Token(1);
const SIGWINCH_TOKEN: Token = Token(2);
/// ~60Hz frame pacing, matching the original `select()` timeout of
/// `tv_usec = 16666`.
const FRAME_TIMEOUT: Duration = Duration::from_micros(16_666);

/// Runs the emulator until the PTY closes or the window requests close.
pub fn run(
    mut terminal: Terminal,
    mut pty: PtyBackend,
    mut window: impl WindowBackend,
    font: &dyn FontBackend,
    palette: &Palette,
    window_fd: Option<RawFd>,
    pty_fd: RawFd,
) -> std::io::Result<()> {
    let mut poll = Poll::new()?;
    let mut events = Events::with_capacity(16);

    poll.registry().register(&mut SourceFd(&pty_fd), PTY_TOKEN, Interest::READABLE)?;
    if let Some(fd) = window_fd {
        poll.registry().register(&mut SourceFd(&fd), WINDOW_TOKEN, Interest::READABLE)?;
    }

    let mut signals = signal_hook_mio::v1_0::Signals::new([signal_hook::consts::SIGWINCH])?;
    poll.registry().register(&mut signals, SIGWINCH_TOKEN, Interest::READABLE)?;

    'outer: loop {
        poll.poll(&mut events, Some(FRAME_TIMEOUT))?;

        for event in events.iter() {
            if event.token() == SIGWINCH_TOKEN {
                for _ in signals.pending() {}
            }
        }

        for win_event in window.poll_events() {
            match win_event {
                WindowEvent::Key(bytes) => {
                    if let Err(e) = pty.write(&bytes) {
                        warn!(error = %e, "dropped keystroke write to pty");
                    }
                }
                WindowEvent::Resize { width_px, height_px } => {
                    let cols = (width_px / font.cell_width()).max(1) as usize;
                    let rows = (height_px / font.cell_height()).max(1) as usize;
                    if let Err(e) = terminal.resize(cols, rows) {
                        warn!(error = %e, "grid resize failed");
                    }
                    if let Err(e) = pty.resize(cols as u16, rows as u16) {
                        warn!(error = %e, "pty resize notification failed");
                    }
                }
                WindowEvent::Close => break 'outer,
            }
        }

        loop {
            match pty.try_read() {
                PtyReadResult::Bytes(bytes) => {
                    for b in bytes {
                        terminal.feed(b, &mut window);
                    }
                }
                PtyReadResult::WouldBlock => break,
                PtyReadResult::Eof => {
                    info!("pty closed, shutting down");
                    break 'outer;
                }
                PtyReadResult::Error(e) => {
                    warn!(error = %e, "pty read error, shutting down");
                    break 'outer;
                }
            }
        }

        let commands = render(&terminal.grid, terminal.cursor, palette, font);
        window.present(&commands);

        if pty.has_exited() {
            info!("shell exited, shutting down");
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_timeout_matches_original_select_interval() {
        assert_eq!(FRAME_TIMEOUT, Duration::from_micros(16_666));
    }
}
