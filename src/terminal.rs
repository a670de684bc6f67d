// Copyright (c) 2026 minitty contributors. Licensed under Apache License, Version 2.0.

//! The terminal aggregate: owns grid, cursor, pen, and parser state, and
//! drives them from a byte stream via `feed`. Replaces the source's
//! process-global state with a single owned value.

use tracing::{debug, trace};

use crate::ansi::control;
use crate::ansi::csi::dispatch_csi;
use crate::ansi::osc::dispatch_osc;
use crate::ansi::parser::{ParseEvent, Parser};
use crate::backend::window::WindowBackend;
use crate::core::cell::Cell;
use crate::core::cursor::Cursor;
use crate::core::grid::Grid;
use crate::core::pen::Pen;
use crate::error::TerminalError;

/// Owns the mutable terminal state and interprets a byte stream into it.
pub struct Terminal {
    pub grid: Grid,
    pub cursor: Cursor,
    pub pen: Pen,
    parser: Parser,
}

impl Terminal {
    #[must_use]
    pub fn new(cols: usize, rows: usize) -> Self {
        Self { grid: Grid::new(cols, rows), cursor: Cursor::new(), pen: Pen::new(), parser: Parser::new() }
    }

    /// Resizes the grid, clamping the cursor into range.
    pub fn resize(&mut self, cols: usize, rows: usize) -> Result<(), TerminalError> {
        self.grid.resize(cols, rows, &mut self.cursor)
    }

    /// Feeds one PTY byte through the parser and applies whatever it
    /// produces: a plain control/printable byte, a complete CSI, or a
    /// complete OSC. Ends with the post-step scroll normalization that
    /// makes `\n` at the bottom row scroll the grid.
    pub fn feed(&mut self, byte: u8, window: &mut dyn WindowBackend) {
        match self.parser.feed(byte) {
            ParseEvent::Pending => {}
            ParseEvent::Plain(b) => self.handle_plain(b),
            ParseEvent::Csi(csi) => {
                trace!(final_byte = csi.final_byte as char, params = ?csi.params.as_slice(), "dispatch CSI");
                dispatch_csi(&csi, &mut self.grid, &mut self.cursor, &mut self.pen);
            }
            ParseEvent::Osc(osc) => {
                debug!(len = osc.payload.len(), "dispatch OSC");
                dispatch_osc(&osc, window);
            }
        }

        if self.cursor.y >= self.grid.rows() {
            self.grid.scroll_up_one();
            self.cursor.y = self.grid.rows() - 1;
        }
    }

    fn handle_plain(&mut self, byte: u8) {
        match byte {
            b'\n' => control::handle_line_feed(&mut self.cursor),
            b'\r' => control::handle_carriage_return(&mut self.cursor),
            b'\x08' => control::handle_backspace(&mut self.cursor),
            b'\t' => control::handle_tab(&mut self.cursor),
            c if c >= 0x20 => self.print_commit(c),
            _ => {} // other control bytes ignored
        }
    }

    /// Writes a printable byte at the cursor, wrapping (deferred: wrap
    /// happens here, at the next print, not eagerly at the prior column)
    /// and scrolling as needed, then advances the cursor.
    fn print_commit(&mut self, ch: u8) {
        if self.cursor.x >= self.grid.cols() {
            self.cursor.x = 0;
            self.cursor.y += 1;
        }
        if self.cursor.y >= self.grid.rows() {
            self.grid.scroll_up_one();
            self.cursor.y = self.grid.rows() - 1;
        }
        let cell = Cell { ch, attr: self.pen.attr, fg: self.pen.fg, bg: self.pen.bg };
        self.grid.set(self.cursor.x, self.cursor.y, cell);
        self.cursor.x += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::window::RecordingWindowBackend;
    use crate::core::palette::{DEFAULT_BG, DEFAULT_FG};
    use pretty_assertions::assert_eq;

    fn feed_all(term: &mut Terminal, window: &mut dyn WindowBackend, bytes: &[u8]) {
        for &b in bytes {
            term.feed(b, window);
        }
    }

    #[test]
    fn scenario_1_hi_newline() {
        let mut term = Terminal::new(80, 24);
        let mut window = RecordingWindowBackend::new();
        feed_all(&mut term, &mut window, b"Hi\n");
        assert_eq!(term.grid.get(0, 0).ch, b'H');
        assert_eq!(term.grid.get(1, 0).ch, b'i');
        assert_eq!(term.cursor, Cursor { x: 0, y: 1 });
    }

    #[test]
    fn scenario_2_cursor_position_then_print() {
        let mut term = Terminal::new(80, 24);
        let mut window = RecordingWindowBackend::new();
        feed_all(&mut term, &mut window, b"A\x1b[2;5HB");
        assert_eq!(term.grid.get(0, 0).ch, b'A');
        assert_eq!(term.grid.get(4, 1).ch, b'B');
        assert_eq!(term.cursor, Cursor { x: 5, y: 1 });
    }

    #[test]
    fn scenario_3_erase_line_mode_0() {
        let mut term = Terminal::new(80, 24);
        let mut window = RecordingWindowBackend::new();
        feed_all(&mut term, &mut window, b"X\x1b[1;1H\x1b[K");
        assert_eq!(term.grid.get(0, 0), Cell::EMPTY);
        assert_eq!(term.cursor, Cursor { x: 0, y: 0 });
    }

    #[test]
    fn scenario_4_sgr_colors_reset() {
        let mut term = Terminal::new(80, 24);
        let mut window = RecordingWindowBackend::new();
        feed_all(&mut term, &mut window, b"\x1b[31mR\x1b[0mG");
        let r = term.grid.get(0, 0);
        assert_eq!(r.ch, b'R');
        assert_eq!(r.fg, 1);
        let g = term.grid.get(1, 0);
        assert_eq!(g.ch, b'G');
        assert_eq!(g.fg, DEFAULT_FG);
    }

    #[test]
    fn scenario_5_extended_256_color() {
        let mut term = Terminal::new(80, 24);
        let mut window = RecordingWindowBackend::new();
        feed_all(&mut term, &mut window, b"\x1b[38;5;201mQ");
        let q = term.grid.get(0, 0);
        assert_eq!(q.ch, b'Q');
        assert_eq!(q.fg, 201);
    }

    #[test]
    fn scenario_6_deferred_wrap_at_eol() {
        let mut term = Terminal::new(80, 24);
        let mut window = RecordingWindowBackend::new();
        feed_all(&mut term, &mut window, &[b'a'; 80]);
        feed_all(&mut term, &mut window, b"b");
        assert_eq!(term.grid.get(0, 1).ch, b'b');
        assert_eq!(term.cursor, Cursor { x: 1, y: 1 });
    }

    #[test]
    fn scenario_7_scroll_off_everything() {
        let mut term = Terminal::new(80, 24);
        let mut window = RecordingWindowBackend::new();
        term.cursor.y = 23;
        for _ in 0..24 {
            term.feed(b'\n', &mut window);
        }
        for y in 0..24 {
            for x in 0..80 {
                assert_eq!(term.grid.get(x, y), Cell::EMPTY);
            }
        }
        assert_eq!(term.cursor, Cursor { x: 0, y: 23 });
    }

    #[test]
    fn scenario_8_osc_title_no_grid_effect() {
        let mut term = Terminal::new(80, 24);
        let mut window = RecordingWindowBackend::new();
        feed_all(&mut term, &mut window, b"\x1b]2;hi\x07");
        assert_eq!(window.title(), "hi");
        assert_eq!(term.grid.get(0, 0), Cell::EMPTY);
    }

    #[test]
    fn property_csi_abort_does_not_mutate_grid_or_pen() {
        let mut term = Terminal::new(80, 24);
        let mut window = RecordingWindowBackend::new();
        feed_all(&mut term, &mut window, b"\x1b[31m");
        let pen_before = term.pen;
        // Unknown final byte, e.g. '~' with garbage params: ignored, no mutation.
        feed_all(&mut term, &mut window, b"\x1b[999;999~");
        assert_eq!(term.pen, pen_before);
        assert_eq!(term.grid.get(0, 0), Cell::EMPTY);
    }

    #[test]
    fn private_mode_csi_leaves_cursor_grid_and_pen_untouched() {
        let mut term = Terminal::new(80, 24);
        let mut window = RecordingWindowBackend::new();
        term.cursor = Cursor { x: 3, y: 3 };
        feed_all(&mut term, &mut window, b"\x1b[?25h");
        assert_eq!(term.cursor, Cursor { x: 3, y: 3 });
        assert_eq!(term.grid.get(0, 0), Cell::EMPTY);
        assert_eq!(term.pen, Pen::default());
    }

    #[test]
    fn resize_failure_surface_is_a_terminal_error() {
        let mut term = Terminal::new(4, 4);
        // A sane resize always succeeds; this just exercises the Result
        // plumbing rather than forcing an actual allocation failure.
        assert!(term.resize(8, 8).is_ok());
        assert_eq!(term.grid.cols(), 8);
    }

    #[test]
    fn default_bg_sentinel_is_used_for_cleared_cells() {
        let mut term = Terminal::new(4, 4);
        let mut window = RecordingWindowBackend::new();
        feed_all(&mut term, &mut window, b"\x1b[2J");
        assert_eq!(term.grid.get(0, 0).bg, DEFAULT_BG);
    }
}
