// Copyright (c) 2026 minitty contributors. Licensed under Apache License, Version 2.0.

//! CSI dispatch: cursor motion, erase, and SGR, applied to a `Terminal`'s
//! grid/cursor/pen. Private-mode CSI sequences (`ESC[?...]`) are recognized
//! by the parser but never dispatched here.

use crate::ansi::parser::ParsedCsi;
use crate::ansi::sgr::set_graphics_rendition;
use crate::core::cursor::Cursor;
use crate::core::grid::{EraseDisplayMode, EraseLineMode, Grid};
use crate::core::pen::Pen;

/// First parameter, or `default` if absent/zero — used by the motion
/// commands where a missing or zero count means "1".
fn param_or(params: &[i64], index: usize, default: i64) -> i64 {
    match params.get(index).copied() {
        Some(0) | None => default,
        Some(v) => v,
    }
}

/// Dispatches one parsed CSI sequence. Private-mode sequences are ignored
/// outright, per the open-question resolution in `SPEC_FULL.md` §9.
pub fn dispatch_csi(csi: &ParsedCsi, grid: &mut Grid, cursor: &mut Cursor, pen: &mut Pen) {
    if csi.private {
        return;
    }

    let params = csi.params.as_slice();
    match csi.final_byte {
        b'H' | b'f' => {
            let row = param_or(params, 0, 1).max(1) as usize - 1;
            let col = param_or(params, 1, 1).max(1) as usize - 1;
            cursor.y = row;
            cursor.x = col;
        }
        b'A' => cursor.y = cursor.y.saturating_sub(param_or(params, 0, 1).max(1) as usize),
        b'B' => cursor.y += param_or(params, 0, 1).max(1) as usize,
        b'C' => cursor.x += param_or(params, 0, 1).max(1) as usize,
        b'D' => cursor.x = cursor.x.saturating_sub(param_or(params, 0, 1).max(1) as usize),
        b'J' => {
            let mode = EraseDisplayMode::from_param(params.first().copied().unwrap_or(0).max(0) as u16);
            grid.clear_screen(cursor, mode);
        }
        b'K' => {
            let mode = EraseLineMode::from_param(params.first().copied().unwrap_or(0).max(0) as u16);
            grid.clear_line(cursor.y, cursor.x, mode);
        }
        b'm' => set_graphics_rendition(pen, params),
        _ => {}
    }

    cursor.clamp(grid.cols(), grid.rows());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ansi::parser::Parser;
    use crate::core::cell::Cell;
    use smallvec::SmallVec;

    fn parse_one(input: &str) -> ParsedCsi {
        let mut parser = Parser::new();
        let mut last = None;
        for b in input.bytes() {
            if let crate::ansi::parser::ParseEvent::Csi(csi) = parser.feed(b) {
                last = Some(csi);
            }
        }
        last.expect("input did not contain a complete CSI sequence")
    }

    #[test]
    fn cursor_position_is_one_based_on_input() {
        let mut grid = Grid::new(80, 24);
        let mut cursor = Cursor::new();
        let mut pen = Pen::default();
        dispatch_csi(&parse_one("\x1b[2;5H"), &mut grid, &mut cursor, &mut pen);
        assert_eq!(cursor, Cursor { x: 4, y: 1 });
    }

    #[test]
    fn home_with_no_params_goes_to_origin() {
        let mut grid = Grid::new(80, 24);
        let mut cursor = Cursor { x: 10, y: 10 };
        let mut pen = Pen::default();
        dispatch_csi(&parse_one("\x1b[H"), &mut grid, &mut cursor, &mut pen);
        assert_eq!(cursor, Cursor { x: 0, y: 0 });
    }

    #[test]
    fn private_mode_csi_is_a_complete_noop() {
        let mut grid = Grid::new(80, 24);
        grid.set(0, 0, Cell { ch: b'x', ..Cell::EMPTY });
        let mut cursor = Cursor { x: 3, y: 3 };
        let mut pen = Pen::default();
        dispatch_csi(&parse_one("\x1b[?25h"), &mut grid, &mut cursor, &mut pen);
        assert_eq!(cursor, Cursor { x: 3, y: 3 });
        assert_eq!(grid.get(0, 0).ch, b'x');
        assert_eq!(pen, Pen::default());
    }

    #[test]
    fn erase_display_mode_2_clears_and_homes() {
        let mut grid = Grid::new(5, 5);
        grid.set(2, 2, Cell { ch: b'x', ..Cell::EMPTY });
        let mut cursor = Cursor { x: 2, y: 2 };
        let mut pen = Pen::default();
        dispatch_csi(&parse_one("\x1b[2J"), &mut grid, &mut cursor, &mut pen);
        assert_eq!(grid.get(2, 2), Cell::EMPTY);
        assert_eq!(cursor, Cursor { x: 0, y: 0 });
    }

    #[test]
    fn sgr_final_byte_routes_to_set_graphics_rendition() {
        let mut grid = Grid::new(80, 24);
        let mut cursor = Cursor::new();
        let mut pen = Pen::default();
        dispatch_csi(&parse_one("\x1b[31m"), &mut grid, &mut cursor, &mut pen);
        assert_eq!(pen.fg, 1);
    }

    #[test]
    fn excess_params_beyond_16_are_dropped_by_the_parser() {
        let csi = parse_one(&format!("\x1b[{}m", (0..20).map(|_| "1").collect::<Vec<_>>().join(";")));
        assert_eq!(csi.params.len(), 16);
        let _: SmallVec<[i64; 16]> = csi.params;
    }
}
