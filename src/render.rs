// Copyright (c) 2026 minitty contributors. Licensed under Apache License, Version 2.0.

//! The render adapter: a pure function from terminal state to draw
//! commands. Three passes — backgrounds, glyphs, decorations — plus a
//! final cursor pass, matching the original draw-order exactly.

use crate::backend::font::FontBackend;
use crate::backend::window::DrawCommand;
use crate::core::cell::CellAttr;
use crate::core::cursor::Cursor;
use crate::core::grid::Grid;
use crate::core::palette::{Palette, DEFAULT_BG};

/// Renders one frame. Never mutates `grid`/`cursor`; safe to call from a
/// read-only borrow of the terminal aggregate.
pub fn render(grid: &Grid, cursor: Cursor, palette: &Palette, font: &dyn FontBackend) -> Vec<DrawCommand> {
    let cell_w = font.cell_width();
    let cell_h = font.cell_height();
    let mut commands = Vec::new();

    // Pass 1: backgrounds. Skip the default background; the clear already
    // accounts for it and redrawing it is wasted fill-rate.
    for y in 0..grid.rows() {
        for x in 0..grid.cols() {
            let cell = grid.get(x, y);
            let bg_idx = if cell.attr.contains(CellAttr::REVERSE) { cell.fg } else { cell.bg };
            if bg_idx == DEFAULT_BG {
                continue;
            }
            commands.push(DrawCommand::FilledRect {
                x: x as u32 * cell_w,
                y: y as u32 * cell_h,
                w: cell_w,
                h: cell_h,
                color: palette.get(bg_idx),
            });
        }
    }

    // Pass 2: glyphs.
    for y in 0..grid.rows() {
        for x in 0..grid.cols() {
            let cell = grid.get(x, y);
            if cell.attr.contains(CellAttr::INVISIBLE) || !(0x20..=0x7E).contains(&cell.ch) {
                continue;
            }
            let mut fg_idx = if cell.attr.contains(CellAttr::REVERSE) { cell.bg } else { cell.fg };
            if cell.attr.contains(CellAttr::BOLD) && fg_idx < 8 {
                fg_idx += 8;
            }
            commands.push(DrawCommand::Glyph {
                x: x as u32 * cell_w,
                y: y as u32 * cell_h,
                ch: cell.ch,
                color: palette.get(fg_idx),
            });
        }
    }

    // Pass 3: decorations (underline, strikethrough).
    for y in 0..grid.rows() {
        for x in 0..grid.cols() {
            let cell = grid.get(x, y);
            let mut fg_idx = if cell.attr.contains(CellAttr::REVERSE) { cell.bg } else { cell.fg };
            if cell.attr.contains(CellAttr::BOLD) && fg_idx < 8 {
                fg_idx += 8;
            }
            let color = palette.get(fg_idx);
            let x0 = x as u32 * cell_w;
            let x1 = x0 + cell_w;
            if cell.attr.contains(CellAttr::UNDERLINE) {
                let y_line = y as u32 * cell_h + cell_h - 1;
                commands.push(DrawCommand::Line { x0, y0: y_line, x1, y1: y_line, color });
            }
            if cell.attr.contains(CellAttr::STRUCK) {
                let y_line = y as u32 * cell_h + cell_h / 2;
                commands.push(DrawCommand::Line { x0, y0: y_line, x1, y1: y_line, color });
            }
        }
    }

    // Pass 4: cursor, drawn last with an inverting blend so it is always
    // visible regardless of the cell color underneath.
    commands.push(DrawCommand::InvertRect {
        x: cursor.x as u32 * cell_w,
        y: cursor.y as u32 * cell_h,
        w: cell_w,
        h: cell_h,
    });

    commands
}
