// Copyright (c) 2026 minitty contributors. Licensed under Apache License, Version 2.0.

//! SGR (Select Graphic Rendition) — the CSI `m` command. Mutates the pen.

use crate::core::cell::CellAttr;
use crate::core::pen::Pen;

/// Applies one SGR parameter to `pen`. Unknown selectors are ignored.
pub fn apply_sgr_param(pen: &mut Pen, param: i64) {
    match param {
        0 => pen.reset(),
        1 => pen.attr = pen.attr.with(CellAttr::BOLD),
        2 => pen.attr = pen.attr.with(CellAttr::FAINT),
        3 => pen.attr = pen.attr.with(CellAttr::ITALIC),
        4 => pen.attr = pen.attr.with(CellAttr::UNDERLINE),
        5 => pen.attr = pen.attr.with(CellAttr::BLINK),
        7 => pen.attr = pen.attr.with(CellAttr::REVERSE),
        8 => pen.attr = pen.attr.with(CellAttr::INVISIBLE),
        9 => pen.attr = pen.attr.with(CellAttr::STRUCK),
        22 => pen.attr = pen.attr.without(CellAttr::BOLD).without(CellAttr::FAINT),
        23 => pen.attr = pen.attr.without(CellAttr::ITALIC),
        24 => pen.attr = pen.attr.without(CellAttr::UNDERLINE),
        25 => pen.attr = pen.attr.without(CellAttr::BLINK),
        27 => pen.attr = pen.attr.without(CellAttr::REVERSE),
        28 => pen.attr = pen.attr.without(CellAttr::INVISIBLE),
        29 => pen.attr = pen.attr.without(CellAttr::STRUCK),
        30..=37 => pen.fg = (param - 30) as u16,
        40..=47 => pen.bg = (param - 40) as u16,
        39 => pen.fg = crate::core::palette::DEFAULT_FG,
        49 => pen.bg = crate::core::palette::DEFAULT_BG,
        90..=97 => pen.fg = (param - 90) as u16 + 8,
        100..=107 => pen.bg = (param - 100) as u16 + 8,
        _ => {}
    }
}

/// Applies a full SGR parameter list, handling the 256-color extension
/// (`38;5;N` / `48;5;N`, consuming two extra parameters) as it looks ahead.
/// Truecolor (`38;2;r;g;b`) is recognized structurally but ignored — not
/// supported, per non-goals.
pub fn set_graphics_rendition(pen: &mut Pen, params: &[i64]) {
    if params.is_empty() {
        pen.reset();
        return;
    }

    let mut i = 0;
    while i < params.len() {
        let p = params[i];
        if (p == 38 || p == 48) && i + 1 < params.len() {
            match params[i + 1] {
                5 if i + 2 < params.len() => {
                    let idx = (params[i + 2] & 0xFF) as u16;
                    if p == 38 {
                        pen.fg = idx;
                    } else {
                        pen.bg = idx;
                    }
                    i += 3;
                    continue;
                }
                2 if i + 4 < params.len() => {
                    // Truecolor: consumed but not applied (non-goal).
                    i += 5;
                    continue;
                }
                _ => {}
            }
        }
        apply_sgr_param(pen, p);
        i += 1;
    }
}
