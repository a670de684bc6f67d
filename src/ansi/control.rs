// Copyright (c) 2026 minitty contributors. Licensed under Apache License, Version 2.0.

//! Control-byte handling: backspace, tab, line feed, carriage return. Thin
//! shims delegating to `Cursor`; kept separate from the parser so the
//! per-byte hot path reads as a short list of named operations.

use crate::core::cursor::Cursor;

/// `\b` — move left one column, stopping at column 0.
pub fn handle_backspace(cursor: &mut Cursor) {
    cursor.x = cursor.x.saturating_sub(1);
}

/// `\t` — advance to the next multiple-of-8 column.
pub fn handle_tab(cursor: &mut Cursor) {
    cursor.x = (cursor.x + 8) & !7;
}

/// `\n` — move down one row. Scroll-on-overflow is applied by the caller's
/// post-step normalization, not here.
pub fn handle_line_feed(cursor: &mut Cursor) {
    cursor.y += 1;
}

/// `\r` — return to column 0.
pub fn handle_carriage_return(cursor: &mut Cursor) {
    cursor.x = 0;
}
