// Copyright (c) 2026 minitty contributors. Licensed under Apache License, Version 2.0.

//! OSC dispatch. Only `Ps;Pt` with `Ps == 2` (set window title) is
//! recognized; everything else is silently dropped.

use crate::ansi::parser::ParsedOsc;
use crate::backend::window::WindowBackend;

/// Dispatches one parsed OSC payload, calling `window.set_title` for the
/// `2;<title>` form. Malformed or unrecognized payloads are ignored.
pub fn dispatch_osc(osc: &ParsedOsc, window: &mut dyn WindowBackend) {
    let Ok(text) = std::str::from_utf8(&osc.payload) else { return };
    let Some((selector, title)) = text.split_once(';') else { return };
    if selector == "2" {
        window.set_title(title);
    }
}
