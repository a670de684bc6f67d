// Copyright (c) 2026 minitty contributors. Licensed under Apache License, Version 2.0.

//! The control-sequence parser: a four-state byte-fed state machine.
//!
//! ```text
//! Normal --ESC--> Esc --'['--> Csi --final byte--> Normal (dispatch CSI)
//!    ^               \--']'--> Osc --BEL/ESC--------> Normal (dispatch OSC)
//!    |_______________________________________________________|
//! ```
//!
//! Buffer caps (256 for CSI, 512 for OSC) are enforced by `SmallVec`-backed
//! fixed-capacity buffers; exceeding the cap aborts the sequence back to
//! `Normal` with no partial effect, per the grid/pen invariants.

use smallvec::SmallVec;

const CSI_BUF_CAP: usize = 256;
const OSC_BUF_CAP: usize = 512;

/// A parsed, ready-to-dispatch CSI sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCsi {
    pub private: bool,
    pub params: SmallVec<[i64; 16]>,
    pub final_byte: u8,
}

/// A parsed, ready-to-dispatch OSC sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedOsc {
    pub payload: Vec<u8>,
}

/// Output of [`Parser::feed`]: either nothing yet, a plain byte to commit
/// via the character handler, or a fully parsed escape sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseEvent {
    /// No complete unit yet; parser consumed the byte internally.
    Pending,
    /// A control or printable byte to be handled by the character handler
    /// directly (outside of any escape sequence).
    Plain(u8),
    Csi(ParsedCsi),
    Osc(ParsedOsc),
}

/// The parser state machine. A tagged variant per state, so each state's
/// scratch buffer only exists while that state is active.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ParserState {
    Normal,
    Esc,
    Csi { buf: SmallVec<[u8; CSI_BUF_CAP]> },
    Osc { buf: SmallVec<[u8; OSC_BUF_CAP]> },
}

/// Owns the current parser state and advances it one byte at a time.
#[derive(Debug, Clone)]
pub struct Parser {
    state: ParserState,
}

impl Parser {
    #[must_use]
    pub fn new() -> Self { Self { state: ParserState::Normal } }

    #[cfg(test)]
    fn is_normal(&self) -> bool { matches!(self.state, ParserState::Normal) }

    /// Feeds one byte, returning what the byte produced.
    pub fn feed(&mut self, byte: u8) -> ParseEvent {
        match &mut self.state {
            ParserState::Normal => {
                if byte == 0x1B {
                    self.state = ParserState::Esc;
                    ParseEvent::Pending
                } else {
                    ParseEvent::Plain(byte)
                }
            }
            ParserState::Esc => {
                match byte {
                    b'[' => self.state = ParserState::Csi { buf: SmallVec::new() },
                    b']' => self.state = ParserState::Osc { buf: SmallVec::new() },
                    _ => self.state = ParserState::Normal,
                }
                ParseEvent::Pending
            }
            ParserState::Csi { buf } => {
                if (0x40..=0x7E).contains(&byte) {
                    let mut taken = std::mem::take(buf).to_vec();
                    taken.push(byte);
                    self.state = ParserState::Normal;
                    ParseEvent::Csi(parse_csi(&taken))
                } else if buf.len() >= CSI_BUF_CAP - 1 {
                    self.state = ParserState::Normal;
                    ParseEvent::Pending
                } else {
                    buf.push(byte);
                    ParseEvent::Pending
                }
            }
            ParserState::Osc { buf } => {
                if byte == 0x07 {
                    let payload = buf.to_vec();
                    self.state = ParserState::Normal;
                    ParseEvent::Osc(ParsedOsc { payload })
                } else if byte == 0x1B {
                    self.state = ParserState::Esc;
                    ParseEvent::Pending
                } else if buf.len() >= OSC_BUF_CAP - 1 {
                    self.state = ParserState::Normal;
                    ParseEvent::Pending
                } else {
                    buf.push(byte);
                    ParseEvent::Pending
                }
            }
        }
    }
}

impl Default for Parser {
    fn default() -> Self { Self::new() }
}

/// Parses a complete CSI buffer (parameters + final byte, no introducer)
/// into a [`ParsedCsi`]. Parameters default to 0 when empty; the list is
/// capped at 16 entries with excess silently dropped.
fn parse_csi(buf: &[u8]) -> ParsedCsi {
    let (final_byte, rest) = buf.split_last().expect("CSI buffer always has a final byte");
    let mut rest = rest;
    let private = rest.first() == Some(&b'?');
    if private {
        rest = &rest[1..];
    }

    let mut params: SmallVec<[i64; 16]> = SmallVec::new();
    if !rest.is_empty() {
        for part in rest.split(|&b| b == b';') {
            if params.len() >= 16 {
                break;
            }
            let value: i64 = std::str::from_utf8(part)
                .ok()
                .and_then(|s| if s.is_empty() { Some(0) } else { s.parse().ok() })
                .unwrap_or(0);
            params.push(value);
        }
    }

    ParsedCsi { private, params, final_byte: *final_byte }
}
