// Copyright (c) 2026 minitty contributors. Licensed under Apache License, Version 2.0.

//! External collaborators: window/GL, font rasterization, and the PTY.
//! Window and font are trait-only contracts (concrete implementations are
//! out of scope); PTY has a concrete `portable-pty`-backed implementation.

pub mod font;
pub mod pty;
pub mod window;
