// Copyright (c) 2026 minitty contributors. Licensed under Apache License, Version 2.0.

//! The static 258-entry color table: 16 basic ANSI colors, a 6x6x6 color
//! cube, a 24-step grayscale ramp, and two default-color sentinels.

/// Index of the default-foreground sentinel entry.
pub const DEFAULT_FG: u16 = 256;
/// Index of the default-background sentinel entry.
pub const DEFAULT_BG: u16 = 257;

/// An (R, G, B) triple with each component in `[0.0, 1.0]`.
pub type Rgb = (f32, f32, f32);

const CUBE_STEPS: [f32; 6] = [0.00, 0.37, 0.55, 0.74, 0.93, 1.00];

const BASIC_16: [Rgb; 16] = [
    (0.10, 0.10, 0.10), // black
    (0.80, 0.00, 0.00), // red
    (0.00, 0.80, 0.00), // green
    (0.80, 0.80, 0.00), // yellow
    (0.00, 0.00, 0.80), // blue
    (0.80, 0.00, 0.80), // magenta
    (0.00, 0.80, 0.80), // cyan
    (0.75, 0.75, 0.75), // white
    (0.50, 0.50, 0.50), // bright black
    (1.00, 0.00, 0.00), // bright red
    (0.00, 1.00, 0.00), // bright green
    (1.00, 1.00, 0.00), // bright yellow
    (0.36, 0.36, 1.00), // bright blue
    (1.00, 0.00, 1.00), // bright magenta
    (0.00, 1.00, 1.00), // bright cyan
    (1.00, 1.00, 1.00), // bright white
];

/// Static palette of 258 colors, built once and indexed by [`Palette::get`].
pub struct Palette {
    table: [Rgb; 258],
}

impl Palette {
    /// Builds the full 258-entry table.
    #[must_use]
    pub fn new() -> Self {
        let mut table = [(0.0, 0.0, 0.0); 258];

        table[0..16].copy_from_slice(&BASIC_16);

        let mut idx = 16;
        for r in 0..6 {
            for g in 0..6 {
                for b in 0..6 {
                    table[idx] = (CUBE_STEPS[r], CUBE_STEPS[g], CUBE_STEPS[b]);
                    idx += 1;
                }
            }
        }
        debug_assert_eq!(idx, 232);

        for step in 0..24 {
            let level = 0.03 + step as f32 * 0.04;
            table[232 + step] = (level, level, level);
        }

        table[DEFAULT_FG as usize] = (0.9, 0.9, 0.9);
        table[DEFAULT_BG as usize] = (0.1, 0.1, 0.1);

        Self { table }
    }

    /// Looks up the color for `index`. Out-of-range indices clamp to the
    /// default background, which should never happen given [`crate::core::cell::Cell`]'s
    /// invariant that `fg`/`bg` are always valid palette indices.
    #[must_use]
    pub fn get(&self, index: u16) -> Rgb {
        self.table
            .get(index as usize)
            .copied()
            .unwrap_or(self.table[DEFAULT_BG as usize])
    }
}

impl Default for Palette {
    fn default() -> Self { Self::new() }
}
