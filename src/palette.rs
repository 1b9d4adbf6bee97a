// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Chart colours for one aggregation pass.

use std::collections::HashSet;

const GOLDEN_ANGLE: f64 = 137.507_764;
const START_HUE: f64 = 200.0;
const SATURATION: f64 = 0.65;
const LIGHTNESS: f64 = 0.55;

/// Hands out `#RRGGBB` colours that never repeat within one palette.
#[derive(Debug, Default)]
pub struct Palette {
    next: usize,
    used: HashSet<String>,
}

impl Palette {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_color(&mut self) -> String {
        let mut hue = (START_HUE + self.next as f64 * GOLDEN_ANGLE) % 360.0;
        self.next += 1;
        let mut lightness = LIGHTNESS;
        let mut attempts = 0usize;
        loop {
            let c = hsl_to_hex(hue, SATURATION, lightness);
            if self.used.insert(c.clone()) {
                return c;
            }
            attempts += 1;
            hue = (hue + 1.0) % 360.0;
            // every hue at this lightness is taken
            if attempts % 360 == 0 {
                lightness = 0.2 + (lightness - 0.2 + 0.03) % 0.6;
            }
        }
    }
}

fn hsl_to_hex(h: f64, s: f64, l: f64) -> String {
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let hp = h / 60.0;
    let x = c * (1.0 - (hp % 2.0 - 1.0).abs());
    let (r, g, b) = match hp as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = l - c / 2.0;
    let to_u8 = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    format!("#{:02x}{:02x}{:02x}", to_u8(r), to_u8(g), to_u8(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colours_are_unique_within_a_pass() {
        let mut p = Palette::new();
        let colours: Vec<String> = (0..500).map(|_| p.next_color()).collect();
        let distinct: HashSet<&String> = colours.iter().collect();
        assert_eq!(distinct.len(), colours.len());
    }

    #[test]
    fn sequence_is_repeatable() {
        let a: Vec<String> = {
            let mut p = Palette::new();
            (0..8).map(|_| p.next_color()).collect()
        };
        let b: Vec<String> = {
            let mut p = Palette::new();
            (0..8).map(|_| p.next_color()).collect()
        };
        assert_eq!(a, b);
    }

    #[test]
    fn hex_format() {
        assert_eq!(hsl_to_hex(0.0, 1.0, 0.5), "#ff0000");
        assert_eq!(hsl_to_hex(120.0, 1.0, 0.5), "#00ff00");
    }
}
