//! RGB colors and the random palettes used by bricks and fireworks

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Hex digits a "bright" color is built from
const BRIGHT_DIGITS: [u8; 8] = [0xA, 0xB, 0xC, 0xD, 0xE, 0xF, 0x8, 0x9];

/// An opaque 24-bit color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::from_hex(0xFFFFFF);
    pub const BLACK: Color = Color::from_hex(0x000000);
    pub const YELLOW: Color = Color::from_hex(0xFFFF00);
    pub const GOLD: Color = Color::from_hex(0xFFD700);
    pub const RED: Color = Color::from_hex(0xFF0000);
    pub const GREEN: Color = Color::from_hex(0x00FF00);
    /// Ball, paddle, HUD text and initial bricks
    pub const BLUE: Color = Color::from_hex(0x0095DD);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed 0xRRGGBB value
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
        }
    }

    pub fn to_hex(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Any color, uniformly
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::from_hex(rng.random_range(0..=0xFF_FFFF))
    }

    /// A bright color: every hex digit drawn from 8-F
    pub fn random_bright<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut channel = || {
            let hi = BRIGHT_DIGITS[rng.random_range(0..BRIGHT_DIGITS.len())];
            let lo = BRIGHT_DIGITS[rng.random_range(0..BRIGHT_DIGITS.len())];
            (hi << 4) | lo
        };
        let r = channel();
        let g = channel();
        let b = channel();
        Self { r, g, b }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}
