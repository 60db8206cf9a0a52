//! Colors
//!
//! Straight (non-premultiplied) RGBA colors used for brushes and shapes.

use std::fmt;

/// Color (RGBA, straight alpha)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Palette offered by the color picker
pub const PRESET_COLORS: [Color; 16] = [
    Color::rgb(0x00, 0x00, 0x00), // black
    Color::rgb(0xFF, 0xFF, 0xFF), // white
    Color::rgb(0xFF, 0x00, 0x00), // red
    Color::rgb(0x00, 0xFF, 0x00), // green
    Color::rgb(0x00, 0x00, 0xFF), // blue
    Color::rgb(0xFF, 0xFF, 0x00), // yellow
    Color::rgb(0xFF, 0x00, 0xFF), // magenta
    Color::rgb(0x00, 0xFF, 0xFF), // cyan
    Color::rgb(0xFF, 0xA5, 0x00), // orange
    Color::rgb(0x80, 0x00, 0x80), // purple
    Color::rgb(0x00, 0x80, 0x00), // dark green
    Color::rgb(0xA5, 0x2A, 0x2A), // brown
    Color::rgb(0x80, 0x80, 0x80), // gray
    Color::rgb(0xFF, 0xB6, 0xC1), // light pink
    Color::rgb(0xAD, 0xD8, 0xE6), // light blue
    Color::rgb(0x90, 0xEE, 0x90), // light green
];

impl Color {
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 255 };
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 255 };
    pub const TRANSPARENT: Color = Color { r: 0, g: 0, b: 0, a: 0 };
    pub const RED: Color = Color { r: 255, g: 0, b: 0, a: 255 };
    pub const GREEN: Color = Color { r: 0, g: 255, b: 0, a: 255 };
    pub const BLUE: Color = Color { r: 0, g: 0, b: 255, a: 255 };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create from hex string (e.g., "#ff0000")
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }

        match hex.len() {
            3 => {
                let r = u8::from_str_radix(&hex[0..1], 16).ok()?;
                let g = u8::from_str_radix(&hex[1..2], 16).ok()?;
                let b = u8::from_str_radix(&hex[2..3], 16).ok()?;
                Some(Color::rgb(r * 17, g * 17, b * 17))
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Color::rgb(r, g, b))
            }
            8 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                let a = u8::from_str_radix(&hex[6..8], 16).ok()?;
                Some(Color::rgba(r, g, b, a))
            }
            _ => None,
        }
    }

    /// Hex form, `#rrggbb` when opaque and `#rrggbbaa` otherwise
    pub fn to_hex(&self) -> String {
        self.to_string()
    }

    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }

    pub(crate) fn to_skia(self) -> tiny_skia::Color {
        tiny_skia::Color::from_rgba8(self.r, self.g, self.b, self.a)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_opaque() {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}
