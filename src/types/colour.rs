//! Colour type and parsing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

use crate::error::{PaletteaError, Result};

/// An RGBA colour value (straight, non-premultiplied alpha).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Colour {
    /// Create a new colour from RGBA components.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a new opaque colour from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Fully transparent colour.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// White.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Parse a colour from either hex notation or `hsv(h, s, v)`.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some(args) = s.strip_prefix("hsv(").and_then(|r| r.strip_suffix(')')) {
            return Self::from_hsv_args(args);
        }
        Self::from_hex(s)
    }

    /// Parse a hex colour string.
    ///
    /// Supports formats:
    /// - `#RGB` (3 digits, expanded to 6)
    /// - `#RGBA` (4 digits, expanded to 8)
    /// - `#RRGGBB` (6 digits)
    /// - `#RRGGBBAA` (8 digits)
    pub fn from_hex(s: &str) -> Result<Self> {
        let s = s.trim();
        let hex = s.strip_prefix('#').unwrap_or(s);

        let nibbles = || -> Result<Vec<u8>> { hex.chars().map(parse_hex_digit).collect() };

        let len = if hex.is_ascii() { hex.len() } else { 0 };

        match len {
            3 | 4 => {
                let n = nibbles()?;
                let a = n.get(3).map_or(255, |&a| a << 4 | a);
                Ok(Self::new(n[0] << 4 | n[0], n[1] << 4 | n[1], n[2] << 4 | n[2], a))
            }
            6 | 8 => {
                let r = parse_hex_byte(&hex[0..2])?;
                let g = parse_hex_byte(&hex[2..4])?;
                let b = parse_hex_byte(&hex[4..6])?;
                let a = if len == 8 {
                    parse_hex_byte(&hex[6..8])?
                } else {
                    255
                };
                Ok(Self::new(r, g, b, a))
            }
            _ => Err(PaletteaError::Parse {
                message: format!("Invalid hex colour: {}", s),
                help: Some("Use #RGB, #RGBA, #RRGGBB, or #RRGGBBAA format".to_string()),
            }),
        }
    }

    /// Build an opaque colour from hue (degrees), saturation and value in [0, 1].
    pub fn from_hsv(hue: f32, saturation: f32, value: f32) -> Self {
        use palette::{Hsv, IntoColor, Srgb};

        let hsv = Hsv::new(hue, saturation.clamp(0.0, 1.0), value.clamp(0.0, 1.0));
        let rgb: Srgb<f32> = hsv.into_color();
        Self::rgb(
            unit_to_byte(rgb.red),
            unit_to_byte(rgb.green),
            unit_to_byte(rgb.blue),
        )
    }

    fn from_hsv_args(args: &str) -> Result<Self> {
        let parts: Vec<&str> = args.split(',').map(str::trim).collect();
        let invalid = || PaletteaError::Parse {
            message: format!("Invalid hsv colour: hsv({})", args),
            help: Some("Use hsv(hue, saturation, value), e.g. hsv(210, 0.6, 0.9)".to_string()),
        };
        if parts.len() != 3 {
            return Err(invalid());
        }
        let mut values = [0.0f32; 3];
        for (slot, part) in values.iter_mut().zip(&parts) {
            *slot = part.parse().map_err(|_| invalid())?;
        }
        Ok(Self::from_hsv(values[0], values[1], values[2]))
    }

    /// Convert to RGBA array.
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<[u8; 4]> for Colour {
    fn from(rgba: [u8; 4]) -> Self {
        Self::new(rgba[0], rgba[1], rgba[2], rgba[3])
    }
}

impl FromStr for Colour {
    type Err = PaletteaError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl<'de> Deserialize<'de> for Colour {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

/// Map a unit float to a byte, rounding and clamping.
pub(crate) fn unit_to_byte(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn parse_hex_digit(c: char) -> Result<u8> {
    c.to_digit(16)
        .map(|d| d as u8)
        .ok_or_else(|| PaletteaError::Parse {
            message: format!("Invalid hex digit: {}", c),
            help: None,
        })
}

fn parse_hex_byte(s: &str) -> Result<u8> {
    u8::from_str_radix(s, 16).map_err(|_| PaletteaError::Parse {
        message: format!("Invalid hex byte: {}", s),
        help: None,
    })
}
