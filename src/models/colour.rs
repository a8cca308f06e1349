use serde::{Serialize, Serializer};
use std::fmt;
use thiserror::Error;

pub const OPAQUE: u8 = 255;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HexError {
    #[error("hex colour must have 6 digits, got {0}")]
    InvalidLength(usize),
    #[error("invalid hex digits in '{0}'")]
    InvalidDigits(String),
}

impl Rgb8 {
    pub const WHITE: Rgb8 = Rgb8::new(255, 255, 255);
    pub const BLACK: Rgb8 = Rgb8::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb8 { r, g, b }
    }

    /// `#rrggbb`, lowercase
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Accepts `rrggbb` with or without a leading `#`, in either case.
    pub fn from_hex(hex: &str) -> Result<Self, HexError> {
        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 6 {
            return Err(HexError::InvalidLength(digits.len()));
        }
        let channel = |i: usize| {
            digits
                .get(i..i + 2)
                .and_then(|s| u8::from_str_radix(s, 16).ok())
                .ok_or_else(|| HexError::InvalidDigits(hex.to_string()))
        };
        Ok(Rgb8::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Linear blend towards `other`, truncating each channel independently.
    pub fn lerp(self, other: Rgb8, t: f64) -> Rgb8 {
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t) as u8;
        Rgb8::new(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
        )
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl Default for Rgb8 {
    fn default() -> Self {
        Rgb8::WHITE
    }
}

impl From<[u8; 3]> for Rgb8 {
    fn from(rgb: [u8; 3]) -> Self {
        Rgb8::new(rgb[0], rgb[1], rgb[2])
    }
}

impl fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Rgb8 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    Rgb8::new(r, g, b).to_hex()
}

pub fn hex_to_rgb(hex: &str) -> Result<(u8, u8, u8), HexError> {
    let c = Rgb8::from_hex(hex)?;
    Ok((c.r, c.g, c.b))
}

/// Parse one colour component; only integers in 0..=255 are accepted.
pub fn parse_component(token: &str) -> Option<u8> {
    token.trim().parse::<u8>().ok()
}
