//! Color parsing and contrast utilities.
//!
//! Colors are RGBA with 8 bits per channel. Frames composite in BGR order,
//! so `bgr()` is the accessor the render path wants; everything user-facing
//! (config files, reports, hex notation) stays RGB-ordered.

use crate::error::{InlayError, InlayResult};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// An RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    /// Fully opaque color from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#RGB`, `#RRGGBB`, or `#RRGGBBAA` notation (leading `#`
    /// optional).
    pub fn from_hex(s: &str) -> InlayResult<Self> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        let parse = |chunk: &str| {
            u8::from_str_radix(chunk, 16)
                .map_err(|_| InlayError::config(format!("invalid hex color {:?}", s)))
        };
        match digits.len() {
            3 => {
                let mut c = [0u8; 3];
                for (i, ch) in digits.chars().enumerate() {
                    let v = parse(&ch.to_string())?;
                    c[i] = v * 16 + v;
                }
                Ok(Self::rgb(c[0], c[1], c[2]))
            }
            6 => Ok(Self::rgb(
                parse(&digits[0..2])?,
                parse(&digits[2..4])?,
                parse(&digits[4..6])?,
            )),
            8 => Ok(Self::rgba(
                parse(&digits[0..2])?,
                parse(&digits[2..4])?,
                parse(&digits[4..6])?,
                parse(&digits[6..8])?,
            )),
            _ => Err(InlayError::config(format!("invalid hex color {:?}", s))),
        }
    }

    /// Hex notation; alpha is appended only when not fully opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// Channel order used by frame buffers.
    pub fn bgr(&self) -> [u8; 3] {
        [self.b, self.g, self.r]
    }

    pub fn rgba_bytes(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// True when the color participates in alpha blending rather than an
    /// opaque overwrite.
    pub fn is_translucent(&self) -> bool {
        self.a < 255
    }

    /// WCAG relative luminance (alpha ignored).
    pub fn relative_luminance(&self) -> f64 {
        fn linearize(channel: u8) -> f64 {
            let c = channel as f64 / 255.0;
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        0.2126 * linearize(self.r) + 0.7152 * linearize(self.g) + 0.0722 * linearize(self.b)
    }

    /// WCAG contrast ratio against another color, always >= 1.
    pub fn contrast_ratio(&self, other: &Color) -> f64 {
        let (l1, l2) = (self.relative_luminance(), other.relative_luminance());
        let (hi, lo) = if l1 >= l2 { (l1, l2) } else { (l2, l1) };
        (hi + 0.05) / (lo + 0.05)
    }

    /// Black or white, whichever reads better on this background.
    pub fn contrast_text(&self) -> Color {
        if self.contrast_ratio(&Color::BLACK) >= self.contrast_ratio(&Color::WHITE) {
            Color::BLACK
        } else {
            Color::WHITE
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = InlayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::from_hex(&s).map_err(D::Error::custom)
    }
}
