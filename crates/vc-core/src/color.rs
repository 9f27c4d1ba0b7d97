//! Brush colors and the CSS color parser.
//!
//! Accepts the forms the surrounding UI hands us: hex (`#rgb`, `#rgba`,
//! `#rrggbb`, `#rrggbbaa`) and functional `rgb()` / `rgba()` notation.

use crate::error::ColorError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use winnow::ascii::{float, multispace0};
use winnow::combinator::{alt, delimited, preceded, separated};
use winnow::error::{ContextError, ErrMode};
use winnow::token::take_while;
use winnow::{ModalResult, Parser};

/// A straight-alpha RGBA color, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse any supported CSS color string.
    pub fn parse(input: &str) -> Result<Self, ColorError> {
        let lowered = input.trim().to_ascii_lowercase();
        css_color
            .parse(lowered.as_str())
            .map_err(|_| ColorError::Invalid(input.to_string()))
    }

    /// Decode the hex digits of a `#...` color (without the `#`).
    pub fn from_hex_digits(hex: &str) -> Option<Self> {
        let bytes = hex.as_bytes();
        match bytes.len() {
            3 | 4 => {
                let r = hex_val(bytes[0])? * 17;
                let g = hex_val(bytes[1])? * 17;
                let b = hex_val(bytes[2])? * 17;
                let a = match bytes.get(3) {
                    Some(&c) => hex_val(c)? * 17,
                    None => 255,
                };
                Some(Self::rgba(r, g, b, a))
            }
            6 | 8 => {
                let pair = |i: usize| -> Option<u8> {
                    Some(hex_val(bytes[i])? << 4 | hex_val(bytes[i + 1])?)
                };
                let a = if bytes.len() == 8 { pair(6)? } else { 255 };
                Some(Self::rgba(pair(0)?, pair(2)?, pair(4)?, a))
            }
            _ => None,
        }
    }

    /// Lowercase `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl std::str::FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::parse(s)
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
        Color::parse(&s).map_err(serde::de::Error::custom)
    }
}

// ─── Parser ──────────────────────────────────────────────────────────────

fn css_color(input: &mut &str) -> ModalResult<Color> {
    alt((hex_color, functional_color)).parse_next(input)
}

fn hex_color(input: &mut &str) -> ModalResult<Color> {
    let digits: &str =
        preceded('#', take_while(3..=8, |c: char| c.is_ascii_hexdigit())).parse_next(input)?;
    Color::from_hex_digits(digits).ok_or_else(|| ErrMode::Backtrack(ContextError::new()))
}

fn number(input: &mut &str) -> ModalResult<f32> {
    float.parse_next(input)
}

fn functional_color(input: &mut &str) -> ModalResult<Color> {
    let _ = alt(("rgba", "rgb")).parse_next(input)?;
    let args: Vec<f32> = delimited(
        (multispace0, '(', multispace0),
        separated(3..=4, number, (multispace0, ',', multispace0)),
        (multispace0, ')'),
    )
    .parse_next(input)?;

    let channel = |v: f32| v.round().clamp(0.0, 255.0) as u8;
    let alpha = args
        .get(3)
        .map(|a| (a.clamp(0.0, 1.0) * 255.0).round() as u8)
        .unwrap_or(255);
    Ok(Color::rgba(channel(args[0]), channel(args[1]), channel(args[2]), alpha))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_long_hex() {
        assert_eq!(Color::parse("#ff0000").unwrap(), Color::rgb(255, 0, 0));
        assert_eq!(Color::parse("#FF6B6B").unwrap(), Color::rgb(0xff, 0x6b, 0x6b));
    }

    #[test]
    fn parses_short_hex_and_alpha() {
        assert_eq!(Color::parse("#0f0").unwrap(), Color::rgb(0, 255, 0));
        assert_eq!(Color::parse("#0f08").unwrap(), Color::rgba(0, 255, 0, 0x88));
        assert_eq!(
            Color::parse("#11223380").unwrap(),
            Color::rgba(0x11, 0x22, 0x33, 0x80)
        );
    }

    #[test]
    fn parses_functional_notation() {
        assert_eq!(Color::parse("rgb(10, 20, 30)").unwrap(), Color::rgb(10, 20, 30));
        assert_eq!(
            Color::parse(" RGBA(255,0,0,0.5) ").unwrap(),
            Color::rgba(255, 0, 0, 128)
        );
    }

    #[test]
    fn rejects_garbage() {
        assert!(Color::parse("red").is_err());
        assert!(Color::parse("#12345").is_err());
        assert!(Color::parse("#ff0000zz").is_err());
        assert!(Color::parse("rgb(1, 2)").is_err());
    }

    #[test]
    fn hex_roundtrip() {
        assert_eq!(Color::rgb(255, 0, 0).to_hex(), "#ff0000");
        assert_eq!(Color::rgba(0, 0, 0, 0).to_hex(), "#00000000");
    }
}
