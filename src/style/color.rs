//! RGBA colours with CSS-style string forms.
//!
//! Colours serialize as strings: `#rrggbb` when opaque, otherwise
//! `rgba(r, g, b, a)`. Both forms (and short `#rgb`) are accepted on input.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::Error;
use crate::style::lerp::lerp_channel;

/// 8-bit RGB colour with a floating-point alpha in `[0, 1]`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0.0);

    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque colour
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Same RGB channels with a different alpha
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a: a.clamp(0.0, 1.0), ..self }
    }

    /// Channel-wise RGB interpolation with rounding; alpha is set to `alpha`.
    pub fn mix(&self, other: &Rgba, t: f32, alpha: f32) -> Rgba {
        Rgba {
            r: lerp_channel(self.r, other.r, t),
            g: lerp_channel(self.g, other.g, t),
            b: lerp_channel(self.b, other.b, t),
            a: alpha.clamp(0.0, 1.0),
        }
    }

    /// Parse `#rgb` or `#rrggbb`
    pub fn from_hex(s: &str) -> Result<Self, Error> {
        let hex = s.trim().trim_start_matches('#');
        let expanded: String = match hex.len() {
            3 => hex.chars().flat_map(|c| [c, c]).collect(),
            6 => hex.to_string(),
            _ => return Err(Error::invalid_input(format!("bad hex colour '{}'", s))),
        };
        let v = u32::from_str_radix(&expanded, 16)
            .map_err(|_| Error::invalid_input(format!("bad hex colour '{}'", s)))?;
        Ok(Rgba::rgb((v >> 16) as u8, (v >> 8 & 0xff) as u8, (v & 0xff) as u8))
    }

    fn from_rgba_fn(s: &str) -> Result<Self, Error> {
        let bad = || Error::invalid_input(format!("bad rgba colour '{}'", s));
        let inner = s
            .trim()
            .strip_prefix("rgba(")
            .or_else(|| s.trim().strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(bad)?;
        let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
        if parts.len() != 3 && parts.len() != 4 {
            return Err(bad());
        }
        let channel = |p: &str| p.parse::<u8>().map_err(|_| bad());
        let a = match parts.get(3) {
            Some(p) => p.parse::<f32>().map_err(|_| bad())?,
            None => 1.0,
        };
        if !a.is_finite() {
            return Err(bad());
        }
        Ok(Rgba::new(channel(parts[0])?, channel(parts[1])?, channel(parts[2])?, a.clamp(0.0, 1.0)))
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Rgba::TRANSPARENT
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a >= 1.0 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            // Trim float noise: 0.1 + 0.2 prints as 0.3
            let a = (self.a * 1000.0).round() / 1000.0;
            write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, a)
        }
    }
}

impl FromStr for Rgba {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim_start().starts_with('#') {
            Rgba::from_hex(s)
        } else {
            Rgba::from_rgba_fn(s)
        }
    }
}

// ---------------------------------------------------------------------------
// Serde support
// ---------------------------------------------------------------------------

impl Serialize for Rgba {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(Rgba::from_hex("#90EE90").unwrap(), Rgba::rgb(0x90, 0xee, 0x90));
        assert_eq!(Rgba::from_hex("#000").unwrap(), Rgba::BLACK);
        assert!(Rgba::from_hex("#12345").is_err());
        assert!(Rgba::from_hex("#zzzzzz").is_err());
    }

    #[test]
    fn test_parse_rgba() {
        let c: Rgba = "rgba(148, 0, 211, 0.7)".parse().unwrap();
        assert_eq!(c, Rgba::new(148, 0, 211, 0.7));
        assert!("rgba(300, 0, 0, 1)".parse::<Rgba>().is_err());
        assert!("hsl(1, 2, 3)".parse::<Rgba>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Rgba::rgb(255, 16, 0).to_string(), "#ff1000");
        assert_eq!(Rgba::new(148, 0, 211, 0.5).to_string(), "rgba(148, 0, 211, 0.5)");
        assert_eq!(Rgba::new(1, 2, 3, 0.1 + 0.2).to_string(), "rgba(1, 2, 3, 0.3)");
    }

    #[test]
    fn test_mix_is_symmetric_at_half() {
        let a = Rgba::from_hex("#90EE90").unwrap();
        let b = Rgba::from_hex("#228B22").unwrap();
        let ab = a.mix(&b, 0.5, 0.5);
        let ba = b.mix(&a, 0.5, 0.5);
        assert_eq!((ab.r, ab.g, ab.b), (ba.r, ba.g, ba.b));
        assert_eq!(ab.a, 0.5);
    }

    #[test]
    fn test_serde_string_form() {
        let json = serde_json::to_string(&Rgba::rgb(0x22, 0x8b, 0x22)).unwrap();
        assert_eq!(json, "\"#228b22\"");
        let back: Rgba = serde_json::from_str("\"#228B22\"").unwrap();
        assert_eq!(back, Rgba::rgb(0x22, 0x8b, 0x22));
    }
}
