//! Colors as written in configuration (`#rrggbbaa`) and their terminal form.

use std::fmt;
use std::str::FromStr;

use palette::{LinSrgb, Mix, Srgb};

use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A color with straight (non-premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgb(self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }

    /// Composite this color over an opaque base, blending in linear light.
    pub fn over(self, base: Rgb) -> Rgb {
        match self.a {
            255 => return self.rgb(),
            0 => return base,
            _ => {}
        }

        let bottom: LinSrgb<f32> = Srgb::new(base.r, base.g, base.b).into_linear();
        let top: LinSrgb<f32> = Srgb::new(self.r, self.g, self.b).into_linear();
        let mixed = bottom.mix(top, f32::from(self.a) / 255.0);
        let (r, g, b) = Srgb::<u8>::from_linear(mixed).into_components();

        Rgb::new(r, g, b)
    }
}

impl FromStr for Rgba {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidColor(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let nibble = |i: usize| u8::from_str_radix(&hex[i..=i], 16).map(|v| v * 17);
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);

        let parsed = match hex.len() {
            3 => (nibble(0), nibble(1), nibble(2), Ok(255)),
            4 => (nibble(0), nibble(1), nibble(2), nibble(3)),
            6 => (byte(0), byte(2), byte(4), Ok(255)),
            8 => (byte(0), byte(2), byte(4), byte(6)),
            _ => return Err(invalid()),
        };

        match parsed {
            (Ok(r), Ok(g), Ok(b), Ok(a)) => Ok(Self::new(r, g, b, a)),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_short_forms() {
        assert_eq!("#333".parse::<Rgba>(), Ok(Rgba::opaque(0x33, 0x33, 0x33)));
        assert_eq!("#fff".parse::<Rgba>(), Ok(Rgba::opaque(255, 255, 255)));
        assert_eq!("#f008".parse::<Rgba>(), Ok(Rgba::new(255, 0, 0, 0x88)));
    }

    #[test]
    fn test_parse_long_forms() {
        assert_eq!("#ff935e".parse::<Rgba>(), Ok(Rgba::opaque(0xff, 0x93, 0x5e)));
        assert_eq!(
            "#ffff0035".parse::<Rgba>(),
            Ok(Rgba::new(0xff, 0xff, 0x00, 0x35))
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", "ffffff", "#ff", "#fffff", "#ggg", "red", "#+12"] {
            assert!(bad.parse::<Rgba>().is_err(), "{bad} should not parse");
        }
    }

    #[test]
    fn test_display_round_trips_alpha() {
        assert_eq!(Rgba::new(0xff, 0, 0, 0x45).to_string(), "#ff000045");
        assert_eq!(Rgba::opaque(0x33, 0x33, 0x33).to_string(), "#333333");
    }

    #[test]
    fn test_over_extremes() {
        let base = Rgb::new(10, 20, 30);
        assert_eq!(Rgba::new(200, 100, 0, 0).over(base), base);
        assert_eq!(Rgba::opaque(200, 100, 0).over(base), Rgb::new(200, 100, 0));
    }

    #[test]
    fn test_over_translucent_lands_between() {
        let base = Rgb::new(0, 0, 0);
        let out = Rgba::new(255, 255, 0, 0x80).over(base);
        assert!(out.r > 0 && out.r < 255);
        assert_eq!(out.r, out.g);
        assert_eq!(out.b, 0);
    }
}
