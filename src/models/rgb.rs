//! RGB color handling with hex parsing, CSS parsing and HSL conversion.

// Allow small types passed by reference for API consistency
#![allow(clippy::trivially_copy_pass_by_ref)]

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// RGB color value with hex string representation.
///
/// Represents a color using red, green, and blue channels (0-255 each).
/// Supports parsing from hex strings (#RRGGBB, #RGB) and CSS `rgb()`/`rgba()`
/// functions, and construction from HSL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RgbColor {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl RgbColor {
    /// Creates a new `RgbColor` from individual channel values.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses an `RgbColor` from a hex string.
    ///
    /// Supports formats: "#RRGGBB", "RRGGBB", "#RGB", "RGB"
    ///
    /// # Examples
    ///
    /// ```
    /// use yearcal::models::RgbColor;
    ///
    /// let color = RgbColor::from_hex("#FF0000").unwrap();
    /// assert_eq!(color, RgbColor::new(255, 0, 0));
    ///
    /// let color = RgbColor::from_hex("0f0").unwrap();
    /// assert_eq!(color, RgbColor::new(0, 255, 0));
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid hex color format.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let hex = hex.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);

        let expanded: String = match hex.len() {
            3 => hex.chars().flat_map(|c| [c, c]).collect(),
            6 => hex.to_string(),
            _ => anyhow::bail!(
                "Invalid hex color format '{hex}'. Expected 3 or 6 hex digits (RGB or RRGGBB)"
            ),
        };

        let r = u8::from_str_radix(&expanded[0..2], 16)
            .context(format!("Invalid red channel in hex color '{hex}'"))?;
        let g = u8::from_str_radix(&expanded[2..4], 16)
            .context(format!("Invalid green channel in hex color '{hex}'"))?;
        let b = u8::from_str_radix(&expanded[4..6], 16)
            .context(format!("Invalid blue channel in hex color '{hex}'"))?;

        Ok(Self::new(r, g, b))
    }

    /// Parses a CSS `rgb(r, g, b)` or `rgba(r, g, b, a)` function.
    ///
    /// Returns the color together with the alpha channel (1.0 for `rgb()`).
    /// Channel values are clamped to 0-255 and alpha to 0.0-1.0.
    ///
    /// # Examples
    ///
    /// ```
    /// use yearcal::models::RgbColor;
    ///
    /// let (color, alpha) = RgbColor::from_css_rgba("rgba(255, 128, 0, 0.5)").unwrap();
    /// assert_eq!(color, RgbColor::new(255, 128, 0));
    /// assert!((alpha - 0.5).abs() < f64::EPSILON);
    /// ```
    pub fn from_css_rgba(value: &str) -> Result<(Self, f64)> {
        let value = value.trim();
        let lower = value.to_ascii_lowercase();
        let inner = lower
            .strip_prefix("rgba(")
            .or_else(|| lower.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
            .context(format!("Not a CSS rgb()/rgba() color: '{value}'"))?;

        let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
        if parts.len() != 3 && parts.len() != 4 {
            anyhow::bail!("Expected 3 or 4 components in '{value}'");
        }

        let channel = |text: &str| -> Result<u8> {
            let parsed: f64 = text
                .parse()
                .context(format!("Invalid channel '{text}' in '{value}'"))?;
            Ok(parsed.round().clamp(0.0, 255.0) as u8)
        };

        let alpha = match parts.get(3) {
            Some(text) => text
                .parse::<f64>()
                .context(format!("Invalid alpha '{text}' in '{value}'"))?
                .clamp(0.0, 1.0),
            None => 1.0,
        };

        Ok((
            Self::new(channel(parts[0])?, channel(parts[1])?, channel(parts[2])?),
            alpha,
        ))
    }

    /// Converts the color to a hex string in the format "#RRGGBB" (uppercase).
    ///
    /// # Examples
    ///
    /// ```
    /// use yearcal::models::RgbColor;
    ///
    /// let color = RgbColor::new(0, 128, 255);
    /// assert_eq!(color.to_hex(), "#0080FF");
    /// ```
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Converts the color to a CSS `rgb(r,g,b)` function.
    #[must_use]
    pub fn to_css_rgb(&self) -> String {
        format!("rgb({},{},{})", self.r, self.g, self.b)
    }

    /// Creates an `RgbColor` from HSL (Hue, Saturation, Lightness).
    ///
    /// # Arguments
    ///
    /// * `h` - Hue in degrees, taken modulo 360 (360 is the same as 0)
    /// * `s` - Saturation in percent (0-100, will be clamped)
    /// * `l` - Lightness in percent (0-100, will be clamped)
    ///
    /// # Examples
    ///
    /// ```
    /// use yearcal::models::RgbColor;
    ///
    /// assert_eq!(RgbColor::from_hsl(0.0, 100.0, 50.0), RgbColor::new(255, 0, 0));
    /// assert_eq!(RgbColor::from_hsl(120.0, 100.0, 50.0), RgbColor::new(0, 255, 0));
    /// assert_eq!(RgbColor::from_hsl(360.0, 100.0, 50.0), RgbColor::new(255, 0, 0));
    /// ```
    #[must_use]
    pub fn from_hsl(h: f64, s: f64, l: f64) -> Self {
        let h = h.rem_euclid(360.0);
        let s = (s / 100.0).clamp(0.0, 1.0);
        let l = (l / 100.0).clamp(0.0, 1.0);

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let h_prime = h / 60.0;
        let x = c * (1.0 - ((h_prime % 2.0) - 1.0).abs());
        let m = l - c / 2.0;

        let (r, g, b) = if h_prime < 1.0 {
            (c, x, 0.0)
        } else if h_prime < 2.0 {
            (x, c, 0.0)
        } else if h_prime < 3.0 {
            (0.0, c, x)
        } else if h_prime < 4.0 {
            (0.0, x, c)
        } else if h_prime < 5.0 {
            (x, 0.0, c)
        } else {
            (c, 0.0, x)
        };

        Self {
            r: ((r + m) * 255.0).round().clamp(0.0, 255.0) as u8,
            g: ((g + m) * 255.0).round().clamp(0.0, 255.0) as u8,
            b: ((b + m) * 255.0).round().clamp(0.0, 255.0) as u8,
        }
    }
}

/// Converts HSL to a `#RRGGBB` hex string.
///
/// Hue is taken modulo 360; saturation and lightness are percentages.
#[must_use]
pub fn hsl_to_hex(h: f64, s: f64, l: f64) -> String {
    RgbColor::from_hsl(h, s, l).to_hex()
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
