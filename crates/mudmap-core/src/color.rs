//! Color handling for MudMap diagrams
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate. Layer colors are parsed from CSS color strings, so
//! the `hsl(...)` strings produced by the palettes and any color a user
//! writes into a tower document go through the same path.

use std::str::FromStr;

use color::DynamicColor;

/// Opacity applied to a layer's base color for its fill.
///
/// Border strokes use the base color unchanged.
pub const FILL_ALPHA: f32 = 0.7;

/// Wrapper around the `DynamicColor` type from the color crate
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Color {
    /// Create a new `Color` from a string
    /// This will parse CSS color strings such as "#ff0000", "hsl(120, 70%, 50%)", "red", etc.
    ///
    /// # Examples
    ///
    /// ```
    /// use mudmap_core::color::Color;
    ///
    /// let red = Color::new("#ff0000").unwrap();
    /// let teal = Color::new("hsl(180, 70%, 50%)").unwrap();
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// Creates a color from a hue in degrees with the saturation and
    /// lightness used for layer colors (70%, 50%).
    ///
    /// Hues outside `0..360` wrap around.
    ///
    /// # Examples
    ///
    /// ```
    /// use mudmap_core::color::Color;
    ///
    /// let a = Color::from_hue(30.0);
    /// let b = Color::from_hue(390.0);
    /// assert_eq!(a, b);
    /// ```
    pub fn from_hue(hue: f32) -> Self {
        let hue = if hue.is_finite() {
            hue.rem_euclid(360.0)
        } else {
            0.0
        };
        // Rounded to keep wrapped hues identical after the modulo.
        let hue = (hue * 1000.0).round() / 1000.0;
        Self::new(&format!("hsl({hue}, 70%, 50%)")).unwrap_or_default()
    }

    /// Creates a new color with the specified alpha (transparency) value.
    ///
    /// # Examples
    ///
    /// ```
    /// use mudmap_core::color::Color;
    ///
    /// let red = Color::new("red").unwrap();
    /// let semi_transparent_red = red.with_alpha(0.5);
    /// assert_eq!(semi_transparent_red.alpha(), 0.5);
    /// ```
    pub fn with_alpha(self, alpha: f32) -> Self {
        Color {
            color: self.color.with_alpha(alpha),
        }
    }

    /// Returns the fill variant of this color, at [`FILL_ALPHA`] opacity.
    pub fn to_fill(self) -> Self {
        self.with_alpha(FILL_ALPHA)
    }

    /// Returns the alpha (transparency) component of this color, between
    /// 0.0 (fully transparent) and 1.0 (fully opaque).
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        Self::from(color.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_new() {
        let red = Color::new("#ff0000");
        assert!(red.is_ok());

        let hsl = Color::new("hsl(210, 70%, 50%)");
        assert!(hsl.is_ok());

        let invalid = Color::new("not-a-color");
        assert!(invalid.is_err());
    }

    #[test]
    fn test_color_default() {
        let color = Color::default();
        assert_eq!(color.to_string(), "black");
    }

    #[test]
    fn test_color_from_hue_wraps() {
        assert_eq!(Color::from_hue(10.0), Color::from_hue(370.0));
        assert_eq!(Color::from_hue(-90.0), Color::from_hue(270.0));
        assert_ne!(Color::from_hue(10.0), Color::from_hue(200.0));
    }

    #[test]
    fn test_color_from_hue_non_finite() {
        assert_eq!(Color::from_hue(f32::NAN), Color::from_hue(0.0));
    }

    #[test]
    fn test_color_to_fill() {
        let color = Color::new("blue").unwrap();
        assert!((color.alpha() - 1.0).abs() < 0.001);

        let fill = color.to_fill();
        assert!((fill.alpha() - FILL_ALPHA).abs() < 0.001);
    }

    #[test]
    fn test_color_display() {
        let color = Color::new("blue").unwrap();
        let display = format!("{}", color);
        assert!(!display.is_empty());
    }
}
