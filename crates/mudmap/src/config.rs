//! Configuration types for MudMap rendering.
//!
//! This module provides configuration structures that control how towers
//! are drawn and how new layers are colored. All types implement
//! [`serde::Deserialize`] for loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration combining layout and style settings.
//! - [`LayoutConfig`] - Controls the size of the plot area and its grid.
//! - [`StyleConfig`] - Controls colors, fonts and the color policy for new layers.
//!
//! # Example
//!
//! ```
//! # use mudmap::config::AppConfig;
//! let config: AppConfig = toml::from_str(r#"
//!     [layout]
//!     width = 1000
//!
//!     [style]
//!     background_color = "ivory"
//!     palette = "random"
//! "#).unwrap();
//!
//! assert_eq!(config.layout().width(), 1000.0);
//! assert!(config.style().background_color().is_ok());
//! ```

use rand::{SeedableRng, rngs::StdRng};
use serde::Deserialize;

use mudmap_core::{
    color::Color,
    palette::{ColorPolicy, GoldenAngleHue, RandomHue},
};

/// Top-level application configuration combining layout and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout and style configurations.
    pub fn new(layout: LayoutConfig, style: StyleConfig) -> Self {
        Self { layout, style }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Plot area dimensions, in pixels.
///
/// The plot area is the 0–100% square the layout engine fills; axis
/// labels and the summary are drawn in the margins around it.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayoutConfig {
    #[serde(default = "LayoutConfig::default_width")]
    width: f32,

    #[serde(default = "LayoutConfig::default_height")]
    height: f32,

    /// Number of grid intervals on each axis.
    #[serde(default = "LayoutConfig::default_grid_divisions")]
    grid_divisions: u32,
}

impl LayoutConfig {
    /// Creates a new [`LayoutConfig`].
    pub fn new(width: f32, height: f32, grid_divisions: u32) -> Self {
        Self {
            width,
            height,
            grid_divisions,
        }
    }

    fn default_width() -> f32 {
        800.0
    }

    fn default_height() -> f32 {
        384.0
    }

    fn default_grid_divisions() -> u32 {
        4
    }

    /// Returns the plot width in pixels.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Returns the plot height in pixels.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Returns the number of grid intervals per axis.
    ///
    /// A stored value of zero is clamped to one interval.
    pub fn grid_divisions(&self) -> u32 {
        self.grid_divisions.max(1)
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::new(
            Self::default_width(),
            Self::default_height(),
            Self::default_grid_divisions(),
        )
    }
}

/// How colors are chosen for layers that do not specify one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Palette {
    /// Hues stepped by the golden angle; reproducible.
    #[default]
    Golden,
    /// Uniformly random hues.
    Random,
}

/// Visual styling configuration for rendered towers.
///
/// Color fields are CSS color strings. Fields that are not set fall back
/// to renderer defaults.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StyleConfig {
    #[serde(default)]
    background_color: Option<String>,

    #[serde(default)]
    grid_color: Option<String>,

    #[serde(default)]
    text_color: Option<String>,

    #[serde(default)]
    font_size: Option<f32>,

    #[serde(default)]
    palette: Palette,

    /// Seed for [`Palette::Random`]; unseeded when absent.
    #[serde(default)]
    palette_seed: Option<u64>,
}

impl StyleConfig {
    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        parse_optional_color(self.background_color.as_deref(), "background")
    }

    /// Returns the parsed grid line [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn grid_color(&self) -> Result<Option<Color>, String> {
        parse_optional_color(self.grid_color.as_deref(), "grid")
    }

    /// Returns the parsed text [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn text_color(&self) -> Result<Option<Color>, String> {
        parse_optional_color(self.text_color.as_deref(), "text")
    }

    /// Returns the configured label font size in pixels, if any.
    pub fn font_size(&self) -> Option<f32> {
        self.font_size
    }

    /// Returns the configured palette.
    pub fn palette(&self) -> Palette {
        self.palette
    }

    /// Builds the color policy for layers created without a color.
    pub fn color_policy(&self) -> Box<dyn ColorPolicy> {
        match (self.palette, self.palette_seed) {
            (Palette::Golden, _) => Box::new(GoldenAngleHue::default()),
            (Palette::Random, Some(seed)) => Box::new(RandomHue::new(StdRng::seed_from_u64(seed))),
            (Palette::Random, None) => Box::new(RandomHue::from_thread_rng()),
        }
    }
}

fn parse_optional_color(color: Option<&str>, what: &str) -> Result<Option<Color>, String> {
    color
        .map(Color::new)
        .transpose()
        .map_err(|err| format!("Invalid {what} color in config: {err}"))
}
