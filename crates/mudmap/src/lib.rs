//! MudMap - insurance tower layout and rendering.
//!
//! This crate lays out the layers of an insurance tower as rectangles on a
//! plot where the horizontal axis is participation share and the vertical
//! axis is the limit band a layer covers. Quota-share layers are placed
//! side by side from the left, primary layers follow, and each primary
//! carries at most one excess-of-loss layer attaching exactly at its limit.
//!
//! # Pipeline
//!
//! ```text
//! Tower Document (TOML)
//!     ↓ parse
//! Tower
//!     ↓ layout
//! Placements
//!     ↓ render / export
//! SVG diagram, ZIP bundle
//! ```
//!
//! The layout stage is a pair of pure functions in [`layout`] and never
//! fails: malformed numbers are coerced to zero and layers that cannot be
//! placed are left out.

pub mod config;
pub mod document;
pub mod export;
pub mod layout;
pub mod tower;

mod error;

pub use mudmap_core::{color, format, geometry, layer, number, palette};

pub use error::MudmapError;

use std::io::{Seek, Write};

use log::{debug, info, trace};

use config::AppConfig;
use export::{
    Exporter,
    bundle::BundleExporter,
    svg::{Svg, SvgBuilder, SvgExporter},
};
use layer::LayerElement;
use tower::Tower;

/// Builder for parsing, laying out and rendering towers.
///
/// # Examples
///
/// ```
/// use mudmap::{TowerBuilder, config::AppConfig};
///
/// let source = r#"
///     total_limit = "500,000"
///
///     [[layers]]
///     type = "quotashare"
///     limit = 500000
///     share = 100
/// "#;
///
/// let builder = TowerBuilder::new(AppConfig::default());
/// let tower = builder.parse(source).expect("Failed to parse");
///
/// let elements = builder.layout(&tower);
/// assert_eq!(elements.len(), 1);
///
/// let svg = builder.render_svg(&tower).expect("Failed to render");
/// assert!(svg.starts_with("<svg"));
/// ```
#[derive(Default)]
pub struct TowerBuilder {
    config: AppConfig,
}

impl TowerBuilder {
    /// Create a new tower builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including layout and style settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Parse a tower document.
    ///
    /// Layers without a color are colored by the palette configured in
    /// [`config::StyleConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`MudmapError::Parse`] for malformed documents and
    /// [`MudmapError::Tower`] for duplicate layer ids or invalid colors.
    pub fn parse(&self, source: &str) -> Result<Tower, MudmapError> {
        info!("Parsing tower document");
        let mut policy = self.config.style().color_policy();
        let tower = document::parse_tower(source, policy.as_mut())?;
        debug!(layers = tower.layers().len(); "Tower parsed successfully");
        trace!(tower:?; "Parsed tower");
        Ok(tower)
    }

    /// Lay out the tower's current layers.
    pub fn layout(&self, tower: &Tower) -> Vec<LayerElement> {
        let elements = layout::render_layers(tower.layers(), tower.total_limit_text());
        info!(
            version = tower.version(),
            placements = elements.len();
            "Layout calculated"
        );
        elements
    }

    /// Render the tower to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns [`MudmapError::Export`] if the style configuration holds an
    /// invalid color or the plot size is not positive.
    pub fn render_svg(&self, tower: &Tower) -> Result<String, MudmapError> {
        let elements = self.layout(tower);

        let mut svg_exporter = SvgExporter::new(self.svg()?, Vec::new());
        svg_exporter.export_tower(tower, &elements)?;

        let svg_string = String::from_utf8(svg_exporter.into_inner())
            .map_err(|err| MudmapError::Export(Box::new(err)))?;

        info!("SVG rendered successfully");
        Ok(svg_string)
    }

    /// Write a ZIP bundle with the layer table and the diagram.
    ///
    /// # Errors
    ///
    /// Returns [`MudmapError::Export`] if rendering or writing the archive
    /// fails.
    pub fn export_bundle<W: Write + Seek>(
        &self,
        tower: &Tower,
        writer: W,
    ) -> Result<W, MudmapError> {
        let elements = self.layout(tower);

        let mut bundle_exporter = BundleExporter::new(self.svg()?, writer);
        bundle_exporter.export_tower(tower, &elements)?;
        let writer = bundle_exporter.finish()?;

        info!("Bundle exported successfully");
        Ok(writer)
    }

    fn svg(&self) -> Result<Svg, MudmapError> {
        let svg = SvgBuilder::new()
            .with_style(self.config.style())
            .with_layout(self.config.layout())
            .build()?;
        Ok(svg)
    }
}
