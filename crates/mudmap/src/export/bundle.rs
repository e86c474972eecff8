//! ZIP bundle holding the layer table and the tower diagram.

use std::io::{Seek, Write};

use log::{debug, info};
use zip::{ZipWriter, write::SimpleFileOptions};

use mudmap_core::layer::LayerElement;

use super::{
    Error, Exporter,
    svg::Svg,
    table::{layer_rows, to_json},
};
use crate::tower::Tower;

/// Archive entry holding the layer table as JSON.
pub const LAYERS_ENTRY: &str = "MudMap_Layers.json";

/// Archive entry holding the rendered diagram.
pub const DIAGRAM_ENTRY: &str = "MudMap_Visualization.svg";

/// Writes a tower to a ZIP archive with a layer table and an SVG diagram.
///
/// Call [`BundleExporter::finish`] after exporting to write the archive's
/// central directory.
pub struct BundleExporter<W: Write + Seek> {
    svg: Svg,
    zip: ZipWriter<W>,
}

impl<W: Write + Seek> BundleExporter<W> {
    pub fn new(svg: Svg, writer: W) -> Self {
        Self {
            svg,
            zip: ZipWriter::new(writer),
        }
    }

    /// Finalizes the archive and returns the underlying writer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Archive`] if the central directory cannot be written.
    pub fn finish(self) -> Result<W, Error> {
        let Self { zip, .. } = self;
        let writer = zip.finish()?;
        debug!("Bundle archive finalized");
        Ok(writer)
    }

    fn add_entry(&mut self, name: &str, content: &[u8]) -> Result<(), Error> {
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        self.zip.start_file(name, options)?;
        self.zip.write_all(content)?;

        debug!(name, bytes = content.len(); "Bundle entry written");
        Ok(())
    }
}

impl<W: Write + Seek> Exporter for BundleExporter<W> {
    fn export_tower(&mut self, tower: &Tower, elements: &[LayerElement]) -> Result<(), Error> {
        info!(layers = tower.layers().len(); "Writing bundle");

        let table = to_json(&layer_rows(tower.layers()))?;
        self.add_entry(LAYERS_ENTRY, table.as_bytes())?;

        let diagram = self.svg.render(tower, elements).to_string();
        self.add_entry(DIAGRAM_ENTRY, diagram.as_bytes())?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Read};

    use zip::ZipArchive;

    use mudmap_core::{
        color::Color,
        layer::{Layer, LayerId, LayerType},
    };

    use super::*;
    use crate::{export::svg::SvgBuilder, layout::render_layers};

    fn tower() -> Tower {
        Tower::from_layers(
            "500,000",
            vec![
                Layer::new(LayerId(1), LayerType::QuotaShare, Color::from_hue(10.0))
                    .with_insurer("Acme Re")
                    .with_limit("500000")
                    .with_share("100"),
            ],
        )
    }

    fn bundle(tower: &Tower) -> ZipArchive<Cursor<Vec<u8>>> {
        let elements = render_layers(tower.layers(), tower.total_limit_text());
        let svg = SvgBuilder::new().build().unwrap();

        let mut exporter = BundleExporter::new(svg, Cursor::new(Vec::new()));
        exporter.export_tower(tower, &elements).unwrap();
        let cursor = exporter.finish().unwrap();

        ZipArchive::new(Cursor::new(cursor.into_inner())).unwrap()
    }

    #[test]
    fn test_bundle_entries() {
        let archive = bundle(&tower());

        let mut names: Vec<_> = archive.file_names().collect();
        names.sort_unstable();
        assert_eq!(names, [LAYERS_ENTRY, DIAGRAM_ENTRY]);
    }

    #[test]
    fn test_bundle_layer_table() {
        let mut archive = bundle(&tower());

        let mut json = String::new();
        archive
            .by_name(LAYERS_ENTRY)
            .unwrap()
            .read_to_string(&mut json)
            .unwrap();

        let rows: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(rows.as_array().unwrap().len(), 1);
        assert_eq!(rows[0]["Insurer"], "Acme Re");
        assert_eq!(rows[0]["Share (%)"], 100.0);
    }

    #[test]
    fn test_bundle_diagram() {
        let mut archive = bundle(&tower());

        let mut diagram = String::new();
        archive
            .by_name(DIAGRAM_ENTRY)
            .unwrap()
            .read_to_string(&mut diagram)
            .unwrap();

        assert!(diagram.starts_with("<svg"));
        assert!(diagram.contains("data-key=\"qs-1\""));
    }
}
