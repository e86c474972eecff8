//! Tower documents.
//!
//! A tower document is a TOML file describing the total policy limit and the
//! layers of a tower:
//!
//! ```toml
//! total_limit = "3,000,000"
//!
//! [[layers]]
//! type = "primary"
//! insurer = "Acme Re"
//! limit = 1000000
//! premium = 100
//! share = 50
//! color = "#1f77b4"
//! ```
//!
//! Numeric fields accept integers, floats or strings and are kept as text,
//! so a document can describe a half-filled tower just like the live
//! editor. Missing ids and colors are assigned on load.

use std::{collections::HashSet, ops::Range};

use log::{debug, trace};
use serde::Deserialize;

use mudmap_core::{
    color::Color,
    format::parse_number_with_commas,
    layer::{Layer, LayerId, LayerType},
    palette::ColorPolicy,
};

use crate::{MudmapError, tower::Tower};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TowerDocument {
    #[serde(default)]
    total_limit: Option<NumericText>,
    #[serde(default)]
    layers: Vec<LayerEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LayerEntry {
    id: Option<u64>,
    #[serde(rename = "type", default)]
    layer_type: LayerType,
    #[serde(default)]
    insurer: String,
    limit: Option<NumericText>,
    attachment: Option<NumericText>,
    premium: Option<NumericText>,
    share: Option<NumericText>,
    color: Option<String>,
}

/// A numeric field as written in the document.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NumericText {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl NumericText {
    fn into_text(self) -> String {
        match self {
            Self::Integer(value) => value.to_string(),
            Self::Float(value) => value.to_string(),
            Self::Text(text) => text,
        }
    }
}

fn currency_text(value: Option<NumericText>) -> String {
    value
        .map(|value| parse_number_with_commas(&value.into_text()))
        .unwrap_or_default()
}

/// Parses a tower document.
///
/// Layers without an explicit id are numbered after the largest explicit
/// id, in document order. Layers without a color take the next color from
/// `policy`. A document without layers yields a tower holding one empty
/// primary layer.
///
/// # Errors
///
/// Returns [`MudmapError::Parse`] for TOML syntax or schema errors, and
/// [`MudmapError::Tower`] for duplicate ids or invalid colors.
pub fn parse_tower(source: &str, policy: &mut dyn ColorPolicy) -> Result<Tower, MudmapError> {
    let document: TowerDocument = toml::from_str(source).map_err(|err| {
        MudmapError::new_parse_error(err.message(), err.span().map(clamp_span(source)), source)
    })?;

    trace!(document:?; "Tower document deserialized");

    let mut seen = HashSet::new();
    for id in document.layers.iter().filter_map(|entry| entry.id) {
        if !seen.insert(id) {
            return Err(MudmapError::Tower(format!("duplicate layer id {id}")));
        }
    }

    let mut next_id = seen.iter().copied().max().unwrap_or(0) + 1;
    let mut layers = Vec::with_capacity(document.layers.len().max(1));

    for entry in document.layers {
        let id = match entry.id {
            Some(id) => id,
            None => {
                let id = next_id;
                next_id += 1;
                id
            }
        };

        let color = match entry.color {
            Some(color) => Color::new(&color)
                .map_err(|err| MudmapError::Tower(format!("layer {id}: {err}")))?,
            None => policy.next_color(),
        };

        let layer = Layer::new(LayerId(id), entry.layer_type, color)
            .with_insurer(entry.insurer)
            .with_limit(currency_text(entry.limit))
            .with_attachment(currency_text(entry.attachment))
            .with_premium(currency_text(entry.premium))
            .with_share(entry.share.map(NumericText::into_text).unwrap_or_default());
        layers.push(layer);
    }

    if layers.is_empty() {
        debug!("Document has no layers, starting with an empty primary layer");
        layers.push(Layer::new(LayerId(1), LayerType::Primary, policy.next_color()));
    }

    let total_limit = document
        .total_limit
        .map(NumericText::into_text)
        .unwrap_or_default();

    debug!(layers = layers.len(), total_limit; "Tower document loaded");

    Ok(Tower::from_layers(total_limit, layers))
}

/// Keeps a span inside the source so diagnostics can always be rendered.
fn clamp_span(source: &str) -> impl Fn(Range<usize>) -> Range<usize> + '_ {
    move |span| {
        let start = span.start.min(source.len());
        let end = span.end.clamp(start, source.len());
        start..end
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use mudmap_core::{layer::LayerField, palette::GoldenAngleHue};

    use super::*;

    fn parse(source: &str) -> Result<Tower, MudmapError> {
        parse_tower(source, &mut GoldenAngleHue::default())
    }

    #[test]
    fn test_parse_full_document() {
        let tower = parse(
            r##"
            total_limit = "3,000,000"

            [[layers]]
            id = 1
            type = "primary"
            insurer = "Acme Re"
            limit = 1000000
            attachment = 0
            premium = "100"
            share = 50
            color = "#1f77b4"

            [[layers]]
            id = 2
            type = "xol"
            limit = 2000000.0
            attachment = "1,000,000"
            premium = 50
            share = "50"
            "##,
        )
        .unwrap();

        assert_approx_eq!(f64, tower.total_limit(), 3_000_000.0);
        assert_eq!(tower.layers().len(), 2);

        let primary = tower.layer(LayerId(1)).unwrap();
        assert_eq!(primary.insurer(), "Acme Re");
        assert_eq!(primary.field(LayerField::Limit), "1000000");
        assert_eq!(primary.color(), Color::new("#1f77b4").unwrap());

        let xol = tower.layer(LayerId(2)).unwrap();
        assert_eq!(xol.layer_type(), LayerType::Xol);
        assert_eq!(xol.field(LayerField::Attachment), "1000000");
        assert_approx_eq!(f64, xol.limit(), 2_000_000.0);
        assert_approx_eq!(f64, xol.share(), 50.0);
    }

    #[test]
    fn test_parse_assigns_missing_ids_after_explicit_ones() {
        let tower = parse(
            r#"
            [[layers]]
            [[layers]]
            id = 7
            [[layers]]
            "#,
        )
        .unwrap();

        let ids: Vec<_> = tower.layers().iter().map(|l| l.id().0).collect();
        assert_eq!(ids, [8, 7, 9]);
    }

    #[test]
    fn test_parse_defaults() {
        let tower = parse("[[layers]]\n").unwrap();

        let layer = &tower.layers()[0];
        assert_eq!(layer.layer_type(), LayerType::Primary);
        assert_eq!(layer.field(LayerField::Limit), "");
        assert_eq!(layer.field(LayerField::Share), "");
        assert_eq!(tower.total_limit_text(), "");
    }

    #[test]
    fn test_parse_empty_document_has_one_layer() {
        let tower = parse("").unwrap();
        assert_eq!(tower.layers().len(), 1);
        assert_eq!(tower.layers()[0].id(), LayerId(1));
    }

    #[test]
    fn test_parse_keeps_malformed_numbers_as_text() {
        let tower = parse("[[layers]]\nshare = \"abc\"\nlimit = \"12abc\"\n").unwrap();

        let layer = &tower.layers()[0];
        assert_eq!(layer.field(LayerField::Share), "abc");
        assert_approx_eq!(f64, layer.share(), 0.0);
        assert_approx_eq!(f64, layer.limit(), 12.0);
    }

    #[test]
    fn test_parse_duplicate_ids() {
        let err = parse("[[layers]]\nid = 1\n[[layers]]\nid = 1\n").unwrap_err();
        assert!(matches!(err, MudmapError::Tower(_)));
    }

    #[test]
    fn test_parse_invalid_color() {
        let err = parse("[[layers]]\ncolor = \"definitely-not-a-color\"\n").unwrap_err();
        assert!(matches!(err, MudmapError::Tower(ref msg) if msg.starts_with("layer 1")));
    }

    #[test]
    fn test_parse_unknown_layer_type() {
        let err = parse("[[layers]]\ntype = \"surplus\"\n").unwrap_err();
        assert!(matches!(err, MudmapError::Parse { .. }));
    }

    #[test]
    fn test_parse_syntax_error_has_span() {
        let source = "total_limit = \n";
        let err = parse(source).unwrap_err();

        match err {
            MudmapError::Parse { span, src, .. } => {
                let span = span.expect("syntax errors carry a span");
                assert!(span.end <= src.len());
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_unknown_field() {
        let err = parse("[[layers]]\nlimt = 5\n").unwrap_err();
        assert!(matches!(err, MudmapError::Parse { .. }));
    }
}
