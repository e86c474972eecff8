//! Tabular view of a tower's layers.
//!
//! Every layer becomes one [`LayerRow`], whatever its type and whether or
//! not the layout places it. Numeric columns hold the parsed amounts and
//! are `null` when the entered text is not a number.

use serde::Serialize;

use mudmap_core::{
    layer::{Layer, LayerField},
    number::try_parse_number,
};

use crate::export;

/// One layer flattened for the layer table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerRow {
    #[serde(rename = "Layer Type")]
    pub layer_type: String,
    #[serde(rename = "Insurer")]
    pub insurer: String,
    #[serde(rename = "Limit (USD)")]
    pub limit: Option<f64>,
    #[serde(rename = "Attachment (USD)")]
    pub attachment: Option<f64>,
    #[serde(rename = "Premium (USD)")]
    pub premium: Option<f64>,
    #[serde(rename = "Share (%)")]
    pub share: Option<f64>,
    #[serde(rename = "Color")]
    pub color: String,
}

impl From<&Layer> for LayerRow {
    fn from(layer: &Layer) -> Self {
        let amount = |text: &str| try_parse_number(&text.replace(',', ""));

        Self {
            layer_type: layer.layer_type().as_str().to_string(),
            insurer: layer.insurer().to_string(),
            limit: amount(layer.field(LayerField::Limit)),
            attachment: amount(layer.field(LayerField::Attachment)),
            premium: amount(layer.field(LayerField::Premium)),
            share: try_parse_number(layer.field(LayerField::Share)),
            color: layer.color().to_string(),
        }
    }
}

/// Flattens layers into table rows, keeping their order.
pub fn layer_rows(layers: &[Layer]) -> Vec<LayerRow> {
    layers.iter().map(LayerRow::from).collect()
}

/// Serializes rows as a pretty-printed JSON array.
///
/// # Errors
///
/// Returns [`export::Error::Render`] if serialization fails.
pub fn to_json(rows: &[LayerRow]) -> Result<String, export::Error> {
    serde_json::to_string_pretty(rows).map_err(|err| export::Error::Render(err.to_string()))
}

#[cfg(test)]
mod tests {
    use mudmap_core::{
        color::Color,
        layer::{LayerId, LayerType},
    };

    use super::*;

    fn layer() -> Layer {
        Layer::new(LayerId(3), LayerType::Xol, Color::new("#1f77b4").unwrap())
            .with_insurer("Acme Re")
            .with_limit("2,000,000")
            .with_attachment("1000000")
            .with_premium("50.5")
            .with_share("abc")
    }

    #[test]
    fn test_row_columns() {
        let row = LayerRow::from(&layer());

        assert_eq!(row.layer_type, "xol");
        assert_eq!(row.insurer, "Acme Re");
        assert_eq!(row.limit, Some(2_000_000.0));
        assert_eq!(row.attachment, Some(1_000_000.0));
        assert_eq!(row.premium, Some(50.5));
        assert_eq!(row.share, None);
        assert_eq!(row.color, Color::new("#1f77b4").unwrap().to_string());
    }

    #[test]
    fn test_empty_fields_are_null() {
        let layer = Layer::new(LayerId(1), LayerType::Primary, Color::default());
        let row = LayerRow::from(&layer);

        assert_eq!(row.limit, None);
        assert_eq!(row.share, None);
    }

    #[test]
    fn test_json_uses_column_names() {
        let json = to_json(&layer_rows(&[layer()])).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let row = &value[0];
        assert_eq!(row["Layer Type"], "xol");
        assert_eq!(row["Limit (USD)"], 2_000_000.0);
        assert_eq!(row["Premium (USD)"], 50.5);
        assert!(row["Share (%)"].is_null());
    }

    #[test]
    fn test_rows_keep_layer_order() {
        let layers = [
            Layer::new(LayerId(2), LayerType::QuotaShare, Color::default()),
            Layer::new(LayerId(1), LayerType::Primary, Color::default()),
        ];

        let types: Vec<_> = layer_rows(&layers)
            .into_iter()
            .map(|row| row.layer_type)
            .collect();
        assert_eq!(types, ["quotashare", "primary"]);
    }
}
