//! Coverage layers and their placements.
//!
//! A [`Layer`] is one band of coverage in an insurance tower as the user
//! entered it. Its numeric fields are kept as raw text; the numeric views
//! ([`Layer::limit`], [`Layer::share`], ...) coerce leniently through
//! [`crate::number`] and never fail.
//!
//! A [`LayerElement`] is the placement the layout engine derives from a
//! layer: percent geometry plus the label data a renderer needs.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    color::Color,
    geometry::PercentRect,
    number::{parse_amount, parse_number},
};

/// Stacking order given to excess-of-loss placements.
pub const EXCESS_Z_INDEX: u32 = 2;

/// Stable identifier of a layer within a tower.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerId(pub u64);

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The kind of coverage a layer provides, which decides its placement rule.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerType {
    /// Proportional cover from the ground up, placed side by side first.
    QuotaShare,
    /// Ground-up cover placed after the quota shares.
    #[default]
    Primary,
    /// Excess-of-loss cover sitting on top of a primary layer.
    Xol,
}

impl LayerType {
    /// Returns the identifier used in documents and exports.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::QuotaShare => "quotashare",
            Self::Primary => "primary",
            Self::Xol => "xol",
        }
    }

    /// Returns the prefix of placement keys for this layer type.
    pub fn key_prefix(self) -> &'static str {
        match self {
            Self::QuotaShare => "qs",
            Self::Primary => "p",
            Self::Xol => "x",
        }
    }

    /// Returns `true` for layer types that sit on the floor of the tower.
    pub fn is_ground_up(self) -> bool {
        matches!(self, Self::QuotaShare | Self::Primary)
    }
}

impl fmt::Display for LayerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a layer type name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown layer type `{0}`, expected one of: quotashare, primary, xol")]
pub struct ParseLayerTypeError(String);

impl FromStr for LayerType {
    type Err = ParseLayerTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "quotashare" => Ok(Self::QuotaShare),
            "primary" => Ok(Self::Primary),
            "xol" => Ok(Self::Xol),
            other => Err(ParseLayerTypeError(other.to_string())),
        }
    }
}

/// The editable text fields of a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerField {
    Insurer,
    Limit,
    Attachment,
    Premium,
    Share,
}

impl LayerField {
    /// Returns `true` for fields holding currency amounts, which are
    /// stored without thousands separators.
    pub fn is_currency(self) -> bool {
        matches!(self, Self::Limit | Self::Attachment | Self::Premium)
    }
}

/// One band of coverage in an insurance tower.
///
/// The color is fixed at construction; every other field can be edited.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    id: LayerId,
    layer_type: LayerType,
    insurer: String,
    limit: String,
    attachment: String,
    premium: String,
    share: String,
    color: Color,
}

impl Layer {
    /// Creates an empty layer with the given identity, type and color.
    pub fn new(id: LayerId, layer_type: LayerType, color: Color) -> Self {
        Self {
            id,
            layer_type,
            insurer: String::new(),
            limit: String::new(),
            attachment: String::new(),
            premium: String::new(),
            share: String::new(),
            color,
        }
    }

    pub fn with_insurer(mut self, insurer: impl Into<String>) -> Self {
        self.insurer = insurer.into();
        self
    }

    pub fn with_limit(mut self, limit: impl Into<String>) -> Self {
        self.limit = limit.into();
        self
    }

    pub fn with_attachment(mut self, attachment: impl Into<String>) -> Self {
        self.attachment = attachment.into();
        self
    }

    pub fn with_premium(mut self, premium: impl Into<String>) -> Self {
        self.premium = premium.into();
        self
    }

    pub fn with_share(mut self, share: impl Into<String>) -> Self {
        self.share = share.into();
        self
    }

    pub fn id(&self) -> LayerId {
        self.id
    }

    pub fn layer_type(&self) -> LayerType {
        self.layer_type
    }

    pub fn insurer(&self) -> &str {
        &self.insurer
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns the raw text of a field.
    pub fn field(&self, field: LayerField) -> &str {
        match field {
            LayerField::Insurer => &self.insurer,
            LayerField::Limit => &self.limit,
            LayerField::Attachment => &self.attachment,
            LayerField::Premium => &self.premium,
            LayerField::Share => &self.share,
        }
    }

    /// Replaces the raw text of a field.
    pub fn set_field(&mut self, field: LayerField, value: impl Into<String>) {
        let value = value.into();
        match field {
            LayerField::Insurer => self.insurer = value,
            LayerField::Limit => self.limit = value,
            LayerField::Attachment => self.attachment = value,
            LayerField::Premium => self.premium = value,
            LayerField::Share => self.share = value,
        }
    }

    pub fn set_layer_type(&mut self, layer_type: LayerType) {
        self.layer_type = layer_type;
    }

    /// Coerced limit; `0.0` when the text is not a number.
    pub fn limit(&self) -> f64 {
        parse_amount(&self.limit)
    }

    /// Coerced attachment point; `0.0` when the text is not a number.
    pub fn attachment(&self) -> f64 {
        parse_amount(&self.attachment)
    }

    /// Coerced premium; `0.0` when the text is not a number.
    pub fn premium(&self) -> f64 {
        parse_amount(&self.premium)
    }

    /// Coerced share percentage; `0.0` when the text is not a number.
    pub fn share(&self) -> f64 {
        parse_number(&self.share)
    }

    /// Returns the key under which this layer's placement is emitted.
    pub fn placement_key(&self) -> String {
        format!("{}-{}", self.layer_type.key_prefix(), self.id)
    }
}

/// A placed rectangle ready for rendering.
///
/// Produced fresh by every layout pass and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerElement {
    key: String,
    layer_type: LayerType,
    rect: PercentRect,
    color: Color,
    border_color: Color,
    z_index: Option<u32>,
    insurer: String,
    premium: f64,
    share: f64,
    label_amount: f64,
}

impl LayerElement {
    /// Creates the placement of `layer` at `rect`.
    ///
    /// Quota-share placements are labeled with their premium, primary and
    /// excess placements with their limit.
    pub fn new(layer: &Layer, rect: PercentRect) -> Self {
        let label_amount = match layer.layer_type() {
            LayerType::QuotaShare => layer.premium(),
            LayerType::Primary | LayerType::Xol => layer.limit(),
        };

        Self {
            key: layer.placement_key(),
            layer_type: layer.layer_type(),
            rect,
            color: layer.color().to_fill(),
            border_color: layer.color(),
            z_index: None,
            insurer: layer.insurer().to_string(),
            premium: layer.premium(),
            share: layer.share(),
            label_amount,
        }
    }

    /// Sets the stacking order of this placement.
    pub fn with_z_index(mut self, z_index: u32) -> Self {
        self.z_index = Some(z_index);
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn layer_type(&self) -> LayerType {
        self.layer_type
    }

    /// Geometry in percent of the plot area.
    pub fn rect(&self) -> PercentRect {
        self.rect
    }

    /// Fill color, the layer color at reduced opacity.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Border color, the layer color unchanged.
    pub fn border_color(&self) -> Color {
        self.border_color
    }

    pub fn z_index(&self) -> Option<u32> {
        self.z_index
    }

    pub fn insurer(&self) -> &str {
        &self.insurer
    }

    pub fn premium(&self) -> f64 {
        self.premium
    }

    pub fn share(&self) -> f64 {
        self.share
    }

    /// The amount shown on the placement's label.
    pub fn label_amount(&self) -> f64 {
        self.label_amount
    }
}
