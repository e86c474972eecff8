//! The editable layer collection.
//!
//! A [`Tower`] owns the layers and the total policy limit. Every edit bumps
//! its version, so callers can tell whether a layout computed earlier still
//! matches. Layout itself never touches the tower: it borrows
//! [`Tower::layers`] as an immutable snapshot.

use log::debug;

use mudmap_core::{
    format::parse_number_with_commas,
    layer::{Layer, LayerField, LayerId, LayerType},
    number::{parse_amount, parse_number},
    palette::ColorPolicy,
};

/// An insurance tower: layers plus the total policy limit they stack against.
#[derive(Debug, Clone, PartialEq)]
pub struct Tower {
    version: u64,
    total_limit: String,
    layers: Vec<Layer>,
}

impl Tower {
    /// Creates a tower holding a single empty primary layer.
    pub fn new(policy: &mut dyn ColorPolicy) -> Self {
        let layer = Layer::new(LayerId(1), LayerType::Primary, policy.next_color());
        Self {
            version: 0,
            total_limit: String::new(),
            layers: vec![layer],
        }
    }

    /// Creates a tower from already constructed layers.
    ///
    /// Callers must keep layer ids unique. An empty `layers` vector is
    /// allowed; the tower then renders nothing until a layer is added.
    pub fn from_layers(total_limit: impl Into<String>, layers: Vec<Layer>) -> Self {
        Self {
            version: 0,
            total_limit: parse_number_with_commas(&total_limit.into()),
            layers,
        }
    }

    /// Number of edits applied since the tower was created.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// The layers in the order they were added.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Looks up a layer by id.
    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.id() == id)
    }

    /// The total policy limit as entered, without thousands separators.
    pub fn total_limit_text(&self) -> &str {
        &self.total_limit
    }

    /// The coerced total policy limit; `0.0` when not a number.
    pub fn total_limit(&self) -> f64 {
        parse_amount(&self.total_limit)
    }

    /// Replaces the total policy limit, stripping thousands separators.
    pub fn set_total_limit(&mut self, value: &str) {
        self.total_limit = parse_number_with_commas(value);
        self.bump();
    }

    /// Appends an empty primary layer and returns its id.
    ///
    /// The id is one more than the largest id in the tower. The color is
    /// drawn from `policy` and stays with the layer for its lifetime.
    pub fn add_layer(&mut self, policy: &mut dyn ColorPolicy) -> LayerId {
        let id = self.next_id();
        self.layers
            .push(Layer::new(id, LayerType::Primary, policy.next_color()));
        self.bump();

        debug!(id = id.0; "Layer added");
        id
    }

    /// Removes a layer, keeping at least one layer in the tower.
    ///
    /// Returns `true` if a layer was removed.
    pub fn remove_layer(&mut self, id: LayerId) -> bool {
        if self.layers.len() <= 1 {
            debug!(id = id.0; "Refusing to remove the last layer");
            return false;
        }

        let before = self.layers.len();
        self.layers.retain(|layer| layer.id() != id);
        let removed = self.layers.len() != before;
        if removed {
            self.bump();
            debug!(id = id.0; "Layer removed");
        }
        removed
    }

    /// Sets a text field of a layer.
    ///
    /// Currency fields are stored without thousands separators. Returns
    /// `false` if no layer has the given id.
    pub fn update_field(&mut self, id: LayerId, field: LayerField, value: &str) -> bool {
        let Some(layer) = self.layer_mut(id) else {
            return false;
        };

        if field.is_currency() {
            layer.set_field(field, parse_number_with_commas(value));
        } else {
            layer.set_field(field, value);
        }
        self.bump();
        true
    }

    /// Changes the type of a layer.
    ///
    /// Ground-up types sit on the floor, so switching to one resets the
    /// attachment to `"0"`; switching to excess keeps it. Returns `false`
    /// if no layer has the given id.
    pub fn change_type(&mut self, id: LayerId, layer_type: LayerType) -> bool {
        let Some(layer) = self.layer_mut(id) else {
            return false;
        };

        layer.set_layer_type(layer_type);
        if layer_type.is_ground_up() {
            layer.set_field(LayerField::Attachment, "0");
        }
        self.bump();
        true
    }

    /// Sum of all layers' shares, whatever their type.
    pub fn total_share(&self) -> f64 {
        self.layers
            .iter()
            .map(|layer| parse_number(layer.field(LayerField::Share)))
            .sum()
    }

    /// Returns `true` when the shares add up to more than 100%.
    ///
    /// This is advisory only; layout proceeds regardless.
    pub fn share_exceeded(&self) -> bool {
        self.total_share() > 100.0
    }

    fn layer_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|layer| layer.id() == id)
    }

    /// One past the highest id in use, or the smallest free id once the
    /// highest is `u64::MAX`.
    fn next_id(&self) -> LayerId {
        let max = self.layers.iter().map(|layer| layer.id().0).max();
        match max {
            None => LayerId(1),
            Some(max) => max.checked_add(1).map_or_else(|| self.smallest_free_id(), LayerId),
        }
    }

    fn smallest_free_id(&self) -> LayerId {
        let mut used: Vec<u64> = self.layers.iter().map(|layer| layer.id().0).collect();
        used.sort_unstable();
        used.dedup();

        // Fewer layers than ids, so a gap exists below `used.len() + 1`.
        let free = used
            .iter()
            .zip(1u64..)
            .find(|(used, candidate)| **used != *candidate)
            .map_or(used.len() as u64 + 1, |(_, candidate)| candidate);
        LayerId(free)
    }

    fn bump(&mut self) {
        self.version += 1;
    }
}
