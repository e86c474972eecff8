//! Tower layout engine.
//!
//! Converts an unordered layer collection into non-overlapping placements
//! in percent space. The pass runs in three stages:
//!
//! 1. **Partition** layers by [`LayerType`].
//! 2. **Order** each group by ascending premium (stable).
//! 3. **Place** quota shares left to right, then primaries, each primary
//!    immediately followed by the excess layer attached at its limit.
//!
//! Both entry points are pure. Malformed fields coerce to zero and layers
//! that cannot be drawn are skipped, so a half-edited tower always lays out.

use std::cmp::Ordering;

use log::{debug, trace};

use mudmap_core::{
    geometry::PercentRect,
    layer::{EXCESS_Z_INDEX, Layer, LayerElement, LayerType},
    number::parse_amount,
};

/// Layers partitioned by type, each group sorted by ascending premium.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerGroups<'a> {
    /// Quota-share layers in placement order.
    pub quota_share: Vec<&'a Layer>,
    /// Primary layers in placement order.
    pub primary: Vec<&'a Layer>,
    /// Excess-of-loss layers in pairing order.
    pub xol: Vec<&'a Layer>,
    /// Sum of the quota-share layers' shares.
    ///
    /// Informational; placement does not depend on it.
    pub quota_share_width: f64,
}

/// Partitions `layers` by type and orders each group by premium.
///
/// Non-numeric premiums sort as zero. Layers with equal premiums keep
/// their relative input order.
pub fn compute_groups(layers: &[Layer]) -> LayerGroups<'_> {
    let mut groups = LayerGroups::default();

    for layer in layers {
        match layer.layer_type() {
            LayerType::QuotaShare => groups.quota_share.push(layer),
            LayerType::Primary => groups.primary.push(layer),
            LayerType::Xol => groups.xol.push(layer),
        }
    }

    // `sort_by` is stable
    for group in [
        &mut groups.quota_share,
        &mut groups.primary,
        &mut groups.xol,
    ] {
        group.sort_by(|a, b| by_premium(a, b));
    }

    groups.quota_share_width = groups.quota_share.iter().map(|layer| layer.share()).sum();

    trace!(
        quota_share = groups.quota_share.len(),
        primary = groups.primary.len(),
        xol = groups.xol.len(),
        quota_share_width = groups.quota_share_width;
        "Layer groups computed"
    );

    groups
}

fn by_premium(a: &Layer, b: &Layer) -> Ordering {
    a.premium()
        .partial_cmp(&b.premium())
        .unwrap_or(Ordering::Equal)
}

/// Lays out `layers` against a total policy limit given as text.
///
/// The limit may carry thousands separators. See
/// [`render_layers_with_limit`] for the placement rules.
pub fn render_layers(layers: &[Layer], total_limit: &str) -> Vec<LayerElement> {
    render_layers_with_limit(layers, parse_amount(total_limit))
}

/// Lays out `layers` against a numeric total policy limit.
///
/// A quota-share or primary layer is placed when its limit, its share and
/// the total limit are all positive and the total limit is finite; it spans `share`% horizontally from
/// the running offset and `limit / total_limit` vertically from the floor.
/// The offset advances by `share` for every placed layer and never for a
/// skipped one.
///
/// After each placed primary, the first excess layer (in premium order)
/// whose attachment equals the primary's limit is placed in the same
/// horizontal band, starting at its attachment. Each primary pairs with at
/// most one excess layer and excess layers are never placed on their own.
///
/// # Examples
///
/// ```
/// use mudmap::{
///     color::Color,
///     layer::{Layer, LayerId, LayerType},
///     layout::render_layers_with_limit,
/// };
///
/// let color = Color::default();
/// let layers = [
///     Layer::new(LayerId(1), LayerType::Primary, color)
///         .with_limit("1000000")
///         .with_share("50"),
///     Layer::new(LayerId(2), LayerType::Xol, color)
///         .with_limit("2000000")
///         .with_attachment("1000000")
///         .with_share("50"),
/// ];
///
/// let elements = render_layers_with_limit(&layers, 3_000_000.0);
/// assert_eq!(elements.len(), 2);
/// assert_eq!(elements[1].key(), "x-2");
/// assert_eq!(elements[1].rect().left(), 0.0);
/// ```
pub fn render_layers_with_limit(layers: &[Layer], total_limit: f64) -> Vec<LayerElement> {
    let groups = compute_groups(layers);
    let mut elements = Vec::with_capacity(layers.len());

    if !(total_limit.is_finite() && total_limit > 0.0) {
        debug!(total_limit; "Total limit is not a positive amount, nothing to place");
        return elements;
    }

    let to_percent = |amount: f64| amount / total_limit * 100.0;
    let mut current_position = 0.0;

    for layer in &groups.quota_share {
        let limit = layer.limit();
        let share = layer.share();

        if limit <= 0.0 || share <= 0.0 {
            trace!(key = layer.placement_key(); "Skipping quota share without limit or share");
            continue;
        }

        let rect = PercentRect::new(current_position, 0.0, share, to_percent(limit));
        elements.push(LayerElement::new(layer, rect));
        current_position += share;
    }

    for primary in &groups.primary {
        let primary_limit = primary.limit();
        let primary_share = primary.share();

        if primary_limit <= 0.0 || primary_share <= 0.0 {
            trace!(key = primary.placement_key(); "Skipping primary without limit or share");
            continue;
        }

        let rect = PercentRect::new(current_position, 0.0, primary_share, to_percent(primary_limit));
        elements.push(LayerElement::new(primary, rect));

        if let Some(xol) = groups
            .xol
            .iter()
            .find(|xol| xol.attachment() == primary_limit)
        {
            let xol_limit = xol.limit();
            let xol_share = xol.share();
            let attachment = xol.attachment();

            if xol_limit > 0.0 && xol_share > 0.0 && attachment > 0.0 {
                trace!(
                    primary = primary.placement_key(),
                    xol = xol.placement_key();
                    "Pairing excess layer with primary"
                );
                let rect = PercentRect::new(
                    current_position,
                    to_percent(attachment),
                    xol_share,
                    to_percent(xol_limit),
                );
                elements.push(LayerElement::new(xol, rect).with_z_index(EXCESS_Z_INDEX));
            } else {
                trace!(xol = xol.placement_key(); "Matched excess layer has no limit or share");
            }
        }

        current_position += primary_share;
    }

    debug!(
        layers = layers.len(),
        placed = elements.len(),
        width = current_position;
        "Tower layout computed"
    );

    elements
}
