//! Layer-based rendering system for SVG output.
//!
//! SVG has no z-index: later elements paint over earlier ones. Renderers
//! therefore tag every node with a [`RenderLayer`] and let
//! [`LayeredOutput`] emit them bottom to top.
//!
//! # Example
//!
//! ```
//! # use mudmap_core::draw::{RenderLayer, LayeredOutput};
//! # use svg::node::element::Rectangle;
//!
//! let mut output = LayeredOutput::new();
//!
//! // An excess layer added before the grid still renders above it
//! output.add_to_layer(RenderLayer::Excess, Box::new(Rectangle::new()));
//! output.add_to_layer(RenderLayer::Grid, Box::new(Rectangle::new()));
//!
//! let svg_nodes = output.render();
//! assert_eq!(svg_nodes.len(), 2);
//! ```

use svg::node::element as svg_element;

/// Type alias for boxed SVG nodes.
pub type SvgNode = Box<dyn svg::Node>;

/// Defines the rendering layers for SVG output.
///
/// Layers are rendered from bottom to top in the order defined by variant declaration.
/// The `Ord` derive uses declaration order, so the first variant renders first (bottom),
/// and the last variant renders last (top).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderLayer {
    /// Background fill and plot frame - renders first
    Background,
    /// Grid lines at the quarter marks
    Grid,
    /// Ground-up coverage rectangles (quota share and primary)
    Coverage,
    /// Excess-of-loss rectangles, stacked above the coverage they sit on
    Excess,
    /// Text labels inside rectangles
    Label,
    /// Axis labels, summary and warnings
    Annotation,
}

impl RenderLayer {
    /// Returns a human-readable name for this layer.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Grid => "grid",
            Self::Coverage => "coverage",
            Self::Excess => "excess",
            Self::Label => "label",
            Self::Annotation => "annotation",
        }
    }
}

/// Represents SVG nodes grouped by rendering layer.
///
/// Nodes are collected in any order. When rendered, they are emitted in
/// layer order (bottom to top); within a layer, insertion order is kept.
#[derive(Debug, Default)]
pub struct LayeredOutput {
    items: Vec<(RenderLayer, SvgNode)>,
}

impl LayeredOutput {
    /// Creates a new empty `LayeredOutput`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single node to the specified layer.
    pub fn add_to_layer(&mut self, layer: RenderLayer, node: SvgNode) {
        self.items.push((layer, node));
    }

    /// Merges all layers from another `LayeredOutput` into this one.
    ///
    /// Nodes from the other output are appended to existing layers in this output.
    pub fn merge(&mut self, other: LayeredOutput) {
        self.items.extend(other.items);
    }

    /// Returns `true` if there are no nodes in any layer.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Renders all layers to SVG groups, consuming the output.
    ///
    /// Each non-empty layer becomes an SVG `<g>` element with a `data-layer`
    /// attribute identifying the layer. Empty layers are skipped.
    pub fn render(mut self) -> Vec<SvgNode> {
        if self.is_empty() {
            return Vec::new();
        }

        // Stable sort keeps insertion order within a layer
        self.items.sort_by_key(|(layer, _)| *layer);

        let mut result = Vec::new();
        let mut current_layer = self.items[0].0;
        let mut current_group = svg_element::Group::new().set("data-layer", current_layer.name());

        for (layer, node) in self.items {
            if layer != current_layer {
                result.push(Box::new(current_group) as SvgNode);

                current_layer = layer;
                current_group = svg_element::Group::new().set("data-layer", layer.name());
            }

            current_group = current_group.add(node);
        }

        result.push(Box::new(current_group) as SvgNode);

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use svg::node::element::Rectangle;

    fn rendered_layer_names(output: LayeredOutput) -> Vec<String> {
        let doc = output
            .render()
            .into_iter()
            .fold(svg::Document::new(), |doc, node| doc.add(node));
        let text = doc.to_string();

        let mut names = Vec::new();
        let mut rest = text.as_str();
        while let Some(start) = rest.find("data-layer=\"") {
            rest = &rest[start + "data-layer=\"".len()..];
            let end = rest.find('"').unwrap();
            names.push(rest[..end].to_string());
            rest = &rest[end..];
        }
        names
    }

    #[test]
    fn test_layered_output_new() {
        let output = LayeredOutput::new();
        assert!(output.is_empty());
        assert!(output.render().is_empty());
    }

    #[test]
    fn test_layered_output_add_to_layer() {
        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Coverage, Box::new(Rectangle::new()));
        assert!(!output.is_empty());
    }

    #[test]
    fn test_layered_output_orders_bottom_to_top() {
        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Label, Box::new(Rectangle::new()));
        output.add_to_layer(RenderLayer::Excess, Box::new(Rectangle::new()));
        output.add_to_layer(RenderLayer::Coverage, Box::new(Rectangle::new()));
        output.add_to_layer(RenderLayer::Background, Box::new(Rectangle::new()));

        assert_eq!(
            rendered_layer_names(output),
            ["background", "coverage", "excess", "label"]
        );
    }

    #[test]
    fn test_layered_output_merge_same_layer() {
        let mut output1 = LayeredOutput::new();
        output1.add_to_layer(RenderLayer::Coverage, Box::new(Rectangle::new()));

        let mut output2 = LayeredOutput::new();
        output2.add_to_layer(RenderLayer::Coverage, Box::new(Rectangle::new()));

        output1.merge(output2);

        let nodes = output1.render();
        assert_eq!(nodes.len(), 1);
    }

    #[test]
    fn test_layered_output_merge_different_layers() {
        let mut output1 = LayeredOutput::new();
        output1.add_to_layer(RenderLayer::Coverage, Box::new(Rectangle::new()));

        let mut output2 = LayeredOutput::new();
        output2.add_to_layer(RenderLayer::Annotation, Box::new(Rectangle::new()));

        output1.merge(output2);
        assert_eq!(output1.render().len(), 2);
    }
}
