//! Drawing support shared by the renderers.
//!
//! Rendering is done in the `mudmap` crate; this module only provides the
//! z-ordering primitives ([`RenderLayer`], [`LayeredOutput`]) so that
//! placements emitted in layout order still stack correctly in the SVG.

mod layer;

pub use layer::{LayeredOutput, RenderLayer, SvgNode};
