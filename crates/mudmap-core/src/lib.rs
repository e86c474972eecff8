//! MudMap Core Types and Definitions
//!
//! This crate provides the foundational types shared by the MudMap layout
//! engine and its renderers. It includes:
//!
//! - **Layers**: Coverage layer records and their placements ([`layer`] module)
//! - **Numbers**: Lenient numeric coercion of user-entered text ([`number`] module)
//! - **Formatting**: Comma grouping and currency axis labels ([`format`] module)
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Palettes**: Color assignment policies for new layers ([`palette`] module)
//! - **Geometry**: Percent and pixel geometry ([`geometry`] module)
//! - **Draw**: Render-layer z-ordering for SVG output ([`draw`] module)

pub mod color;
pub mod draw;
pub mod format;
pub mod geometry;
pub mod layer;
pub mod number;
pub mod palette;
