//! Export functionality for MudMap towers.
//!
//! This module provides the [`Exporter`] trait that defines the interface for
//! writing laid-out towers to output formats. It is the final stage in the
//! MudMap pipeline.
//!
//! # Pipeline Position
//!
//! ```text
//! Tower Document
//!     ↓ parse
//! Tower (layers + total limit)
//!     ↓ layout
//! Placements (LayerElement)
//!     ↓ export (this module)
//! Output File
//! ```
//!
//! # Available Backends
//!
//! - [`svg`] — SVG diagram via [`svg::SvgBuilder`] and [`svg::SvgExporter`]
//! - [`bundle`] — ZIP archive holding the layer table and the diagram
//!
//! The [`table`] module flattens layers into rows for the bundle.
//!
//! # Error Handling
//!
//! Export operations return [`Error`], covering rendering failures, I/O
//! errors and archive errors. [`Error`] converts into
//! [`MudmapError::Export`] at the crate boundary.
//!
//! [`MudmapError::Export`]: crate::MudmapError::Export

/// ZIP bundle backend.
pub mod bundle;
/// SVG export backend.
pub mod svg;
/// Tabular flattening of layers.
pub mod table;

use mudmap_core::layer::LayerElement;

use crate::tower::Tower;

/// Abstraction for tower export backends.
pub trait Exporter {
    /// Exports a tower and its placements to the backend's output format.
    ///
    /// `elements` must be the layout of `tower`'s current layers; the
    /// exporter uses the tower for the total limit, share summary and
    /// tabular data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the tower cannot be converted to the
    /// target format, [`Error::Io`] if writing the output fails, or
    /// [`Error::Archive`] if an archive entry cannot be written.
    fn export_tower(&mut self, tower: &Tower, elements: &[LayerElement]) -> Result<(), Error>;
}

/// Errors that can occur during tower export.
///
/// This type is converted into [`MudmapError::Export`] at the crate
/// boundary via the [`From`] implementation in [`crate::error`].
///
/// [`MudmapError::Export`]: crate::MudmapError::Export
#[derive(Debug)]
pub enum Error {
    /// A rendering or conversion failure described by `message`.
    Render(String),
    /// An I/O error encountered while writing output.
    Io(std::io::Error),
    /// A failure while writing the ZIP archive.
    Archive(zip::result::ZipError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
            Self::Archive(err) => write!(f, "Archive error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Io(err) => Some(err),
            Self::Archive(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Self::Archive(err)
    }
}
