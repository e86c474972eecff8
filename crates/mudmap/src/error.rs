//! Error types for MudMap operations.
//!
//! This module provides the main error type [`MudmapError`]. The layout
//! engine itself never fails; errors only arise at the edges, when reading
//! documents and configuration or writing output.

use std::{io, ops::Range};

use thiserror::Error;

/// The main error type for MudMap operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the document source and the byte span of the
/// offending input, so callers can point at the exact location.
#[derive(Debug, Error)]
pub enum MudmapError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{message}")]
    Parse {
        message: String,
        span: Option<Range<usize>>,
        src: String,
    },

    #[error("Tower error: {0}")]
    Tower(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl From<crate::export::Error> for MudmapError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl MudmapError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(
        message: impl Into<String>,
        span: Option<Range<usize>>,
        src: impl Into<String>,
    ) -> Self {
        Self::Parse {
            message: message.into().trim_end().to_string(),
            span,
            src: src.into(),
        }
    }
}
