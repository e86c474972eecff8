//! MudMap CLI library
//!
//! This module contains the core CLI logic for the MudMap tower tool.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs::{self, File};

use log::{info, warn};

use mudmap::{MudmapError, TowerBuilder};

/// Run the MudMap CLI application
///
/// This function reads the tower document, writes the rendered SVG to the
/// output file and, when requested, writes the ZIP bundle.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `MudmapError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Tower document errors
/// - Rendering and export errors
pub fn run(args: &Args) -> Result<(), MudmapError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing tower"
    );

    // Load configuration
    let app_config = config::load_config(args.config.as_ref())?;

    // Read input file
    let source = fs::read_to_string(&args.input)?;

    let builder = TowerBuilder::new(app_config);
    let tower = builder.parse(&source)?;

    if tower.share_exceeded() {
        warn!(
            total_share = tower.total_share();
            "Shares add up to more than 100%, rendering anyway"
        );
    }

    let svg = builder.render_svg(&tower)?;
    fs::write(&args.output, svg)?;
    info!(output_file = args.output; "SVG exported successfully");

    if let Some(bundle_path) = &args.bundle {
        let file = File::create(bundle_path)?;
        builder.export_bundle(&tower, file)?;
        info!(bundle_file = bundle_path; "Bundle exported successfully");
    }

    Ok(())
}
