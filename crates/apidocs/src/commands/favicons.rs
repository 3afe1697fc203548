//! Favicon generation command.

use anyhow::{Context, Result};
use apidocs_static::{FaviconConfig, FaviconGenerator, FaviconReport};

/// Run the favicons command.
pub fn run(settings: &FaviconConfig) -> Result<FaviconReport> {
    let report = FaviconGenerator::new(settings.clone())
        .generate()
        .context("Failed to generate favicons")?;

    tracing::info!(
        "All favicons generated successfully in {}",
        settings.output.display()
    );

    Ok(report)
}
