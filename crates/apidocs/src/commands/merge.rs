//! Fragment merge command.

use anyhow::{Context, Result};
use apidocs_merge::{MergedDocument, SpecMerger};

use crate::config::ConfigFile;

/// Run the merge command.
pub fn run(config: &ConfigFile) -> Result<MergedDocument> {
    tracing::info!(
        "Merging {} path fragments...",
        config.merge.fragments.len()
    );

    let merger = SpecMerger::new(config.merge.to_config());
    let merged = merger.run().context("Failed to merge OpenAPI fragments")?;

    let paths = merged.paths().map(|p| p.len()).unwrap_or(0);
    tracing::info!(
        "OpenAPI spec merged successfully: {} paths, {} overwritten",
        paths,
        merged.overwrites.len()
    );

    Ok(merged)
}
