//! Full pipeline: merge, bundle, favicons, build.

use std::path::PathBuf;

use anyhow::Result;
use apidocs_static::assets::ASSETS_DIR;

use crate::commands::{build, bundle, favicons, merge};
use crate::config::ConfigFile;

/// Run every step in order, stopping at the first failure.
///
/// An `output` override moves the favicons along with the site so the
/// links in `index.html` resolve.
pub fn run(config: &ConfigFile, output: Option<PathBuf>) -> Result<()> {
    merge::run(config)?;

    if config.bundle.enabled {
        bundle::run(config)?;
    } else {
        tracing::info!("Bundling disabled, skipping");
    }

    let mut icons = config.favicons.clone();
    if let Some(dir) = &output {
        icons.output = dir.join(ASSETS_DIR);
    }

    if icons.source.is_file() {
        favicons::run(&icons)?;
    } else {
        tracing::warn!(
            "No source favicon at {}, skipping favicon generation",
            icons.source.display()
        );
    }

    build::run(config, output)?;

    Ok(())
}
