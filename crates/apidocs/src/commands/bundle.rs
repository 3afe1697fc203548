//! External bundler command.

use anyhow::{Context, Result};

use crate::config::ConfigFile;

/// Run the bundle command.
pub fn run(config: &ConfigFile) -> Result<()> {
    let input = &config.merge.output;
    let output = &config.bundle.output;

    tracing::info!("Bundling {} into {}", input.display(), output.display());

    config
        .bundle
        .tool
        .run(&[("input", input.as_path()), ("output", output.as_path())])
        .with_context(|| format!("Failed to bundle {}", input.display()))?;

    tracing::info!("Bundled spec written to {}", output.display());

    Ok(())
}
