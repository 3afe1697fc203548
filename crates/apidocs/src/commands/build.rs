//! Static documentation build command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use apidocs_static::{BuildResult, BuildVia, CommandRenderer, StaticBuilder};

use crate::config::ConfigFile;

/// Run the build command.
pub fn run(config: &ConfigFile, output: Option<PathBuf>) -> Result<BuildResult> {
    tracing::info!("Building HTML documentation...");

    let build_config = config.build.to_config(output);
    let renderer = CommandRenderer::new(config.build.renderer.clone());

    let result = StaticBuilder::with_renderer(build_config, Box::new(renderer))
        .build()
        .context("Failed to build documentation")?;

    match &result.via {
        BuildVia::Tool => tracing::info!("Built with {}", config.build.renderer.program),
        BuildVia::Fallback { reason } => {
            tracing::info!("Built with fallback template ({})", reason)
        }
    }

    tracing::info!(
        "HTML documentation built in {}ms: {}",
        result.duration_ms,
        result.output_dir.display()
    );
    for file in &result.files {
        tracing::info!("  - {}", result.output_dir.join(file).display());
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use apidocs_static::ExternalTool;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn missing_renderer_falls_back() {
        let temp = tempdir().unwrap();
        let spec = temp.path().join("openapi.yaml");
        fs::write(&spec, "openapi: 3.0.3\n").unwrap();

        let mut config = ConfigFile::default();
        config.build.spec = spec;
        config.build.assets = temp.path().join("assets");
        config.build.renderer = ExternalTool::new("apidocs-missing-renderer", &["{spec}"]);

        let out = temp.path().join("dist");
        let result = run(&config, Some(out.clone())).unwrap();

        assert!(matches!(result.via, BuildVia::Fallback { .. }));
        assert!(fs::read_to_string(out.join("index.html"))
            .unwrap()
            .contains("Redoc.init(\"./openapi.yaml\""));
        assert!(out.join(".nojekyll").exists());
    }

    #[test]
    fn missing_spec_fails_the_command() {
        let temp = tempdir().unwrap();

        let mut config = ConfigFile::default();
        config.build.spec = temp.path().join("nope.yaml");
        config.build.renderer = ExternalTool::new("apidocs-missing-renderer", &[]);

        let err = run(&config, Some(temp.path().join("dist"))).unwrap_err();

        assert!(format!("{err:#}").contains("Spec document not found"));
    }
}
