//! Configuration file structure (apidocs.toml).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use apidocs_merge::{ComponentRef, MergeConfig, RootMetadata, RootSource};
use apidocs_static::{BuildConfig, ExternalTool, FaviconConfig, RedocOptions};

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct ConfigFile {
    pub merge: MergeSettings,
    pub bundle: BundleSettings,
    pub build: BuildSettings,
    pub favicons: FaviconConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MergeSettings {
    /// Fragment files, applied in order
    pub fragments: Vec<PathBuf>,
    pub output: PathBuf,
    /// Existing root document to carry metadata over from
    pub root: Option<PathBuf>,
    pub components: Vec<ComponentRef>,
    pub metadata: RootMetadata,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct BundleSettings {
    pub enabled: bool,
    pub tool: ExternalTool,
    pub output: PathBuf,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct BuildSettings {
    pub spec: PathBuf,
    pub output: PathBuf,
    pub assets: PathBuf,
    pub title: String,
    pub renderer: ExternalTool,
    pub options: RedocOptions,
}

impl Default for MergeSettings {
    fn default() -> Self {
        let merge = MergeConfig::default();
        Self {
            fragments: merge.fragments,
            output: merge.output,
            root: None,
            components: ComponentRef::defaults(),
            metadata: RootMetadata::default(),
        }
    }
}

impl Default for BundleSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            tool: ExternalTool::redocly_bundle(),
            output: PathBuf::from("bundled.yaml"),
        }
    }
}

impl Default for BuildSettings {
    fn default() -> Self {
        let build = BuildConfig::default();
        Self {
            spec: build.spec,
            output: build.output_dir,
            assets: build.assets_dir,
            title: build.title,
            renderer: ExternalTool::redocly_build_docs(),
            options: build.options,
        }
    }
}

impl MergeSettings {
    pub fn to_config(&self) -> MergeConfig {
        let root = match &self.root {
            Some(path) => RootSource::Existing(path.clone()),
            None => RootSource::Literal {
                metadata: self.metadata.clone(),
                components: self.components.clone(),
            },
        };

        MergeConfig {
            fragments: self.fragments.clone(),
            root,
            output: self.output.clone(),
        }
    }
}

impl BuildSettings {
    pub fn to_config(&self, output: Option<PathBuf>) -> BuildConfig {
        BuildConfig {
            spec: self.spec.clone(),
            output_dir: output.unwrap_or_else(|| self.output.clone()),
            assets_dir: self.assets.clone(),
            title: self.title.clone(),
            options: self.options.clone(),
        }
    }
}

/// Load configuration if the file exists.
/// Returns an error if the config file exists but is malformed.
pub fn load_config(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        tracing::debug!("No {} found, using defaults", path.display());
        return Ok(ConfigFile::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    tracing::info!("Loaded config from {}", path.display());

    Ok(config)
}
