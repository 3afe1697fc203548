//! Root document assembly.

use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};

use crate::fragment::{load_fragment, merge_paths, Fragment, PathOverwrite};
use crate::metadata::{component_refs, ComponentRef, RootMetadata};

/// Where the non-`paths` keys of the root document come from.
#[derive(Debug, Clone, PartialEq)]
pub enum RootSource {
    /// Literal metadata plus external component references.
    Literal {
        metadata: RootMetadata,
        components: Vec<ComponentRef>,
    },

    /// An existing root document; every key except `paths` is kept as is.
    Existing(PathBuf),
}

impl Default for RootSource {
    fn default() -> Self {
        RootSource::Literal {
            metadata: RootMetadata::default(),
            components: ComponentRef::defaults(),
        }
    }
}

/// Configuration for a merge run.
#[derive(Debug, Clone)]
pub struct MergeConfig {
    /// Fragment files, applied in order
    pub fragments: Vec<PathBuf>,

    /// Root metadata source
    pub root: RootSource,

    /// Output file for the merged document
    pub output: PathBuf,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            fragments: [
                "paths/payments.yaml",
                "paths/transactions.yaml",
                "paths/wallets.yaml",
                "paths/payment-support.yaml",
                "paths/withdraw-accounts.yaml",
                "paths/withdrawals.yaml",
            ]
            .into_iter()
            .map(PathBuf::from)
            .collect(),
            root: RootSource::default(),
            output: PathBuf::from("openapi.yaml"),
        }
    }
}

/// Errors that can occur while merging.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    #[error("Failed to read {path}: {message}")]
    Read { path: String, message: String },

    #[error("Failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Expected a mapping at the top level of {path}")]
    NotAMapping { path: String },

    #[error("Failed to serialize merged document: {0}")]
    Serialize(String),

    #[error("Failed to write {path}: {message}")]
    Write { path: String, message: String },
}

/// The merged root document plus the overwrites seen while building it.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedDocument {
    /// Root document
    pub document: Mapping,

    /// Path keys defined by more than one fragment
    pub overwrites: Vec<PathOverwrite>,
}

impl MergedDocument {
    /// The merged `paths` mapping, if present.
    pub fn paths(&self) -> Option<&Mapping> {
        self.document.get("paths").and_then(Value::as_mapping)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String, MergeError> {
        serde_yaml::to_string(&self.document).map_err(|e| MergeError::Serialize(e.to_string()))
    }

    /// Parse a previously serialized document. No overwrites are recorded.
    pub fn from_yaml(source: &str) -> Result<Self, MergeError> {
        let document: Mapping = serde_yaml::from_str(source).map_err(|e| MergeError::Parse {
            path: "<merged document>".to_string(),
            message: e.to_string(),
        })?;

        Ok(Self {
            document,
            overwrites: Vec::new(),
        })
    }

    /// Serialize and write, replacing any existing file.
    pub fn write(&self, path: &Path) -> Result<(), MergeError> {
        let yaml = self.to_yaml()?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| MergeError::Write {
                path: parent.display().to_string(),
                message: e.to_string(),
            })?;
        }

        fs::write(path, yaml).map_err(|e| MergeError::Write {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }
}

/// Merges path fragments into a single root document.
pub struct SpecMerger {
    config: MergeConfig,
}

impl SpecMerger {
    /// Create a new merger.
    pub fn new(config: MergeConfig) -> Self {
        Self { config }
    }

    /// Configured output path.
    pub fn output(&self) -> &Path {
        &self.config.output
    }

    /// Build the merged document in memory.
    ///
    /// Fails on the first fragment that cannot be read or parsed.
    pub fn merge(&self) -> Result<MergedDocument, MergeError> {
        let fragments = self
            .config
            .fragments
            .iter()
            .map(|path| -> Result<Fragment, MergeError> {
                let fragment = load_fragment(path)?;
                tracing::debug!(
                    "Loaded {} paths from {}",
                    fragment.paths.len(),
                    path.display()
                );
                Ok(fragment)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let merged = merge_paths(fragments);
        let paths = Value::Mapping(merged.paths);

        let document = match &self.config.root {
            RootSource::Literal {
                metadata,
                components,
            } => {
                let mut document = metadata
                    .to_mapping()
                    .map_err(|e| MergeError::Serialize(e.to_string()))?;
                document.insert(Value::String("paths".to_string()), paths);
                document.insert(
                    Value::String("components".to_string()),
                    Value::Mapping(component_refs(components)),
                );
                document
            }
            RootSource::Existing(root_path) => {
                let root = load_fragment(root_path)?;
                let mut document = root.paths;
                document.insert(Value::String("paths".to_string()), paths);
                document
            }
        };

        Ok(MergedDocument {
            document,
            overwrites: merged.overwrites,
        })
    }

    /// Merge and write the result to the configured output path.
    pub fn run(&self) -> Result<MergedDocument, MergeError> {
        let merged = self.merge()?;

        for overwrite in &merged.overwrites {
            tracing::warn!(
                "Path {} from {} overwritten by {}",
                overwrite.path,
                overwrite.previous.display(),
                overwrite.replacement.display()
            );
        }

        merged.write(&self.config.output)?;
        tracing::info!("Merged OpenAPI spec written to {}", self.config.output.display());

        Ok(merged)
    }
}
