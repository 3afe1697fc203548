//! Documentation site builder.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::time::Instant;

use regex::Regex;
use walkdir::WalkDir;

use crate::assets::{copy_assets, same_file, write_hosting_marker, ASSETS_DIR};
use crate::options::RedocOptions;
use crate::renderer::{CommandRenderer, DocsRenderer, RenderRequest};
use crate::templates::{favicon_links, FallbackContext, TemplateEngine};

/// Intermediate HTML written by the renderer, removed after post-processing.
pub const TEMP_HTML: &str = "redoc-temp.html";

static HEAD_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<head(\s[^>]*)?>").expect("valid head tag pattern"));

/// Configuration for building the documentation site.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Spec document to render and publish
    pub spec: PathBuf,

    /// Output directory
    pub output_dir: PathBuf,

    /// Source directory of logos, favicons and the manifest
    pub assets_dir: PathBuf,

    /// Page title used by the fallback page
    pub title: String,

    /// Redoc options for both build paths
    pub options: RedocOptions,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            spec: PathBuf::from("bundled.yaml"),
            output_dir: PathBuf::from("dist"),
            assets_dir: PathBuf::from("assets"),
            title: "WRPay API Documentation".to_string(),
            options: RedocOptions::default(),
        }
    }
}

/// How `index.html` was produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildVia {
    /// The external renderer succeeded
    Tool,

    /// The renderer failed and the standalone template was used
    Fallback { reason: String },
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Path taken to produce the page
    pub via: BuildVia,

    /// Files in the output directory after the build, relative to it
    pub files: Vec<PathBuf>,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Spec document not found: {0}")]
    SpecNotFound(String),

    #[error("Failed to read {path}: {message}")]
    ReadError { path: String, message: String },

    #[error("Failed to render template: {0}")]
    TemplateError(String),

    #[error("Failed to write output: {0}")]
    WriteError(String),
}

/// Static documentation builder.
pub struct StaticBuilder {
    config: BuildConfig,
    renderer: Box<dyn DocsRenderer>,
    templates: TemplateEngine,
}

impl StaticBuilder {
    /// Create a builder using `redocly build-docs`.
    pub fn new(config: BuildConfig) -> Self {
        Self::with_renderer(config, Box::new(CommandRenderer::default()))
    }

    /// Create a builder with a specific renderer.
    pub fn with_renderer(config: BuildConfig, renderer: Box<dyn DocsRenderer>) -> Self {
        Self {
            config,
            renderer,
            templates: TemplateEngine::new(),
        }
    }

    /// Build the site: try the renderer once, fall back to the template on failure.
    pub fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();
        let output_dir = &self.config.output_dir;

        fs::create_dir_all(output_dir).map_err(|e| BuildError::WriteError(e.to_string()))?;

        let temp_html = output_dir.join(TEMP_HTML);
        let request = RenderRequest {
            spec: &self.config.spec,
            output: &temp_html,
            options: &self.config.options,
        };

        tracing::info!(
            "Rendering {} with {} renderer",
            self.config.spec.display(),
            self.renderer.name()
        );

        let via = match self.renderer.render(&request) {
            Ok(()) => {
                self.post_process(&temp_html)?;
                BuildVia::Tool
            }
            Err(e) => {
                tracing::warn!("Renderer failed, using fallback template: {}", e);
                if temp_html.exists() {
                    if let Err(e) = fs::remove_file(&temp_html) {
                        tracing::debug!("Could not remove {}: {}", temp_html.display(), e);
                    }
                }
                self.fallback()?;
                BuildVia::Fallback {
                    reason: e.to_string(),
                }
            }
        };

        Ok(BuildResult {
            via,
            files: self.list_files(),
            duration_ms: start.elapsed().as_millis() as u64,
            output_dir: output_dir.clone(),
        })
    }

    /// Inject the favicon links into the rendered page and publish it.
    fn post_process(&self, temp_html: &Path) -> Result<(), BuildError> {
        let html = fs::read_to_string(temp_html).map_err(|e| BuildError::ReadError {
            path: temp_html.display().to_string(),
            message: e.to_string(),
        })?;

        let links = self
            .templates
            .render_head_links(&favicon_links())
            .map_err(|e| BuildError::TemplateError(e.to_string()))?;

        let html = match inject_head(&html, &links) {
            Some(injected) => injected,
            None => {
                tracing::warn!(
                    "No <head> tag in {}, favicon links not injected",
                    temp_html.display()
                );
                html
            }
        };

        self.write_index(&html)?;
        fs::remove_file(temp_html).map_err(|e| BuildError::WriteError(e.to_string()))?;

        self.copy_spec()?;
        self.copy_assets()?;
        write_hosting_marker(&self.config.output_dir)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        Ok(())
    }

    /// Publish the spec and a standalone Redoc page.
    fn fallback(&self) -> Result<(), BuildError> {
        let spec_name = self.copy_spec()?;
        self.copy_assets()?;

        let spec_url = format!("./{}", spec_name);
        let html = self
            .templates
            .render_fallback(&FallbackContext {
                title: &self.config.title,
                spec_url: &spec_url,
                options: &self.config.options,
            })
            .map_err(|e| BuildError::TemplateError(e.to_string()))?;

        self.write_index(&html)?;
        write_hosting_marker(&self.config.output_dir)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        Ok(())
    }

    fn write_index(&self, html: &str) -> Result<(), BuildError> {
        fs::write(self.config.output_dir.join("index.html"), html)
            .map_err(|e| BuildError::WriteError(e.to_string()))
    }

    /// Copy the spec into the output directory, returning its file name.
    fn copy_spec(&self) -> Result<String, BuildError> {
        let spec = &self.config.spec;
        if !spec.is_file() {
            return Err(BuildError::SpecNotFound(spec.display().to_string()));
        }

        let name = spec
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("openapi.yaml")
            .to_string();

        let dest = self.config.output_dir.join(&name);
        if same_file(spec, &dest) {
            tracing::debug!("{} is already in the output directory", spec.display());
        } else {
            fs::copy(spec, &dest).map_err(|e| BuildError::WriteError(e.to_string()))?;
        }

        Ok(name)
    }

    fn copy_assets(&self) -> Result<(), BuildError> {
        let dest = self.config.output_dir.join(ASSETS_DIR);
        let copied = copy_assets(&self.config.assets_dir, &dest)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;
        tracing::debug!("Copied {} assets into {}", copied.len(), dest.display());
        Ok(())
    }

    /// Every file under the output directory, relative to it, sorted.
    fn list_files(&self) -> Vec<PathBuf> {
        let root = &self.config.output_dir;
        let mut files: Vec<PathBuf> = WalkDir::new(root)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter_map(|e| e.path().strip_prefix(root).ok().map(Path::to_path_buf))
            .collect();
        files.sort();
        files
    }
}

/// Insert `markup` right after the first `<head>` opening tag.
///
/// Returns `None` when the document has no head tag.
pub fn inject_head(html: &str, markup: &str) -> Option<String> {
    let tag = HEAD_TAG.find(html)?;

    let mut out = String::with_capacity(html.len() + markup.len() + 1);
    out.push_str(&html[..tag.end()]);
    out.push('\n');
    out.push_str(markup);
    out.push_str(&html[tag.end()..]);
    Some(out)
}
