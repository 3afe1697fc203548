//! External documentation tools.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use serde::Deserialize;

use crate::options::RedocOptions;

/// A command-line program with `{placeholder}` arguments.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExternalTool {
    /// Executable name or path
    pub program: String,

    /// Arguments; `{name}` is replaced by the matching variable
    #[serde(default)]
    pub args: Vec<String>,
}

/// Errors from running an external tool.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Failed to run {program}: {message}")]
    Spawn { program: String, message: String },

    #[error("{program} exited with status {status}: {stderr}")]
    Failed {
        program: String,
        status: i32,
        stderr: String,
    },
}

impl ExternalTool {
    pub fn new(program: impl Into<String>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// `redocly build-docs` writing to `{output}` with options from `{config}`.
    pub fn redocly_build_docs() -> Self {
        Self::new(
            "redocly",
            &[
                "build-docs",
                "{spec}",
                "--output",
                "{output}",
                "--config",
                "{config}",
            ],
        )
    }

    /// `redocly bundle` resolving external references of `{input}` into `{output}`.
    pub fn redocly_bundle() -> Self {
        Self::new("redocly", &["bundle", "{input}", "-o", "{output}"])
    }

    /// Arguments with every `{name}` placeholder substituted.
    pub fn resolve_args(&self, vars: &[(&str, &Path)]) -> Vec<String> {
        self.args
            .iter()
            .map(|arg| {
                vars.iter().fold(arg.clone(), |acc, (name, value)| {
                    acc.replace(&format!("{{{}}}", name), &value.to_string_lossy())
                })
            })
            .collect()
    }

    /// Run to completion; a non-zero exit status is an error.
    pub fn run(&self, vars: &[(&str, &Path)]) -> Result<(), ToolError> {
        let args = self.resolve_args(vars);
        tracing::debug!("Running {} {}", self.program, args.join(" "));

        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .map_err(|e| ToolError::Spawn {
                program: self.program.clone(),
                message: e.to_string(),
            })?;

        if !output.stdout.is_empty() {
            tracing::debug!("{}", String::from_utf8_lossy(&output.stdout).trim());
        }

        if !output.status.success() {
            return Err(ToolError::Failed {
                program: self.program.clone(),
                status: output.status.code().unwrap_or(1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(())
    }
}

/// Inputs for a single documentation render.
#[derive(Debug, Clone)]
pub struct RenderRequest<'a> {
    /// Spec document to render
    pub spec: &'a Path,
    /// HTML file to produce
    pub output: &'a Path,
    /// Display options
    pub options: &'a RedocOptions,
}

/// Errors that can occur while rendering documentation.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error(transparent)]
    Tool(#[from] ToolError),

    #[error("Failed to prepare renderer config: {0}")]
    Config(String),
}

/// Something that turns a spec document into a static HTML page.
pub trait DocsRenderer: Send + Sync {
    /// Renderer identifier, used in logs
    fn name(&self) -> &'static str;

    /// Render `request.spec` into `request.output`.
    fn render(&self, request: &RenderRequest<'_>) -> Result<(), RenderError>;
}

/// Renders by running an external command such as `redocly build-docs`.
pub struct CommandRenderer {
    tool: ExternalTool,
}

impl CommandRenderer {
    pub fn new(tool: ExternalTool) -> Self {
        Self { tool }
    }

    fn config_path(output: &Path) -> PathBuf {
        output.with_extension("redocly.yaml")
    }
}

impl Default for CommandRenderer {
    fn default() -> Self {
        Self::new(ExternalTool::redocly_build_docs())
    }
}

impl DocsRenderer for CommandRenderer {
    fn name(&self) -> &'static str {
        "command"
    }

    fn render(&self, request: &RenderRequest<'_>) -> Result<(), RenderError> {
        let config = Self::config_path(request.output);
        let yaml = request
            .options
            .to_redocly_config()
            .map_err(|e| RenderError::Config(e.to_string()))?;
        fs::write(&config, yaml).map_err(|e| RenderError::Config(e.to_string()))?;

        let result = self.tool.run(&[
            ("spec", request.spec),
            ("output", request.output),
            ("config", config.as_path()),
        ]);

        if let Err(e) = fs::remove_file(&config) {
            tracing::debug!("Could not remove {}: {}", config.display(), e);
        }
        Ok(result?)
    }
}
