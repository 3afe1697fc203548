//! Initialize a documentation project.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Fragment skeletons created next to the config file.
const SKELETON: &[(&str, &str)] = &[
    ("paths/payments.yaml", DEFAULT_PAYMENTS),
    ("paths/transactions.yaml", "{}\n"),
    ("paths/wallets.yaml", "{}\n"),
    ("paths/payment-support.yaml", "{}\n"),
    ("paths/withdraw-accounts.yaml", "{}\n"),
    ("paths/withdrawals.yaml", "{}\n"),
    ("components/security.yaml", DEFAULT_SECURITY),
    ("components/responses.yaml", DEFAULT_RESPONSES),
    ("components/schemas.yaml", DEFAULT_SCHEMAS),
];

/// Run the init command.
///
/// Existing files are kept unless `yes` is set.
pub fn run(config_path: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing apidocs...");

    let root = config_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));

    if config_path.exists() && !yes {
        tracing::warn!(
            "{} already exists. Use --yes to overwrite.",
            config_path.display()
        );
        return Ok(());
    }

    fs::write(config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    tracing::info!("Created {}", config_path.display());

    for (relative, content) in SKELETON {
        let path = root.join(relative);
        if path.exists() && !yes {
            continue;
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&path, content).with_context(|| format!("Failed to write {}", relative))?;
        tracing::info!("Created {}", relative);
    }

    let assets = root.join("assets");
    fs::create_dir_all(&assets).context("Failed to create assets directory")?;

    tracing::info!("Initialization complete!");
    tracing::info!("Add assets/favicon.png and logos, then run 'apidocs all'.");

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# apidocs configuration

[merge]
# Path fragments, merged in order; a later file wins on duplicate paths
fragments = [
  "paths/payments.yaml",
  "paths/transactions.yaml",
  "paths/wallets.yaml",
  "paths/payment-support.yaml",
  "paths/withdraw-accounts.yaml",
  "paths/withdrawals.yaml",
]
output = "openapi.yaml"

# Carry info/servers/tags/components over from an existing root instead
# root = "openapi.base.yaml"

[[merge.components]]
category = "securitySchemes"
ref = "./components/security.yaml#/securitySchemes"

[[merge.components]]
category = "responses"
ref = "./components/responses.yaml#/responses"

[[merge.components]]
category = "schemas"
ref = "./components/schemas.yaml#/schemas"

[bundle]
enabled = true
output = "bundled.yaml"

[bundle.tool]
program = "redocly"
args = ["bundle", "{input}", "-o", "{output}"]

[build]
spec = "bundled.yaml"
output = "dist"
assets = "assets"
title = "WRPay API Documentation"

[build.renderer]
program = "redocly"
args = ["build-docs", "{spec}", "--output", "{output}", "--config", "{config}"]

[favicons]
source = "assets/favicon.png"
output = "dist/assets"
name = "WRPay API Documentation"
short_name = "WRPay API Docs"
"#;

const DEFAULT_PAYMENTS: &str = r#"/payments:
  post:
    tags: [Payments]
    summary: Initiate a payment
    operationId: createPayment
    responses:
      '201':
        $ref: '../components/responses.yaml#/responses/Created'
"#;

const DEFAULT_SECURITY: &str = r#"securitySchemes:
  default:
    type: apiKey
    in: header
    name: X-API-Key
"#;

const DEFAULT_RESPONSES: &str = r#"responses:
  Created:
    description: Resource created
"#;

const DEFAULT_SCHEMAS: &str = r#"schemas:
  Error:
    type: object
    properties:
      message:
        type: string
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config;
    use tempfile::tempdir;

    #[test]
    fn creates_config_and_skeleton() {
        let temp = tempdir().unwrap();
        let config_path = temp.path().join("apidocs.toml");

        run(&config_path, false).unwrap();

        assert!(config_path.exists());
        for (relative, _) in SKELETON {
            assert!(temp.path().join(relative).exists(), "missing {relative}");
        }
        assert!(temp.path().join("assets").is_dir());
    }

    #[test]
    fn default_config_parses() {
        let temp = tempdir().unwrap();
        let config_path = temp.path().join("apidocs.toml");

        run(&config_path, false).unwrap();
        let config = load_config(&config_path).unwrap();

        assert_eq!(config.merge.fragments.len(), 6);
        assert_eq!(config.merge.components.len(), 3);
        assert_eq!(config.bundle.tool.args[0], "bundle");
    }

    #[test]
    fn keeps_existing_files_without_yes() {
        let temp = tempdir().unwrap();
        let config_path = temp.path().join("apidocs.toml");
        fs::write(&config_path, "# mine").unwrap();

        run(&config_path, false).unwrap();

        assert_eq!(fs::read_to_string(&config_path).unwrap(), "# mine");
        assert!(!temp.path().join("paths").exists());
    }

    #[test]
    fn skeleton_merges_cleanly() {
        let temp = tempdir().unwrap();
        let config_path = temp.path().join("apidocs.toml");
        run(&config_path, false).unwrap();

        let mut settings = load_config(&config_path).unwrap().merge;
        settings.fragments = settings
            .fragments
            .iter()
            .map(|f| temp.path().join(f))
            .collect();
        settings.output = temp.path().join("openapi.yaml");

        let merged = apidocs_merge::SpecMerger::new(settings.to_config())
            .run()
            .unwrap();

        assert_eq!(merged.paths().map(|p| p.len()), Some(1));
    }
}
