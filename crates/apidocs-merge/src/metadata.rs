//! Root document metadata and component references.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

/// Top-level keys of the root document other than `paths` and `components`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RootMetadata {
    /// OpenAPI version string
    pub openapi: String,

    /// Document info block
    pub info: Info,

    /// Server list
    pub servers: Vec<Server>,

    /// Global security requirements
    pub security: Vec<BTreeMap<String, Vec<String>>>,

    /// Tag declarations, in display order
    pub tags: Vec<Tag>,
}

/// The `info` object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Info {
    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub version: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<License>,

    /// Redoc logo extension
    #[serde(rename = "x-logo", skip_serializing_if = "Option::is_none")]
    pub logo: Option<Logo>,

    /// Redocly dark-mode logo extension
    #[serde(rename = "x-dark-logo", skip_serializing_if = "Option::is_none")]
    pub dark_logo: Option<Logo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct License {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Logo {
    pub url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Server {
    pub url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A component category pointing at an external definition.
///
/// The pointer is written verbatim as `$ref`; resolving it is the bundler's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentRef {
    /// Component category, e.g. `schemas`
    pub category: String,

    /// External reference, e.g. `./components/schemas.yaml#/schemas`
    #[serde(rename = "ref")]
    pub reference: String,
}

impl ComponentRef {
    pub fn new(category: impl Into<String>, reference: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            reference: reference.into(),
        }
    }

    /// The default security scheme, response and schema references.
    pub fn defaults() -> Vec<ComponentRef> {
        vec![
            ComponentRef::new(
                "securitySchemes",
                "./components/security.yaml#/securitySchemes",
            ),
            ComponentRef::new("responses", "./components/responses.yaml#/responses"),
            ComponentRef::new("schemas", "./components/schemas.yaml#/schemas"),
        ]
    }
}

/// Build the `components` mapping from category references, in the given order.
pub fn component_refs(refs: &[ComponentRef]) -> Mapping {
    let mut components = Mapping::new();
    for component in refs {
        let mut pointer = Mapping::new();
        pointer.insert(
            Value::String("$ref".to_string()),
            Value::String(component.reference.clone()),
        );
        components.insert(
            Value::String(component.category.clone()),
            Value::Mapping(pointer),
        );
    }
    components
}

impl RootMetadata {
    /// Serialize into an ordered mapping: `openapi`, `info`, `servers`, `security`, `tags`.
    pub fn to_mapping(&self) -> Result<Mapping, serde_yaml::Error> {
        match serde_yaml::to_value(self)? {
            Value::Mapping(mapping) => Ok(mapping),
            // A struct always serializes to a mapping
            _ => Ok(Mapping::new()),
        }
    }
}

impl Default for RootMetadata {
    fn default() -> Self {
        let tag = |name: &str, description: &str| Tag {
            name: name.to_string(),
            description: Some(description.to_string()),
        };

        Self {
            openapi: "3.0.3".to_string(),
            info: Info::default(),
            servers: vec![
                Server {
                    url: "https://sandbox.ilonapay.com".to_string(),
                    description: Some(
                        "Sandbox environment for testing and development".to_string(),
                    ),
                },
                Server {
                    url: "https://production.ilonapay.com".to_string(),
                    description: Some("Production environment for live transactions".to_string()),
                },
            ],
            security: vec![BTreeMap::from([("default".to_string(), Vec::new())])],
            tags: vec![
                tag(
                    "Payments",
                    "Endpoints for initiating and processing payment transactions",
                ),
                tag(
                    "Transactions",
                    "Endpoints for checking transaction status and managing callbacks",
                ),
                tag(
                    "Wallets",
                    "Endpoints for managing merchant wallets and balances",
                ),
                tag(
                    "Withdraw Accounts",
                    "Endpoints for managing withdrawal account configurations",
                ),
                tag(
                    "Withdrawals",
                    "Endpoints for creating and managing withdrawal requests",
                ),
            ],
        }
    }
}

impl Default for Info {
    fn default() -> Self {
        Self {
            title: "WRPay - Secure Payments & Advanced Merchant Gateway API Documentation"
                .to_string(),
            description: Some(
                "Merchant-facing API for initiating payments, managing wallets, and automating withdrawals for IlonaPay."
                    .to_string(),
            ),
            version: "1.0.0".to_string(),
            license: Some(License {
                name: "Proprietary".to_string(),
                url: Some("https://ilonapay.com/terms".to_string()),
            }),
            logo: Some(Logo {
                url: "./assets/logo.png".to_string(),
                alt_text: Some("IlonaPay Logo".to_string()),
                background_color: Some("#FFFFFF".to_string()),
            }),
            dark_logo: Some(Logo {
                url: "./assets/logo-light.png".to_string(),
                alt_text: Some("IlonaPay Logo".to_string()),
                background_color: None,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn metadata_keys_keep_document_order() {
        let mapping = RootMetadata::default().to_mapping().unwrap();
        let keys: Vec<&str> = mapping.keys().filter_map(|k| k.as_str()).collect();

        assert_eq!(keys, vec!["openapi", "info", "servers", "security", "tags"]);
    }

    #[test]
    fn logo_extensions_use_vendor_keys() {
        let yaml = serde_yaml::to_string(&Info::default()).unwrap();

        assert!(yaml.contains("x-logo:"));
        assert!(yaml.contains("x-dark-logo:"));
        assert!(yaml.contains("altText: IlonaPay Logo"));
        assert!(yaml.contains("backgroundColor:"));
    }

    #[test]
    fn security_serializes_as_empty_scope_list() {
        let mapping = RootMetadata::default().to_mapping().unwrap();
        let scopes = mapping
            .get("security")
            .and_then(|v| v.get(0))
            .and_then(|v| v.get("default"))
            .and_then(|v| v.as_sequence())
            .unwrap();

        assert!(scopes.is_empty());
    }

    #[test]
    fn builds_component_references() {
        let components = component_refs(&ComponentRef::defaults());
        let keys: Vec<&str> = components.keys().filter_map(|k| k.as_str()).collect();

        assert_eq!(keys, vec!["securitySchemes", "responses", "schemas"]);

        let schemas = components
            .get("schemas")
            .and_then(|v| v.get("$ref"))
            .and_then(|v| v.as_str());
        assert_eq!(schemas, Some("./components/schemas.yaml#/schemas"));
    }

    #[test]
    fn partial_metadata_falls_back_to_defaults() {
        let metadata: RootMetadata = serde_yaml::from_str("openapi: 3.1.0\n").unwrap();

        assert_eq!(metadata.openapi, "3.1.0");
        assert_eq!(metadata.tags.len(), 5);
        assert_eq!(metadata.info.version, "1.0.0");
    }
}
