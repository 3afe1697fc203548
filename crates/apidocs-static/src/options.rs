//! Redoc display options shared by the tool build and the fallback page.

use serde::{Deserialize, Serialize};

/// Redoc configuration object.
///
/// Serialized as-is into the fallback page's `Redoc.init` call and into the
/// `theme.openapi` section of the Redocly config handed to the external tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RedocOptions {
    pub scroll_y_offset: u32,
    pub hide_download_button: bool,
    pub theme: Theme,
    pub menu_toggle: bool,
    pub native_scrollbars: bool,
    pub hide_hostname: bool,
    pub path_in_middle_panel: bool,
    pub required_props_first: bool,
    pub sort_props_alphabetically: bool,
    pub sort_operations_alphabetically: bool,
    pub sort_tags_alphabetically: bool,
    pub payload_sample_idx: u32,
    pub json_sample_expand_level: u32,
    pub hide_single_request_sample_tab: bool,
    /// Comma-separated response codes expanded by default
    pub expand_responses: String,
    pub hide_schema_pattern: bool,
    pub generated_payload_samples_max_depth: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub colors: Colors,
    pub typography: Typography,
    pub sidebar: Sidebar,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Colors {
    pub primary: PrimaryColor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrimaryColor {
    pub main: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Typography {
    pub font_size: String,
    pub font_family: String,
    pub code: CodeTypography,
    pub headings: Headings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CodeTypography {
    pub font_size: String,
    pub font_family: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Headings {
    pub font_family: String,
    pub font_weight: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Sidebar {
    pub background_color: String,
}

const SANS_STACK: &str = "Inter, system-ui, -apple-system, sans-serif";
const MONO_STACK: &str = "Monaco, Consolas, \"Courier New\", monospace";

impl Default for RedocOptions {
    fn default() -> Self {
        Self {
            scroll_y_offset: 0,
            hide_download_button: false,
            theme: Theme::default(),
            menu_toggle: true,
            native_scrollbars: true,
            hide_hostname: false,
            path_in_middle_panel: true,
            required_props_first: true,
            sort_props_alphabetically: false,
            sort_operations_alphabetically: false,
            sort_tags_alphabetically: true,
            payload_sample_idx: 0,
            json_sample_expand_level: 2,
            hide_single_request_sample_tab: false,
            expand_responses: "200,201".to_string(),
            hide_schema_pattern: false,
            generated_payload_samples_max_depth: 10,
        }
    }
}

impl Default for PrimaryColor {
    fn default() -> Self {
        Self {
            main: "#32329f".to_string(),
        }
    }
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            font_size: "14px".to_string(),
            font_family: SANS_STACK.to_string(),
            code: CodeTypography::default(),
            headings: Headings::default(),
        }
    }
}

impl Default for CodeTypography {
    fn default() -> Self {
        Self {
            font_size: "13px".to_string(),
            font_family: MONO_STACK.to_string(),
        }
    }
}

impl Default for Headings {
    fn default() -> Self {
        Self {
            font_family: SANS_STACK.to_string(),
            font_weight: "600".to_string(),
        }
    }
}

impl Default for Sidebar {
    fn default() -> Self {
        Self {
            background_color: "#fafafa".to_string(),
        }
    }
}

/// Redocly CLI config file wrapping the options under `theme.openapi`.
#[derive(Serialize)]
struct RedoclyConfig<'a> {
    theme: RedoclyTheme<'a>,
}

#[derive(Serialize)]
struct RedoclyTheme<'a> {
    openapi: &'a RedocOptions,
}

impl RedocOptions {
    /// Pretty JSON for embedding in a `<script>` block.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// YAML content of a Redocly config file carrying these options.
    pub fn to_redocly_config(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(&RedoclyConfig {
            theme: RedoclyTheme { openapi: self },
        })
    }
}
