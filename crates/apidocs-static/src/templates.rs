//! Template engine for the favicon head markup and the fallback page.

use minijinja::{context, Environment};

use crate::assets::ASSETS_URL_PREFIX;
use crate::options::RedocOptions;

/// Redoc standalone bundle loaded by the fallback page.
pub const REDOC_SCRIPT_URL: &str = "https://cdn.redoc.ly/redoc/latest/bundles/redoc.standalone.js";

/// A `<link>` tag in the document head.
#[derive(Debug, Clone, serde::Serialize)]
pub struct HeadLink {
    /// Link relation (`icon`, `apple-touch-icon`, `manifest`)
    pub rel: String,
    /// MIME type, if any
    pub mime: Option<String>,
    /// Icon dimensions, e.g. `32x32`
    pub sizes: Option<String>,
    /// Target URL
    pub href: String,
}

impl HeadLink {
    fn new(rel: &str, mime: Option<&str>, sizes: Option<&str>, file: &str) -> Self {
        Self {
            rel: rel.to_string(),
            mime: mime.map(str::to_string),
            sizes: sizes.map(str::to_string),
            href: format!("{}{}", ASSETS_URL_PREFIX, file),
        }
    }
}

/// Favicon and manifest links, identical on both build paths.
pub fn favicon_links() -> Vec<HeadLink> {
    vec![
        HeadLink::new("icon", Some("image/png"), None, "favicon.png"),
        HeadLink::new("icon", Some("image/png"), Some("32x32"), "favicon-32x32.png"),
        HeadLink::new("icon", Some("image/png"), Some("16x16"), "favicon-16x16.png"),
        HeadLink::new(
            "apple-touch-icon",
            None,
            Some("180x180"),
            "apple-touch-icon.png",
        ),
        HeadLink::new("manifest", None, None, "site.webmanifest"),
    ]
}

/// Context for the fallback page.
#[derive(Debug, Clone)]
pub struct FallbackContext<'a> {
    /// Page title
    pub title: &'a str,
    /// URL of the spec document, relative to `index.html`
    pub spec_url: &'a str,
    /// Redoc options
    pub options: &'a RedocOptions,
}

/// Errors that can occur while rendering templates.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("Template error: {0}")]
    Render(#[from] minijinja::Error),

    #[error("Failed to encode options: {0}")]
    Options(#[from] serde_json::Error),
}

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with the built-in templates.
    pub fn new() -> Self {
        let mut env = Environment::new();

        env.add_template("head_links.html", HEAD_LINKS_TEMPLATE)
            .expect("Failed to add head links template");
        env.add_template("fallback.html", FALLBACK_TEMPLATE)
            .expect("Failed to add fallback template");

        Self { env }
    }

    /// Render the favicon `<link>` tags.
    pub fn render_head_links(&self, links: &[HeadLink]) -> Result<String, TemplateError> {
        let tmpl = self.env.get_template("head_links.html")?;
        Ok(tmpl.render(context! { links => links })?)
    }

    /// Render the standalone Redoc page.
    pub fn render_fallback(&self, ctx: &FallbackContext<'_>) -> Result<String, TemplateError> {
        let head_links = self.render_head_links(&favicon_links())?;
        let options = ctx.options.to_json()?;
        let spec_url = serde_json::to_string(ctx.spec_url)?;

        let tmpl = self.env.get_template("fallback.html")?;
        Ok(tmpl.render(context! {
            title => ctx.title,
            head_links => head_links,
            script_url => REDOC_SCRIPT_URL,
            spec_url => spec_url,
            options => options,
        })?)
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

// Link attributes are trusted constants; `safe` keeps `/` in MIME types and URLs unescaped.
const HEAD_LINKS_TEMPLATE: &str = r##"{% for link in links -%}
<link rel="{{ link.rel | safe }}"{% if link.mime %} type="{{ link.mime | safe }}"{% endif %}{% if link.sizes %} sizes="{{ link.sizes | safe }}"{% endif %} href="{{ link.href | safe }}">
{% endfor %}"##;

const FALLBACK_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{{ title }}</title>
  {{ head_links | safe }}
  <style>
    body {
      margin: 0;
      padding: 0;
    }
  </style>
</head>
<body>
  <div id="redoc-container"></div>
  <script src="{{ script_url | safe }}"></script>
  <script>
    Redoc.init({{ spec_url | safe }}, {{ options | safe }}, document.getElementById('redoc-container'));
  </script>
</body>
</html>
"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_favicon_links() {
        let engine = TemplateEngine::new();

        let html = engine.render_head_links(&favicon_links()).unwrap();

        assert!(html.contains(
            r#"<link rel="icon" type="image/png" sizes="32x32" href="./assets/favicon-32x32.png">"#
        ));
        assert!(html.contains(
            r#"<link rel="apple-touch-icon" sizes="180x180" href="./assets/apple-touch-icon.png">"#
        ));
        assert!(html.contains(r#"<link rel="manifest" href="./assets/site.webmanifest">"#));
        assert!(!html.contains("&#x2f;"));
        assert_eq!(html.matches("<link").count(), 5);
    }

    #[test]
    fn renders_fallback_page() {
        let engine = TemplateEngine::new();
        let options = RedocOptions::default();

        let html = engine
            .render_fallback(&FallbackContext {
                title: "Payments API",
                spec_url: "./bundled.yaml",
                options: &options,
            })
            .unwrap();

        assert!(html.contains("<title>Payments API</title>"));
        assert!(html.contains(REDOC_SCRIPT_URL));
        assert!(html.contains(r#"Redoc.init("./bundled.yaml", {"#));
        assert!(html.contains("\"scrollYOffset\": 0"));
        assert!(html.contains("\"expandResponses\": \"200,201\""));
        assert!(html.contains("favicon-16x16.png"));
    }

    #[test]
    fn escapes_title() {
        let engine = TemplateEngine::new();
        let options = RedocOptions::default();

        let html = engine
            .render_fallback(&FallbackContext {
                title: "A <b> API",
                spec_url: "./openapi.yaml",
                options: &options,
            })
            .unwrap();

        assert!(html.contains("<title>A &lt;b&gt; API</title>"));
    }
}
