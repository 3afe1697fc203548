//! Static API documentation builder.
//!
//! Renders a merged OpenAPI document to `index.html` with an external Redoc
//! tool, falling back to a standalone Redoc page when the tool fails, and
//! generates the favicon set referenced by both.

pub mod assets;
pub mod builder;
pub mod favicons;
pub mod options;
pub mod renderer;
pub mod templates;

pub use builder::{BuildConfig, BuildError, BuildResult, BuildVia, StaticBuilder};
pub use favicons::{FaviconConfig, FaviconError, FaviconGenerator, FaviconReport};
pub use options::RedocOptions;
pub use renderer::{
    CommandRenderer, DocsRenderer, ExternalTool, RenderError, RenderRequest, ToolError,
};
