//! HTTP handler that renders source snippets for `path:line:col` locations.
//!
//! `GET /any?loc=src/app.js:2:12:5:6` resolves `src/app.js` under a fixed
//! base directory (never above it), checks that it exists and answers with an
//! HTML fragment of the lines around the range. The handler can be mounted
//! under any route of the bundled hyper server or called directly through
//! [`SourceFragment::handle`].

pub mod config;
pub mod handler;
pub mod http;
pub mod location;
pub mod logger;
pub mod render;
pub mod server;

pub use handler::{FragmentError, HandlerOptions, SourceFragment, MESSAGE_PREFIX};
pub use location::{strip_location_suffix, Location};
pub use render::{FileSnippetRenderer, OutputFormat, RenderError, RenderOptions, SnippetRenderer};
