//! Source fragment handler
//!
//! Reads the `loc` query parameter, resolves it under the base directory,
//! checks the file exists and answers with the rendered HTML fragment.

use crate::handler::resolve::{base_directory, resolve_location};
use crate::http;
use crate::location::strip_location_suffix;
use crate::render::{
    FileSnippetRenderer, RenderError, RenderOptions, SnippetRenderer, DEFAULT_CONTEXT_LINES,
};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Response, StatusCode, Uri};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Prefix of every failure message
pub const MESSAGE_PREFIX: &str = concat!("[", env!("CARGO_PKG_NAME"), "] ");

/// Name of the query parameter holding the location string
pub const LOC_PARAM: &str = "loc";

/// Construction-time options
#[derive(Debug, Clone)]
pub struct HandlerOptions {
    /// Base directory for path resolution; process working directory if unset
    pub cwd: Option<PathBuf>,
    /// Lines of context rendered around the requested range
    pub context_lines: usize,
}

impl Default for HandlerOptions {
    fn default() -> Self {
        Self {
            cwd: None,
            context_lines: DEFAULT_CONTEXT_LINES,
        }
    }
}

/// Request failures, each terminal for the request
#[derive(Debug, Error)]
pub enum FragmentError {
    #[error("Parameter missed: loc")]
    MissingParameter,

    #[error(
        "File not found: {} (base: {}, requested: {requested})",
        .resolved.display(),
        .base.display()
    )]
    NotFound {
        resolved: PathBuf,
        base: PathBuf,
        requested: String,
    },

    #[error("ERROR: {0}")]
    Render(#[from] RenderError),
}

impl FragmentError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::MissingParameter => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message sent to the client, prefix included
    pub fn message(&self) -> String {
        format!("{MESSAGE_PREFIX}{self}")
    }
}

/// Stateless request handler bound to a fixed base directory
pub struct SourceFragment {
    base: PathBuf,
    render_options: RenderOptions,
    renderer: Arc<dyn SnippetRenderer>,
}

impl SourceFragment {
    /// Create a handler rendering from the local filesystem
    pub fn new(options: HandlerOptions) -> io::Result<Self> {
        Self::with_renderer(options, Arc::new(FileSnippetRenderer::new()))
    }

    /// Create a handler with a custom renderer
    ///
    /// The base directory is resolved here once and never re-read.
    pub fn with_renderer(
        options: HandlerOptions,
        renderer: Arc<dyn SnippetRenderer>,
    ) -> io::Result<Self> {
        Ok(Self {
            base: base_directory(options.cwd.as_deref())?,
            render_options: RenderOptions::html(options.context_lines),
            renderer,
        })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base
    }

    /// Handle one request, producing the complete response
    ///
    /// Any method is served; `HEAD` gets the headers of the success response
    /// without its body.
    pub fn handle(&self, method: &Method, uri: &Uri) -> Response<Full<Bytes>> {
        match self.render_query(uri.query()) {
            Ok(html) => http::build_html_response(html, *method == Method::HEAD),
            Err(e) => http::build_failure_response(e.status(), e.message()),
        }
    }

    /// Parse, resolve, verify and render
    pub fn render_query(&self, query: Option<&str>) -> Result<String, FragmentError> {
        let requested = http::query_param(query, LOC_PARAM)
            .filter(|value| !value.is_empty())
            .ok_or(FragmentError::MissingParameter)?;

        let resolved = resolve_location(&self.base, &requested);
        let location = resolved.to_string_lossy().into_owned();

        if !Path::new(strip_location_suffix(&location)).exists() {
            return Err(FragmentError::NotFound {
                resolved,
                base: self.base.clone(),
                requested,
            });
        }

        Ok(self.renderer.render(&location, &self.render_options)?)
    }
}
