//! Snippet rendering module
//!
//! Converts a resolved location (`path:line:col:end_line:end_col`) into a
//! fragment of the surrounding source text. The request handler only sees the
//! `SnippetRenderer` trait; `FileSnippetRenderer` is the implementation backed
//! by the local filesystem.

mod file;
mod snippet;

pub use file::FileSnippetRenderer;
pub use snippet::{Snippet, SnippetLine};

use thiserror::Error;

/// Default number of lines shown around the requested range
pub const DEFAULT_CONTEXT_LINES: usize = 3;

/// Output format of a rendered snippet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Html,
    Text,
}

/// Options passed to the renderer on every call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub format: OutputFormat,
    /// Lines of context before and after the range
    pub context_lines: usize,
}

impl RenderOptions {
    pub const fn html(context_lines: usize) -> Self {
        Self {
            format: OutputFormat::Html,
            context_lines,
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::html(DEFAULT_CONTEXT_LINES)
    }
}

/// Rendering failures
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not valid UTF-8")]
    InvalidUtf8 { path: String },

    #[error("line {line} is out of range ({total} lines)")]
    LineOutOfRange { line: u32, total: usize },

    #[error("invalid range {0}")]
    InvalidRange(String),
}

/// Turns a location string into a rendered fragment
pub trait SnippetRenderer: Send + Sync {
    fn render(&self, location: &str, options: &RenderOptions) -> Result<String, RenderError>;
}
