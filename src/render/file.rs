//! Filesystem-backed snippet renderer

use super::{OutputFormat, RenderError, RenderOptions, Snippet, SnippetRenderer};
use crate::location::Location;

/// Reads the file named by the location and renders the lines around it
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSnippetRenderer;

impl FileSnippetRenderer {
    pub const fn new() -> Self {
        Self
    }
}

impl SnippetRenderer for FileSnippetRenderer {
    fn render(&self, location: &str, options: &RenderOptions) -> Result<String, RenderError> {
        let location = Location::parse(location);

        let bytes = std::fs::read(&location.path).map_err(|source| RenderError::Io {
            path: location.path.clone(),
            source,
        })?;
        let source = String::from_utf8(bytes).map_err(|_| RenderError::InvalidUtf8 {
            path: location.path.clone(),
        })?;

        let snippet = Snippet::extract(&source, &location, options.context_lines)?;

        Ok(match options.format {
            OutputFormat::Html => snippet.to_html(&location.path),
            OutputFormat::Text => snippet.to_text(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(content: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file
    }

    #[test]
    fn test_render_html() {
        let file = write_temp(b"const a = 1;\nconst b = 2;\nconst c = 3;\n");
        let location = format!("{}:2:7:2:8", file.path().display());
        let html = FileSnippetRenderer::new()
            .render(&location, &RenderOptions::default())
            .unwrap();
        assert!(html.starts_with("<div "));
        assert!(html.ends_with("</div>"));
        assert!(html.contains("const <span class=\"highlight\">b</span> = 2;"));
    }

    #[test]
    fn test_render_text() {
        let file = write_temp(b"one\ntwo\nthree\n");
        let location = format!("{}:3", file.path().display());
        let options = RenderOptions {
            format: OutputFormat::Text,
            context_lines: 1,
        };
        let text = FileSnippetRenderer::new().render(&location, &options).unwrap();
        assert_eq!(text, "  2 | two\n> 3 | three");
    }

    #[test]
    fn test_render_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let location = format!("{}/missing.js:1", dir.path().display());
        let err = FileSnippetRenderer::new()
            .render(&location, &RenderOptions::default())
            .unwrap_err();
        assert!(matches!(err, RenderError::Io { .. }));
        assert!(err.to_string().starts_with("cannot read "));
    }

    #[test]
    fn test_render_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let location = dir.path().display().to_string();
        let result = FileSnippetRenderer::new().render(&location, &RenderOptions::default());
        assert!(matches!(result, Err(RenderError::Io { .. })));
    }

    #[test]
    fn test_render_invalid_utf8() {
        let file = write_temp(&[0xff, 0xfe, 0x00, b'\n']);
        let location = format!("{}:1", file.path().display());
        let result = FileSnippetRenderer::new().render(&location, &RenderOptions::default());
        assert!(matches!(result, Err(RenderError::InvalidUtf8 { .. })));
    }
}
