//! Snippet extraction and formatting

use super::RenderError;
use crate::location::Location;
use std::fmt::Write;

/// A single source line inside a snippet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnippetLine {
    /// 1-based line number
    pub number: usize,
    pub text: String,
    /// Highlighted character range `[start, end)` within `text`
    pub highlight: Option<(usize, usize)>,
}

/// Lines selected around a location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    pub lines: Vec<SnippetLine>,
}

impl Snippet {
    /// Select the lines around `location` from `source`
    ///
    /// Columns are 1-based character offsets; the end column is exclusive.
    /// Without a line the first `2 * context + 1` lines are taken.
    pub fn extract(source: &str, location: &Location, context: usize) -> Result<Self, RenderError> {
        let all: Vec<&str> = source.lines().collect();
        let total = all.len();

        let Some(start_line) = location.line else {
            let last = total.min(context.saturating_mul(2).saturating_add(1));
            let lines = all[..last]
                .iter()
                .enumerate()
                .map(|(i, text)| SnippetLine {
                    number: i + 1,
                    text: (*text).to_string(),
                    highlight: None,
                })
                .collect();
            return Ok(Self { lines });
        };

        if start_line == 0 {
            return Err(RenderError::InvalidRange(location.to_string()));
        }
        let start = start_line as usize;
        if start > total {
            return Err(RenderError::LineOutOfRange {
                line: start_line,
                total,
            });
        }

        let end = location.end_line.map_or(start, |l| (l as usize).min(total));
        if end < start {
            return Err(RenderError::InvalidRange(location.to_string()));
        }

        let start_col = location.column.map_or(0, |c| (c as usize).saturating_sub(1));
        let end_col = location.end_column.map(|c| (c as usize).saturating_sub(1));

        let first = start.saturating_sub(context).max(1);
        let last = end.saturating_add(context).min(total);

        let lines = (first..=last)
            .map(|number| {
                let text = all[number - 1];
                let len = text.chars().count();
                let highlight = (start..=end).contains(&number).then(|| {
                    let from = if number == start { start_col.min(len) } else { 0 };
                    let to = match end_col {
                        Some(col) if number == end => col.min(len),
                        _ => len,
                    };
                    (from, to.max(from))
                });
                SnippetLine {
                    number,
                    text: text.to_string(),
                    highlight,
                }
            })
            .collect();

        Ok(Self { lines })
    }

    /// Render as an HTML fragment wrapped in a single `<div>`
    pub fn to_html(&self, file: &str) -> String {
        let mut html = format!(
            "<div class=\"source-fragment\" data-file=\"{}\">",
            escape_html(file)
        );
        for line in &self.lines {
            let class = if line.highlight.is_some() {
                "line highlighted"
            } else {
                "line"
            };
            let _ = write!(
                html,
                "\n<div class=\"{class}\" data-line=\"{n}\"><span class=\"line-number\">{n}</span><span class=\"line-content\">{content}</span></div>",
                n = line.number,
                content = line_content_html(line),
            );
        }
        html.push_str("\n</div>");
        html
    }

    /// Render as plain text, `>` marking highlighted lines
    pub fn to_text(&self) -> String {
        let width = self
            .lines
            .last()
            .map_or(1, |line| line.number.to_string().len());
        self.lines
            .iter()
            .map(|line| {
                let marker = if line.highlight.is_some() { '>' } else { ' ' };
                format!("{marker} {:>width$} | {}", line.number, line.text)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn line_content_html(line: &SnippetLine) -> String {
    let Some((from, to)) = line.highlight else {
        return escape_html(&line.text);
    };
    let text = line.text.as_str();
    let from = char_to_byte(text, from);
    let to = char_to_byte(text, to);

    let mut out = escape_html(&text[..from]);
    if to > from {
        let _ = write!(
            out,
            "<span class=\"highlight\">{}</span>",
            escape_html(&text[from..to])
        );
    }
    out.push_str(&escape_html(&text[to..]));
    out
}

/// Byte offset of the `index`-th character, or the string length
fn char_to_byte(s: &str, index: usize) -> usize {
    s.char_indices().nth(index).map_or(s.len(), |(b, _)| b)
}

/// Escape text for HTML element content and attribute values
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
