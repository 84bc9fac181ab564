//! Location string parsing
//!
//! A location string is a file path optionally followed by a line/column range:
//! `path[:line[:column[:end_line[:end_column]]]]`.

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Maximum number of trailing numeric groups that carry meaning
const MAX_NUMERIC_GROUPS: usize = 4;

fn suffix_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(:\d+)+$").expect("suffix pattern is valid"))
}

/// Strip every trailing `:<digits>` group in one step
///
/// `file.js:2:12:5:6` becomes `file.js`; a string without trailing groups is
/// returned unchanged.
pub fn strip_location_suffix(location: &str) -> &str {
    suffix_pattern()
        .find(location)
        .map_or(location, |m| &location[..m.start()])
}

/// Structured form of a location string
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Location {
    /// File path with the numeric suffix removed
    pub path: String,
    /// Start line (1-based)
    pub line: Option<u32>,
    /// Start column (1-based)
    pub column: Option<u32>,
    /// End line (1-based)
    pub end_line: Option<u32>,
    /// End column (1-based)
    pub end_column: Option<u32>,
}

impl Location {
    /// Parse a location string
    ///
    /// Up to four trailing numeric groups are consumed from the right. Any
    /// further groups, and groups too large for `u32`, stay in `path`.
    pub fn parse(input: &str) -> Self {
        let mut rest = input;
        let mut numbers = Vec::with_capacity(MAX_NUMERIC_GROUPS);

        while numbers.len() < MAX_NUMERIC_GROUPS {
            let Some((head, tail)) = rest.rsplit_once(':') else {
                break;
            };
            if tail.is_empty() || !tail.bytes().all(|b| b.is_ascii_digit()) {
                break;
            }
            let Ok(n) = tail.parse::<u32>() else {
                break;
            };
            numbers.push(n);
            rest = head;
        }

        numbers.reverse();
        let mut groups = numbers.into_iter();

        Self {
            path: rest.to_string(),
            line: groups.next(),
            column: groups.next(),
            end_line: groups.next(),
            end_column: groups.next(),
        }
    }

    /// Whether any line information is present
    pub const fn has_range(&self) -> bool {
        self.line.is_some()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path)?;
        for n in [self.line, self.column, self.end_line, self.end_column]
            .into_iter()
            .map_while(|n| n)
        {
            write!(f, ":{n}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_full_range() {
        assert_eq!(strip_location_suffix("file.js:2:12:5:6"), "file.js");
        assert_eq!(
            strip_location_suffix("/srv/app/test/fixture/script.js:2:12:5:6"),
            "/srv/app/test/fixture/script.js"
        );
    }

    #[test]
    fn test_strip_partial_range() {
        assert_eq!(strip_location_suffix("file.js:2"), "file.js");
        assert_eq!(strip_location_suffix("file.js:2:12"), "file.js");
    }

    #[test]
    fn test_strip_without_suffix() {
        assert_eq!(strip_location_suffix("file.js"), "file.js");
        assert_eq!(strip_location_suffix("dir/file"), "dir/file");
        assert_eq!(strip_location_suffix(""), "");
    }

    #[test]
    fn test_strip_only_trailing_groups() {
        assert_eq!(strip_location_suffix("a:b.js:3"), "a:b.js");
        assert_eq!(strip_location_suffix("file.js:2:x"), "file.js:2:x");
        assert_eq!(strip_location_suffix("file.js:"), "file.js:");
        // Every group goes, not just the last four
        assert_eq!(strip_location_suffix("f:1:2:3:4:5"), "f");
    }

    #[test]
    fn test_parse_full() {
        let loc = Location::parse("test/fixture/script.js:2:12:5:6");
        assert_eq!(loc.path, "test/fixture/script.js");
        assert_eq!(loc.line, Some(2));
        assert_eq!(loc.column, Some(12));
        assert_eq!(loc.end_line, Some(5));
        assert_eq!(loc.end_column, Some(6));
        assert!(loc.has_range());
    }

    #[test]
    fn test_parse_partial() {
        let loc = Location::parse("script.js:7");
        assert_eq!(loc.path, "script.js");
        assert_eq!(loc.line, Some(7));
        assert_eq!(loc.column, None);
        assert_eq!(loc.end_line, None);

        let loc = Location::parse("script.js");
        assert_eq!(loc.path, "script.js");
        assert!(!loc.has_range());
    }

    #[test]
    fn test_parse_extra_groups_stay_in_path() {
        let loc = Location::parse("a:1:2:3:4:5");
        assert_eq!(loc.path, "a:1");
        assert_eq!(loc.line, Some(2));
        assert_eq!(loc.end_column, Some(5));
    }

    #[test]
    fn test_parse_overflow_stays_in_path() {
        let loc = Location::parse("a.js:99999999999");
        assert_eq!(loc.path, "a.js:99999999999");
        assert_eq!(loc.line, None);
    }

    #[test]
    fn test_display() {
        let input = "src/main.rs:10:4:12:1";
        assert_eq!(Location::parse(input).to_string(), input);
        assert_eq!(Location::parse("src/main.rs:10").to_string(), "src/main.rs:10");
        assert_eq!(Location::parse("src/main.rs").to_string(), "src/main.rs");
    }
}
