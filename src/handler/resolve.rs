//! Path resolution module
//!
//! Turns an untrusted location string into an absolute path under the base
//! directory. Pure path manipulation, no filesystem access.

use std::io;
use std::path::{Component, Path, PathBuf};

/// Segments of `raw` after treating it as rooted at `/`
///
/// Empty and `.` segments are dropped; `..` removes the previous segment and
/// is discarded at the root.
fn rooted_segments(raw: &str) -> Vec<&str> {
    let mut segments: Vec<&str> = Vec::new();
    for segment in raw.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments
}

/// Re-root an untrusted path at the filesystem root
///
/// `../../etc/passwd` becomes `/etc/passwd`, `/a/./b/../c` becomes `/a/c`.
pub fn force_root(raw: &str) -> PathBuf {
    let mut rooted = PathBuf::from("/");
    for segment in rooted_segments(raw) {
        rooted.push(segment);
    }
    rooted
}

/// Resolve a location string against the base directory
///
/// The raw value is re-rooted first and only then joined onto `base`, so the
/// result never leaves `base` whatever `..` segments the value holds. The
/// location suffix (`:line:col...`) is carried along untouched.
pub fn resolve_location(base: &Path, raw: &str) -> PathBuf {
    let mut resolved = base.to_path_buf();
    for segment in rooted_segments(raw) {
        resolved.push(segment);
    }
    resolved
}

/// Lexically normalize a path, resolving `.` and `..` without touching disk
pub fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::Normal(_) => {
                normalized.push(component.as_os_str());
            }
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
        }
    }
    normalized
}

/// Compute the absolute base directory
///
/// A relative `cwd` is taken relative to the process working directory;
/// no `cwd` means the process working directory itself.
pub fn base_directory(cwd: Option<&Path>) -> io::Result<PathBuf> {
    let process_cwd = std::env::current_dir()?;
    let base = match cwd {
        Some(dir) if dir.is_absolute() => dir.to_path_buf(),
        Some(dir) => process_cwd.join(dir),
        None => process_cwd,
    };
    Ok(normalize(&base))
}
