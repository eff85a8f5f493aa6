//! Filesystem path normalization.
//!
//! Concrete source identities and watcher events must agree on the exact
//! spelling of a path, otherwise a change to `shaders/common.glsl` would never
//! match the dependency recorded for it. Everything that turns a path into an
//! identity goes through [`normalize_path`].

use std::path::{Path, PathBuf};

/// Normalize a file system path to absolute form.
///
/// Tries `canonicalize()` first (resolves symlinks, `.`, `..`).
/// Falls back to:
/// - Return as-is if already absolute
/// - Join with current directory if relative
///
/// The fallback matters for removed files: a watcher reporting a deleted
/// path can no longer canonicalize it.
#[inline]
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

/// Resolve a configured path against a base directory.
///
/// Absolute paths are kept, relative ones are joined onto `base_dir`.
/// The result is normalized when it exists on disk.
///
/// # Example
/// ```ignore
/// // roots = ["shaders/"] in /project/hotshade.toml
/// let root = resolve_path(Path::new("shaders/"), Path::new("/project"));
/// assert_eq!(root, PathBuf::from("/project/shaders"));
/// ```
#[inline]
pub fn resolve_path(path: &Path, base_dir: &Path) -> PathBuf {
    if path.is_absolute() {
        return normalize_path(path);
    }
    normalize_path(&base_dir.join(path))
}

/// Check if path is a temp/backup file (editor artifacts).
///
/// Editors save through these, so they show up in watcher events right next to
/// the real source file.
pub fn is_temp_file(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    matches!(ext, "bck" | "bak" | "backup" | "swp" | "swo" | "tmp")
        || name.ends_with('~')
        || name.starts_with('.')
        // vim probes directory writability with this name
        || name == "4913"
}
