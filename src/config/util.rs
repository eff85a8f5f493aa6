//! Configuration utility functions.

use std::path::{Path, PathBuf};

/// Find config file by searching upward from `start`
///
/// Walks up parent directories until finding `config_name`.
/// Returns the absolute path to the config file if found.
///
/// # Example
/// ```text
/// /home/user/game/shaders/post/   ← start
/// /home/user/game/hotshade.toml   ← found!
/// ```
pub fn find_config_file(config_name: &Path, start: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }

    let mut current = Some(start);
    while let Some(dir) = current {
        let candidate = dir.join(config_name);
        if candidate.is_file() {
            return Some(candidate);
        }
        current = dir.parent();
    }

    None
}
