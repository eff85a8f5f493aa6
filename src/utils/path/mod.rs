//! Path and virtual-name utilities.
//!
//! Pure functions for path manipulation. No side effects.
//!
//! - [`fs`]: Filesystem path normalization (`normalize_path`, `resolve_path`, `is_temp_file`)
//! - [`name`]: Virtual source names (`join_relative`, `parent_dir`, `normalize_name`)

pub mod fs;
pub mod name;

pub use fs::{is_temp_file, normalize_path, resolve_path};
pub use name::{join_relative, normalize_name, parent_dir};
