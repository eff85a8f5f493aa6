//! Virtual source names.
//!
//! A virtual name is the `/`-separated string a program or an `$include`
//! directive uses to refer to a source unit, e.g. `post/blur.frag` or
//! `common/noise.glsl`. It is resolved later against the inline registry or
//! the filesystem roots, so everything here is purely lexical.

/// Normalize a virtual name lexically.
///
/// - `\` is treated as a separator, like `/`
/// - empty and `.` components are dropped
/// - `..` pops the previous component; leading `..` that cannot be popped are
///   kept so that names can still climb above a search root
///
/// ```ignore
/// assert_eq!(normalize_name("lib/./../common.glsl"), "common.glsl");
/// assert_eq!(normalize_name("../shared/a.glsl"), "../shared/a.glsl");
/// ```
pub fn normalize_name(name: &str) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for part in name.split(['/', '\\']) {
        match part {
            "" | "." => {}
            ".." => match parts.last() {
                Some(&last) if last != ".." => {
                    parts.pop();
                }
                _ => parts.push(".."),
            },
            _ => parts.push(part),
        }
    }
    parts.join("/")
}

/// Directory part of a virtual name, including the trailing separator.
///
/// `shaders/blur.vert` → `shaders/`, `blur.vert` → ``.
pub fn parent_dir(name: &str) -> &str {
    name.rfind(['/', '\\']).map_or("", |pos| &name[..=pos])
}

/// Resolve `include` relative to the directory of `includer`.
pub fn join_relative(includer: &str, include: &str) -> String {
    normalize_name(&format!("{}{}", parent_dir(includer), include))
}
