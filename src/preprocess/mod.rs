//! Recursive `$include` expansion.
//!
//! Expands one stage entry point into the final text handed to the backend,
//! and records every source unit that was consumed on the way.
//!
//! ```text
//! basic.frag                       //$include "lib/light.glsl"
//! ├── $include "lib/light.glsl"    <contents of lib/light.glsl, expanded>
//! │   └── $include "common.glsl"   //$include_end file "basic.frag" line 0
//! └── $include "lib/common.glsl"   //$include "lib/common.glsl" (prevented double-include)
//! ```
//!
//! Every unit is included at most once per call: a second `$include` of the
//! same concrete source becomes a marker comment. The unit still counts as a
//! dependency, so editing it keeps triggering rebuilds.

mod directive;

use std::fmt;
use std::fmt::Write as _;

use rustc_hash::FxHashSet;

use crate::error::BuildError;
use crate::source::{INLINE_PREFIX, Resolved, SourceId, SourceProvider, strip_inline_prefix};
use crate::utils::path::{join_relative, normalize_name};
use directive::Directive;

/// Concrete identities a build consumed.
pub type DependencySet = FxHashSet<SourceId>;

/// Result of expanding one stage.
#[derive(Debug, Clone)]
pub struct Expansion {
    /// Final text with all includes spliced in
    pub text: String,
    /// Every unit touched while producing `text`, including the entry itself
    pub dependencies: DependencySet,
    /// Lines that were neutralized because their directive was not understood
    pub warnings: Vec<DirectiveWarning>,
}

/// A `$` line that was commented out instead of processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveWarning {
    pub unit: SourceId,
    /// 1-based line in `unit`
    pub line: usize,
    pub text: String,
}

impl fmt::Display for DirectiveWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown or invalid $directive in \"{}\" line {}: {}",
            self.unit, self.line, self.text
        )
    }
}

/// Expand the stage entry point `name`.
///
/// Fails if `name` or anything it includes cannot be resolved. Unknown
/// directives only degrade their own line.
pub fn expand(provider: &SourceProvider, name: &str) -> Result<Expansion, BuildError> {
    let entry = provider
        .resolve(name)?
        .ok_or_else(|| BuildError::SourceNotFound {
            path: strip_inline_prefix(name),
            requested_by: None,
        })?;

    let mut scanner = Scanner {
        provider,
        included: FxHashSet::default(),
        dependencies: DependencySet::default(),
        warnings: Vec::new(),
    };
    scanner.included.insert(entry.id.clone());
    scanner.dependencies.insert(entry.id.clone());

    let text = scanner.expand_unit(&normalize_name(name), entry)?;

    Ok(Expansion {
        text,
        dependencies: scanner.dependencies,
        warnings: scanner.warnings,
    })
}

/// State of one `expand` call.
struct Scanner<'a> {
    provider: &'a SourceProvider,
    /// Units already spliced into this stage
    included: FxHashSet<SourceId>,
    dependencies: DependencySet,
    warnings: Vec<DirectiveWarning>,
}

impl Scanner<'_> {
    /// Expand one unit. `name` is its virtual name, includes are relative to
    /// its directory.
    fn expand_unit(&mut self, name: &str, unit: Resolved) -> Result<String, BuildError> {
        let mut out = String::with_capacity(unit.content.len());

        // End markers carry the 0-based index of the directive line,
        // warnings and logs count from 1
        for (index, line) in unit.content.split_inclusive('\n').enumerate() {
            let line_number = index + 1;

            match Directive::parse(line) {
                Directive::Text => out.push_str(line),
                Directive::Include(path) => {
                    let target = include_target(name, path);
                    let included = self
                        .provider
                        .resolve(&target)
                        .map_err(|e| e.included_by(&unit.id))?
                        .ok_or_else(|| BuildError::SourceNotFound {
                            path: target.clone(),
                            requested_by: Some(unit.id.clone()),
                        })?;

                    self.dependencies.insert(included.id.clone());

                    if self.included.insert(included.id.clone()) {
                        crate::debug!("include"; "{} line {}: {}", unit.id, line_number, included.id);
                        let body = self.expand_unit(&target, included)?;

                        let _ = writeln!(out, "//$include \"{target}\"");
                        out.push_str(&body);
                        if !body.ends_with('\n') {
                            out.push('\n');
                        }
                        let _ = write!(out, "//$include_end file \"{name}\" line {index}");
                    } else {
                        let _ = write!(out, "//$include \"{target}\" (prevented double-include)");
                    }
                    out.push_str(line_ending(line));
                }
                Directive::Invalid => {
                    let warning = DirectiveWarning {
                        unit: unit.id.clone(),
                        line: line_number,
                        text: line.trim_end_matches(['\n', '\r']).trim().to_owned(),
                    };
                    crate::log!("include"; "{}", warning);
                    self.warnings.push(warning);

                    out.push_str("//");
                    out.push_str(line);
                }
            }
        }

        Ok(out)
    }
}

/// Virtual name an `$include` in `includer` refers to.
///
/// Paths are relative to the includer's directory, except explicit
/// `<inline>/` names which address the inline registry from anywhere.
fn include_target(includer: &str, path: &str) -> String {
    if path.starts_with(INLINE_PREFIX) {
        normalize_name(path)
    } else {
        join_relative(includer, path)
    }
}

/// Terminator of `line` (`\r\n`, `\n` or nothing for the last line).
fn line_ending(line: &str) -> &str {
    if line.ends_with("\r\n") {
        "\r\n"
    } else if line.ends_with('\n') {
        "\n"
    } else {
        ""
    }
}

#[cfg(test)]
mod tests;
