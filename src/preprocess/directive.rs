//! `$`-directive recognition.
//!
//! Directives live on their own line, the sigil is the first non-blank
//! character:
//!
//! ```glsl
//! $include "common/noise.glsl"
//!   $ include "lighting.glsl"
//! ```

use regex::Regex;
use std::sync::LazyLock;

/// First non-blank character is the directive sigil.
static SIGIL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[ \t]*\$").unwrap());

/// `$include "path"` with nothing but whitespace after the closing quote.
static INCLUDE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^[ \t]*\$[ \t]*include[ \t]*"([^"]*)"[ \t]*$"#).unwrap());

/// What a single source line turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Directive<'a> {
    /// Ordinary source text, passed through untouched
    Text,
    Include(&'a str),
    /// Starts with the sigil but is not a recognized directive
    Invalid,
}

impl<'a> Directive<'a> {
    /// Classify one line (the line terminator may still be attached).
    pub(super) fn parse(line: &'a str) -> Self {
        let line = line.trim_end_matches(['\n', '\r']);

        if !SIGIL.is_match(line) {
            return Self::Text;
        }

        match INCLUDE.captures(line).and_then(|caps| caps.get(1)) {
            Some(path) => Self::Include(path.as_str()),
            None => Self::Invalid,
        }
    }
}
