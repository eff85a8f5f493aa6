//! Pluralization for log lines.

/// `"s"` unless `n == 1`.
#[inline]
pub fn plural_s(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// Format count with noun, handling pluralization
///
/// - `plural_count(0, "program")` -> `"0 programs"`
/// - `plural_count(1, "source")` -> `"1 source"`
#[inline]
pub fn plural_count(count: usize, noun: &str) -> String {
    format!("{} {}{}", count, noun, plural_s(count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural_count() {
        assert_eq!(plural_count(0, "program"), "0 programs");
        assert_eq!(plural_count(1, "program"), "1 program");
        assert_eq!(plural_count(3, "root"), "3 roots");
    }
}
