//! Parsing helpers for the catalog's free-form numeric fields.
//!
//! The catalog encodes absent data as the literal strings `"unknown"`
//! and `"n/a"`, and mixes units into otherwise numeric values
//! (`"1000km"`). Callers must treat sentinels as absent, never as zero
//! at the parse layer; the scoring code decides what absence means.

/// Parse the leading decimal number out of a raw catalog field.
///
/// Returns `None` for the `"unknown"` / `"n/a"` sentinels and for
/// values with no leading digit. Otherwise reads the longest
/// `digits[.digits]` prefix and ignores whatever trails it, so
/// `"1000km"` parses to 1000.0 and `"1,200"` parses to 1.0.
pub fn leading_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let lowered = trimmed.to_ascii_lowercase();
    if lowered == "unknown" || lowered == "n/a" || lowered == "none" {
        return None;
    }

    let mut end = 0;
    let mut seen_dot = false;
    for (idx, ch) in trimmed.char_indices() {
        if ch.is_ascii_digit() {
            end = idx + 1;
        } else if ch == '.' && !seen_dot && end == idx && end > 0 {
            seen_dot = true;
            end = idx + 1;
        } else {
            break;
        }
    }

    trimmed[..end].trim_end_matches('.').parse().ok()
}

/// Like [`leading_number`] but collapses absence to 0.0, matching the
/// ranking formula's "unknown contributes nothing" rule.
pub fn numeric_or_zero(raw: &str) -> f64 {
    leading_number(raw).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_integer() {
        assert_eq!(leading_number("172"), Some(172.0));
    }

    #[test]
    fn test_decimal() {
        assert_eq!(leading_number("1.5"), Some(1.5));
    }

    #[test]
    fn test_unknown_sentinel() {
        assert_eq!(leading_number("unknown"), None);
        assert_eq!(leading_number("Unknown"), None);
    }

    #[test]
    fn test_not_applicable_sentinel() {
        assert_eq!(leading_number("n/a"), None);
        assert_eq!(leading_number("N/A"), None);
    }

    #[test]
    fn test_empty() {
        assert_eq!(leading_number(""), None);
        assert_eq!(leading_number("   "), None);
    }

    #[test]
    fn test_trailing_unit() {
        assert_eq!(leading_number("1000km"), Some(1000.0));
    }

    #[test]
    fn test_comma_terminates() {
        // parseInt semantics: the comma ends the number
        assert_eq!(leading_number("1,200"), Some(1.0));
    }

    #[test]
    fn test_no_leading_digit() {
        assert_eq!(leading_number("fast"), None);
    }

    #[test]
    fn test_second_dot_terminates() {
        assert_eq!(leading_number("1.5.2"), Some(1.5));
    }

    #[test]
    fn test_trailing_dot() {
        assert_eq!(leading_number("30."), Some(30.0));
    }

    #[test]
    fn test_numeric_or_zero_collapses_absent() {
        assert_eq!(numeric_or_zero("unknown"), 0.0);
        assert_eq!(numeric_or_zero("75"), 75.0);
    }
}
