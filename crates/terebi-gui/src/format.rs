//! Display formatting helpers.

use chrono::{DateTime, Local, Utc};

/// Strip `<...>` tag sequences from a summary, leaving plain text.
///
/// A lone `<` with no closing `>` is kept literally. Idempotent on
/// already-plain strings.
pub fn strip_tags(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        match rest[open..].find('>') {
            Some(close) => rest = &rest[open + close + 1..],
            None => {
                out.push_str(&rest[open..]);
                return out;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Comment timestamp in the viewer's local timezone, day+minute
/// granularity, e.g. "May 1, 2024 10:30".
pub fn comment_timestamp(dt: &DateTime<Utc>) -> String {
    dt.with_timezone(&Local).format("%b %-d, %Y %H:%M").to_string()
}

/// Parenthesized year suffix for a search row, e.g. "(2008)".
pub fn year_suffix(year: Option<i32>) -> Option<String> {
    year.map(|y| format!("({y})"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_tags_removes_markup() {
        assert_eq!(strip_tags("<p>First episode</p>"), "First episode");
        assert_eq!(
            strip_tags("<b>Walter</b> meets <i>Jesse</i>"),
            "Walter meets Jesse"
        );
    }

    #[test]
    fn test_strip_tags_plain_text_is_noop() {
        let plain = "First episode";
        assert_eq!(strip_tags(plain), plain);
        // Idempotent: stripping twice changes nothing.
        assert_eq!(strip_tags(&strip_tags("<p>First episode</p>")), "First episode");
    }

    #[test]
    fn test_strip_tags_keeps_unclosed_bracket() {
        assert_eq!(strip_tags("2 < 3"), "2 < 3");
        assert_eq!(strip_tags("a <b"), "a <b");
    }

    #[test]
    fn test_strip_tags_empty() {
        assert_eq!(strip_tags(""), "");
    }

    #[test]
    fn test_year_suffix() {
        assert_eq!(year_suffix(Some(2008)).as_deref(), Some("(2008)"));
        assert_eq!(year_suffix(None), None);
    }
}
