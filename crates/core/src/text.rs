//! Text normalization shared by every place that accepts item input.

/// Whitespace as the legacy systems see it: Unicode whitespace plus the
/// ASCII information separators (U+001C..=U+001F).
pub fn is_legacy_whitespace(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

/// Strip legacy whitespace from both ends.
pub fn trim(s: &str) -> &str {
    s.trim_matches(is_legacy_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_information_separators() {
        assert_eq!(trim("\u{1c}AB12CD\u{1f}"), "AB12CD");
        assert_eq!(trim(" \t AB12CD \u{85}\u{a0}"), "AB12CD");
    }

    #[test]
    fn keeps_inner_characters() {
        assert_eq!(trim(" AB \u{1f} CD "), "AB \u{1f} CD");
        assert_eq!(trim("\u{1d}\u{1e}"), "");
    }
}
