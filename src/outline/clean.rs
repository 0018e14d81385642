//! Fragment text normalization.

/// Trim `raw` and reject it when fewer than `min_chars` characters remain.
///
/// Returns the trimmed text, or an empty string for a rejected fragment.
pub fn clean_text(raw: &str, min_chars: usize) -> &str {
    let text = raw.trim();
    if text.is_empty() || text.chars().count() < min_chars {
        return "";
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_trims_whitespace() {
        assert_eq!(clean_text("  Introduction \n", 3), "Introduction");
    }

    #[test]
    fn test_clean_rejects_short_text() {
        assert_eq!(clean_text("", 3), "");
        assert_eq!(clean_text("   ", 3), "");
        assert_eq!(clean_text(" ab ", 3), "");
        assert_eq!(clean_text("abc", 3), "abc");
    }

    #[test]
    fn test_clean_counts_characters_not_bytes() {
        // Two characters, six bytes
        assert_eq!(clean_text("概要", 3), "");
        assert_eq!(clean_text("目次案", 3), "目次案");
    }
}
