//! Heading plausibility filter.
//!
//! A candidate must look like a heading rather than body prose, a form
//! label, a URL, or a list item. Every rule is an independent veto.

use super::numbering::numbering;
use super::options::OutlineOptions;

/// Whether cleaned `text` could be a heading.
pub fn is_heading_candidate(text: &str, options: &OutlineOptions) -> bool {
    let lower = text.to_lowercase();
    if options
        .negative_keywords
        .iter()
        .any(|keyword| lower.contains(keyword.as_str()))
    {
        return false;
    }

    if text.ends_with('.') {
        return false;
    }

    // Digits are only allowed as a leading section number.
    let patterns = numbering();
    if patterns.has_digit(text) && !patterns.has_prefix(text) {
        return false;
    }

    if text.contains(',') {
        return false;
    }

    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() == 1 && words[0].chars().count() < options.min_single_word_chars {
        return false;
    }
    if words.len() > options.max_words {
        return false;
    }

    !options
        .bullet_markers
        .iter()
        .any(|marker| text.starts_with(marker.as_str()))
}
