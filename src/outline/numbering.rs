//! Section numbering patterns ("2.", "2.1", "2.1.3").

use std::sync::OnceLock;

use regex::Regex;

use crate::model::HeadingLevel;

/// Compiled numbering patterns, shared by the filter and the classifier.
pub(crate) struct Numbering {
    digit: Regex,
    prefix: Regex,
    three_level: Regex,
    two_level: Regex,
    one_level: Regex,
}

/// Process-wide numbering patterns.
pub(crate) fn numbering() -> &'static Numbering {
    static NUMBERING: OnceLock<Numbering> = OnceLock::new();
    NUMBERING.get_or_init(|| Numbering {
        digit: Regex::new(r"\d").expect("digit pattern"),
        prefix: Regex::new(r"^\d+(\.\d+)*").expect("prefix pattern"),
        three_level: Regex::new(r"^\d+\.\d+\.\d+").expect("three-level pattern"),
        two_level: Regex::new(r"^\d+\.\d+").expect("two-level pattern"),
        one_level: Regex::new(r"^\d+\.").expect("one-level pattern"),
    })
}

impl Numbering {
    /// Whether the text contains any decimal digit.
    pub(crate) fn has_digit(&self, text: &str) -> bool {
        self.digit.is_match(text)
    }

    /// Whether the text starts with a numbering prefix.
    pub(crate) fn has_prefix(&self, text: &str) -> bool {
        self.prefix.is_match(text)
    }

    /// Level implied by the numbering prefix, deepest pattern first.
    pub(crate) fn level(&self, text: &str) -> Option<HeadingLevel> {
        if self.three_level.is_match(text) {
            Some(HeadingLevel::H3)
        } else if self.two_level.is_match(text) {
            Some(HeadingLevel::H2)
        } else if self.one_level.is_match(text) {
            Some(HeadingLevel::H1)
        } else {
            None
        }
    }
}
