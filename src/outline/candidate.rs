//! Fragments and the candidate sets derived from them.

use super::clean::clean_text;
use super::filter::is_heading_candidate;
use super::options::OutlineOptions;

/// A line of text with its mean glyph size, as produced by layout extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct TextFragment {
    /// Raw line text
    pub text: String,
    /// Mean glyph font size, 0 when the line has no glyphs
    pub avg_font_size: f64,
    /// 0-indexed page
    pub page_index: u32,
}

impl TextFragment {
    /// Create a new fragment.
    pub fn new(text: impl Into<String>, avg_font_size: f64, page_index: u32) -> Self {
        Self {
            text: text.into(),
            avg_font_size,
            page_index,
        }
    }
}

/// A large-font fragment on the first page.
#[derive(Debug, Clone, PartialEq)]
pub struct TitleCandidate {
    /// Cleaned text
    pub text: String,
    /// Mean glyph font size
    pub avg_font_size: f64,
}

/// A fragment that passed cleaning and the heading filter.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadingCandidate {
    /// Cleaned text, never empty
    pub text: String,
    /// Mean glyph font size
    pub avg_font_size: f64,
    /// 0-indexed page
    pub page_index: u32,
}

impl HeadingCandidate {
    /// Create a new heading candidate.
    pub fn new(text: impl Into<String>, avg_font_size: f64, page_index: u32) -> Self {
        Self {
            text: text.into(),
            avg_font_size,
            page_index,
        }
    }
}

/// Title and heading candidates of one document.
#[derive(Debug, Clone, Default)]
pub struct CandidateSet {
    /// First-page fragments large enough to be part of the title
    pub titles: Vec<TitleCandidate>,
    /// Fragments from any page that look like headings
    pub headings: Vec<HeadingCandidate>,
}

impl CandidateSet {
    /// Add one fragment, routing it to the title and/or heading candidates.
    pub fn push(&mut self, fragment: &TextFragment, options: &OutlineOptions) {
        let text = clean_text(&fragment.text, options.min_text_chars);
        if text.is_empty() || fragment.avg_font_size <= options.min_font_size {
            return;
        }

        if fragment.page_index == 0 {
            self.titles.push(TitleCandidate {
                text: text.to_string(),
                avg_font_size: fragment.avg_font_size,
            });
        }
        if is_heading_candidate(text, options) {
            self.headings.push(HeadingCandidate::new(
                text,
                fragment.avg_font_size,
                fragment.page_index,
            ));
        }
    }

    /// Collect candidates from fragments in extraction order.
    pub fn collect<'a, I>(fragments: I, options: &OutlineOptions) -> Self
    where
        I: IntoIterator<Item = &'a TextFragment>,
    {
        let mut set = Self::default();
        for fragment in fragments {
            set.push(fragment, options);
        }
        set
    }
}
