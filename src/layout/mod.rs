//! Layout extraction: pages of text lines with per-glyph font sizes.
//!
//! Classification only sees a document through [`LayoutSource`]. The PDF
//! implementation is [`PdfLayout`]; an in-memory `Vec<PageLayout>` is a
//! source too, which is how tests and callers with their own extractor feed
//! the classifier.

mod backend;
mod extractor;
mod options;

pub use backend::{ContentOp, LopdfBackend, PageId, PdfBackend, PdfValue};
pub use extractor::{PdfLayout, TextSpan};
pub use options::{ErrorMode, LayoutOptions};

use crate::error::Result;

/// A rendered character and the font size it was drawn at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glyph {
    /// The character
    pub ch: char,
    /// Effective font size in points
    pub size: f32,
}

/// One line of text on a page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutLine {
    /// Line text, including inserted word spaces
    pub text: String,
    /// Drawn glyphs; inserted spaces have none
    pub glyphs: Vec<Glyph>,
}

impl LayoutLine {
    /// Create a line whose every character was drawn at `size`.
    pub fn uniform(text: impl Into<String>, size: f32) -> Self {
        let text = text.into();
        let glyphs = text.chars().map(|ch| Glyph { ch, size }).collect();
        Self { text, glyphs }
    }

    /// Mean glyph size, 0 for a line without glyphs.
    pub fn avg_font_size(&self) -> f64 {
        if self.glyphs.is_empty() {
            return 0.0;
        }
        let total: f64 = self.glyphs.iter().map(|g| f64::from(g.size)).sum();
        total / self.glyphs.len() as f64
    }
}

/// The text lines of one page, top to bottom.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    /// Lines in reading order
    pub lines: Vec<LayoutLine>,
}

impl PageLayout {
    /// Create a page from lines.
    pub fn new(lines: Vec<LayoutLine>) -> Self {
        Self { lines }
    }
}

/// Anything that can lay out a document as pages of lines.
pub trait LayoutSource {
    /// Lay out every page, in document order (page 0 first).
    fn pages(&self) -> Result<Vec<PageLayout>>;
}

impl LayoutSource for [PageLayout] {
    fn pages(&self) -> Result<Vec<PageLayout>> {
        Ok(self.to_vec())
    }
}

impl LayoutSource for Vec<PageLayout> {
    fn pages(&self) -> Result<Vec<PageLayout>> {
        Ok(self.clone())
    }
}
