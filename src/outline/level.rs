//! Heading level classification.

use super::numbering::numbering;
use super::stats::FontThresholds;
use crate::model::HeadingLevel;

/// Assign a heading level to a candidate.
///
/// A numbering prefix always wins over font size, even when the numbered
/// fragment is set in a small font. Without numbering, the size is compared
/// against the document thresholds; `None` drops the candidate.
pub fn determine_heading_level(
    text: &str,
    size: f64,
    thresholds: &FontThresholds,
) -> Option<HeadingLevel> {
    if let Some(level) = numbering().level(text) {
        return Some(level);
    }

    if size >= thresholds.h1 {
        Some(HeadingLevel::H1)
    } else if size >= thresholds.h2 {
        Some(HeadingLevel::H2)
    } else if size >= thresholds.h3 {
        Some(HeadingLevel::H3)
    } else {
        None
    }
}
