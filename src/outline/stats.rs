//! Per-document font size thresholds.

use super::candidate::HeadingCandidate;
use super::options::OutlineOptions;

/// Font size thresholds for the three heading levels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontThresholds {
    /// Largest candidate font size
    pub max_size: f64,
    /// Minimum size for H1
    pub h1: f64,
    /// Minimum size for H2
    pub h2: f64,
    /// Minimum size for H3
    pub h3: f64,
}

impl FontThresholds {
    /// Derive thresholds from a maximum font size.
    pub fn from_max_size(max_size: f64, options: &OutlineOptions) -> Self {
        Self {
            max_size,
            h1: max_size * options.h1_ratio,
            h2: max_size * options.h2_ratio,
            h3: max_size * options.h3_ratio,
        }
    }

    /// Derive thresholds from the heading candidates of one document.
    ///
    /// Returns `None` for an empty candidate set.
    pub fn from_candidates(candidates: &[HeadingCandidate], options: &OutlineOptions) -> Option<Self> {
        let max_size = candidates
            .iter()
            .map(|c| c.avg_font_size)
            .max_by(|a, b| a.total_cmp(b))?;
        Some(Self::from_max_size(max_size, options))
    }
}
