//! Heading and title classification.
//!
//! The pipeline runs once per document and keeps no state between runs:
//!
//! 1. [`clean_text`] trims fragments and rejects very short ones.
//! 2. [`CandidateSet`] routes large fragments to title candidates (first
//!    page) and heading candidates ([`is_heading_candidate`]).
//! 3. [`detect_title`] joins the two largest first-page fragments.
//! 4. [`FontThresholds`] derives H1/H2/H3 size thresholds from the largest
//!    heading candidate.
//! 5. [`build_outline`] orders, suppresses, dedups and classifies
//!    ([`determine_heading_level`]) the candidates.

mod builder;
mod candidate;
mod clean;
mod filter;
mod level;
mod numbering;
mod options;
mod stats;
mod title;

pub use builder::build_outline;
pub use candidate::{CandidateSet, HeadingCandidate, TextFragment, TitleCandidate};
pub use clean::clean_text;
pub use filter::is_heading_candidate;
pub use level::determine_heading_level;
pub use options::{OutlineOptions, DEFAULT_NEGATIVE_KEYWORDS};
pub use stats::FontThresholds;
pub use title::detect_title;

use crate::error::Result;
use crate::layout::LayoutSource;
use crate::model::DocumentOutline;

/// Classify the fragments of one document into a title and outline.
pub fn classify_fragments<'a, I>(fragments: I, options: &OutlineOptions) -> DocumentOutline
where
    I: IntoIterator<Item = &'a TextFragment>,
{
    classify_candidates(CandidateSet::collect(fragments, options), options)
}

/// Classify an already collected candidate set.
pub fn classify_candidates(candidates: CandidateSet, options: &OutlineOptions) -> DocumentOutline {
    let title = detect_title(&candidates.titles);

    let Some(thresholds) = FontThresholds::from_candidates(&candidates.headings, options) else {
        log::debug!("No heading candidates, title {:?}", title);
        return DocumentOutline::with_title(title);
    };

    log::debug!(
        "{} heading candidates, {} title candidates, thresholds h1={:.2} h2={:.2} h3={:.2}",
        candidates.headings.len(),
        candidates.titles.len(),
        thresholds.h1,
        thresholds.h2,
        thresholds.h3
    );

    build_outline(candidates.headings, &thresholds, title, options)
}

/// Lay out a document and classify its lines.
///
/// Each line becomes one fragment, sized by the mean of its glyph sizes.
pub fn classify_layout<S>(source: &S, options: &OutlineOptions) -> Result<DocumentOutline>
where
    S: LayoutSource + ?Sized,
{
    let mut candidates = CandidateSet::default();
    for (page_index, page) in source.pages()?.into_iter().enumerate() {
        for line in page.lines {
            let fragment = TextFragment {
                avg_font_size: line.avg_font_size(),
                text: line.text,
                page_index: page_index as u32,
            };
            candidates.push(&fragment, options);
        }
    }
    Ok(classify_candidates(candidates, options))
}
