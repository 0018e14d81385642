//! Outline assembly: ordering, suppression, dedup, title reconciliation.

use std::collections::HashSet;

use super::candidate::HeadingCandidate;
use super::level::determine_heading_level;
use super::options::OutlineOptions;
use super::stats::FontThresholds;
use crate::model::{DocumentOutline, HeadingEntry};

/// Build the outline of one document from its heading candidates.
///
/// `title` is the detected title. A candidate with the same text is kept
/// only as the first heading, in which case the title is cleared; anywhere
/// else it is skipped.
///
/// A title-equal candidate after the first entry is dropped and the title
/// kept, so the title is only cleared when it opens the outline.
pub fn build_outline(
    mut candidates: Vec<HeadingCandidate>,
    thresholds: &FontThresholds,
    title: String,
    options: &OutlineOptions,
) -> DocumentOutline {
    // Document order: page first, larger fonts first within a page.
    candidates.sort_by(|a, b| {
        a.page_index
            .cmp(&b.page_index)
            .then_with(|| b.avg_font_size.total_cmp(&a.avg_font_size))
    });

    // NOTE: only the first two candidates are compared, but every candidate
    // after the first is suppressed.
    let dominant_only = candidates.len() > 1
        && candidates[0].avg_font_size >= options.dominant_ratio * candidates[1].avg_font_size;
    if dominant_only {
        log::debug!(
            "Dominant heading {:?} ({:.1}pt), suppressing {} other candidates",
            candidates[0].text,
            candidates[0].avg_font_size,
            candidates.len() - 1
        );
    }

    let mut outline = Vec::new();
    let mut added: HashSet<&str> = HashSet::new();

    for (idx, candidate) in candidates.iter().enumerate() {
        if dominant_only && idx > 0 {
            continue;
        }
        if idx > 0 && is_shouted_single_word(&candidate.text) {
            continue;
        }
        let text = candidate.text.as_str();
        if added.contains(text) {
            continue;
        }
        // A title match may only open the outline; the title yields below.
        if text == title && !outline.is_empty() {
            continue;
        }

        if let Some(level) = determine_heading_level(text, candidate.avg_font_size, thresholds) {
            outline.push(HeadingEntry::new(level, text, candidate.page_index));
            added.insert(text);
        }
    }

    let title = match outline.first() {
        Some(first) if first.text == title => String::new(),
        _ => title,
    };

    DocumentOutline { title, outline }
}

/// A single word with cased letters, none of them lower case.
fn is_shouted_single_word(text: &str) -> bool {
    let mut words = text.split_whitespace();
    if words.next().is_none() || words.next().is_some() {
        return false;
    }
    text.chars().any(char::is_uppercase) && !text.chars().any(char::is_lowercase)
}
