//! Title detection from first-page fragments.

use super::candidate::TitleCandidate;

/// Pick the document title from first-page candidates.
///
/// The two largest fragments are joined, which recovers a title that the
/// layout split across two runs of the same size.
pub fn detect_title(candidates: &[TitleCandidate]) -> String {
    let mut ranked: Vec<&TitleCandidate> = candidates.iter().collect();
    ranked.sort_by(|a, b| b.avg_font_size.total_cmp(&a.avg_font_size));

    match ranked.as_slice() {
        [] => String::new(),
        [only] => only.text.clone(),
        [first, second, ..] => format!("{} {}", first.text, second.text),
    }
}
