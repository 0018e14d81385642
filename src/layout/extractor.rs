//! Content-stream text extraction.
//!
//! Interprets the text operators of each page to recover spans of text with
//! their position and effective font size, then groups spans sharing a
//! baseline into lines.

use std::path::Path;

use unicode_normalization::UnicodeNormalization;

use super::backend::{ContentOp, LopdfBackend, PageId, PdfBackend, PdfValue};
use super::options::{ErrorMode, LayoutOptions};
use super::{Glyph, LayoutLine, LayoutSource, PageLayout};
use crate::error::{Error, Result};

/// TJ adjustments beyond this many thousandths of an em read as a word gap.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// Approximate glyph advance as a fraction of the font size.
const AVG_GLYPH_WIDTH: f32 = 0.5;

/// A run of text drawn with one font at one position.
#[derive(Debug, Clone)]
pub struct TextSpan {
    /// The text content
    pub text: String,
    /// Glyphs drawn for this span
    pub glyphs: Vec<Glyph>,
    /// X position (left edge)
    pub x: f32,
    /// Y position (baseline)
    pub y: f32,
    /// Estimated width
    pub width: f32,
    /// Effective font size in points
    pub font_size: f32,
}

impl TextSpan {
    /// Create a span whose every character is a glyph at `font_size`.
    pub fn new(text: impl Into<String>, x: f32, y: f32, font_size: f32) -> Self {
        let text = text.into();
        let glyphs: Vec<Glyph> = text
            .chars()
            .map(|ch| Glyph {
                ch,
                size: font_size,
            })
            .collect();
        let width = glyphs.len() as f32 * font_size * AVG_GLYPH_WIDTH;
        Self {
            text,
            glyphs,
            x,
            y,
            width,
            font_size,
        }
    }
}

/// Page layouts read from a PDF through a [`PdfBackend`].
pub struct PdfLayout<B: PdfBackend = LopdfBackend> {
    backend: B,
    options: LayoutOptions,
}

impl PdfLayout<LopdfBackend> {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P, options: LayoutOptions) -> Result<Self> {
        Ok(Self::new(LopdfBackend::load_file(path)?, options))
    }

    /// Read a PDF from memory.
    pub fn from_bytes(data: &[u8], options: LayoutOptions) -> Result<Self> {
        Ok(Self::new(LopdfBackend::load_bytes(data)?, options))
    }
}

impl<B: PdfBackend> PdfLayout<B> {
    /// Wrap a backend.
    pub fn new(backend: B, options: LayoutOptions) -> Self {
        Self { backend, options }
    }

    /// Extract the lines of one page.
    pub fn page_lines(&self, page: PageId) -> Result<Vec<LayoutLine>> {
        let content = self.backend.page_content(page)?;
        let ops = self.backend.decode_content(&content)?;
        let spans = self.extract_spans(page, &ops);
        let span_count = spans.len();
        let mut lines = group_spans_into_lines(spans);

        if self.options.normalize_unicode {
            for line in &mut lines {
                line.text = line.text.nfkc().collect();
            }
        }

        log::debug!(
            "Page {:?}: {} spans grouped into {} lines",
            page,
            span_count,
            lines.len()
        );
        Ok(lines)
    }

    /// Run the text operators of a page and collect the drawn spans.
    fn extract_spans(&self, page: PageId, ops: &[ContentOp]) -> Vec<TextSpan> {
        let mut state = TextState::default();
        let mut spans = Vec::new();

        for op in ops {
            match op.operator.as_str() {
                "q" => state.saved_ctm.push(state.ctm),
                "Q" => {
                    if let Some(ctm) = state.saved_ctm.pop() {
                        state.ctm = ctm;
                    }
                }
                "cm" if op.operands.len() >= 6 => {
                    state.ctm = Matrix::from_op(op).multiply(&state.ctm);
                }
                "BT" => {
                    state.in_text = true;
                    state.tm = Matrix::IDENTITY;
                    state.tlm = Matrix::IDENTITY;
                }
                "ET" => state.in_text = false,
                "Tf" if op.operands.len() >= 2 => {
                    if let PdfValue::Name(name) = &op.operands[0] {
                        state.font_name = name.clone();
                    }
                    state.font_size = op.number(1, 12.0);
                }
                "TL" => state.leading = op.number(0, 0.0),
                "Td" => state.move_line(op.number(0, 0.0), op.number(1, 0.0)),
                "TD" => {
                    let ty = op.number(1, 0.0);
                    state.leading = -ty;
                    state.move_line(op.number(0, 0.0), ty);
                }
                "Tm" if op.operands.len() >= 6 => {
                    state.tm = Matrix::from_op(op);
                    state.tlm = state.tm;
                }
                "T*" => state.next_line(),
                "Tj" | "TJ" | "'" | "\"" if state.in_text => {
                    if op.operator == "'" || op.operator == "\"" {
                        state.next_line();
                    }
                    let span = match op.operator.as_str() {
                        "TJ" => self.show_array(page, &mut state, op.operands.first()),
                        "\"" => self.show_string(page, &mut state, op.operands.get(2)),
                        _ => self.show_string(page, &mut state, op.operands.first()),
                    };
                    if let Some(span) = span {
                        spans.push(span);
                    }
                }
                _ => {}
            }
        }

        spans
    }

    fn show_string(
        &self,
        page: PageId,
        state: &mut TextState,
        operand: Option<&PdfValue>,
    ) -> Option<TextSpan> {
        let Some(PdfValue::Str(bytes)) = operand else {
            return None;
        };
        let text = self.backend.decode_text(page, &state.font_name, bytes);
        let mut run = SpanBuilder::new(state);
        run.push_text(&text);
        run.finish(state)
    }

    fn show_array(
        &self,
        page: PageId,
        state: &mut TextState,
        operand: Option<&PdfValue>,
    ) -> Option<TextSpan> {
        let Some(PdfValue::Array(items)) = operand else {
            return None;
        };
        let mut run = SpanBuilder::new(state);
        for item in items {
            match item {
                PdfValue::Str(bytes) => {
                    let text = self.backend.decode_text(page, &state.font_name, bytes);
                    run.push_text(&text);
                }
                // Negative adjustments move right; large ones are word gaps.
                other => {
                    if let Some(adjustment) = other.as_number() {
                        run.adjust(-adjustment);
                    }
                }
            }
        }
        run.finish(state)
    }
}

impl<B: PdfBackend> LayoutSource for PdfLayout<B> {
    fn pages(&self) -> Result<Vec<PageLayout>> {
        let page_ids = self.backend.pages();
        let mut pages = Vec::with_capacity(page_ids.len());

        for (index, page) in page_ids.into_iter().enumerate() {
            match self.page_lines(page) {
                Ok(lines) => pages.push(PageLayout::new(lines)),
                Err(e) if self.options.error_mode == ErrorMode::Lenient => {
                    log::warn!("Skipping page {}: {}", index, e);
                    pages.push(PageLayout::default());
                }
                Err(e) => {
                    return Err(Error::TextExtract {
                        page: index as u32,
                        message: e.to_string(),
                    })
                }
            }
        }

        Ok(pages)
    }
}

/// Accumulates one text-showing operation into a span.
struct SpanBuilder {
    text: String,
    glyphs: Vec<Glyph>,
    advance: f32,
    font_size: f32,
    origin: Matrix,
}

impl SpanBuilder {
    fn new(state: &TextState) -> Self {
        Self {
            text: String::new(),
            glyphs: Vec::new(),
            advance: 0.0,
            font_size: state.font_size,
            origin: state.tm.multiply(&state.ctm),
        }
    }

    fn push_text(&mut self, text: &str) {
        let size = self.font_size.abs() * self.origin.vertical_scale();
        for ch in text.chars() {
            self.text.push(ch);
            self.glyphs.push(Glyph { ch, size });
        }
        self.advance += text.chars().count() as f32 * self.font_size.abs() * AVG_GLYPH_WIDTH;
    }

    /// Apply a TJ adjustment, in thousandths of an em (positive moves right).
    fn adjust(&mut self, thousandths: f32) {
        self.advance += thousandths / 1000.0 * self.font_size.abs();
        if thousandths > TJ_SPACE_THRESHOLD
            && !self.text.is_empty()
            && !self.text.ends_with(char::is_whitespace)
            && !self
                .text
                .chars()
                .last()
                .map(is_spaceless_script_char)
                .unwrap_or(false)
        {
            self.text.push(' ');
        }
    }

    fn finish(self, state: &mut TextState) -> Option<TextSpan> {
        state.tm = Matrix::translation(self.advance, 0.0).multiply(&state.tm);

        if self.text.trim().is_empty() {
            return None;
        }
        Some(TextSpan {
            width: self.advance * self.origin.horizontal_scale(),
            font_size: self.font_size.abs() * self.origin.vertical_scale(),
            x: self.origin.e,
            y: self.origin.f,
            text: self.text,
            glyphs: self.glyphs,
        })
    }
}

/// Text and graphics state tracked while interpreting a content stream.
#[derive(Debug, Clone)]
struct TextState {
    in_text: bool,
    font_name: Vec<u8>,
    font_size: f32,
    leading: f32,
    tm: Matrix,
    tlm: Matrix,
    ctm: Matrix,
    saved_ctm: Vec<Matrix>,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            in_text: false,
            font_name: Vec::new(),
            font_size: 12.0,
            leading: 0.0,
            tm: Matrix::IDENTITY,
            tlm: Matrix::IDENTITY,
            ctm: Matrix::IDENTITY,
            saved_ctm: Vec::new(),
        }
    }
}

impl TextState {
    fn move_line(&mut self, tx: f32, ty: f32) {
        self.tlm = Matrix::translation(tx, ty).multiply(&self.tlm);
        self.tm = self.tlm;
    }

    fn next_line(&mut self) {
        // Without an explicit leading, step down by the font size.
        let leading = if self.leading != 0.0 {
            self.leading
        } else {
            self.font_size.abs()
        };
        self.move_line(0.0, -leading);
    }
}

/// A PDF transformation matrix `[a b c d e f]`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Matrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Matrix {
    const IDENTITY: Matrix = Matrix {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    fn translation(tx: f32, ty: f32) -> Self {
        Self {
            e: tx,
            f: ty,
            ..Self::IDENTITY
        }
    }

    fn from_op(op: &ContentOp) -> Self {
        Self {
            a: op.number(0, 1.0),
            b: op.number(1, 0.0),
            c: op.number(2, 0.0),
            d: op.number(3, 1.0),
            e: op.number(4, 0.0),
            f: op.number(5, 0.0),
        }
    }

    /// `self × other`
    fn multiply(&self, other: &Matrix) -> Matrix {
        Matrix {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    fn vertical_scale(&self) -> f32 {
        (self.c * self.c + self.d * self.d).sqrt()
    }

    fn horizontal_scale(&self) -> f32 {
        (self.a * self.a + self.b * self.b).sqrt()
    }
}

/// Group spans into lines by baseline, top to bottom, left to right.
fn group_spans_into_lines(mut spans: Vec<TextSpan>) -> Vec<LayoutLine> {
    // PDF Y grows upwards
    spans.sort_by(|a, b| b.y.total_cmp(&a.y).then_with(|| a.x.total_cmp(&b.x)));

    let mut lines = Vec::new();
    let mut current: Vec<TextSpan> = Vec::new();
    let mut current_y = 0.0f32;

    for span in spans {
        let tolerance = span.font_size * 0.3;
        if !current.is_empty() && (span.y - current_y).abs() > tolerance {
            lines.push(join_spans(std::mem::take(&mut current)));
        }
        if current.is_empty() {
            current_y = span.y;
        }
        current.push(span);
    }
    if !current.is_empty() {
        lines.push(join_spans(current));
    }

    lines
}

/// Join the spans of one line, inserting spaces at visible gaps.
fn join_spans(mut spans: Vec<TextSpan>) -> LayoutLine {
    spans.sort_by(|a, b| a.x.total_cmp(&b.x));

    let mut line = LayoutLine::default();
    let mut prev: Option<&TextSpan> = None;

    for span in &spans {
        if let Some(prev) = prev {
            let gap = span.x - (prev.x + prev.width);
            let space_threshold = span.font_size * AVG_GLYPH_WIDTH * 0.2;
            let both_spaceless = prev
                .text
                .chars()
                .last()
                .map(is_spaceless_script_char)
                .unwrap_or(false)
                && span
                    .text
                    .chars()
                    .next()
                    .map(is_spaceless_script_char)
                    .unwrap_or(false);
            let has_space =
                prev.text.ends_with(char::is_whitespace) || span.text.starts_with(char::is_whitespace);

            if gap > space_threshold && !both_spaceless && !has_space {
                line.text.push(' ');
            }
        }
        line.text.push_str(&span.text);
        line.glyphs.extend_from_slice(&span.glyphs);
        prev = Some(span);
    }

    line
}

/// Whether a character belongs to a script written without word spaces.
///
/// Chinese and Japanese don't use spaces between words, but Korean does.
fn is_spaceless_script_char(c: char) -> bool {
    let code = c as u32;

    // CJK Unified Ideographs and extensions
    (0x4E00..=0x9FFF).contains(&code)
    || (0x3400..=0x4DBF).contains(&code)
    || (0x20000..=0x2EBEF).contains(&code)
    // Hiragana, Katakana
    || (0x3040..=0x30FF).contains(&code)
    // CJK Symbols and Punctuation
    || (0x3000..=0x303F).contains(&code)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Backend serving pre-decoded operations per page.
    struct FakeBackend {
        pages: Vec<Result<Vec<ContentOp>>>,
    }

    impl PdfBackend for FakeBackend {
        fn pages(&self) -> Vec<PageId> {
            (0..self.pages.len() as u32).map(|i| (i + 1, 0)).collect()
        }

        fn page_content(&self, page: PageId) -> Result<Vec<u8>> {
            match &self.pages[(page.0 - 1) as usize] {
                Ok(_) => Ok(page.0.to_be_bytes().to_vec()),
                Err(e) => Err(Error::PdfParse(e.to_string())),
            }
        }

        fn decode_content(&self, data: &[u8]) -> Result<Vec<ContentOp>> {
            let idx = u32::from_be_bytes([data[0], data[1], data[2], data[3]]) - 1;
            match &self.pages[idx as usize] {
                Ok(ops) => Ok(ops.clone()),
                Err(e) => Err(Error::PdfParse(e.to_string())),
            }
        }

        fn decode_text(&self, _page: PageId, _font: &[u8], bytes: &[u8]) -> String {
            String::from_utf8_lossy(bytes).to_string()
        }
    }

    fn op(operator: &str, operands: Vec<PdfValue>) -> ContentOp {
        ContentOp {
            operator: operator.to_string(),
            operands,
        }
    }

    fn num(v: f32) -> PdfValue {
        PdfValue::Real(v)
    }

    fn text_at(text: &str, size: f32, x: f32, y: f32) -> Vec<ContentOp> {
        vec![
            op("BT", vec![]),
            op("Tf", vec![PdfValue::Name(b"F1".to_vec()), num(size)]),
            op("Td", vec![num(x), num(y)]),
            op("Tj", vec![PdfValue::Str(text.as_bytes().to_vec())]),
            op("ET", vec![]),
        ]
    }

    fn layout(pages: Vec<Result<Vec<ContentOp>>>, options: LayoutOptions) -> PdfLayout<FakeBackend> {
        PdfLayout::new(FakeBackend { pages }, options)
    }

    #[test]
    fn test_lines_ordered_top_to_bottom() {
        let mut ops = text_at("Body text here", 11.0, 72.0, 600.0);
        ops.extend(text_at("Heading", 18.0, 72.0, 700.0));
        let pages = layout(vec![Ok(ops)], LayoutOptions::default()).pages().unwrap();

        let texts: Vec<_> = pages[0].lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["Heading", "Body text here"]);
        assert!((pages[0].lines[0].avg_font_size() - 18.0).abs() < 1e-6);
    }

    #[test]
    fn test_spans_on_one_baseline_join_with_space() {
        let mut ops = text_at("Annual", 24.0, 72.0, 700.0);
        ops.extend(text_at("Report", 24.0, 200.0, 700.0));
        let pages = layout(vec![Ok(ops)], LayoutOptions::default()).pages().unwrap();

        assert_eq!(pages[0].lines.len(), 1);
        let line = &pages[0].lines[0];
        assert_eq!(line.text, "Annual Report");
        // The inserted space is not a glyph
        assert_eq!(line.glyphs.len(), 12);
    }

    #[test]
    fn test_mixed_sizes_average_over_glyphs() {
        let mut ops = text_at("AB", 10.0, 72.0, 700.0);
        ops.extend(text_at("CD", 20.0, 73.0, 700.0));
        let pages = layout(vec![Ok(ops)], LayoutOptions::default()).pages().unwrap();
        assert!((pages[0].lines[0].avg_font_size() - 15.0).abs() < 1e-6);
    }

    #[test]
    fn test_tm_scale_sets_effective_size() {
        let ops = vec![
            op("BT", vec![]),
            op("Tf", vec![PdfValue::Name(b"F1".to_vec()), num(1.0)]),
            op(
                "Tm",
                vec![num(16.0), num(0.0), num(0.0), num(16.0), num(50.0), num(500.0)],
            ),
            op("Tj", vec![PdfValue::Str(b"Scaled".to_vec())]),
            op("ET", vec![]),
        ];
        let pages = layout(vec![Ok(ops)], LayoutOptions::default()).pages().unwrap();
        assert!((pages[0].lines[0].avg_font_size() - 16.0).abs() < 1e-4);
    }

    #[test]
    fn test_negative_tf_size_is_magnitude() {
        let ops = vec![
            op("BT", vec![]),
            op("Tf", vec![PdfValue::Name(b"F1".to_vec()), num(-18.0)]),
            op("Td", vec![num(72.0), num(700.0)]),
            op("Tj", vec![PdfValue::Str(b"Mirrored".to_vec())]),
            op("ET", vec![]),
        ];
        let pages = layout(vec![Ok(ops)], LayoutOptions::default()).pages().unwrap();
        let line = &pages[0].lines[0];
        assert_eq!(line.text, "Mirrored");
        assert!((line.avg_font_size() - 18.0).abs() < 1e-4);
    }

    #[test]
    fn test_tj_array_word_gaps() {
        let ops = vec![
            op("BT", vec![]),
            op("Tf", vec![PdfValue::Name(b"F1".to_vec()), num(12.0)]),
            op(
                "TJ",
                vec![PdfValue::Array(vec![
                    PdfValue::Str(b"Key".to_vec()),
                    PdfValue::Integer(-250),
                    PdfValue::Str(b"Findings".to_vec()),
                    PdfValue::Integer(-20),
                    PdfValue::Str(b"!".to_vec()),
                ])],
            ),
            op("ET", vec![]),
        ];
        let pages = layout(vec![Ok(ops)], LayoutOptions::default()).pages().unwrap();
        assert_eq!(pages[0].lines[0].text, "Key Findings!");
        assert_eq!(pages[0].lines[0].glyphs.len(), 12);
    }

    #[test]
    fn test_t_star_moves_to_next_line() {
        let ops = vec![
            op("BT", vec![]),
            op("Tf", vec![PdfValue::Name(b"F1".to_vec()), num(12.0)]),
            op("TL", vec![num(14.0)]),
            op("Td", vec![num(72.0), num(700.0)]),
            op("Tj", vec![PdfValue::Str(b"First line".to_vec())]),
            op("T*", vec![]),
            op("Tj", vec![PdfValue::Str(b"Second line".to_vec())]),
            op("ET", vec![]),
        ];
        let pages = layout(vec![Ok(ops)], LayoutOptions::default()).pages().unwrap();
        let texts: Vec<_> = pages[0].lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["First line", "Second line"]);
    }

    #[test]
    fn test_text_outside_bt_is_ignored() {
        let ops = vec![op("Tj", vec![PdfValue::Str(b"Stray".to_vec())])];
        let pages = layout(vec![Ok(ops)], LayoutOptions::default()).pages().unwrap();
        assert!(pages[0].lines.is_empty());
    }

    #[test]
    fn test_ligatures_are_normalized() {
        let ops = text_at("Ofﬁce Policy", 14.0, 72.0, 700.0);
        let pages = layout(vec![Ok(ops.clone())], LayoutOptions::default())
            .pages()
            .unwrap();
        assert_eq!(pages[0].lines[0].text, "Office Policy");

        let raw = layout(
            vec![Ok(ops)],
            LayoutOptions::default().with_unicode_normalization(false),
        )
        .pages()
        .unwrap();
        assert_eq!(raw[0].lines[0].text, "Ofﬁce Policy");
    }

    #[test]
    fn test_strict_mode_fails_on_bad_page() {
        let pages = vec![
            Ok(text_at("Cover", 20.0, 72.0, 700.0)),
            Err(Error::PdfParse("truncated stream".to_string())),
        ];
        let result = layout(pages, LayoutOptions::default()).pages();
        assert!(matches!(result, Err(Error::TextExtract { page: 1, .. })));
    }

    #[test]
    fn test_lenient_mode_keeps_page_numbering() {
        let pages = vec![
            Err(Error::PdfParse("truncated stream".to_string())),
            Ok(text_at("Second page", 20.0, 72.0, 700.0)),
        ];
        let result = layout(pages, LayoutOptions::new().lenient())
            .pages()
            .unwrap();
        assert_eq!(result.len(), 2);
        assert!(result[0].lines.is_empty());
        assert_eq!(result[1].lines[0].text, "Second page");
    }

    #[test]
    fn test_spaceless_scripts() {
        assert!(is_spaceless_script_char('中'));
        assert!(is_spaceless_script_char('カ'));
        assert!(!is_spaceless_script_char('한'));
        assert!(!is_spaceless_script_char('A'));

        let spans = vec![
            TextSpan::new("概要", 0.0, 0.0, 12.0),
            TextSpan::new("説明", 40.0, 0.0, 12.0),
        ];
        assert_eq!(group_spans_into_lines(spans)[0].text, "概要説明");
    }
}
