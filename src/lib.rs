//! # pdfoutline
//!
//! Title and heading outline extraction from PDF documents.
//!
//! Text lines are laid out from each page's content stream, then classified
//! by font size and section numbering into a title and a flat list of
//! H1/H2/H3 headings with their page numbers.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfoutline::{extract_outline, render};
//!
//! fn main() -> pdfoutline::Result<()> {
//!     let outline = extract_outline("report.pdf")?;
//!     println!("{}", render::to_json(&outline, render::JsonFormat::Pretty)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Layout extraction**: lines with per-glyph font sizes via `lopdf`
//! - **Heading classification**: numbering prefixes and size ratios
//! - **Configurable**: keyword list and ratios in [`OutlineOptions`]
//! - **Batch processing**: whole directories, in parallel with Rayon

pub mod batch;
pub mod detect;
pub mod error;
pub mod layout;
pub mod model;
pub mod outline;
pub mod render;

// Re-export commonly used types
pub use batch::{run_batch, BatchEvent, BatchOptions, BatchReport};
pub use detect::{is_pdf_bytes, sniff_bytes, sniff_path, PdfHeader};
pub use error::{Error, Result};
pub use layout::{ErrorMode, LayoutLine, LayoutOptions, LayoutSource, PageLayout, PdfLayout};
pub use model::{DocumentOutline, HeadingEntry, HeadingLevel};
pub use outline::{classify_fragments, classify_layout, OutlineOptions, TextFragment};
pub use render::JsonFormat;

use std::path::Path;

/// Extract the title and outline of a PDF file.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::extract_outline;
///
/// let outline = extract_outline("report.pdf").unwrap();
/// for heading in &outline.outline {
///     println!("{} {} (page {})", heading.level, heading.text, heading.page);
/// }
/// ```
pub fn extract_outline<P: AsRef<Path>>(path: P) -> Result<DocumentOutline> {
    OutlineExtractor::new().extract_file(path)
}

/// Extract the title and outline of a PDF held in memory.
pub fn extract_outline_bytes(data: &[u8]) -> Result<DocumentOutline> {
    OutlineExtractor::new().extract_bytes(data)
}

/// Extract with custom classifier options.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::{extract_outline_with_options, OutlineOptions};
///
/// let options = OutlineOptions::new()
///     .with_min_font_size(9.0)
///     .with_negative_keywords(["draft", "confidential"]);
/// let outline = extract_outline_with_options("report.pdf", &options).unwrap();
/// ```
pub fn extract_outline_with_options<P: AsRef<Path>>(
    path: P,
    options: &OutlineOptions,
) -> Result<DocumentOutline> {
    OutlineExtractor::new()
        .with_outline_options(options.clone())
        .extract_file(path)
}

/// Builder for extracting outlines with layout and classifier options.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::{OutlineExtractor, OutlineOptions};
///
/// let outline = OutlineExtractor::new()
///     .with_outline_options(OutlineOptions::new().with_dominant_ratio(1.5))
///     .lenient()
///     .extract_file("report.pdf")?;
/// # Ok::<(), pdfoutline::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct OutlineExtractor {
    outline_options: OutlineOptions,
    layout_options: LayoutOptions,
}

impl OutlineExtractor {
    /// Create a new extractor with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set classifier options.
    pub fn with_outline_options(mut self, options: OutlineOptions) -> Self {
        self.outline_options = options;
        self
    }

    /// Set layout options.
    pub fn with_layout_options(mut self, options: LayoutOptions) -> Self {
        self.layout_options = options;
        self
    }

    /// Treat unreadable pages as empty instead of failing.
    pub fn lenient(mut self) -> Self {
        self.layout_options = self.layout_options.lenient();
        self
    }

    /// Classifier options in use.
    pub fn outline_options(&self) -> &OutlineOptions {
        &self.outline_options
    }

    /// Layout options in use.
    pub fn layout_options(&self) -> &LayoutOptions {
        &self.layout_options
    }

    /// Extract from a PDF file.
    pub fn extract_file<P: AsRef<Path>>(&self, path: P) -> Result<DocumentOutline> {
        let layout = PdfLayout::open(path, self.layout_options.clone())?;
        self.extract(&layout)
    }

    /// Extract from PDF bytes.
    pub fn extract_bytes(&self, data: &[u8]) -> Result<DocumentOutline> {
        let layout = PdfLayout::from_bytes(data, self.layout_options.clone())?;
        self.extract(&layout)
    }

    /// Classify any layout source.
    pub fn extract<S: LayoutSource + ?Sized>(&self, source: &S) -> Result<DocumentOutline> {
        classify_layout(source, &self.outline_options)
    }
}
