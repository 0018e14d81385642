//! Result types produced by outline extraction.
//!
//! The model is the sole externally observable artifact of classification:
//! one [`DocumentOutline`] per input document, handed to the JSON renderer
//! unchanged.

mod outline;

pub use outline::{DocumentOutline, HeadingEntry, HeadingLevel};
