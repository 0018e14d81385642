//! JSON rendering for document outlines.

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::{Error, Result};
use crate::model::DocumentOutline;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON, four-space indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert an outline to JSON. Non-ASCII text is written as-is.
pub fn to_json(outline: &DocumentOutline, format: JsonFormat) -> Result<String> {
    let mut buf = Vec::new();
    let result = match format {
        JsonFormat::Pretty => {
            let formatter = PrettyFormatter::with_indent(b"    ");
            outline.serialize(&mut Serializer::with_formatter(&mut buf, formatter))
        }
        JsonFormat::Compact => outline.serialize(&mut Serializer::new(&mut buf)),
    };
    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))?;

    String::from_utf8(buf).map_err(|e| Error::Render(format!("Invalid UTF-8 in JSON: {}", e)))
}
