//! Rendering of document outlines.

mod json;

pub use json::{to_json, JsonFormat};
