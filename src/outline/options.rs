//! Classifier configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Substrings that disqualify a fragment from being a heading.
pub const DEFAULT_NEGATIVE_KEYWORDS: &[&str] = &[
    "rsvp",
    "www",
    "http",
    "address",
    "page",
    "form",
    "block",
    "fare",
    "parkway",
    "s.no",
    "name",
    "age",
    "single",
    "application",
    "grant",
];

/// Tunable constants of the heading and title heuristics.
///
/// Every field has a default, so a JSON configuration only needs the keys it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlineOptions {
    /// Lower-case substrings that reject a heading candidate
    pub negative_keywords: Vec<String>,

    /// Minimum length of cleaned text, in characters
    pub min_text_chars: usize,

    /// Fragments must be strictly larger than this to be considered at all
    pub min_font_size: f64,

    /// Maximum number of words in a heading
    pub max_words: usize,

    /// Minimum length of a heading that consists of a single word
    pub min_single_word_chars: usize,

    /// Leading markers identifying list items
    pub bullet_markers: Vec<String>,

    /// H1 threshold as a fraction of the largest candidate size
    pub h1_ratio: f64,

    /// H2 threshold as a fraction of the largest candidate size
    pub h2_ratio: f64,

    /// H3 threshold as a fraction of the largest candidate size
    pub h3_ratio: f64,

    /// Size ratio between the first two candidates that marks a dominant heading
    pub dominant_ratio: f64,
}

impl OutlineOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the negative keyword list.
    pub fn with_negative_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.negative_keywords = keywords
            .into_iter()
            .map(|k| k.into().to_lowercase())
            .collect();
        self
    }

    /// Set the font size fragments must exceed.
    pub fn with_min_font_size(mut self, size: f64) -> Self {
        self.min_font_size = size;
        self
    }

    /// Set the maximum word count of a heading.
    pub fn with_max_words(mut self, words: usize) -> Self {
        self.max_words = words;
        self
    }

    /// Set the H1/H2/H3 threshold ratios.
    pub fn with_level_ratios(mut self, h1: f64, h2: f64, h3: f64) -> Self {
        self.h1_ratio = h1;
        self.h2_ratio = h2;
        self.h3_ratio = h3;
        self
    }

    /// Set the dominant heading ratio.
    pub fn with_dominant_ratio(mut self, ratio: f64) -> Self {
        self.dominant_ratio = ratio;
        self
    }

    /// Check the options for internal consistency.
    pub fn validate(&self) -> Result<()> {
        let ratios = [
            ("h1_ratio", self.h1_ratio),
            ("h2_ratio", self.h2_ratio),
            ("h3_ratio", self.h3_ratio),
        ];
        for (name, ratio) in ratios {
            if !ratio.is_finite() || ratio <= 0.0 {
                return Err(Error::Config(format!(
                    "{} must be a positive number, got {}",
                    name, ratio
                )));
            }
        }
        if self.h2_ratio >= self.h1_ratio || self.h3_ratio >= self.h2_ratio {
            return Err(Error::Config(format!(
                "level ratios must decrease strictly (h1 {} > h2 {} > h3 {})",
                self.h1_ratio, self.h2_ratio, self.h3_ratio
            )));
        }
        if !self.dominant_ratio.is_finite() || self.dominant_ratio < 1.0 {
            return Err(Error::Config(format!(
                "dominant_ratio must be at least 1.0, got {}",
                self.dominant_ratio
            )));
        }
        if !self.min_font_size.is_finite() {
            return Err(Error::Config("min_font_size must be finite".to_string()));
        }
        if self.max_words == 0 {
            return Err(Error::Config("max_words must be at least 1".to_string()));
        }
        // A blank entry would match every fragment.
        let lists = [
            ("negative_keywords", &self.negative_keywords),
            ("bullet_markers", &self.bullet_markers),
        ];
        for (name, entries) in lists {
            if entries.iter().any(|entry| entry.trim().is_empty()) {
                return Err(Error::Config(format!("{} must not contain blank entries", name)));
            }
        }
        Ok(())
    }

    /// Parse and validate options from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let mut options: Self =
            serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))?;
        options.negative_keywords = options
            .negative_keywords
            .iter()
            .map(|k| k.to_lowercase())
            .collect();
        options.validate()?;
        Ok(options)
    }

    /// Load and validate options from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&json)
    }

    /// Serialize the options as pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Render(e.to_string()))
    }
}

impl Default for OutlineOptions {
    fn default() -> Self {
        Self {
            negative_keywords: DEFAULT_NEGATIVE_KEYWORDS
                .iter()
                .map(|k| k.to_string())
                .collect(),
            min_text_chars: 3,
            min_font_size: 10.0,
            max_words: 12,
            min_single_word_chars: 4,
            bullet_markers: vec!["•".to_string(), "-".to_string()],
            h1_ratio: 0.8,
            h2_ratio: 0.6,
            h3_ratio: 0.4,
            dominant_ratio: 1.3,
        }
    }
}
