//! Directory batch processing.
//!
//! Every `.pdf` file in an input directory is classified independently and
//! written to `<stem>.json` in the output directory. One document failing
//! never stops the others.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crossbeam_channel::Sender;
use rayon::prelude::*;

use crate::error::Result;
use crate::layout::LayoutOptions;
use crate::outline::OutlineOptions;
use crate::render::{to_json, JsonFormat};
use crate::OutlineExtractor;

/// Options for a batch run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Classifier options
    pub outline: OutlineOptions,
    /// Layout options
    pub layout: LayoutOptions,
    /// Output JSON format
    pub json_format: JsonFormat,
    /// Process documents in parallel
    pub parallel: bool,
}

impl BatchOptions {
    /// Create batch options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set classifier options.
    pub fn with_outline_options(mut self, options: OutlineOptions) -> Self {
        self.outline = options;
        self
    }

    /// Set layout options.
    pub fn with_layout_options(mut self, options: LayoutOptions) -> Self {
        self.layout = options;
        self
    }

    /// Set output JSON format.
    pub fn with_json_format(mut self, format: JsonFormat) -> Self {
        self.json_format = format;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            outline: OutlineOptions::default(),
            layout: LayoutOptions::default(),
            json_format: JsonFormat::Pretty,
            parallel: true,
        }
    }
}

/// A document whose outline was written.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedDocument {
    /// Input PDF
    pub input: PathBuf,
    /// Written JSON file
    pub output: PathBuf,
    /// Number of outline entries
    pub headings: usize,
}

/// A document that could not be processed.
#[derive(Debug, Clone, PartialEq)]
pub struct FailedDocument {
    /// Input PDF
    pub input: PathBuf,
    /// Error message
    pub error: String,
}

/// Progress notification emitted during a batch run.
#[derive(Debug, Clone)]
pub enum BatchEvent {
    /// Processing is about to start on `total` documents
    Started { total: usize },
    /// A document finished
    Processed(ProcessedDocument),
    /// A document failed
    Failed(FailedDocument),
}

/// Outcome of a batch run, in input order.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// Documents written successfully
    pub processed: Vec<ProcessedDocument>,
    /// Documents that failed
    pub failed: Vec<FailedDocument>,
}

impl BatchReport {
    /// Number of documents attempted.
    pub fn total(&self) -> usize {
        self.processed.len() + self.failed.len()
    }

    /// Whether every document succeeded.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// List the PDF files directly inside `dir`, sorted by file name.
///
/// The `.pdf` extension is matched case-insensitively, so `a.pdf` and
/// `a.PDF` are both listed; [`run_batch`] writes only the first of them.
pub fn discover_inputs<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let mut inputs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_pdf = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("pdf"))
            .unwrap_or(false);
        if is_pdf && path.is_file() {
            inputs.push(path);
        }
    }
    inputs.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(inputs)
}

/// The JSON path for `input` inside `output_dir`: `<stem>.json`.
pub fn output_path_for(input: &Path, output_dir: &Path) -> PathBuf {
    let mut name = input.file_stem().unwrap_or(input.as_os_str()).to_os_string();
    name.push(".json");
    output_dir.join(name)
}

/// Classify one document and write its JSON next to the others.
pub fn process_document(
    input: &Path,
    output_dir: &Path,
    options: &BatchOptions,
) -> Result<ProcessedDocument> {
    let outline = OutlineExtractor::new()
        .with_outline_options(options.outline.clone())
        .with_layout_options(options.layout.clone())
        .extract_file(input)?;
    let json = to_json(&outline, options.json_format)?;

    let output = output_path_for(input, output_dir);
    fs::write(&output, json)?;

    Ok(ProcessedDocument {
        input: input.to_path_buf(),
        output,
        headings: outline.len(),
    })
}

/// Process every PDF in `input_dir`, writing JSON files to `output_dir`.
///
/// Per-document failures are logged and collected in the report; only
/// failing to read `input_dir` or create `output_dir` is an error. An input
/// whose output path was already claimed by an earlier input (in file name
/// order) is reported as failed and not written.
pub fn run_batch<P, Q>(
    input_dir: P,
    output_dir: Q,
    options: &BatchOptions,
    events: Option<&Sender<BatchEvent>>,
) -> Result<BatchReport>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let output_dir = output_dir.as_ref();
    let inputs = discover_inputs(input_dir)?;
    fs::create_dir_all(output_dir)?;

    log::debug!(
        "Batch of {} documents into {} ({})",
        inputs.len(),
        output_dir.display(),
        if options.parallel { "parallel" } else { "sequential" }
    );
    notify(events, BatchEvent::Started { total: inputs.len() });

    // Inputs differing only in extension case share an output; the first wins.
    let mut claimed = HashSet::new();
    let jobs: Vec<(&PathBuf, bool)> = inputs
        .iter()
        .map(|input| (input, claimed.insert(output_path_for(input, output_dir))))
        .collect();

    let process = |&(input, owns_output): &(&PathBuf, bool)| {
        let result = if owns_output {
            process_document(input, output_dir, options).map_err(|e| e.to_string())
        } else {
            Err(format!(
                "{} is already written by another input",
                output_path_for(input, output_dir).display()
            ))
        };
        let result = result.map_err(|error| {
            log::warn!("Failed to process {}: {}", input.display(), error);
            FailedDocument {
                input: input.clone(),
                error,
            }
        });
        match &result {
            Ok(done) => notify(events, BatchEvent::Processed(done.clone())),
            Err(failed) => notify(events, BatchEvent::Failed(failed.clone())),
        }
        result
    };

    let results: Vec<_> = if options.parallel {
        jobs.par_iter().map(process).collect()
    } else {
        jobs.iter().map(process).collect()
    };

    let mut report = BatchReport::default();
    for result in results {
        match result {
            Ok(done) => report.processed.push(done),
            Err(failed) => report.failed.push(failed),
        }
    }
    Ok(report)
}

fn notify(events: Option<&Sender<BatchEvent>>, event: BatchEvent) {
    if let Some(tx) = events {
        // A dropped receiver only means nobody is watching.
        let _ = tx.send(event);
    }
}
