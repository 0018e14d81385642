//! pdfoutline CLI - PDF title and heading outline extraction tool

use std::fs;
use std::path::{Path, PathBuf};
use std::thread;

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfoutline::batch::{output_path_for, BatchEvent, BatchOptions};
use pdfoutline::render::{to_json, JsonFormat};
use pdfoutline::{run_batch, ErrorMode, LayoutOptions, OutlineExtractor, OutlineOptions};

#[derive(Parser)]
#[command(name = "pdfoutline")]
#[command(version)]
#[command(about = "Extract the title and H1-H3 heading outline of PDF documents", long_about = None)]
struct Cli {
    /// Input PDF file or directory of PDFs
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Output directory (stdout for a single file if not specified)
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the outline of a single PDF
    Extract {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Classifier configuration (JSON)
        #[arg(long, value_name = "FILE", env = "PDFOUTLINE_CONFIG")]
        config: Option<PathBuf>,

        /// Fail on unreadable pages instead of skipping them
        #[arg(long)]
        strict: bool,
    },

    /// Extract outlines of every PDF in a directory
    Batch {
        /// Input directory
        #[arg(value_name = "INPUT_DIR")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR", default_value = "output")]
        output: PathBuf,

        /// Classifier configuration (JSON)
        #[arg(long, value_name = "FILE", env = "PDFOUTLINE_CONFIG")]
        config: Option<PathBuf>,

        /// Process one document at a time
        #[arg(long)]
        sequential: bool,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Fail on unreadable pages instead of skipping them
        #[arg(long)]
        strict: bool,
    },

    /// Print the default classifier configuration
    Config,

    /// Show version information
    Version,
}

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Extract {
            input,
            output,
            compact,
            config,
            strict,
        }) => cmd_extract(&input, output.as_deref(), compact, config.as_deref(), strict),
        Some(Commands::Batch {
            input,
            output,
            config,
            sequential,
            compact,
            strict,
        }) => cmd_batch(
            &input,
            &output,
            config.as_deref(),
            sequential,
            compact,
            strict,
        ),
        Some(Commands::Config) => cmd_config(),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => match cli.input {
            Some(input) if input.is_dir() => {
                let output = cli.output.unwrap_or_else(|| PathBuf::from("output"));
                cmd_batch(&input, &output, None, false, false, false)
            }
            Some(input) => {
                let output = cli.output.map(|dir| output_path_for(&input, &dir));
                if let Some(parent) = output.as_deref().and_then(Path::parent) {
                    if let Err(e) = fs::create_dir_all(parent) {
                        eprintln!("{}: {}", "Error".red().bold(), e);
                        std::process::exit(1);
                    }
                }
                cmd_extract(&input, output.as_deref(), false, None, false)
            }
            None => {
                println!("{}", "Usage: pdfoutline <INPUT> [OUTPUT]".yellow());
                println!("       pdfoutline --help for more information");
                Ok(())
            }
        },
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn load_outline_options(config: Option<&Path>) -> pdfoutline::Result<OutlineOptions> {
    match config {
        Some(path) => {
            log::debug!("Loading classifier configuration from {}", path.display());
            OutlineOptions::from_json_file(path)
        }
        None => Ok(OutlineOptions::default()),
    }
}

fn layout_options(strict: bool) -> LayoutOptions {
    // Malformed pages are common in the wild; skip them unless asked not to.
    let mode = if strict {
        ErrorMode::Strict
    } else {
        ErrorMode::Lenient
    };
    LayoutOptions::new().with_error_mode(mode)
}

fn json_format(compact: bool) -> JsonFormat {
    if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    }
}

fn cmd_extract(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    config: Option<&Path>,
    strict: bool,
) -> CliResult {
    let outline = OutlineExtractor::new()
        .with_outline_options(load_outline_options(config)?)
        .with_layout_options(layout_options(strict))
        .extract_file(input)?;

    let json = to_json(&outline, json_format(compact))?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!(
            "{} {} -> {}",
            "Processed:".green(),
            file_name(input),
            path.display()
        );
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_batch(
    input: &Path,
    output: &Path,
    config: Option<&Path>,
    sequential: bool,
    compact: bool,
    strict: bool,
) -> CliResult {
    let mut options = BatchOptions::new()
        .with_outline_options(load_outline_options(config)?)
        .with_layout_options(layout_options(strict))
        .with_json_format(json_format(compact));
    if sequential {
        options = options.sequential();
    }

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    let (tx, rx) = crossbeam_channel::unbounded();
    let report = thread::scope(|scope| {
        let worker = scope.spawn(move || run_batch(input, output, &options, Some(&tx)));

        // Ends when the worker drops its sender.
        for event in rx.iter() {
            match event {
                BatchEvent::Started { total } => {
                    pb.set_length(total as u64);
                    pb.set_message("Extracting outlines...");
                }
                BatchEvent::Processed(done) => {
                    pb.println(format!(
                        "{} {} -> {}",
                        "Processed:".green(),
                        file_name(&done.input),
                        file_name(&done.output)
                    ));
                    pb.inc(1);
                }
                BatchEvent::Failed(failed) => {
                    pb.println(format!(
                        "{} {}: {}",
                        "Failed:".red(),
                        file_name(&failed.input),
                        failed.error
                    ));
                    pb.inc(1);
                }
            }
        }

        worker.join()
    });
    let report = match report {
        Ok(report) => report?,
        Err(_) => return Err("batch worker panicked".into()),
    };

    pb.finish_with_message("Done!");

    println!(
        "\n{} {} of {} documents written to {}",
        "Summary:".green().bold(),
        report.processed.len(),
        report.total(),
        output.display()
    );
    if !report.is_success() {
        println!("{}", "Failed documents:".yellow().bold());
        let last = report.failed.len() - 1;
        for (i, failed) in report.failed.iter().enumerate() {
            let branch = if i == last { "└─" } else { "├─" };
            println!(
                "  {} {}: {}",
                branch.dimmed(),
                file_name(&failed.input),
                failed.error
            );
        }
    }

    Ok(())
}

fn cmd_config() -> CliResult {
    println!("{}", OutlineOptions::default().to_json_pretty()?);
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "pdfoutline".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF title and heading outline extraction tool");
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
