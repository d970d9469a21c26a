//! Command-line front end.
//!
//! Parses arguments, starts the organize worker, and renders its event stream
//! either as a progress bar with a summary table or as JSON lines.

use crate::config::{ConflictPolicy, OrganizeConfig};
use crate::file_organizer::FileOrganizer;
use crate::output::OutputFormatter;
use crate::progress::{OrganizeEvent, RunSummary};
use crate::worker;
use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use indicatif::ProgressBar;
use std::path::PathBuf;

/// Sort the files in a directory into category subfolders by extension.
///
/// Top-level files go to Documents, Images, Audio, Video, Archives,
/// Executables or Misc; top-level folders go to Folders.
#[derive(Parser, Debug, Clone)]
#[command(name = "foldersort")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory to organize
    pub directory: PathBuf,

    /// TOML configuration file
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// What to do when the destination already has an entry with the same
    /// name (overrides the configuration file)
    #[arg(long = "on-conflict", value_enum)]
    pub on_conflict: Option<ConflictPolicy>,

    /// Print every event as a JSON object on its own line
    #[arg(long = "json", action = ArgAction::SetTrue)]
    pub json: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Log level implied by the `-v` count.
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            _ => tracing::Level::DEBUG,
        }
    }
}

/// Builds the organizer described by `args` and its configuration file.
///
/// `--on-conflict` takes precedence over `organize.on_conflict` in the file.
///
/// # Errors
///
/// Fails if the configuration file cannot be read or parsed, or if one of its
/// filter patterns does not compile.
pub fn build_organizer(args: &Args) -> Result<FileOrganizer> {
    let config = OrganizeConfig::load(args.config.as_deref())
        .context("could not load configuration")?;
    let organizer =
        FileOrganizer::from_config(&config).context("could not compile configuration")?;

    Ok(match args.on_conflict {
        Some(policy) => organizer.with_conflict_policy(policy),
        None => organizer,
    })
}

/// Runs one organize pass as described by `args`.
///
/// Progress is rendered while the worker runs; the summary is returned once
/// it has been joined.
///
/// # Arguments
///
/// * `args` - Parsed command-line arguments
///
/// # Errors
///
/// Returns the run's error with the target directory as context.
///
/// # Examples
///
/// ```no_run
/// use clap::Parser;
/// use foldersort::cli::{Args, run_cli};
///
/// let args = Args::parse_from(["foldersort", "/path/to/Downloads"]);
/// match run_cli(&args) {
///     Ok(summary) => println!("moved {} entries", summary.counts.total()),
///     Err(e) => eprintln!("Error: {e:#}"),
/// }
/// ```
pub fn run_cli(args: &Args) -> Result<RunSummary> {
    let organizer = build_organizer(args)?;
    let directory = args.directory.clone();

    if !args.json {
        OutputFormatter::info(&format!("Organizing contents of: {}", directory.display()));
    }

    let handle = worker::start(organizer, directory.clone())?;

    if args.json {
        for event in handle.events.iter() {
            println!("{}", OutputFormatter::json_line(&event)?);
        }
    } else {
        render_events(handle.events.iter());
    }

    let summary = handle
        .join()
        .with_context(|| format!("organizing {} failed", directory.display()))?;

    if !args.json {
        OutputFormatter::summary_table(&summary);
        OutputFormatter::success("Organization complete!");
    }
    Ok(summary)
}

/// Drives a progress bar from the event stream until it ends.
fn render_events(events: impl Iterator<Item = OrganizeEvent>) {
    let pb: ProgressBar = OutputFormatter::create_progress_bar();

    for event in events {
        match event {
            OrganizeEvent::Progress(progress) => {
                pb.set_length(progress.total as u64);
                pb.set_position(progress.processed as u64);
            }
            OrganizeEvent::Counts(counts) => {
                pb.set_message(OutputFormatter::counts_line(&counts.counts));
            }
            OrganizeEvent::Skipped(skipped) => {
                pb.println(format!(
                    "⚠ {} left in place: {} already exists",
                    skipped.name,
                    skipped.destination.display()
                ));
            }
            OrganizeEvent::Finished(_) => pb.finish(),
            // The error itself is reported by the caller once the worker is joined.
            OrganizeEvent::Failed { .. } => pb.abandon(),
        }
    }
}
