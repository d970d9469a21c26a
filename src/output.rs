//! Terminal output for the command-line front end.
//!
//! All user-facing text goes through [`OutputFormatter`] so styling stays
//! consistent. Diagnostics go through `tracing` instead.

use crate::progress::{CategoryCounts, OrganizeEvent, RunSummary};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

const BAR_TEMPLATE: &str = "{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}";

/// Styled output helpers.
///
/// Messages go to stdout except errors, which go to stderr. The progress bar
/// and summary table are only used outside `--json` mode.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green with a checkmark.
    ///
    /// # Arguments
    ///
    /// * `message` - The message to display
    ///
    /// # Example
    ///
    /// ```no_run
    /// use foldersort::output::OutputFormatter;
    /// OutputFormatter::success("Organization complete!");
    /// ```
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error message in red with an X mark, on stderr.
    ///
    /// # Arguments
    ///
    /// * `message` - The message to display
    ///
    /// # Example
    ///
    /// ```no_run
    /// use foldersort::output::OutputFormatter;
    /// OutputFormatter::error("cannot read directory /tmp/inbox");
    /// ```
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints a warning message in yellow with a warning symbol.
    ///
    /// # Arguments
    ///
    /// * `message` - The message to display
    ///
    /// # Example
    ///
    /// ```no_run
    /// use foldersort::output::OutputFormatter;
    /// OutputFormatter::warning("1 entry was left in place");
    /// ```
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    /// Prints an info message in cyan.
    ///
    /// # Arguments
    ///
    /// * `message` - The message to display
    ///
    /// # Example
    ///
    /// ```no_run
    /// use foldersort::output::OutputFormatter;
    /// OutputFormatter::info("Organizing contents of: /tmp/inbox");
    /// ```
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Prints a bold section header preceded by a blank line.
    ///
    /// # Arguments
    ///
    /// * `header` - The header text
    ///
    /// # Example
    ///
    /// ```no_run
    /// use foldersort::output::OutputFormatter;
    /// OutputFormatter::header("SUMMARY");
    /// ```
    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    /// Creates the bar that tracks file progress. The length is set from the
    /// first progress event, since folders are not part of it.
    pub fn create_progress_bar() -> ProgressBar {
        let style = ProgressStyle::default_bar()
            .template(BAR_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░");
        let pb = ProgressBar::new(0);
        pb.set_style(style);
        pb
    }

    /// Compact one-line form of the non-zero counts, for the bar message.
    ///
    /// ```
    /// use foldersort::file_category::Category;
    /// use foldersort::output::OutputFormatter;
    /// use foldersort::progress::CategoryCounts;
    ///
    /// let mut counts = CategoryCounts::new();
    /// counts.increment(Category::Images);
    /// counts.increment(Category::Misc);
    /// assert_eq!(OutputFormatter::counts_line(&counts), "Images 1 · Misc 1");
    /// ```
    pub fn counts_line(counts: &CategoryCounts) -> String {
        counts
            .iter()
            .filter(|(_, n)| *n > 0)
            .map(|(category, n)| format!("{category} {n}"))
            .collect::<Vec<_>>()
            .join(" · ")
    }

    /// Serializes one event as a single JSON line for `--json` output.
    ///
    /// Events are tagged by an `event` field in snake case.
    ///
    /// # Arguments
    ///
    /// * `event` - The event to serialize
    ///
    /// # Example
    ///
    /// ```
    /// use foldersort::output::OutputFormatter;
    /// use foldersort::progress::{OrganizeEvent, ProgressEvent};
    ///
    /// let line = OutputFormatter::json_line(&OrganizeEvent::Progress(ProgressEvent {
    ///     processed: 1,
    ///     total: 3,
    /// }))
    /// .unwrap();
    /// assert_eq!(line, r#"{"event":"progress","processed":1,"total":3}"#);
    /// ```
    pub fn json_line(event: &OrganizeEvent) -> serde_json::Result<String> {
        serde_json::to_string(event)
    }

    /// Prints the per-category table for a finished run, in category order.
    ///
    /// Zero counts are dimmed. A warning follows the table when entries were
    /// skipped.
    ///
    /// # Arguments
    ///
    /// * `summary` - The result of a completed run
    pub fn summary_table(summary: &RunSummary) {
        Self::header("SUMMARY");

        let width = summary
            .counts
            .iter()
            .map(|(category, _)| category.dir_name().len())
            .max()
            .unwrap_or(0)
            .max(8);

        println!(
            "{:<width$} | {}",
            "Category".bold(),
            "Moved".bold(),
            width = width
        );
        println!("{}", "-".repeat(width + 10));

        for (category, count) in summary.counts.iter() {
            let shown = if count == 0 {
                count.to_string().dimmed()
            } else {
                count.to_string().green()
            };
            println!("{:<width$} | {}", category.dir_name(), shown, width = width);
        }

        println!("{}", "-".repeat(width + 10));
        println!(
            "{:<width$} | {}",
            "Total".bold(),
            summary.counts.total().to_string().green().bold(),
            width = width
        );

        if !summary.skipped.is_empty() {
            Self::warning(&format!(
                "{} {} left in place because the destination already existed",
                summary.skipped.len(),
                if summary.skipped.len() == 1 {
                    "entry was"
                } else {
                    "entries were"
                }
            ));
        }
    }
}
