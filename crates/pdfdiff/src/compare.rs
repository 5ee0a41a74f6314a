use std::path::PathBuf;

use crate::prelude::{println, *};
use colored::{ColoredString, Colorize};
use pdf::CompareOptions;
use pdfdiff_core::matcher::DEFAULT_TOLERANCE;
use pdfdiff_core::observer::LogObserver;
use pdfdiff_core::summary::{legend, CompareSummary, LegendEntry};
use pdfdiff_core::HighlightKind;

#[derive(Debug, Clone, clap::Args)]
pub struct CompareArgs {
    /// Path to the first PDF file
    pub pdf1: PathBuf,

    /// Path to the second PDF file
    pub pdf2: PathBuf,

    /// Output file (defaults to comparison_result_<timestamp>.pdf)
    #[arg(short, long, env = "PDFDIFF_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Italic word to highlight in blue (repeatable)
    #[arg(short = 'i', long = "italic-word")]
    pub italic_word: Vec<String>,

    /// Comma-separated italic words to highlight in blue
    #[arg(long, env = "PDFDIFF_ITALIC_WORDS", value_delimiter = ',')]
    pub italic_words: Vec<String>,

    /// Maximum block distance for two words to count as the same content
    #[arg(short, long, env = "PDFDIFF_TOLERANCE", default_value_t = DEFAULT_TOLERANCE)]
    pub tolerance: u32,

    /// Output the run summary as JSON
    #[arg(long)]
    pub json: bool,
}

impl CompareArgs {
    pub fn to_options(&self) -> CompareOptions {
        let words = self
            .italic_word
            .iter()
            .chain(self.italic_words.iter())
            .map(|w| w.trim())
            .filter(|w| !w.is_empty())
            .map(str::to_string);

        CompareOptions {
            output: self.output.clone(),
            ..CompareOptions::default()
        }
        .with_italic_words(words)
        .with_tolerance(self.tolerance)
    }
}

pub fn run(args: CompareArgs, global: crate::Global) -> Result<()> {
    let options = args.to_options();

    let summary = pdf::compare(&args.pdf1, &args.pdf2, &options, &LogObserver).with_context(|| {
        f!(
            "Error comparing {} and {}",
            args.pdf1.display(),
            args.pdf2.display()
        )
    })?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("{}", format_report(&summary, !options.italic_words.is_empty()));

    if global.verbose {
        format_page_table(&summary).printstd();
    }

    Ok(())
}

fn colored_label(entry: &LegendEntry) -> ColoredString {
    match entry.kind {
        HighlightKind::OnlyInFirst => entry.label.red().bold(),
        HighlightKind::OnlyInSecond => entry.label.green().bold(),
        HighlightKind::ItalicOfInterest => entry.label.blue().bold(),
    }
}

/// Success message, output path and the color legend.
pub fn format_report(summary: &CompareSummary, with_italic: bool) -> String {
    let mut result = String::new();
    result.push_str(&f!("\n{}\n", "Comparison completed successfully!".bold()));
    result.push_str(&f!(
        "Result saved as: {}\n",
        summary.output.display().to_string().cyan()
    ));
    result.push_str("\nHighlight colors:\n");
    for entry in legend(with_italic) {
        result.push_str(&f!("- {}: {}\n", colored_label(entry), entry.description));
    }
    result
}

/// Per-page counts for `--verbose`.
pub fn format_page_table(summary: &CompareSummary) -> prettytable::Table {
    let mut table = new_table();
    table.set_titles(prettytable::row![
        "Page", "Words A", "Words B", "Red", "Green", "Blue", "Compared"
    ]);
    for (index, page) in summary.pages.iter().enumerate() {
        table.add_row(prettytable::row![
            index + 1,
            page.words_a,
            page.words_b,
            page.only_in_first,
            page.only_in_second,
            page.italic,
            if page.compared { "yes" } else { "no" }
        ]);
    }
    table.add_row(prettytable::row![
        "Total",
        "",
        "",
        summary.total_only_in_first(),
        summary.total_only_in_second(),
        summary.total_italic(),
        ""
    ]);
    table
}
