//! Default output file naming.

use std::path::PathBuf;

use chrono::{DateTime, TimeZone};

/// File name prefix for results written without an explicit output path.
pub const OUTPUT_PREFIX: &str = "comparison_result_";

/// Build `comparison_result_<YYYYMMDD_HHMMSS>.pdf` for the given instant.
pub fn default_output_name<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("{}{}.pdf", OUTPUT_PREFIX, now.format("%Y%m%d_%H%M%S"))
}

/// Resolve the output path: the explicit one if given, otherwise the
/// timestamped default relative to the working directory.
pub fn resolve_output_path<Tz: TimeZone>(explicit: Option<PathBuf>, now: &DateTime<Tz>) -> PathBuf
where
    Tz::Offset: std::fmt::Display,
{
    explicit.unwrap_or_else(|| PathBuf::from(default_output_name(now)))
}
