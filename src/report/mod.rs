//! Run summary and the optional log file.

use crate::run::FileReport;
use anyhow::Context;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;
use time::macros::format_description;

/// Where the summary lines go besides stdout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    None,
    /// Timestamped name in the working directory.
    Auto,
    Path(PathBuf),
}

impl LogTarget {
    /// Map `--log-file [PATH]`: absent, bare flag, or flag with a value.
    pub fn from_arg(arg: Option<Option<PathBuf>>) -> Self {
        match arg {
            None => LogTarget::None,
            Some(None) => LogTarget::Auto,
            Some(Some(path)) => LogTarget::Path(path),
        }
    }

    pub fn resolve(&self, started: OffsetDateTime) -> Option<PathBuf> {
        match self {
            LogTarget::None => None,
            LogTarget::Auto => Some(PathBuf::from(auto_log_name(started))),
            LogTarget::Path(path) => Some(path.clone()),
        }
    }
}

/// Local wall-clock time, falling back to UTC when the offset is unknown.
pub fn now_local() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

/// `lyrics_log_YYYY-MM-DD_HH-MM-SS.txt`
pub fn auto_log_name(at: OffsetDateTime) -> String {
    let stamp = at
        .format(format_description!(
            "[year]-[month]-[day]_[hour]-[minute]-[second]"
        ))
        .unwrap_or_else(|_| at.unix_timestamp().to_string());
    format!("lyrics_log_{stamp}.txt")
}

pub fn summary_lines(reports: &[FileReport]) -> Vec<String> {
    reports.iter().map(FileReport::line).collect()
}

pub fn print_summary(lines: &[String]) {
    println!("\n--- Summary ---");
    for line in lines {
        println!("{line}");
    }
}

/// Write the summary lines, newline-separated, replacing any existing file.
pub fn write_log(path: &Path, lines: &[String]) -> anyhow::Result<()> {
    std::fs::write(path, lines.join("\n")).with_context(|| format!("write {}", path.display()))
}
