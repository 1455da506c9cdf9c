//! Result types returned by [`crate::fix`].

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Cleaned Markdown plus line statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixOutput {
    pub markdown: String,
    pub stats: FixStats,
}

/// Line counts before and after cleaning.
///
/// Lines are `\n`-separated segments, so the empty document counts as one
/// line and a trailing newline adds an empty final line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixStats {
    pub original_lines: usize,
    pub final_lines: usize,
    /// `original_lines - final_lines`. Cleaning never adds lines.
    pub lines_removed: usize,
}

impl FixStats {
    /// Compute statistics for an original/cleaned pair.
    pub fn between(original: &str, fixed: &str) -> Self {
        let original_lines = count_lines(original);
        let final_lines = count_lines(fixed);
        Self {
            original_lines,
            final_lines,
            lines_removed: original_lines.saturating_sub(final_lines),
        }
    }
}

/// Summary of a file-to-file run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub stats: FixStats,
}

fn count_lines(text: &str) -> usize {
    text.split('\n').count()
}
