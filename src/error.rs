//! Error types for the pdfmd-fix library.
//!
//! Cleaning text never fails: every rule either matches or is a no-op. The
//! only fallible operations are the file-level ones in [`crate::fix`] and
//! configuration validation, so a single enum covers the whole crate.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the pdfmd-fix library.
#[derive(Debug, Error)]
pub enum FixError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("File not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// The input exists but could not be read as UTF-8 text.
    #[error("Failed to read '{path}': {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the output Markdown file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
