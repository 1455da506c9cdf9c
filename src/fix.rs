//! Top-level fix API: in-memory and file-to-file.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::FixConfig;
use crate::error::FixError;
use crate::output::{FixOutput, FixReport, FixStats};
use crate::pipeline::postprocess::fix_markdown;

/// Clean a Markdown string and report how many lines were removed.
///
/// # Example
/// ```rust
/// use pdfmd_fix::fix_str;
///
/// let out = fix_str("##### Intro\n\nPage 5\n• First point\n42\n");
/// assert_eq!(out.markdown, "### Intro\n\n- First point");
/// assert_eq!(out.stats.lines_removed, 3);
/// ```
pub fn fix_str(input: &str) -> FixOutput {
    let markdown = fix_markdown(input);
    let stats = FixStats::between(input, &markdown);
    FixOutput { markdown, stats }
}

/// Derive the output path used when the caller does not supply one:
/// `<stem><suffix><.extension>` next to the input.
///
/// ```rust
/// use pdfmd_fix::{default_output_path, FixConfig};
/// use std::path::{Path, PathBuf};
///
/// let out = default_output_path(Path::new("docs/tutorial.md"), &FixConfig::default());
/// assert_eq!(out, PathBuf::from("docs/tutorial-fixed.md"));
/// ```
pub fn default_output_path(input: &Path, config: &FixConfig) -> PathBuf {
    // A trailing dot is part of the stem, not an empty extension.
    let (stem, ext) = match input.extension() {
        Some(ext) if !ext.is_empty() => (input.file_stem(), Some(ext)),
        _ => (input.file_name(), None),
    };

    let mut name = OsString::new();
    if let Some(stem) = stem {
        name.push(stem);
    }
    name.push(&config.output_suffix);
    if let Some(ext) = ext {
        name.push(".");
        name.push(ext);
    }
    input.with_file_name(name)
}

/// Read `input`, clean it, and write the result.
///
/// When `output` is `None` the result goes to [`default_output_path`]. The
/// write is atomic: content lands in a sibling temp file which is then renamed
/// over the target, so a failed run never leaves a half-written file.
pub fn fix_file(
    input: impl AsRef<Path>,
    output: Option<&Path>,
    config: &FixConfig,
) -> Result<FixReport, FixError> {
    let input = input.as_ref();
    if !input.exists() {
        return Err(FixError::FileNotFound {
            path: input.to_path_buf(),
        });
    }

    info!("Reading: {}", input.display());
    let raw = std::fs::read_to_string(input).map_err(|source| FixError::ReadFailed {
        path: input.to_path_buf(),
        source,
    })?;
    let content = normalise_line_endings(&raw);

    let output_path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output_path(input, config));
    debug!("Resolved output path: {}", output_path.display());

    let FixOutput { markdown, stats } = fix_str(&content);
    write_atomic(&output_path, &markdown)?;

    info!(
        "Fixed {} → {}: {} lines → {} lines ({} removed)",
        input.display(),
        output_path.display(),
        stats.original_lines,
        stats.final_lines,
        stats.lines_removed
    );

    Ok(FixReport {
        input: input.to_path_buf(),
        output: output_path,
        stats,
    })
}

/// CRLF and bare CR become LF, so line-anchored rules see every line break.
fn normalise_line_endings(input: &str) -> String {
    input.replace("\r\n", "\n").replace('\r', "\n")
}

fn write_atomic(path: &Path, contents: &str) -> Result<(), FixError> {
    let write_err = |source| FixError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    std::fs::write(&tmp_path, contents).map_err(write_err)?;
    if let Err(e) = std::fs::rename(&tmp_path, path) {
        if let Err(cleanup) = std::fs::remove_file(&tmp_path) {
            warn!("Could not remove {}: {}", tmp_path.display(), cleanup);
        }
        return Err(write_err(e));
    }
    Ok(())
}
