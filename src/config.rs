//! Configuration for file-level Markdown fixing.
//!
//! The cleaning rules themselves are fixed; configuration only covers how
//! [`crate::fix::fix_file`] resolves its output location. Settings are built
//! through [`FixConfigBuilder`] so new knobs can be added without breaking
//! callers.

use crate::error::FixError;
use serde::{Deserialize, Serialize};

/// Suffix appended to the input file stem when no output path is given.
pub const DEFAULT_OUTPUT_SUFFIX: &str = "-fixed";

/// Configuration for a fix run.
///
/// # Example
/// ```rust
/// use pdfmd_fix::FixConfig;
///
/// let config = FixConfig::builder()
///     .output_suffix("-clean")
///     .build()
///     .unwrap();
/// assert_eq!(config.output_suffix, "-clean");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixConfig {
    /// Appended to the input stem to derive the default output file name.
    /// Default: `-fixed` (`tutorial.md` → `tutorial-fixed.md`).
    pub output_suffix: String,
}

impl Default for FixConfig {
    fn default() -> Self {
        Self {
            output_suffix: DEFAULT_OUTPUT_SUFFIX.to_string(),
        }
    }
}

impl FixConfig {
    /// Create a new builder for `FixConfig`.
    pub fn builder() -> FixConfigBuilder {
        FixConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`FixConfig`].
#[derive(Debug)]
pub struct FixConfigBuilder {
    config: FixConfig,
}

impl FixConfigBuilder {
    pub fn output_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.config.output_suffix = suffix.into();
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<FixConfig, FixError> {
        let suffix = &self.config.output_suffix;
        if suffix.is_empty() {
            return Err(FixError::InvalidConfig(
                "output suffix must not be empty (it would overwrite the input)".into(),
            ));
        }
        if suffix.contains(['/', '\\']) {
            return Err(FixError::InvalidConfig(format!(
                "output suffix must not contain path separators, got '{}'",
                suffix
            )));
        }
        Ok(self.config)
    }
}
