//! # pdfmd-fix
//!
//! Clean up Markdown produced by automated PDF-to-Markdown conversion.
//!
//! ## Why this crate?
//!
//! Text-layer PDF extractors produce Markdown that is *almost* right: the
//! words are there, but so are page footers, bare page numbers, paragraphs
//! wrapped in code fences, `#####` headings, `•` glyphs, and a hard line break
//! wherever the PDF wrapped a line. This crate removes that debris with an
//! ordered list of deterministic text rules. It never parses Markdown and
//! never fails on valid text.
//!
//! ## Pipeline Overview
//!
//! ```text
//! text
//!  │
//!  ├─  1. Fences       unwrap ``` blocks, blank stray fence lines
//!  ├─  2. Headers      ####/##### → ###
//!  ├─  3. Page markers "-- 3 of 364 --", "Page 7", "Página 12"
//!  ├─  4. Line scan    page numbers, blank runs, "## Sentence." → **Sentence**
//!  ├─  5-7. Whitespace leading newlines, blank runs, trailing spaces
//!  ├─  8-9. Bullets    •/◦/▪ and –/— → Markdown list items
//!  ├─ 10. Joins        "mun\ndo" → "mun do"
//!  └─ 11. Trim
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use pdfmd_fix::fix_markdown;
//!
//! let fixed = fix_markdown("##### Intro\n\n\n\nPage 5\n• First point\n◦ Sub point\n## 3\n42\n");
//! assert_eq!(fixed, "### Intro\n\n- First point\n  - Sub point");
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `fix-markdown` binary (clap + anyhow + tracing-subscriber) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod fix;
pub mod output;
pub mod pipeline;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{FixConfig, FixConfigBuilder, DEFAULT_OUTPUT_SUFFIX};
pub use error::FixError;
pub use fix::{default_output_path, fix_file, fix_str};
pub use output::{FixOutput, FixReport, FixStats};
pub use pipeline::postprocess::{fix_markdown, Rule, RULES};
