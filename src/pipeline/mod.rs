//! Cleanup stages for PDF-converted Markdown.
//!
//! ## Data Flow
//!
//! ```text
//! raw text ──▶ fences/headers/page markers ──▶ line scan ──▶ whitespace/bullets/joins ──▶ trim
//!              (postprocess)                   (lines)       (postprocess)
//! ```
//!
//! 1. [`postprocess`] — the ordered rule table and the whole-text regex rules
//! 2. [`lines`]       — the stateful line scan (page numbers, blank runs,
//!    sentence-like headings)

pub mod lines;
pub mod postprocess;

/// Whitespace for trimming and blank-line checks: Unicode whitespace plus the
/// ASCII information separators U+001C–U+001F. The rule regexes use the same
/// set (`[\s\x1C-\x1F]`).
pub(crate) fn is_blank_char(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

pub(crate) fn trim_blank(s: &str) -> &str {
    s.trim_matches(is_blank_char)
}
