//! Post-processing: deterministic cleanup of PDF-converted Markdown.
//!
//! ## What goes wrong in PDF → Markdown conversion?
//!
//! Text extractors see a PDF as positioned glyphs, not as a document. The
//! Markdown they emit is full of debris that is obvious to a human reader:
//!
//! - page footers (`-- 3 of 364 --`, `Page 7`, `Página 12`) and bare page
//!   numbers, sometimes promoted to `## 12` headings
//! - whole paragraphs wrapped in ```` ``` ```` fences
//! - `####`/`#####` headings for what was a plain section title
//! - `•`, `◦`, `▪` glyphs and `–`/`—` dashes instead of list syntax
//! - a hard line break wherever the PDF line wrapped mid-sentence
//!
//! This module applies 11 cheap regex/string rules that remove that debris.
//! No rule parses Markdown structure; each one is a pure `&str → String`
//! function applied exactly once.
//!
//! ## Rule Order
//!
//! Order matters. Page markers are blanked before the line scan so the scan
//! collapses the blank they leave behind; trailing whitespace is stripped
//! before bullet rewriting and line joining so a line ending `"word  "` still
//! counts as ending in a letter.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use super::lines::scan_lines;
use super::trim_blank;

/// A single named cleanup pass.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    /// Short identifier used in logs.
    pub name: &'static str,
    /// The rewrite itself.
    pub apply: fn(&str) -> String,
}

/// All cleanup passes, in application order.
pub const RULES: &[Rule] = &[
    Rule { name: "strip_code_fences", apply: strip_code_fences },
    Rule { name: "normalise_headers", apply: normalise_headers },
    Rule { name: "remove_page_markers", apply: remove_page_markers },
    Rule { name: "scan_lines", apply: scan_lines },
    Rule { name: "trim_leading_newlines", apply: trim_leading_newlines },
    Rule { name: "collapse_blank_runs", apply: collapse_blank_runs },
    Rule { name: "strip_trailing_whitespace", apply: strip_trailing_whitespace },
    Rule { name: "normalise_bullet_glyphs", apply: normalise_bullet_glyphs },
    Rule { name: "normalise_dash_bullets", apply: normalise_dash_bullets },
    Rule { name: "join_wrapped_lines", apply: join_wrapped_lines },
    Rule { name: "trim_document", apply: trim_document },
];

/// Apply every cleanup rule to a whole document.
///
/// Rules (applied in order):
/// 1. Unwrap ```` ``` ```` fenced blocks and blank out stray fence lines
/// 2. Collapse `####`/`#####` headings to `###`
/// 3. Blank out page-marker lines (`-- N of M --`, `Page N`, `Página N`)
/// 4. Line scan: drop page numbers, collapse blank runs, demote sentence-like
///    `##` headings to bold text (see [`scan_lines`])
/// 5. Remove leading newlines
/// 6. Collapse 3+ consecutive newlines to 2
/// 7. Trim trailing spaces/tabs per line
/// 8. Rewrite `•`, `◦`, `▪` bullets as Markdown list items
/// 9. Rewrite `–`/`—` dash bullets as `- `
/// 10. Join lines broken between two lowercase letters (one pass)
/// 11. Trim the whole document
///
/// Never fails; a rule that finds nothing to do returns its input unchanged.
pub fn fix_markdown(input: &str) -> String {
    RULES.iter().fold(input.to_string(), |text, rule| {
        let next = (rule.apply)(&text);
        if next != text {
            trace!(
                rule = rule.name,
                before = text.len(),
                after = next.len(),
                "rule rewrote document"
            );
        }
        next
    })
}

// ── Rule 1: Strip code fences ────────────────────────────────────────────────

static RE_FENCED_BLOCK: Lazy<Regex> = Lazy::new(|| Regex::new(r"```\n([^`]+?)\n```").unwrap());
static RE_STRAY_FENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^```$").unwrap());

fn strip_code_fences(input: &str) -> String {
    let s = RE_FENCED_BLOCK.replace_all(input, "${1}");
    RE_STRAY_FENCE.replace_all(&s, "").into_owned()
}

// ── Rule 2: Normalise over-nested headers ────────────────────────────────────

static RE_H5: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^#####[\s\x1C-\x1F]+").unwrap());
static RE_H4: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^####[\s\x1C-\x1F]+").unwrap());

fn normalise_headers(input: &str) -> String {
    let s = RE_H5.replace_all(input, "### ");
    RE_H4.replace_all(&s, "### ").into_owned()
}

// ── Rule 3: Remove page markers ──────────────────────────────────────────────

static RE_PAGE_MARKERS: Lazy<[Regex; 3]> = Lazy::new(|| {
    [
        Regex::new(
            r"(?m)^--[\s\x1C-\x1F]*\d+[\s\x1C-\x1F]+of[\s\x1C-\x1F]+\d+[\s\x1C-\x1F]*--$",
        )
        .unwrap(),
        Regex::new(r"(?m)^Page[\s\x1C-\x1F]+\d+$").unwrap(),
        Regex::new(r"(?m)^Página[\s\x1C-\x1F]+\d+$").unwrap(),
    ]
});

/// Marker lines are emptied, not spliced out; the blank left behind is
/// collapsed by the line scan.
fn remove_page_markers(input: &str) -> String {
    RE_PAGE_MARKERS
        .iter()
        .fold(input.to_string(), |s, re| re.replace_all(&s, "").into_owned())
}

// ── Rule 5: Trim leading newlines ────────────────────────────────────────────

fn trim_leading_newlines(input: &str) -> String {
    input.trim_start_matches('\n').to_string()
}

// ── Rule 6: Collapse blank runs ──────────────────────────────────────────────

static RE_BLANK_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

fn collapse_blank_runs(input: &str) -> String {
    RE_BLANK_RUN.replace_all(input, "\n\n").into_owned()
}

// ── Rule 7: Trim trailing whitespace per line ────────────────────────────────

static RE_TRAILING_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)[ \t]+$").unwrap());

fn strip_trailing_whitespace(input: &str) -> String {
    RE_TRAILING_WS.replace_all(input, "").into_owned()
}

// ── Rule 8: Bullet glyphs ────────────────────────────────────────────────────

static RE_BULLETS: Lazy<[(Regex, &'static str); 3]> = Lazy::new(|| {
    [
        (Regex::new(r"(?m)^•[\s\x1C-\x1F]*").unwrap(), "- "),
        (Regex::new(r"(?m)^◦[\s\x1C-\x1F]*").unwrap(), "  - "),
        (Regex::new(r"(?m)^▪[\s\x1C-\x1F]*").unwrap(), "  - "),
    ]
});

fn normalise_bullet_glyphs(input: &str) -> String {
    RE_BULLETS.iter().fold(input.to_string(), |s, (re, rep)| {
        re.replace_all(&s, *rep).into_owned()
    })
}

// ── Rule 9: Dash bullets ─────────────────────────────────────────────────────

// En dash first, then em dash; whitespace after the dash is required. Two
// passes, not one class: `\s+` may swallow a newline, and an em dash reached
// that way must survive the en-dash pass.
static RE_DASH_BULLETS: Lazy<[Regex; 2]> = Lazy::new(|| {
    [
        Regex::new(r"(?m)^–[\s\x1C-\x1F]+").unwrap(),
        Regex::new(r"(?m)^—[\s\x1C-\x1F]+").unwrap(),
    ]
});

fn normalise_dash_bullets(input: &str) -> String {
    RE_DASH_BULLETS
        .iter()
        .fold(input.to_string(), |s, re| re.replace_all(&s, "- ").into_owned())
}

// ── Rule 10: Join wrapped lines ──────────────────────────────────────────────
//
// PDF extractors emit a newline wherever the rendered line wrapped. When a
// line ends in a lowercase letter and the next starts with one, the break is
// almost certainly mid-sentence.
//
// Matches do not overlap, so in "a\nb\nc" only the first break is joined
// ("a b\nc"). This is a single pass, not a fixed point.

static RE_WRAPPED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-záéíóúñ])\n([a-záéíóúñ])").unwrap());

fn join_wrapped_lines(input: &str) -> String {
    RE_WRAPPED.replace_all(input, "${1} ${2}").into_owned()
}

// ── Rule 11: Trim document ───────────────────────────────────────────────────

fn trim_document(input: &str) -> String {
    trim_blank(input).to_string()
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_fenced_block() {
        assert_eq!(strip_code_fences("```\nfoo\nbar\n```"), "foo\nbar");
    }

    #[test]
    fn test_strip_stray_fence() {
        assert_eq!(strip_code_fences("text\n```\nmore"), "text\n\nmore");
    }

    #[test]
    fn test_fence_with_inner_backtick_kept_as_block() {
        // Content containing a backtick is not a plain wrapped block; only the
        // bare fence lines are blanked.
        let input = "```\nuse `x`\n```";
        assert_eq!(strip_code_fences(input), "\nuse `x`\n");
    }

    #[test]
    fn test_normalise_headers() {
        assert_eq!(normalise_headers("##### Title"), "### Title");
        assert_eq!(normalise_headers("#### Title"), "### Title");
        assert_eq!(normalise_headers("text\n#####   Spaced"), "text\n### Spaced");
    }

    #[test]
    fn test_headers_outside_range_untouched() {
        assert_eq!(normalise_headers("###### Deep"), "###### Deep");
        assert_eq!(normalise_headers("### Keep"), "### Keep");
        assert_eq!(normalise_headers("## Keep"), "## Keep");
        assert_eq!(normalise_headers("####NoSpace"), "####NoSpace");
    }

    #[test]
    fn test_remove_page_markers() {
        assert_eq!(remove_page_markers("a\n-- 3 of 364 --\nb"), "a\n\nb");
        assert_eq!(remove_page_markers("a\n--3 of 364--\nb"), "a\n\nb");
        assert_eq!(remove_page_markers("Page 7"), "");
        assert_eq!(remove_page_markers("Página 12"), "");
    }

    #[test]
    fn test_page_marker_must_be_whole_line() {
        let input = "See Page 7\nPage 7 of the manual\n-- 3 of 364 -- tail";
        assert_eq!(remove_page_markers(input), input);
    }

    #[test]
    fn test_trim_leading_newlines() {
        assert_eq!(trim_leading_newlines("\n\n\nabc\n"), "abc\n");
        assert_eq!(trim_leading_newlines("  \nabc"), "  \nabc");
    }

    #[test]
    fn test_collapse_blank_runs() {
        assert_eq!(collapse_blank_runs("a\n\n\n\nb"), "a\n\nb");
        assert_eq!(collapse_blank_runs("a\n\n\nb"), "a\n\nb");
        assert_eq!(collapse_blank_runs("a\n\nb"), "a\n\nb");
    }

    #[test]
    fn test_strip_trailing_whitespace() {
        assert_eq!(strip_trailing_whitespace("a  \t\nb "), "a\nb");
        assert_eq!(strip_trailing_whitespace("  indented"), "  indented");
    }

    #[test]
    fn test_bullet_glyphs() {
        assert_eq!(
            normalise_bullet_glyphs("• Item one\n◦ Sub item\n▪ Square"),
            "- Item one\n  - Sub item\n  - Square"
        );
        assert_eq!(normalise_bullet_glyphs("•Tight"), "- Tight");
    }

    #[test]
    fn test_bullet_glyph_mid_line_untouched() {
        assert_eq!(normalise_bullet_glyphs("a • b"), "a • b");
    }

    #[test]
    fn test_dash_bullets() {
        assert_eq!(
            normalise_dash_bullets("– uno\n— dos\n–tres"),
            "- uno\n- dos\n–tres"
        );
    }

    #[test]
    fn test_dash_bullets_run_in_order() {
        // The en-dash pass consumes the newline; the em dash it pulls onto the
        // same line is no longer at a line start.
        assert_eq!(normalise_dash_bullets("–\n— x"), "- — x");
        assert_eq!(normalise_dash_bullets("—\n– x"), "- - x");
    }

    #[test]
    fn test_information_separators_count_as_whitespace() {
        assert_eq!(normalise_headers("#####\x1fTitle"), "### Title");
        assert_eq!(remove_page_markers("Page\x1c7"), "");
        assert_eq!(trim_document("\x1d text \x1e"), "text");
    }

    #[test]
    fn test_join_wrapped_lines() {
        assert_eq!(join_wrapped_lines("hola mun\ndo amigo"), "hola mun do amigo");
        assert_eq!(join_wrapped_lines("canción\nñandú"), "canción ñandú");
    }

    #[test]
    fn test_join_is_single_pass() {
        assert_eq!(join_wrapped_lines("a\nb\nc"), "a b\nc");
    }

    #[test]
    fn test_join_requires_lowercase_both_sides() {
        assert_eq!(join_wrapped_lines("end.\nnext"), "end.\nnext");
        assert_eq!(join_wrapped_lines("word\nWord"), "word\nWord");
        assert_eq!(join_wrapped_lines("word\n\nword"), "word\n\nword");
    }

    #[test]
    fn test_rules_table_order() {
        let names: Vec<&str> = RULES.iter().map(|r| r.name).collect();
        assert_eq!(names.first(), Some(&"strip_code_fences"));
        assert_eq!(names.last(), Some(&"trim_document"));
        assert_eq!(names.len(), 11);
    }

    #[test]
    fn test_fix_markdown_end_to_end() {
        let input = "##### Intro\n\n\n\nPage 5\n• First point\n◦ Sub point\n## 3\n42\n";
        assert_eq!(
            fix_markdown(input),
            "### Intro\n\n- First point\n  - Sub point"
        );
    }

    #[test]
    fn test_fix_markdown_removes_page_lines() {
        let input = "Intro text.\n-- 3 of 364 --\nPage 7\nPágina 12\nMore text.";
        let out = fix_markdown(input);
        assert_eq!(out, "Intro text.\n\nMore text.");
        for marker in ["-- 3 of 364 --", "Page 7", "Página 12"] {
            assert!(!out.lines().any(|l| l == marker), "{marker} survived");
        }
    }

    #[test]
    fn test_fix_markdown_blank_run() {
        assert_eq!(
            fix_markdown("First paragraph.\n\n\n\nSecond paragraph."),
            "First paragraph.\n\nSecond paragraph."
        );
    }

    #[test]
    fn test_fix_markdown_demotes_sentence_header() {
        assert_eq!(
            fix_markdown("## Nota importante.\nTexto"),
            "**Nota importante**\nTexto"
        );
    }

    #[test]
    fn test_fix_markdown_unwraps_fenced_paragraph() {
        let input = "```\nel texto sigue\naquí mismo\n```";
        assert_eq!(fix_markdown(input), "el texto sigue aquí mismo");
    }

    #[test]
    fn test_fix_markdown_empty() {
        assert_eq!(fix_markdown(""), "");
        assert_eq!(fix_markdown("\n\n  \n"), "");
    }

    #[test]
    fn test_fix_markdown_idempotent() {
        let fixtures = [
            "##### Intro\n\n\n\nPage 5\n• First point\n◦ Sub point\n## 3\n42\n",
            "# Manual\n\n## Nota importante.\n\nEl sistema permite\nregistrar operaciones.\n\n– uno\n— dos\n",
            "```\nBloque envuelto\n```\n\n-- 1 of 2 --\n\n#### Sección\n\nTexto final.   \n",
        ];
        for input in fixtures {
            let once = fix_markdown(input);
            assert_eq!(fix_markdown(&once), once, "not idempotent for {input:?}");
        }
    }
}
