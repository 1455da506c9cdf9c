//! Line-level scan: the one cleanup pass that needs to see its own output.
//!
//! Blank-line collapsing depends on the previously *kept* line, so it cannot be
//! expressed as a stateless regex. The same pass drops page numbers and
//! demotes sentence-like `##` headings, since all three decide line by line.

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

use super::trim_blank;

/// `## 12`: a page number the converter promoted to a heading.
static RE_NUMBER_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^##[\s\x1C-\x1F]*\d+[\s\x1C-\x1F]*$").unwrap());

/// A naked page number.
static RE_NUMBER_ONLY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+$").unwrap());

/// `## Sentence case text ending in a period.`
static RE_SENTENCE_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^##[\s\x1C-\x1F]+[A-Z][a-z]+.*\.$").unwrap());

/// Headings at least this long (in characters) are kept as headings.
const SENTENCE_HEADING_MAX_CHARS: usize = 50;

/// Run the line scan over a whole document.
///
/// For each line, judged on its trimmed content:
/// - `## <digits>` and bare digits are dropped
/// - a blank line is kept only if the last kept line was not blank
/// - a short `## Sentence.` heading becomes `**Sentence**`
/// - anything else is kept verbatim (untrimmed)
pub fn scan_lines(input: &str) -> String {
    let mut kept: Vec<Cow<'_, str>> = Vec::new();

    for line in input.split('\n') {
        let stripped = trim_blank(line);

        if RE_NUMBER_HEADING.is_match(stripped) || RE_NUMBER_ONLY.is_match(stripped) {
            continue;
        }

        if stripped.is_empty() {
            if kept.last().is_some_and(|prev| trim_blank(prev).is_empty()) {
                continue;
            }
            kept.push(Cow::Borrowed(line));
            continue;
        }

        if let Some(text) = demote_sentence_heading(stripped) {
            kept.push(Cow::Owned(text));
            continue;
        }

        kept.push(Cow::Borrowed(line));
    }

    kept.join("\n")
}

/// Short, sentence-cased, period-terminated `##` headings are body text the
/// converter mistook for a heading. Returns the bold replacement, if any.
fn demote_sentence_heading(stripped: &str) -> Option<String> {
    if stripped.chars().count() >= SENTENCE_HEADING_MAX_CHARS
        || !RE_SENTENCE_HEADING.is_match(stripped)
    {
        return None;
    }
    let text = stripped.replace("## ", "");
    Some(format!("**{}**", text.trim_end_matches('.')))
}
