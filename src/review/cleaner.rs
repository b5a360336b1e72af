//! Removes model reasoning artifacts and chatter around the review body.

use super::parser::{header_section, HEADER_LINE};
use regex::Regex;
use std::sync::LazyLock;

/// Closed reasoning blocks such as `<think>...</think>`
static THINK_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(?:think|thinking|reasoning)>.*?</(?:think|thinking|reasoning)>").unwrap()
});

/// Everything up to the last closing reasoning tag, for responses whose opener was cut off
static ORPHAN_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)^.*</(?:think|thinking|reasoning)>").unwrap());

/// An opener that is never closed, as in a truncated reasoning stream; runs to the end
static UNCLOSED_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<(?:think|thinking|reasoning)>.*$").unwrap());

/// A response wrapped as a whole in one code fence
static CODE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^\s*```[A-Za-z0-9_-]*[ \t]*\n(.*?)\n?[ \t]*```\s*$").unwrap());

static EXCESS_BLANK_LINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n[ \t]*\n(?:[ \t]*\n)+").unwrap());

/// Strip thinking steps, wrapping fences and preamble from a raw model response.
///
/// Returns an empty string when nothing usable remains.
pub fn clean_llm_output(raw: &str) -> String {
    let text = raw.replace("\r\n", "\n");

    let text = THINK_BLOCK.replace_all(&text, "");
    let text = ORPHAN_CLOSE.replace(&text, "");
    let text = UNCLOSED_OPEN.replace(&text, "");

    let fenced = CODE_FENCE.captures(&text).map(|caps| caps[1].to_string());
    let text = match fenced {
        Some(inner) => inner,
        None => text.into_owned(),
    };

    let text = strip_preamble(&text);

    let cleaned = EXCESS_BLANK_LINES.replace_all(text, "\n\n").trim().to_string();
    if cleaned.len() != raw.trim().len() {
        tracing::debug!(
            "Cleaned LLM output from {} to {} chars",
            raw.len(),
            cleaned.len()
        );
    }
    cleaned
}

/// Drop anything before the first header that names a review section
fn strip_preamble(text: &str) -> &str {
    let first_known = HEADER_LINE
        .captures_iter(text)
        .find(|caps| header_section(&caps[2]).is_some())
        .and_then(|caps| caps.get(0));

    match first_known {
        Some(m) if m.start() > 0 => {
            tracing::debug!("Dropping {} chars of preamble before first section", m.start());
            &text[m.start()..]
        }
        _ => text,
    }
}
