use super::{Recommendation, Review};
use crate::llm::prompts;
use regex::Regex;
use std::sync::LazyLock;

/// A markdown header line; group 1 is the `#` run, group 2 the title text
pub(crate) static HEADER_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*(#{1,6})[ \t]+(.+?)[ \t]*$").unwrap());

/// The four sections of a review, in output order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Summary,
    Strengths,
    Weaknesses,
    Recommendation,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Summary,
        Section::Strengths,
        Section::Weaknesses,
        Section::Recommendation,
    ];

    /// Key used in JSON output and log messages
    pub fn key(self) -> &'static str {
        match self {
            Section::Summary => "summary",
            Section::Strengths => "strengths",
            Section::Weaknesses => "weaknesses",
            Section::Recommendation => "recommendation",
        }
    }

    /// Header written in text output and requested in the prompt
    pub fn header(self) -> &'static str {
        match self {
            Section::Summary => prompts::SECTION_SUMMARY,
            Section::Strengths => prompts::SECTION_STRENGTHS,
            Section::Weaknesses => prompts::SECTION_WEAKNESSES,
            Section::Recommendation => prompts::SECTION_RECOMMENDATION,
        }
    }

    /// Prefix a normalized header title must start with
    fn keyword(self) -> &'static str {
        match self {
            Section::Summary => "summary",
            Section::Strengths => "strength",
            Section::Weaknesses => "weakness",
            Section::Recommendation => "recommendation",
        }
    }
}

fn normalize_title(title: &str) -> String {
    title
        .trim()
        .trim_matches(|c: char| c == '*' || c == '_' || c == '`')
        .trim()
        .trim_end_matches(':')
        .trim()
        .to_lowercase()
}

/// Map a header title to the section it names. First keyword match wins.
pub fn header_section(title: &str) -> Option<Section> {
    let normalized = normalize_title(title);
    Section::ALL
        .into_iter()
        .find(|section| normalized.starts_with(section.keyword()))
}

/// Body text written on the header line itself, as in `## Recommendation: Accept`
fn inline_body(title: &str, section: Section) -> Option<&str> {
    let (head, rest) = title.split_once(':')?;
    if header_section(head) != Some(section) {
        return None;
    }
    let rest = rest
        .trim()
        .trim_matches(|c: char| c == '*' || c == '_')
        .trim();
    (!rest.is_empty()).then_some(rest)
}

/// Split cleaned review text into its four sections.
///
/// Sections that never appear are left empty. Text under `##` (or deeper)
/// headers that do not name a section is discarded; a single-`#` line that
/// names no section is ordinary body text.
pub fn parse_review(text: &str) -> Review {
    let mut review = Review::default();
    let mut current: Option<Section> = None;

    for line in text.lines() {
        if let Some(caps) = HEADER_LINE.captures(line) {
            let title = &caps[2];
            match header_section(title) {
                Some(section) => {
                    tracing::debug!("Found section header '{}' ({})", title, section.key());
                    current = Some(section);
                    if let Some(body) = inline_body(title, section) {
                        let field = review.field_mut(section);
                        field.push_str(body);
                        field.push('\n');
                    }
                    continue;
                }
                None if caps[1].len() > 1 => {
                    tracing::warn!("Ignoring unexpected header and its content: '{}'", title);
                    current = None;
                    continue;
                }
                None => {}
            }
        }

        if let Some(section) = current {
            let field = review.field_mut(section);
            field.push_str(line);
            field.push('\n');
        }
    }

    for section in Section::ALL {
        let field = review.field_mut(section);
        *field = field.trim().to_string();
    }

    normalize_recommendation(&mut review);

    for key in review.missing_sections() {
        tracing::warn!("Review section '{}' is missing or empty", key);
    }

    review
}

fn normalize_recommendation(review: &mut Review) {
    if review.recommendation.is_empty() {
        return;
    }
    match Recommendation::parse(&review.recommendation) {
        Some(rec) => review.recommendation = rec.to_string(),
        None => tracing::warn!(
            "Unrecognized recommendation '{}'; keeping it as written",
            review.recommendation
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = "## Summary
The paper proposes a sparse attention method.
It reports gains on two benchmarks.

## Strengths
- Novel idea
- Clear writing

## Weaknesses / Areas for Improvement
- Small evaluation

## Recommendation
Minor Revision";

    #[test]
    fn test_parses_all_sections() {
        let review = parse_review(FULL);

        assert_eq!(
            review.summary,
            "The paper proposes a sparse attention method.\nIt reports gains on two benchmarks."
        );
        assert_eq!(review.strengths, "- Novel idea\n- Clear writing");
        assert_eq!(review.weaknesses, "- Small evaluation");
        assert_eq!(review.recommendation, "Minor Revision");
        assert!(review.missing_sections().is_empty());
    }

    #[test]
    fn test_missing_section_is_empty_string() {
        let text = "## Summary\nShort.\n## Recommendation\nReject";
        let review = parse_review(text);

        assert_eq!(review.summary, "Short.");
        assert_eq!(review.strengths, "");
        assert_eq!(review.weaknesses, "");
        assert_eq!(review.recommendation, "Reject");
        assert_eq!(review.missing_sections(), vec!["strengths", "weaknesses"]);
    }

    #[test]
    fn test_unknown_header_content_dropped() {
        let text = "## Summary\nShort.\n## Questions for Authors\n- Why?\n## Strengths\n- Good";
        let review = parse_review(text);

        assert_eq!(review.summary, "Short.");
        assert_eq!(review.strengths, "- Good");
        assert!(!review.summary.contains("Why?"));
    }

    #[test]
    fn test_text_after_header_colon_kept() {
        let text = "## Summary: A study of X.\n## Strengths\n- A\n## **Recommendation:** Accept";
        let review = parse_review(text);

        assert_eq!(review.summary, "A study of X.");
        assert_eq!(review.strengths, "- A");
        assert_eq!(review.recommendation, "Accept");
    }

    #[test]
    fn test_inline_summary_continues_on_next_lines() {
        let review = parse_review("## Summary: First line.\nSecond line.");
        assert_eq!(review.summary, "First line.\nSecond line.");
    }

    #[test]
    fn test_hash_prefixed_sentence_is_body_text() {
        let text = "## Weaknesses\n- Small sample.\n# of runs is unreported.\n- No ablation.\n## Recommendation\nReject";
        let review = parse_review(text);

        assert_eq!(
            review.weaknesses,
            "- Small sample.\n# of runs is unreported.\n- No ablation."
        );
        assert_eq!(review.recommendation, "Reject");
    }

    #[test]
    fn test_header_variants_recognized() {
        let text = "# **Summary:**\nS\n### Strengths\n- A\n## Weaknesses\n- B\n## Recommendation:\n**accept.**";
        let review = parse_review(text);

        assert_eq!(review.summary, "S");
        assert_eq!(review.strengths, "- A");
        assert_eq!(review.weaknesses, "- B");
        assert_eq!(review.recommendation, "Accept");
    }

    #[test]
    fn test_repeated_header_appends() {
        let text = "## Strengths\n- A\n## Summary\nS\n## Strengths\n- B";
        let review = parse_review(text);

        assert_eq!(review.strengths, "- A\n- B");
    }

    #[test]
    fn test_unrecognized_recommendation_kept_raw() {
        let review = parse_review("## Recommendation\nBorderline, lean accept");
        assert_eq!(review.recommendation, "Borderline, lean accept");
    }

    #[test]
    fn test_header_section_first_match() {
        assert_eq!(header_section("Weaknesses / Areas for Improvement"), Some(Section::Weaknesses));
        assert_eq!(header_section("Recommendations"), Some(Section::Recommendation));
        assert_eq!(header_section("Overall Assessment"), None);
    }

    #[test]
    fn test_empty_input() {
        let review = parse_review("");
        assert!(review.is_empty());
    }
}
