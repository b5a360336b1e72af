/// Predefined prompts for the review and editor tasks
pub const SECTION_SUMMARY: &str = "## Summary";
pub const SECTION_STRENGTHS: &str = "## Strengths";
pub const SECTION_WEAKNESSES: &str = "## Weaknesses / Areas for Improvement";
pub const SECTION_RECOMMENDATION: &str = "## Recommendation";

pub const RECOMMENDATION_OPTIONS: [&str; 4] = ["Accept", "Minor Revision", "Major Revision", "Reject"];

const REVIEW_PROMPT_TEMPLATE: &str = "You are an expert academic reviewer simulating the peer review process for a research journal.
Your task is to provide a structured, concise, and objective review of the following academic paper text.

Instructions:

Thoroughly read and analyze the provided paper text.

Generate a review consisting ONLY of the following sections, in this exact order:

{summary}

{strengths}

{weaknesses}

{recommendation}

Under '{summary}', provide a brief (2-4 sentences) overview of the paper's main topic, methodology, and key findings.

Under '{strengths}', list the major positive aspects of the paper (e.g., novelty, methodology, clarity, impact) using bullet points.

Under '{weaknesses}', list the major weaknesses or areas needing improvement (e.g., methodology flaws, lack of clarity, insufficient evidence, limited scope) using bullet points.

Under '{recommendation}', state ONE recommendation from the following options: {options}. Provide NO additional justification or explanation in this section, only the single recommendation word/phrase.

CRITICAL: Do NOT include any preamble, conversational text, apologies, self-correction, or any text outside of the EXACT structure defined above. Your entire output must start directly with '{summary}' and end immediately after the recommendation. Do not include comments about your own reasoning process.

Paper Text to Review:
--- START PAPER ---
{paper}
--- END PAPER ---

Review Output:
";

const SPECIALTY_PROMPT_TEMPLATE: &str = "You are the handling editor of a multidisciplinary research journal.
Based on the abstract below, identify the single academic field and sub-field the paper belongs to,
so it can be routed to a suitable reviewer.

Answer with ONE line in the form \"Field - Sub-field\" (for example \"Computer Science - Artificial Intelligence\"
or \"Medicine - Oncology\"). Do not add any explanation.

Abstract:
{abstract}
{keywords}
Specialty:";

/// Quoted, comma-separated list of allowed recommendations
pub fn recommendation_options() -> String {
    RECOMMENDATION_OPTIONS
        .iter()
        .map(|opt| format!("\"{}\"", opt))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Build the peer-review prompt for a paper
pub fn build_review_prompt(paper: &str) -> String {
    // Paper text goes in last so header placeholders inside it are left alone.
    REVIEW_PROMPT_TEMPLATE
        .replace("{summary}", SECTION_SUMMARY)
        .replace("{strengths}", SECTION_STRENGTHS)
        .replace("{weaknesses}", SECTION_WEAKNESSES)
        .replace("{recommendation}", SECTION_RECOMMENDATION)
        .replace("{options}", &recommendation_options())
        .replace("{paper}", paper)
}

/// Build the editor prompt that classifies a paper's specialty
pub fn build_specialty_prompt(abstract_text: &str, keywords: Option<&str>) -> String {
    let keywords_line = keywords
        .map(|k| format!("\nKeywords: {}\n", k))
        .unwrap_or_default();

    // Split on the abstract slot so neither user value is rescanned for placeholders
    let (head, tail) = SPECIALTY_PROMPT_TEMPLATE
        .split_once("{abstract}")
        .unwrap_or((SPECIALTY_PROMPT_TEMPLATE, ""));
    format!("{}{}{}", head, abstract_text, tail.replace("{keywords}", &keywords_line))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_prompt_lists_headers_in_order() {
        let prompt = build_review_prompt("Some paper text.");

        let summary = prompt.find(SECTION_SUMMARY).unwrap();
        let strengths = prompt.find(SECTION_STRENGTHS).unwrap();
        let weaknesses = prompt.find(SECTION_WEAKNESSES).unwrap();
        let recommendation = prompt.find(SECTION_RECOMMENDATION).unwrap();
        assert!(summary < strengths && strengths < weaknesses && weaknesses < recommendation);
    }

    #[test]
    fn test_review_prompt_embeds_paper_and_options() {
        let prompt = build_review_prompt("We study {summary} tokens.");

        assert!(prompt.contains("--- START PAPER ---\nWe study {summary} tokens.\n--- END PAPER ---"));
        assert!(prompt.contains("\"Accept\", \"Minor Revision\", \"Major Revision\", \"Reject\""));
        assert!(prompt.trim_end().ends_with("Review Output:"));
    }

    #[test]
    fn test_specialty_prompt_keywords_optional() {
        let with = build_specialty_prompt("We propose X.", Some("graphs, GNN"));
        assert!(with.contains("Keywords: graphs, GNN"));
        assert!(with.contains("We propose X."));

        let without = build_specialty_prompt("We propose X.", None);
        assert!(!without.contains("Keywords:"));
    }

    #[test]
    fn test_specialty_prompt_leaves_braces_in_user_text() {
        let prompt = build_specialty_prompt("We study {keywords} templating.", Some("{abstract}, parsing"));
        assert!(prompt.contains("We study {keywords} templating."));
        assert!(prompt.contains("Keywords: {abstract}, parsing"));
        assert_eq!(prompt.matches("We study").count(), 1);
    }
}
