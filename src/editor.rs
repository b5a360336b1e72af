//! Editor-side triage: working out which field a paper belongs to.

use crate::llm::{prompts, LlmServiceError, TextGenerator};
use crate::review::clean_llm_output;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Temperature used for classification when none is configured
pub const SPECIALTY_TEMPERATURE: f32 = 0.3;

const ABSTRACT_FALLBACK_CHARS: usize = 2000;

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("Cannot determine specialty without an abstract")]
    MissingAbstract,

    #[error(transparent)]
    Llm(#[from] LlmServiceError),
}

static ABSTRACT_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?im)^[ \t#*]*abstract\b[ \t*]*[:.\-—]?[ \t]*").unwrap());

static KEYWORDS_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?im)^[ \t#*]*(?:keywords|key words|index terms)[ \t*]*[:\-—][ \t*]*(.+)$").unwrap());

/// Pull the abstract out of a paper, falling back to its opening characters
pub fn extract_abstract(paper: &str) -> String {
    if let Some(m) = ABSTRACT_HEADING.find(paper) {
        let rest = &paper[m.end()..];
        let body: Vec<&str> = rest
            .split("\n\n")
            .map(str::trim)
            .skip_while(|para| para.is_empty())
            .take_while(|para| !para.is_empty() && !looks_like_heading(para))
            .take(3)
            .collect();
        let text = body.join("\n\n");
        if !text.is_empty() {
            return text;
        }
    }

    tracing::debug!("No abstract heading found; using the first {} characters", ABSTRACT_FALLBACK_CHARS);
    paper.trim().chars().take(ABSTRACT_FALLBACK_CHARS).collect()
}

/// Read a `Keywords:` line, if the paper has one
pub fn extract_keywords(paper: &str) -> Option<String> {
    KEYWORDS_LINE
        .captures(paper)
        .map(|caps| caps[1].trim().trim_end_matches('.').to_string())
        .filter(|k| !k.is_empty())
}

fn looks_like_heading(paragraph: &str) -> bool {
    let first_line = paragraph.lines().next().unwrap_or_default().trim();
    first_line.starts_with('#')
        || KEYWORDS_LINE.is_match(first_line)
        || (first_line.len() < 60
            && !first_line.ends_with('.')
            && first_line
                .split_whitespace()
                .next()
                .is_some_and(|w| w.trim_end_matches('.').parse::<u32>().is_ok() || w.eq_ignore_ascii_case("introduction")))
}

/// Asks the model where a paper should be routed
pub struct EditorAgent<G> {
    generator: G,
}

impl<G: TextGenerator> EditorAgent<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    /// Determine the likely academic specialty, e.g. "Medicine - Oncology"
    pub async fn determine_specialty(
        &self,
        paper_abstract: &str,
        keywords: Option<&str>,
    ) -> Result<String, EditorError> {
        if paper_abstract.trim().is_empty() {
            return Err(EditorError::MissingAbstract);
        }

        let prompt = prompts::build_specialty_prompt(paper_abstract, keywords);
        tracing::info!("Determining paper specialty using LLM...");

        let raw = self
            .generator
            .generate_with_default_temperature(&prompt, SPECIALTY_TEMPERATURE)
            .await?;

        let specialty = clean_llm_output(&raw)
            .lines()
            .map(|line| {
                line.trim()
                    .trim_start_matches("Specialty:")
                    .trim()
                    .trim_matches(|c: char| c == '*' || c == '"')
                    .trim()
            })
            .find(|line| !line.is_empty())
            .map(str::to_string)
            .ok_or(LlmServiceError::EmptyResponse)?;

        tracing::info!("LLM suggested specialty: {}", specialty);
        Ok(specialty)
    }
}
