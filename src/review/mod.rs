pub mod cleaner;
pub mod parser;

use crate::llm::{prompts, LlmServiceError, TextGenerator};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub use cleaner::clean_llm_output;
pub use parser::{parse_review, Section};

/// A structured peer review
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub summary: String,
    pub strengths: String,
    pub weaknesses: String,
    pub recommendation: String,
}

impl Review {
    pub fn field(&self, section: Section) -> &str {
        match section {
            Section::Summary => &self.summary,
            Section::Strengths => &self.strengths,
            Section::Weaknesses => &self.weaknesses,
            Section::Recommendation => &self.recommendation,
        }
    }

    pub(crate) fn field_mut(&mut self, section: Section) -> &mut String {
        match section {
            Section::Summary => &mut self.summary,
            Section::Strengths => &mut self.strengths,
            Section::Weaknesses => &mut self.weaknesses,
            Section::Recommendation => &mut self.recommendation,
        }
    }

    /// Keys of the sections that came back empty
    pub fn missing_sections(&self) -> Vec<&'static str> {
        Section::ALL
            .into_iter()
            .filter(|section| self.field(*section).is_empty())
            .map(Section::key)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.missing_sections().len() == Section::ALL.len()
    }
}

/// The editorial decisions a reviewer may give
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recommendation {
    Accept,
    MinorRevision,
    MajorRevision,
    Reject,
}

impl Recommendation {
    /// Parse a model-written recommendation, ignoring case, emphasis and trailing punctuation
    pub fn parse(text: &str) -> Option<Self> {
        let normalized = text
            .trim()
            .trim_matches(|c: char| matches!(c, '*' | '_' | '`' | '"' | '.' | '!' | '?') || c.is_whitespace())
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();

        match normalized.as_str() {
            "accept" => Some(Self::Accept),
            "minor revision" => Some(Self::MinorRevision),
            "major revision" => Some(Self::MajorRevision),
            "reject" => Some(Self::Reject),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Accept => prompts::RECOMMENDATION_OPTIONS[0],
            Self::MinorRevision => prompts::RECOMMENDATION_OPTIONS[1],
            Self::MajorRevision => prompts::RECOMMENDATION_OPTIONS[2],
            Self::Reject => prompts::RECOMMENDATION_OPTIONS[3],
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Errors produced while generating a review
#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("Paper text is empty")]
    EmptyPaper,

    #[error(transparent)]
    Llm(#[from] LlmServiceError),

    #[error("Review text is empty after removing model reasoning")]
    EmptyAfterCleaning,

    #[error("No review sections could be extracted from the model output")]
    NoSections,
}

/// Prompt, query, clean and parse: the whole review flow for one paper
pub struct ReviewPipeline<G> {
    generator: G,
    max_paper_chars: usize,
}

impl<G: TextGenerator> ReviewPipeline<G> {
    pub fn new(generator: G, max_paper_chars: usize) -> Self {
        Self {
            generator,
            max_paper_chars,
        }
    }

    pub async fn run(&self, paper: &str) -> Result<Review, ReviewError> {
        if paper.trim().is_empty() {
            return Err(ReviewError::EmptyPaper);
        }

        let paper_chars = paper.chars().count();
        tracing::info!("Loaded paper content ({} characters)", paper_chars);
        if paper_chars > self.max_paper_chars {
            tracing::warn!(
                "Input paper length ({} chars) exceeds threshold ({} chars). \
                 Processing may be slow or fail due to LLM context limits.",
                paper_chars,
                self.max_paper_chars
            );
        }

        let prompt = prompts::build_review_prompt(paper);
        tracing::debug!("Prompt length: {} characters", prompt.len());

        let raw = self.generator.generate(&prompt).await?;
        tracing::info!("Received raw response from LLM ({} chars)", raw.len());

        let cleaned = clean_llm_output(&raw);
        if cleaned.is_empty() {
            return Err(ReviewError::EmptyAfterCleaning);
        }

        let review = parse_review(&cleaned);
        if review.is_empty() {
            return Err(ReviewError::NoSections);
        }

        tracing::info!("Parsed review into structured sections");
        Ok(review)
    }
}
