use crate::cli::commands::LlmArgs;
use crate::cli::utils::{read_paper, waiting_spinner};
use crate::editor::{extract_abstract, extract_keywords, EditorAgent};
use crate::llm::{LlmConfig, LlmService};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, info};

pub async fn handle_specialty_command(paper: &Path, llm: &LlmArgs) -> Result<()> {
    let config = LlmConfig::from_env().with_overrides(&llm.overrides());
    let paper_text = read_paper(paper)?;

    let paper_abstract = extract_abstract(&paper_text);
    let keywords = extract_keywords(&paper_text);
    debug!("Abstract: {} chars, keywords: {:?}", paper_abstract.len(), keywords);

    let service = LlmService::new(config).context("Invalid LLM configuration")?;
    let agent = EditorAgent::new(&service);

    let spinner = waiting_spinner(&format!("Asking {} for the paper's specialty...", service.config().model));
    let result = agent.determine_specialty(&paper_abstract, keywords.as_deref()).await;
    spinner.finish_and_clear();

    let specialty = result.with_context(|| format!("Failed to determine specialty for {}", paper.display()))?;
    info!("Specialty determined for {}", paper.display());
    println!("{}", specialty);
    Ok(())
}
