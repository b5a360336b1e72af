use crate::cli::commands::ReviewArgs;
use crate::cli::utils::{read_paper, waiting_spinner};
use crate::llm::{LlmConfig, LlmService};
use crate::report::TerminalReporter;
use crate::review::ReviewPipeline;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, info, warn};

pub async fn handle_review_command(paper: &Path, args: &ReviewArgs) -> Result<()> {
    info!("Starting review generation for: {}", paper.display());

    let config = LlmConfig::from_env().with_overrides(&args.llm.overrides());
    debug!(
        "Effective LLM config: model={}, url={}, timeout={}s, temperature={:?}, top_k={:?}, top_p={:?}",
        config.model, config.api_url, config.timeout_secs, config.temperature, config.top_k, config.top_p
    );

    if args.check_references {
        warn!("Reference checking is experimental and is not included in the review output");
    }

    let paper_text = read_paper(paper)?;
    let service = LlmService::new(config).context("Invalid LLM configuration")?;
    let pipeline = ReviewPipeline::new(&service, service.config().max_paper_chars);

    let spinner = waiting_spinner(&format!("Waiting for {} to review the paper...", service.config().model));
    let result = pipeline.run(&paper_text).await;
    spinner.finish_and_clear();

    let review = result.with_context(|| format!("Failed to generate review for {}", paper.display()))?;

    let format = args.format();
    match &args.output {
        Some(output_path) => {
            format
                .generator()
                .save_report(&review, output_path)
                .with_context(|| format!("Failed to save review to {}", output_path.display()))?;
            eprintln!("Review successfully saved to: {}", output_path.display());
        }
        None => TerminalReporter::new().report(&review, format)?,
    }

    info!("Review generation for '{}' completed successfully", paper.display());
    Ok(())
}
