use crate::llm::SamplingOverrides;
use crate::report::ReportFormat;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "peersight",
    about = "Structured academic paper reviews from a local Ollama model",
    version,
    author,
    args_conflicts_with_subcommands = true
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format for logs
    #[arg(long, value_enum, default_value = "text", global = true)]
    pub log_format: LogFormat,

    #[command(flatten)]
    pub review: ReviewArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ask the model which academic field a paper belongs to
    Specialty {
        /// Path to the paper text file
        #[arg(value_name = "PAPER")]
        paper: PathBuf,

        #[command(flatten)]
        llm: LlmArgs,
    },

    /// Display the effective PeerSight configuration
    Config,

    /// Show information about PeerSight
    Info,
}

/// Arguments for the default review command
#[derive(Args, Debug, Default)]
pub struct ReviewArgs {
    /// Path to the paper text file to review
    #[arg(value_name = "PAPER")]
    pub paper: Option<PathBuf>,

    #[command(flatten)]
    pub llm: LlmArgs,

    /// Emit the review as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Write the review to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Run the experimental reference check (logged only)
    #[arg(long)]
    pub check_references: bool,
}

impl ReviewArgs {
    pub fn format(&self) -> ReportFormat {
        if self.json {
            ReportFormat::Json
        } else {
            ReportFormat::Text
        }
    }
}

/// Model and sampling flags; each overrides the matching `.env` value
#[derive(Args, Debug, Default, Clone)]
pub struct LlmArgs {
    /// Ollama model to use (overrides OLLAMA_MODEL)
    #[arg(long)]
    pub model: Option<String>,

    /// Ollama generate endpoint (overrides OLLAMA_API_URL)
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Sampling temperature, 0.0-2.0 (overrides OLLAMA_TEMPERATURE)
    #[arg(short, long)]
    pub temperature: Option<f32>,

    /// Top-k sampling cutoff (overrides OLLAMA_TOP_K)
    #[arg(long)]
    pub top_k: Option<u32>,

    /// Nucleus sampling probability, 0.0-1.0 (overrides OLLAMA_TOP_P)
    #[arg(long)]
    pub top_p: Option<f32>,

    /// LLM request timeout in seconds (overrides OLLAMA_TIMEOUT)
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,
}

impl LlmArgs {
    pub fn overrides(&self) -> SamplingOverrides {
        SamplingOverrides {
            model: self.model.clone(),
            api_url: self.api_url.clone(),
            timeout_secs: self.timeout,
            temperature: self.temperature,
            top_k: self.top_k,
            top_p: self.top_p,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_review_flags() {
        let cli = Cli::try_parse_from([
            "peersight",
            "paper.txt",
            "--model",
            "llama3:8b",
            "-t",
            "0.7",
            "--top-k",
            "40",
            "--top-p",
            "0.9",
            "--json",
            "-o",
            "out/review.json",
            "-v",
            "--check-references",
        ])
        .unwrap();

        assert!(cli.command.is_none());
        assert!(cli.verbose);
        assert_eq!(cli.review.paper, Some(PathBuf::from("paper.txt")));
        assert_eq!(cli.review.format(), ReportFormat::Json);
        assert_eq!(cli.review.output, Some(PathBuf::from("out/review.json")));
        assert!(cli.review.check_references);

        let overrides = cli.review.llm.overrides();
        assert_eq!(overrides.model.as_deref(), Some("llama3:8b"));
        assert_eq!(overrides.temperature, Some(0.7));
        assert_eq!(overrides.top_k, Some(40));
        assert_eq!(overrides.top_p, Some(0.9));
        assert_eq!(overrides.api_url, None);
    }

    #[test]
    fn test_specialty_subcommand() {
        let cli = Cli::try_parse_from(["peersight", "specialty", "paper.txt", "--temperature", "0.1"]).unwrap();

        match cli.command {
            Some(Commands::Specialty { paper, llm }) => {
                assert_eq!(paper, PathBuf::from("paper.txt"));
                assert_eq!(llm.temperature, Some(0.1));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_defaults_to_text() {
        let cli = Cli::try_parse_from(["peersight", "paper.txt"]).unwrap();
        assert_eq!(cli.review.format(), ReportFormat::Text);
        assert_eq!(cli.log_format, LogFormat::Text);
        assert_eq!(cli.review.llm.overrides(), SamplingOverrides::default());
    }
}
