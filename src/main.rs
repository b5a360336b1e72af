use anyhow::Result;
use clap::{CommandFactory, Parser};
use peersight::cli::commands::{Cli, Commands};
use peersight::cli::handlers::{handle_config_command, handle_review_command, handle_specialty_command};
use peersight::cli::utils::{init_logging, print_info};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose, cli.log_format)?;

    // Execute command
    match cli.command {
        Some(Commands::Specialty { paper, llm }) => handle_specialty_command(&paper, &llm).await,

        Some(Commands::Config) => handle_config_command(),

        Some(Commands::Info) => {
            print_info();
            Ok(())
        }

        None => match &cli.review.paper {
            Some(paper) => handle_review_command(paper, &cli.review).await,
            None => Cli::command()
                .error(
                    clap::error::ErrorKind::MissingRequiredArgument,
                    "a paper file is required: peersight <PAPER>",
                )
                .exit(),
        },
    }
}
