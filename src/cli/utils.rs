use crate::cli::commands::LogFormat;
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Logs always go to stderr so stdout carries only the report
pub fn init_logging(verbose: bool, log_format: LogFormat) -> Result<()> {
    let env_filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let fmt_layer = match log_format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(false)
            .with_span_list(false)
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Text => fmt::layer()
            .with_target(false)
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_writer(std::io::stderr)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .context("Failed to initialize tracing subscriber")
}

pub fn print_info() {
    println!("PeerSight v{}", env!("CARGO_PKG_VERSION"));
    println!("{}", env!("CARGO_PKG_DESCRIPTION"));
    println!();
    println!("Authors: {}", env!("CARGO_PKG_AUTHORS"));
    println!("License: {}", env!("CARGO_PKG_LICENSE"));
    println!();
    println!("For more information, visit: {}", env!("CARGO_PKG_REPOSITORY"));
}

/// Read a paper as UTF-8 text
pub fn read_paper(path: &Path) -> Result<String> {
    info!("Reading paper: {}", path.display());

    if !path.exists() {
        anyhow::bail!("Paper file not found: {}", path.display());
    }

    let bytes = fs::read(path).with_context(|| format!("Failed to read paper file {}", path.display()))?;
    let content = String::from_utf8(bytes)
        .with_context(|| format!("Paper file {} is not valid UTF-8 text", path.display()))?;

    info!("Read {} characters from {}", content.chars().count(), path.display());
    Ok(content)
}

/// Spinner on stderr while waiting for the model; hidden when stderr is not a terminal
pub fn waiting_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg} [{elapsed}]") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_paper_success() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("paper.txt");
        fs::write(&path, "This is a test paper.\nWith multiple lines, café.").unwrap();

        let content = read_paper(&path).unwrap();
        assert_eq!(content, "This is a test paper.\nWith multiple lines, café.");
    }

    #[test]
    fn test_read_paper_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let err = read_paper(&temp_dir.path().join("missing.txt")).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_read_paper_rejects_invalid_utf8() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("latin1.txt");
        fs::write(&path, [0x63, 0x61, 0x66, 0xe9]).unwrap();

        let err = read_paper(&path).unwrap_err();
        assert!(err.to_string().contains("not valid UTF-8"));
    }
}
