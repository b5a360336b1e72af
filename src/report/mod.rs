pub mod json;
pub mod terminal;
pub mod text;

use crate::review::Review;
use std::fs;
use std::path::Path;

pub use json::JsonReporter;
pub use terminal::TerminalReporter;
pub use text::TextReporter;

/// Result type for report operations
pub type ReportResult<T> = Result<T, ReportError>;

/// Errors that can occur during report generation
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Output formats for a finished review
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
}

impl ReportFormat {
    pub fn generator(self) -> Box<dyn ReportGenerator> {
        match self {
            ReportFormat::Text => Box::new(TextReporter::new()),
            ReportFormat::Json => Box::new(JsonReporter::new()),
        }
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Render the review as a string
    fn render(&self, review: &Review) -> ReportResult<String>;

    /// Get generator name
    fn name(&self) -> &'static str;

    /// Render and write to `output_path`, creating parent directories
    fn save_report(&self, review: &Review, output_path: &Path) -> ReportResult<()> {
        let content = self.render(review)?;
        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(output_path, content)?;
        tracing::info!("Saved {} review to {}", self.name(), output_path.display());
        Ok(())
    }
}
