use super::{ReportGenerator, ReportResult};
use crate::review::{Review, Section};

/// Markdown-style report with one `##` header per section
pub struct TextReporter;

impl Default for TextReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl TextReporter {
    pub fn new() -> Self {
        Self
    }
}

/// Render the four sections in order, separated by blank lines
pub fn render_text(review: &Review) -> String {
    let mut out = Section::ALL
        .into_iter()
        .map(|section| format!("{}\n{}", section.header(), review.field(section)))
        .collect::<Vec<_>>()
        .join("\n\n");
    out.push('\n');
    out
}

impl ReportGenerator for TextReporter {
    fn render(&self, review: &Review) -> ReportResult<String> {
        Ok(render_text(review))
    }

    fn name(&self) -> &'static str {
        "text"
    }
}
