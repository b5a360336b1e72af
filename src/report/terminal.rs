use super::{ReportFormat, ReportResult};
use crate::review::{Recommendation, Review, Section};
use colored::{ColoredString, Colorize};
use std::io::IsTerminal;

/// Terminal formatting constants
const TERMINAL_WIDTH: usize = 80;

/// Prints a review to stdout
pub struct TerminalReporter {
    use_colors: bool,
}

impl Default for TerminalReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalReporter {
    pub fn new() -> Self {
        Self {
            use_colors: std::io::stdout().is_terminal(),
        }
    }

    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    pub fn report(&self, review: &Review, format: ReportFormat) -> ReportResult<()> {
        match format {
            ReportFormat::Text if self.use_colors => print!("{}", self.render(review)),
            ReportFormat::Text => print!("{}", format.generator().render(review)?),
            ReportFormat::Json => println!("{}", format.generator().render(review)?),
        }
        Ok(())
    }

    /// Framed layout for interactive terminals. Piped output gets the plain
    /// text report instead.
    pub fn render(&self, review: &Review) -> String {
        let mut out = String::new();
        out.push_str(&format!("{}\n", self.paint("═".repeat(TERMINAL_WIDTH), |s| s.bright_blue())));
        out.push_str(&format!("{}\n", self.paint("PEER REVIEW".to_string(), |s| s.bright_white().bold())));
        out.push_str(&format!("{}\n", self.paint("═".repeat(TERMINAL_WIDTH), |s| s.bright_blue())));

        for section in Section::ALL {
            out.push('\n');
            out.push_str(&format!(
                "{}\n",
                self.paint(section.header().to_string(), |s| s.bright_cyan().bold())
            ));
            let body = review.field(section);
            if section == Section::Recommendation {
                out.push_str(&format!("{}\n", self.paint_recommendation(body)));
            } else if body.is_empty() {
                out.push_str(&format!("{}\n", self.paint("(not provided)".to_string(), |s| s.bright_black())));
            } else {
                out.push_str(body);
                out.push('\n');
            }
        }

        out.push('\n');
        out.push_str(&format!("{}\n", self.paint("═".repeat(TERMINAL_WIDTH), |s| s.bright_blue())));
        out
    }

    fn paint_recommendation(&self, text: &str) -> String {
        if text.is_empty() {
            return self.paint("(not provided)".to_string(), |s| s.bright_black());
        }
        match Recommendation::parse(text) {
            Some(Recommendation::Accept) => self.paint(text.to_string(), |s| s.bright_green().bold()),
            Some(Recommendation::MinorRevision) => self.paint(text.to_string(), |s| s.bright_yellow().bold()),
            Some(Recommendation::MajorRevision) => self.paint(text.to_string(), |s| s.yellow().bold()),
            Some(Recommendation::Reject) => self.paint(text.to_string(), |s| s.bright_red().bold()),
            None => text.to_string(),
        }
    }

    fn paint(&self, text: String, style: impl Fn(&str) -> ColoredString) -> String {
        if self.use_colors {
            style(&text).to_string()
        } else {
            text
        }
    }
}
