use super::{ReportGenerator, ReportResult};
use crate::review::Review;

/// JSON report generator: an object with the four review fields
pub struct JsonReporter;

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonReporter {
    pub fn new() -> Self {
        Self
    }
}

impl ReportGenerator for JsonReporter {
    fn render(&self, review: &Review) -> ReportResult<String> {
        Ok(serde_json::to_string_pretty(review)?)
    }

    fn name(&self) -> &'static str {
        "json"
    }
}
