pub mod config;
pub mod prompts;
pub mod service;

pub use config::{LlmConfig, SamplingOverrides};
pub use service::{LlmService, LlmServiceError, TextGenerator};
