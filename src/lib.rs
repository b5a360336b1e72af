//! PeerSight: structured academic paper reviews from a local Ollama model.

pub mod cli;
pub mod editor;
pub mod llm;
pub mod report;
pub mod review;

pub use review::{Recommendation, Review, ReviewError, ReviewPipeline};
