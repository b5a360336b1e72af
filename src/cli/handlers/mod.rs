pub mod config;
pub mod review;
pub mod specialty;

// Re-export handler functions for convenience
pub use config::handle_config_command;
pub use review::handle_review_command;
pub use specialty::handle_specialty_command;
