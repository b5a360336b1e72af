use crate::llm::config::{dotenv_candidates, load_dotenv, LlmConfig};
use anyhow::Result;
use std::env;

fn show_option<T: std::fmt::Display>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| "server default".to_string())
}

pub fn handle_config_command() -> Result<()> {
    let env_file = load_dotenv();
    let config = LlmConfig::from_env();

    println!("🔧 PeerSight Configuration");
    println!("═══════════════════════════════════════");
    println!();

    println!("🌍 Environment:");
    match &env_file {
        Some(path) => println!("  • .env file: ✅ Loaded from {}", path.display()),
        None => {
            println!("  • .env file: ⚠️  Not found (using system environment)");
            for candidate in dotenv_candidates() {
                println!("      looked in {}", candidate.display());
            }
        }
    }
    match env::var("RUST_LOG") {
        Ok(val) => println!("  • RUST_LOG: {}", val),
        Err(_) => println!("  • RUST_LOG: info (default)"),
    }
    println!();

    println!("🤖 Ollama:");
    println!("  • Model:        {}", config.model);
    println!("  • API URL:      {}", config.api_url);
    println!("  • Timeout:      {} seconds", config.timeout_secs);
    println!("  • Temperature:  {}", show_option(config.temperature));
    println!("  • Top-k:        {}", show_option(config.top_k));
    println!("  • Top-p:        {}", show_option(config.top_p));
    println!("  • Debug:        {}", config.debug);
    println!();

    println!("📄 Papers:");
    println!("  • Length warning above {} characters", config.max_paper_chars);
    println!();

    if let Err(e) = config.validate() {
        println!("❌ Configuration problem: {}", e);
        println!();
    }

    println!("💡 Tips:");
    println!("  • Command-line flags (--model, -t, --top-k, --top-p) override these values");
    println!("  • Use -v or RUST_LOG=debug for detailed logging");

    Ok(())
}
