use anyhow::Result;
use clap::Parser;

use compass_core::{AssessmentCatalog, GeminiBackend, GeminiConfig, RecommendationClient};
use compass_tui::App;

mod config;

#[derive(Parser)]
#[command(name = "compass", about = "AI-powered career assessment in the terminal")]
#[command(version)]
struct Cli {
    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = config::load()?;
    tracing::debug!(model = %config.provider.model, "Starting compass");

    // The API key comes from GEMINI_API_KEY (or API_KEY); a missing key is
    // not checked here - it surfaces as the fallback recommendation card.
    let backend = GeminiBackend::from_env(GeminiConfig {
        model: config.provider.model,
        base_url: config.provider.base_url,
    });
    let client = RecommendationClient::new(Box::new(backend));

    let mut app = App::new(AssessmentCatalog::with_defaults(), client);
    app.run().await?;

    Ok(())
}
