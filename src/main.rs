use anyhow::Context;
use ask_ayo::utils::{logger, validation::Validate};
use ask_ayo::{AppConfig, AppState, CliConfig, ExplainPipeline, OpenAiClient};
use clap::Parser;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting ask-ayo gateway");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = AppConfig::load(&cli).context("failed to load configuration")?;

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let client = OpenAiClient::new(config.provider_url.clone(), config.api_key.clone());
    let pipeline = ExplainPipeline::new(client, config.prompt.clone());
    let state = Arc::new(AppState::new(pipeline));
    let router = ask_ayo::build_router(state);

    ask_ayo::serve(config.port, router)
        .await
        .context("server exited with an error")?;

    Ok(())
}
