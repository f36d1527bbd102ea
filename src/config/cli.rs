use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "ask-ayo")]
#[command(about = "AI-powered financial jargon explainer gateway")]
pub struct CliConfig {
    /// Listening port; falls back to the PORT environment variable, then 8080
    #[arg(long)]
    pub port: Option<u16>,

    /// Base URL of the OpenAI-compatible completion provider
    #[arg(long, default_value = "https://api.openai.com/v1")]
    pub provider_url: String,

    /// Optional TOML file with a [prompt] table overriding model,
    /// temperature, max_tokens and system_prompt
    #[arg(long)]
    pub prompt_config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}
