pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod http;
pub mod utils;

pub use self::adapters::OpenAiClient;
pub use self::config::{AppConfig, CliConfig};
pub use self::core::{ExplainPipeline, PromptOptions};
pub use self::domain::{ChatCompleter, Explanation};
pub use self::http::{build_router, serve, AppState};
pub use self::utils::error::{GatewayError, Result};
