pub mod pipeline;
pub mod prompt;

pub use self::pipeline::ExplainPipeline;
pub use self::prompt::{ChatMessage, ChatPrompt, PromptOptions};
