// Adapters layer: concrete implementations of domain ports against external
// systems. Currently a single OpenAI-compatible chat-completion client.

pub mod openai;

pub use self::openai::OpenAiClient;
