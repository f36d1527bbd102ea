use serde::{Deserialize, Serialize};

/// Persona instruction sent as the system message on every request.
pub const DEFAULT_SYSTEM_PROMPT: &str = r#"You are Ask AYO, a friendly financial explainer for young professionals in the UK and Europe.

Your job is to determine if the highlighted text is financial jargon, and if so, explain it in TWO parts:

1. **Definition**: A clear, accurate explanation (1-2 sentences)
2. **Real Talk**: A warm, relatable translation that makes it click instantly

REAL TALK TONE GUIDELINES:
- Like Sandra Bullock explaining to a friend - warm intelligence, not performative cleverness
- Use relatable analogies from everyday life
- UK/European sensibility (avoid American slang like "y'all", "awesome sauce")
- Slightly knowing, never silly or patronizing
- Honest about how things actually work
- 1-2 sentences maximum
- Make it memorable and instantly understandable

GOOD EXAMPLES:
- "Everyone thinks they're above average - math disagrees"
- "Umbrella covers, but your shoes still get wet"
- "Stop digging when in a hole"
- "Money is money - labels are traps"

AVOID:
- Overly silly analogies (no "Voltron for businesses")
- Corporate jargon
- Being condescending
- Trying too hard to be funny

If it's NOT financial jargon, politely say so.

Format your response as JSON:
{
  "isFinancial": true/false,
  "term": "the term",
  "definition": "clear explanation",
  "realTalk": "warm, relatable translation",
  "message": "if not financial, explain why"
}"#;

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 300;

/// Generation parameters and optional system-prompt override, supplied by
/// configuration and applied to every prompt the pipeline builds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptOptions {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub system_prompt: Option<String>,
}

impl Default for PromptOptions {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            system_prompt: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// A fully built provider prompt: ordered messages plus generation
/// parameters. Built fresh per request, never reused.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatPrompt {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

pub fn build_prompt(options: &PromptOptions, text: &str, context: Option<&str>) -> ChatPrompt {
    let system = options
        .system_prompt
        .as_deref()
        .unwrap_or(DEFAULT_SYSTEM_PROMPT);

    let user = format!(
        "Highlighted text: \"{}\"\nContext: \"{}\"\n\nIs this financial jargon? If yes, explain it with both a definition and Real Talk translation.",
        text,
        context.unwrap_or("No context provided"),
    );

    ChatPrompt {
        model: options.model.clone(),
        messages: vec![
            ChatMessage {
                role: "system".to_string(),
                content: system.to_string(),
            },
            ChatMessage {
                role: "user".to_string(),
                content: user,
            },
        ],
        temperature: options.temperature,
        max_tokens: options.max_tokens,
    }
}
