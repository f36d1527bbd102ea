use serde::{Deserialize, Serialize};

/// The JSON shape the system prompt instructs the model to reply with.
/// Every field defaults so a partially-formed reply still deserializes;
/// a reply that is not a JSON object at all falls back to [`ReplyShape::Raw`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredReply {
    #[serde(default)]
    pub is_financial: bool,
    #[serde(default)]
    pub term: Option<String>,
    #[serde(default)]
    pub definition: Option<String>,
    #[serde(default)]
    pub real_talk: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Outcome of interpreting the raw provider output. The raw branch is a
/// first-class result, not an error: unparseable output still produces an
/// explanation for the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplyShape {
    Structured(StructuredReply),
    Raw(String),
}

/// Normalized result of the explanation pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum Explanation {
    Financial { term: String, explanation: String },
    NotFinancial { message: String },
}
