use crate::core::prompt::{build_prompt, PromptOptions};
use crate::domain::model::{Explanation, ReplyShape, StructuredReply};
use crate::domain::ports::ChatCompleter;
use crate::utils::error::{GatewayError, Result};

pub const TEXT_REQUIRED_MESSAGE: &str = "Text is required";

pub const DEFAULT_NOT_FINANCIAL_MESSAGE: &str = "This doesn't appear to be financial jargon. \
     Try highlighting terms like 'dividend', 'equity', or 'portfolio'.";

/// The explanation pipeline: validate -> build prompt -> one provider call
/// -> interpret. Exactly one outbound call per request; no retries, no
/// caching, no shared state between requests.
pub struct ExplainPipeline<C: ChatCompleter> {
    completer: C,
    options: PromptOptions,
}

impl<C: ChatCompleter> ExplainPipeline<C> {
    pub fn new(completer: C, options: PromptOptions) -> Self {
        Self { completer, options }
    }

    pub async fn explain(&self, text: &str, context: Option<&str>) -> Result<Explanation> {
        if text.trim().is_empty() {
            return Err(GatewayError::ValidationError {
                message: TEXT_REQUIRED_MESSAGE.to_string(),
            });
        }

        let prompt = build_prompt(&self.options, text, context);
        tracing::debug!("Requesting explanation for {:?} from {}", text, prompt.model);

        let raw = self.completer.complete(&prompt).await?;
        tracing::debug!("Provider replied with {} bytes", raw.len());

        Ok(interpret_reply(text, &raw))
    }
}

/// Classify the raw provider output. Malformed output is the `Raw` branch,
/// not an error.
pub fn parse_reply(raw: &str) -> ReplyShape {
    match serde_json::from_str::<StructuredReply>(raw) {
        Ok(reply) => ReplyShape::Structured(reply),
        Err(e) => {
            tracing::warn!("Provider reply was not valid JSON ({}), using raw text", e);
            ReplyShape::Raw(raw.to_string())
        }
    }
}

/// Turn the provider reply into a normalized [`Explanation`].
///
/// Unparseable replies are still treated as financial: the model was
/// instructed to always classify, so output we cannot decode is taken as a
/// definition whose structure we could not honor.
pub fn interpret_reply(text: &str, raw: &str) -> Explanation {
    match parse_reply(raw) {
        ReplyShape::Structured(reply) if reply.is_financial => {
            let mut segments = Vec::new();
            if let Some(definition) = reply.definition.filter(|d| !d.is_empty()) {
                segments.push(format!("**{}**", definition));
            }
            if let Some(real_talk) = reply.real_talk.filter(|rt| !rt.is_empty()) {
                segments.push(format!("💬 **Real Talk:** {}", real_talk));
            }
            // A financial reply with no usable segments didn't honor the
            // contract either; show the raw reply rather than empty bold.
            let explanation = if segments.is_empty() {
                raw.to_string()
            } else {
                segments.join("\n\n")
            };
            Explanation::Financial {
                term: reply.term.unwrap_or_else(|| text.to_string()),
                explanation,
            }
        }
        ReplyShape::Structured(reply) => Explanation::NotFinancial {
            message: reply
                .message
                .unwrap_or_else(|| DEFAULT_NOT_FINANCIAL_MESSAGE.to_string()),
        },
        ReplyShape::Raw(raw) => Explanation::Financial {
            term: text.to_string(),
            explanation: raw,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::prompt::ChatPrompt;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct MockCompleter {
        reply: String,
        fail: bool,
        calls: Arc<AtomicUsize>,
    }

    impl MockCompleter {
        fn replying(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                fail: false,
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn failing() -> Self {
            Self {
                reply: String::new(),
                fail: true,
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    #[async_trait]
    impl ChatCompleter for MockCompleter {
        async fn complete(&self, _prompt: &ChatPrompt) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(GatewayError::ProviderStatusError {
                    status: 500,
                    body: "upstream down".to_string(),
                });
            }
            Ok(self.reply.clone())
        }
    }

    fn pipeline(completer: MockCompleter) -> ExplainPipeline<MockCompleter> {
        ExplainPipeline::new(completer, PromptOptions::default())
    }

    #[tokio::test]
    async fn test_explain_financial_with_real_talk() {
        let reply = serde_json::json!({
            "isFinancial": true,
            "term": "dividend",
            "definition": "A portion of profit paid to shareholders.",
            "realTalk": "Like a thank-you check from the company for owning a piece of it."
        });
        let result = pipeline(MockCompleter::replying(&reply.to_string()))
            .explain("dividend", None)
            .await
            .unwrap();

        assert_eq!(
            result,
            Explanation::Financial {
                term: "dividend".to_string(),
                explanation: "**A portion of profit paid to shareholders.**\n\n💬 **Real Talk:** Like a thank-you check from the company for owning a piece of it.".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_explain_financial_without_real_talk() {
        let reply = serde_json::json!({
            "isFinancial": true,
            "term": "equity",
            "definition": "Ownership value in an asset."
        });
        let result = pipeline(MockCompleter::replying(&reply.to_string()))
            .explain("equity", None)
            .await
            .unwrap();

        match result {
            Explanation::Financial { term, explanation } => {
                assert_eq!(term, "equity");
                assert_eq!(explanation, "**Ownership value in an asset.**");
                assert!(!explanation.contains("Real Talk"));
            }
            other => panic!("expected financial variant, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_explain_empty_real_talk_omits_segment() {
        let reply = serde_json::json!({
            "isFinancial": true,
            "term": "bond",
            "definition": "A loan to a company or government.",
            "realTalk": ""
        });
        let result = pipeline(MockCompleter::replying(&reply.to_string()))
            .explain("bond", None)
            .await
            .unwrap();

        match result {
            Explanation::Financial { explanation, .. } => {
                assert_eq!(explanation, "**A loan to a company or government.**");
            }
            other => panic!("expected financial variant, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_explain_financial_missing_definition_keeps_real_talk() {
        let reply = serde_json::json!({
            "isFinancial": true,
            "term": "yield",
            "realTalk": "What your money earns you for just sitting there."
        });
        let result = pipeline(MockCompleter::replying(&reply.to_string()))
            .explain("yield", None)
            .await
            .unwrap();

        match result {
            Explanation::Financial { explanation, .. } => {
                assert_eq!(
                    explanation,
                    "💬 **Real Talk:** What your money earns you for just sitting there."
                );
                assert!(!explanation.contains("****"));
            }
            other => panic!("expected financial variant, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_explain_financial_without_definition_or_real_talk_shows_raw() {
        let reply = serde_json::json!({
            "isFinancial": true,
            "term": "yield"
        });
        let raw = reply.to_string();
        let result = pipeline(MockCompleter::replying(&raw))
            .explain("yield", None)
            .await
            .unwrap();

        match result {
            Explanation::Financial { term, explanation } => {
                assert_eq!(term, "yield");
                assert_eq!(explanation, raw);
            }
            other => panic!("expected financial variant, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_explain_term_defaults_to_input_text() {
        let reply = serde_json::json!({
            "isFinancial": true,
            "definition": "A basket of investments."
        });
        let result = pipeline(MockCompleter::replying(&reply.to_string()))
            .explain("portfolio", None)
            .await
            .unwrap();

        match result {
            Explanation::Financial { term, .. } => assert_eq!(term, "portfolio"),
            other => panic!("expected financial variant, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_explain_not_financial_with_message() {
        let reply = serde_json::json!({
            "isFinancial": false,
            "message": "Not financial jargon"
        });
        let result = pipeline(MockCompleter::replying(&reply.to_string()))
            .explain("banana", None)
            .await
            .unwrap();

        assert_eq!(
            result,
            Explanation::NotFinancial {
                message: "Not financial jargon".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_explain_not_financial_default_message() {
        let reply = serde_json::json!({ "isFinancial": false });
        let result = pipeline(MockCompleter::replying(&reply.to_string()))
            .explain("banana", None)
            .await
            .unwrap();

        assert_eq!(
            result,
            Explanation::NotFinancial {
                message: DEFAULT_NOT_FINANCIAL_MESSAGE.to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_explain_unparseable_reply_falls_back_to_raw() {
        let raw = "A dividend is a share of profits paid out to shareholders.";
        let result = pipeline(MockCompleter::replying(raw))
            .explain("dividend", None)
            .await
            .unwrap();

        // Fallback law: explanation equals the raw reply, still financial.
        assert_eq!(
            result,
            Explanation::Financial {
                term: "dividend".to_string(),
                explanation: raw.to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_explain_empty_text_rejected_before_provider_call() {
        let completer = MockCompleter::replying("{}");
        let calls = completer.calls.clone();
        let result = pipeline(completer).explain("", None).await;

        match result {
            Err(GatewayError::ValidationError { message }) => {
                assert_eq!(message, TEXT_REQUIRED_MESSAGE);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_explain_whitespace_text_rejected() {
        let result = pipeline(MockCompleter::replying("{}"))
            .explain("   \n", None)
            .await;
        assert!(matches!(
            result,
            Err(GatewayError::ValidationError { .. })
        ));
    }

    #[tokio::test]
    async fn test_explain_propagates_provider_error() {
        let result = pipeline(MockCompleter::failing())
            .explain("dividend", None)
            .await;
        assert!(matches!(
            result,
            Err(GatewayError::ProviderStatusError { status: 500, .. })
        ));
    }

    #[test]
    fn test_parse_reply_structured() {
        let shape = parse_reply(r#"{"isFinancial": true, "term": "apr"}"#);
        match shape {
            ReplyShape::Structured(reply) => {
                assert!(reply.is_financial);
                assert_eq!(reply.term.as_deref(), Some("apr"));
            }
            other => panic!("expected structured, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_reply_raw() {
        let shape = parse_reply("just plain prose");
        assert_eq!(shape, ReplyShape::Raw("just plain prose".to_string()));
    }

    #[test]
    fn test_interpret_missing_is_financial_field_means_not_financial() {
        // The model omitted the classification flag entirely; serde defaults
        // it to false, matching the original behavior for falsy values.
        let result = interpret_reply("banana", r#"{"message": "not a term"}"#);
        assert_eq!(
            result,
            Explanation::NotFinancial {
                message: "not a term".to_string(),
            }
        );
    }
}
