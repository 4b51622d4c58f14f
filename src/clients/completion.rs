use std::sync::Arc;
use async_trait::async_trait;
use crate::errors::ClientError;
use crate::llm::LLMProvider;
use tracing::debug;

#[async_trait]
pub trait TextCompleter: Send + Sync {
    /// Returns the completion text with markdown bold markers removed.
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, ClientError>;
}

pub struct LlmTextCompleter {
    llm: Arc<dyn LLMProvider>,
}

impl LlmTextCompleter {
    pub fn new(llm: Arc<dyn LLMProvider>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl TextCompleter for LlmTextCompleter {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, ClientError> {
        debug!(model = %self.llm.model_name(), prompt_len = prompt.len(), "Requesting completion");
        let resp = self.llm.complete(prompt, Some(system)).await?;
        Ok(strip_bold(&resp.content))
    }
}

/// Remove every literal `**`. Runs of asterisks collapse to their parity, so
/// the output never contains `**` and a second pass changes nothing.
pub fn strip_bold(text: &str) -> String {
    text.replace("**", "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::LLMResponse;

    struct EchoLlm;

    #[async_trait]
    impl LLMProvider for EchoLlm {
        async fn complete(&self, prompt: &str, system: Option<&str>) -> Result<LLMResponse, ClientError> {
            Ok(LLMResponse {
                content: format!("**{}** | {}", system.unwrap_or(""), prompt),
                input_tokens: None,
                output_tokens: None,
                model: "echo".into(),
            })
        }

        async fn complete_with_image(&self, _: &str, _: &str, _: u32) -> Result<LLMResponse, ClientError> {
            Err(ClientError::NotConfigured("no vision".into()))
        }

        fn provider_name(&self) -> &str { "echo" }
        fn model_name(&self) -> &str { "echo" }
    }

    struct FailingLlm;

    #[async_trait]
    impl LLMProvider for FailingLlm {
        async fn complete(&self, _: &str, _: Option<&str>) -> Result<LLMResponse, ClientError> {
            Err(ClientError::Upstream { status: 500, message: "boom".into() })
        }

        async fn complete_with_image(&self, _: &str, _: &str, _: u32) -> Result<LLMResponse, ClientError> {
            Err(ClientError::Upstream { status: 500, message: "boom".into() })
        }

        fn provider_name(&self) -> &str { "failing" }
        fn model_name(&self) -> &str { "failing" }
    }

    #[tokio::test]
    async fn test_completion_is_cleaned() {
        let completer = LlmTextCompleter::new(Arc::new(EchoLlm));
        let text = completer.complete("Expert", "What is **bcc**?").await.unwrap();
        assert_eq!(text, "Expert | What is bcc?");
    }

    #[tokio::test]
    async fn test_completion_failure_propagates() {
        let completer = LlmTextCompleter::new(Arc::new(FailingLlm));
        let err = completer.complete("s", "p").await.unwrap_err();
        assert!(matches!(err, ClientError::Upstream { status: 500, .. }));
    }

    #[test]
    fn test_strip_bold_cases() {
        assert_eq!(strip_bold(""), "");
        assert_eq!(strip_bold("plain text"), "plain text");
        assert_eq!(strip_bold("**Symptoms**: itching"), "Symptoms: itching");
        assert_eq!(strip_bold("a****b"), "ab");
        assert_eq!(strip_bold("***"), "*");
        assert_eq!(strip_bold("*single* stays"), "*single* stays");
    }

    #[test]
    fn test_strip_bold_total_and_idempotent() {
        let inputs = [
            "", "*", "**", "***", "****", "*****", "******",
            "x**", "**x", "x*x", "x***y***z", "** ** **", "*a**b*", "** **** *** *",
            "Risk **factors**:\n* **UV** exposure\n* ***family history***",
        ];
        for input in inputs {
            let once = strip_bold(input);
            assert!(!once.contains("**"), "{:?} -> {:?}", input, once);
            assert_eq!(strip_bold(&once), once, "not idempotent for {:?}", input);
        }
    }

    #[test]
    fn test_strip_bold_generated_star_runs() {
        // Every arrangement of up to 8 positions drawn from {'*', 'a'}.
        for n in 0..=8u32 {
            for mask in 0..(1u32 << n) {
                let input: String = (0..n)
                    .map(|i| if mask & (1 << i) != 0 { '*' } else { 'a' })
                    .collect();
                let once = strip_bold(&input);
                assert!(!once.contains("**"), "{:?} -> {:?}", input, once);
                assert_eq!(strip_bold(&once), once);
            }
        }
    }
}
