use std::sync::Arc;
use crate::clients::TextCompleter;
use crate::errors::ClientError;
use crate::models::{ClassificationResult, DiagnosisContext};
use crate::prompts::{self, Language};
use tracing::{info, warn};

/// Prepend the diagnosis grounding clause when a context exists; otherwise
/// the question passes through untouched.
pub fn build_followup_prompt(question: &str, context: Option<&DiagnosisContext>) -> String {
    match context {
        Some(ctx) => format!(
            "{}\n\nUser question: {}",
            prompts::grounding_clause(ctx.label()),
            question
        ),
        None => question.to_string(),
    }
}

pub struct FollowUpOrchestrator {
    completer: Arc<dyn TextCompleter>,
}

impl FollowUpOrchestrator {
    pub fn new(completer: Arc<dyn TextCompleter>) -> Self {
        Self { completer }
    }

    pub async fn ask(
        &self,
        question: &str,
        lang: Language,
        context: Option<&DiagnosisContext>,
    ) -> Result<String, ClientError> {
        let prompt = build_followup_prompt(question, context);
        info!(
            grounded = context.is_some(),
            diagnosis = context.map(|c| c.label()).unwrap_or(""),
            lang = lang.code(),
            "Answering follow-up question"
        );
        self.completer
            .complete(&prompts::system_prompt(lang), &prompt)
            .await
            .inspect_err(|e| warn!(error = %e, "Follow-up completion failed"))
    }

    /// Structured explanation of a fresh diagnosis.
    pub async fn explain(
        &self,
        diagnosis: &ClassificationResult,
        lang: Language,
    ) -> Result<String, ClientError> {
        info!(diagnosis = %diagnosis.predicted_class, lang = lang.code(), "Generating diagnosis explanation");
        self.completer
            .complete(
                &prompts::system_prompt(lang),
                &prompts::explanation_prompt(&diagnosis.predicted_class),
            )
            .await
            .inspect_err(|e| warn!(error = %e, "Explanation completion failed"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use async_trait::async_trait;

    #[derive(Default)]
    struct RecordingCompleter {
        seen: Mutex<Vec<(String, String)>>,
        fail: bool,
    }

    #[async_trait]
    impl TextCompleter for RecordingCompleter {
        async fn complete(&self, system: &str, prompt: &str) -> Result<String, ClientError> {
            self.seen.lock().unwrap().push((system.to_string(), prompt.to_string()));
            if self.fail {
                Err(ClientError::Transport("down".into()))
            } else {
                Ok("answer".into())
            }
        }
    }

    fn bcc_context() -> DiagnosisContext {
        DiagnosisContext::new(ClassificationResult::new("bcc", 76.0))
    }

    #[test]
    fn test_grounded_prompt_orders_clause_before_question() {
        let question = "what foods should I avoid?";
        let prompt = build_followup_prompt(question, Some(&bcc_context()));

        let clause_at = prompt.find("diagnosed with bcc").unwrap();
        let question_at = prompt.find(question).unwrap();
        assert!(clause_at < question_at);
        assert!(prompt.ends_with("User question: what foods should I avoid?"));
    }

    #[test]
    fn test_ungrounded_prompt_is_raw_question() {
        assert_eq!(build_followup_prompt("is sunscreen useful?", None), "is sunscreen useful?");
    }

    #[tokio::test]
    async fn test_ask_forwards_grounded_prompt() {
        let completer = Arc::new(RecordingCompleter::default());
        let orchestrator = FollowUpOrchestrator::new(completer.clone());

        let answer = orchestrator
            .ask("what foods should I avoid?", Language::En, Some(&bcc_context()))
            .await
            .unwrap();
        assert_eq!(answer, "answer");

        let seen = completer.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].0.ends_with("Respond in English."));
        assert!(seen[0].1.contains("bcc"));
        assert!(seen[0].1.contains("what foods should I avoid?"));
    }

    #[tokio::test]
    async fn test_ask_uses_language_prompt() {
        let completer = Arc::new(RecordingCompleter::default());
        let orchestrator = FollowUpOrchestrator::new(completer.clone());
        orchestrator.ask("hola", Language::Es, None).await.unwrap();

        let seen = completer.seen.lock().unwrap();
        assert!(seen[0].0.ends_with("Respond in Spanish."));
        assert_eq!(seen[0].1, "hola");
    }

    #[tokio::test]
    async fn test_ask_propagates_failure() {
        let completer = Arc::new(RecordingCompleter { fail: true, ..Default::default() });
        let orchestrator = FollowUpOrchestrator::new(completer);
        let err = orchestrator.ask("q", Language::En, None).await.unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));
    }

    #[tokio::test]
    async fn test_explain_uses_explanation_prompt() {
        let completer = Arc::new(RecordingCompleter::default());
        let orchestrator = FollowUpOrchestrator::new(completer.clone());
        orchestrator
            .explain(&ClassificationResult::new("mel", 91.0), Language::En)
            .await
            .unwrap();

        let seen = completer.seen.lock().unwrap();
        assert!(seen[0].1.starts_with("I have a dermoscopic image that the model predicts is mel."));
    }
}
