//! Post classification via the LLM backend.
//!
//! Builds the fixed instructional prompt, calls the primary model, retries
//! exactly once on quota exhaustion against the fallback model, and parses
//! the reply into a [`ClassificationResult`]. Every other fault propagates
//! to the request handler, which degrades the post to the default category.

use crate::config::LlmConfig;
use crate::gemini::LlmBackend;
use sheetsort_common::classification::parse_reply;
use sheetsort_common::{normalize, ClassificationResult, LlmError};
use std::sync::Arc;
use tracing::{info, warn};

/// Instructional prompt sent ahead of every post.
const SYSTEM_PROMPT: &str = "\
Analyze this LinkedIn post.

Summary: Write a Hebrew summary focusing on the function/value (max 2 sentences).
Category: Classify strictly into ONE of these: ['MCP', 'RAG', 'Repo', 'Tool', 'Automation', 'Learning', 'Trend', 'General_AI'].
Author: Extract the author name from the post content if possible, otherwise use provided default.
Hint: If the post has no external link, prefer 'Trend' or 'Learning'.

Output JSON: { \"summary\": \"...\", \"category\": \"...\", \"author\": \"...\" }";

/// LLM-assisted classifier with a configurable (primary, fallback) model pair.
pub struct Classifier {
    backend: Arc<dyn LlmBackend>,
    primary_model: String,
    fallback_model: String,
}

impl Classifier {
    pub fn new(backend: Arc<dyn LlmBackend>, config: &LlmConfig) -> Self {
        Self {
            backend,
            primary_model: config.primary_model.clone(),
            fallback_model: config.fallback_model.clone(),
        }
    }

    /// Classify one post.
    ///
    /// Inputs are NFKD-normalized before prompting. Quota exhaustion on the
    /// primary model is retried once on the fallback model; any other error
    /// is returned as-is.
    pub async fn classify(
        &self,
        author: &str,
        url: &str,
        text: &str,
    ) -> Result<ClassificationResult, LlmError> {
        let author = normalize(author);
        let url = normalize(url);
        let text = normalize(text);

        let prompt = format!(
            "{}\n\nInput Post Author: {}\nInput Post URL: {}\nInput Post Text:\n{}",
            SYSTEM_PROMPT, author, url, text
        );

        let reply = match self.backend.generate(&self.primary_model, &prompt).await {
            Ok(reply) => reply,
            Err(LlmError::ResourceExhausted) => {
                warn!(
                    "Model {} quota exhausted, retrying on {}",
                    self.primary_model, self.fallback_model
                );
                self.backend.generate(&self.fallback_model, &prompt).await?
            }
            Err(e) => return Err(e),
        };

        let result = parse_reply(&reply, &author)?;
        info!(
            "Classified post: category={} summary_len={}",
            result.category,
            result.summary.len()
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use sheetsort_common::Category;
    use std::sync::Mutex;

    /// Backend returning scripted results, one per call.
    struct ScriptedBackend {
        replies: Mutex<Vec<Result<String, LlmError>>>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedBackend {
        fn new(replies: Vec<Result<String, LlmError>>) -> Self {
            Self {
                replies: Mutex::new(replies),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl LlmBackend for ScriptedBackend {
        async fn generate(&self, model: &str, _prompt: &str) -> Result<String, LlmError> {
            self.calls.lock().unwrap().push(model.to_string());
            self.replies.lock().unwrap().remove(0)
        }
    }

    fn config() -> LlmConfig {
        LlmConfig {
            primary_model: "primary".to_string(),
            fallback_model: "fallback".to_string(),
            timeout_secs: 5,
        }
    }

    #[tokio::test]
    async fn test_classify_success() {
        let backend = Arc::new(ScriptedBackend::new(vec![Ok(
            r#"{"summary":"S","category":"Tool","author":"A"}"#.to_string(),
        )]));
        let classifier = Classifier::new(backend.clone(), &config());

        let result = classifier.classify("scraped", "http://x", "post").await.unwrap();
        assert_eq!(result.category, Category::Tool);
        assert_eq!(*backend.calls.lock().unwrap(), vec!["primary"]);
    }

    #[tokio::test]
    async fn test_quota_retries_on_fallback_model() {
        let backend = Arc::new(ScriptedBackend::new(vec![
            Err(LlmError::ResourceExhausted),
            Ok(r#"{"summary":"S","category":"RAG","author":"A"}"#.to_string()),
        ]));
        let classifier = Classifier::new(backend.clone(), &config());

        let result = classifier.classify("scraped", "http://x", "post").await.unwrap();
        assert_eq!(result.category, Category::Rag);
        assert_eq!(
            *backend.calls.lock().unwrap(),
            vec!["primary", "fallback"]
        );
    }

    #[tokio::test]
    async fn test_non_quota_error_not_retried() {
        let backend = Arc::new(ScriptedBackend::new(vec![Err(LlmError::Http(
            "boom".to_string(),
        ))]));
        let classifier = Classifier::new(backend.clone(), &config());

        let err = classifier.classify("a", "u", "t").await.unwrap_err();
        assert!(matches!(err, LlmError::Http(_)));
        assert_eq!(backend.calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_fallback_failure_propagates() {
        let backend = Arc::new(ScriptedBackend::new(vec![
            Err(LlmError::ResourceExhausted),
            Err(LlmError::ResourceExhausted),
        ]));
        let classifier = Classifier::new(backend, &config());

        let err = classifier.classify("a", "u", "t").await.unwrap_err();
        assert!(matches!(err, LlmError::ResourceExhausted));
    }

    #[tokio::test]
    async fn test_author_fallback_uses_normalized_input() {
        // Stylized author name should come back plain when the model omits it.
        let backend = Arc::new(ScriptedBackend::new(vec![Ok(
            r#"{"summary":"S","category":"MCP"}"#.to_string(),
        )]));
        let classifier = Classifier::new(backend, &config());

        let result = classifier
            .classify("\u{1D5D5}\u{1D5FC}\u{1D5F9}\u{1D5F1}", "u", "t")
            .await
            .unwrap();
        assert_eq!(result.author, "Bold");
    }
}
