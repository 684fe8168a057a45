//! Composer — drafts the cold outreach email from the job text and matches.

use crate::errors::AppError;
use crate::llm_client::ChatModel;
use crate::pipeline::prompts::{EMAIL_PROMPT_TEMPLATE, EMAIL_SYSTEM};

/// Asks the chat model for a cold email citing the retrieved portfolio links.
/// The reply text is returned unmodified — no post-validation of content or
/// length.
pub async fn compose(
    chat: &dyn ChatModel,
    job_text: &str,
    links: &[String],
) -> Result<String, AppError> {
    let prompt = EMAIL_PROMPT_TEMPLATE
        .replace("{job_description}", job_text)
        .replace("{portfolio_links}", &links.join(", "));

    chat.complete(EMAIL_SYSTEM, &prompt).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Stub that records the prompt and returns a fixed reply.
    struct RecordingChat {
        reply: &'static str,
        last_prompt: Mutex<String>,
    }

    #[async_trait]
    impl ChatModel for RecordingChat {
        async fn complete(&self, _system: &str, prompt: &str) -> Result<String, AppError> {
            *self.last_prompt.lock().unwrap() = prompt.to_string();
            Ok(self.reply.to_string())
        }
    }

    #[tokio::test]
    async fn test_compose_returns_model_reply_verbatim() {
        let chat = RecordingChat {
            reply: "Dear hiring team,\n\nI noticed your opening...",
            last_prompt: Mutex::new(String::new()),
        };
        let email = compose(&chat, "job text", &["https://alice.dev".to_string()])
            .await
            .unwrap();
        assert_eq!(email, "Dear hiring team,\n\nI noticed your opening...");
        assert!(!email.is_empty());
    }

    #[tokio::test]
    async fn test_compose_prompt_carries_job_text_and_joined_links() {
        let chat = RecordingChat {
            reply: "ok",
            last_prompt: Mutex::new(String::new()),
        };
        let links = vec![
            "https://alice.dev".to_string(),
            "https://bob.dev".to_string(),
        ];
        compose(&chat, "Build tools", &links).await.unwrap();

        let prompt = chat.last_prompt.lock().unwrap().clone();
        assert!(prompt.contains("Job Description: Build tools"));
        assert!(prompt.contains("Portfolio Links: https://alice.dev, https://bob.dev"));
    }
}
