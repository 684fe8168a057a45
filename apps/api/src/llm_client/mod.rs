/// Chat model client — the single point of entry for all hosted completion
/// calls in the outreach pipeline.
///
/// ARCHITECTURAL RULE: No other module may call the Groq API directly.
/// All completion calls MUST go through the `ChatModel` trait.
///
/// Model: llama-3.1-70b-versatile at temperature 0 (hardcoded — extraction
/// must be deterministic, so sampling parameters are not configurable)
use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use crate::errors::AppError;

const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
/// The model used for all completion calls.
pub const MODEL: &str = "llama-3.1-70b-versatile";
const TEMPERATURE: f32 = 0.0;

/// The completion seam. `AppState` carries an `Arc<dyn ChatModel>` so tests
/// inject scripted stubs in place of the hosted endpoint.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Sends one prompt with a system instruction and returns the reply text.
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, AppError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ChatReplyMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Groq chat-completions client (OpenAI-compatible wire format).
///
/// The API key is optional at construction so the process can start without
/// credentials; a missing key fails the first call with a `Config` error.
#[derive(Clone)]
pub struct GroqClient {
    client: Client,
    api_key: Option<String>,
}

impl GroqClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_key,
        }
    }
}

#[async_trait]
impl ChatModel for GroqClient {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, AppError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::Config("GROQ_API_KEY is not set".to_string()))?;

        let request_body = ChatRequest {
            model: MODEL,
            temperature: TEMPERATURE,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        };

        let response = self
            .client
            .post(GROQ_API_URL)
            .bearer_auth(api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| AppError::ModelCall(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Surface the API's own error message where the body parses
            let message = serde_json::from_str::<ApiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(AppError::ModelCall(format!("status {status}: {message}")));
        }

        let reply: ChatResponse = response
            .json()
            .await
            .map_err(|e| AppError::ModelCall(format!("malformed completion response: {e}")))?;

        if let Some(usage) = &reply.usage {
            debug!(
                "completion succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        reply
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| AppError::ModelCall("completion returned no choices".to_string()))
    }
}

/// Calls the chat model and parses the reply strictly as JSON.
/// The prompt must instruct the model to return valid JSON.
pub async fn complete_json<T: DeserializeOwned>(
    chat: &dyn ChatModel,
    system: &str,
    prompt: &str,
) -> Result<T, AppError> {
    let reply = chat.complete(system, prompt).await?;

    // Strip markdown code fences if the model wraps JSON in them
    let text = strip_json_fences(&reply);

    serde_json::from_str(text).map_err(|e| AppError::Parse(e.to_string()))
}

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_chat_response_deserializes_openai_shape() {
        let json = r#"{
            "choices": [{"message": {"role": "assistant", "content": "hello"}}],
            "usage": {"prompt_tokens": 10, "completion_tokens": 2, "total_tokens": 12}
        }"#;
        let reply: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(reply.choices[0].message.content, "hello");
        assert_eq!(reply.usage.unwrap().completion_tokens, 2);
    }

    #[tokio::test]
    async fn test_missing_api_key_is_config_error_at_first_use() {
        let client = GroqClient::new(None);
        let err = client.complete("system", "prompt").await.unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
