//! One-shot chat-completion client.

use tracing::debug;

use crate::api::{ChatMessage, ChatRequest, ChatResponse};
use crate::core::net::ApiError;
use crate::utils::url::endpoint_url;

pub const DEFAULT_CHAT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Replies are capped small; this is a widget, not a writing desk.
const MAX_COMPLETION_TOKENS: u32 = 150;

/// Shown when the API answers successfully but with no choices.
pub const NO_RESPONSE_NOTICE: &str = "No response from assistant";

#[derive(Clone)]
pub struct ChatClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl ChatClient {
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        ChatClient {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send one completion request and return the first choice's content.
    ///
    /// No streaming, no retries; errors map straight to [`ApiError`].
    pub async fn send(&self, messages: Vec<ChatMessage>) -> Result<String, ApiError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages,
            max_tokens: MAX_COMPLETION_TOKENS,
        };
        let url = endpoint_url(&self.base_url, "chat/completions");
        debug!(model = %self.model, %url, "sending chat completion request");

        let response = self
            .client
            .post(url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(ApiError::Transport)?;

        let status = response.status();
        debug!(status = %status, "chat completion response");
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<no body>".to_string());
            return Err(ApiError::from_status(status, body));
        }

        let parsed: ChatResponse = response.json().await.map_err(ApiError::Transport)?;
        Ok(parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .unwrap_or_else(|| NO_RESPONSE_NOTICE.to_string()))
    }
}

/// The single-turn payload the app sends: one user message, no history.
pub fn user_turn(content: impl Into<String>) -> Vec<ChatMessage> {
    vec![ChatMessage {
        role: "user".to_string(),
        content: content.into(),
    }]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_turn_is_a_single_user_message() {
        let messages = user_turn("what's the weather like?");
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, "user");
        assert_eq!(messages[0].content, "what's the weather like?");
    }

    #[test]
    fn request_serializes_in_the_openai_shape() {
        let request = ChatRequest {
            model: DEFAULT_MODEL.to_string(),
            messages: user_turn("hi"),
            max_tokens: MAX_COMPLETION_TOKENS,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-3.5-turbo");
        assert_eq!(json["max_tokens"], 150);
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "hi");
    }

    #[test]
    fn first_choice_content_is_extracted() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"hello"}},
                       {"message":{"role":"assistant","content":"ignored"}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(body).unwrap();
        let content = parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .unwrap_or_else(|| NO_RESPONSE_NOTICE.to_string());
        assert_eq!(content, "hello");
    }

    #[test]
    fn empty_choice_list_falls_back_to_the_notice() {
        let parsed: ChatResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        let content = parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .unwrap_or_else(|| NO_RESPONSE_NOTICE.to_string());
        assert_eq!(content, NO_RESPONSE_NOTICE);
    }
}
