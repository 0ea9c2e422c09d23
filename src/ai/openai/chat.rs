use super::client::OpenAiHttpClient;
use super::types::{ChatCompletionRequest, ChatMessage, ChatMessageContent};
use crate::ai::CompletionService;
use crate::{Error, Result};
use async_trait::async_trait;

/// Single-turn text completion against a chat model.
pub struct OpenAiChatClient {
    http: OpenAiHttpClient,
    model: String,
}

impl OpenAiChatClient {
    pub fn new(http: OpenAiHttpClient, model: String) -> Self {
        Self { http, model }
    }
}

#[async_trait]
impl CompletionService for OpenAiChatClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::user(ChatMessageContent::Text(
                prompt.to_string(),
            ))],
            max_tokens: None,
        };

        let response = self.http.chat_completion(&request).await?;

        response
            .first_text()
            .ok_or_else(|| Error::AiProvider("No response from OpenAI chat API".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn make_client(server: &MockServer, model: &str) -> OpenAiChatClient {
        let http = OpenAiHttpClient::new("test-key".to_string(), None)
            .unwrap()
            .with_base_url(server.uri());
        OpenAiChatClient::new(http, model.to_string())
    }

    #[tokio::test]
    async fn test_complete_returns_content_verbatim() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("Authorization", "Bearer test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{
                    "message": {
                        "role": "assistant",
                        "content": "<h1>Omelette</h1>\n<ol><li>Whisk</li></ol>"
                    },
                    "finish_reason": "stop"
                }]
            })))
            .mount(&server)
            .await;

        let client = make_client(&server, "gpt-4");
        let recipe = client.complete("make something").await.unwrap();
        assert_eq!(recipe, "<h1>Omelette</h1>\n<ol><li>Whisk</li></ol>");
    }

    #[tokio::test]
    async fn test_complete_sends_single_user_message() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(body_partial_json(serde_json::json!({
                "model": "custom-model",
                "messages": [{ "role": "user", "content": "use eggs" }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{
                    "message": { "role": "assistant", "content": "ok" },
                    "finish_reason": "stop"
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = make_client(&server, "custom-model");
        client.complete("use eggs").await.unwrap();
    }

    #[tokio::test]
    async fn test_api_error_returns_ai_provider_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
            .mount(&server)
            .await;

        let client = make_client(&server, "gpt-4");
        let err = client.complete("anything").await.unwrap_err();
        assert!(matches!(err, Error::AiProvider(_)));
    }

    #[tokio::test]
    async fn test_empty_choices_is_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "choices": [] })),
            )
            .mount(&server)
            .await;

        let client = make_client(&server, "gpt-4");
        let err = client.complete("anything").await.unwrap_err();
        assert!(err.to_string().contains("No response"));
    }
}
