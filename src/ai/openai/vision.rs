use super::client::OpenAiHttpClient;
use super::types::{ChatCompletionRequest, ChatMessage, ChatMessageContent, MessagePart};
use crate::ai::VisionService;
use crate::{Error, Result};
use async_trait::async_trait;

pub struct OpenAiVisionClient {
    http: OpenAiHttpClient,
    model: String,
}

impl OpenAiVisionClient {
    pub fn new(http: OpenAiHttpClient, model: String) -> Self {
        Self { http, model }
    }
}

#[async_trait]
impl VisionService for OpenAiVisionClient {
    async fn complete_with_image(
        &self,
        prompt: &str,
        image_data_uri: &str,
        max_tokens: u32,
    ) -> Result<String> {
        tracing::debug!(
            "Sending vision request to {} ({} byte data URI)",
            self.model,
            image_data_uri.len()
        );

        let user_message = ChatMessage::user(ChatMessageContent::Parts(vec![
            MessagePart::text(prompt),
            MessagePart::image(image_data_uri),
        ]));

        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![user_message],
            max_tokens: Some(max_tokens),
        };

        let response = self.http.chat_completion(&request).await?;

        response
            .first_text()
            .ok_or_else(|| Error::AiProvider("No response from OpenAI vision API".to_string()))
    }
}
