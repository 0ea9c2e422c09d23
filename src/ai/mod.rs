//! Completion provider integration
//!
//! Two capabilities are consumed: a vision completion that reads an image
//! alongside a prompt, and a plain text completion. OpenAI implementations
//! live in [`openai`]; [`mock`] provides scripted stand-ins for tests.

pub mod mime;
pub mod mock;
pub mod openai;

pub use mock::{MockCompletionClient, MockVisionClient};
pub use openai::{OpenAiChatClient, OpenAiHttpClient, OpenAiVisionClient};

use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait VisionService: Send + Sync {
    /// Complete `prompt` with an image supplied as a `data:` URI.
    async fn complete_with_image(
        &self,
        prompt: &str,
        image_data_uri: &str,
        max_tokens: u32,
    ) -> Result<String>;
}

#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}
