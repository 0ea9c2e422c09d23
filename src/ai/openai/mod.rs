pub mod chat;
pub mod client;
pub mod types;
pub mod vision;

pub use chat::OpenAiChatClient;
pub use client::OpenAiHttpClient;
pub use vision::OpenAiVisionClient;
