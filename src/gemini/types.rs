use super::GenerationError;
use crate::chat::{ChatMessage, FragmentStream};
use async_trait::async_trait;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageOptions {
    pub number_of_images: u32,
    pub mime_type: String,
    pub aspect_ratio: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub mime_type: String,
    pub bytes_base64: String,
}

#[async_trait]
pub trait GenerationService: Send + Sync {
    async fn complete_json(
        &self,
        model: &str,
        system_instruction: &str,
        prompt: &str,
        schema: Value,
    ) -> Result<String, GenerationError>;

    async fn complete_text(&self, model: &str, prompt: &str) -> Result<String, GenerationError>;

    async fn generate_images(
        &self,
        model: &str,
        prompt: &str,
        options: &ImageOptions,
    ) -> Result<Vec<GeneratedImage>, GenerationError>;

    async fn stream_chat(
        &self,
        model: &str,
        system_instruction: &str,
        history: &[ChatMessage],
        message: &str,
    ) -> Result<FragmentStream, GenerationError>;
}
