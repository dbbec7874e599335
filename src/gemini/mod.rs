mod client;
mod error;
mod sse;
mod types;
mod wire;

pub use client::GeminiClient;
pub use error::GenerationError;
pub use types::{GeneratedImage, GenerationService, ImageOptions};
