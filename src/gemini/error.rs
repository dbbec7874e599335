use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Gemini API error: HTTP {status} {body}")]
    Service { status: u16, body: String },
    #[error("Failed to parse response: {0}")]
    Parse(String),
    #[error("Response contained no text")]
    EmptyResponse,
    #[error("画像が生成されませんでした。プロンプトを修正して再度お試しください。")]
    NoImageReturned,
    #[error("Stream failed: {0}")]
    Stream(String),
}

impl From<serde_json::Error> for GenerationError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}
