use super::sse::SseDecoder;
use super::types::{GeneratedImage, GenerationService, ImageOptions};
use super::wire::{
    GenerateContentRequest, GenerateContentResponse, OutputOptions, PredictInstance,
    PredictParameters, PredictRequest, PredictResponse,
};
use super::GenerationError;
use crate::chat::{ChatMessage, FragmentStream, StreamEvent};
use async_trait::async_trait;
use futures_util::StreamExt;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

const API_KEY_HEADER: &str = "x-goog-api-key";

pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: &str, base_url: &str) -> Self {
        info!("Gemini client initialized (endpoint: {})", base_url);
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, model: &str, method: &str) -> String {
        format!("{}/models/{}:{}", self.base_url, model, method)
    }

    async fn post<B: Serialize>(
        &self,
        url: &str,
        extra_query: &[(&str, &str)],
        body: &B,
    ) -> Result<reqwest::Response, GenerationError> {
        let resp = self
            .client
            .post(url)
            .header(API_KEY_HEADER, &self.api_key)
            .query(extra_query)
            .json(body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(GenerationError::Service { status, body });
        }

        Ok(resp)
    }

    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<String, GenerationError> {
        let resp = self
            .post(&self.endpoint(model, "generateContent"), &[], request)
            .await?;
        let raw = resp.text().await?;
        let data: GenerateContentResponse = serde_json::from_str(&raw)?;
        if let Some(err) = data.error {
            return Err(api_error(err));
        }

        let text = data.text();
        if text.is_empty() {
            return Err(GenerationError::EmptyResponse);
        }
        Ok(text)
    }
}

fn api_error(err: super::wire::ApiErrorBody) -> GenerationError {
    GenerationError::Service {
        status: err.code.unwrap_or(500),
        body: err.message,
    }
}

/// Forwards one SSE payload; returns false once the stream must stop.
async fn forward_payload(payload: &str, tx: &mpsc::Sender<StreamEvent>) -> bool {
    let data: GenerateContentResponse = match serde_json::from_str(payload) {
        Ok(data) => data,
        Err(e) => {
            let _ = tx
                .send(StreamEvent::Error(format!("malformed stream event: {}", e)))
                .await;
            return false;
        }
    };

    if let Some(err) = data.error {
        let _ = tx.send(StreamEvent::Error(api_error(err).to_string())).await;
        return false;
    }

    let text = data.text();
    if text.is_empty() {
        return true;
    }
    tx.send(StreamEvent::TextDelta(text)).await.is_ok()
}

async fn relay_sse(resp: reqwest::Response, tx: mpsc::Sender<StreamEvent>) {
    let mut body = resp.bytes_stream();
    let mut decoder = SseDecoder::default();

    while let Some(chunk) = body.next().await {
        let chunk = match chunk {
            Ok(chunk) => chunk,
            Err(e) => {
                warn!("Chat stream interrupted: {}", e);
                let _ = tx.send(StreamEvent::Error(e.to_string())).await;
                return;
            }
        };
        for payload in decoder.feed(&chunk) {
            if !forward_payload(&payload, &tx).await {
                return;
            }
        }
    }

    if let Some(payload) = decoder.finish()
        && !forward_payload(&payload, &tx).await
    {
        return;
    }

    debug!("Chat stream finished");
    let _ = tx.send(StreamEvent::Done).await;
}

#[async_trait]
impl GenerationService for GeminiClient {
    async fn complete_json(
        &self,
        model: &str,
        system_instruction: &str,
        prompt: &str,
        schema: Value,
    ) -> Result<String, GenerationError> {
        let request = GenerateContentRequest::structured(system_instruction, prompt, schema);
        self.generate_content(model, &request).await
    }

    async fn complete_text(&self, model: &str, prompt: &str) -> Result<String, GenerationError> {
        self.generate_content(model, &GenerateContentRequest::text(prompt))
            .await
    }

    async fn generate_images(
        &self,
        model: &str,
        prompt: &str,
        options: &ImageOptions,
    ) -> Result<Vec<GeneratedImage>, GenerationError> {
        let request = PredictRequest {
            instances: vec![PredictInstance {
                prompt: prompt.to_string(),
            }],
            parameters: PredictParameters {
                sample_count: options.number_of_images,
                aspect_ratio: options.aspect_ratio.clone(),
                output_options: OutputOptions {
                    mime_type: options.mime_type.clone(),
                },
            },
        };

        let resp = self
            .post(&self.endpoint(model, "predict"), &[], &request)
            .await?;
        let raw = resp.text().await?;
        let data: PredictResponse = serde_json::from_str(&raw)?;

        let images = data
            .predictions
            .into_iter()
            .filter_map(|p| {
                let bytes = p.bytes_base64_encoded.filter(|b| !b.is_empty())?;
                Some(GeneratedImage {
                    mime_type: p.mime_type.unwrap_or_else(|| options.mime_type.clone()),
                    bytes_base64: bytes,
                })
            })
            .collect();
        Ok(images)
    }

    async fn stream_chat(
        &self,
        model: &str,
        system_instruction: &str,
        history: &[ChatMessage],
        message: &str,
    ) -> Result<FragmentStream, GenerationError> {
        let request = GenerateContentRequest::chat(system_instruction, history, message);
        let resp = self
            .post(
                &self.endpoint(model, "streamGenerateContent"),
                &[("alt", "sse")],
                &request,
            )
            .await?;

        Ok(FragmentStream::spawn(move |tx| relay_sse(resp, tx)))
    }
}
