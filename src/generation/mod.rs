use crate::chat::{ChatSession, FragmentStream};
use crate::config::ModelConfig;
use crate::gemini::{GenerationError, GenerationService, ImageOptions};
use crate::model::GeneratedContent;
use crate::prompt::{
    self, ArticleRequest, CHAT_SYSTEM_INSTRUCTION, FALLBACK_IMAGE_PROMPT,
};
use crate::utils::strip_double_quotes;
use std::sync::Arc;
use tracing::{error, info};

#[cfg(test)]
pub(crate) mod fake;

const IMAGE_MIME_TYPE: &str = "image/jpeg";

#[derive(Clone)]
pub struct GenerationClient {
    service: Arc<dyn GenerationService>,
    models: ModelConfig,
}

impl GenerationClient {
    pub fn new(service: Arc<dyn GenerationService>, models: ModelConfig) -> Self {
        Self { service, models }
    }

    pub async fn generate_article(
        &self,
        req: &ArticleRequest,
    ) -> Result<GeneratedContent, GenerationError> {
        let prompt = prompt::build_article_prompt(req);
        info!(
            "Generating article (model: {}, type: {}, prompt: {} chars)",
            self.models.article,
            req.output_type.label(),
            prompt.user_prompt.chars().count()
        );

        let payload = self
            .service
            .complete_json(
                &self.models.article,
                prompt.system_instruction,
                &prompt.user_prompt,
                prompt::article_schema(),
            )
            .await
            .inspect_err(|e| error!("Article generation failed: {}", e))?;

        let content: GeneratedContent = serde_json::from_str(payload.trim())
            .inspect_err(|e| error!("Article payload is not valid JSON: {}", e))?;
        info!(
            "Article generated (title: {} chars, body: {} chars)",
            content.title.chars().count(),
            content.body.chars().count()
        );
        Ok(content)
    }

    pub async fn generate_image_prompt(
        &self,
        title: &str,
        body: &str,
        style: &str,
    ) -> Result<String, GenerationError> {
        if title.is_empty() && body.is_empty() {
            return Ok(FALLBACK_IMAGE_PROMPT.to_string());
        }

        let request = prompt::build_image_prompt_request(title, body, style);
        info!("Generating image prompt (model: {})", self.models.text);
        let text = self
            .service
            .complete_text(&self.models.text, &request)
            .await
            .inspect_err(|e| error!("Image prompt generation failed: {}", e))?;
        Ok(strip_double_quotes(&text))
    }

    pub async fn generate_image(
        &self,
        prompt: &str,
        style: &str,
        aspect_ratio: &str,
    ) -> Result<String, GenerationError> {
        let final_prompt = prompt::build_image_generation_prompt(prompt, style);
        let options = ImageOptions {
            number_of_images: 1,
            mime_type: IMAGE_MIME_TYPE.to_string(),
            aspect_ratio: aspect_ratio.to_string(),
        };
        info!(
            "Generating image (model: {}, aspect ratio: {})",
            self.models.image, aspect_ratio
        );

        let images = self
            .service
            .generate_images(&self.models.image, &final_prompt, &options)
            .await
            .inspect_err(|e| error!("Image generation failed: {}", e))?;

        let image = images
            .into_iter()
            .next()
            .ok_or(GenerationError::NoImageReturned)?;
        Ok(format!("data:{};base64,{}", image.mime_type, image.bytes_base64))
    }

    pub fn create_chat_session(&self) -> ChatSession {
        let session = ChatSession::new(&self.models.chat, CHAT_SYSTEM_INSTRUCTION);
        info!("Chat session {} opened", session.id());
        session
    }

    pub async fn send_chat_message(
        &self,
        session: &ChatSession,
        text: &str,
    ) -> Result<FragmentStream, GenerationError> {
        info!(
            "Sending chat message (session: {}, history: {} messages)",
            session.id(),
            session.history().len()
        );
        self.service
            .stream_chat(
                session.model(),
                session.system_instruction(),
                session.history(),
                text,
            )
            .await
            .inspect_err(|e| error!("Chat request failed: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::fake::{FakeService, Recorded};
    use super::*;
    use crate::chat::StreamEvent;
    use crate::gemini::GeneratedImage;
    use crate::model::{Atmosphere, OutputType};
    use pretty_assertions::assert_eq;

    fn client(service: FakeService) -> (GenerationClient, Arc<FakeService>) {
        let service = Arc::new(service);
        (
            GenerationClient::new(service.clone(), ModelConfig::default()),
            service,
        )
    }

    #[tokio::test]
    async fn article_payload_is_parsed() {
        let (client, service) = client(FakeService::default().with_json(Ok(
            r#" {"title":"T","body":"B","twitterPost":"X"} "#.into(),
        )));
        let req = ArticleRequest {
            topic: "AIと事務".into(),
            atmosphere: Atmosphere::Logical,
            output_type: OutputType::Note,
            ..Default::default()
        };

        let content = client.generate_article(&req).await.unwrap();
        assert_eq!(
            content,
            GeneratedContent {
                title: "T".into(),
                body: "B".into(),
                twitter_post: "X".into(),
            }
        );

        let calls = service.calls();
        match &calls[0] {
            Recorded::Json { model, prompt, .. } => {
                assert_eq!(model, "gemini-2.5-pro");
                assert!(prompt.contains("AIと事務"));
            }
            other => panic!("unexpected call: {:?}", other),
        }
    }

    #[tokio::test]
    async fn malformed_article_payload_is_a_parse_error() {
        let (client, _) = client(FakeService::default().with_json(Ok("{\"title\":".into())));
        let err = client
            .generate_article(&ArticleRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::Parse(_)));
    }

    #[tokio::test]
    async fn payload_missing_a_field_is_a_parse_error() {
        let (client, _) = client(
            FakeService::default().with_json(Ok(r#"{"title":"T","body":"B"}"#.into())),
        );
        let err = client
            .generate_article(&ArticleRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::Parse(_)));
    }

    #[tokio::test]
    async fn image_prompt_strips_quotes() {
        let (client, service) = client(
            FakeService::default().with_text(Ok("\"A woman at a \"sunny\" desk\"\n".into())),
        );
        let prompt = client
            .generate_image_prompt("title", "body", "写真風")
            .await
            .unwrap();
        assert_eq!(prompt, "A woman at a sunny desk");
        match &service.calls()[0] {
            Recorded::Text { model, .. } => assert_eq!(model, "gemini-2.5-flash"),
            other => panic!("unexpected call: {:?}", other),
        }
    }

    #[tokio::test]
    async fn empty_article_yields_fallback_without_calling_the_service() {
        let (client, service) = client(FakeService::default());
        let prompt = client.generate_image_prompt("", "", "写真風").await.unwrap();
        assert_eq!(prompt, FALLBACK_IMAGE_PROMPT);
        assert!(service.calls().is_empty());
    }

    #[tokio::test]
    async fn image_is_returned_as_data_uri() {
        let (client, service) = client(FakeService::default().with_images(Ok(vec![
            GeneratedImage {
                mime_type: "image/jpeg".into(),
                bytes_base64: "QUJD".into(),
            },
        ])));
        let uri = client
            .generate_image("A desk", "水彩画風", "4:3")
            .await
            .unwrap();
        assert_eq!(uri, "data:image/jpeg;base64,QUJD");

        match &service.calls()[0] {
            Recorded::Images {
                model,
                prompt,
                options,
            } => {
                assert_eq!(model, "imagen-4.0-generate-001");
                assert_eq!(prompt, "A desk, in the style of a watercolor painting");
                assert_eq!(options.number_of_images, 1);
                assert_eq!(options.mime_type, "image/jpeg");
                assert_eq!(options.aspect_ratio, "4:3");
            }
            other => panic!("unexpected call: {:?}", other),
        }
    }

    #[tokio::test]
    async fn zero_images_is_an_error() {
        let (client, _) = client(FakeService::default().with_images(Ok(Vec::new())));
        let err = client.generate_image("p", "写真風", "1:1").await.unwrap_err();
        assert!(matches!(err, GenerationError::NoImageReturned));
        assert_eq!(
            err.to_string(),
            "画像が生成されませんでした。プロンプトを修正して再度お試しください。"
        );
    }

    #[tokio::test]
    async fn chat_replays_session_history() {
        let (client, service) = client(FakeService::default().with_chat(vec![
            StreamEvent::TextDelta("ok".into()),
            StreamEvent::Done,
        ]));
        let mut session = client.create_chat_session();
        session.record_turn("前の質問", "前の答え");

        let mut stream = client.send_chat_message(&session, "次の質問").await.unwrap();
        assert_eq!(stream.next_fragment().await.unwrap().unwrap(), "ok");

        match &service.calls()[0] {
            Recorded::Chat {
                system_instruction,
                history_len,
                message,
                ..
            } => {
                assert_eq!(system_instruction, CHAT_SYSTEM_INSTRUCTION);
                assert_eq!(*history_len, 2);
                assert_eq!(message, "次の質問");
            }
            other => panic!("unexpected call: {:?}", other),
        }
    }
}
