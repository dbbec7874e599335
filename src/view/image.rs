use super::{IMAGE_FAILED, Outcome, PROMPT_FAILED, Phase};
use crate::gemini::GenerationError;
use crate::generation::GenerationClient;
use crate::model::{AspectRatio, GeneratedContent, ImageStyle};
use std::future::Future;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
struct ArticleSnapshot {
    title: String,
    body: String,
    style: ImageStyle,
}

#[derive(Debug, Default)]
pub struct ImageForm {
    pub style: ImageStyle,
    pub aspect_ratio: AspectRatio,
    pub prompt: String,
    image: Option<String>,
    phase: Phase,
    prompt_phase: Phase,
    derived_from: Option<ArticleSnapshot>,
}

impl ImageForm {
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn prompt_phase(&self) -> &Phase {
        &self.prompt_phase
    }

    pub fn error(&self) -> Option<&str> {
        self.prompt_phase.error().or(self.phase.error())
    }

    fn snapshot(&self, content: &GeneratedContent) -> ArticleSnapshot {
        ArticleSnapshot {
            title: content.title.clone(),
            body: content.body.clone(),
            style: self.style,
        }
    }

    pub fn needs_prompt_refresh(&self, content: &GeneratedContent) -> bool {
        !content.title.is_empty()
            && !content.body.is_empty()
            && self.derived_from.as_ref() != Some(&self.snapshot(content))
    }

    pub fn can_regenerate_prompt(&self, content: &GeneratedContent) -> bool {
        !self.prompt_phase.is_loading() && !content.title.is_empty() && !content.body.is_empty()
    }

    pub fn can_generate_image(&self) -> bool {
        !self.phase.is_loading() && !self.prompt.is_empty()
    }

    pub async fn sync_article(
        &mut self,
        client: &GenerationClient,
        content: &GeneratedContent,
        cancel: impl Future<Output = ()>,
    ) -> Outcome {
        if !self.needs_prompt_refresh(content) {
            return Outcome::Skipped;
        }
        debug!("Article changed, refreshing image prompt");
        self.regenerate_prompt(client, content, cancel).await
    }

    pub async fn regenerate_prompt(
        &mut self,
        client: &GenerationClient,
        content: &GeneratedContent,
        cancel: impl Future<Output = ()>,
    ) -> Outcome {
        if !self.can_regenerate_prompt(content) {
            return Outcome::Skipped;
        }
        self.prompt_phase = Phase::Loading;
        self.phase.clear_error();
        self.derived_from = Some(self.snapshot(content));

        let style = self.style.label();
        let result = tokio::select! {
            biased;
            _ = cancel => {
                warn!("Image prompt generation cancelled");
                self.prompt_phase = Phase::Idle;
                self.derived_from = None;
                return Outcome::Cancelled;
            }
            result = client.generate_image_prompt(&content.title, &content.body, style) => result,
        };

        match result {
            Ok(prompt) => {
                self.prompt = prompt;
                self.prompt_phase = Phase::Succeeded;
                Outcome::Succeeded
            }
            Err(_) => {
                self.prompt_phase = Phase::Failed(PROMPT_FAILED.to_string());
                Outcome::Failed
            }
        }
    }

    pub async fn generate_image(
        &mut self,
        client: &GenerationClient,
        cancel: impl Future<Output = ()>,
    ) -> Outcome {
        if !self.can_generate_image() {
            return Outcome::Skipped;
        }
        self.phase = Phase::Loading;
        self.prompt_phase.clear_error();
        self.image = None;

        let result = tokio::select! {
            biased;
            _ = cancel => {
                warn!("Image generation cancelled");
                self.phase = Phase::Idle;
                return Outcome::Cancelled;
            }
            result = client.generate_image(&self.prompt, self.style.label(), self.aspect_ratio.as_str()) => result,
        };

        match result {
            Ok(uri) => {
                self.image = Some(uri);
                self.phase = Phase::Succeeded;
                Outcome::Succeeded
            }
            Err(e @ GenerationError::NoImageReturned) => {
                self.phase = Phase::Failed(e.to_string());
                Outcome::Failed
            }
            Err(e) => {
                self.phase = Phase::Failed(format!("{} ({})", IMAGE_FAILED, e));
                Outcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModelConfig;
    use crate::gemini::GeneratedImage;
    use crate::generation::fake::{FakeService, Recorded};
    use crate::prompt::FALLBACK_IMAGE_PROMPT;
    use std::future::pending;
    use std::sync::Arc;

    fn article() -> GeneratedContent {
        GeneratedContent {
            title: "AIと働く".into(),
            body: "本文です。".into(),
            twitter_post: String::new(),
        }
    }

    fn setup(service: FakeService) -> (GenerationClient, Arc<FakeService>) {
        let service = Arc::new(service);
        (
            GenerationClient::new(service.clone(), ModelConfig::default()),
            service,
        )
    }

    #[tokio::test]
    async fn prompt_is_derived_once_per_article() {
        let (client, service) = setup(FakeService::default().with_text(Ok("A bright desk".into())));
        let mut form = ImageForm::default();
        let content = article();

        assert_eq!(
            form.sync_article(&client, &content, pending()).await,
            Outcome::Succeeded
        );
        assert_eq!(form.prompt, "A bright desk");
        assert_eq!(
            form.sync_article(&client, &content, pending()).await,
            Outcome::Skipped
        );
        assert_eq!(service.calls().len(), 1);
    }

    #[tokio::test]
    async fn style_change_triggers_a_new_prompt() {
        let (client, service) = setup(
            FakeService::default()
                .with_text(Ok("first".into()))
                .with_text(Ok("second".into())),
        );
        let mut form = ImageForm::default();
        let content = article();

        form.sync_article(&client, &content, pending()).await;
        form.style = ImageStyle::Watercolor;
        assert!(form.needs_prompt_refresh(&content));
        form.sync_article(&client, &content, pending()).await;

        assert_eq!(form.prompt, "second");
        match &service.calls()[1] {
            Recorded::Text { prompt, .. } => assert!(prompt.contains("watercolor painting")),
            other => panic!("unexpected call: {:?}", other),
        }
    }

    #[tokio::test]
    async fn incomplete_article_does_not_trigger() {
        let (client, service) = setup(FakeService::default());
        let mut form = ImageForm::default();
        let content = GeneratedContent {
            title: "only title".into(),
            ..Default::default()
        };
        assert_eq!(
            form.sync_article(&client, &content, pending()).await,
            Outcome::Skipped
        );
        assert!(service.calls().is_empty());
        assert!(!form.can_regenerate_prompt(&GeneratedContent::default()));
    }

    #[tokio::test]
    async fn regenerate_needs_title_and_body() {
        let (client, service) = setup(FakeService::default().with_text(Ok("p".into())));
        let mut form = ImageForm::default();
        let title_only = GeneratedContent {
            title: "only title".into(),
            ..Default::default()
        };

        assert!(!form.can_regenerate_prompt(&title_only));
        assert_eq!(
            form.regenerate_prompt(&client, &title_only, pending()).await,
            Outcome::Skipped
        );
        assert!(service.calls().is_empty());

        assert!(form.can_regenerate_prompt(&article()));
        assert_eq!(
            form.regenerate_prompt(&client, &article(), pending()).await,
            Outcome::Succeeded
        );
    }

    #[tokio::test]
    async fn prompt_failure_shows_fixed_message() {
        let (client, _) = setup(FakeService::default().with_text(Err(GenerationError::EmptyResponse)));
        let mut form = ImageForm::default();
        form.sync_article(&client, &article(), pending()).await;
        assert_eq!(form.error(), Some(PROMPT_FAILED));
        assert!(form.prompt.is_empty());
    }

    #[tokio::test]
    async fn image_requires_a_prompt() {
        let (client, service) = setup(FakeService::default());
        let mut form = ImageForm::default();
        assert_eq!(form.generate_image(&client, pending()).await, Outcome::Skipped);
        assert!(service.calls().is_empty());
    }

    #[tokio::test]
    async fn generated_image_uses_selected_ratio() {
        let (client, service) = setup(FakeService::default().with_images(Ok(vec![
            GeneratedImage {
                mime_type: "image/jpeg".into(),
                bytes_base64: "AAAA".into(),
            },
        ])));
        let mut form = ImageForm {
            prompt: FALLBACK_IMAGE_PROMPT.into(),
            aspect_ratio: AspectRatio::parse("9:16").unwrap(),
            ..Default::default()
        };

        assert_eq!(form.generate_image(&client, pending()).await, Outcome::Succeeded);
        assert_eq!(form.image(), Some("data:image/jpeg;base64,AAAA"));
        match &service.calls()[0] {
            Recorded::Images { options, .. } => assert_eq!(options.aspect_ratio, "9:16"),
            other => panic!("unexpected call: {:?}", other),
        }
    }

    #[tokio::test]
    async fn no_image_message_is_shown_verbatim() {
        let (client, _) = setup(FakeService::default().with_images(Ok(Vec::new())));
        let mut form = ImageForm {
            prompt: "p".into(),
            ..Default::default()
        };
        form.generate_image(&client, pending()).await;
        assert_eq!(
            form.error(),
            Some("画像が生成されませんでした。プロンプトを修正して再度お試しください。")
        );
        assert!(form.image().is_none());
    }
}
