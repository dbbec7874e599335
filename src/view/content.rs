use super::clipboard::{Clipboard, CopyFeedback};
use super::{CONTENT_FAILED, Outcome, Phase};
use crate::gemini::GenerationError;
use crate::generation::GenerationClient;
use crate::model::{ContentField, GeneratedContent};
use crate::prompt::ArticleRequest;
use anyhow::Result;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

pub struct ContentForm {
    pub request: ArticleRequest,
    phase: Phase,
    copy_all: CopyFeedback,
    field_copies: [CopyFeedback; 3],
}

fn field_index(field: ContentField) -> usize {
    match field {
        ContentField::Title => 0,
        ContentField::Body => 1,
        ContentField::TwitterPost => 2,
    }
}

fn user_message(err: &GenerationError) -> String {
    match err {
        GenerationError::Parse(_) => CONTENT_FAILED.to_string(),
        other => format!("{} ({})", CONTENT_FAILED, other),
    }
}

impl ContentForm {
    pub fn new(copy_feedback: Duration) -> Self {
        Self {
            request: ArticleRequest::default(),
            phase: Phase::Idle,
            copy_all: CopyFeedback::new(copy_feedback),
            field_copies: std::array::from_fn(|_| CopyFeedback::new(copy_feedback)),
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn can_generate(&self) -> bool {
        !self.phase.is_loading() && !self.request.topic.is_empty()
    }

    /// Replaces `content` on success; on failure the previous content stays.
    pub async fn generate(
        &mut self,
        client: &GenerationClient,
        content: &mut GeneratedContent,
        cancel: impl Future<Output = ()>,
    ) -> Outcome {
        if !self.can_generate() {
            return Outcome::Skipped;
        }
        self.phase = Phase::Loading;

        let result = tokio::select! {
            biased;
            _ = cancel => {
                warn!("Article generation cancelled");
                self.phase = Phase::Idle;
                return Outcome::Cancelled;
            }
            result = client.generate_article(&self.request) => result,
        };

        match result {
            Ok(generated) => {
                *content = generated;
                self.phase = Phase::Succeeded;
                Outcome::Succeeded
            }
            Err(e) => {
                self.phase = Phase::Failed(user_message(&e));
                Outcome::Failed
            }
        }
    }

    pub fn clear(&mut self, content: &mut GeneratedContent) {
        self.request = ArticleRequest::default();
        *content = GeneratedContent::default();
        self.phase = Phase::Idle;
    }

    pub fn edit(&mut self, content: &mut GeneratedContent, field: ContentField, value: String) {
        content.set_field(field, value);
        self.phase.clear_error();
    }

    pub fn can_copy_all(content: &GeneratedContent) -> bool {
        !content.is_empty()
    }

    pub fn copy_all(
        &mut self,
        clipboard: &mut dyn Clipboard,
        content: &GeneratedContent,
    ) -> Result<bool> {
        if !Self::can_copy_all(content) {
            return Ok(false);
        }
        self.copy_all.copy(clipboard, &content.to_tsv())
    }

    pub fn copy_field(
        &mut self,
        clipboard: &mut dyn Clipboard,
        content: &GeneratedContent,
        field: ContentField,
    ) -> Result<bool> {
        self.field_copies[field_index(field)].copy(clipboard, content.field(field))
    }

    pub fn all_copied(&self) -> bool {
        self.copy_all.is_copied()
    }

    pub fn field_copied(&self, field: ContentField) -> bool {
        self.field_copies[field_index(field)].is_copied()
    }
}
