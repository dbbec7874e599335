use crate::chat::{ChatMessage, FragmentStream, StreamEvent};
use crate::gemini::{GeneratedImage, GenerationError, GenerationService, ImageOptions};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

#[derive(Debug, Clone)]
pub(crate) enum Recorded {
    Json {
        model: String,
        prompt: String,
    },
    Text {
        model: String,
        prompt: String,
    },
    Images {
        model: String,
        prompt: String,
        options: ImageOptions,
    },
    Chat {
        system_instruction: String,
        history_len: usize,
        message: String,
    },
}

enum ChatReply {
    Events(Vec<StreamEvent>),
    Fail(String),
}

#[derive(Default)]
pub(crate) struct FakeService {
    json: Mutex<VecDeque<Result<String, GenerationError>>>,
    text: Mutex<VecDeque<Result<String, GenerationError>>>,
    images: Mutex<VecDeque<Result<Vec<GeneratedImage>, GenerationError>>>,
    chat: Mutex<VecDeque<ChatReply>>,
    calls: Mutex<Vec<Recorded>>,
}

impl FakeService {
    pub fn with_json(self, reply: Result<String, GenerationError>) -> Self {
        self.json.lock().unwrap().push_back(reply);
        self
    }

    pub fn with_text(self, reply: Result<String, GenerationError>) -> Self {
        self.text.lock().unwrap().push_back(reply);
        self
    }

    pub fn with_images(self, reply: Result<Vec<GeneratedImage>, GenerationError>) -> Self {
        self.images.lock().unwrap().push_back(reply);
        self
    }

    pub fn with_chat(self, events: Vec<StreamEvent>) -> Self {
        self.chat.lock().unwrap().push_back(ChatReply::Events(events));
        self
    }

    pub fn with_chat_failure(self, message: &str) -> Self {
        self.chat
            .lock()
            .unwrap()
            .push_back(ChatReply::Fail(message.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<Recorded> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Recorded) {
        self.calls.lock().unwrap().push(call);
    }
}

fn unscripted() -> GenerationError {
    GenerationError::Stream("no scripted reply".to_string())
}

#[async_trait]
impl GenerationService for FakeService {
    async fn complete_json(
        &self,
        model: &str,
        _system_instruction: &str,
        prompt: &str,
        _schema: Value,
    ) -> Result<String, GenerationError> {
        self.record(Recorded::Json {
            model: model.to_string(),
            prompt: prompt.to_string(),
        });
        self.json.lock().unwrap().pop_front().unwrap_or_else(|| Err(unscripted()))
    }

    async fn complete_text(&self, model: &str, prompt: &str) -> Result<String, GenerationError> {
        self.record(Recorded::Text {
            model: model.to_string(),
            prompt: prompt.to_string(),
        });
        self.text.lock().unwrap().pop_front().unwrap_or_else(|| Err(unscripted()))
    }

    async fn generate_images(
        &self,
        model: &str,
        prompt: &str,
        options: &ImageOptions,
    ) -> Result<Vec<GeneratedImage>, GenerationError> {
        self.record(Recorded::Images {
            model: model.to_string(),
            prompt: prompt.to_string(),
            options: options.clone(),
        });
        self.images
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(unscripted()))
    }

    async fn stream_chat(
        &self,
        _model: &str,
        system_instruction: &str,
        history: &[ChatMessage],
        message: &str,
    ) -> Result<FragmentStream, GenerationError> {
        self.record(Recorded::Chat {
            system_instruction: system_instruction.to_string(),
            history_len: history.len(),
            message: message.to_string(),
        });
        let reply = self.chat.lock().unwrap().pop_front();
        match reply {
            Some(ChatReply::Events(events)) => Ok(FragmentStream::from_events(events)),
            Some(ChatReply::Fail(message)) => Err(GenerationError::Stream(message)),
            None => Err(unscripted()),
        }
    }
}
