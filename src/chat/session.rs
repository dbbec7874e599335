use super::message::ChatMessage;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct ChatSession {
    id: Uuid,
    model: String,
    system_instruction: String,
    history: Vec<ChatMessage>,
}

impl ChatSession {
    pub fn new(model: impl Into<String>, system_instruction: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            model: model.into(),
            system_instruction: system_instruction.into(),
            history: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn system_instruction(&self) -> &str {
        &self.system_instruction
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    pub fn record_turn(&mut self, user: impl Into<String>, model: impl Into<String>) {
        self.history.push(ChatMessage::user(user));
        self.history.push(ChatMessage::model(model));
    }
}
