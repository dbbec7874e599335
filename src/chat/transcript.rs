use super::message::{ChatMessage, Role};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnId(u64);

#[derive(Debug)]
struct StreamingBuffer {
    turn: TurnId,
    text: String,
}

#[derive(Debug, Default)]
pub struct Transcript {
    log: Vec<ChatMessage>,
    streaming: Option<StreamingBuffer>,
    next_turn: u64,
}

impl Transcript {
    pub fn with_greeting(greeting: &str) -> Self {
        Self {
            log: vec![ChatMessage::model(greeting)],
            ..Default::default()
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.log
    }

    pub fn streaming_text(&self) -> Option<&str> {
        self.streaming.as_ref().map(|b| b.text.as_str())
    }

    pub fn is_streaming(&self) -> bool {
        self.streaming.is_some()
    }

    pub fn entries(&self) -> impl Iterator<Item = (Role, &str)> {
        self.log
            .iter()
            .map(|m| (m.role, m.text.as_str()))
            .chain(self.streaming_text().map(|t| (Role::Model, t)))
    }

    pub fn push_user(&mut self, text: impl Into<String>) {
        self.log.push(ChatMessage::user(text));
    }

    pub fn begin_turn(&mut self) -> TurnId {
        let turn = TurnId(self.next_turn);
        self.next_turn += 1;
        self.streaming = Some(StreamingBuffer {
            turn,
            text: String::new(),
        });
        turn
    }

    fn active_buffer(&mut self, turn: TurnId) -> Option<&mut StreamingBuffer> {
        self.streaming.as_mut().filter(|b| b.turn == turn)
    }

    /// Returns false when `turn` is no longer the active one.
    pub fn push_fragment(&mut self, turn: TurnId, fragment: &str) -> bool {
        match self.active_buffer(turn) {
            Some(buffer) => {
                buffer.text.push_str(fragment);
                true
            }
            None => false,
        }
    }

    pub fn complete(&mut self, turn: TurnId) -> Option<String> {
        self.active_buffer(turn)?;
        let buffer = self.streaming.take()?;
        self.log.push(ChatMessage::model(buffer.text.clone()));
        Some(buffer.text)
    }

    /// Discards any partial reply and appends exactly one apology.
    pub fn fail(&mut self, turn: TurnId, apology: &str) -> bool {
        if self.active_buffer(turn).is_none() {
            return false;
        }
        self.streaming = None;
        self.log.push(ChatMessage::model(apology));
        true
    }

    pub fn cancel(&mut self, turn: TurnId, marker: &str) -> bool {
        if self.active_buffer(turn).is_none() {
            return false;
        }
        if let Some(buffer) = self.streaming.take()
            && !buffer.text.is_empty()
        {
            self.log.push(ChatMessage::model(format!(
                "{}\n\n{}",
                buffer.text.trim_end(),
                marker
            )));
        }
        true
    }
}
