mod chat;
mod clipboard;
mod content;
mod image;

pub use chat::{CANCELLED_MARKER, ChatForm};
pub use clipboard::{Clipboard, Osc52Clipboard};
pub use content::ContentForm;
pub use image::ImageForm;

#[cfg(test)]
pub(crate) use clipboard::testing;

pub const CONTENT_FAILED: &str = "コンテンツの生成に失敗しました。もう一度お試しください。";
pub const PROMPT_FAILED: &str = "プロンプトの生成に失敗しました。";
pub const IMAGE_FAILED: &str = "画像の生成に失敗しました。もう一度お試しください。";
pub const CHAT_APOLOGY: &str = "申し訳ありません、エラーが発生しました。もう一度お試しください。";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed(String),
}

impl Phase {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }

    fn clear_error(&mut self) {
        if matches!(self, Self::Failed(_)) {
            *self = Self::Idle;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Succeeded,
    Failed,
    Cancelled,
    /// The control was disabled, so no request was made.
    Skipped,
}
