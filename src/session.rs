use crate::chat::Transcript;
use crate::model::GeneratedContent;
use crate::prompt::CHAT_GREETING;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Content,
    Image,
    Chat,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Self::Content, Self::Image, Self::Chat];

    pub fn label(self) -> &'static str {
        match self {
            Self::Content => "コンテンツ生成",
            Self::Image => "画像生成",
            Self::Chat => "チャットボット",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "content" | "1" => Some(Self::Content),
            "image" | "2" => Some(Self::Image),
            "chat" | "3" => Some(Self::Chat),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct SessionState {
    pub active_tab: Tab,
    pub content: GeneratedContent,
    pub transcript: Transcript,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            active_tab: Tab::default(),
            content: GeneratedContent::default(),
            transcript: Transcript::with_greeting(CHAT_GREETING),
        }
    }
}
