use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedContent {
    pub title: String,
    pub body: String,
    pub twitter_post: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentField {
    Title,
    Body,
    TwitterPost,
}

impl ContentField {
    pub const ALL: [ContentField; 3] = [Self::Title, Self::Body, Self::TwitterPost];

    pub fn label(self) -> &'static str {
        match self {
            Self::Title => "タイトル",
            Self::Body => "本文",
            Self::TwitterPost => "X (Twitter) 投稿",
        }
    }
}

impl GeneratedContent {
    pub fn field(&self, field: ContentField) -> &str {
        match field {
            ContentField::Title => &self.title,
            ContentField::Body => &self.body,
            ContentField::TwitterPost => &self.twitter_post,
        }
    }

    pub fn set_field(&mut self, field: ContentField, value: String) {
        match field {
            ContentField::Title => self.title = value,
            ContentField::Body => self.body = value,
            ContentField::TwitterPost => self.twitter_post = value,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.body.is_empty() && self.twitter_post.is_empty()
    }

    pub fn to_tsv(&self) -> String {
        [
            self.title.as_str(),
            self.body.as_str(),
            self.twitter_post.as_str(),
        ]
        .join("\t")
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Atmosphere {
    #[default]
    Casual,
    Professional,
    Storyteller,
    Empathetic,
    Inspiring,
    CarefulExplanation,
    GentleEncouragement,
    PersonalExperience,
    Logical,
}

impl Atmosphere {
    pub const ALL: [Atmosphere; 9] = [
        Self::Casual,
        Self::Professional,
        Self::Storyteller,
        Self::Empathetic,
        Self::Inspiring,
        Self::CarefulExplanation,
        Self::GentleEncouragement,
        Self::PersonalExperience,
        Self::Logical,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Casual => "カジュアル",
            Self::Professional => "プロフェッショナル",
            Self::Storyteller => "ストーリーテラー",
            Self::Empathetic => "共感的",
            Self::Inspiring => "インスピレーションを与える",
            Self::CarefulExplanation => "丁寧な解説",
            Self::GentleEncouragement => "優しく励ます",
            Self::PersonalExperience => "自身の経験を語る",
            Self::Logical => "論理的でわかりやすい",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputType {
    #[default]
    Note,
    Company,
}

impl OutputType {
    pub fn label(self) -> &'static str {
        match self {
            Self::Note => "note用記事",
            Self::Company => "会社用ブログ",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "note" => Some(Self::Note),
            "company" => Some(Self::Company),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImageStyle {
    #[default]
    Illustration,
    Photo,
    Watercolor,
    Minimalist,
    FlatDesign,
}

impl ImageStyle {
    pub const ALL: [ImageStyle; 5] = [
        Self::Illustration,
        Self::Photo,
        Self::Watercolor,
        Self::Minimalist,
        Self::FlatDesign,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Illustration => "イラスト風",
            Self::Photo => "写真風",
            Self::Watercolor => "水彩画風",
            Self::Minimalist => "ミニマリスト",
            Self::FlatDesign => "フラットデザイン",
        }
    }

    pub fn descriptor(self) -> &'static str {
        match self {
            Self::Illustration => "vibrant illustration",
            Self::Photo => "photorealistic",
            Self::Watercolor => "watercolor painting",
            Self::Minimalist => "minimalist design",
            Self::FlatDesign => "flat design illustration",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.label() == label)
    }
}

pub const ASPECT_RATIOS: [&str; 5] = ["16:9", "1:1", "9:16", "4:3", "3:4"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AspectRatio(&'static str);

impl Default for AspectRatio {
    fn default() -> Self {
        Self(ASPECT_RATIOS[0])
    }
}

impl AspectRatio {
    pub fn parse(s: &str) -> Option<Self> {
        ASPECT_RATIOS.iter().find(|r| **r == s).map(|r| Self(*r))
    }

    pub fn as_str(self) -> &'static str {
        self.0
    }
}

/// Picks an entry from a preset list either by 1-based index or by its label.
pub fn pick_preset<T: Copy>(
    presets: &[T],
    input: &str,
    label: impl Fn(T) -> &'static str,
) -> Option<T> {
    let input = input.trim();
    if let Ok(n) = input.parse::<usize>() {
        return n.checked_sub(1).and_then(|i| presets.get(i).copied());
    }
    presets.iter().copied().find(|p| label(*p) == input)
}
