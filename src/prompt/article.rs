use super::persona::ARTICLE_SYSTEM_INSTRUCTION;
use crate::model::{Atmosphere, OutputType};
use serde_json::{Value, json};
use std::fmt::Write;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleRequest {
    pub topic: String,
    pub atmosphere: Atmosphere,
    pub output_type: OutputType,
    pub url: String,
    pub title_chars: u32,
    pub body_chars: u32,
    pub twitter_chars: u32,
}

impl Default for ArticleRequest {
    fn default() -> Self {
        Self {
            topic: String::new(),
            atmosphere: Atmosphere::default(),
            output_type: OutputType::default(),
            url: String::new(),
            title_chars: 20,
            body_chars: 2000,
            twitter_chars: 140,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ArticlePrompt {
    pub system_instruction: &'static str,
    pub user_prompt: String,
}

pub fn build_article_prompt(req: &ArticleRequest) -> ArticlePrompt {
    let url = if req.url.trim().is_empty() {
        "なし"
    } else {
        req.url.as_str()
    };

    let mut prompt = String::with_capacity(1024);
    prompt.push_str("以下の指示に従って、ブログコンテンツをJSON形式で生成してください。\n\n");

    let _ = write!(
        prompt,
        "# コンテンツの詳細\n\
         - **トピック/キーワード:** {}\n\
         - **出力タイプ:** {}\n\
         - **雰囲気:** {}\n\
         - **参考URL:** {}\n  \
         - URLがある場合は、その内容を参考にしつつ、必ずあなた自身の言葉で、独自の視点から記事を作成してください。決してコピー＆ペーストはしないでください。\n\n",
        req.topic,
        req.output_type.label(),
        req.atmosphere.label(),
        url
    );

    let _ = write!(
        prompt,
        "# 文字数の目安\n\
         - **タイトル:** 約{}文字\n\
         - **本文:** 約{}文字\n\
         - **X (Twitter) 投稿:** {}文字以内\n\n",
        req.title_chars, req.body_chars, req.twitter_chars
    );

    prompt.push_str(
        "# JSONの厳守事項\n\
         - **タイトル (title):** 記事タイトル。キャッチーすぎず、誠実なスタイルで。絵文字は絶対に使用しない。\n\
         - **本文 (body):** 記事の本文。適度な改行と段落分けを行い、読みやすさを重視する。\n\
         - **X (Twitter) 投稿 (twitterPost):** 本文を要約した投稿文。**ハッシュタグは絶対に含めないでください。**\n",
    );

    ArticlePrompt {
        system_instruction: ARTICLE_SYSTEM_INSTRUCTION,
        user_prompt: prompt,
    }
}

pub fn article_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING", "description": "記事のタイトル" },
            "body": { "type": "STRING", "description": "記事の本文" },
            "twitterPost": { "type": "STRING", "description": "X (Twitter)用の投稿文（ハッシュタグなし）" }
        },
        "required": ["title", "body", "twitterPost"]
    })
}
