use crate::model::ImageStyle;
use crate::utils::char_prefix;
use std::fmt::Write;

pub const BODY_EXCERPT_CHARS: usize = 500;
pub const TRUNCATION_MARKER: &str = "...";
pub const DEFAULT_STYLE_DESCRIPTOR: &str = "illustration";

pub fn style_descriptor(label: &str) -> &'static str {
    ImageStyle::from_label(label)
        .map(ImageStyle::descriptor)
        .unwrap_or(DEFAULT_STYLE_DESCRIPTOR)
}

pub fn build_image_prompt_request(title: &str, body: &str, style: &str) -> String {
    let mut prompt = String::with_capacity(2048);
    prompt.push_str(
        "以下のブログ記事のタイトルと本文を読んで、この記事のアイキャッチ画像に最適な、\
         創造的で詳細な英語の画像生成プロンプトを1つだけ作成してください。\n\n",
    );
    let _ = write!(
        prompt,
        "# 条件\n\
         - プロンプトは具体的で、情景が目に浮かぶように記述してください。\n\
         - スタイルは**{}**をベースとして必ず含めてください。\n\
         - もしプロンプトに人物が含まれる場合、その人物は必ず「a Japanese woman in her 30s」として描写してください。\n\
         - 記事の雰囲気やメッセージが伝わるような、芸術的で魅力的なプロンプトにしてください。\n\
         - 回答はプロンプトのテキストのみとし、余計な説明や前置きは一切含めないでください。\n\n",
        style_descriptor(style)
    );
    let _ = write!(
        prompt,
        "# タイトル\n{}\n\n# 本文の冒頭\n{}{}\n",
        title,
        char_prefix(body, BODY_EXCERPT_CHARS),
        TRUNCATION_MARKER
    );
    prompt
}

pub fn build_image_generation_prompt(prompt: &str, style: &str) -> String {
    format!("{}, in the style of a {}", prompt, style_descriptor(style))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_body_is_cut_to_the_excerpt_length() {
        let body: String = "あ".repeat(BODY_EXCERPT_CHARS) + &"Z".repeat(300);
        let prompt = build_image_prompt_request("タイトル", &body, "写真風");

        let expected = format!("{}{}", "あ".repeat(BODY_EXCERPT_CHARS), TRUNCATION_MARKER);
        assert!(prompt.contains(&expected));
        assert!(!prompt.contains('Z'));
        assert!(!prompt.contains(&"あ".repeat(BODY_EXCERPT_CHARS + 1)));
    }

    #[test]
    fn short_body_is_kept_whole() {
        let prompt = build_image_prompt_request("T", "short body", "水彩画風");
        assert!(prompt.contains("short body..."));
        assert!(prompt.contains("**watercolor painting**"));
    }

    #[test]
    fn generation_prompt_appends_style_descriptor() {
        assert_eq!(
            build_image_generation_prompt("A quiet desk", "ミニマリスト"),
            "A quiet desk, in the style of a minimalist design"
        );
    }

    #[test]
    fn unknown_style_falls_back_to_illustration() {
        assert_eq!(style_descriptor("油絵風"), "illustration");
        assert_eq!(
            build_image_generation_prompt("A cat", "油絵風"),
            "A cat, in the style of a illustration"
        );
    }
}
