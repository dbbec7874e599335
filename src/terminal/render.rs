use crate::chat::{Role, Transcript};
use crate::model::{ASPECT_RATIOS, Atmosphere, ContentField, GeneratedContent, ImageStyle};
use crate::session::Tab;
use crate::view::{ContentForm, ImageForm};
use std::fmt::Write;

const COPIED: &str = "コピーしました!";

pub const HELP: &str = "\
共通: /tab content|image|chat (/1 /2 /3), /show, /help, /quit
コンテンツ生成: /topic <テキスト>, /url <URL>, /atmosphere <番号|名前>, /type note|company,
  /chars title|body|post <数>, /generate, /clear, /edit title|body|post <テキスト>,
  /copy title|body|post|all   (\\n で改行)
画像生成: /style <番号|名前>, /ratio <比率>, /prompt <テキスト>, /regen, /image
チャットボット: メッセージをそのまま入力して送信, /new で新しい会話
実行中のリクエストは Ctrl-C で中断できます。";

pub fn tabs(active: Tab) -> String {
    Tab::ALL
        .iter()
        .enumerate()
        .map(|(i, tab)| {
            if *tab == active {
                format!("[{}. {}]", i + 1, tab.label())
            } else {
                format!(" {}. {} ", i + 1, tab.label())
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn numbered<T: Copy + PartialEq>(
    items: &[T],
    selected: T,
    label: impl Fn(T) -> &'static str,
) -> String {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let mark = if *item == selected { "*" } else { "" };
            format!("{}{}.{}", mark, i + 1, label(*item))
        })
        .collect::<Vec<_>>()
        .join("  ")
}

fn or_placeholder(text: &str) -> &str {
    if text.is_empty() { "（未入力）" } else { text }
}

pub fn content_tab(form: &ContentForm, content: &GeneratedContent) -> String {
    let req = &form.request;
    let mut out = String::with_capacity(512);

    out.push_str("== 1. 詳細を入力 ==\n");
    let _ = writeln!(out, "出力タイプ: {}", req.output_type.label());
    let _ = writeln!(out, "トピック / キーワード: {}", or_placeholder(&req.topic));
    let _ = writeln!(out, "参考URL (任意): {}", or_placeholder(&req.url));
    let _ = writeln!(
        out,
        "雰囲気: {}",
        numbered(&Atmosphere::ALL, req.atmosphere, Atmosphere::label)
    );
    let _ = writeln!(
        out,
        "文字数: タイトル 約{} / 本文 約{} / X投稿 {}以内",
        req.title_chars, req.body_chars, req.twitter_chars
    );
    if form.phase().is_loading() {
        out.push_str("生成中...\n");
    } else if !form.can_generate() {
        out.push_str("(/topic を入力すると /generate で生成できます)\n");
    }

    out.push_str("\n== 2. 生成されたコンテンツ ==\n");
    if let Some(err) = form.phase().error() {
        let _ = writeln!(out, "! {}", err);
    }
    for field in ContentField::ALL {
        let copied = if form.field_copied(field) { COPIED } else { "" };
        let _ = writeln!(out, "--- {} {}", field.label(), copied);
        let _ = writeln!(out, "{}", content.field(field));
    }
    if ContentForm::can_copy_all(content) {
        let label = if form.all_copied() {
            COPIED
        } else {
            "/copy all ですべてコピー（スプレッドシートに直接貼り付けられます）"
        };
        let _ = writeln!(out, "{}", label);
    }
    out
}

pub fn image_tab(form: &ImageForm, content: &GeneratedContent) -> String {
    let mut out = String::with_capacity(512);

    out.push_str("== 1. 画像をカスタマイズ ==\n");
    let _ = writeln!(
        out,
        "スタイル: {}",
        numbered(&ImageStyle::ALL, form.style, ImageStyle::label)
    );
    let ratios: Vec<String> = ASPECT_RATIOS
        .iter()
        .map(|r| {
            if *r == form.aspect_ratio.as_str() {
                format!("[{}]", r)
            } else {
                r.to_string()
            }
        })
        .collect();
    let _ = writeln!(out, "アスペクト比: {}", ratios.join(" "));

    let prompt_state = if form.prompt_phase().is_loading() {
        " (生成中...)"
    } else if form.can_regenerate_prompt(content) {
        " (/regen で記事から再生成)"
    } else {
        ""
    };
    let _ = writeln!(out, "画像生成プロンプト (英語推奨){}:", prompt_state);
    let _ = writeln!(out, "{}", or_placeholder(&form.prompt));

    out.push_str("\n== 2. 生成された画像 ==\n");
    if let Some(err) = form.error() {
        let _ = writeln!(out, "! {}", err);
    }
    if form.phase().is_loading() {
        out.push_str("画像を生成中です...\n");
    } else if form.image().is_some() {
        out.push_str("画像を生成しました。\n");
    } else if form.error().is_none() {
        out.push_str("ここに画像が表示されます（/image で生成）\n");
    }
    out
}

pub fn chat_tab(transcript: &Transcript) -> String {
    let mut out = String::with_capacity(1024);
    for (role, text) in transcript.entries() {
        let who = match role {
            Role::User => "あなた",
            Role::Model => "AI",
        };
        let _ = writeln!(out, "{}: {}", who, text);
    }
    if transcript.is_streaming() {
        out.push_str("▍\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn active_tab_is_bracketed() {
        let line = tabs(Tab::Image);
        assert!(line.contains("[2. 画像生成]"));
        assert!(line.contains(" 1. コンテンツ生成 "));
    }

    #[test]
    fn content_tab_shows_fields_and_hint() {
        let form = ContentForm::new(Duration::from_secs(2));
        let content = GeneratedContent {
            title: "タイトルです".into(),
            ..Default::default()
        };
        let screen = content_tab(&form, &content);
        assert!(screen.contains("タイトルです"));
        assert!(screen.contains("*1.カジュアル"));
        assert!(screen.contains("/topic"));
    }

    #[test]
    fn chat_tab_marks_streaming_reply() {
        let mut transcript = Transcript::with_greeting("hello");
        transcript.push_user("q");
        let turn = transcript.begin_turn();
        transcript.push_fragment(turn, "partial");
        let screen = chat_tab(&transcript);
        assert!(screen.contains("AI: hello\nあなた: q\nAI: partial\n▍"));
    }
}
