mod command;
mod image_file;
mod render;

use crate::config::Config;
use crate::generation::GenerationClient;
use crate::model::{ContentField, GeneratedContent};
use crate::session::{SessionState, Tab};
use crate::view::{
    CANCELLED_MARKER, CHAT_APOLOGY, ChatForm, Clipboard, ContentForm, ImageForm, Osc52Clipboard,
    Outcome,
};
use anyhow::Result;
use command::{Command, CopyTarget};
use std::future::Future;
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};

fn interrupt() -> impl Future<Output = ()> {
    async {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

fn flush_stdout() {
    let _ = std::io::stdout().flush();
}

fn regen_blocked_reason(content: &GeneratedContent) -> &'static str {
    if content.title.is_empty() {
        "先に「コンテンツ生成」タブで記事を作成してください"
    } else if content.body.is_empty() {
        "本文が空のため、記事からプロンプトを生成できません（/edit body で入力）"
    } else {
        "プロンプトを生成中です。完了までお待ちください"
    }
}

pub struct App {
    client: GenerationClient,
    state: SessionState,
    content_form: ContentForm,
    image_form: ImageForm,
    chat_form: ChatForm,
    clipboard: Box<dyn Clipboard>,
    image_dir: PathBuf,
}

impl App {
    pub fn new(client: GenerationClient, config: &Config) -> Self {
        let chat_form = ChatForm::new(&client);
        Self {
            content_form: ContentForm::new(config.copy_feedback),
            image_form: ImageForm::default(),
            chat_form,
            client,
            state: SessionState::default(),
            clipboard: Box::new(Osc52Clipboard::new(std::io::stdout())),
            image_dir: config.image_dir.clone(),
        }
    }

    pub async fn run(mut self) -> Result<()> {
        println!("はるさん専用 クリエイティブアシスタント");
        println!("あなたの執筆スタイルを学習したAIパートナー  (/help でコマンド一覧)\n");
        self.show();

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            print!("{}> ", self.state.active_tab.label());
            flush_stdout();

            let line = tokio::select! {
                line = lines.next_line() => line?,
                _ = interrupt() => None,
            };
            let Some(line) = line else {
                break;
            };

            match command::parse(&line) {
                Ok(Some(cmd)) => {
                    if !self.handle(cmd).await {
                        break;
                    }
                }
                Ok(None) => {}
                Err(e) => println!("{}", e),
            }
        }

        info!("Session ended");
        println!();
        Ok(())
    }

    fn show(&self) {
        println!("{}\n", render::tabs(self.state.active_tab));
        let screen = match self.state.active_tab {
            Tab::Content => render::content_tab(&self.content_form, &self.state.content),
            Tab::Image => render::image_tab(&self.image_form, &self.state.content),
            Tab::Chat => render::chat_tab(&self.state.transcript),
        };
        println!("{}", screen);
    }

    /// Returns false when the session should end.
    async fn handle(&mut self, cmd: Command) -> bool {
        if let Some(tab) = cmd.tab()
            && tab != self.state.active_tab
        {
            match cmd {
                Command::Message(_) => {
                    println!("コマンドは / で始めてください（/help で一覧を表示）")
                }
                _ => println!(
                    "このコマンドは「{}」タブで使えます（/tab で切り替え）",
                    tab.label()
                ),
            }
            return true;
        }

        match cmd {
            Command::Quit => return false,
            Command::Help => println!("{}", render::HELP),
            Command::Show => self.show(),
            Command::SwitchTab(tab) => {
                self.state.active_tab = tab;
                if tab == Tab::Image {
                    self.sync_image_prompt().await;
                }
                self.show();
            }
            Command::Message(text) => self.send_chat(&text).await,
            Command::NewChat => {
                self.chat_form.reset(&self.client, &mut self.state.transcript);
                info!("Started chat session {}", self.chat_form.session().id());
                self.show();
            }
            cmd if cmd.tab() == Some(Tab::Image) => self.handle_image(cmd).await,
            cmd => self.handle_content(cmd).await,
        }
        true
    }

    async fn handle_content(&mut self, cmd: Command) {
        let form = &mut self.content_form;
        match cmd {
            Command::Topic(topic) => form.request.topic = topic,
            Command::Url(url) => form.request.url = url,
            Command::Atmosphere(atmosphere) => form.request.atmosphere = atmosphere,
            Command::OutputType(output_type) => form.request.output_type = output_type,
            Command::Chars(field, count) => match field {
                ContentField::Title => form.request.title_chars = count,
                ContentField::Body => form.request.body_chars = count,
                ContentField::TwitterPost => form.request.twitter_chars = count,
            },
            Command::Edit(field, text) => form.edit(&mut self.state.content, field, text),
            Command::Clear => form.clear(&mut self.state.content),
            Command::Generate => {
                if !form.can_generate() {
                    println!("トピック / キーワードを入力してください（/topic）");
                    return;
                }
                println!("コンテンツを生成中...");
                let outcome = form
                    .generate(&self.client, &mut self.state.content, interrupt())
                    .await;
                if outcome == Outcome::Cancelled {
                    println!("{}", CANCELLED_MARKER);
                }
            }
            Command::Copy(target) => {
                let clipboard = self.clipboard.as_mut();
                let copied = match target {
                    CopyTarget::All => form.copy_all(clipboard, &self.state.content),
                    CopyTarget::Field(field) => {
                        form.copy_field(clipboard, &self.state.content, field)
                    }
                };
                match copied {
                    Ok(true) => {}
                    Ok(false) => println!("コピーする内容がありません"),
                    Err(e) => error!("Clipboard write failed: {:#}", e),
                }
            }
            _ => return,
        }
        self.show();
    }

    async fn handle_image(&mut self, cmd: Command) {
        match cmd {
            Command::Style(style) => {
                self.image_form.style = style;
                self.sync_image_prompt().await;
            }
            Command::Ratio(ratio) => self.image_form.aspect_ratio = ratio,
            Command::Prompt(prompt) => self.image_form.prompt = prompt,
            Command::RegeneratePrompt => {
                if !self.image_form.can_regenerate_prompt(&self.state.content) {
                    println!("{}", regen_blocked_reason(&self.state.content));
                    return;
                }
                println!("プロンプトを生成中...");
                self.image_form
                    .regenerate_prompt(&self.client, &self.state.content, interrupt())
                    .await;
            }
            Command::GenerateImage => {
                if !self.image_form.can_generate_image() {
                    println!("画像生成プロンプトを入力してください（/prompt）");
                    return;
                }
                println!("画像を生成中です...");
                let outcome = self
                    .image_form
                    .generate_image(&self.client, interrupt())
                    .await;
                if outcome == Outcome::Succeeded
                    && let Some(uri) = self.image_form.image()
                {
                    match image_file::save_data_uri(uri, &self.image_dir).await {
                        Ok(path) => println!("保存しました: {}", path.display()),
                        Err(e) => {
                            error!("Failed to save image: {:#}", e);
                            println!("画像の保存に失敗しました: {:#}", e);
                        }
                    }
                }
            }
            _ => return,
        }
        self.show();
    }

    async fn sync_image_prompt(&mut self) {
        if !self.image_form.needs_prompt_refresh(&self.state.content) {
            return;
        }
        println!("記事からプロンプトを生成中...");
        self.image_form
            .sync_article(&self.client, &self.state.content, interrupt())
            .await;
    }

    async fn send_chat(&mut self, text: &str) {
        if !self.chat_form.can_send(text) {
            return;
        }
        print!("AI: ");
        flush_stdout();
        let outcome = self
            .chat_form
            .send(
                &self.client,
                &mut self.state.transcript,
                text,
                |fragment| {
                    print!("{}", fragment);
                    flush_stdout();
                },
                interrupt(),
            )
            .await;
        println!();

        match outcome {
            Outcome::Failed => println!("AI: {}", CHAT_APOLOGY),
            Outcome::Cancelled => println!("{}", CANCELLED_MARKER),
            Outcome::Succeeded | Outcome::Skipped => {}
        }
    }
}
