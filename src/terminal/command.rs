use crate::model::{AspectRatio, Atmosphere, ContentField, ImageStyle, OutputType, pick_preset};
use crate::session::Tab;
use crate::utils::unescape_line;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyTarget {
    Field(ContentField),
    All,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SwitchTab(Tab),
    Show,
    Help,
    Quit,
    Topic(String),
    Url(String),
    Atmosphere(Atmosphere),
    OutputType(OutputType),
    Chars(ContentField, u32),
    Generate,
    Clear,
    Edit(ContentField, String),
    Copy(CopyTarget),
    Style(ImageStyle),
    Ratio(AspectRatio),
    Prompt(String),
    RegeneratePrompt,
    GenerateImage,
    NewChat,
    Message(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("不明なコマンドです: /{0}（/help で一覧を表示）")]
    Unknown(String),
    #[error("使い方: {0}")]
    Usage(&'static str),
    #[error("{what} に「{value}」は指定できません")]
    InvalidValue { what: &'static str, value: String },
}

impl Command {
    pub fn tab(&self) -> Option<Tab> {
        match self {
            Self::Topic(_)
            | Self::Url(_)
            | Self::Atmosphere(_)
            | Self::OutputType(_)
            | Self::Chars(..)
            | Self::Generate
            | Self::Clear
            | Self::Edit(..)
            | Self::Copy(_) => Some(Tab::Content),
            Self::Style(_)
            | Self::Ratio(_)
            | Self::Prompt(_)
            | Self::RegeneratePrompt
            | Self::GenerateImage => Some(Tab::Image),
            Self::NewChat | Self::Message(_) => Some(Tab::Chat),
            Self::SwitchTab(_) | Self::Show | Self::Help | Self::Quit => None,
        }
    }
}

fn parse_field(s: &str) -> Option<ContentField> {
    match s {
        "title" => Some(ContentField::Title),
        "body" => Some(ContentField::Body),
        "post" => Some(ContentField::TwitterPost),
        _ => None,
    }
}

fn invalid(what: &'static str, value: &str) -> CommandError {
    CommandError::InvalidValue {
        what,
        value: value.to_string(),
    }
}

/// Blank lines yield `None`; lines not starting with `/` are chat messages.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let untrimmed = line.trim_start();
    let trimmed = untrimmed.trim_end();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let Some(rest) = trimmed.strip_prefix('/') else {
        return Ok(Some(Command::Message(trimmed.to_string())));
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };

    let cmd = match name {
        "tab" => Command::SwitchTab(
            Tab::parse(arg).ok_or(CommandError::Usage("/tab content|image|chat"))?,
        ),
        "1" | "2" | "3" => {
            Command::SwitchTab(Tab::parse(name).ok_or_else(|| invalid("タブ", name))?)
        }
        "show" => Command::Show,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        "topic" => Command::Topic(unescape_line(arg)),
        "url" => Command::Url(arg.to_string()),
        "atmosphere" => {
            if arg.is_empty() {
                return Err(CommandError::Usage("/atmosphere <番号|名前>"));
            }
            Command::Atmosphere(
                pick_preset(&Atmosphere::ALL, arg, Atmosphere::label)
                    .ok_or_else(|| invalid("雰囲気", arg))?,
            )
        }
        "type" => Command::OutputType(
            OutputType::parse(arg).ok_or(CommandError::Usage("/type note|company"))?,
        ),
        "chars" => {
            const USAGE: &str = "/chars title|body|post <文字数>";
            let (field, count) = arg.split_once(' ').ok_or(CommandError::Usage(USAGE))?;
            let field = parse_field(field).ok_or(CommandError::Usage(USAGE))?;
            let count = count
                .trim()
                .parse::<u32>()
                .map_err(|_| invalid("文字数", count.trim()))?;
            Command::Chars(field, count)
        }
        "generate" => Command::Generate,
        "clear" => Command::Clear,
        "edit" => {
            const USAGE: &str = "/edit title|body|post <テキスト>";
            // The edited text is taken verbatim, surrounding whitespace included.
            let raw = untrimmed
                .split_once(char::is_whitespace)
                .map_or("", |(_, raw)| raw.trim_start());
            let (field, text) = raw.split_once(' ').unwrap_or((raw, ""));
            let field = parse_field(field.trim_end()).ok_or(CommandError::Usage(USAGE))?;
            Command::Edit(field, unescape_line(text))
        }
        "copy" => match arg {
            "all" | "" => Command::Copy(CopyTarget::All),
            other => Command::Copy(CopyTarget::Field(
                parse_field(other).ok_or(CommandError::Usage("/copy title|body|post|all"))?,
            )),
        },
        "style" => {
            if arg.is_empty() {
                return Err(CommandError::Usage("/style <番号|名前>"));
            }
            Command::Style(
                pick_preset(&ImageStyle::ALL, arg, ImageStyle::label)
                    .ok_or_else(|| invalid("スタイル", arg))?,
            )
        }
        "ratio" => {
            Command::Ratio(AspectRatio::parse(arg).ok_or_else(|| invalid("アスペクト比", arg))?)
        }
        "prompt" => Command::Prompt(unescape_line(arg)),
        "regen" => Command::RegeneratePrompt,
        "image" => Command::GenerateImage,
        "new" => Command::NewChat,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(cmd))
}
