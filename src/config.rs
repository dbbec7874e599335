use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const API_KEY_VARS: [&str; 2] = ["API_KEY", "GEMINI_API_KEY"];

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    api: ApiConfig,
    models: ModelConfig,
    output: OutputConfig,
    clipboard: ClipboardConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct ApiConfig {
    base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub article: String,
    pub text: String,
    pub chat: String,
    pub image: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            article: "gemini-2.5-pro".to_string(),
            text: "gemini-2.5-flash".to_string(),
            chat: "gemini-2.5-flash".to_string(),
            image: "imagen-4.0-generate-001".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct OutputConfig {
    image_dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            image_dir: "images".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct ClipboardConfig {
    feedback_ms: u64,
}

impl Default for ClipboardConfig {
    fn default() -> Self {
        Self { feedback_ms: 2000 }
    }
}

#[derive(Clone)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
    pub models: ModelConfig,
    pub image_dir: PathBuf,
    pub copy_feedback: Duration,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("models", &self.models)
            .field("image_dir", &self.image_dir)
            .field("copy_feedback", &self.copy_feedback)
            .finish()
    }
}

impl Config {
    pub fn from_parts(content: Option<&str>, api_key: Option<String>) -> Result<Self> {
        let config_file: ConfigFile = match content {
            Some(content) => toml::from_str(content).context("Failed to parse config file")?,
            None => ConfigFile::default(),
        };

        let api_key = api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .with_context(|| {
                format!(
                    "API credential missing: set {} in the environment",
                    API_KEY_VARS.join(" or ")
                )
            })?;

        Ok(Self {
            api_key,
            base_url: config_file.api.base_url.trim_end_matches('/').to_string(),
            models: config_file.models,
            image_dir: config_file.output.image_dir.into(),
            copy_feedback: Duration::from_millis(config_file.clipboard.feedback_ms),
        })
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = if path.exists() {
            Some(
                std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file: {}", path.display()))?,
            )
        } else {
            None
        };

        let api_key = API_KEY_VARS
            .iter()
            .find_map(|var| std::env::var(var).ok().filter(|v| !v.trim().is_empty()));

        Self::from_parts(content.as_deref(), api_key)
    }

    pub fn load() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_file(Path::new("config.toml"))
    }
}
