mod article;
mod image;
mod persona;

pub use article::{ArticleRequest, article_schema, build_article_prompt};
pub use image::{build_image_generation_prompt, build_image_prompt_request};
pub use persona::{CHAT_GREETING, CHAT_SYSTEM_INSTRUCTION, FALLBACK_IMAGE_PROMPT};
