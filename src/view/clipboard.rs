use anyhow::{Context, Result};
use base64::{Engine, engine::general_purpose::STANDARD};
use std::io::Write;
use std::time::{Duration, Instant};

pub trait Clipboard: Send {
    fn write_text(&mut self, text: &str) -> Result<()>;
}

pub struct Osc52Clipboard<W: Write + Send> {
    out: W,
}

impl<W: Write + Send> Osc52Clipboard<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}

impl<W: Write + Send> Clipboard for Osc52Clipboard<W> {
    fn write_text(&mut self, text: &str) -> Result<()> {
        self.out
            .write_all(osc52_sequence(text).as_bytes())
            .context("Failed to write clipboard sequence")?;
        self.out.flush().context("Failed to flush terminal")
    }
}

#[derive(Debug, Clone)]
pub struct CopyFeedback {
    copied_at: Option<Instant>,
    timeout: Duration,
}

impl CopyFeedback {
    pub fn new(timeout: Duration) -> Self {
        Self {
            copied_at: None,
            timeout,
        }
    }

    pub fn copy(&mut self, clipboard: &mut dyn Clipboard, text: &str) -> Result<bool> {
        self.copy_at(clipboard, text, Instant::now())
    }

    pub fn copy_at(
        &mut self,
        clipboard: &mut dyn Clipboard,
        text: &str,
        now: Instant,
    ) -> Result<bool> {
        if text.is_empty() {
            return Ok(false);
        }
        clipboard.write_text(text)?;
        self.copied_at = Some(now);
        Ok(true)
    }

    pub fn is_copied(&self) -> bool {
        self.is_copied_at(Instant::now())
    }

    pub fn is_copied_at(&self, now: Instant) -> bool {
        self.copied_at
            .is_some_and(|at| now.saturating_duration_since(at) < self.timeout)
    }
}
