use crate::app::WidgetConfig;
use anyhow::{bail, Context, Result};
use clap::Parser;
use reqwest::Url;

/// Desktop client for a PDF-to-Markdown OCR server.
#[derive(Debug, Parser)]
#[command(name = "ocr-uploader", version, about)]
pub struct Config {
    /// Base URL of the OCR server
    #[arg(long, env = "OCR_SERVER_URL", default_value = "http://localhost:5001")]
    pub server_url: String,

    /// Largest file accepted for upload, in bytes
    #[arg(long, env = "MAX_FILE_SIZE", default_value_t = WidgetConfig::default().max_file_size)]
    pub max_file_size: u64,

    /// tracing filter directive, e.g. `info` or `ocr_uploader=debug`
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_filter: String,
}

impl Config {
    /// Loads `.env` if present, then parses flags with env fallbacks.
    pub fn load() -> Self {
        let _ = dotenvy::dotenv();
        Self::parse()
    }

    /// The server URL, with a trailing slash so endpoints join under its path.
    pub fn server_url(&self) -> Result<Url> {
        let mut raw = self.server_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }

        let url = Url::parse(&raw).with_context(|| format!("invalid server URL '{}'", self.server_url))?;
        if url.cannot_be_a_base() {
            bail!("server URL '{}' cannot be used as a base", self.server_url);
        }
        Ok(url)
    }

    pub fn widget_config(&self) -> Result<WidgetConfig> {
        if self.max_file_size == 0 {
            bail!("--max-file-size must be greater than zero");
        }
        Ok(WidgetConfig {
            max_file_size: self.max_file_size,
        })
    }
}
