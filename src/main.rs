mod app;
mod config;
mod error;
mod upload;
mod utils;

use anyhow::{anyhow, Context, Result};
use app::OcrUploader;
use config::Config;
use eframe::CreationContext;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let config = Config::load();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .init();

    let server_url = config.server_url()?;
    let widget_config = config.widget_config()?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([640.0, 720.0])
            .with_min_inner_size([420.0, 520.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "PDF OCR Uploader",
        options,
        Box::new(move |cc: &CreationContext| {
            Box::new(OcrUploader::new(cc, runtime, server_url, widget_config))
        }),
    )
    .map_err(|e| anyhow!("window failed: {e}"))
}
