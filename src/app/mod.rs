mod host;
mod state;
mod summary;
mod ui;
mod widget;

use crate::error::TransportError;
use crate::upload::{HealthStatus, HttpTransport, ProcessResponse, SelectedFile, Transport};
use eframe::{egui, App};
use reqwest::Url;
use std::sync::mpsc as std_mpsc;
use std::sync::Arc;
use tokio::runtime::Runtime;

use host::DesktopHost;
use state::{RequestToken, Section, Tab};
use widget::{UploadJob, UploadWidget};

pub use state::WidgetConfig;

type UploadOutcome = (RequestToken, Result<ProcessResponse, TransportError>);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerHealth {
    Checking,
    Online(String),
    Unreachable,
}

/// Something the user clicked during a frame, applied once drawing is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum UiAction {
    PickFile,
    Process,
    Retry,
    Download,
    Reset,
    SwitchTab(Tab),
}

pub struct OcrUploader {
    widget: UploadWidget<DesktopHost>,
    transport: Arc<dyn Transport>,
    runtime: Runtime,
    outcome_sender: std_mpsc::Sender<UploadOutcome>,
    outcome_receiver: std_mpsc::Receiver<UploadOutcome>,
    health: ServerHealth,
    health_receiver: Option<std_mpsc::Receiver<Result<HealthStatus, TransportError>>>,
    last_section: Section,
}

impl OcrUploader {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        runtime: Runtime,
        server_url: Url,
        config: WidgetConfig,
    ) -> Self {
        tracing::info!(%server_url, max_file_size = config.max_file_size, "initializing OCR uploader");

        let transport: Arc<dyn Transport> = Arc::new(HttpTransport::new(server_url.clone()));
        let (outcome_sender, outcome_receiver) = std_mpsc::channel();

        let mut app = Self {
            widget: UploadWidget::new(DesktopHost::default(), server_url, config),
            transport,
            runtime,
            outcome_sender,
            outcome_receiver,
            health: ServerHealth::Checking,
            health_receiver: None,
            last_section: Section::UploadBox,
        };
        app.check_health(&cc.egui_ctx);
        app
    }

    fn check_health(&mut self, ctx: &egui::Context) {
        let (sender, receiver) = std_mpsc::channel();
        self.health_receiver = Some(receiver);

        let transport = Arc::clone(&self.transport);
        let ctx = ctx.clone();
        self.runtime.spawn(async move {
            let _ = sender.send(transport.health().await);
            ctx.request_repaint();
        });
    }

    fn spawn_upload(&self, ctx: &egui::Context, job: UploadJob) {
        let transport = Arc::clone(&self.transport);
        let sender = self.outcome_sender.clone();
        let ctx = ctx.clone();

        self.runtime.spawn(async move {
            let outcome = transport.upload(&job.file).await;
            if sender.send((job.token, outcome)).is_err() {
                tracing::debug!("window closed before upload finished");
            }
            ctx.request_repaint();
        });
    }

    pub(crate) fn apply(&mut self, ctx: &egui::Context, action: UiAction) {
        match action {
            UiAction::PickFile => self.widget.pick_file(),
            UiAction::Process => {
                if let Some(job) = self.widget.begin_process() {
                    self.spawn_upload(ctx, job);
                }
            }
            UiAction::Retry => {
                if let Some(job) = self.widget.retry() {
                    self.spawn_upload(ctx, job);
                }
            }
            UiAction::Download => self.widget.download(),
            UiAction::Reset => self.widget.reset(),
            UiAction::SwitchTab(tab) => self.widget.switch_tab(tab),
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        let Some(first) = dropped.first() else {
            return;
        };
        if !self.widget.accepts_drops() {
            tracing::debug!(name = %first.name, "drop ignored in current section");
            return;
        }

        let Some(path) = &first.path else {
            tracing::warn!(name = %first.name, "dropped file has no local path");
            return;
        };

        match SelectedFile::from_path(path) {
            Ok(file) => self.widget.handle_drop(vec![file]),
            Err(e) => tracing::warn!("failed to stat dropped file {}: {e}", path.display()),
        }
    }

    pub fn update_state(&mut self, ctx: &egui::Context) {
        self.handle_dropped_files(ctx);

        let mut had_updates = false;
        while let Ok((token, outcome)) = self.outcome_receiver.try_recv() {
            self.widget.complete(token, outcome);
            had_updates = true;
        }

        if let Some(receiver) = &self.health_receiver {
            if let Ok(result) = receiver.try_recv() {
                self.health = match result {
                    Ok(status) if status.is_healthy() => ServerHealth::Online(status.service),
                    Ok(status) => {
                        tracing::warn!(status = %status.status, "server reports unhealthy");
                        ServerHealth::Unreachable
                    }
                    Err(e) => {
                        tracing::warn!("health check failed: {e}");
                        ServerHealth::Unreachable
                    }
                };
                self.health_receiver = None;
                had_updates = true;
            }
        }

        if had_updates {
            ctx.request_repaint();
        }
    }

    fn log_transition(&mut self) {
        let section = self.widget.state().section();
        if section != self.last_section {
            tracing::debug!(from = ?self.last_section, to = ?section, "section changed");
            self.last_section = section;
        }
    }
}

impl App for OcrUploader {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_state(ctx);
        if let Some(action) = self.render(ctx) {
            self.apply(ctx, action);
        }
        self.log_transition();
    }
}
