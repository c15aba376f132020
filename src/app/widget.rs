use super::host::Host;
use super::state::{FileSummary, RequestToken, ResultView, Tab, UiState, WidgetConfig};
use super::summary::summarize;
use crate::error::{TransportError, WidgetError};
use crate::upload::{download_url, ProcessResponse, SelectedFile};
use crate::utils::file_size::FileSizeUtils;
use crate::utils::markdown::{preview_blocks, render_html};
use reqwest::Url;

/// A validated upload, ready to hand to a [`crate::upload::Transport`].
#[derive(Debug, Clone)]
pub struct UploadJob {
    pub token: RequestToken,
    pub file: SelectedFile,
}

/// Controller for the upload window: owns the state machine, the selection
/// and the one request that may be in flight.
pub struct UploadWidget<H: Host> {
    host: H,
    base_url: Url,
    config: WidgetConfig,
    state: UiState,
    active_tab: Tab,
    selected: Option<SelectedFile>,
    output_filename: Option<String>,
    in_flight: Option<RequestToken>,
    next_token: u64,
}

impl<H: Host> UploadWidget<H> {
    pub fn new(host: H, base_url: Url, config: WidgetConfig) -> Self {
        Self {
            host,
            base_url,
            config,
            state: UiState::Idle,
            active_tab: Tab::default(),
            selected: None,
            output_filename: None,
            in_flight: None,
            next_token: 0,
        }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    pub fn output_filename(&self) -> Option<&str> {
        self.output_filename.as_deref()
    }

    pub fn max_file_size(&self) -> u64 {
        self.config.max_file_size
    }

    pub fn is_processing(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn accepts_drops(&self) -> bool {
        !self.is_processing()
            && matches!(
                self.state,
                UiState::Idle | UiState::FileSelected(_) | UiState::Error(_)
            )
    }

    pub fn select_file(&mut self, file: SelectedFile) {
        let summary = FileSummary {
            name: file.name.clone(),
            size: FileSizeUtils::format_size(file.size),
        };
        tracing::debug!(file = %file.name, size = file.size, "file selected");

        self.selected = Some(file);
        self.state = UiState::FileSelected(summary);
    }

    /// The picker path. The dialog filters by extension, so the type is not
    /// checked again here.
    pub fn pick_file(&mut self) {
        let Some(path) = self.host.pick_file() else {
            return;
        };

        match SelectedFile::from_path(&path) {
            Ok(file) => self.select_file(file),
            Err(e) => {
                tracing::warn!("failed to stat {}: {e}", path.display());
                self.state = UiState::Error(WidgetError::ReadFailed);
            }
        }
    }

    /// Takes the first dropped file if it is a PDF. Anything else leaves the
    /// current selection alone. Drops only land while the upload box, the
    /// selected file or an error is showing.
    pub fn handle_drop(&mut self, files: Vec<SelectedFile>) {
        let Some(file) = files.into_iter().next() else {
            return;
        };

        if !self.accepts_drops() {
            tracing::debug!(file = %file.name, section = ?self.state.section(), "ignoring drop");
            return;
        }

        if file.is_pdf() {
            self.select_file(file);
        } else {
            tracing::warn!(file = %file.name, mime = %file.mime, "rejected dropped file");
            self.state = UiState::Error(WidgetError::NotAPdf);
        }
    }

    /// Validates the selection and moves to Processing. Returns the job to
    /// run, or `None` if validation failed or a request is already running.
    pub fn begin_process(&mut self) -> Option<UploadJob> {
        if let Some(token) = self.in_flight {
            tracing::debug!(?token, "upload already in flight");
            return None;
        }

        let file = match &self.selected {
            Some(file) => file.clone(),
            None => {
                self.state = UiState::Error(WidgetError::NoFileSelected);
                return None;
            }
        };

        if file.size > self.config.max_file_size {
            self.state = UiState::Error(WidgetError::FileTooLarge {
                limit: self.config.max_file_size,
            });
            return None;
        }

        self.next_token += 1;
        let token = RequestToken(self.next_token);
        self.in_flight = Some(token);
        self.state = UiState::Processing;

        tracing::info!(file = %file.name, ?token, "processing");
        Some(UploadJob { token, file })
    }

    /// The retry control shares the process entry point.
    pub fn retry(&mut self) -> Option<UploadJob> {
        self.begin_process()
    }

    /// Applies the outcome of the request identified by `token`. Outcomes
    /// for anything but the current request are dropped.
    pub fn complete(
        &mut self,
        token: RequestToken,
        outcome: Result<ProcessResponse, TransportError>,
    ) {
        if self.in_flight != Some(token) {
            tracing::debug!(?token, current = ?self.in_flight, "dropping stale response");
            return;
        }
        self.in_flight = None;

        match outcome {
            Ok(response) if response.success => self.display_result(response),
            Ok(response) => {
                self.state = UiState::Error(WidgetError::Server(response.error));
            }
            Err(e) => {
                tracing::error!("upload failed: {e:?}");
                self.state = UiState::Error(WidgetError::from(&e));
            }
        }
    }

    /// Runs the whole round trip in place: validate, send, apply. The window
    /// splits this across frames with `begin_process` and `complete`.
    #[cfg(test)]
    pub async fn process(&mut self, transport: &dyn crate::upload::Transport) {
        let Some(job) = self.begin_process() else {
            return;
        };
        let outcome = transport.upload(&job.file).await;
        self.complete(job.token, outcome);
    }

    pub fn display_result(&mut self, response: ProcessResponse) {
        self.output_filename = response.output_file;

        let mut view = ResultView::default();
        if let Some(markdown) = response.markdown_content.filter(|md| !md.is_empty()) {
            view.preview_html = Some(render_html(&markdown));
            view.preview_blocks = preview_blocks(&markdown);
            view.raw_markdown = Some(markdown);
        }
        view.metadata = response.metadata.as_ref().map(summarize);

        self.active_tab = Tab::Preview;
        self.state = UiState::Result(view);
    }

    pub fn download(&mut self) {
        let Some(name) = &self.output_filename else {
            return;
        };

        match download_url(&self.base_url, name) {
            Ok(url) => self.host.navigate(url.as_str()),
            Err(e) => tracing::warn!("cannot build download URL for {name}: {e}"),
        }
    }

    pub fn switch_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
    }

    pub fn reset(&mut self) {
        self.selected = None;
        self.output_filename = None;
        self.in_flight = None;
        self.host.clear_file_picker();
        self.active_tab = Tab::default();
        self.state = UiState::Idle;
    }
}
