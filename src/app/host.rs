use rfd::FileDialog;
use std::path::PathBuf;

/// Side effects the widget hands off to whatever is hosting it.
pub trait Host {
    /// Opens the platform file picker. `None` when the user cancels.
    fn pick_file(&mut self) -> Option<PathBuf>;

    /// Forgets whatever the picker remembered from the last selection.
    fn clear_file_picker(&mut self);

    fn navigate(&mut self, url: &str);
}

/// Native dialogs and the system URL handler.
#[derive(Default)]
pub struct DesktopHost {
    last_dir: Option<PathBuf>,
}

impl Host for DesktopHost {
    fn pick_file(&mut self) -> Option<PathBuf> {
        let mut dialog = FileDialog::new().add_filter("PDF", &["pdf"]);
        if let Some(dir) = &self.last_dir {
            dialog = dialog.set_directory(dir);
        }

        let path = dialog.pick_file()?;
        self.last_dir = path.parent().map(|p| p.to_path_buf());
        Some(path)
    }

    fn clear_file_picker(&mut self) {
        self.last_dir = None;
    }

    fn navigate(&mut self, url: &str) {
        tracing::info!(url, "opening download");
        if let Err(e) = open::that(url) {
            tracing::warn!("failed to open {url}: {e}");
        }
    }
}
