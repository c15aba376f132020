//! Error types for the uploader.
//!
//! [`WidgetError`] is what the user sees: every validation, server and
//! transport failure collapses into one of its variants, and its `Display`
//! is the exact message shown in the error section.
//!
//! [`TransportError`] is what the network layer returns. It is logged for
//! diagnostics and mapped to [`WidgetError::Network`] before it reaches the
//! view.

use crate::utils::file_size::FileSizeUtils;
use std::path::PathBuf;
use thiserror::Error;

/// User-facing failures, carried by the Error state of the window.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WidgetError {
    // ── Client-side validation ────────────────────────────────────────────
    #[error("Please select a file first")]
    NoFileSelected,

    #[error("File too large, please upload a file under {}", limit_text(.limit))]
    FileTooLarge { limit: u64 },

    /// Only raised on the drop path; the picker filters by extension itself.
    #[error("Please upload a PDF file")]
    NotAPdf,

    #[error("Unable to read the selected file")]
    ReadFailed,

    // ── Server-reported ───────────────────────────────────────────────────
    /// `success: false`, with the server's own message when it sent one.
    #[error("{}", .0.as_deref().unwrap_or("Processing failed, please retry"))]
    Server(Option<String>),

    // ── Transport ─────────────────────────────────────────────────────────
    #[error("Network error, please check your connection and retry")]
    Network,
}

/// Failures of the HTTP round trip itself.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("response is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

fn limit_text(bytes: &u64) -> String {
    FileSizeUtils::format_size(*bytes)
}

impl From<&TransportError> for WidgetError {
    fn from(err: &TransportError) -> Self {
        match err {
            TransportError::Read { .. } => WidgetError::ReadFailed,
            _ => WidgetError::Network,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_too_large_names_limit_in_megabytes() {
        let e = WidgetError::FileTooLarge {
            limit: 16 * 1024 * 1024,
        };
        assert_eq!(
            e.to_string(),
            "File too large, please upload a file under 16 MB"
        );
    }

    #[test]
    fn file_too_large_keeps_fractional_and_small_limits() {
        let half = WidgetError::FileTooLarge { limit: 512 * 1024 };
        assert_eq!(
            half.to_string(),
            "File too large, please upload a file under 512 KB"
        );

        let odd = WidgetError::FileTooLarge {
            limit: 3 * 1024 * 1024 / 2,
        };
        assert_eq!(
            odd.to_string(),
            "File too large, please upload a file under 1.5 MB"
        );
    }

    #[test]
    fn server_error_prefers_server_message() {
        let e = WidgetError::Server(Some("OCR backend unavailable".into()));
        assert_eq!(e.to_string(), "OCR backend unavailable");
    }

    #[test]
    fn server_error_falls_back_to_generic_message() {
        assert_eq!(
            WidgetError::Server(None).to_string(),
            "Processing failed, please retry"
        );
    }

    #[test]
    fn transport_errors_hide_details_from_user() {
        let err = TransportError::InvalidUrl("not a url".into());
        let shown = WidgetError::from(&err);
        assert_eq!(shown, WidgetError::Network);
        assert!(!shown.to_string().contains("not a url"));
    }

    #[test]
    fn read_failure_maps_to_read_failed() {
        let err = TransportError::Read {
            path: PathBuf::from("/tmp/missing.pdf"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(WidgetError::from(&err), WidgetError::ReadFailed);
    }
}
