use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const PDF_MIME: &str = "application/pdf";
const OCTET_STREAM_MIME: &str = "application/octet-stream";

/// A user-chosen file. The bytes stay on disk until the upload reads them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub size: u64,
    pub mime: String,
    pub path: PathBuf,
}

impl SelectedFile {
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let size = std::fs::metadata(path)?.len();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self {
            name,
            size,
            mime: mime_for_path(path).to_string(),
            path: path.to_path_buf(),
        })
    }

    pub fn is_pdf(&self) -> bool {
        self.mime == PDF_MIME
    }
}

/// Native drops carry no MIME type, so it is derived from the extension.
pub fn mime_for_path(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("pdf") => PDF_MIME,
        _ => OCTET_STREAM_MIME,
    }
}

/// JSON body of `POST /upload`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ProcessResponse {
    #[serde(default)]
    pub success: bool,
    pub error: Option<String>,
    pub output_file: Option<String>,
    pub markdown_content: Option<String>,
    pub metadata: Option<ResultMetadata>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ResultMetadata {
    pub input_file: Option<String>,
    pub output_file: Option<String>,
    /// ISO-8601, usually without an offset.
    pub processed_at: Option<String>,
    pub content_length: Option<u64>,
}

/// JSON body of `GET /health`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub service: String,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_is_derived_from_extension() {
        assert_eq!(mime_for_path(Path::new("report.pdf")), PDF_MIME);
        assert_eq!(mime_for_path(Path::new("SCAN.PDF")), PDF_MIME);
        assert_eq!(mime_for_path(Path::new("notes.txt")), OCTET_STREAM_MIME);
        assert_eq!(mime_for_path(Path::new("README")), OCTET_STREAM_MIME);
    }

    #[test]
    fn failure_response_ignores_unknown_metadata_fields() {
        let body = r#"{
            "success": false,
            "error": "upstream timeout",
            "metadata": { "input_file": "a.pdf", "failed_at": "2025-01-01T00:00:00" }
        }"#;
        let parsed: ProcessResponse = serde_json::from_str(body).unwrap();
        assert!(!parsed.success);
        assert_eq!(parsed.error.as_deref(), Some("upstream timeout"));
        assert_eq!(
            parsed.metadata.unwrap().input_file.as_deref(),
            Some("a.pdf")
        );
    }

    #[test]
    fn success_response_parses_all_fields() {
        let body = r##"{
            "success": true,
            "output_file": "report_20250115_143000.md",
            "markdown_content": "# Hi",
            "metadata": {
                "input_file": "report.pdf",
                "output_file": "report_20250115_143000.md",
                "processed_at": "2025-01-15T14:30:00.123456",
                "content_length": 4
            }
        }"##;
        let parsed: ProcessResponse = serde_json::from_str(body).unwrap();
        assert!(parsed.success);
        assert_eq!(parsed.markdown_content.as_deref(), Some("# Hi"));
        assert_eq!(parsed.metadata.unwrap().content_length, Some(4));
    }

    #[test]
    fn health_status_reports_healthy() {
        let parsed: HealthStatus =
            serde_json::from_str(r#"{"status":"healthy","service":"DeepSeek OCR"}"#).unwrap();
        assert!(parsed.is_healthy());
        assert_eq!(parsed.service, "DeepSeek OCR");
    }
}
