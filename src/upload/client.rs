use crate::error::TransportError;
use crate::upload::types::{HealthStatus, ProcessResponse, SelectedFile};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Url;

/// The one network round trip the widget makes, plus the startup probe.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn upload(&self, file: &SelectedFile) -> Result<ProcessResponse, TransportError>;

    async fn health(&self) -> Result<HealthStatus, TransportError>;
}

#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpTransport {
    pub fn new(base_url: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, TransportError> {
        self.base_url
            .join(path)
            .map_err(|e| TransportError::InvalidUrl(e.to_string()))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn upload(&self, file: &SelectedFile) -> Result<ProcessResponse, TransportError> {
        let bytes = tokio::fs::read(&file.path)
            .await
            .map_err(|source| TransportError::Read {
                path: file.path.clone(),
                source,
            })?;

        let part = Part::bytes(bytes)
            .file_name(file.name.clone())
            .mime_str(&file.mime)?;
        let form = Form::new().part("file", part);

        let url = self.endpoint("upload")?;
        tracing::info!(file = %file.name, size = file.size, %url, "uploading");

        let response = self.client.post(url).multipart(form).send().await?;
        let status = response.status();

        // Rejections (400/413/500) still carry a JSON body with `success: false`.
        let body = response.bytes().await?;
        let parsed: ProcessResponse = serde_json::from_slice(&body)?;

        tracing::info!(%status, success = parsed.success, "upload finished");
        Ok(parsed)
    }

    async fn health(&self) -> Result<HealthStatus, TransportError> {
        let url = self.endpoint("health")?;
        let status = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json::<HealthStatus>()
            .await?;
        Ok(status)
    }
}

/// `{base}/download/{output_file}`, with the filename as one encoded segment.
pub fn download_url(base_url: &Url, output_file: &str) -> Result<Url, TransportError> {
    let mut url = base_url.clone();
    url.path_segments_mut()
        .map_err(|_| TransportError::InvalidUrl(base_url.to_string()))?
        .pop_if_empty()
        .push("download")
        .push(output_file);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("http://localhost:5001").unwrap()
    }

    #[test]
    fn download_url_appends_filename() {
        let url = download_url(&base(), "report.md").unwrap();
        assert_eq!(url.as_str(), "http://localhost:5001/download/report.md");
    }

    #[test]
    fn download_url_encodes_filename_as_single_segment() {
        let url = download_url(&base(), "my report/v2.md").unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:5001/download/my%20report%2Fv2.md"
        );
    }

    #[test]
    fn download_url_respects_base_path() {
        let base = Url::parse("http://example.com/ocr/").unwrap();
        let url = download_url(&base, "a.md").unwrap();
        assert_eq!(url.as_str(), "http://example.com/ocr/download/a.md");
    }

    #[test]
    fn endpoints_resolve_against_base() {
        let transport = HttpTransport::new(base());
        assert_eq!(
            transport.endpoint("upload").unwrap().as_str(),
            "http://localhost:5001/upload"
        );
    }

    #[tokio::test]
    async fn upload_of_missing_file_is_a_read_error() {
        let transport = HttpTransport::new(base());
        let file = SelectedFile {
            name: "missing.pdf".into(),
            size: 10,
            mime: "application/pdf".into(),
            path: "/nonexistent/dir/missing.pdf".into(),
        };
        let err = transport.upload(&file).await.unwrap_err();
        assert!(matches!(err, TransportError::Read { .. }));
    }
}
