mod client;
mod types;

pub use client::{download_url, HttpTransport, Transport};
pub use types::{HealthStatus, ProcessResponse, ResultMetadata, SelectedFile};
