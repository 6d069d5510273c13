use std::time::Duration;

use futures_util::StreamExt;
use serde::Deserialize;
use shelf_core::{BookRecord, NOT_AVAILABLE};
use shelf_logging::{shelf_debug, shelf_info};

use crate::{EnrichError, FailureKind, FetchError};

pub const GOOGLE_BOOKS_VOLUMES_URL: &str = "https://www.googleapis.com/books/v1/volumes";

#[derive(Debug, Clone)]
pub struct MetadataSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for MetadataSettings {
    fn default() -> Self {
        Self {
            base_url: GOOGLE_BOOKS_VOLUMES_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 2 * 1024 * 1024,
        }
    }
}

/// Looks up bibliographic metadata for an ISBN.
#[async_trait::async_trait]
pub trait MetadataFetcher: Send + Sync {
    async fn fetch(&self, isbn: &str) -> Result<BookRecord, EnrichError>;
}

#[derive(Debug, Default, Deserialize)]
struct VolumesResponse {
    /// Absent or `null` when nothing matched.
    #[serde(default)]
    items: Option<Vec<Volume>>,
}

#[derive(Debug, Deserialize)]
struct Volume {
    #[serde(rename = "volumeInfo", default)]
    volume_info: VolumeInfo,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VolumeInfo {
    title: Option<String>,
    publisher: Option<String>,
    published_date: Option<String>,
    image_links: Option<ImageLinks>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImageLinks {
    thumbnail: Option<String>,
    small_thumbnail: Option<String>,
}

/// Google Books volume search (`?q=isbn:<code>`).
#[derive(Debug, Clone)]
pub struct GoogleBooksFetcher {
    settings: MetadataSettings,
}

impl GoogleBooksFetcher {
    pub fn new(settings: MetadataSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, FetchError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))
    }

    fn query_url(&self, isbn: &str) -> Result<reqwest::Url, FetchError> {
        url::Url::parse_with_params(&self.settings.base_url, &[("q", format!("isbn:{isbn}"))])
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))
    }

    async fn fetch_body(&self, isbn: &str) -> Result<Vec<u8>, FetchError> {
        let url = self.query_url(isbn)?;
        let client = self.build_client()?;

        let response = client.get(url).send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl MetadataFetcher for GoogleBooksFetcher {
    async fn fetch(&self, isbn: &str) -> Result<BookRecord, EnrichError> {
        shelf_debug!("Fetching metadata isbn={}", isbn);
        let body = self
            .fetch_body(isbn)
            .await
            .map_err(EnrichError::MetadataRequestFailed)?;

        let parsed: VolumesResponse = serde_json::from_slice(&body).map_err(|err| {
            EnrichError::MetadataRequestFailed(FetchError::new(
                FailureKind::MalformedResponse,
                err.to_string(),
            ))
        })?;

        let info = parsed
            .items
            .into_iter()
            .flatten()
            .next()
            .map(|volume| volume.volume_info)
            .ok_or(EnrichError::MetadataNotFound)?;

        let cover = info
            .image_links
            .as_ref()
            .and_then(|links| links.thumbnail.as_deref().or(links.small_thumbnail.as_deref()));
        let record = BookRecord::from_source(
            isbn,
            info.title.as_deref().unwrap_or(NOT_AVAILABLE),
            info.publisher.as_deref(),
            info.published_date.as_deref(),
            cover,
        );
        shelf_info!("Metadata found isbn={} title={}", isbn, record.title);
        Ok(record)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
