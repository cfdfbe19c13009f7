//! Fetching and decoding profile photos and button icons.

use crate::error::BannerError;
use crate::request::DecodedImage;
use backon::{ExponentialBuilder, Retryable};
use log::{info, warn};
use reqwest::{Client, StatusCode};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

static CALLBANNER_USER_AGENT: &str =
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

lazy_static! {
    static ref REQWEST_CLIENT: Option<Client> = reqwest::ClientBuilder::new()
        .user_agent(CALLBANNER_USER_AGENT)
        .build()
        .map_err(|err| log::error!("Failed to construct reqwest client: {err}"))
        .ok();
}

/// Where an image comes from.
#[derive(Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Encoded image bytes already in memory, with a label for messages.
    Bytes { label: String, data: Arc<Vec<u8>> },
    /// A local file.
    File(PathBuf),
    /// An `http://` or `https://` URL.
    Url(String),
}

impl ImageSource {
    pub fn bytes(label: impl Into<String>, data: Arc<Vec<u8>>) -> Self {
        ImageSource::Bytes {
            label: label.into(),
            data,
        }
    }

    /// Interpret a string as a URL when it has an HTTP scheme, otherwise as a path.
    pub fn parse(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            ImageSource::Url(location.to_string())
        } else {
            ImageSource::File(PathBuf::from(location))
        }
    }
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageSource::Bytes { label, .. } => f.write_str(label),
            ImageSource::File(path) => write!(f, "{}", path.display()),
            ImageSource::Url(url) => f.write_str(url),
        }
    }
}

impl fmt::Debug for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageSource::Bytes { label, data } => f
                .debug_struct("Bytes")
                .field("label", label)
                .field("len", &data.len())
                .finish(),
            ImageSource::File(path) => f.debug_tuple("File").field(path).finish(),
            ImageSource::Url(url) => f.debug_tuple("Url").field(url).finish(),
        }
    }
}

/// Fetch and decode `source`, giving up after `timeout`.
///
/// The deadline covers both fetching and decoding. Decoding runs on the
/// blocking pool so a large image cannot stall other loads. Every failure,
/// including the timeout, is reported as [`BannerError::ImageDecode`]
/// naming the source.
pub async fn load_image(source: &ImageSource, timeout: Duration) -> Result<DecodedImage, BannerError> {
    info!("Loading image: {source}");
    let name = source.to_string();
    tokio::time::timeout(timeout, fetch_and_decode(source, &name))
        .await
        .map_err(|_| {
            BannerError::image_decode(&name, format!("timed out after {}ms", timeout.as_millis()))
        })?
}

async fn fetch_and_decode(source: &ImageSource, name: &str) -> Result<DecodedImage, BannerError> {
    let bytes = fetch_bytes(source).await?;
    let task_name = name.to_string();
    tokio::task::spawn_blocking(move || DecodedImage::decode(&bytes, &task_name))
        .await
        .map_err(|err| BannerError::image_decode(name, format!("decode task failed: {err}")))?
}

async fn fetch_bytes(source: &ImageSource) -> Result<Arc<Vec<u8>>, BannerError> {
    match source {
        ImageSource::Bytes { data, .. } => Ok(data.clone()),
        ImageSource::File(path) => tokio::fs::read(path)
            .await
            .map(Arc::new)
            .map_err(|err| BannerError::image_decode(path.display(), err)),
        ImageSource::Url(url) => fetch_http(url).await.map(Arc::new),
    }
}

/// GET `url`, retrying on network errors and transient HTTP statuses.
async fn fetch_http(url: &str) -> Result<Vec<u8>, BannerError> {
    let client = REQWEST_CLIENT
        .as_ref()
        .ok_or_else(|| BannerError::image_decode(url, "HTTP client unavailable"))?;

    let response = (|| async { client.get(url).send().await?.error_for_status() })
        .retry(
            ExponentialBuilder::default()
                .with_min_delay(Duration::from_millis(200))
                .with_max_delay(Duration::from_secs(2))
                .with_max_times(2),
        )
        .when(|e: &reqwest::Error| {
            // Retry on network errors (no status) and transient HTTP errors.
            e.status()
                .map(|s| s.is_server_error() || s == StatusCode::TOO_MANY_REQUESTS)
                .unwrap_or(true)
        })
        .notify(|err, dur| {
            warn!(
                "Retrying image load from {} in {:.1}s: {}",
                url,
                dur.as_secs_f32(),
                err
            );
        })
        .await
        .map_err(|err| match err.status() {
            Some(status) => BannerError::image_decode(url, format!("HTTP status {status}")),
            None => BannerError::image_decode(url, err),
        })?;

    let bytes = response
        .bytes()
        .await
        .map_err(|err| BannerError::image_decode(url, err))?;
    Ok(bytes.to_vec())
}
