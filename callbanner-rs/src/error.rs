use callbanner_canvas::Canvas2dError;
use std::fmt;
use thiserror::Error;

/// Largest accepted profile upload, in bytes.
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

/// A required text field of the banner form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    CompanyName,
    PersonName,
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormField::CompanyName => write!(f, "company name"),
            FormField::PersonName => write!(f, "caller name"),
        }
    }
}

/// Problems with user input, detected before any rendering starts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing information: please fill in the {0}")]
    EmptyField(FormField),

    #[error("File too large: {size} bytes (limit is {limit} bytes)")]
    FileTooLarge { size: u64, limit: u64 },

    #[error("Invalid file type: {mime} is not an image")]
    UnsupportedFileType { mime: String },
}

/// Errors produced while generating or exporting a banner.
#[derive(Debug, Error)]
pub enum BannerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A profile photo or icon bitmap could not be fetched or decoded.
    #[error("Failed to load image from {source_name}: {reason}")]
    ImageDecode { source_name: String, reason: String },

    #[error("Render target unavailable: {0}")]
    RenderTargetUnavailable(String),

    #[error("Clipboard unavailable: {0}")]
    ClipboardUnavailable(String),

    #[error("A banner is already being generated")]
    Busy,

    #[error("No banner has been generated yet")]
    NothingRendered,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl BannerError {
    pub(crate) fn image_decode(source_name: impl fmt::Display, reason: impl fmt::Display) -> Self {
        BannerError::ImageDecode {
            source_name: source_name.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl From<Canvas2dError> for BannerError {
    fn from(err: Canvas2dError) -> Self {
        BannerError::RenderTargetUnavailable(err.to_string())
    }
}

impl From<serde_json::Error> for BannerError {
    fn from(err: serde_json::Error) -> Self {
        BannerError::Config(err.to_string())
    }
}
