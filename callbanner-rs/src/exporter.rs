//! PNG encoding and the sinks a rendered banner can be exported to.

use crate::error::BannerError;
use callbanner_canvas::Canvas2dContext;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const PNG_MIME_TYPE: &str = "image/png";

/// An encoded banner image. Cloning shares the underlying bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct EncodedImage {
    bytes: Arc<Vec<u8>>,
    width: u32,
    height: u32,
}

impl EncodedImage {
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn mime_type(&self) -> &'static str {
        PNG_MIME_TYPE
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

impl std::fmt::Debug for EncodedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncodedImage")
            .field("mime_type", &PNG_MIME_TYPE)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Encode a finished surface as PNG, tagging it with `ppi` (72 when `None`).
pub fn encode(surface: &Canvas2dContext, ppi: Option<f32>) -> Result<EncodedImage, BannerError> {
    let bytes = surface.to_png(ppi)?;
    Ok(EncodedImage {
        bytes: Arc::new(bytes),
        width: surface.width(),
        height: surface.height(),
    })
}

/// Filesystem-safe form of `name`: lowercase alphanumeric runs joined by
/// single hyphens. Path separators, dots, punctuation and control characters
/// all act as separators. Falls back to `caller` when nothing is left.
pub fn slugify(name: &str) -> String {
    let slug = name
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-");
    if slug.is_empty() {
        "caller".to_string()
    } else {
        slug
    }
}

/// Download filename for a banner of `person_name`: `fake-call-<slug>.png`.
pub fn banner_filename(person_name: &str) -> String {
    format!("fake-call-{}.png", slugify(person_name))
}

/// Somewhere an encoded banner can be written as a file.
pub trait FileSink {
    /// Write `image` under `filename`, returning where it ended up.
    fn save(&self, image: &EncodedImage, filename: &str) -> Result<PathBuf, BannerError>;
}

/// Somewhere an encoded banner can be placed as a clipboard image item.
pub trait ClipboardSink {
    fn copy_image(&self, image: &EncodedImage) -> Result<(), BannerError>;
}

/// Saves files into a directory under the suggested filename.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl FileSink for DirectorySink {
    fn save(&self, image: &EncodedImage, filename: &str) -> Result<PathBuf, BannerError> {
        let path = self.dir.join(filename);
        write_file(&path, image)?;
        Ok(path)
    }
}

/// Saves to one fixed path, ignoring the suggested filename.
#[derive(Debug, Clone)]
pub struct PathSink {
    path: PathBuf,
}

impl PathSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FileSink for PathSink {
    fn save(&self, image: &EncodedImage, _filename: &str) -> Result<PathBuf, BannerError> {
        write_file(&self.path, image)?;
        Ok(self.path.clone())
    }
}

fn write_file(path: &Path, image: &EncodedImage) -> Result<(), BannerError> {
    log::info!("Writing {} bytes to {}", image.bytes.len(), path.display());
    std::fs::write(path, image.bytes())?;
    Ok(())
}

/// Stand-in for platforms without clipboard access.
#[derive(Debug, Clone, Default)]
pub struct UnavailableClipboard {
    reason: Option<String>,
}

impl UnavailableClipboard {
    pub fn with_reason(reason: impl Into<String>) -> Self {
        Self {
            reason: Some(reason.into()),
        }
    }
}

impl ClipboardSink for UnavailableClipboard {
    fn copy_image(&self, _image: &EncodedImage) -> Result<(), BannerError> {
        Err(BannerError::ClipboardUnavailable(
            self.reason
                .clone()
                .unwrap_or_else(|| "no clipboard on this platform".to_string()),
        ))
    }
}

/// The system clipboard, through `arboard`.
#[cfg(feature = "clipboard")]
#[derive(Debug, Clone, Default)]
pub struct SystemClipboard;

#[cfg(feature = "clipboard")]
impl ClipboardSink for SystemClipboard {
    fn copy_image(&self, image: &EncodedImage) -> Result<(), BannerError> {
        let unavailable = |err: arboard::Error| BannerError::ClipboardUnavailable(err.to_string());
        // Clipboards take raw pixels rather than PNG data.
        let rgba = image::load_from_memory(image.bytes())
            .map_err(|err| BannerError::ClipboardUnavailable(err.to_string()))?
            .to_rgba8();
        let mut clipboard = arboard::Clipboard::new().map_err(unavailable)?;
        clipboard
            .set_image(arboard::ImageData {
                width: rgba.width() as usize,
                height: rgba.height() as usize,
                bytes: std::borrow::Cow::Owned(rgba.into_raw()),
            })
            .map_err(unavailable)
    }
}

/// The best clipboard this build supports.
pub fn default_clipboard() -> Box<dyn ClipboardSink> {
    #[cfg(feature = "clipboard")]
    {
        Box::new(SystemClipboard)
    }
    #[cfg(not(feature = "clipboard"))]
    {
        Box::new(UnavailableClipboard::with_reason(
            "built without the clipboard feature",
        ))
    }
}
