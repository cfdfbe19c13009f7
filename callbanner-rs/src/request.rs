//! Banner form input, its validation, and the validated render request.

use crate::error::{BannerError, FormField, ValidationError, MAX_UPLOAD_BYTES};
use callbanner_canvas::CanvasImage;
use std::path::Path;
use std::sync::Arc;

/// Raw form state as entered by the user.
#[derive(Debug, Clone, Default)]
pub struct BannerForm {
    pub company_name: String,
    pub person_name: String,
    pub profile: Option<ProfileUpload>,
}

impl BannerForm {
    pub fn new(company_name: impl Into<String>, person_name: impl Into<String>) -> Self {
        Self {
            company_name: company_name.into(),
            person_name: person_name.into(),
            profile: None,
        }
    }

    pub fn with_profile(mut self, profile: ProfileUpload) -> Self {
        self.profile = Some(profile);
        self
    }

    /// Check the text fields, returning the trimmed company and caller names.
    pub fn validate(&self) -> Result<(String, String), ValidationError> {
        let company = required(&self.company_name, FormField::CompanyName)?;
        let person = required(&self.person_name, FormField::PersonName)?;
        Ok((company, person))
    }
}

fn required(value: &str, field: FormField) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(trimmed.to_string())
}

/// An uploaded profile photo that passed the size and type checks.
///
/// The bytes are not decoded yet; decoding happens as part of a render.
#[derive(Debug, Clone)]
pub struct ProfileUpload {
    bytes: Arc<Vec<u8>>,
    mime_type: String,
    name: String,
}

impl ProfileUpload {
    /// Accept an upload with a declared MIME type.
    pub fn new(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<Self, ValidationError> {
        let mime_type = mime_type.into();
        check_size(bytes.len() as u64)?;
        check_mime(&mime_type)?;
        Ok(Self {
            bytes: Arc::new(bytes),
            mime_type,
            name: name.into(),
        })
    }

    /// Accept an upload, sniffing its MIME type from the leading bytes.
    pub fn sniffed(name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, ValidationError> {
        let mime_type = sniff_mime(&bytes);
        Self::new(name, mime_type, bytes)
    }

    /// Read an upload from disk. The size limit is checked against the file
    /// metadata before the contents are read.
    pub async fn from_path(path: &Path) -> Result<Self, BannerError> {
        let metadata = tokio::fs::metadata(path).await?;
        check_size(metadata.len())?;
        let bytes = tokio::fs::read(path).await?;
        Ok(Self::sniffed(path.display().to_string(), bytes)?)
    }

    pub fn bytes(&self) -> &Arc<Vec<u8>> {
        &self.bytes
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

fn check_size(size: u64) -> Result<(), ValidationError> {
    if size > MAX_UPLOAD_BYTES {
        return Err(ValidationError::FileTooLarge {
            size,
            limit: MAX_UPLOAD_BYTES,
        });
    }
    Ok(())
}

fn check_mime(mime_type: &str) -> Result<(), ValidationError> {
    if !mime_type.starts_with("image/") {
        return Err(ValidationError::UnsupportedFileType {
            mime: mime_type.to_string(),
        });
    }
    Ok(())
}

fn sniff_mime(bytes: &[u8]) -> String {
    image::guess_format(bytes)
        .map(|format| format.to_mime_type().to_string())
        .unwrap_or_else(|_| "application/octet-stream".to_string())
}

/// A decoded raster image: straight-alpha RGBA8 pixels.
#[derive(Clone)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl DecodedImage {
    /// Decode encoded image bytes; `source_name` names the origin in errors.
    pub fn decode(bytes: &[u8], source_name: &str) -> Result<Self, BannerError> {
        let decoded = image::load_from_memory(bytes)
            .map_err(|err| BannerError::image_decode(source_name, err))?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        if width == 0 || height == 0 {
            return Err(BannerError::image_decode(source_name, "image has no pixels"));
        }
        Ok(Self {
            width,
            height,
            rgba: rgba.into_raw(),
        })
    }

    pub(crate) fn to_canvas_image(&self, source_name: &str) -> Result<CanvasImage, BannerError> {
        CanvasImage::from_rgba(self.width, self.height, &self.rgba)
            .map_err(|err| BannerError::image_decode(source_name, err))
    }
}

impl std::fmt::Debug for DecodedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecodedImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

/// Everything a single render needs. Both names are non-empty and trimmed.
#[derive(Debug, Clone)]
pub struct BannerRequest {
    company_name: String,
    person_name: String,
    profile_image: Option<DecodedImage>,
}

impl BannerRequest {
    pub fn new(
        company_name: &str,
        person_name: &str,
        profile_image: Option<DecodedImage>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            company_name: required(company_name, FormField::CompanyName)?,
            person_name: required(person_name, FormField::PersonName)?,
            profile_image,
        })
    }

    pub fn company_name(&self) -> &str {
        &self.company_name
    }

    pub fn person_name(&self) -> &str {
        &self.person_name
    }

    pub fn profile_image(&self) -> Option<&DecodedImage> {
        self.profile_image.as_ref()
    }
}
