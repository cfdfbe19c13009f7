//! Generator configuration, loadable from a JSON file.

use crate::error::BannerError;
use crate::image_loading::ImageSource;
use callbanner_canvas::{FontConfig, GenericFamilyMap};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_DECODE_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_PPI: f32 = 72.0;

/// Settings for a [`BannerGenerator`](crate::BannerGenerator).
///
/// Every field has a default, so a config file only needs the keys it
/// changes:
///
/// ```json
/// { "decode_timeout_ms": 5000, "icons": { "decline": "assets/decline.png", "accept": "assets/accept.png" } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BannerConfig {
    /// Upper bound for fetching and decoding each image of a render.
    pub decode_timeout_ms: u64,
    /// Pixel density recorded in the PNG metadata.
    pub ppi: f32,
    /// Bitmap button icons. Glyphs are drawn when unset.
    pub icons: Option<IconConfig>,
    pub fonts: FontSettings,
}

impl Default for BannerConfig {
    fn default() -> Self {
        Self {
            decode_timeout_ms: DEFAULT_DECODE_TIMEOUT_MS,
            ppi: DEFAULT_PPI,
            icons: None,
            fonts: FontSettings::default(),
        }
    }
}

/// Decline and accept icon locations: file paths or http(s) URLs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconConfig {
    pub decline: String,
    pub accept: String,
}

impl IconConfig {
    pub fn sources(&self) -> (ImageSource, ImageSource) {
        (
            ImageSource::parse(&self.decline),
            ImageSource::parse(&self.accept),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSettings {
    pub load_system_fonts: bool,
    pub font_dirs: Vec<PathBuf>,
    /// Replaces the sans-serif fallback list when set.
    pub sans_serif: Option<Vec<String>>,
}

impl Default for FontSettings {
    fn default() -> Self {
        Self {
            load_system_fonts: true,
            font_dirs: Vec::new(),
            sans_serif: None,
        }
    }
}

impl BannerConfig {
    pub fn from_json(json: &str) -> Result<Self, BannerError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, BannerError> {
        let json = std::fs::read_to_string(path).map_err(|err| {
            BannerError::Config(format!("cannot read {}: {}", path.display(), err))
        })?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), BannerError> {
        if self.decode_timeout_ms == 0 {
            return Err(BannerError::Config(
                "decode_timeout_ms must be greater than zero".to_string(),
            ));
        }
        if !(self.ppi.is_finite() && self.ppi > 0.0) {
            return Err(BannerError::Config(format!(
                "ppi must be a positive number, got {}",
                self.ppi
            )));
        }
        Ok(())
    }

    pub fn decode_timeout(&self) -> Duration {
        Duration::from_millis(self.decode_timeout_ms)
    }

    pub fn font_config(&self) -> FontConfig {
        let mut generic_families = GenericFamilyMap::defaults();
        if let Some(sans_serif) = &self.fonts.sans_serif {
            generic_families.sans_serif = sans_serif.clone();
        }
        FontConfig {
            generic_families,
            load_system_fonts: self.fonts.load_system_fonts,
            font_dirs: self.fonts.font_dirs.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BannerConfig::default();
        assert_eq!(config.decode_timeout(), Duration::from_secs(10));
        assert_eq!(config.ppi, 72.0);
        assert!(config.icons.is_none());
        assert!(config.font_config().load_system_fonts);
    }

    #[test]
    fn test_partial_json() {
        let config = BannerConfig::from_json(
            r#"{"decode_timeout_ms": 250, "fonts": {"load_system_fonts": false, "sans_serif": ["Roboto"]}}"#,
        )
        .unwrap();
        assert_eq!(config.decode_timeout(), Duration::from_millis(250));
        assert_eq!(config.ppi, 72.0);
        let fonts = config.font_config();
        assert!(!fonts.load_system_fonts);
        assert_eq!(fonts.generic_families.sans_serif, vec!["Roboto".to_string()]);
        assert!(!fonts.generic_families.serif.is_empty());
    }

    #[test]
    fn test_icons() {
        let config = BannerConfig::from_json(
            r#"{"icons": {"decline": "https://example.com/api/drop-icon", "accept": "icons/accept.png"}}"#,
        )
        .unwrap();
        let (decline, accept) = config.icons.unwrap().sources();
        assert_eq!(
            decline,
            ImageSource::Url("https://example.com/api/drop-icon".to_string())
        );
        assert_eq!(accept, ImageSource::File(PathBuf::from("icons/accept.png")));
    }

    #[test]
    fn test_invalid() {
        assert!(matches!(
            BannerConfig::from_json(r#"{"decode_timeout_ms": 0}"#),
            Err(BannerError::Config(_))
        ));
        assert!(matches!(
            BannerConfig::from_json(r#"{"ppi": -1}"#),
            Err(BannerError::Config(_))
        ));
        assert!(matches!(
            BannerConfig::from_json("not json"),
            Err(BannerError::Config(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("callbanner.json");
        std::fs::write(&path, r#"{"ppi": 144}"#).unwrap();
        assert_eq!(BannerConfig::from_file(&path).unwrap().ppi, 144.0);
        assert!(matches!(
            BannerConfig::from_file(&dir.path().join("missing.json")),
            Err(BannerError::Config(_))
        ));
    }
}
