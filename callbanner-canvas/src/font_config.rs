use std::collections::HashSet;
use std::path::PathBuf;

/// Backend-agnostic font configuration.
///
/// Describes the fonts a canvas may use with standard library types only.
/// [`FontConfig::resolve`] turns it into a concrete font database once, so
/// that repeated renders do not rescan the system fonts.
#[derive(Clone, Debug)]
pub struct FontConfig {
    /// Mappings from generic CSS family names to concrete font family names.
    pub generic_families: GenericFamilyMap,
    /// Whether to load system fonts (default: true).
    pub load_system_fonts: bool,
    /// Additional directories to scan for font files.
    pub font_dirs: Vec<PathBuf>,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            generic_families: GenericFamilyMap::defaults(),
            load_system_fonts: true,
            font_dirs: Vec::new(),
        }
    }
}

/// Mappings from generic CSS family names to concrete font family names, in priority order.
#[derive(Clone, Debug, Default)]
pub struct GenericFamilyMap {
    /// Concrete fonts for CSS "sans-serif" (priority order).
    pub sans_serif: Vec<String>,
    /// Concrete fonts for CSS "serif" (priority order).
    pub serif: Vec<String>,
    /// Concrete fonts for CSS "monospace" (priority order).
    pub monospace: Vec<String>,
}

impl GenericFamilyMap {
    /// Default mappings. The banner text is set in a UI sans-serif, so
    /// Inter and the common system UI faces are preferred.
    pub fn defaults() -> Self {
        Self {
            sans_serif: vec![
                "Inter".into(),
                "Helvetica Neue".into(),
                "Arial".into(),
                "Helvetica".into(),
                "Liberation Sans".into(),
                "DejaVu Sans".into(),
            ],
            serif: vec![
                "Times New Roman".into(),
                "Times".into(),
                "Liberation Serif".into(),
                "DejaVu Serif".into(),
            ],
            monospace: vec![
                "Courier New".into(),
                "Liberation Mono".into(),
                "DejaVu Sans Mono".into(),
            ],
        }
    }
}

impl FontConfig {
    /// Resolve this configuration into a concrete font database.
    pub fn resolve(&self) -> ResolvedFontConfig {
        ResolvedFontConfig::new(self)
    }
}

/// A [`FontConfig`] that has been resolved into a concrete font database.
///
/// Cloning a `ResolvedFontConfig` clones the underlying database in memory
/// (no filesystem scan), making it suitable for sharing across renders.
#[derive(Clone)]
pub struct ResolvedFontConfig {
    pub(crate) fontdb: fontdb::Database,
}

impl ResolvedFontConfig {
    pub fn new(config: &FontConfig) -> Self {
        Self {
            fontdb: font_config_to_fontdb(config),
        }
    }

    /// Number of font faces available to the canvas.
    pub fn face_count(&self) -> usize {
        self.fontdb.faces().count()
    }
}

impl std::fmt::Debug for ResolvedFontConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedFontConfig")
            .field("faces", &self.face_count())
            .finish()
    }
}

/// Convert a [`FontConfig`] into a [`fontdb::Database`].
pub(crate) fn font_config_to_fontdb(config: &FontConfig) -> fontdb::Database {
    let mut db = fontdb::Database::new();

    if config.load_system_fonts {
        db.load_system_fonts();
    }

    for dir in &config.font_dirs {
        log::debug!(target: "canvas", "loading fonts from {}", dir.display());
        db.load_fonts_dir(dir);
    }

    apply_generic_families(&mut db, &config.generic_families);

    db
}

/// Apply generic family mappings to a fontdb database, choosing the first available
/// family from each priority list.
fn apply_generic_families(db: &mut fontdb::Database, families: &GenericFamilyMap) {
    let available: HashSet<String> = db
        .faces()
        .flat_map(|face| face.families.iter().map(|(fam, _lang)| fam.clone()))
        .collect();

    if let Some(family) = first_available(&families.sans_serif, &available) {
        db.set_sans_serif_family(family);
    }
    if let Some(family) = first_available(&families.serif, &available) {
        db.set_serif_family(family);
    }
    if let Some(family) = first_available(&families.monospace, &available) {
        db.set_monospace_family(family);
    }
}

fn first_available<'a>(preferences: &'a [String], available: &HashSet<String>) -> Option<&'a str> {
    preferences
        .iter()
        .find(|family| available.contains(*family))
        .map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_font_config() {
        let config = FontConfig::default();
        assert!(config.load_system_fonts);
        assert!(config.font_dirs.is_empty());
        assert_eq!(config.generic_families.sans_serif[0], "Inter");
    }

    #[test]
    fn test_no_system_fonts_resolves_empty() {
        let config = FontConfig {
            load_system_fonts: false,
            ..FontConfig::default()
        };
        assert_eq!(config.resolve().face_count(), 0);
    }

    #[test]
    fn test_first_available_respects_priority() {
        let available: HashSet<String> = ["Arial", "DejaVu Sans"].iter().map(|s| s.to_string()).collect();
        let prefs = GenericFamilyMap::defaults().sans_serif;
        assert_eq!(first_available(&prefs, &available), Some("Arial"));
        assert_eq!(first_available(&[], &available), None);
    }
}
