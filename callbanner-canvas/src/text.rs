//! Font specification and text layout helpers built on cosmic-text.

use crate::style::{TextAlign, TextBaseline};
use cosmic_text::{Family, FontSystem, Weight};

/// A typed font request: size, weight and family preference list.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    /// Font size in pixels.
    pub size_px: f32,
    /// Font weight (400 regular, 700 bold).
    pub weight: u16,
    /// Font families in order of preference. Generic names
    /// (`sans-serif`, `serif`, `monospace`) are understood.
    pub families: Vec<String>,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            size_px: 10.0,
            weight: 400,
            families: vec!["sans-serif".to_string()],
        }
    }
}

impl FontSpec {
    /// A regular-weight sans-serif font of the given pixel size.
    pub fn new(size_px: f32) -> Self {
        Self {
            size_px,
            ..Self::default()
        }
    }

    pub fn bold(mut self) -> Self {
        self.weight = 700;
        self
    }

    /// Replace the family preference list.
    pub fn with_families<I, S>(mut self, families: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let families: Vec<String> = families.into_iter().map(Into::into).collect();
        if !families.is_empty() {
            self.families = families;
        }
        self
    }

    pub(crate) fn cosmic_weight(&self) -> Weight {
        Weight(self.weight)
    }
}

/// Text metrics returned by measure_text().
#[derive(Debug, Clone, Default)]
pub struct TextMetrics {
    /// Advance width of the text in pixels.
    pub width: f32,
    /// Distance from baseline to the top of the line box.
    pub ascent: f32,
    /// Distance from baseline to the bottom of the line box.
    pub descent: f32,
}

/// Pick the first family from `families` that the font system can serve.
///
/// Unknown names are skipped so that a preference list such as
/// `Inter, -apple-system, sans-serif` degrades to the generic family.
pub(crate) fn resolve_family<'a>(font_system: &FontSystem, families: &'a [String]) -> Family<'a> {
    for name in families {
        match name.as_str() {
            "sans-serif" => return Family::SansSerif,
            "serif" => return Family::Serif,
            "monospace" => return Family::Monospace,
            "cursive" => return Family::Cursive,
            "fantasy" => return Family::Fantasy,
            _ => {
                let available = font_system
                    .db()
                    .faces()
                    .any(|face| face.families.iter().any(|(family, _)| family == name));
                if available {
                    return Family::Name(name);
                }
                log::debug!(target: "canvas", "font family {name:?} not available, trying next");
            }
        }
    }
    Family::SansSerif
}

/// Calculate X offset for text alignment.
pub(crate) fn calculate_text_x_offset(width: f32, align: TextAlign) -> f32 {
    match align {
        TextAlign::Left => 0.0,
        TextAlign::Right => -width,
        TextAlign::Center => -width / 2.0,
    }
}

/// Calculate Y offset that moves the anchor from `baseline` to the alphabetic baseline.
pub(crate) fn calculate_text_y_offset(ascent: f32, descent: f32, baseline: TextBaseline) -> f32 {
    match baseline {
        TextBaseline::Top => ascent,
        TextBaseline::Middle => (ascent - descent) / 2.0,
        TextBaseline::Alphabetic => 0.0,
        TextBaseline::Bottom => -descent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_spec_builder() {
        let font = FontSpec::new(36.0)
            .bold()
            .with_families(["Inter", "sans-serif"]);
        assert_eq!(font.size_px, 36.0);
        assert_eq!(font.weight, 700);
        assert_eq!(font.families, vec!["Inter", "sans-serif"]);
    }

    #[test]
    fn test_empty_family_list_keeps_default() {
        let font = FontSpec::new(12.0).with_families(Vec::<String>::new());
        assert_eq!(font.families, vec!["sans-serif"]);
    }

    #[test]
    fn test_alignment_offsets() {
        assert_eq!(calculate_text_x_offset(100.0, TextAlign::Left), 0.0);
        assert_eq!(calculate_text_x_offset(100.0, TextAlign::Center), -50.0);
        assert_eq!(calculate_text_x_offset(100.0, TextAlign::Right), -100.0);
    }

    #[test]
    fn test_baseline_offsets() {
        assert_eq!(calculate_text_y_offset(8.0, 2.0, TextBaseline::Top), 8.0);
        assert_eq!(calculate_text_y_offset(8.0, 2.0, TextBaseline::Middle), 3.0);
        assert_eq!(calculate_text_y_offset(8.0, 2.0, TextBaseline::Alphabetic), 0.0);
        assert_eq!(calculate_text_y_offset(8.0, 2.0, TextBaseline::Bottom), -2.0);
    }

    #[test]
    fn test_unknown_family_falls_back_to_generic() {
        let db = fontdb::Database::new();
        let font_system = FontSystem::new_with_locale_and_db("en".to_string(), db);
        let families = vec!["No Such Font".to_string(), "monospace".to_string()];
        assert_eq!(resolve_family(&font_system, &families), Family::Monospace);
        let unknown_only = vec!["No Such Font".to_string()];
        assert_eq!(resolve_family(&font_system, &unknown_only), Family::SansSerif);
    }
}
