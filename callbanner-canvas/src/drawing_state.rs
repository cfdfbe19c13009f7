//! Drawing state that can be saved and restored.

use crate::shadow::ShadowStyle;
use crate::style::{FillStyle, TextAlign, TextBaseline};
use crate::text::FontSpec;

/// Drawing state that can be saved and restored.
#[derive(Debug, Clone)]
pub struct DrawingState {
    /// Current fill style.
    pub fill_style: FillStyle,
    /// Current font specification.
    pub font: FontSpec,
    /// Current text alignment.
    pub text_align: TextAlign,
    /// Current text baseline.
    pub text_baseline: TextBaseline,
    /// Clipping path in device space (if any).
    pub clip_path: Option<tiny_skia::Path>,
    /// Drop shadow applied to path fills.
    pub shadow: ShadowStyle,
}

impl Default for DrawingState {
    fn default() -> Self {
        Self {
            fill_style: FillStyle::default(),
            font: FontSpec::default(),
            text_align: TextAlign::default(),
            text_baseline: TextBaseline::default(),
            clip_path: None,
            shadow: ShadowStyle::default(),
        }
    }
}
