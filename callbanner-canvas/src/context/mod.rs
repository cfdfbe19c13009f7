//! Canvas 2D rendering context implementation.

mod drawing;
mod image_ops;
mod path_ops;
mod text_rendering;

pub use image_ops::CanvasImage;

use crate::drawing_state::DrawingState;
use crate::error::{Canvas2dError, Canvas2dResult};
use crate::font_config::ResolvedFontConfig;
use crate::geometry::CanvasColor;
use crate::gradient::CanvasGradient;
use crate::shadow::ShadowStyle;
use crate::style::FillStyle;
use cosmic_text::{FontSystem, SwashCache};
use std::ops::{Deref, DerefMut};
use tiny_skia::Pixmap;

/// Maximum canvas dimension (same as Chrome).
const MAX_DIMENSION: u32 = 32767;

/// Canvas 2D rendering context.
///
/// Coordinates are device pixels; there is no current transform. Paint state
/// changes that should not leak into later drawing belong inside a
/// [`PaintScope`] obtained from [`Canvas2dContext::scope`].
pub struct Canvas2dContext {
    /// Width of the canvas in pixels.
    pub(crate) width: u32,
    /// Height of the canvas in pixels.
    pub(crate) height: u32,
    /// Pixel buffer.
    pub(crate) pixmap: Pixmap,
    /// Font system for text rendering.
    pub(crate) font_system: FontSystem,
    /// Swash cache for glyph outlines.
    pub(crate) swash_cache: SwashCache,
    /// Current drawing state.
    pub(crate) state: DrawingState,
    /// Stack of saved drawing states.
    state_stack: Vec<DrawingState>,
    /// Current path builder.
    pub(crate) path_builder: tiny_skia::PathBuilder,
    /// Subpath start position (for closePath).
    pub(crate) subpath_start_x: f32,
    pub(crate) subpath_start_y: f32,
    /// Whether the path has a current point (for arc line_to vs move_to).
    pub(crate) has_current_point: bool,
    /// Set once the missing-fonts warning has been logged.
    pub(crate) warned_no_fonts: bool,
}

impl Canvas2dContext {
    /// Create a new Canvas2dContext using a pre-resolved font configuration.
    ///
    /// This clones the cached font database from the [`ResolvedFontConfig`]
    /// rather than rebuilding it, avoiding repeated system font scanning.
    pub fn with_resolved(
        width: u32,
        height: u32,
        resolved: &ResolvedFontConfig,
    ) -> Canvas2dResult<Self> {
        if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(Canvas2dError::InvalidDimensions { width, height });
        }

        let pixmap =
            Pixmap::new(width, height).ok_or(Canvas2dError::InvalidDimensions { width, height })?;

        let font_system =
            FontSystem::new_with_locale_and_db("en".to_string(), resolved.fontdb.clone());

        log::debug!(target: "canvas", "new context {}x{}", width, height);

        Ok(Self {
            width,
            height,
            pixmap,
            font_system,
            swash_cache: SwashCache::new(),
            state: DrawingState::default(),
            state_stack: Vec::new(),
            path_builder: tiny_skia::PathBuilder::new(),
            subpath_start_x: 0.0,
            subpath_start_y: 0.0,
            has_current_point: false,
            warned_no_fonts: false,
        })
    }

    /// Get canvas width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get canvas height.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Current drawing state.
    pub fn state(&self) -> &DrawingState {
        &self.state
    }

    /// Open a paint scope. Every state change made through the returned
    /// guard is reverted when it is dropped, including on early return.
    pub fn scope(&mut self) -> PaintScope<'_> {
        let depth = self.state_stack.len();
        self.save();
        PaintScope { ctx: self, depth }
    }

    pub(crate) fn save(&mut self) {
        log::debug!(target: "canvas", "save");
        self.state_stack.push(self.state.clone());
    }

    pub(crate) fn restore(&mut self) {
        log::debug!(target: "canvas", "restore");
        if let Some(state) = self.state_stack.pop() {
            self.state = state;
        }
    }

    // --- Style setters ---

    /// Set the fill style from a CSS color string.
    pub fn set_fill_style(&mut self, style: &str) -> Canvas2dResult<()> {
        let color = parse_color(style)?;
        self.state.fill_style = FillStyle::Color(color);
        Ok(())
    }

    /// Set the fill style from a CanvasColor.
    pub fn set_fill_style_color(&mut self, color: CanvasColor) {
        self.state.fill_style = FillStyle::Color(color.into());
    }

    /// Set the fill style to a gradient.
    pub fn set_fill_style_gradient(&mut self, gradient: CanvasGradient) {
        self.state.fill_style = FillStyle::LinearGradient(gradient);
    }

    /// Set the drop shadow applied to subsequent path fills.
    pub fn set_shadow(&mut self, shadow: ShadowStyle) {
        self.state.shadow = shadow;
    }

    // --- Gradients ---

    /// Create a linear gradient.
    pub fn create_linear_gradient(&self, x0: f32, y0: f32, x1: f32, y1: f32) -> CanvasGradient {
        CanvasGradient::new_linear(x0, y0, x1, y1)
    }
}

/// Scoped paint state.
///
/// Derefs to the context it was opened on. Dropping it restores the fill
/// style, font, alignment, clip and shadow that were active when it
/// was opened, along with any nested scopes left open inside it.
pub struct PaintScope<'a> {
    ctx: &'a mut Canvas2dContext,
    depth: usize,
}

impl Deref for PaintScope<'_> {
    type Target = Canvas2dContext;

    fn deref(&self) -> &Canvas2dContext {
        self.ctx
    }
}

impl DerefMut for PaintScope<'_> {
    fn deref_mut(&mut self) -> &mut Canvas2dContext {
        self.ctx
    }
}

impl Drop for PaintScope<'_> {
    fn drop(&mut self) {
        while self.ctx.state_stack.len() > self.depth {
            self.ctx.restore();
        }
    }
}

/// Parse a CSS color string into a tiny_skia::Color.
pub(crate) fn parse_color(s: &str) -> Canvas2dResult<tiny_skia::Color> {
    let parsed = csscolorparser::parse(s)
        .map_err(|e| Canvas2dError::ColorParseError(format!("{}: {}", s, e)))?;

    let [r, g, b, a] = parsed.to_array();
    tiny_skia::Color::from_rgba(r, g, b, a)
        .ok_or_else(|| Canvas2dError::ColorParseError(s.to_string()))
}
