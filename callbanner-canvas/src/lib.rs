//! Pure Rust Canvas 2D subset used to rasterize call banners.
//!
//! This crate provides the slice of the Canvas 2D API that the banner
//! compositor draws with, without a browser or JavaScript runtime. It uses:
//! - `tiny-skia` for 2D graphics rendering
//! - `cosmic-text` for text shaping and glyph outlines
//! - `fontdb` for font database management
//!
//! # Example
//!
//! ```rust,ignore
//! use callbanner_canvas::{ArcParams, Canvas2dContext, FontConfig};
//!
//! let fonts = FontConfig::default().resolve();
//! let mut ctx = Canvas2dContext::with_resolved(400, 300, &fonts)?;
//! {
//!     let mut scope = ctx.scope();
//!     scope.set_fill_style("#34c759")?;
//!     scope.begin_path();
//!     scope.arc(&ArcParams::circle(200.0, 150.0, 60.0));
//!     scope.fill();
//! }
//! let png_data = ctx.to_png(None)?;
//! ```

mod arc;
mod context;
mod drawing_state;
mod error;
mod font_config;
mod geometry;
mod gradient;
mod shadow;
mod style;
mod text;

// Re-export public API
pub use context::{Canvas2dContext, CanvasImage, PaintScope};
pub use drawing_state::DrawingState;
pub use error::{Canvas2dError, Canvas2dResult};
pub use font_config::{FontConfig, GenericFamilyMap, ResolvedFontConfig};
pub use geometry::{ArcParams, CanvasColor, RectParams, RoundRectParams};
pub use gradient::{CanvasGradient, GradientStop};
pub use shadow::ShadowStyle;
pub use style::{FillStyle, TextAlign, TextBaseline};
pub use text::{FontSpec, TextMetrics};
