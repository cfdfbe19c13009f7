//! Text rendering operations for Canvas2dContext.

use super::Canvas2dContext;
use crate::style::{TextAlign, TextBaseline};
use crate::text::{FontSpec, TextMetrics};
use cosmic_text::{Attrs, Buffer, CacheKeyFlags, Command, Metrics, Shaping};
use tiny_skia::Transform;

impl Canvas2dContext {
    /// Set the font used by subsequent text operations.
    pub fn set_font(&mut self, font: FontSpec) {
        self.state.font = font;
    }

    /// Set the text alignment.
    pub fn set_text_align(&mut self, align: TextAlign) {
        self.state.text_align = align;
    }

    /// Set the text baseline.
    pub fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.state.text_baseline = baseline;
    }

    /// Measure text with the current font.
    pub fn measure_text(&mut self, text: &str) -> TextMetrics {
        let (_, metrics) = self.shape_text(text);
        metrics
    }

    /// Fill text at the specified position.
    pub fn fill_text(&mut self, text: &str, x: f32, y: f32) {
        log::debug!(target: "canvas", "fillText \"{}\" {} {}", text, x, y);
        self.render_text_impl(text, x, y, None);
    }

    /// Fill text at the specified position with a maximum width.
    ///
    /// If the text width exceeds max_width, the text is horizontally scaled to fit.
    /// If max_width is <= 0, NaN, or the text would be scaled below 0.1%, nothing is rendered.
    pub fn fill_text_max_width(&mut self, text: &str, x: f32, y: f32, max_width: f32) {
        log::debug!(target: "canvas", "fillText \"{}\" {} {} max={}", text, x, y, max_width);
        self.render_text_impl(text, x, y, Some(max_width));
    }

    /// Shape `text` with the current font into a single-line buffer.
    ///
    /// Without any font faces there is nothing to shape with; the buffer is
    /// `None` and the metrics fall back to the em box.
    fn shape_text(&mut self, text: &str) -> (Option<Buffer>, TextMetrics) {
        let font = self.state.font.clone();
        if self.font_system.db().faces().next().is_none() {
            if !self.warned_no_fonts {
                log::warn!(
                    target: "canvas",
                    "no font faces available, text will not be drawn (first skipped: {:?})",
                    text
                );
                self.warned_no_fonts = true;
            }
            return (
                None,
                TextMetrics {
                    width: 0.0,
                    ascent: font.size_px * 0.8,
                    descent: font.size_px * 0.2,
                },
            );
        }

        let metrics = Metrics::new(font.size_px, font.size_px * 1.2);
        let mut buffer = Buffer::new(&mut self.font_system, metrics);

        let family = crate::text::resolve_family(&self.font_system, &font.families);
        // Disable hinting so glyph outlines scale smoothly with max-width fitting
        let attrs = Attrs::new()
            .family(family)
            .weight(font.cosmic_weight())
            .cache_key_flags(CacheKeyFlags::DISABLE_HINTING);

        buffer.set_text(&mut self.font_system, text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(&mut self.font_system, false);

        let mut width: f32 = 0.0;
        let mut ascent: f32 = 0.0;
        let mut descent: f32 = 0.0;
        for run in buffer.layout_runs() {
            width = width.max(run.line_w);
            ascent = ascent.max(run.line_y - run.line_top);
            descent = descent.max((run.line_top + run.line_height) - run.line_y);
        }
        if ascent == 0.0 && descent == 0.0 {
            ascent = font.size_px * 0.8;
            descent = font.size_px * 0.2;
        }

        (
            Some(buffer),
            TextMetrics {
                width,
                ascent,
                descent,
            },
        )
    }

    /// Internal text rendering using vector glyph paths.
    fn render_text_impl(&mut self, text: &str, x: f32, y: f32, max_width: Option<f32>) {
        // Handle max_width edge cases: if <= 0 or NaN, don't render
        if let Some(mw) = max_width {
            if mw <= 0.0 || mw.is_nan() {
                return;
            }
        }

        let (buffer, metrics) = self.shape_text(text);
        let Some(buffer) = buffer else {
            return;
        };

        // Calculate horizontal scale factor for maxWidth
        let scale_x = match max_width {
            Some(mw) if mw.is_finite() && metrics.width > mw => {
                let scale = mw / metrics.width;
                // Don't render if scale would be too small (< 0.1%)
                if scale < 0.001 {
                    return;
                }
                scale
            }
            _ => 1.0,
        };

        // Alignment uses the unscaled width; scaling happens around the anchor.
        let x_offset = crate::text::calculate_text_x_offset(metrics.width, self.state.text_align);
        let y_offset = crate::text::calculate_text_y_offset(
            metrics.ascent,
            metrics.descent,
            self.state.text_baseline,
        );

        let base_x = x + x_offset;
        let base_y = y + y_offset;

        let scale_transform = if scale_x != 1.0 {
            Transform::from_translate(x, 0.0)
                .pre_scale(scale_x, 1.0)
                .pre_translate(-x, 0.0)
        } else {
            Transform::identity()
        };

        let clip_mask = self.create_clip_mask();
        let _ = self.with_fill_paint(|ctx, paint| {
            for run in buffer.layout_runs() {
                for glyph in run.glyphs.iter() {
                    let physical_glyph = glyph.physical((base_x, base_y), 1.0);

                    // Floating-point glyph position for sub-pixel precision
                    let glyph_x = base_x + glyph.x + glyph.font_size * glyph.x_offset;
                    let glyph_y = base_y + glyph.y - glyph.font_size * glyph.y_offset;

                    let Some(commands) = ctx
                        .swash_cache
                        .get_outline_commands(&mut ctx.font_system, physical_glyph.cache_key)
                    else {
                        continue;
                    };

                    // Font outlines have Y pointing up, so Y is negated
                    let mut path_builder = tiny_skia::PathBuilder::new();
                    for cmd in commands {
                        match cmd {
                            Command::MoveTo(p) => path_builder.move_to(p.x, -p.y),
                            Command::LineTo(p) => path_builder.line_to(p.x, -p.y),
                            Command::QuadTo(ctrl, end) => {
                                path_builder.quad_to(ctrl.x, -ctrl.y, end.x, -end.y)
                            }
                            Command::CurveTo(c1, c2, end) => {
                                path_builder.cubic_to(c1.x, -c1.y, c2.x, -c2.y, end.x, -end.y)
                            }
                            Command::Close => path_builder.close(),
                        }
                    }

                    if let Some(path) = path_builder.finish() {
                        let glyph_transform = Transform::from_translate(glyph_x, glyph_y)
                            .post_concat(scale_transform);
                        ctx.pixmap.fill_path(
                            &path,
                            paint,
                            tiny_skia::FillRule::Winding,
                            glyph_transform,
                            clip_mask.as_ref(),
                        );
                    }
                }
            }
        });
    }
}
