//! Fill, clip, shadow, and paint helper operations for Canvas2dContext.

use super::Canvas2dContext;
use crate::geometry::RectParams;
use crate::gradient::CanvasGradient;
use crate::shadow::blur_pixmap;
use crate::style::FillStyle;
use tiny_skia::{Path, Transform};

impl Canvas2dContext {
    // --- Clipping ---

    /// Replace the clipping region with the current path.
    ///
    /// Clip regions live in the drawing state, so they are undone when the
    /// enclosing [`PaintScope`](super::PaintScope) is dropped.
    pub fn clip(&mut self) {
        log::debug!(target: "canvas", "clip");
        let path =
            std::mem::replace(&mut self.path_builder, tiny_skia::PathBuilder::new()).finish();
        self.has_current_point = false;

        if let Some(path) = path {
            self.state.clip_path = Some(path);
        }
    }

    // --- Drawing operations ---

    /// Fill the current path using the non-zero winding rule.
    ///
    /// When the state carries a visible shadow it is painted first, beneath
    /// the shape.
    pub fn fill(&mut self) {
        log::debug!(target: "canvas", "fill");
        let path = self.path_builder.clone().finish();

        if let Some(path) = path {
            let clip_mask = self.create_clip_mask();
            if self.state.shadow.is_visible() {
                self.draw_shadow(&path, clip_mask.as_ref());
            }
            let _ = self.with_fill_paint(|ctx, paint| {
                ctx.pixmap.fill_path(
                    &path,
                    paint,
                    tiny_skia::FillRule::Winding,
                    Transform::identity(),
                    clip_mask.as_ref(),
                );
            });
        }
    }

    /// Fill a rectangle.
    pub fn fill_rect(&mut self, params: &RectParams) {
        log::debug!(target: "canvas", "fillRect {} {} {} {}", params.x, params.y, params.width, params.height);
        self.begin_path();
        self.rect(params);
        self.fill();
    }

    // --- Shadow ---

    /// Paint the drop shadow of `path`.
    ///
    /// The shape is filled with the shadow color into an offscreen pixmap
    /// covering its blurred footprint, blurred there, then composited at
    /// the shadow offset.
    fn draw_shadow(&mut self, path: &Path, clip_mask: Option<&tiny_skia::Mask>) {
        let shadow = self.state.shadow;
        let spread = (shadow.blur * 1.5).ceil();
        let bounds = path.bounds();

        let left = (bounds.left() + shadow.offset_x - spread).floor().max(0.0);
        let top = (bounds.top() + shadow.offset_y - spread).floor().max(0.0);
        let right = (bounds.right() + shadow.offset_x + spread)
            .ceil()
            .min(self.width as f32);
        let bottom = (bounds.bottom() + shadow.offset_y + spread)
            .ceil()
            .min(self.height as f32);
        if right <= left || bottom <= top {
            return;
        }

        let Some(mut layer) =
            tiny_skia::Pixmap::new((right - left) as u32, (bottom - top) as u32)
        else {
            return;
        };

        let color: tiny_skia::Color = shadow.color.into();
        let mut paint = tiny_skia::Paint {
            anti_alias: true,
            ..Default::default()
        };
        paint.set_color(color);

        layer.fill_path(
            path,
            &paint,
            tiny_skia::FillRule::Winding,
            Transform::from_translate(shadow.offset_x - left, shadow.offset_y - top),
            None,
        );
        blur_pixmap(&mut layer, shadow.blur);

        log::debug!(target: "canvas", "shadow blur={} layer={}x{}", shadow.blur, layer.width(), layer.height());
        self.pixmap.draw_pixmap(
            left as i32,
            top as i32,
            layer.as_ref(),
            &tiny_skia::PixmapPaint::default(),
            Transform::identity(),
            clip_mask,
        );
    }

    // --- Private paint helpers ---

    pub(crate) fn create_clip_mask(&self) -> Option<tiny_skia::Mask> {
        self.state.clip_path.as_ref().and_then(|clip_path| {
            let mut mask = tiny_skia::Mask::new(self.width, self.height)?;
            mask.fill_path(
                clip_path,
                tiny_skia::FillRule::Winding,
                true,
                Transform::identity(),
            );
            Some(mask)
        })
    }

    pub(crate) fn with_fill_paint<R>(
        &mut self,
        draw: impl for<'a> FnOnce(&mut Self, &tiny_skia::Paint<'a>) -> R,
    ) -> Option<R> {
        let style = self.state.fill_style.clone();
        self.with_paint_from_style(style, draw)
    }

    pub(crate) fn with_paint_from_style<R>(
        &mut self,
        style: FillStyle,
        draw: impl for<'a> FnOnce(&mut Self, &tiny_skia::Paint<'a>) -> R,
    ) -> Option<R> {
        let mut paint = tiny_skia::Paint {
            anti_alias: true,
            ..Default::default()
        };

        match style {
            FillStyle::Color(color) => {
                paint.set_color(color);
                Some(draw(self, &paint))
            }
            FillStyle::LinearGradient(gradient) => {
                paint.shader = self.create_gradient_shader(&gradient)?;
                Some(draw(self, &paint))
            }
        }
    }

    pub(crate) fn create_gradient_shader(
        &self,
        gradient: &CanvasGradient,
    ) -> Option<tiny_skia::Shader<'static>> {
        if gradient.stops.is_empty() {
            return None;
        }

        let stops: Vec<tiny_skia::GradientStop> = gradient
            .stops
            .iter()
            .map(|stop| tiny_skia::GradientStop::new(stop.offset as f32, stop.color))
            .collect();

        tiny_skia::LinearGradient::new(
            tiny_skia::Point {
                x: gradient.x0,
                y: gradient.y0,
            },
            tiny_skia::Point {
                x: gradient.x1,
                y: gradient.y1,
            },
            stops,
            tiny_skia::SpreadMode::Pad,
            Transform::identity(),
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::context::Canvas2dContext;
    use crate::font_config::FontConfig;
    use crate::geometry::{ArcParams, CanvasColor, RectParams, RoundRectParams};
    use crate::shadow::ShadowStyle;

    fn ctx(width: u32, height: u32) -> Canvas2dContext {
        let fonts = FontConfig {
            load_system_fonts: false,
            ..FontConfig::default()
        }
        .resolve();
        Canvas2dContext::with_resolved(width, height, &fonts).unwrap()
    }

    fn pixel(ctx: &Canvas2dContext, x: usize, y: usize) -> [u8; 4] {
        let data = ctx.get_image_data();
        let idx = (y * ctx.width() as usize + x) * 4;
        [data[idx], data[idx + 1], data[idx + 2], data[idx + 3]]
    }

    #[test]
    fn test_linear_gradient_fill() {
        let mut ctx = ctx(10, 100);
        let mut gradient = ctx.create_linear_gradient(0.0, 0.0, 0.0, 100.0);
        gradient
            .add_color_stop(0.0, tiny_skia::Color::from_rgba8(0, 0, 0, 255))
            .unwrap();
        gradient
            .add_color_stop(1.0, tiny_skia::Color::from_rgba8(200, 200, 200, 255))
            .unwrap();
        ctx.set_fill_style_gradient(gradient);
        ctx.fill_rect(&RectParams::new(0.0, 0.0, 10.0, 100.0));

        let top = pixel(&ctx, 5, 2);
        let bottom = pixel(&ctx, 5, 97);
        assert_eq!(top[3], 255);
        assert!(top[0] < bottom[0]);
    }

    #[test]
    fn test_clip_limits_fill() {
        let mut ctx = ctx(100, 100);
        {
            let mut scope = ctx.scope();
            scope.begin_path();
            scope.arc(&ArcParams::circle(50.0, 50.0, 20.0));
            scope.clip();
            scope.set_fill_style("#0000ff").unwrap();
            scope.fill_rect(&RectParams::new(0.0, 0.0, 100.0, 100.0));
        }
        assert_eq!(pixel(&ctx, 50, 50), [0, 0, 255, 255]);
        assert_eq!(pixel(&ctx, 5, 5)[3], 0);

        // The clip is gone once the scope is dropped.
        ctx.set_fill_style("#ff0000").unwrap();
        ctx.fill_rect(&RectParams::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(pixel(&ctx, 5, 5), [255, 0, 0, 255]);
    }

    #[test]
    fn test_shadow_painted_below_offset_shape() {
        let mut ctx = ctx(200, 100);
        ctx.set_shadow(ShadowStyle {
            color: CanvasColor::from_rgba8(0, 0, 0, 77),
            blur: 20.0,
            offset_x: 0.0,
            offset_y: 8.0,
        });
        ctx.set_fill_style("#000000").unwrap();
        ctx.begin_path();
        ctx.round_rect(&RoundRectParams {
            rect: RectParams::new(40.0, 20.0, 120.0, 50.0),
            radius: 25.0,
        });
        ctx.fill();

        // Solid inside the shape.
        assert_eq!(pixel(&ctx, 100, 45)[3], 255);
        // Soft, partial shadow just below the shape's bottom edge.
        let below = pixel(&ctx, 100, 76)[3];
        assert!(below > 0 && below < 77, "shadow alpha {below}");
        // Nothing far away from it.
        assert_eq!(pixel(&ctx, 2, 2)[3], 0);
    }
}
