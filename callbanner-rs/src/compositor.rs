//! Banner compositor: paints a [`BannerRequest`] onto a fresh canvas.
//!
//! Drawing order is background, banner shape, profile circle, text, then
//! buttons. Every temporary paint state change happens inside a
//! [`PaintScope`](callbanner_canvas::PaintScope) so nothing leaks between
//! elements.

use crate::error::BannerError;
use crate::preset::{
    FullScreenStyle, PillStyle, PlaceholderStyle, Preset, StyleProfile, TextStyle, ACCEPT_GREEN,
    DECLINE_RED, FONT_FAMILIES,
};
use crate::request::BannerRequest;
use callbanner_canvas::{
    ArcParams, Canvas2dContext, CanvasColor, CanvasImage, FontSpec, RectParams,
    ResolvedFontConfig, RoundRectParams, ShadowStyle, TextAlign, TextBaseline,
};
use std::f32::consts::PI;

const DECLINE_GLYPH: &str = "✕";
const ACCEPT_GLYPH: &str = "✓";

/// What to draw inside the decline and accept buttons.
#[derive(Debug, Clone, Default)]
pub enum ButtonIcons {
    /// Text glyphs ✕ and ✓.
    #[default]
    Glyphs,
    /// Decoded bitmaps, scaled to the preset's icon size.
    Bitmaps {
        decline: CanvasImage,
        accept: CanvasImage,
    },
}

/// A circle on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Circle {
    cx: f32,
    cy: f32,
    r: f32,
}

impl Circle {
    fn arc(&self) -> ArcParams {
        ArcParams::circle(self.cx, self.cy, self.r)
    }
}

/// Render `request` with `preset`, returning the finished surface.
pub fn compose(
    request: &BannerRequest,
    preset: Preset,
    icons: &ButtonIcons,
    fonts: &ResolvedFontConfig,
) -> Result<Canvas2dContext, BannerError> {
    let (width, height) = preset.dimensions();
    let mut ctx = Canvas2dContext::with_resolved(width, height, fonts)
        .map_err(|err| BannerError::RenderTargetUnavailable(err.to_string()))?;

    let photo = request
        .profile_image()
        .map(|image| image.to_canvas_image("profile photo"))
        .transpose()?;

    log::info!(
        "Composing {} banner ({}x{}) for {:?}",
        preset,
        width,
        height,
        request.person_name()
    );

    match preset.style() {
        StyleProfile::FullScreen(style) => {
            draw_full_screen(&mut ctx, style, request, photo.as_ref(), icons)?
        }
        StyleProfile::Pill(style) => draw_pill(&mut ctx, style, request, photo.as_ref(), icons),
    }

    Ok(ctx)
}

fn draw_full_screen(
    ctx: &mut Canvas2dContext,
    style: &FullScreenStyle,
    request: &BannerRequest,
    photo: Option<&CanvasImage>,
    icons: &ButtonIcons,
) -> Result<(), BannerError> {
    let width = style.width as f32;
    let height = style.height as f32;
    let center_x = width / 2.0;

    {
        let mut gradient = ctx.create_linear_gradient(0.0, 0.0, 0.0, height);
        gradient.add_color_stop(0.0, style.gradient_top.into())?;
        gradient.add_color_stop(1.0, style.gradient_bottom.into())?;
        let mut scope = ctx.scope();
        scope.set_fill_style_gradient(gradient);
        scope.fill_rect(&RectParams::new(0.0, 0.0, width, height));
    }

    let profile = Circle {
        cx: center_x,
        cy: style.profile_y,
        r: style.profile_radius,
    };
    draw_profile(ctx, profile, photo, &style.placeholder);

    let lines = [
        (style.header, &style.header_text, style.header_y),
        (request.company_name(), &style.company_text, style.company_y),
        (request.person_name(), &style.name_text, style.name_y),
        (style.caller_type, &style.caller_type_text, style.caller_type_y),
        (
            style.caption,
            &style.caption_text,
            height - style.caption_from_bottom,
        ),
    ];
    for (text, text_style, y) in lines {
        let mut scope = ctx.scope();
        apply_text_style(&mut scope, text_style, TextAlign::Center, TextBaseline::Alphabetic);
        scope.fill_text(text, center_x, y);
    }

    let decline = Circle {
        cx: center_x - style.button_offset_x,
        cy: style.button_y,
        r: style.button_radius,
    };
    let accept = Circle {
        cx: center_x + style.button_offset_x,
        ..decline
    };
    let glyph_y = |button: Circle| button.cy + style.glyph_drop;
    let (decline_icon, accept_icon) = match icons {
        ButtonIcons::Glyphs => (
            ButtonIcon::Glyph {
                text: DECLINE_GLYPH,
                style: style.glyph_text,
                baseline: TextBaseline::Alphabetic,
                y: glyph_y(decline),
            },
            ButtonIcon::Glyph {
                text: ACCEPT_GLYPH,
                style: style.glyph_text,
                baseline: TextBaseline::Alphabetic,
                y: glyph_y(accept),
            },
        ),
        ButtonIcons::Bitmaps { decline, accept } => (
            ButtonIcon::Bitmap(decline, style.icon_scale),
            ButtonIcon::Bitmap(accept, style.icon_scale),
        ),
    };
    draw_button(ctx, decline, DECLINE_RED, &decline_icon);
    draw_button(ctx, accept, ACCEPT_GREEN, &accept_icon);

    Ok(())
}

fn draw_pill(
    ctx: &mut Canvas2dContext,
    style: &PillStyle,
    request: &BannerRequest,
    photo: Option<&CanvasImage>,
    icons: &ButtonIcons,
) {
    if let Some(background) = style.background {
        let mut scope = ctx.scope();
        scope.set_fill_style_color(background);
        scope.fill_rect(&RectParams::new(
            0.0,
            0.0,
            style.width as f32,
            style.height as f32,
        ));
    }

    let pill = RectParams::new(
        style.margin,
        style.margin,
        style.pill_width(),
        style.pill_height(),
    );
    let center_y = pill.y + pill.height / 2.0;
    {
        let mut scope = ctx.scope();
        scope.set_shadow(ShadowStyle {
            color: style.shadow_color,
            blur: style.shadow_blur,
            offset_x: 0.0,
            offset_y: style.shadow_offset_y,
        });
        scope.set_fill_style_color(style.pill_color);
        scope.begin_path();
        scope.round_rect(&RoundRectParams {
            rect: pill,
            radius: pill.height / 2.0,
        });
        scope.fill();
    }

    let profile_r = style.profile_radius();
    let profile = Circle {
        cx: pill.x + style.padding + profile_r,
        cy: center_y,
        r: profile_r,
    };
    draw_profile(ctx, profile, photo, &style.placeholder);

    let diameter = style.button_diameter();
    let accept = Circle {
        cx: pill.x + pill.width - style.padding - diameter / 2.0,
        cy: center_y,
        r: diameter / 2.0,
    };
    let decline = Circle {
        cx: accept.cx - diameter - style.button_spacing,
        ..accept
    };

    // Both lines share the space between the photo and the decline button.
    let text_x = profile.cx + profile.r + style.text_gap;
    let max_text_width = decline.cx - decline.r - style.text_gap - text_x;
    for (text, text_style, dy) in [
        (request.company_name(), &style.company_text, style.company_dy),
        (request.person_name(), &style.name_text, style.name_dy),
    ] {
        let mut scope = ctx.scope();
        apply_text_style(&mut scope, text_style, TextAlign::Left, TextBaseline::Middle);
        scope.fill_text_max_width(text, text_x, center_y + dy, max_text_width);
    }

    let glyph = TextStyle {
        size_px: diameter * style.icon_scale,
        bold: true,
        color: crate::preset::WHITE,
    };
    let (decline_icon, accept_icon) = match icons {
        ButtonIcons::Glyphs => (
            ButtonIcon::Glyph {
                text: DECLINE_GLYPH,
                style: glyph,
                baseline: TextBaseline::Middle,
                y: center_y,
            },
            ButtonIcon::Glyph {
                text: ACCEPT_GLYPH,
                style: glyph,
                baseline: TextBaseline::Middle,
                y: center_y,
            },
        ),
        ButtonIcons::Bitmaps { decline, accept } => (
            ButtonIcon::Bitmap(decline, style.icon_scale),
            ButtonIcon::Bitmap(accept, style.icon_scale),
        ),
    };
    draw_button(ctx, decline, DECLINE_RED, &decline_icon);
    draw_button(ctx, accept, ACCEPT_GREEN, &accept_icon);
}

fn apply_text_style(
    ctx: &mut Canvas2dContext,
    style: &TextStyle,
    align: TextAlign,
    baseline: TextBaseline,
) {
    let mut font = FontSpec::new(style.size_px).with_families(FONT_FAMILIES.iter().copied());
    if style.bold {
        font = font.bold();
    }
    ctx.set_font(font);
    ctx.set_fill_style_color(style.color);
    ctx.set_text_align(align);
    ctx.set_text_baseline(baseline);
}

/// Destination rectangle that makes an image of `width`×`height` cover the
/// circle's bounding square, centered and with its aspect ratio preserved.
fn cover_fit(width: u32, height: u32, circle: Circle) -> RectParams {
    let diameter = circle.r * 2.0;
    let scale = (diameter / width as f32).max(diameter / height as f32);
    let scaled_width = width as f32 * scale;
    let scaled_height = height as f32 * scale;
    RectParams::new(
        circle.cx - scaled_width / 2.0,
        circle.cy - scaled_height / 2.0,
        scaled_width,
        scaled_height,
    )
}

fn draw_profile(
    ctx: &mut Canvas2dContext,
    circle: Circle,
    photo: Option<&CanvasImage>,
    placeholder: &PlaceholderStyle,
) {
    let mut scope = ctx.scope();
    scope.begin_path();
    scope.arc(&circle.arc());

    match photo {
        Some(image) => {
            scope.clip();
            let dest = cover_fit(image.width(), image.height(), circle);
            scope.draw_image_scaled(image, &dest);
        }
        None => {
            scope.set_fill_style_color(placeholder.fill);
            scope.fill();
            scope.clip();
            draw_silhouette(&mut scope, circle, placeholder.figure);
        }
    }
}

/// Head and shoulders, clipped by the caller to the profile circle.
fn draw_silhouette(ctx: &mut Canvas2dContext, circle: Circle, color: CanvasColor) {
    let Circle { cx, cy, r } = circle;
    ctx.set_fill_style_color(color);

    ctx.begin_path();
    ctx.arc(&ArcParams::circle(cx, cy - 0.25 * r, 0.3 * r));
    ctx.fill();

    ctx.begin_path();
    ctx.arc(&ArcParams {
        x: cx,
        y: cy + 0.75 * r,
        radius: 0.55 * r,
        start_angle: PI,
        end_angle: 2.0 * PI,
        anticlockwise: false,
    });
    ctx.close_path();
    ctx.fill();
}

enum ButtonIcon<'a> {
    Glyph {
        text: &'static str,
        style: TextStyle,
        baseline: TextBaseline,
        y: f32,
    },
    /// Bitmap and its size as a fraction of the button diameter.
    Bitmap(&'a CanvasImage, f32),
}

fn draw_button(ctx: &mut Canvas2dContext, button: Circle, color: CanvasColor, icon: &ButtonIcon) {
    let mut scope = ctx.scope();
    scope.set_fill_style_color(color);
    scope.begin_path();
    scope.arc(&button.arc());
    scope.fill();

    match icon {
        ButtonIcon::Glyph {
            text,
            style,
            baseline,
            y,
        } => {
            apply_text_style(&mut scope, style, TextAlign::Center, *baseline);
            scope.fill_text(text, button.cx, *y);
        }
        ButtonIcon::Bitmap(image, scale) => {
            let size = button.r * 2.0 * scale;
            scope.draw_image_scaled(
                image,
                &RectParams::new(
                    button.cx - size / 2.0,
                    button.cy - size / 2.0,
                    size,
                    size,
                ),
            );
        }
    }
}
