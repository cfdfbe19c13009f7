//! Integration tests for callbanner-canvas.

use callbanner_canvas::{
    ArcParams, Canvas2dContext, CanvasColor, CanvasImage, FontConfig, FontSpec, RectParams,
    ResolvedFontConfig, RoundRectParams, ShadowStyle, TextAlign, TextBaseline,
};
use rstest::rstest;

fn no_fonts() -> ResolvedFontConfig {
    FontConfig {
        load_system_fonts: false,
        ..FontConfig::default()
    }
    .resolve()
}

fn pixel(data: &[u8], width: u32, x: u32, y: u32) -> [u8; 4] {
    let idx = ((y * width + x) * 4) as usize;
    [data[idx], data[idx + 1], data[idx + 2], data[idx + 3]]
}

/// A pill with a shadow, a clipped photo and two buttons, decoded back from PNG.
#[test]
fn test_banner_like_scene_round_trips_through_png() {
    let mut ctx = Canvas2dContext::with_resolved(300, 100, &no_fonts()).unwrap();

    {
        let mut scope = ctx.scope();
        scope.set_shadow(ShadowStyle {
            color: CanvasColor::from_rgba8(0, 0, 0, 77),
            blur: 20.0,
            offset_x: 0.0,
            offset_y: 8.0,
        });
        scope.set_fill_style("#000000").unwrap();
        scope.begin_path();
        scope.round_rect(&RoundRectParams {
            rect: RectParams::new(10.0, 10.0, 280.0, 70.0),
            radius: 35.0,
        });
        scope.fill();
    }

    let photo = CanvasImage::from_rgba(1, 1, &[0, 0, 255, 255]).unwrap();
    {
        let mut scope = ctx.scope();
        scope.begin_path();
        scope.arc(&ArcParams::circle(50.0, 45.0, 25.0));
        scope.clip();
        scope.draw_image_scaled(&photo, &RectParams::new(25.0, 20.0, 50.0, 50.0));
    }

    for (x, color) in [(200.0, "#ff3b30"), (250.0, "#34c759")] {
        let mut scope = ctx.scope();
        scope.set_fill_style(color).unwrap();
        scope.begin_path();
        scope.arc(&ArcParams::circle(x, 45.0, 20.0));
        scope.fill();
    }

    let png_data = ctx.to_png(None).unwrap();
    let decoded = image::load_from_memory(&png_data).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (300, 100));
    let data = decoded.into_raw();

    assert_eq!(pixel(&data, 300, 50, 45), [0, 0, 255, 255]);
    assert_eq!(pixel(&data, 300, 200, 45), [255, 59, 48, 255]);
    assert_eq!(pixel(&data, 300, 250, 45), [52, 199, 89, 255]);
    assert_eq!(pixel(&data, 300, 120, 45), [0, 0, 0, 255]);
    assert_eq!(pixel(&data, 300, 1, 1)[3], 0);
}

#[rstest]
#[case(1080, 1920)]
#[case(1000, 200)]
#[case(1200, 400)]
#[case(900, 200)]
fn test_png_has_canvas_dimensions(#[case] width: u32, #[case] height: u32) {
    let ctx = Canvas2dContext::with_resolved(width, height, &no_fonts()).unwrap();
    let png_data = ctx.to_png(Some(144.0)).unwrap();
    let decoded = image::load_from_memory(&png_data).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (width, height));
}

/// Text rendering needs real fonts; the test only asserts when the host has some.
#[test]
fn test_text_with_system_fonts() {
    let fonts = FontConfig::default().resolve();
    if fonts.face_count() == 0 {
        return;
    }
    let mut ctx = Canvas2dContext::with_resolved(400, 100, &fonts).unwrap();
    ctx.set_font(FontSpec::new(48.0).bold());
    let wide = ctx.measure_text("Jane Appleseed");
    assert!(wide.width > 0.0);

    ctx.set_fill_style("#ffffff").unwrap();
    ctx.set_text_align(TextAlign::Left);
    ctx.set_text_baseline(TextBaseline::Middle);
    ctx.fill_text_max_width("Jane Appleseed", 0.0, 50.0, 100.0);

    // Max-width fitting keeps every glyph left of the limit.
    let data = ctx.get_image_data();
    for y in 0..100 {
        for x in 110..400 {
            assert_eq!(pixel(&data, 400, x, y)[3], 0, "ink at ({x}, {y})");
        }
    }
    assert!(data.chunks_exact(4).any(|p| p[3] > 0));
}
