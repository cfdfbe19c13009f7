//! Image drawing, pixel data, and PNG output operations for Canvas2dContext.

use super::Canvas2dContext;
use crate::error::{Canvas2dError, Canvas2dResult};
use crate::geometry::RectParams;
use tiny_skia::{Pixmap, Transform};

/// A raster image that can be drawn onto a canvas.
///
/// Pixels are held premultiplied, ready for compositing.
#[derive(Clone)]
pub struct CanvasImage {
    pixmap: Pixmap,
}

impl CanvasImage {
    /// Build an image from straight-alpha RGBA8 pixels (4 bytes per pixel).
    pub fn from_rgba(width: u32, height: u32, data: &[u8]) -> Canvas2dResult<Self> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(Canvas2dError::InvalidImageData {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        let mut pixmap =
            Pixmap::new(width, height).ok_or(Canvas2dError::InvalidDimensions { width, height })?;

        for (dst, src) in pixmap.data_mut().chunks_exact_mut(4).zip(data.chunks_exact(4)) {
            let a = src[3];
            if a == 255 {
                dst.copy_from_slice(src);
            } else {
                let alpha = a as u16;
                dst[0] = ((src[0] as u16 * alpha + 127) / 255) as u8;
                dst[1] = ((src[1] as u16 * alpha + 127) / 255) as u8;
                dst[2] = ((src[2] as u16 * alpha + 127) / 255) as u8;
                dst[3] = a;
            }
        }

        Ok(Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }
}

impl std::fmt::Debug for CanvasImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CanvasImage")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

impl Canvas2dContext {
    /// Draw `image` scaled into the destination rectangle.
    ///
    /// Parts of the image that fall outside the current clip are discarded.
    pub fn draw_image_scaled(&mut self, image: &CanvasImage, dest: &RectParams) {
        log::debug!(
            target: "canvas",
            "drawImage {}x{} into {} {} {} {}",
            image.width(), image.height(), dest.x, dest.y, dest.width, dest.height
        );
        let paint = tiny_skia::PixmapPaint {
            quality: tiny_skia::FilterQuality::Bilinear,
            ..Default::default()
        };

        let scale_x = dest.width / image.width() as f32;
        let scale_y = dest.height / image.height() as f32;
        let transform = Transform::from_translate(dest.x, dest.y).pre_scale(scale_x, scale_y);

        let clip_mask = self.create_clip_mask();
        self.pixmap.draw_pixmap(
            0,
            0,
            image.pixmap.as_ref(),
            &paint,
            transform,
            clip_mask.as_ref(),
        );
    }

    /// Get the whole canvas as straight-alpha RGBA8 pixels.
    pub fn get_image_data(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(self.pixmap.data().len());

        for pixel in self.pixmap.data().chunks_exact(4) {
            // Convert from premultiplied alpha to straight alpha
            let a = pixel[3];
            match a {
                0 => data.extend_from_slice(&[0, 0, 0, 0]),
                255 => data.extend_from_slice(pixel),
                _ => {
                    let alpha_f = a as f32 / 255.0;
                    data.push((pixel[0] as f32 / alpha_f).round().min(255.0) as u8);
                    data.push((pixel[1] as f32 / alpha_f).round().min(255.0) as u8);
                    data.push((pixel[2] as f32 / alpha_f).round().min(255.0) as u8);
                    data.push(a);
                }
            }
        }

        data
    }

    /// Export the canvas as PNG data.
    ///
    /// # Arguments
    /// * `ppi` - Optional pixels per inch for PNG metadata. Defaults to 72 if not specified.
    pub fn to_png(&self, ppi: Option<f32>) -> Canvas2dResult<Vec<u8>> {
        let ppi = ppi.unwrap_or(72.0);

        let mut buf = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut buf, self.width, self.height);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);

            // Set pixel density metadata (pixels per meter)
            let ppm = (ppi.max(0.0) / 0.0254).round() as u32;
            encoder.set_pixel_dims(Some(png::PixelDimensions {
                xppu: ppm,
                yppu: ppm,
                unit: png::Unit::Meter,
            }));

            let mut writer = encoder.write_header()?;

            // Convert from premultiplied to straight alpha for PNG
            let data = self.get_image_data();
            writer.write_image_data(&data)?;
        }
        log::debug!(target: "canvas", "encoded png {}x{} ({} bytes)", self.width, self.height, buf.len());
        Ok(buf)
    }
}
