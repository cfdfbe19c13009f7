//! Drop shadow style and the blur used to soften it.
//!
//! tiny-skia has no shadow support. A shadow is rendered by filling the
//! shape into an offscreen pixmap with the shadow color, offsetting it,
//! blurring it, and compositing the result below the shape.

use crate::geometry::CanvasColor;
use tiny_skia::Pixmap;

/// Shadow settings that are part of the drawing state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowStyle {
    /// Shadow color. Transparent disables the shadow.
    pub color: CanvasColor,
    /// Blur amount in pixels (Canvas `shadowBlur`; sigma is half of this).
    pub blur: f32,
    /// Horizontal offset in pixels.
    pub offset_x: f32,
    /// Vertical offset in pixels.
    pub offset_y: f32,
}

impl Default for ShadowStyle {
    fn default() -> Self {
        Self {
            color: CanvasColor::TRANSPARENT,
            blur: 0.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}

impl ShadowStyle {
    /// Whether drawing with this style produces any visible shadow.
    pub fn is_visible(&self) -> bool {
        !self.color.is_transparent()
            && (self.blur > 0.0 || self.offset_x != 0.0 || self.offset_y != 0.0)
    }
}

/// Blur a premultiplied pixmap in place, approximating a gaussian with
/// three successive box blurs.
pub(crate) fn blur_pixmap(pixmap: &mut Pixmap, blur: f32) {
    let sigma = blur / 2.0;
    if !sigma.is_finite() || sigma < 0.5 {
        return;
    }

    let width = pixmap.width() as usize;
    let height = pixmap.height() as usize;
    let data = pixmap.data_mut();
    let mut scratch = vec![0u8; data.len()];

    for size in box_sizes(sigma, 3) {
        let radius = (size - 1) / 2;
        box_blur_horizontal(data, &mut scratch, width, height, radius);
        box_blur_vertical(&scratch, data, width, height, radius);
    }
}

/// Box widths whose successive application approximates a gaussian of `sigma`.
fn box_sizes(sigma: f32, n: usize) -> Vec<usize> {
    let n_f = n as f32;
    let w_ideal = (12.0 * sigma * sigma / n_f + 1.0).sqrt();
    let mut wl = w_ideal.floor() as usize;
    if wl % 2 == 0 {
        wl = wl.saturating_sub(1);
    }
    let wl = wl.max(1);
    let wu = wl + 2;
    let wl_f = wl as f32;

    let m_ideal = (12.0 * sigma * sigma - n_f * wl_f * wl_f - 4.0 * n_f * wl_f - 3.0 * n_f)
        / (-4.0 * wl_f - 4.0);
    let m = m_ideal.round().max(0.0) as usize;

    (0..n).map(|i| if i < m { wl } else { wu }).collect()
}

fn box_blur_horizontal(src: &[u8], dst: &mut [u8], width: usize, height: usize, radius: usize) {
    let div = (2 * radius + 1) as u32;
    for y in 0..height {
        let row = y * width * 4;
        for c in 0..4 {
            let at = |x: usize| src[row + x * 4 + c] as u32;
            let mut sum: u32 = (0..=radius.min(width - 1)).map(at).sum();
            for x in 0..width {
                dst[row + x * 4 + c] = ((sum + div / 2) / div) as u8;
                let incoming = x + radius + 1;
                if incoming < width {
                    sum += at(incoming);
                }
                if x >= radius {
                    sum -= at(x - radius);
                }
            }
        }
    }
}

fn box_blur_vertical(src: &[u8], dst: &mut [u8], width: usize, height: usize, radius: usize) {
    let div = (2 * radius + 1) as u32;
    let stride = width * 4;
    for x in 0..width {
        for c in 0..4 {
            let at = |y: usize| src[y * stride + x * 4 + c] as u32;
            let mut sum: u32 = (0..=radius.min(height - 1)).map(at).sum();
            for y in 0..height {
                dst[y * stride + x * 4 + c] = ((sum + div / 2) / div) as u8;
                let incoming = y + radius + 1;
                if incoming < height {
                    sum += at(incoming);
                }
                if y >= radius {
                    sum -= at(y - radius);
                }
            }
        }
    }
}
