//! Gradient types for Canvas 2D operations.

use crate::error::{Canvas2dError, Canvas2dResult};

/// A color stop in a gradient.
#[derive(Debug, Clone)]
pub struct GradientStop {
    /// Offset position (0.0 to 1.0).
    pub offset: f64,
    /// Color at this stop.
    pub color: tiny_skia::Color,
}

/// Linear canvas gradient from (x0, y0) to (x1, y1).
#[derive(Debug, Clone)]
pub struct CanvasGradient {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
    /// Color stops, kept sorted by offset.
    pub stops: Vec<GradientStop>,
}

impl CanvasGradient {
    /// Create a new linear gradient.
    pub fn new_linear(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            x0,
            y0,
            x1,
            y1,
            stops: Vec::new(),
        }
    }

    /// Add a color stop to the gradient.
    pub fn add_color_stop(&mut self, offset: f64, color: tiny_skia::Color) -> Canvas2dResult<()> {
        if !offset.is_finite() || !(0.0..=1.0).contains(&offset) {
            return Err(Canvas2dError::InvalidGradientStop(offset));
        }
        self.stops.push(GradientStop { offset, color });
        // Keep stops sorted by offset
        self.stops.sort_by(|a, b| {
            a.offset
                .partial_cmp(&b.offset)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stops_sorted() {
        let mut gradient = CanvasGradient::new_linear(0.0, 0.0, 0.0, 10.0);
        gradient.add_color_stop(1.0, tiny_skia::Color::WHITE).unwrap();
        gradient.add_color_stop(0.0, tiny_skia::Color::BLACK).unwrap();
        assert_eq!(gradient.stops[0].offset, 0.0);
        assert_eq!(gradient.stops[1].offset, 1.0);
    }

    #[test]
    fn test_invalid_stop_rejected() {
        let mut gradient = CanvasGradient::new_linear(0.0, 0.0, 0.0, 10.0);
        assert!(matches!(
            gradient.add_color_stop(1.5, tiny_skia::Color::WHITE),
            Err(Canvas2dError::InvalidGradientStop(_))
        ));
        assert!(gradient.add_color_stop(f64::NAN, tiny_skia::Color::WHITE).is_err());
        assert!(gradient.stops.is_empty());
    }
}
