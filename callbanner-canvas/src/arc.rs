//! Arc operations using bezier curve approximation.
//!
//! tiny-skia does not support arc primitives directly, so arcs are flattened
//! into cubic bezier segments with kurbo.

use crate::geometry::ArcParams;
use kurbo::{Point, Vec2};
use std::f64::consts::TAU;
use tiny_skia::PathBuilder;

/// Tolerance used by kurbo when subdividing arcs into cubics.
const ARC_TOLERANCE: f64 = 0.1;

/// Compute the canvas sweep (signed) from start/end angles.
///
/// Follows Canvas 2D semantics: a clockwise arc whose span reaches a full
/// turn draws a full circle, otherwise the end angle is normalized into
/// `(start, start + 2π]` (or the mirrored range when anticlockwise).
fn sweep_angle(params: &ArcParams) -> f64 {
    let start = params.start_angle as f64;
    let end = params.end_angle as f64;
    if !params.anticlockwise {
        if end - start >= TAU {
            return TAU;
        }
        let mut sweep = (end - start) % TAU;
        if sweep < 0.0 {
            sweep += TAU;
        }
        sweep
    } else {
        if start - end >= TAU {
            return -TAU;
        }
        let mut sweep = (start - end) % TAU;
        if sweep < 0.0 {
            sweep += TAU;
        }
        -sweep
    }
}

/// Append an arc to `path`.
///
/// When `connect` is true the arc starts with a `line_to` from the current
/// point, otherwise it begins a new subpath.
pub fn arc(path: &mut PathBuilder, params: &ArcParams, connect: bool) {
    if params.radius <= 0.0 || !params.radius.is_finite() {
        return;
    }

    let arc = kurbo::Arc {
        center: Point::new(params.x as f64, params.y as f64),
        radii: Vec2::new(params.radius as f64, params.radius as f64),
        start_angle: params.start_angle as f64,
        sweep_angle: sweep_angle(params),
        x_rotation: 0.0,
    };

    let start = arc.center
        + Vec2::new(
            arc.radii.x * arc.start_angle.cos(),
            arc.radii.y * arc.start_angle.sin(),
        );
    if connect {
        path.line_to(start.x as f32, start.y as f32);
    } else {
        path.move_to(start.x as f32, start.y as f32);
    }

    arc.to_cubic_beziers(ARC_TOLERANCE, |p1, p2, p| {
        path.cubic_to(
            p1.x as f32,
            p1.y as f32,
            p2.x as f32,
            p2.y as f32,
            p.x as f32,
            p.y as f32,
        );
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_arc_full_circle() {
        let mut builder = PathBuilder::new();
        arc(&mut builder, &ArcParams::circle(50.0, 50.0, 50.0), false);
        let path = builder.finish().unwrap();
        let bounds = path.bounds();
        assert!((bounds.left() - 0.0).abs() < 0.5);
        assert!((bounds.right() - 100.0).abs() < 0.5);
        assert!((bounds.top() - 0.0).abs() < 0.5);
        assert!((bounds.bottom() - 100.0).abs() < 0.5);
    }

    #[test]
    fn test_arc_quarter_circle() {
        let mut builder = PathBuilder::new();
        let params = ArcParams {
            x: 50.0,
            y: 50.0,
            radius: 50.0,
            start_angle: 0.0,
            end_angle: PI / 2.0,
            anticlockwise: false,
        };
        arc(&mut builder, &params, false);
        let path = builder.finish().unwrap();
        let bounds = path.bounds();
        // Quarter from 3 o'clock to 6 o'clock stays in the lower right quadrant
        assert!(bounds.left() >= 49.5);
        assert!(bounds.top() >= 49.5);
    }

    #[test]
    fn test_zero_radius_is_noop() {
        let mut builder = PathBuilder::new();
        arc(&mut builder, &ArcParams::circle(10.0, 10.0, 0.0), false);
        assert!(builder.finish().is_none());
    }

    #[test]
    fn test_sweep_normalization() {
        let half = ArcParams {
            x: 0.0,
            y: 0.0,
            radius: 1.0,
            start_angle: PI,
            end_angle: 2.0 * PI,
            anticlockwise: false,
        };
        assert!((sweep_angle(&half) - std::f64::consts::PI).abs() < 1e-5);

        let backwards = ArcParams {
            anticlockwise: true,
            ..half
        };
        assert!((sweep_angle(&backwards) + std::f64::consts::PI).abs() < 1e-5);

        let full = ArcParams::circle(0.0, 0.0, 1.0);
        assert_eq!(sweep_angle(&full), TAU);
    }
}
