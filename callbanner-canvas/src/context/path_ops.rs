//! Path building operations for Canvas2dContext.
//!
//! Coordinates are added to the path builder as given: the context has no
//! transform, so user space and device space coincide.

use super::Canvas2dContext;
use crate::geometry::{ArcParams, RectParams, RoundRectParams};

/// Kappa for quarter-circle cubic Bezier approximation.
const K: f32 = 0.552_284_8;

impl Canvas2dContext {
    /// Begin a new path.
    pub fn begin_path(&mut self) {
        log::debug!(target: "canvas", "beginPath");
        self.path_builder = tiny_skia::PathBuilder::new();
        self.has_current_point = false;
    }

    /// Move to a point without drawing.
    pub fn move_to(&mut self, x: f32, y: f32) {
        log::debug!(target: "canvas", "moveTo {} {}", x, y);
        self.path_builder.move_to(x, y);
        self.subpath_start_x = x;
        self.subpath_start_y = y;
        self.has_current_point = true;
    }

    /// Draw a line to a point. Without a current point this acts as `move_to`.
    pub fn line_to(&mut self, x: f32, y: f32) {
        log::debug!(target: "canvas", "lineTo {} {}", x, y);
        if !self.has_current_point {
            self.move_to(x, y);
            return;
        }
        self.path_builder.line_to(x, y);
    }

    /// Close the current subpath.
    pub fn close_path(&mut self) {
        log::debug!(target: "canvas", "closePath");
        if self.has_current_point {
            self.path_builder.close();
            self.path_builder
                .move_to(self.subpath_start_x, self.subpath_start_y);
        }
    }

    /// Add a rectangle to the path.
    pub fn rect(&mut self, params: &RectParams) {
        log::debug!(target: "canvas", "rect {} {} {} {}", params.x, params.y, params.width, params.height);
        let RectParams {
            x,
            y,
            width,
            height,
        } = *params;
        self.path_builder.move_to(x, y);
        self.path_builder.line_to(x + width, y);
        self.path_builder.line_to(x + width, y + height);
        self.path_builder.line_to(x, y + height);
        self.path_builder.close();
        self.subpath_start_x = x;
        self.subpath_start_y = y;
        self.has_current_point = true;
    }

    /// Add a rounded rectangle to the path.
    ///
    /// The radius is clamped to half of the shorter side, so a radius of
    /// `height / 2` on a wide rectangle yields a pill.
    pub fn round_rect(&mut self, params: &RoundRectParams) {
        let rect = params.rect;
        log::debug!(target: "canvas", "roundRect {} {} {} {} r={}", rect.x, rect.y, rect.width, rect.height, params.radius);

        // Handle negative dimensions by adjusting position
        let (x, width) = if rect.width < 0.0 {
            (rect.x + rect.width, -rect.width)
        } else {
            (rect.x, rect.width)
        };
        let (y, height) = if rect.height < 0.0 {
            (rect.y + rect.height, -rect.height)
        } else {
            (rect.y, rect.height)
        };

        let r = params.radius.max(0.0).min(width / 2.0).min(height / 2.0);
        if r <= 0.0 || !r.is_finite() {
            self.rect(&RectParams::new(x, y, width, height));
            return;
        }

        let pb = &mut self.path_builder;
        pb.move_to(x + r, y);

        // Top edge and top-right corner
        pb.line_to(x + width - r, y);
        pb.cubic_to(
            x + width - r + r * K,
            y,
            x + width,
            y + r - r * K,
            x + width,
            y + r,
        );

        // Right edge and bottom-right corner
        pb.line_to(x + width, y + height - r);
        pb.cubic_to(
            x + width,
            y + height - r + r * K,
            x + width - r + r * K,
            y + height,
            x + width - r,
            y + height,
        );

        // Bottom edge and bottom-left corner
        pb.line_to(x + r, y + height);
        pb.cubic_to(
            x + r - r * K,
            y + height,
            x,
            y + height - r + r * K,
            x,
            y + height - r,
        );

        // Left edge and top-left corner
        pb.line_to(x, y + r);
        pb.cubic_to(x, y + r - r * K, x + r - r * K, y, x + r, y);
        pb.close();

        self.subpath_start_x = x + r;
        self.subpath_start_y = y;
        self.has_current_point = true;
    }

    /// Add an arc to the path.
    ///
    /// With a current point, a straight line joins it to the arc's start.
    pub fn arc(&mut self, params: &ArcParams) {
        log::debug!(target: "canvas", "arc {} {} r={}", params.x, params.y, params.radius);
        let connect = self.has_current_point;
        crate::arc::arc(&mut self.path_builder, params, connect);

        if params.radius > 0.0 && params.radius.is_finite() && !connect {
            self.subpath_start_x = params.x + params.radius * params.start_angle.cos();
            self.subpath_start_y = params.y + params.radius * params.start_angle.sin();
            self.has_current_point = true;
        }
    }
}
