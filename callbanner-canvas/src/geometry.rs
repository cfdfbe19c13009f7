//! Parameter structs for Canvas 2D drawing operations.
//!
//! These structs replace long positional argument lists with named fields,
//! grouping semantically related parameters together.

use std::f32::consts::PI;

/// Parameters for a circular arc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcParams {
    /// X coordinate of the arc center.
    pub x: f32,
    /// Y coordinate of the arc center.
    pub y: f32,
    /// Radius of the arc.
    pub radius: f32,
    /// Starting angle in radians.
    pub start_angle: f32,
    /// Ending angle in radians.
    pub end_angle: f32,
    /// If true, draw arc counterclockwise.
    pub anticlockwise: bool,
}

impl ArcParams {
    /// A full circle around (x, y).
    pub fn circle(x: f32, y: f32, radius: f32) -> Self {
        Self {
            x,
            y,
            radius,
            start_angle: 0.0,
            end_angle: 2.0 * PI,
            anticlockwise: false,
        }
    }
}

/// Parameters for a rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectParams {
    /// X coordinate of the rectangle origin.
    pub x: f32,
    /// Y coordinate of the rectangle origin.
    pub y: f32,
    /// Width of the rectangle.
    pub width: f32,
    /// Height of the rectangle.
    pub height: f32,
}

impl RectParams {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Parameters for a rounded rectangle with one radius shared by all corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundRectParams {
    /// The outer rectangle.
    pub rect: RectParams,
    /// Corner radius. Clamped to half of the shorter side.
    pub radius: f32,
}

/// A backend-neutral RGBA color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CanvasColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl CanvasColor {
    pub const TRANSPARENT: CanvasColor = CanvasColor::from_rgba8(0, 0, 0, 0);

    /// Create a color from 8-bit RGBA components.
    pub const fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a color from floating-point RGBA components (each in 0.0..=1.0).
    pub fn from_rgba_f32(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            r: (r.clamp(0.0, 1.0) * 255.0).round() as u8,
            g: (g.clamp(0.0, 1.0) * 255.0).round() as u8,
            b: (b.clamp(0.0, 1.0) * 255.0).round() as u8,
            a: (a.clamp(0.0, 1.0) * 255.0).round() as u8,
        }
    }

    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }
}

impl From<CanvasColor> for tiny_skia::Color {
    fn from(c: CanvasColor) -> Self {
        tiny_skia::Color::from_rgba8(c.r, c.g, c.b, c.a)
    }
}

impl From<tiny_skia::Color> for CanvasColor {
    fn from(c: tiny_skia::Color) -> Self {
        CanvasColor::from_rgba_f32(c.red(), c.green(), c.blue(), c.alpha())
    }
}
