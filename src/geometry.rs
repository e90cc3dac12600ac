//! Geometry helpers the renderer needs to draw edges between node boxes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::Position;

/// Node box size the editor draws with (the layout engine's box is smaller).
pub const RENDER_NODE_WIDTH: f64 = 180.0;
pub const RENDER_NODE_HEIGHT: f64 = 100.0;

/// Fraction of the dominant-axis delta used to offset curve control points.
pub const CURVE_FACTOR: f64 = 0.3;

// ─── Point ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<Position> for Point {
    fn from(p: Position) -> Self {
        Self { x: p.x, y: p.y }
    }
}

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    (b.x - a.x).hypot(b.y - a.y)
}

// ─── Connection points ───────────────────────────────────────────────────────

/// Which port of a node box an edge attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Left edge; incoming connections land here.
    Input,
    /// Right edge; outgoing connections leave from here.
    Output,
}

/// Midpoint of the left (input) or right (output) edge of a node box whose
/// top-left corner is `position`.
pub fn connection_point(position: Position, side: Side, width: f64, height: f64) -> Point {
    let center_y = position.y + height / 2.0;
    match side {
        Side::Input => Point::new(position.x, center_y),
        Side::Output => Point::new(position.x + width, center_y),
    }
}

// ─── Edge curves ─────────────────────────────────────────────────────────────

/// Cubic Bézier segment. `Display` renders it as an SVG path
/// (`M sx sy C c1x c1y, c2x c2y, tx ty`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubicCurve {
    pub start: Point,
    pub control1: Point,
    pub control2: Point,
    pub end: Point,
}

impl fmt::Display for CubicCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "M {} {} C {} {}, {} {}, {} {}",
            self.start.x,
            self.start.y,
            self.control1.x,
            self.control1.y,
            self.control2.x,
            self.control2.y,
            self.end.x,
            self.end.y
        )
    }
}

/// Smooth curve from `source` to `target`.
///
/// Control points sit `CURVE_FACTOR` of the way in from each end along the
/// axis with the larger delta and keep the endpoint's coordinate on the other
/// axis, so the curve leaves and enters its ports head-on.
pub fn edge_path(source: Point, target: Point) -> CubicCurve {
    let dx = target.x - source.x;
    let dy = target.y - source.y;

    let (control1, control2) = if dx.abs() > dy.abs() {
        (
            Point::new(source.x + dx * CURVE_FACTOR, source.y),
            Point::new(target.x - dx * CURVE_FACTOR, target.y),
        )
    } else {
        (
            Point::new(source.x, source.y + dy * CURVE_FACTOR),
            Point::new(target.x, target.y - dy * CURVE_FACTOR),
        )
    };

    CubicCurve {
        start: source,
        control1,
        control2,
        end: target,
    }
}

#[cfg(test)]
#[path = "../tests/rust/test_geometry.rs"]
mod tests;
