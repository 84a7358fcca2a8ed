//! Geometry of the manipulation gestures: drag, resize, rotate and line
//! endpoint editing. All functions are pure and work in canvas space from a
//! baseline captured at pointer-down.

use labelkit_core::constants::MIN_ELEMENT_SIZE;

use crate::canvas::clamp_into;
use crate::model::{Element, Endpoint, Handle, LineData, Point};

/// Moves `baseline` by `(dx, dy)`, keeping its box inside the canvas.
pub fn drag(baseline: &Element, dx: f64, dy: f64, canvas_w: f64, canvas_h: f64) -> Element {
    let mut element = baseline.clone();
    let x = clamp_into(baseline.x + dx, canvas_w - baseline.width);
    let y = clamp_into(baseline.y + dy, canvas_h - baseline.height);
    element.translate(x - baseline.x, y - baseline.y);
    element
}

/// Resizes `baseline` from one handle.
///
/// The edge opposite the handle stays pinned, moving edges stop at the canvas
/// border, and neither side shrinks below 20px. Tables get their cell size
/// recomputed from the new box.
pub fn resize(
    baseline: &Element,
    handle: Handle,
    dx: f64,
    dy: f64,
    canvas_w: f64,
    canvas_h: f64,
) -> Element {
    let mut element = baseline.clone();

    if handle.moves_east() {
        element.width = (baseline.width + dx)
            .min(canvas_w - baseline.x)
            .max(MIN_ELEMENT_SIZE);
    } else if handle.moves_west() {
        let right = baseline.x + baseline.width;
        element.x = clamp_into(baseline.x + dx, right - MIN_ELEMENT_SIZE);
        element.width = (right - element.x).max(MIN_ELEMENT_SIZE);
    }

    if handle.moves_south() {
        element.height = (baseline.height + dy)
            .min(canvas_h - baseline.y)
            .max(MIN_ELEMENT_SIZE);
    } else if handle.moves_north() {
        let bottom = baseline.y + baseline.height;
        element.y = clamp_into(baseline.y + dy, bottom - MIN_ELEMENT_SIZE);
        element.height = (bottom - element.y).max(MIN_ELEMENT_SIZE);
    }

    element.sync_table_cells();
    element
}

/// Angle of `p` around `center` in degrees.
pub fn angle_about(center: Point, p: Point) -> f64 {
    (p.y - center.y).atan2(p.x - center.x).to_degrees()
}

/// Rotation after the pointer moved around the element centre.
///
/// With `snap_step`, the result is rounded to the nearest multiple.
pub fn rotate(
    start_rotation: f64,
    start_angle: f64,
    center: Point,
    p: Point,
    snap_step: Option<f64>,
) -> f64 {
    let rotation = start_rotation + (angle_about(center, p) - start_angle);
    match snap_step {
        Some(step) if step > 0.0 => (rotation / step).round() * step,
        _ => rotation,
    }
}

/// Moves one endpoint of a line, clamped to the canvas. Returns the new
/// `(start, end)` pair.
pub fn move_endpoint(
    baseline: &LineData,
    endpoint: Endpoint,
    dx: f64,
    dy: f64,
    canvas_w: f64,
    canvas_h: f64,
) -> (Point, Point) {
    let moved = |p: Point| {
        Point::new(clamp_into(p.x + dx, canvas_w), clamp_into(p.y + dy, canvas_h))
    };
    match endpoint {
        Endpoint::Start => (moved(baseline.start()), baseline.end()),
        Endpoint::End => (baseline.start(), moved(baseline.end())),
    }
}
