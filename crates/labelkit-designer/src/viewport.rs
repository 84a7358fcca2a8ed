//! Viewport and coordinate transformation for the design canvas.
//!
//! Converts between viewport coordinates (pointer positions inside the
//! scrollable container) and canvas space (label pixels from the label's
//! top-left corner). Canvas space never depends on zoom or scroll; only this
//! transform does.

use std::fmt;

use labelkit_core::constants::{
    DEFAULT_ZOOM, FIT_MARGIN, FIT_MAX_RATIO, FIT_MAX_ZOOM, FIT_MIN_ZOOM, MAX_ZOOM, MIN_ZOOM,
    RULER_SIZE, ZOOM_STEP,
};

use crate::model::Point;

/// Zoom percentage that fits a canvas into a container.
///
/// The available area is the container minus the rulers and a fixed margin.
/// The ratio is capped at 4.0, floored to a whole percent and clamped to the
/// auto-fit range.
pub fn fit_zoom(
    container_width: f64,
    container_height: f64,
    canvas_width: f64,
    canvas_height: f64,
) -> f64 {
    if canvas_width <= 0.0 || canvas_height <= 0.0 {
        return DEFAULT_ZOOM;
    }
    let avail_w = container_width - RULER_SIZE - FIT_MARGIN;
    let avail_h = container_height - RULER_SIZE - FIT_MARGIN;
    let ratio = (avail_w / canvas_width)
        .min(avail_h / canvas_height)
        .min(FIT_MAX_RATIO);
    (ratio * 100.0).floor().clamp(FIT_MIN_ZOOM, FIT_MAX_ZOOM)
}

/// Zoom and scroll state of the canvas view.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    /// Zoom in percent.
    zoom: f64,
    /// Viewport position of the canvas origin.
    origin_x: f64,
    origin_y: f64,
    container_width: f64,
    container_height: f64,
    /// Time (ms) at which a requested refit becomes due.
    fit_due_at: Option<u64>,
}

impl Viewport {
    pub fn new(container_width: f64, container_height: f64) -> Self {
        Self {
            zoom: DEFAULT_ZOOM,
            origin_x: RULER_SIZE,
            origin_y: RULER_SIZE,
            container_width,
            container_height,
            fit_due_at: None,
        }
    }

    /// Gets the current zoom level in percent.
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Canvas-to-viewport scale factor (1.0 = 100%).
    pub fn scale(&self) -> f64 {
        self.zoom / 100.0
    }

    /// Sets the zoom level, clamped to [10, 400].
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_finite() {
            self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        }
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom + ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom - ZOOM_STEP);
    }

    pub fn reset_zoom(&mut self) {
        self.zoom = DEFAULT_ZOOM;
    }

    pub fn origin(&self) -> (f64, f64) {
        (self.origin_x, self.origin_y)
    }

    /// Sets the viewport position of the canvas origin.
    pub fn set_origin(&mut self, x: f64, y: f64) {
        self.origin_x = x;
        self.origin_y = y;
    }

    /// Scrolls the view; positive deltas move the content left/up.
    pub fn scroll_by(&mut self, dx: f64, dy: f64) {
        self.origin_x -= dx;
        self.origin_y -= dy;
    }

    pub fn container_size(&self) -> (f64, f64) {
        (self.container_width, self.container_height)
    }

    /// Records a container resize and schedules a debounced refit.
    pub fn set_container_size(&mut self, width: f64, height: f64, now_ms: u64, delay_ms: u64) {
        self.container_width = width;
        self.container_height = height;
        self.request_fit(now_ms, delay_ms);
    }

    /// Converts viewport coordinates to canvas space.
    ///
    /// ```text
    /// canvas_x = (viewport_x - origin_x) / (zoom / 100)
    /// canvas_y = (viewport_y - origin_y) / (zoom / 100)
    /// ```
    pub fn to_canvas(&self, vx: f64, vy: f64) -> Point {
        let scale = self.scale();
        Point::new((vx - self.origin_x) / scale, (vy - self.origin_y) / scale)
    }

    /// Converts canvas space to viewport coordinates.
    pub fn to_viewport(&self, p: Point) -> (f64, f64) {
        let scale = self.scale();
        (p.x * scale + self.origin_x, p.y * scale + self.origin_y)
    }

    /// Zooms while keeping a canvas point at the same viewport position.
    pub fn zoom_to_point(&mut self, canvas_point: Point, new_zoom: f64) {
        let (vx, vy) = self.to_viewport(canvas_point);
        self.set_zoom(new_zoom);
        let scale = self.scale();
        self.origin_x = vx - canvas_point.x * scale;
        self.origin_y = vy - canvas_point.y * scale;
    }

    /// Canvas point currently under the centre of the container.
    pub fn center_point(&self) -> Point {
        self.to_canvas(self.container_width / 2.0, self.container_height / 2.0)
    }

    /// Applies the auto-fit zoom for a canvas, keeping the centre point fixed.
    pub fn fit(&mut self, canvas_width: f64, canvas_height: f64) {
        let zoom = fit_zoom(
            self.container_width,
            self.container_height,
            canvas_width,
            canvas_height,
        );
        let center = self.center_point();
        self.zoom_to_point(center, zoom);
        self.fit_due_at = None;
        tracing::debug!("Auto-fit zoom {}%", zoom);
    }

    /// Schedules a refit `delay_ms` from `now_ms`. A later request replaces
    /// an earlier pending one.
    pub fn request_fit(&mut self, now_ms: u64, delay_ms: u64) {
        self.fit_due_at = Some(now_ms.saturating_add(delay_ms));
    }

    pub fn fit_pending(&self) -> bool {
        self.fit_due_at.is_some()
    }

    /// Runs a pending refit if it is due. Returns whether a fit happened.
    pub fn poll_fit(&mut self, now_ms: u64, canvas_width: f64, canvas_height: f64) -> bool {
        match self.fit_due_at {
            Some(due) if now_ms >= due => {
                self.fit(canvas_width, canvas_height);
                true
            }
            _ => false,
        }
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Zoom: {:.0}% | Origin: ({:.1}, {:.1})",
            self.zoom, self.origin_x, self.origin_y
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1200.0, 800.0)
    }
}
