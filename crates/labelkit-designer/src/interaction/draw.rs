//! Draw-to-create gestures: anchor on press, live preview while moving,
//! element (or nothing) on release.

use labelkit_core::constants::{
    DEFAULT_BARCODE_CONTENT, LINE_SNAP_RADIANS, MIN_BARCODE_DRAW_HEIGHT, MIN_BARCODE_DRAW_WIDTH,
    MIN_LINE_LENGTH, MIN_SHAPE_DRAW_SIZE, MIN_TEXT_DRAW_HEIGHT, MIN_TEXT_DRAW_WIDTH,
};

use crate::model::{BarcodeData, Element, ElementKind, Point, Rect, ShapeKind, Style};

/// An in-progress draw gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawGesture {
    pub anchor: Point,
    pub current: Point,
    /// Snap modifier held during the last update.
    pub snap: bool,
}

impl DrawGesture {
    pub fn new(anchor: Point) -> Self {
        Self {
            anchor,
            current: anchor,
            snap: false,
        }
    }

    pub fn update(&mut self, current: Point, snap: bool) {
        self.current = current;
        self.snap = snap;
    }

    /// Box spanned by anchor and pointer.
    pub fn rect(&self) -> Rect {
        Rect::from_points(self.anchor, self.current)
    }

    /// End of a line gesture; with the snap modifier the angle is rounded to
    /// a multiple of 45 degrees, keeping the length.
    pub fn line_end(&self) -> Point {
        if !self.snap {
            return self.current;
        }
        let dx = self.current.x - self.anchor.x;
        let dy = self.current.y - self.anchor.y;
        let angle = (dy.atan2(dx) / LINE_SNAP_RADIANS).round() * LINE_SNAP_RADIANS;
        let length = (dx * dx + dy * dy).sqrt();
        Point::new(
            self.anchor.x + length * angle.cos(),
            self.anchor.y + length * angle.sin(),
        )
    }
}

/// Text box from a gesture. Tiny drags give a default 120x30 box at the
/// anchor; otherwise the box is at least 30x20.
pub fn finish_text(gesture: &DrawGesture) -> Element {
    let r = gesture.rect();
    let bounds = if r.width < MIN_TEXT_DRAW_WIDTH || r.height < MIN_TEXT_DRAW_HEIGHT {
        Rect::new(gesture.anchor.x, gesture.anchor.y, 120.0, 30.0)
    } else {
        Rect::new(r.x, r.y, r.width.max(30.0), r.height.max(20.0))
    };
    let mut style = Style::text_defaults();
    style.lock_aspect_ratio = None;
    Element::new(
        "",
        ElementKind::Text {
            content: String::new(),
        },
        bounds,
        style,
    )
}

/// Line from a gesture, or `None` when shorter than 5px.
pub fn finish_line(gesture: &DrawGesture) -> Option<Element> {
    let end = gesture.line_end();
    if gesture.anchor.distance_to(&end) < MIN_LINE_LENGTH {
        return None;
    }
    Some(Element::line("", gesture.anchor, end, Style::line_defaults()))
}

/// Barcode from a gesture, or `None` below 50x30. At least 100x50.
pub fn finish_barcode(gesture: &DrawGesture, barcode_type: &str) -> Option<Element> {
    let r = gesture.rect();
    if r.width < MIN_BARCODE_DRAW_WIDTH || r.height < MIN_BARCODE_DRAW_HEIGHT {
        return None;
    }
    let style = Style {
        color: Some("#000000".into()),
        background_color: Some("#ffffff".into()),
        border_width: Some(0.0),
        border_color: Some("#000000".into()),
        border_style: Some("solid".into()),
        font_size: Some(14.0),
        font_family: Some("Arial".into()),
        ..Default::default()
    };
    Some(Element::new(
        "",
        ElementKind::Barcode(BarcodeData {
            content: DEFAULT_BARCODE_CONTENT.to_string(),
            barcode_type: barcode_type.to_string(),
            barcode_width: None,
            barcode_bar_height: None,
            show_barcode_text: None,
        }),
        Rect::new(r.x, r.y, r.width.max(100.0), r.height.max(50.0)),
        style,
    ))
}

/// Rectangle or circle from a gesture, or `None` when either side is under
/// 20px. At least 30x30.
pub fn finish_shape(gesture: &DrawGesture, shape: ShapeKind) -> Option<Element> {
    let r = gesture.rect();
    if r.width < MIN_SHAPE_DRAW_SIZE || r.height < MIN_SHAPE_DRAW_SIZE {
        return None;
    }
    let mut style = Style::shape_defaults();
    let kind = match shape {
        ShapeKind::Rectangle => ElementKind::Rectangle,
        ShapeKind::Circle => {
            style.border_radius = None;
            ElementKind::Circle
        }
    };
    Some(Element::new(
        "",
        kind,
        Rect::new(r.x, r.y, r.width.max(30.0), r.height.max(30.0)),
        style,
    ))
}
