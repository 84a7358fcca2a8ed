//! Canvas type definitions: Placement, ZOrder, ElementPatch, HitTarget.

use crate::model::{Element, ElementKind, Endpoint, Handle, Point, Style};

/// Where a newly added element goes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// The element type's default position.
    Default,
    /// Top-left corner at a canvas-space point.
    At(Point),
    /// Dropped from the palette: centred on the point, with drop sizes.
    Drop(Point),
}

/// Direction for bring-forward / send-backward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZOrder {
    Forward,
    Backward,
}

/// Partial update merged into an element by [`super::Canvas::update_element`].
///
/// Fields left as `None` are untouched. For lines, `x`/`y` translate the whole
/// line and `width`/`height` are ignored because the box is derived from the
/// endpoints; use `endpoints` to reshape a line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementPatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub rotation: Option<f64>,
    pub content: Option<String>,
    pub endpoints: Option<(Point, Point)>,
    pub barcode_type: Option<String>,
    pub style: Style,
}

impl ElementPatch {
    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Default::default()
        }
    }

    pub fn size(width: f64, height: f64) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Default::default()
        }
    }

    pub fn rotation(degrees: f64) -> Self {
        Self {
            rotation: Some(degrees),
            ..Default::default()
        }
    }

    pub fn content(text: impl Into<String>) -> Self {
        Self {
            content: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn style(style: Style) -> Self {
        Self {
            style,
            ..Default::default()
        }
    }

    pub(crate) fn apply(&self, element: &mut Element) {
        if element.is_line() {
            let dx = self.x.map_or(0.0, |x| x - element.x);
            let dy = self.y.map_or(0.0, |y| y - element.y);
            if dx != 0.0 || dy != 0.0 {
                element.translate(dx, dy);
            }
            if let Some((start, end)) = self.endpoints {
                element.set_line_endpoints(start, end);
            }
        } else {
            if let Some(x) = self.x {
                element.x = x;
            }
            if let Some(y) = self.y {
                element.y = y;
            }
            if let Some(width) = self.width {
                element.width = width;
            }
            if let Some(height) = self.height {
                element.height = height;
            }
            if self.width.is_some() || self.height.is_some() {
                element.sync_table_cells();
            }
        }
        if let Some(rotation) = self.rotation {
            element.rotation = rotation;
        }
        if let Some(content) = &self.content {
            element.set_content(content.clone());
        }
        if let (Some(kind), ElementKind::Barcode(barcode)) = (&self.barcode_type, &mut element.kind)
        {
            barcode.barcode_type = kind.clone();
        }
        element.style.merge(&self.style);
    }
}

/// What a canvas-space point lands on, in pointer-down priority order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HitTarget {
    Empty,
    Body(String),
    ResizeHandle(String, Handle),
    RotateHandle(String),
    LineEndpoint(String, Endpoint),
}

impl HitTarget {
    pub fn element_id(&self) -> Option<&str> {
        match self {
            HitTarget::Empty => None,
            HitTarget::Body(id)
            | HitTarget::ResizeHandle(id, _)
            | HitTarget::RotateHandle(id)
            | HitTarget::LineEndpoint(id, _) => Some(id),
        }
    }
}
