//! Geometry primitives and the label element model.
//!
//! Everything here lives in canvas space: pixels at 96 dpi measured from the
//! label's top-left corner, +Y pointing down.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

mod element;
mod style;

pub use element::{BarcodeData, Element, ElementKind, ImageData, LineData, TableData};
pub use style::Style;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn offset(&self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

/// Axis-aligned rectangle given by its top-left corner and size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Smallest rectangle containing both points.
    pub fn from_points(a: Point, b: Point) -> Self {
        let x = a.x.min(b.x);
        let y = a.y.min(b.y);
        Self::new(x, y, (a.x - b.x).abs(), (a.y - b.y).abs())
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }
}

/// Rotates `p` about `center` by `degrees` (clockwise on screen, +Y down).
pub fn rotate_point(p: Point, center: Point, degrees: f64) -> Point {
    let (sin, cos) = degrees.to_radians().sin_cos();
    let dx = p.x - center.x;
    let dy = p.y - center.y;
    Point::new(
        center.x + dx * cos - dy * sin,
        center.y + dx * sin + dy * cos,
    )
}

/// Normalizes an angle in degrees to `[0, 360)` for display.
pub fn normalize_degrees(degrees: f64) -> f64 {
    degrees.rem_euclid(360.0)
}

/// Distance from `p` to the segment `a`-`b`.
pub fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let abx = b.x - a.x;
    let aby = b.y - a.y;
    let len_sq = abx * abx + aby * aby;
    if len_sq == 0.0 {
        return p.distance_to(&a);
    }
    let t = (((p.x - a.x) * abx + (p.y - a.y) * aby) / len_sq).clamp(0.0, 1.0);
    p.distance_to(&Point::new(a.x + t * abx, a.y + t * aby))
}

/// The kinds of element a label can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Text,
    Placeholder,
    Barcode,
    Line,
    Rectangle,
    Circle,
    Image,
    Table,
}

impl ElementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Placeholder => "placeholder",
            Self::Barcode => "barcode",
            Self::Line => "line",
            Self::Rectangle => "rectangle",
            Self::Circle => "circle",
            Self::Image => "image",
            Self::Table => "table",
        }
    }

    /// Text and placeholders are the only editable-in-place elements.
    pub fn is_text_like(&self) -> bool {
        matches!(self, Self::Text | Self::Placeholder)
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElementType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "placeholder" => Ok(Self::Placeholder),
            "barcode" => Ok(Self::Barcode),
            "line" => Ok(Self::Line),
            "rectangle" | "rect" => Ok(Self::Rectangle),
            "circle" => Ok(Self::Circle),
            "image" => Ok(Self::Image),
            "table" => Ok(Self::Table),
            _ => Err(format!("Unknown element type: {}", s)),
        }
    }
}

/// Closed shapes that can be drawn by dragging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rectangle,
    Circle,
}

impl From<ShapeKind> for ElementType {
    fn from(kind: ShapeKind) -> Self {
        match kind {
            ShapeKind::Rectangle => ElementType::Rectangle,
            ShapeKind::Circle => ElementType::Circle,
        }
    }
}

/// One end of a line element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Endpoint {
    Start,
    End,
}

/// The eight resize handles around a selected element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Handle {
    N,
    S,
    E,
    W,
    Ne,
    Nw,
    Se,
    Sw,
}

impl Handle {
    pub const ALL: [Handle; 8] = [
        Handle::Nw,
        Handle::N,
        Handle::Ne,
        Handle::E,
        Handle::Se,
        Handle::S,
        Handle::Sw,
        Handle::W,
    ];

    pub fn moves_west(&self) -> bool {
        matches!(self, Handle::W | Handle::Nw | Handle::Sw)
    }

    pub fn moves_east(&self) -> bool {
        matches!(self, Handle::E | Handle::Ne | Handle::Se)
    }

    pub fn moves_north(&self) -> bool {
        matches!(self, Handle::N | Handle::Ne | Handle::Nw)
    }

    pub fn moves_south(&self) -> bool {
        matches!(self, Handle::S | Handle::Se | Handle::Sw)
    }

    /// Position of the handle's centre on the unrotated bounds.
    pub fn anchor(&self, bounds: &Rect) -> Point {
        let x = if self.moves_west() {
            bounds.x
        } else if self.moves_east() {
            bounds.right()
        } else {
            bounds.x + bounds.width / 2.0
        };
        let y = if self.moves_north() {
            bounds.y
        } else if self.moves_south() {
            bounds.bottom()
        } else {
            bounds.y + bounds.height / 2.0
        };
        Point::new(x, y)
    }
}
