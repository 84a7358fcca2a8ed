use labelkit_core::constants::{
    DEFAULT_BARCODE_CONTENT, DEFAULT_BARCODE_TYPE, LINE_HIT_TOLERANCE, MIN_TABLE_CELL,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{distance_to_segment, rotate_point, ElementType, Endpoint, Point, Rect, Style};

fn default_barcode_type() -> String {
    DEFAULT_BARCODE_TYPE.to_string()
}

fn default_table_dim() -> u32 {
    2
}

fn default_cell_width() -> f64 {
    60.0
}

fn default_cell_height() -> f64 {
    25.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarcodeData {
    #[serde(default)]
    pub content: String,
    #[serde(default = "default_barcode_type")]
    pub barcode_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode_bar_height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_barcode_text: Option<bool>,
}

impl Default for BarcodeData {
    fn default() -> Self {
        Self {
            content: DEFAULT_BARCODE_CONTENT.to_string(),
            barcode_type: default_barcode_type(),
            barcode_width: Some(2.0),
            barcode_bar_height: Some(70.0),
            show_barcode_text: Some(true),
        }
    }
}

/// Line endpoints. The element's bounding box is always derived from these.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LineData {
    #[serde(default)]
    pub x1: f64,
    #[serde(default)]
    pub y1: f64,
    #[serde(default)]
    pub x2: f64,
    #[serde(default)]
    pub y2: f64,
}

impl LineData {
    pub fn start(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    pub fn end(&self) -> Point {
        Point::new(self.x2, self.y2)
    }

    pub fn endpoint(&self, which: Endpoint) -> Point {
        match which {
            Endpoint::Start => self.start(),
            Endpoint::End => self.end(),
        }
    }

    pub fn length(&self) -> f64 {
        self.start().distance_to(&self.end())
    }

    fn is_unset(&self) -> bool {
        self.x1 == 0.0 && self.y1 == 0.0 && self.x2 == 0.0 && self.y2 == 0.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableData {
    #[serde(default = "default_table_dim")]
    pub rows: u32,
    #[serde(default = "default_table_dim")]
    pub cols: u32,
    #[serde(default = "default_cell_width")]
    pub cell_width: f64,
    #[serde(default = "default_cell_height")]
    pub cell_height: f64,
    #[serde(default)]
    pub table_data: Vec<Vec<String>>,
}

impl TableData {
    pub fn new(rows: u32, cols: u32) -> Self {
        let rows = if rows == 0 { 2 } else { rows };
        let cols = if cols == 0 { 2 } else { cols };
        Self {
            rows,
            cols,
            cell_width: default_cell_width(),
            cell_height: default_cell_height(),
            table_data: vec![vec![String::new(); cols as usize]; rows as usize],
        }
    }

    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.table_data
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ImageData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
}

/// Variant-specific payload, tagged by `type` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ElementKind {
    Text {
        #[serde(default)]
        content: String,
    },
    Placeholder {
        #[serde(default)]
        content: String,
    },
    Barcode(BarcodeData),
    Line(LineData),
    Rectangle,
    Circle,
    Image(ImageData),
    Table(TableData),
}

impl ElementKind {
    /// Wire keys owned by this variant, besides `type`.
    fn wire_keys(&self) -> &'static [&'static str] {
        match self {
            Self::Text { .. } | Self::Placeholder { .. } => &["content"],
            Self::Barcode(_) => &[
                "content",
                "barcodeType",
                "barcodeWidth",
                "barcodeBarHeight",
                "showBarcodeText",
            ],
            Self::Line(_) => &["x1", "y1", "x2", "y2"],
            Self::Rectangle | Self::Circle => &[],
            Self::Image(_) => &["src"],
            Self::Table(_) => &["rows", "cols", "cellWidth", "cellHeight", "tableData"],
        }
    }

    pub fn element_type(&self) -> ElementType {
        match self {
            Self::Text { .. } => ElementType::Text,
            Self::Placeholder { .. } => ElementType::Placeholder,
            Self::Barcode(_) => ElementType::Barcode,
            Self::Line(_) => ElementType::Line,
            Self::Rectangle => ElementType::Rectangle,
            Self::Circle => ElementType::Circle,
            Self::Image(_) => ElementType::Image,
            Self::Table(_) => ElementType::Table,
        }
    }
}

/// A placeable item on the label.
///
/// Keys the typed fields do not claim are kept in `extra` and written back
/// unchanged, so stored payloads survive a load/save cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "WireElement")]
pub struct Element {
    pub id: String,
    #[serde(flatten)]
    pub kind: ElementKind,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    /// Degrees, clockwise. Any real value; normalized only for display.
    #[serde(default)]
    pub rotation: f64,
    #[serde(default)]
    pub z_index: i64,
    #[serde(flatten)]
    pub style: Style,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Stored form of an [`Element`] before unclaimed keys are sorted out.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireElement {
    id: String,
    #[serde(flatten)]
    kind: ElementKind,
    #[serde(default)]
    x: f64,
    #[serde(default)]
    y: f64,
    #[serde(default)]
    width: f64,
    #[serde(default)]
    height: f64,
    #[serde(default)]
    rotation: f64,
    #[serde(default)]
    z_index: i64,
    #[serde(flatten)]
    style: Style,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl From<WireElement> for Element {
    fn from(wire: WireElement) -> Self {
        let mut extra = wire.extra;
        extra.remove("type");
        for key in wire.kind.wire_keys().iter().chain(Style::WIRE_KEYS) {
            extra.remove(*key);
        }
        let mut element = Self {
            id: wire.id,
            kind: wire.kind,
            x: wire.x,
            y: wire.y,
            width: wire.width,
            height: wire.height,
            rotation: wire.rotation,
            z_index: wire.z_index,
            style: wire.style,
            extra,
        };
        element.normalize();
        element
    }
}

impl Element {
    pub fn new(id: impl Into<String>, kind: ElementKind, bounds: Rect, style: Style) -> Self {
        let mut element = Self {
            id: id.into(),
            kind,
            x: bounds.x,
            y: bounds.y,
            width: bounds.width,
            height: bounds.height,
            rotation: 0.0,
            z_index: 0,
            style,
            extra: Map::new(),
        };
        element.normalize();
        element
    }

    /// Builds a line between two points with its bounding box derived.
    pub fn line(id: impl Into<String>, start: Point, end: Point, style: Style) -> Self {
        let kind = ElementKind::Line(LineData {
            x1: start.x,
            y1: start.y,
            x2: end.x,
            y2: end.y,
        });
        Self::new(id, kind, Rect::from_points(start, end), style)
    }

    pub fn element_type(&self) -> ElementType {
        self.kind.element_type()
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn center(&self) -> Point {
        self.bounds().center()
    }

    pub fn is_line(&self) -> bool {
        matches!(self.kind, ElementKind::Line(_))
    }

    pub fn line_data(&self) -> Option<&LineData> {
        match &self.kind {
            ElementKind::Line(line) => Some(line),
            _ => None,
        }
    }

    pub fn table_data(&self) -> Option<&TableData> {
        match &self.kind {
            ElementKind::Table(table) => Some(table),
            _ => None,
        }
    }

    /// Text shown by text, placeholder and barcode elements.
    pub fn content(&self) -> Option<&str> {
        match &self.kind {
            ElementKind::Text { content } | ElementKind::Placeholder { content } => Some(content),
            ElementKind::Barcode(barcode) => Some(&barcode.content),
            _ => None,
        }
    }

    pub fn set_content(&mut self, text: impl Into<String>) {
        match &mut self.kind {
            ElementKind::Text { content } | ElementKind::Placeholder { content } => {
                *content = text.into()
            }
            ElementKind::Barcode(barcode) => barcode.content = text.into(),
            _ => {}
        }
    }

    /// Moves line endpoints and rederives the bounding box.
    pub fn set_line_endpoints(&mut self, start: Point, end: Point) {
        if let ElementKind::Line(line) = &mut self.kind {
            *line = LineData {
                x1: start.x,
                y1: start.y,
                x2: end.x,
                y2: end.y,
            };
            let bbox = Rect::from_points(start, end);
            self.x = bbox.x;
            self.y = bbox.y;
            self.width = bbox.width;
            self.height = bbox.height;
        }
    }

    /// Translates the element, moving line endpoints with it.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
        if let ElementKind::Line(line) = &mut self.kind {
            line.x1 += dx;
            line.y1 += dy;
            line.x2 += dx;
            line.y2 += dy;
        }
    }

    /// Recomputes table cell sizes from the current bounds.
    pub fn sync_table_cells(&mut self) {
        let (width, height) = (self.width, self.height);
        if let ElementKind::Table(table) = &mut self.kind {
            table.cell_width = (width / table.cols.max(1) as f64).max(MIN_TABLE_CELL);
            table.cell_height = (height / table.rows.max(1) as f64).max(MIN_TABLE_CELL);
        }
    }

    /// Restores derived invariants after construction or deserialization.
    ///
    /// Lines stored without endpoints get a diagonal across their box; lines
    /// with endpoints get their box rederived. Table grids are padded to
    /// `rows x cols`.
    pub fn normalize(&mut self) {
        let bounds = self.bounds();
        match &mut self.kind {
            ElementKind::Line(line) => {
                if line.is_unset() {
                    *line = LineData {
                        x1: bounds.x,
                        y1: bounds.y,
                        x2: bounds.right(),
                        y2: bounds.bottom(),
                    };
                }
                let (start, end) = (line.start(), line.end());
                self.set_line_endpoints(start, end);
            }
            ElementKind::Table(table) => {
                table.rows = table.rows.max(1);
                table.cols = table.cols.max(1);
                table.table_data.resize(table.rows as usize, Vec::new());
                for row in &mut table.table_data {
                    if row.len() < table.cols as usize {
                        row.resize(table.cols as usize, String::new());
                    }
                }
            }
            _ => {}
        }
    }

    /// Whether a canvas-space point lies on the element, honoring rotation.
    pub fn contains_point(&self, p: Point) -> bool {
        if let Some(line) = self.line_data() {
            let tolerance = LINE_HIT_TOLERANCE.max(self.style.border_width() / 2.0);
            return distance_to_segment(p, line.start(), line.end()) <= tolerance;
        }
        let center = self.center();
        let local = rotate_point(p, center, -self.rotation);
        self.bounds().contains(local)
    }

    /// Writes one cell of a table, growing the grid if needed.
    pub fn set_table_cell(&mut self, row: usize, col: usize, text: impl Into<String>) -> bool {
        let ElementKind::Table(table) = &mut self.kind else {
            return false;
        };
        if row >= table.rows as usize || col >= table.cols as usize {
            return false;
        }
        if table.table_data.len() <= row {
            table.table_data.resize(row + 1, Vec::new());
        }
        let cells = &mut table.table_data[row];
        if cells.len() <= col {
            cells.resize(table.cols as usize, String::new());
        }
        cells[col] = text.into();
        true
    }
}
