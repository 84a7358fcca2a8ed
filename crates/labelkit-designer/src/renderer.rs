//! Render projection for the design canvas.
//!
//! [`project`] turns the element list, the selection and the interaction
//! state into an ordered list of draw instructions in canvas space. It does
//! not rasterize anything: hosts paint the instructions with whatever 2D
//! backend they use, and barcode symbols are produced by an external
//! [`BarcodeRenderer`].
//!
//! Paint order:
//! - grid (optional)
//! - elements in ascending `z_index`
//! - selection handles
//! - draw-gesture preview and guides

use labelkit_core::constants::{
    ENDPOINT_HANDLE_RADIUS, GRID_SIZE, RESIZE_HANDLE_SIZE, ROTATE_HANDLE_OFFSET,
    ROTATE_HANDLE_SIZE,
};

use crate::canvas::Canvas;
use crate::interaction::{DrawGesture, InteractionState};
use crate::model::{Element, ElementKind, Endpoint, Handle, Point, Rect, ShapeKind, Style};

/// Input handed to an external barcode renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct BarcodeRequest {
    pub content: String,
    pub barcode_type: String,
    pub width: f64,
    pub height: f64,
    pub bar_width: Option<f64>,
    pub bar_height: Option<f64>,
    pub show_text: bool,
    pub foreground: String,
    pub background: String,
    pub font_size: f64,
}

/// Produces barcode artwork for a request, e.g. an SVG string or a bitmap.
pub trait BarcodeRenderer {
    type Output;

    /// Returns `None` when the content cannot be encoded in the symbology.
    fn render(&self, request: &BarcodeRequest) -> Option<Self::Output>;
}

/// Style with every default resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedStyle {
    pub color: String,
    pub background_color: String,
    pub border_width: f64,
    pub border_color: String,
    pub dash: Option<[f64; 2]>,
    pub border_radius: f64,
    pub font_size: f64,
    pub font_family: String,
    pub font_weight: String,
    pub font_style: String,
    pub text_decoration: String,
    pub text_align: String,
    pub letter_spacing: f64,
    pub line_height: f64,
    pub opacity: f64,
}

impl From<&Style> for ResolvedStyle {
    fn from(style: &Style) -> Self {
        Self {
            color: style.color().to_string(),
            background_color: style.background_color().to_string(),
            border_width: style.border_width(),
            border_color: style.border_color().to_string(),
            dash: style.dash_pattern(),
            border_radius: style.border_radius(),
            font_size: style.font_size(),
            font_family: style.font_family().to_string(),
            font_weight: style.font_weight().to_string(),
            font_style: style.font_style().to_string(),
            text_decoration: style.text_decoration().to_string(),
            text_align: style.text_align().to_string(),
            letter_spacing: style.letter_spacing(),
            line_height: style.line_height(),
            opacity: style.opacity(),
        }
    }
}

/// What is painted inside a box.
#[derive(Debug, Clone, PartialEq)]
pub enum BoxContent {
    Text { text: String, placeholder: bool },
    Barcode(BarcodeRequest),
    Rectangle,
    Ellipse,
    Image { src: Option<String> },
    Table {
        rows: u32,
        cols: u32,
        cell_width: f64,
        cell_height: f64,
        cells: Vec<Vec<String>>,
    },
}

/// A non-line element: a box rotated about its centre.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxInstruction {
    pub id: String,
    pub bounds: Rect,
    /// Degrees clockwise about `bounds.center()`.
    pub rotation: f64,
    pub content: BoxContent,
    pub style: ResolvedStyle,
    pub selected: bool,
    /// The box is being edited in place; `content` shows the edit buffer.
    pub editing: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SegmentInstruction {
    pub id: String,
    pub start: Point,
    pub end: Point,
    pub stroke_color: String,
    pub stroke_width: f64,
    pub dash: Option<[f64; 2]>,
    pub opacity: f64,
    pub selected: bool,
}

/// Outline of the element a draw gesture will create.
#[derive(Debug, Clone, PartialEq)]
pub enum Preview {
    Text(Rect),
    Line { start: Point, end: Point },
    Barcode(Rect),
    Shape { shape: ShapeKind, bounds: Rect },
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawInstruction {
    Grid {
        spacing: f64,
        width: f64,
        height: f64,
    },
    Box(BoxInstruction),
    Segment(SegmentInstruction),
    /// Dashed outline around the selected box.
    SelectionOutline { bounds: Rect, rotation: f64 },
    ResizeHandle {
        handle: Handle,
        center: Point,
        size: f64,
        /// Rotation of the owning element about `pivot`.
        rotation: f64,
        pivot: Point,
    },
    RotateHandle {
        center: Point,
        diameter: f64,
        /// Top-middle of the element, where the stalk starts.
        stalk_from: Point,
        rotation: f64,
        pivot: Point,
    },
    EndpointHandle {
        endpoint: Endpoint,
        center: Point,
        radius: f64,
    },
    Preview(Preview),
    /// Full-width or full-height alignment guide.
    Guide { from: Point, to: Point },
}

/// Everything needed to paint one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// Canvas size in canvas pixels.
    pub width: f64,
    pub height: f64,
    /// Zoom the host should scale the scene by, in percent.
    pub zoom: f64,
    pub instructions: Vec<DrawInstruction>,
}

impl Scene {
    pub fn boxes(&self) -> impl Iterator<Item = &BoxInstruction> {
        self.instructions.iter().filter_map(|i| match i {
            DrawInstruction::Box(b) => Some(b),
            _ => None,
        })
    }

    pub fn segments(&self) -> impl Iterator<Item = &SegmentInstruction> {
        self.instructions.iter().filter_map(|i| match i {
            DrawInstruction::Segment(s) => Some(s),
            _ => None,
        })
    }

    /// Number of resize, rotate and endpoint handles.
    pub fn handle_count(&self) -> usize {
        self.instructions
            .iter()
            .filter(|i| {
                matches!(
                    i,
                    DrawInstruction::ResizeHandle { .. }
                        | DrawInstruction::RotateHandle { .. }
                        | DrawInstruction::EndpointHandle { .. }
                )
            })
            .count()
    }

    /// Renders every barcode box with `renderer`, keyed by element id.
    pub fn render_barcodes<R: BarcodeRenderer>(&self, renderer: &R) -> Vec<(String, R::Output)> {
        self.boxes()
            .filter_map(|b| match &b.content {
                BoxContent::Barcode(request) => {
                    renderer.render(request).map(|out| (b.id.clone(), out))
                }
                _ => None,
            })
            .collect()
    }
}

/// Projects the canvas and interaction state into draw instructions.
pub fn project(canvas: &Canvas, state: &InteractionState, show_grid: bool) -> Scene {
    let width = canvas.width();
    let height = canvas.height();
    let mut instructions = Vec::with_capacity(canvas.len() + 12);

    if show_grid {
        instructions.push(DrawInstruction::Grid {
            spacing: GRID_SIZE,
            width,
            height,
        });
    }

    let selected = canvas.selected_id();
    let editing = match state {
        InteractionState::EditingText { id, buffer } => Some((id.as_str(), buffer.as_str())),
        _ => None,
    };

    for element in canvas.elements() {
        let is_selected = selected == Some(element.id.as_str());
        instructions.push(element_instruction(element, is_selected, editing));
    }

    if !state.is_drawing() {
        if let Some(element) = canvas.selected_element() {
            push_handles(&mut instructions, element);
        }
    }

    if let Some(gesture) = state.gesture() {
        push_preview(&mut instructions, state, gesture, width, height);
    }

    Scene {
        width,
        height,
        zoom: canvas.viewport().zoom(),
        instructions,
    }
}

fn element_instruction(
    element: &Element,
    selected: bool,
    editing: Option<(&str, &str)>,
) -> DrawInstruction {
    let style = ResolvedStyle::from(&element.style);

    if let Some(line) = element.line_data() {
        return DrawInstruction::Segment(SegmentInstruction {
            id: element.id.clone(),
            start: line.start(),
            end: line.end(),
            stroke_color: style.border_color.clone(),
            stroke_width: if style.border_width > 0.0 {
                style.border_width
            } else {
                1.0
            },
            dash: style.dash,
            opacity: style.opacity,
            selected,
        });
    }

    let edit_buffer = editing
        .filter(|(id, _)| *id == element.id)
        .map(|(_, buffer)| buffer);

    let content = match &element.kind {
        ElementKind::Text { content } => BoxContent::Text {
            text: edit_buffer.unwrap_or(content).to_string(),
            placeholder: false,
        },
        ElementKind::Placeholder { content } => BoxContent::Text {
            text: edit_buffer.unwrap_or(content).to_string(),
            placeholder: true,
        },
        ElementKind::Barcode(barcode) => BoxContent::Barcode(BarcodeRequest {
            content: barcode.content.clone(),
            barcode_type: barcode.barcode_type.clone(),
            width: element.width,
            height: element.height,
            bar_width: barcode.barcode_width,
            bar_height: barcode.barcode_bar_height,
            show_text: barcode.show_barcode_text.unwrap_or(true),
            foreground: style.color.clone(),
            background: style.background_color.clone(),
            font_size: style.font_size,
        }),
        ElementKind::Rectangle => BoxContent::Rectangle,
        ElementKind::Circle => BoxContent::Ellipse,
        ElementKind::Image(image) => BoxContent::Image {
            src: image.src.clone(),
        },
        ElementKind::Table(table) => BoxContent::Table {
            rows: table.rows,
            cols: table.cols,
            cell_width: table.cell_width,
            cell_height: table.cell_height,
            cells: table.table_data.clone(),
        },
        // Lines are returned above as segments.
        ElementKind::Line(_) => BoxContent::Rectangle,
    };

    DrawInstruction::Box(BoxInstruction {
        id: element.id.clone(),
        bounds: element.bounds(),
        rotation: element.rotation,
        content,
        style,
        selected,
        editing: edit_buffer.is_some(),
    })
}

fn push_handles(out: &mut Vec<DrawInstruction>, element: &Element) {
    if let Some(line) = element.line_data() {
        for endpoint in [Endpoint::Start, Endpoint::End] {
            out.push(DrawInstruction::EndpointHandle {
                endpoint,
                center: line.endpoint(endpoint),
                radius: ENDPOINT_HANDLE_RADIUS,
            });
        }
        return;
    }

    let bounds = element.bounds();
    let pivot = bounds.center();
    out.push(DrawInstruction::SelectionOutline {
        bounds,
        rotation: element.rotation,
    });
    for handle in Handle::ALL {
        out.push(DrawInstruction::ResizeHandle {
            handle,
            center: handle.anchor(&bounds),
            size: RESIZE_HANDLE_SIZE,
            rotation: element.rotation,
            pivot,
        });
    }
    out.push(DrawInstruction::RotateHandle {
        center: Point::new(pivot.x, bounds.y - ROTATE_HANDLE_OFFSET),
        diameter: ROTATE_HANDLE_SIZE,
        stalk_from: Point::new(pivot.x, bounds.y),
        rotation: element.rotation,
        pivot,
    });
}

fn push_preview(
    out: &mut Vec<DrawInstruction>,
    state: &InteractionState,
    gesture: &DrawGesture,
    width: f64,
    height: f64,
) {
    let preview = match state {
        InteractionState::DrawingText { .. } => Preview::Text(gesture.rect()),
        InteractionState::DrawingLine { .. } => Preview::Line {
            start: gesture.anchor,
            end: gesture.line_end(),
        },
        InteractionState::DrawingBarcode { .. } => Preview::Barcode(gesture.rect()),
        InteractionState::DrawingShape { shape, .. } => Preview::Shape {
            shape: *shape,
            bounds: gesture.rect(),
        },
        _ => return,
    };
    out.push(DrawInstruction::Preview(preview));

    if matches!(state, InteractionState::DrawingLine { .. }) {
        let pointer = gesture.line_end();
        for at in [pointer, gesture.anchor] {
            out.push(DrawInstruction::Guide {
                from: Point::new(0.0, at.y),
                to: Point::new(width, at.y),
            });
            out.push(DrawInstruction::Guide {
                from: Point::new(at.x, 0.0),
                to: Point::new(at.x, height),
            });
        }
    }
}
