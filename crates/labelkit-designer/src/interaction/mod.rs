//! Pointer and keyboard interaction state machine.
//!
//! The active manipulation is an explicit [`InteractionState`] value. Every
//! event handler takes the current state by value together with the canvas,
//! applies the event, and returns the next state plus an [`Effect`] telling
//! the caller whether the result belongs in the undo history.
//!
//! ```text
//!                     ┌──────────────────────────────────────────────┐
//!                     │                    Idle                      │
//!                     └──────────────────────────────────────────────┘
//!   press body │  press handle │  press knob │  press endpoint │  double-click text
//!              ▼               ▼             ▼                 ▼                 ▼
//!        Dragging        Resizing       Rotating   DraggingLineEndpoint    EditingText
//!              │ release (commit)                                          │ confirm / blur / Esc
//!              ▼                                                           ▼
//!            Idle                                                         Idle
//!
//!   DrawingText / DrawingLine / DrawingBarcode / DrawingShape
//!     press: anchor   move: preview   release: create or cancel → Idle
//!     Esc: → Idle
//! ```
//!
//! All geometry is computed in canvas space; pointer positions arrive in
//! viewport coordinates and are converted with the canvas viewport.

mod draw;
pub mod gestures;

pub use draw::{finish_barcode, finish_line, finish_shape, finish_text, DrawGesture};

use labelkit_core::constants::{DEFAULT_BARCODE_TYPE, ROTATION_SNAP_DEGREES};

use crate::canvas::{clamp_into, Canvas, HitTarget};
use crate::model::{Element, Endpoint, Handle, LineData, Point, ShapeKind};

/// Pointer event in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub x: f64,
    pub y: f64,
    /// Snap modifier (shift) held.
    pub snap: bool,
}

impl PointerEvent {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, snap: false }
    }

    pub fn with_snap(mut self, snap: bool) -> Self {
        self.snap = snap;
        self
    }
}

/// Active manipulation mode.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    DrawingText {
        gesture: Option<DrawGesture>,
    },
    DrawingLine {
        gesture: Option<DrawGesture>,
    },
    DrawingBarcode {
        barcode_type: String,
        gesture: Option<DrawGesture>,
    },
    DrawingShape {
        shape: ShapeKind,
        gesture: Option<DrawGesture>,
    },
    Dragging {
        id: String,
        baseline: Element,
        pointer_start: Point,
    },
    Resizing {
        id: String,
        handle: Handle,
        baseline: Element,
        pointer_start: Point,
    },
    Rotating {
        id: String,
        center: Point,
        start_angle: f64,
        start_rotation: f64,
    },
    DraggingLineEndpoint {
        id: String,
        endpoint: Endpoint,
        baseline: LineData,
        pointer_start: Point,
    },
    EditingText {
        id: String,
        buffer: String,
    },
}

impl InteractionState {
    pub fn drawing_text() -> Self {
        Self::DrawingText { gesture: None }
    }

    pub fn drawing_line() -> Self {
        Self::DrawingLine { gesture: None }
    }

    pub fn drawing_barcode(barcode_type: Option<&str>) -> Self {
        Self::DrawingBarcode {
            barcode_type: barcode_type.unwrap_or(DEFAULT_BARCODE_TYPE).to_string(),
            gesture: None,
        }
    }

    pub fn drawing_shape(shape: ShapeKind) -> Self {
        Self::DrawingShape {
            shape,
            gesture: None,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Any of the draw-to-create modes.
    pub fn is_drawing(&self) -> bool {
        matches!(
            self,
            Self::DrawingText { .. }
                | Self::DrawingLine { .. }
                | Self::DrawingBarcode { .. }
                | Self::DrawingShape { .. }
        )
    }

    /// Dragging, resizing, rotating or moving a line endpoint.
    pub fn is_manipulating(&self) -> bool {
        matches!(
            self,
            Self::Dragging { .. }
                | Self::Resizing { .. }
                | Self::Rotating { .. }
                | Self::DraggingLineEndpoint { .. }
        )
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, Self::EditingText { .. })
    }

    /// The draw gesture in progress, if any.
    pub fn gesture(&self) -> Option<&DrawGesture> {
        match self {
            Self::DrawingText { gesture }
            | Self::DrawingLine { gesture }
            | Self::DrawingBarcode { gesture, .. }
            | Self::DrawingShape { gesture, .. } => gesture.as_ref(),
            _ => None,
        }
    }

    fn gesture_mut(&mut self) -> Option<&mut Option<DrawGesture>> {
        match self {
            Self::DrawingText { gesture }
            | Self::DrawingLine { gesture }
            | Self::DrawingBarcode { gesture, .. }
            | Self::DrawingShape { gesture, .. } => Some(gesture),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::DrawingText { .. } => "drawing-text",
            Self::DrawingLine { .. } => "drawing-line",
            Self::DrawingBarcode { .. } => "drawing-barcode",
            Self::DrawingShape { .. } => "drawing-shape",
            Self::Dragging { .. } => "dragging",
            Self::Resizing { .. } => "resizing",
            Self::Rotating { .. } => "rotating",
            Self::DraggingLineEndpoint { .. } => "dragging-line-endpoint",
            Self::EditingText { .. } => "editing-text",
        }
    }
}

/// What the caller must do after an event.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Effect {
    #[default]
    None,
    /// A manipulation finished; snapshot the elements.
    Commit,
    /// A draw gesture created an element; snapshot the elements.
    Created(String),
}

impl Effect {
    pub fn commits(&self) -> bool {
        !matches!(self, Effect::None)
    }
}

/// Next state and effect of an event.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub state: InteractionState,
    pub effect: Effect,
}

impl Outcome {
    fn stay(state: InteractionState) -> Self {
        Self {
            state,
            effect: Effect::None,
        }
    }
}

/// Pins a canvas-space point onto the label.
fn clamp_to_canvas(canvas: &Canvas, p: Point) -> Point {
    Point::new(clamp_into(p.x, canvas.width()), clamp_into(p.y, canvas.height()))
}

/// Pointer pressed.
pub fn pointer_down(
    state: InteractionState,
    canvas: &mut Canvas,
    event: PointerEvent,
) -> Outcome {
    let p = canvas.to_canvas(event.x, event.y);

    let state = match state {
        InteractionState::EditingText { id, buffer } => {
            commit_text(canvas, &id, buffer);
            InteractionState::Idle
        }
        mut drawing if drawing.is_drawing() => {
            let anchor = clamp_to_canvas(canvas, p);
            if let Some(slot) = drawing.gesture_mut() {
                *slot = Some(DrawGesture::new(anchor));
            }
            canvas.clear_selection();
            tracing::trace!("Draw anchor {} in {}", anchor, drawing.name());
            return Outcome::stay(drawing);
        }
        other => other,
    };

    if !state.is_idle() {
        // A press while a manipulation is active means a release was lost.
        return Outcome::stay(state);
    }

    let next = match canvas.hit_test(p) {
        HitTarget::Empty => {
            canvas.clear_selection();
            InteractionState::Idle
        }
        HitTarget::Body(id) => {
            canvas.select(&id);
            match canvas.element(&id) {
                Some(element) => InteractionState::Dragging {
                    baseline: element.clone(),
                    id,
                    pointer_start: p,
                },
                None => InteractionState::Idle,
            }
        }
        HitTarget::ResizeHandle(id, handle) => match canvas.element(&id) {
            Some(element) => InteractionState::Resizing {
                baseline: element.clone(),
                id,
                handle,
                pointer_start: p,
            },
            None => InteractionState::Idle,
        },
        HitTarget::RotateHandle(id) => match canvas.element(&id) {
            Some(element) => {
                let center = element.center();
                InteractionState::Rotating {
                    start_angle: gestures::angle_about(center, p),
                    start_rotation: element.rotation,
                    center,
                    id,
                }
            }
            None => InteractionState::Idle,
        },
        HitTarget::LineEndpoint(id, endpoint) => match canvas.element(&id).and_then(|e| e.line_data()) {
            Some(line) => InteractionState::DraggingLineEndpoint {
                baseline: *line,
                id,
                endpoint,
                pointer_start: p,
            },
            None => InteractionState::Idle,
        },
    };
    tracing::debug!("Pointer down at {} -> {}", p, next.name());
    Outcome::stay(next)
}

/// Pointer moved.
pub fn pointer_move(
    mut state: InteractionState,
    canvas: &mut Canvas,
    event: PointerEvent,
) -> InteractionState {
    let p = canvas.to_canvas(event.x, event.y);
    let (canvas_w, canvas_h) = (canvas.width(), canvas.height());

    match &mut state {
        InteractionState::Dragging {
            id,
            baseline,
            pointer_start,
        } => {
            let moved = gestures::drag(
                baseline,
                p.x - pointer_start.x,
                p.y - pointer_start.y,
                canvas_w,
                canvas_h,
            );
            replace_geometry(canvas, id, moved);
        }
        InteractionState::Resizing {
            id,
            handle,
            baseline,
            pointer_start,
        } => {
            let resized = gestures::resize(
                baseline,
                *handle,
                p.x - pointer_start.x,
                p.y - pointer_start.y,
                canvas_w,
                canvas_h,
            );
            replace_geometry(canvas, id, resized);
        }
        InteractionState::Rotating {
            id,
            center,
            start_angle,
            start_rotation,
        } => {
            let snap = event.snap.then_some(ROTATION_SNAP_DEGREES);
            let rotation = gestures::rotate(*start_rotation, *start_angle, *center, p, snap);
            if let Some(element) = canvas.element_mut(id) {
                element.rotation = rotation;
            }
        }
        InteractionState::DraggingLineEndpoint {
            id,
            endpoint,
            baseline,
            pointer_start,
        } => {
            let (start, end) = gestures::move_endpoint(
                baseline,
                *endpoint,
                p.x - pointer_start.x,
                p.y - pointer_start.y,
                canvas_w,
                canvas_h,
            );
            if let Some(element) = canvas.element_mut(id) {
                element.set_line_endpoints(start, end);
            }
        }
        drawing if drawing.is_drawing() => {
            if let Some(Some(gesture)) = drawing.gesture_mut() {
                gesture.update(clamp_to_canvas(canvas, p), event.snap);
            }
        }
        _ => {}
    }
    tracing::trace!("Pointer move at {} in {}", p, state.name());
    state
}

/// Pointer released.
pub fn pointer_up(state: InteractionState, canvas: &mut Canvas, event: PointerEvent) -> Outcome {
    if state.is_manipulating() {
        tracing::debug!("Finished {}", state.name());
        return Outcome {
            state: InteractionState::Idle,
            effect: Effect::Commit,
        };
    }

    let Some(mut gesture) = state.gesture().copied() else {
        return Outcome::stay(state);
    };
    let end = clamp_to_canvas(canvas, canvas.to_canvas(event.x, event.y));
    gesture.update(end, event.snap);

    let created = match &state {
        InteractionState::DrawingText { .. } => Some(finish_text(&gesture)),
        InteractionState::DrawingLine { .. } => finish_line(&gesture),
        InteractionState::DrawingBarcode { barcode_type, .. } => {
            finish_barcode(&gesture, barcode_type)
        }
        InteractionState::DrawingShape { shape, .. } => finish_shape(&gesture, *shape),
        _ => None,
    };

    let effect = match created {
        Some(element) => {
            let id = canvas.insert(element);
            tracing::debug!("Created {} by {}", id, state.name());
            Effect::Created(id)
        }
        None => {
            tracing::debug!("Cancelled {}: gesture too small", state.name());
            Effect::None
        }
    };
    Outcome {
        state: InteractionState::Idle,
        effect,
    }
}

/// Double click: enters in-place editing on text and placeholder elements.
pub fn double_click(state: InteractionState, canvas: &mut Canvas, event: PointerEvent) -> Outcome {
    if !state.is_idle() {
        return Outcome::stay(state);
    }
    let p = canvas.to_canvas(event.x, event.y);
    let HitTarget::Body(id) = canvas.hit_test(p) else {
        return Outcome::stay(state);
    };
    let Some(element) = canvas.element(&id) else {
        return Outcome::stay(state);
    };
    if !element.element_type().is_text_like() {
        return Outcome::stay(state);
    }
    let buffer = element.content().unwrap_or_default().to_string();
    canvas.select(&id);
    tracing::debug!("Editing text of {}", id);
    Outcome::stay(InteractionState::EditingText { id, buffer })
}

/// Replaces the edit buffer while editing text.
pub fn edit_text(state: InteractionState, text: &str) -> InteractionState {
    match state {
        InteractionState::EditingText { id, .. } => InteractionState::EditingText {
            id,
            buffer: text.to_string(),
        },
        other => other,
    }
}

/// Confirms (blur or Ctrl+Enter) a text edit. Writes the content without a
/// history entry.
pub fn confirm_edit(state: InteractionState, canvas: &mut Canvas) -> InteractionState {
    match state {
        InteractionState::EditingText { id, buffer } => {
            commit_text(canvas, &id, buffer);
            InteractionState::Idle
        }
        other => other,
    }
}

/// Escape: leaves any drawing mode and discards a text edit.
pub fn escape(state: InteractionState) -> InteractionState {
    if state.is_drawing() || state.is_editing() {
        tracing::debug!("Escape from {}", state.name());
        InteractionState::Idle
    } else {
        state
    }
}

fn commit_text(canvas: &mut Canvas, id: &str, buffer: String) {
    if let Some(element) = canvas.element_mut(id) {
        element.set_content(buffer);
    }
}

/// Writes the geometry of a gesture result back into the live element,
/// leaving any concurrent style edits alone.
fn replace_geometry(canvas: &mut Canvas, id: &str, updated: Element) {
    if let Some(element) = canvas.element_mut(id) {
        element.x = updated.x;
        element.y = updated.y;
        element.width = updated.width;
        element.height = updated.height;
        element.kind = updated.kind;
    }
}
