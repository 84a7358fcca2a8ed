//! # LabelKit Designer
//!
//! The interactive design canvas of the label designer: the element model,
//! pointer-driven manipulation, undo history and a renderer-agnostic draw
//! list. Host toolkits feed pointer and key events in and paint the
//! resulting [`Scene`].
//!
//! ## Core Components
//!
//! - **Model**: labelled elements (text, placeholders, barcodes, lines,
//!   shapes, images, tables) with inline style
//! - **Canvas**: ordered element list, selection, hit testing and z-order
//! - **Viewport**: zoom, origin and debounced fit-to-container
//! - **Interaction**: the pointer state machine (drawing, dragging,
//!   resizing, rotating, endpoint dragging, text editing)
//! - **History**: snapshot-based undo/redo
//! - **Renderer**: projection of the canvas into draw instructions
//! - **Serialization/Merge**: template payloads, generator output and
//!   data merge
//!
//! ## Architecture
//!
//! ```text
//! DesignerState
//!   ├── Canvas (elements, selection)
//!   │     └── Viewport (zoom, origin, fit)
//!   ├── InteractionState (pointer state machine)
//!   └── History (snapshots)
//!
//! project(canvas, state) -> Scene -> host painter
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use labelkit_designer::{DesignerConfig, DesignerState, PointerEvent};
//!
//! let mut designer = DesignerState::new(DesignerConfig::default());
//! designer.start_drawing_line();
//! designer.pointer_down(PointerEvent::new(42.0, 42.0));
//! designer.pointer_move(PointerEvent::new(132.0, 132.0));
//! designer.pointer_up(PointerEvent::new(132.0, 132.0));
//!
//! let scene = designer.render();
//! ```

pub mod canvas;
pub mod designer_state;
pub mod history;
pub mod interaction;
pub mod merge;
pub mod model;
pub mod renderer;
pub mod serialization;
pub mod viewport;

pub use canvas::{generate_id, Canvas, ElementPatch, HitTarget, Placement, ZOrder};
pub use designer_state::{
    ApplyMode, DesignerConfig, DesignerState, Key, KeyEvent, Shortcut,
};
pub use history::History;
pub use interaction::{Effect, InteractionState, Outcome, PointerEvent};
pub use merge::{DataRow, MergePlan};
pub use model::{
    BarcodeData, Element, ElementKind, ElementType, Endpoint, Handle, ImageData, LineData, Point,
    Rect, ShapeKind, Style, TableData,
};
pub use renderer::{
    project, BarcodeRenderer, BarcodeRequest, BoxContent, BoxInstruction, DrawInstruction,
    Preview, ResolvedStyle, Scene, SegmentInstruction,
};
pub use serialization::{
    Dimensions, GeneratedLabel, TemplateCategory, TemplatePayload, TemplateStatus,
};
pub use viewport::{fit_zoom, Viewport};
