//! Canvas holding the label's elements, the selection and the view.
//!
//! The element list is the single source of truth for the design and is
//! always kept sorted by `z_index` (paint and hit-test order). Operations on
//! unknown ids are silent no-ops.

mod operations;
mod types;

pub use types::{ElementPatch, HitTarget, Placement, ZOrder};

use labelkit_core::constants::DEFAULT_BARCODE_TYPE;
use labelkit_core::LabelSize;
use uuid::Uuid;

use crate::model::{
    BarcodeData, Element, ElementKind, ElementType, ImageData, Point, Rect, Style, TableData,
};
use crate::viewport::Viewport;

/// Largest width an uploaded image is placed at.
const IMAGE_MAX_WIDTH: f64 = 200.0;

/// Generates a fresh element id.
pub fn generate_id() -> String {
    format!("element_{}", Uuid::new_v4().simple())
}

/// Clamps `v` into `[0, max]`, preferring 0 when `max` is negative.
pub(crate) fn clamp_into(v: f64, max: f64) -> f64 {
    v.min(max).max(0.0)
}

/// Canvas state managing elements and selection.
#[derive(Debug, Clone)]
pub struct Canvas {
    elements: Vec<Element>,
    selected: Option<String>,
    label_size: LabelSize,
    viewport: Viewport,
}

impl Canvas {
    /// Creates an empty canvas for a label of the given size.
    /// Creates an empty canvas. An invalid size falls back to the default.
    pub fn new(label_size: LabelSize) -> Self {
        let label_size = match label_size.validate() {
            Ok(()) => label_size,
            Err(e) => {
                tracing::warn!("{}, using {}", e, LabelSize::default());
                LabelSize::default()
            }
        };
        Self {
            elements: Vec::new(),
            selected: None,
            label_size,
            viewport: Viewport::default(),
        }
    }

    /// Creates a canvas pre-populated with elements.
    pub fn with_elements(label_size: LabelSize, elements: Vec<Element>) -> Self {
        let mut canvas = Self::new(label_size);
        canvas.replace_elements(elements);
        canvas
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub(crate) fn element_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    pub fn label_size(&self) -> LabelSize {
        self.label_size
    }

    /// Changes the label size. Non-positive or non-finite sizes are ignored.
    pub fn set_label_size(&mut self, size: LabelSize) -> bool {
        if let Err(e) = size.validate() {
            tracing::debug!("Ignoring label size change: {}", e);
            return false;
        }
        self.label_size = size;
        true
    }

    /// Canvas width in pixels.
    pub fn width(&self) -> f64 {
        self.label_size.width_px()
    }

    /// Canvas height in pixels.
    pub fn height(&self) -> f64 {
        self.label_size.height_px()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    /// Converts a viewport position to canvas space.
    pub fn to_canvas(&self, vx: f64, vy: f64) -> Point {
        self.viewport.to_canvas(vx, vy)
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected_element(&self) -> Option<&Element> {
        self.selected.as_deref().and_then(|id| self.element(id))
    }

    /// Selects an element. Unknown ids leave the selection unchanged.
    pub fn select(&mut self, id: &str) {
        if self.element(id).is_some() {
            self.selected = Some(id.to_string());
        } else {
            tracing::debug!("Ignoring selection of unknown element {}", id);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Adds an element of the given type with its defaults and selects it.
    pub fn add_element(&mut self, element_type: ElementType, placement: Placement) -> String {
        let element = self.build_element(element_type, placement);
        self.insert(element)
    }

    /// Adds a table with the given grid; zero rows or columns fall back to 2.
    pub fn add_table(&mut self, rows: u32, cols: u32, placement: Placement) -> String {
        let table = TableData::new(rows, cols);
        let size = (
            table.cols as f64 * table.cell_width,
            table.rows as f64 * table.cell_height,
        );
        let origin = self.place(Point::new(20.0, 20.0), size, placement);
        let element = Element::new(
            "",
            ElementKind::Table(table),
            Rect::new(origin.x, origin.y, size.0, size.1),
            Style::table_defaults(),
        );
        self.insert(element)
    }

    /// Adds a placeholder bound to a `{{field}}` token.
    pub fn add_placeholder(&mut self, field: &str, placement: Placement) -> String {
        let token = if field.starts_with("{{") {
            field.to_string()
        } else {
            format!("{{{{{}}}}}", field)
        };
        let mut element = self.build_element(ElementType::Placeholder, placement);
        element.set_content(token);
        self.insert(element)
    }

    /// Adds an image, capped at 200px wide with its aspect ratio kept.
    pub fn add_image(
        &mut self,
        src: impl Into<String>,
        natural_width: f64,
        natural_height: f64,
        placement: Placement,
    ) -> String {
        let width = if natural_width > 0.0 {
            natural_width.min(IMAGE_MAX_WIDTH)
        } else {
            IMAGE_MAX_WIDTH
        };
        let ratio = if natural_width > 0.0 {
            natural_height / natural_width
        } else {
            1.0
        };
        let height = (width * ratio).round();
        let origin = self.place(Point::new(50.0, 50.0), (width, height), placement);
        let element = Element::new(
            "",
            ElementKind::Image(ImageData {
                src: Some(src.into()),
            }),
            Rect::new(origin.x, origin.y, width, height),
            Style::image_defaults(),
        );
        self.insert(element)
    }

    /// Appends a fully built element on top of the stack and selects it.
    ///
    /// A fresh id is assigned when the element has none or its id is taken.
    pub fn insert(&mut self, mut element: Element) -> String {
        if element.id.is_empty() || self.element(&element.id).is_some() {
            element.id = generate_id();
        }
        element.z_index = self.elements.len() as i64;
        element.normalize();
        let id = element.id.clone();
        tracing::debug!(
            "Added {} {} at ({:.1}, {:.1})",
            element.element_type(),
            id,
            element.x,
            element.y
        );
        self.elements.push(element);
        self.sort_by_z();
        self.selected = Some(id.clone());
        id
    }

    /// Merges a patch into an element. Returns whether the element exists.
    pub fn update_element(&mut self, id: &str, patch: &ElementPatch) -> bool {
        match self.element_mut(id) {
            Some(element) => {
                patch.apply(element);
                true
            }
            None => {
                tracing::debug!("Ignoring update of unknown element {}", id);
                false
            }
        }
    }

    /// Merges a JSON object of wire-format fields into an element.
    ///
    /// The id and type cannot be changed this way. Patches that would produce
    /// an invalid element are dropped.
    pub fn update_element_json(&mut self, id: &str, fields: &serde_json::Value) -> bool {
        let Some(patch) = fields.as_object() else {
            tracing::warn!("Element patch for {} is not an object", id);
            return false;
        };
        let Some(element) = self.element_mut(id) else {
            tracing::debug!("Ignoring update of unknown element {}", id);
            return false;
        };
        let mut value = match serde_json::to_value(&*element) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Could not serialize element {}: {}", id, e);
                return false;
            }
        };
        if let Some(object) = value.as_object_mut() {
            for (key, field) in patch {
                if key != "id" && key != "type" {
                    object.insert(key.clone(), field.clone());
                }
            }
        }
        match serde_json::from_value::<Element>(value) {
            Ok(mut updated) => {
                updated.normalize();
                let z_changed = updated.z_index != element.z_index;
                *element = updated;
                if z_changed {
                    self.sort_by_z();
                }
                true
            }
            Err(e) => {
                tracing::warn!("Rejected patch for element {}: {}", id, e);
                false
            }
        }
    }

    /// Removes an element, clearing the selection if it was selected.
    pub fn delete_element(&mut self, id: &str) -> bool {
        let before = self.elements.len();
        self.elements.retain(|e| e.id != id);
        let removed = self.elements.len() != before;
        if removed {
            tracing::debug!("Deleted element {}", id);
            if self.selected.as_deref() == Some(id) {
                self.selected = None;
            }
        }
        removed
    }

    /// Replaces the whole element list (snapshot restore, template load).
    pub fn replace_elements(&mut self, elements: Vec<Element>) {
        self.elements = elements;
        for element in &mut self.elements {
            element.normalize();
        }
        self.sort_by_z();
        if let Some(id) = self.selected.clone() {
            if self.element(&id).is_none() {
                self.selected = None;
            }
        }
    }

    /// Writes a table cell. Returns false for unknown ids, non-tables and
    /// out-of-range cells.
    pub fn set_table_cell(&mut self, id: &str, row: usize, col: usize, text: &str) -> bool {
        self.element_mut(id)
            .is_some_and(|element| element.set_table_cell(row, col, text))
    }

    pub(crate) fn sort_by_z(&mut self) {
        self.elements.sort_by_key(|e| e.z_index);
    }

    /// Top-left corner for a new element of `size` under `placement`.
    fn place(&self, default: Point, size: (f64, f64), placement: Placement) -> Point {
        let (width, height) = size;
        match placement {
            Placement::Default => Point::new(
                clamp_into(default.x, self.width() - width),
                clamp_into(default.y, self.height() - height),
            ),
            Placement::At(p) => Point::new(
                clamp_into(p.x, self.width() - width),
                clamp_into(p.y, self.height() - height),
            ),
            Placement::Drop(p) => Point::new(
                clamp_into(p.x - 50.0, self.width() - 100.0),
                clamp_into(p.y - 25.0, self.height() - 50.0),
            ),
        }
    }

    fn build_element(&self, element_type: ElementType, placement: Placement) -> Element {
        let dropped = matches!(placement, Placement::Drop(_));
        let (default_origin, size) = match (element_type, dropped) {
            (ElementType::Text, true) => ((50.0, 50.0), (120.0, 30.0)),
            (ElementType::Barcode, true) => ((50.0, 50.0), (200.0, 100.0)),
            (_, true) => ((50.0, 50.0), (100.0, 100.0)),
            (ElementType::Text, false) => ((50.0, 50.0), (120.0, 30.0)),
            (ElementType::Placeholder, false) => ((50.0, 50.0), (150.0, 35.0)),
            (ElementType::Barcode, false) => ((50.0, 50.0), (200.0, 80.0)),
            (ElementType::Rectangle | ElementType::Circle, false) => ((20.0, 20.0), (80.0, 60.0)),
            (ElementType::Table, false) => ((20.0, 20.0), (120.0, 50.0)),
            (ElementType::Line, false) => ((50.0, 50.0), (100.0, 0.0)),
            (ElementType::Image, false) => ((50.0, 50.0), (100.0, 100.0)),
        };
        let origin = self.place(
            Point::new(default_origin.0, default_origin.1),
            size,
            placement,
        );
        let bounds = Rect::new(origin.x, origin.y, size.0, size.1);

        match element_type {
            ElementType::Text => {
                let content = if dropped { "New Text" } else { "Sample Text" };
                Element::new(
                    "",
                    ElementKind::Text {
                        content: content.to_string(),
                    },
                    bounds,
                    Style::text_defaults(),
                )
            }
            ElementType::Placeholder => {
                let mut style = Style::text_defaults();
                style.border_color = Some("transparent".into());
                style.letter_spacing = None;
                style.line_height = None;
                style.border_radius = None;
                style.opacity = None;
                style.lock_aspect_ratio = None;
                Element::new(
                    "",
                    ElementKind::Placeholder {
                        content: "{{field}}".to_string(),
                    },
                    bounds,
                    style,
                )
            }
            ElementType::Barcode => Element::new(
                "",
                ElementKind::Barcode(BarcodeData {
                    barcode_type: DEFAULT_BARCODE_TYPE.to_string(),
                    ..Default::default()
                }),
                bounds,
                Style::text_defaults(),
            ),
            ElementType::Rectangle => {
                Element::new("", ElementKind::Rectangle, bounds, Style::shape_defaults())
            }
            ElementType::Circle => {
                let mut style = Style::shape_defaults();
                style.border_radius = None;
                Element::new("", ElementKind::Circle, bounds, style)
            }
            ElementType::Table => {
                let mut element = Element::new(
                    "",
                    ElementKind::Table(TableData::new(2, 2)),
                    bounds,
                    Style::table_defaults(),
                );
                element.sync_table_cells();
                element
            }
            ElementType::Line => Element::line(
                "",
                Point::new(bounds.x, bounds.y),
                Point::new(bounds.x + size.0, bounds.y),
                Style::line_defaults(),
            ),
            ElementType::Image => Element::new(
                "",
                ElementKind::Image(ImageData::default()),
                bounds,
                Style::image_defaults(),
            ),
        }
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(LabelSize::default())
    }
}
