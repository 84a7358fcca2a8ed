//! Designer state: one open label document.
//!
//! Owns the canvas, the undo history and the interaction state, and decides
//! which operations become history entries:
//!
//! | operation                              | history |
//! |----------------------------------------|---------|
//! | drag / resize / rotate / endpoint drag | commit on release |
//! | draw-to-create                         | commit on creation |
//! | palette drop, duplicate, append        | commit |
//! | add, update, delete, reorder           | none (call [`DesignerState::commit`]) |
//! | text edit confirm                      | none |
//! | template load, generated replace       | history reset |

mod shortcuts;

pub use shortcuts::{Key, KeyEvent, Shortcut};

use labelkit_core::constants::{DEFAULT_BARCODE_TYPE, DEFAULT_ZOOM, FIT_DEBOUNCE_MS, INITIAL_FIT_DELAY_MS};
use labelkit_core::LabelSize;
use labelkit_settings::CanvasSettings;

use crate::canvas::{Canvas, ElementPatch, Placement, ZOrder};
use crate::history::History;
use crate::interaction::{self, Effect, InteractionState, PointerEvent};
use crate::model::{Element, ElementKind, ElementType, Point, ShapeKind};
use crate::renderer::{self, Scene};
use crate::serialization::{GeneratedLabel, TemplatePayload};

/// Host configuration of a designer instance.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignerConfig {
    pub elements: Vec<Element>,
    pub label_size: LabelSize,
    pub show_grid: bool,
    /// Initial zoom in percent, clamped to [10, 400].
    pub zoom: f64,
    pub history_limit: Option<usize>,
    pub auto_fit: bool,
    pub fit_debounce_ms: u64,
}

impl Default for DesignerConfig {
    fn default() -> Self {
        Self {
            elements: Vec::new(),
            label_size: LabelSize::default(),
            show_grid: false,
            zoom: DEFAULT_ZOOM,
            history_limit: None,
            auto_fit: true,
            fit_debounce_ms: FIT_DEBOUNCE_MS,
        }
    }
}

impl DesignerConfig {
    pub fn from_settings(settings: &CanvasSettings) -> Self {
        Self {
            elements: Vec::new(),
            label_size: settings.default_label_size,
            show_grid: settings.show_grid,
            zoom: settings.zoom,
            history_limit: settings.history_limit,
            auto_fit: settings.auto_fit,
            fit_debounce_ms: settings.fit_debounce_ms,
        }
    }

    pub fn with_elements(mut self, elements: Vec<Element>) -> Self {
        self.elements = elements;
        self
    }
}

/// How generated elements are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyMode {
    /// Replace the label size and all elements; history restarts.
    Replace,
    /// Add the elements on top of the existing ones.
    Append,
}

/// The designer state of one open document.
#[derive(Debug, Clone)]
pub struct DesignerState {
    canvas: Canvas,
    history: History,
    interaction: InteractionState,
    pub show_grid: bool,
    /// Symbology used by the next barcode draw.
    active_barcode_type: String,
    auto_fit: bool,
    fit_debounce_ms: u64,
}

impl DesignerState {
    pub fn new(config: DesignerConfig) -> Self {
        let mut canvas = Canvas::with_elements(config.label_size, config.elements);
        canvas.viewport_mut().set_zoom(config.zoom);
        let history = History::with_limit(canvas.elements(), config.history_limit);
        Self {
            canvas,
            history,
            interaction: InteractionState::Idle,
            show_grid: config.show_grid,
            active_barcode_type: DEFAULT_BARCODE_TYPE.to_string(),
            auto_fit: config.auto_fit,
            fit_debounce_ms: config.fit_debounce_ms,
        }
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn elements(&self) -> &[Element] {
        self.canvas.elements()
    }

    pub fn active_barcode_type(&self) -> &str {
        &self.active_barcode_type
    }

    pub fn set_active_barcode_type(&mut self, barcode_type: &str) {
        self.active_barcode_type = barcode_type.to_string();
    }

    /// Snapshots the current elements into the history.
    pub fn commit(&mut self) {
        self.history.commit(self.canvas.elements());
    }

    fn apply_effect(&mut self, effect: &Effect) {
        if effect.commits() {
            self.commit();
        }
    }

    // --- pointer and keyboard -------------------------------------------

    pub fn pointer_down(&mut self, event: PointerEvent) -> Effect {
        let state = std::mem::take(&mut self.interaction);
        let outcome = interaction::pointer_down(state, &mut self.canvas, event);
        self.interaction = outcome.state;

        if let Some(ElementKind::Barcode(barcode)) =
            self.canvas.selected_element().map(|e| &e.kind)
        {
            if self.active_barcode_type != barcode.barcode_type {
                self.active_barcode_type = barcode.barcode_type.clone();
            }
        }
        self.apply_effect(&outcome.effect);
        outcome.effect
    }

    pub fn pointer_move(&mut self, event: PointerEvent) {
        let state = std::mem::take(&mut self.interaction);
        self.interaction = interaction::pointer_move(state, &mut self.canvas, event);
    }

    pub fn pointer_up(&mut self, event: PointerEvent) -> Effect {
        let state = std::mem::take(&mut self.interaction);
        let outcome = interaction::pointer_up(state, &mut self.canvas, event);
        self.interaction = outcome.state;
        self.apply_effect(&outcome.effect);
        outcome.effect
    }

    pub fn double_click(&mut self, event: PointerEvent) {
        let state = std::mem::take(&mut self.interaction);
        self.interaction = interaction::double_click(state, &mut self.canvas, event).state;
    }

    /// Handles a key press. Returns whether it was consumed.
    pub fn key_down(&mut self, event: KeyEvent) -> bool {
        let Some(shortcut) = Shortcut::resolve(&event, self.interaction.is_editing()) else {
            return false;
        };
        tracing::debug!("Shortcut {:?}", shortcut);
        match shortcut {
            Shortcut::Undo => {
                self.undo();
            }
            Shortcut::Redo => {
                self.redo();
            }
            Shortcut::Duplicate => {
                self.duplicate_selected();
            }
            Shortcut::ZoomIn => self.zoom_in(),
            Shortcut::ZoomOut => self.zoom_out(),
            Shortcut::ZoomReset => self.reset_zoom(),
            Shortcut::ConfirmEdit => self.confirm_edit(),
            Shortcut::Escape => self.escape(),
        }
        true
    }

    pub fn escape(&mut self) {
        let state = std::mem::take(&mut self.interaction);
        self.interaction = interaction::escape(state);
    }

    pub fn edit_text(&mut self, text: &str) {
        let state = std::mem::take(&mut self.interaction);
        self.interaction = interaction::edit_text(state, text);
    }

    pub fn confirm_edit(&mut self) {
        let state = std::mem::take(&mut self.interaction);
        self.interaction = interaction::confirm_edit(state, &mut self.canvas);
    }

    // --- drawing modes --------------------------------------------------

    fn enter_mode(&mut self, mode: InteractionState) {
        if self.interaction.is_editing() {
            self.confirm_edit();
        }
        self.canvas.clear_selection();
        tracing::debug!("Entering {}", mode.name());
        self.interaction = mode;
    }

    pub fn start_drawing_text(&mut self) {
        self.enter_mode(InteractionState::drawing_text());
    }

    pub fn start_drawing_line(&mut self) {
        self.enter_mode(InteractionState::drawing_line());
    }

    /// Enters barcode drawing; `None` uses the active barcode type.
    pub fn start_drawing_barcode(&mut self, barcode_type: Option<&str>) {
        if let Some(kind) = barcode_type {
            self.active_barcode_type = kind.to_string();
        }
        let kind = self.active_barcode_type.clone();
        self.enter_mode(InteractionState::drawing_barcode(Some(&kind)));
    }

    pub fn start_drawing_shape(&mut self, shape: ShapeKind) {
        self.enter_mode(InteractionState::drawing_shape(shape));
    }

    // --- element operations ---------------------------------------------

    pub fn add_element(&mut self, element_type: ElementType, placement: Placement) -> String {
        self.canvas.add_element(element_type, placement)
    }

    pub fn add_table(&mut self, rows: u32, cols: u32) -> String {
        self.canvas.add_table(rows, cols, Placement::Default)
    }

    pub fn add_placeholder(&mut self, field: &str) -> String {
        self.canvas.add_placeholder(field, Placement::Default)
    }

    pub fn add_image(&mut self, src: &str, natural_width: f64, natural_height: f64) -> String {
        self.canvas
            .add_image(src, natural_width, natural_height, Placement::Default)
    }

    /// Drops a palette item at a viewport position and commits.
    pub fn drop_element(&mut self, element_type: ElementType, vx: f64, vy: f64) -> String {
        let at = self.canvas.to_canvas(vx, vy);
        let id = self.canvas.add_element(element_type, Placement::Drop(at));
        self.commit();
        id
    }

    pub fn select(&mut self, id: &str) {
        self.canvas.select(id);
    }

    pub fn clear_selection(&mut self) {
        self.canvas.clear_selection();
    }

    pub fn update_element(&mut self, id: &str, patch: &ElementPatch) -> bool {
        self.canvas.update_element(id, patch)
    }

    pub fn delete_element(&mut self, id: &str) -> bool {
        if let InteractionState::EditingText { id: editing, .. } = &self.interaction {
            if editing == id {
                self.interaction = InteractionState::Idle;
            }
        }
        self.canvas.delete_element(id)
    }

    pub fn delete_selected(&mut self) -> bool {
        match self.canvas.selected_id().map(str::to_string) {
            Some(id) => self.delete_element(&id),
            None => false,
        }
    }

    pub fn reorder(&mut self, id: &str, direction: ZOrder) {
        self.canvas.reorder(id, direction);
    }

    /// Duplicates the selected element and commits.
    pub fn duplicate_selected(&mut self) -> Option<String> {
        let id = self.canvas.selected_id()?.to_string();
        let copy = self.canvas.duplicate(&id)?;
        self.commit();
        Some(copy)
    }

    pub fn set_table_cell(&mut self, id: &str, row: usize, col: usize, text: &str) -> bool {
        self.canvas.set_table_cell(id, row, col, text)
    }

    // --- history --------------------------------------------------------

    /// Restores the previous snapshot. Returns false at the start of history.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.undo() else {
            return false;
        };
        let snapshot = snapshot.to_vec();
        self.restore(snapshot);
        true
    }

    /// Restores the next snapshot. Returns false at the end of history.
    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.history.redo() else {
            return false;
        };
        let snapshot = snapshot.to_vec();
        self.restore(snapshot);
        true
    }

    fn restore(&mut self, snapshot: Vec<Element>) {
        self.interaction = InteractionState::Idle;
        self.canvas.replace_elements(snapshot);
        self.canvas.clear_selection();
    }

    // --- documents ------------------------------------------------------

    /// Replaces the elements from the host. A fresh, empty history adopts
    /// them as its baseline.
    pub fn load_elements(&mut self, elements: Vec<Element>) {
        self.interaction = InteractionState::Idle;
        self.canvas.replace_elements(elements);
        if self.history.adopt_baseline(self.canvas.elements()) {
            tracing::debug!("History baseline set from loaded elements");
        }
    }

    /// Opens a stored template. History restarts from its elements.
    pub fn load_template(
        &mut self,
        template: &TemplatePayload,
        now_ms: u64,
    ) -> labelkit_core::Result<()> {
        template.validate()?;
        let size = template.label_size()?;
        self.interaction = InteractionState::Idle;
        self.canvas.set_label_size(size);
        self.canvas.replace_elements(template.elements.clone());
        self.canvas.clear_selection();
        self.history.reset(self.canvas.elements());
        self.open(now_ms);
        tracing::info!(
            "Loaded template '{}' ({}, {} elements)",
            template.name,
            size,
            template.elements.len()
        );
        Ok(())
    }

    pub fn to_template(&self, name: &str) -> TemplatePayload {
        TemplatePayload::from_canvas(name, &self.canvas)
    }

    /// Applies generator output. Returns the ids of the elements now on the
    /// canvas that came from `label`.
    pub fn apply_generated(
        &mut self,
        label: GeneratedLabel,
        mode: ApplyMode,
        now_ms: u64,
    ) -> labelkit_core::Result<Vec<String>> {
        self.interaction = InteractionState::Idle;
        match mode {
            ApplyMode::Replace => {
                let size = label.label_size()?;
                self.canvas.set_label_size(size);
                self.canvas.replace_elements(label.elements);
                self.canvas.clear_selection();
                self.history.reset(self.canvas.elements());
                self.canvas
                    .viewport_mut()
                    .request_fit(now_ms, self.fit_debounce_ms);
                Ok(self.canvas.elements().iter().map(|e| e.id.clone()).collect())
            }
            ApplyMode::Append => {
                let ids = self.canvas.append_elements(label.elements);
                self.commit();
                Ok(ids)
            }
        }
    }

    // --- view -----------------------------------------------------------

    /// Resizes the label and schedules a refit. Invalid sizes are ignored.
    pub fn set_label_size(&mut self, size: LabelSize, now_ms: u64) -> bool {
        if !self.canvas.set_label_size(size) {
            return false;
        }
        self.canvas
            .viewport_mut()
            .request_fit(now_ms, self.fit_debounce_ms);
        true
    }

    /// Schedules the initial fit after a document is opened.
    pub fn open(&mut self, now_ms: u64) {
        if self.auto_fit {
            self.canvas
                .viewport_mut()
                .request_fit(now_ms, INITIAL_FIT_DELAY_MS);
        }
    }

    pub fn set_container_size(&mut self, width: f64, height: f64, now_ms: u64) {
        let delay = self.fit_debounce_ms;
        self.canvas
            .viewport_mut()
            .set_container_size(width, height, now_ms, delay);
    }

    /// Runs any due refit. Returns whether the zoom was recomputed.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        let (w, h) = (self.canvas.width(), self.canvas.height());
        self.canvas.viewport_mut().poll_fit(now_ms, w, h)
    }

    pub fn zoom(&self) -> f64 {
        self.canvas.viewport().zoom()
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.canvas.viewport_mut().set_zoom(zoom);
    }

    pub fn zoom_in(&mut self) {
        self.canvas.viewport_mut().zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.canvas.viewport_mut().zoom_out();
    }

    pub fn reset_zoom(&mut self) {
        self.canvas.viewport_mut().reset_zoom();
    }

    pub fn toggle_grid(&mut self) {
        self.show_grid = !self.show_grid;
    }

    /// Canvas-space position of a viewport point.
    pub fn to_canvas(&self, vx: f64, vy: f64) -> Point {
        self.canvas.to_canvas(vx, vy)
    }

    /// Draw instructions for the current frame.
    pub fn render(&self) -> Scene {
        renderer::project(&self.canvas, &self.interaction, self.show_grid)
    }
}

impl Default for DesignerState {
    fn default() -> Self {
        Self::new(DesignerConfig::default())
    }
}
