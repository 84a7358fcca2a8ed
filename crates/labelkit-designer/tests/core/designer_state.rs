use labelkit_core::LabelSize;
use labelkit_designer::canvas::{ElementPatch, Placement};
use labelkit_designer::designer_state::{
    ApplyMode, DesignerConfig, DesignerState, Key, KeyEvent,
};
use labelkit_designer::interaction::{Effect, InteractionState, PointerEvent};
use labelkit_designer::model::{Element, ElementKind, ElementType, Rect, ShapeKind, Style};
use labelkit_designer::serialization::GeneratedLabel;
use labelkit_settings::CanvasSettings;

/// Pointer at a canvas position, offset by the default ruler origin.
fn at(x: f64, y: f64) -> PointerEvent {
    PointerEvent::new(x + 32.0, y + 32.0)
}

fn drag(designer: &mut DesignerState, from: (f64, f64), to: (f64, f64)) -> Effect {
    designer.pointer_down(at(from.0, from.1));
    designer.pointer_move(at(to.0, to.1));
    designer.pointer_up(at(to.0, to.1))
}

fn rect(id: &str) -> Element {
    Element::new(
        id,
        ElementKind::Rectangle,
        Rect::new(10.0, 10.0, 40.0, 40.0),
        Style::shape_defaults(),
    )
}

#[test]
fn test_designer_state_defaults() {
    let designer = DesignerState::default();
    assert!(designer.elements().is_empty());
    assert!(designer.interaction().is_idle());
    assert_eq!(designer.history().len(), 1);
    assert_eq!(designer.zoom(), 100.0);
    assert_eq!(designer.active_barcode_type(), "CODE128");
    assert!(!designer.show_grid);
}

#[test]
fn test_draw_line_commits_history() {
    let mut designer = DesignerState::default();
    designer.start_drawing_line();
    assert!(designer.interaction().is_drawing());

    let effect = drag(&mut designer, (10.0, 10.0), (100.0, 100.0));
    let Effect::Created(id) = effect else {
        panic!("line should be created");
    };
    assert!(designer.interaction().is_idle());
    assert_eq!(designer.history().len(), 2);

    let line = designer.canvas().element(&id).unwrap();
    assert_eq!((line.x, line.y, line.width, line.height), (10.0, 10.0, 90.0, 90.0));
    let data = line.line_data().unwrap();
    assert_eq!((data.x1, data.y1, data.x2, data.y2), (10.0, 10.0, 100.0, 100.0));
}

#[test]
fn test_drag_is_clamped_to_label() {
    let mut designer = DesignerState::new(DesignerConfig {
        label_size: LabelSize::new(100.0, 80.0),
        ..Default::default()
    });
    let id = designer.add_element(ElementType::Text, Placement::Default);

    let effect = drag(&mut designer, (60.0, 60.0), (1060.0, 1060.0));
    assert_eq!(effect, Effect::Commit);

    let text = designer.canvas().element(&id).unwrap();
    assert!((text.x - 257.952_755_91).abs() < 1e-6);
    assert!((text.y - 272.362_204_728).abs() < 1e-6);
}

#[test]
fn test_undo_on_fresh_history_is_noop() {
    let mut designer =
        DesignerState::new(DesignerConfig::default().with_elements(vec![rect("a")]));
    let before = designer.elements().to_vec();

    assert!(!designer.undo());
    assert!(!designer.redo());
    assert_eq!(designer.elements(), before.as_slice());
}

#[test]
fn test_undo_redo_drag() {
    let mut designer =
        DesignerState::new(DesignerConfig::default().with_elements(vec![rect("a")]));

    drag(&mut designer, (20.0, 20.0), (70.0, 40.0));
    assert_eq!(designer.canvas().element("a").unwrap().x, 60.0);
    assert_eq!(designer.canvas().selected_id(), Some("a"));

    assert!(designer.undo());
    assert_eq!(designer.canvas().element("a").unwrap().x, 10.0);
    assert_eq!(designer.canvas().selected_id(), None);

    assert!(designer.redo());
    assert_eq!(designer.canvas().element("a").unwrap().x, 60.0);
    assert_eq!(designer.history().current(), designer.elements());
}

#[test]
fn test_add_and_update_do_not_commit() {
    let mut designer = DesignerState::default();
    let id = designer.add_element(ElementType::Rectangle, Placement::Default);
    designer.update_element(&id, &ElementPatch::position(5.0, 5.0));
    assert_eq!(designer.history().len(), 1);

    designer.commit();
    assert_eq!(designer.history().len(), 2);
}

#[test]
fn test_drop_element_commits() {
    let mut designer = DesignerState::default();
    let id = designer.drop_element(ElementType::Image, 182.0, 132.0);

    let image = designer.canvas().element(&id).unwrap();
    assert_eq!((image.x, image.y), (100.0, 75.0));
    assert_eq!(designer.history().len(), 2);
}

#[test]
fn test_shortcuts() {
    let mut designer = DesignerState::default();
    designer.add_element(ElementType::Text, Placement::Default);
    designer.commit();

    assert!(designer.key_down(KeyEvent::command(Key::Char('d'))));
    assert_eq!(designer.elements().len(), 2);
    assert_eq!(designer.history().len(), 3);

    assert!(designer.key_down(KeyEvent::command(Key::Char('z'))));
    assert_eq!(designer.elements().len(), 1);

    assert!(designer.key_down(KeyEvent::command(Key::Char('z')).with_shift()));
    assert_eq!(designer.elements().len(), 2);

    assert!(designer.key_down(KeyEvent::command(Key::Char('='))));
    assert_eq!(designer.zoom(), 110.0);
    assert!(designer.key_down(KeyEvent::command(Key::Char('0'))));
    assert_eq!(designer.zoom(), 100.0);

    assert!(!designer.key_down(KeyEvent::new(Key::Char('q'))));
}

#[test]
fn test_duplicate_without_selection() {
    let mut designer = DesignerState::default();
    assert!(designer.duplicate_selected().is_none());
    assert_eq!(designer.history().len(), 1);
}

#[test]
fn test_text_editing_swallows_shortcuts() {
    let mut designer = DesignerState::default();
    let id = designer.add_element(ElementType::Text, Placement::Default);
    designer.commit();

    designer.double_click(at(60.0, 60.0));
    assert!(designer.interaction().is_editing());
    designer.edit_text("Use by 12/2026");

    assert!(!designer.key_down(KeyEvent::command(Key::Char('z'))));
    assert_eq!(designer.elements().len(), 1);

    assert!(designer.key_down(KeyEvent::command(Key::Enter)));
    assert!(designer.interaction().is_idle());
    assert_eq!(
        designer.canvas().element(&id).unwrap().content(),
        Some("Use by 12/2026")
    );
    // Confirming an edit is not an undo step.
    assert_eq!(designer.history().len(), 2);
}

#[test]
fn test_entering_draw_mode_clears_selection() {
    let mut designer = DesignerState::default();
    designer.add_element(ElementType::Rectangle, Placement::Default);
    assert!(designer.canvas().selected_id().is_some());

    designer.start_drawing_shape(ShapeKind::Circle);
    assert_eq!(designer.canvas().selected_id(), None);
    assert!(designer.key_down(KeyEvent::new(Key::Escape)));
    assert!(designer.interaction().is_idle());
}

#[test]
fn test_selecting_barcode_sets_active_type() {
    let mut designer = DesignerState::default();
    let id = designer.add_element(ElementType::Barcode, Placement::Default);
    designer.update_element(
        &id,
        &ElementPatch {
            barcode_type: Some("QR".to_string()),
            ..Default::default()
        },
    );
    designer.clear_selection();

    designer.pointer_down(at(100.0, 80.0));
    assert_eq!(designer.active_barcode_type(), "QR");
    designer.pointer_up(at(100.0, 80.0));

    designer.start_drawing_barcode(None);
    match designer.interaction() {
        InteractionState::DrawingBarcode { barcode_type, .. } => assert_eq!(barcode_type, "QR"),
        other => panic!("unexpected state {}", other.name()),
    }
}

#[test]
fn test_load_elements_adopts_baseline() {
    let mut designer = DesignerState::default();
    designer.load_elements(vec![rect("a")]);
    assert_eq!(designer.history().len(), 1);
    assert_eq!(designer.history().current().len(), 1);

    assert!(!designer.undo());
    assert_eq!(designer.elements().len(), 1);
}

#[test]
fn test_auto_fit_on_open() {
    let mut designer = DesignerState::default();
    designer.open(1_000);

    assert!(!designer.tick(1_400));
    assert!(designer.tick(1_500));
    assert_eq!(designer.zoom(), 282.0);
}

#[test]
fn test_label_resize_refits_after_debounce() {
    let mut designer = DesignerState::new(DesignerConfig {
        auto_fit: false,
        ..Default::default()
    });
    designer.open(0);
    assert!(!designer.tick(10_000));

    designer.set_label_size(LabelSize::new(50.0, 25.0), 10_000);
    assert!(!designer.tick(10_100));
    assert!(designer.tick(10_200));
    assert_eq!(designer.zoom(), 300.0);
}

#[test]
fn test_apply_generated_replace() {
    let mut designer = DesignerState::default();
    designer.add_element(ElementType::Text, Placement::Default);
    designer.commit();

    let label = GeneratedLabel {
        width_mm: 62.0,
        height_mm: 29.0,
        elements: vec![rect("g1"), rect("g2")],
    };
    let ids = designer.apply_generated(label, ApplyMode::Replace, 0).unwrap();

    assert_eq!(ids, vec!["g1".to_string(), "g2".to_string()]);
    assert_eq!(designer.canvas().label_size(), LabelSize::new(62.0, 29.0));
    assert_eq!(designer.history().len(), 1);
    assert!(!designer.history().can_undo());
}

#[test]
fn test_apply_generated_append() {
    let mut designer =
        DesignerState::new(DesignerConfig::default().with_elements(vec![rect("a")]));

    let label = GeneratedLabel {
        width_mm: 10.0,
        height_mm: 10.0,
        elements: vec![rect("a")],
    };
    let ids = designer.apply_generated(label, ApplyMode::Append, 0).unwrap();

    assert_eq!(ids.len(), 1);
    assert_ne!(ids[0], "a");
    assert_eq!(designer.elements().len(), 2);
    assert_eq!(designer.canvas().label_size(), LabelSize::default());
    assert_eq!(designer.history().len(), 2);
}

#[test]
fn test_apply_generated_rejects_bad_size() {
    let mut designer = DesignerState::default();
    let label = GeneratedLabel {
        width_mm: 0.0,
        height_mm: 10.0,
        elements: Vec::new(),
    };
    assert!(designer
        .apply_generated(label, ApplyMode::Replace, 0)
        .is_err());
}

#[test]
fn test_template_round_trip_through_state() {
    let mut designer = DesignerState::default();
    designer.add_element(ElementType::Barcode, Placement::Default);
    designer.add_placeholder("sku");
    let template = designer.to_template("Shelf label");

    let mut other = DesignerState::default();
    other.load_template(&template, 0).unwrap();
    assert_eq!(other.elements(), designer.elements());
    assert_eq!(other.canvas().selected_id(), None);
    assert!(!other.history().can_undo());
}

#[test]
fn test_config_from_settings() {
    let settings = CanvasSettings {
        show_grid: true,
        zoom: 150.0,
        history_limit: Some(2),
        ..Default::default()
    };
    let mut designer = DesignerState::new(DesignerConfig::from_settings(&settings));
    assert!(designer.show_grid);
    assert_eq!(designer.zoom(), 150.0);

    for _ in 0..4 {
        designer.add_element(ElementType::Rectangle, Placement::Default);
        designer.commit();
    }
    assert_eq!(designer.history().len(), 2);
}

#[test]
fn test_press_without_move_is_a_history_step() {
    let mut designer =
        DesignerState::new(DesignerConfig::default().with_elements(vec![rect("a")]));

    assert_eq!(drag(&mut designer, (20.0, 20.0), (20.0, 20.0)), Effect::Commit);
    assert_eq!(designer.history().len(), 2);

    // South-east resize handle of the selected 40 x 40 box.
    designer.pointer_down(at(50.0, 50.0));
    assert!(designer.interaction().is_manipulating());
    assert_eq!(designer.pointer_up(at(50.0, 50.0)), Effect::Commit);
    assert_eq!(designer.history().len(), 3);

    assert_eq!(designer.canvas().element("a"), Some(&rect("a")));
    assert!(designer.undo());
    assert_eq!(designer.canvas().element("a"), Some(&rect("a")));
}

#[test]
fn test_invalid_label_size_is_ignored() {
    let mut designer = DesignerState::new(DesignerConfig {
        label_size: LabelSize::new(0.0, 0.0),
        ..Default::default()
    });
    assert_eq!(designer.canvas().label_size(), LabelSize::default());

    assert!(!designer.set_label_size(LabelSize::new(-1.0, 50.0), 0));
    assert!(!designer.tick(10_000));
    assert_eq!(designer.canvas().label_size(), LabelSize::default());

    designer.start_drawing_line();
    designer.pointer_down(at(10.0, 10.0));
    designer.pointer_move(at(60.0, 10.0));
    assert!(matches!(designer.pointer_up(at(60.0, 10.0)), Effect::Created(_)));
}

#[test]
fn test_settings_file_configures_designer() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("canvas.toml");
    CanvasSettings {
        default_label_size: LabelSize::new(62.0, 29.0),
        show_grid: true,
        ..Default::default()
    }
    .save_to_file(&path)
    .unwrap();

    let settings = CanvasSettings::load_or_default(&path);
    let mut designer = DesignerState::new(DesignerConfig::from_settings(&settings));
    designer.add_element(ElementType::Text, Placement::Default);

    let scene = designer.render();
    assert!((scene.width - labelkit_core::mm_to_px(62.0)).abs() < 1e-9);
    assert_eq!(scene.boxes().count(), 1);
    assert!(designer.show_grid);
}
