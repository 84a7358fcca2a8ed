use labelkit_core::LabelSize;
use labelkit_designer::canvas::{Canvas, ElementPatch, HitTarget, Placement, ZOrder};
use labelkit_designer::model::{ElementKind, ElementType, Handle, Point};
use serde_json::json;

fn ids(canvas: &Canvas) -> Vec<String> {
    canvas.elements().iter().map(|e| e.id.clone()).collect()
}

#[test]
fn test_canvas_add_elements() {
    let mut canvas = Canvas::default();
    let text = canvas.add_element(ElementType::Text, Placement::Default);
    let rect = canvas.add_element(ElementType::Rectangle, Placement::Default);

    assert_eq!(canvas.len(), 2);
    assert_ne!(text, rect);
    assert!(text.starts_with("element_"));
    assert_eq!(canvas.selected_id(), Some(rect.as_str()));

    let text = canvas.element(&text).unwrap();
    assert_eq!((text.x, text.y, text.width, text.height), (50.0, 50.0, 120.0, 30.0));
    assert_eq!(text.content(), Some("Sample Text"));
    assert_eq!(text.z_index, 0);

    let rect = canvas.element(&rect).unwrap();
    assert_eq!((rect.x, rect.y, rect.width, rect.height), (20.0, 20.0, 80.0, 60.0));
    assert_eq!(rect.z_index, 1);
}

#[test]
fn test_canvas_size_in_pixels() {
    let canvas = Canvas::new(LabelSize::new(100.0, 50.0));
    assert!((canvas.width() - 377.952_755_91).abs() < 1e-6);
    assert!((canvas.height() - 188.976_377_955).abs() < 1e-6);
}

#[test]
fn test_canvas_drop_placement() {
    let mut canvas = Canvas::default();
    let id = canvas.add_element(ElementType::Barcode, Placement::Drop(Point::new(150.0, 100.0)));
    let barcode = canvas.element(&id).unwrap();
    assert_eq!((barcode.x, barcode.y), (100.0, 75.0));
    assert_eq!((barcode.width, barcode.height), (200.0, 100.0));

    // Dropping near the origin keeps the element on the canvas.
    let id = canvas.add_element(ElementType::Text, Placement::Drop(Point::new(5.0, 5.0)));
    let text = canvas.element(&id).unwrap();
    assert_eq!((text.x, text.y), (0.0, 0.0));
    assert_eq!(text.content(), Some("New Text"));
}

#[test]
fn test_canvas_add_table_and_placeholder() {
    let mut canvas = Canvas::default();
    let table = canvas.add_table(3, 4, Placement::Default);
    let table = canvas.element(&table).unwrap();
    let data = table.table_data().unwrap();
    assert_eq!((data.rows, data.cols), (3, 4));
    assert_eq!(table.width, 4.0 * data.cell_width);
    assert_eq!(table.height, 3.0 * data.cell_height);
    assert_eq!(data.table_data.len(), 3);

    let placeholder = canvas.add_placeholder("sku", Placement::Default);
    let placeholder = canvas.element(&placeholder).unwrap();
    assert_eq!(placeholder.element_type(), ElementType::Placeholder);
    assert_eq!(placeholder.content(), Some("{{sku}}"));
}

#[test]
fn test_canvas_add_image_caps_width() {
    let mut canvas = Canvas::default();
    let id = canvas.add_image("data:image/png;base64,AAAA", 400.0, 300.0, Placement::Default);
    let image = canvas.element(&id).unwrap();
    assert_eq!((image.width, image.height), (200.0, 150.0));
    match &image.kind {
        ElementKind::Image(data) => assert!(data.src.is_some()),
        other => panic!("unexpected kind {:?}", other),
    }
}

#[test]
fn test_canvas_unknown_ids_are_ignored() {
    let mut canvas = Canvas::default();
    canvas.add_element(ElementType::Text, Placement::Default);
    let before = canvas.elements().to_vec();

    assert!(!canvas.update_element("missing", &ElementPatch::position(1.0, 1.0)));
    assert!(!canvas.delete_element("missing"));
    canvas.reorder("missing", ZOrder::Forward);
    assert!(canvas.duplicate("missing").is_none());

    assert_eq!(canvas.elements(), before.as_slice());
}

#[test]
fn test_canvas_delete_clears_selection() {
    let mut canvas = Canvas::default();
    let id = canvas.add_element(ElementType::Circle, Placement::Default);
    assert_eq!(canvas.selected_id(), Some(id.as_str()));

    assert!(canvas.delete_element(&id));
    assert!(canvas.is_empty());
    assert_eq!(canvas.selected_id(), None);
}

#[test]
fn test_canvas_reorder() {
    let mut canvas = Canvas::default();
    let a = canvas.add_element(ElementType::Rectangle, Placement::Default);
    let b = canvas.add_element(ElementType::Rectangle, Placement::Default);
    let c = canvas.add_element(ElementType::Rectangle, Placement::Default);

    canvas.reorder(&c, ZOrder::Forward);
    canvas.reorder(&a, ZOrder::Backward);
    assert_eq!(ids(&canvas), vec![a.clone(), b.clone(), c.clone()]);

    canvas.reorder(&a, ZOrder::Forward);
    assert_eq!(ids(&canvas), vec![b.clone(), a.clone(), c.clone()]);

    canvas.reorder(&c, ZOrder::Backward);
    assert_eq!(ids(&canvas), vec![b, c, a]);

    let z: Vec<i64> = canvas.elements().iter().map(|e| e.z_index).collect();
    assert_eq!(z, vec![0, 1, 2]);
}

#[test]
fn test_canvas_duplicate_offsets_copy() {
    let mut canvas = Canvas::default();
    let id = canvas.add_element(ElementType::Text, Placement::Default);
    let copy = canvas.duplicate(&id).unwrap();

    assert_ne!(copy, id);
    assert_eq!(canvas.selected_id(), Some(copy.as_str()));
    let copy = canvas.element(&copy).unwrap();
    assert_eq!((copy.x, copy.y), (60.0, 60.0));
    assert_eq!(copy.z_index, 1);
    assert_eq!(copy.content(), Some("Sample Text"));
}

#[test]
fn test_canvas_duplicate_stays_inside() {
    let mut canvas = Canvas::default();
    let id = canvas.add_element(
        ElementType::Rectangle,
        Placement::At(Point::new(1000.0, 1000.0)),
    );
    let original = canvas.element(&id).unwrap().clone();
    assert!((original.x + original.width - canvas.width()).abs() < 1e-9);

    let copy = canvas.duplicate(&id).unwrap();
    let copy = canvas.element(&copy).unwrap();
    assert_eq!((copy.x, copy.y), (original.x, original.y));
}

#[test]
fn test_canvas_duplicate_line_moves_endpoints() {
    let mut canvas = Canvas::default();
    let id = canvas.add_element(ElementType::Line, Placement::Default);
    let copy = canvas.duplicate(&id).unwrap();
    let line = *canvas.element(&copy).unwrap().line_data().unwrap();
    assert_eq!((line.x1, line.y1, line.x2, line.y2), (60.0, 60.0, 160.0, 60.0));
}

#[test]
fn test_canvas_update_element_patch() {
    let mut canvas = Canvas::default();
    let id = canvas.add_table(2, 2, Placement::Default);

    assert!(canvas.update_element(&id, &ElementPatch::size(200.0, 100.0)));
    let table = canvas.element(&id).unwrap();
    let data = table.table_data().unwrap();
    assert_eq!((data.cell_width, data.cell_height), (100.0, 50.0));

    assert!(canvas.update_element(&id, &ElementPatch::rotation(30.0)));
    assert_eq!(canvas.element(&id).unwrap().rotation, 30.0);
}

#[test]
fn test_canvas_update_element_json() {
    let mut canvas = Canvas::default();
    let id = canvas.add_element(ElementType::Text, Placement::Default);

    assert!(canvas.update_element_json(
        &id,
        &json!({ "x": 5, "content": "Batch 42", "fontSize": 18, "id": "hijacked", "type": "line" })
    ));
    let text = canvas.element(&id).unwrap();
    assert_eq!(text.x, 5.0);
    assert_eq!(text.content(), Some("Batch 42"));
    assert_eq!(text.style.font_size, Some(18.0));
    assert_eq!(text.element_type(), ElementType::Text);

    let before = text.clone();
    assert!(!canvas.update_element_json(&id, &json!({ "width": "wide" })));
    assert!(!canvas.update_element_json(&id, &json!([1, 2, 3])));
    assert_eq!(canvas.element(&id), Some(&before));
}

#[test]
fn test_canvas_keeps_unclaimed_fields() {
    let mut canvas = Canvas::default();
    let id = canvas.add_element(ElementType::Rectangle, Placement::Default);

    assert!(canvas.update_element_json(&id, &json!({ "locked": true, "x": 12 })));
    let rect = canvas.element(&id).unwrap();
    assert_eq!(rect.x, 12.0);
    assert_eq!(rect.extra.get("locked"), Some(&json!(true)));

    assert!(canvas.update_element(&id, &ElementPatch::size(60.0, 40.0)));
    assert_eq!(canvas.element(&id).unwrap().extra.get("locked"), Some(&json!(true)));

    let copy = canvas.duplicate(&id).unwrap();
    assert_eq!(canvas.element(&copy).unwrap().extra.get("locked"), Some(&json!(true)));

    assert!(canvas.update_element_json(&id, &json!({ "locked": false })));
    assert_eq!(canvas.element(&id).unwrap().extra.get("locked"), Some(&json!(false)));
    assert_eq!(canvas.element(&copy).unwrap().extra.get("locked"), Some(&json!(true)));
}

#[test]
fn test_canvas_rejects_invalid_label_size() {
    let canvas = Canvas::new(LabelSize::new(f64::NAN, 20.0));
    assert_eq!(canvas.label_size(), LabelSize::default());

    let mut canvas = Canvas::new(LabelSize::new(62.0, 29.0));
    assert!(!canvas.set_label_size(LabelSize::new(-1.0, 50.0)));
    assert!(!canvas.set_label_size(LabelSize::new(50.0, 0.0)));
    assert_eq!(canvas.label_size(), LabelSize::new(62.0, 29.0));
    assert!(canvas.set_label_size(LabelSize::new(40.0, 20.0)));
    assert_eq!(canvas.label_size(), LabelSize::new(40.0, 20.0));
}

#[test]
fn test_canvas_set_table_cell() {
    let mut canvas = Canvas::default();
    let table = canvas.add_table(2, 2, Placement::Default);
    let text = canvas.add_element(ElementType::Text, Placement::Default);

    assert!(canvas.set_table_cell(&table, 1, 0, "Lot"));
    assert!(!canvas.set_table_cell(&table, 2, 0, "out of range"));
    assert!(!canvas.set_table_cell(&text, 0, 0, "not a table"));
    assert_eq!(canvas.element(&table).unwrap().table_data().unwrap().cell(1, 0), "Lot");
}

#[test]
fn test_canvas_hit_test_priority() {
    let mut canvas = Canvas::default();
    let below = canvas.add_element(ElementType::Rectangle, Placement::Default);
    let above = canvas.add_element(ElementType::Rectangle, Placement::Default);

    canvas.clear_selection();
    assert_eq!(
        canvas.hit_test(Point::new(60.0, 50.0)),
        HitTarget::Body(above.clone())
    );
    assert_eq!(canvas.hit_test(Point::new(300.0, 150.0)), HitTarget::Empty);

    // Handles only exist on the selected element and win over bodies.
    canvas.select(&below);
    assert_eq!(
        canvas.hit_test(Point::new(100.0, 80.0)),
        HitTarget::ResizeHandle(below.clone(), Handle::Se)
    );
    assert_eq!(
        canvas.hit_test(Point::new(60.0, -8.0)),
        HitTarget::RotateHandle(below.clone())
    );
    assert_eq!(
        canvas.hit_test(Point::new(60.0, 50.0)),
        HitTarget::Body(above)
    );
}

#[test]
fn test_canvas_hit_test_thin_line() {
    let mut canvas = Canvas::default();
    let line = canvas.add_element(ElementType::Line, Placement::Default);
    canvas.clear_selection();

    assert_eq!(
        canvas.hit_test(Point::new(100.0, 53.0)),
        HitTarget::Body(line.clone())
    );
    assert_eq!(canvas.hit_test(Point::new(100.0, 60.0)), HitTarget::Empty);
}

#[test]
fn test_canvas_replace_drops_stale_selection() {
    let mut canvas = Canvas::default();
    let id = canvas.add_element(ElementType::Text, Placement::Default);
    assert_eq!(canvas.selected_id(), Some(id.as_str()));

    canvas.replace_elements(Vec::new());
    assert_eq!(canvas.selected_id(), None);
}
