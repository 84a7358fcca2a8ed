use labelkit_core::{LabelSize, LengthUnit};
use labelkit_designer::canvas::{Canvas, Placement};
use labelkit_designer::model::{ElementKind, ElementType};
use labelkit_designer::serialization::{
    GeneratedLabel, TemplateCategory, TemplatePayload, TemplateStatus,
};
use tempfile::TempDir;

const STORED_TEMPLATE: &str = r##"{
    "name": "Shipping 4x2",
    "category": "shipping",
    "dimensions": { "width": 4, "height": 2, "unit": "inch" },
    "elements": [
        {
            "id": "el-1",
            "type": "text",
            "x": 10, "y": 12, "width": 120, "height": 30,
            "content": "Ship to:",
            "fontSize": 16,
            "fontWeight": "bold",
            "zIndex": 1
        },
        {
            "id": "el-2",
            "type": "line",
            "x": 10, "y": 50, "width": 200, "height": 0,
            "borderWidth": 2,
            "zIndex": 0
        },
        {
            "id": "el-3",
            "type": "barcode",
            "x": 10, "y": 60, "width": 200, "height": 80,
            "content": "1Z999AA10123456784",
            "barcodeType": "CODE128",
            "zIndex": 2
        },
        {
            "id": "el-4",
            "type": "table",
            "x": 220, "y": 10, "width": 120, "height": 50,
            "rows": 2, "cols": 2,
            "zIndex": 3
        }
    ]
}"##;

#[test]
fn test_parse_stored_template() {
    let template = TemplatePayload::from_json(STORED_TEMPLATE).unwrap();

    assert_eq!(template.category, TemplateCategory::Shipping);
    assert_eq!(template.status, TemplateStatus::Draft);
    assert!(template.is_public);
    assert_eq!(template.dimensions.unit, LengthUnit::Inch);

    let size = template.label_size().unwrap();
    assert!((size.width - 101.6).abs() < 1e-9);
    assert!((size.height - 50.8).abs() < 1e-9);

    let text = &template.elements[0];
    assert_eq!(text.content(), Some("Ship to:"));
    assert_eq!(text.style.font_size, Some(16.0));
    assert_eq!(text.style.font_weight.as_deref(), Some("bold"));
    assert_eq!(text.z_index, 1);

    // Lines stored without endpoints take the diagonal of their box.
    let line = template.elements[1].line_data().unwrap();
    assert_eq!((line.x1, line.y1, line.x2, line.y2), (10.0, 50.0, 210.0, 50.0));

    // Tables are padded to their grid.
    let table = template.elements[3].table_data().unwrap();
    assert_eq!(table.table_data.len(), 2);
    assert!(table.table_data.iter().all(|row| row.len() == 2));
    assert_eq!(table.cell_width, 60.0);
}

#[test]
fn test_unclaimed_fields_survive_round_trip() {
    let json = r##"{
        "name": "Pantry",
        "dimensions": { "width": 62.0, "height": 29.0, "unit": "mm" },
        "elements": [
            {
                "id": "l", "type": "line",
                "x": 10.0, "y": 20.0, "width": 90.0, "height": 0.0,
                "x1": 10.0, "y1": 20.0, "x2": 100.0, "y2": 20.0,
                "rotation": 0.0, "zIndex": 0,
                "borderWidth": 2.0,
                "content": ""
            },
            {
                "id": "r", "type": "rectangle",
                "x": 5.0, "y": 5.0, "width": 40.0, "height": 30.0,
                "rotation": 0.0, "zIndex": 1,
                "backgroundColor": "#ffcc00",
                "locked": true,
                "meta": { "source": "csv", "row": 3 }
            }
        ]
    }"##;
    let input: serde_json::Value = serde_json::from_str(json).unwrap();

    let template = TemplatePayload::from_json(json).unwrap();
    let rect = &template.elements[1];
    assert_eq!(rect.extra.get("locked"), Some(&serde_json::json!(true)));
    assert!(!rect.extra.contains_key("type"));
    assert!(!rect.extra.contains_key("backgroundColor"));

    let output: serde_json::Value = serde_json::from_str(&template.to_json().unwrap()).unwrap();
    assert_eq!(output["elements"], input["elements"]);
}

#[test]
fn test_serialized_elements_use_wire_names() {
    let mut canvas = Canvas::new(LabelSize::new(62.0, 29.0));
    canvas.add_element(ElementType::Barcode, Placement::Default);
    let template = TemplatePayload::from_canvas("Bin label", &canvas);

    let json: serde_json::Value = serde_json::from_str(&template.to_json().unwrap()).unwrap();
    assert_eq!(json["isPublic"], true);
    assert_eq!(json["dimensions"]["unit"], "mm");
    assert!(json["createdAt"].is_string());

    let barcode = &json["elements"][0];
    assert_eq!(barcode["type"], "barcode");
    assert_eq!(barcode["barcodeType"], "CODE128");
    assert_eq!(barcode["zIndex"], 0);
    assert!(barcode.get("fontSize").is_some());
    assert!(barcode.get("letterSpacing").is_some());
}

#[test]
fn test_duplicate_ids_are_rejected() {
    let mut template = TemplatePayload::from_json(STORED_TEMPLATE).unwrap();
    template.elements[1].id = "el-1".to_string();

    let err = template.validate().unwrap_err();
    assert!(err.is_template_error());
    assert!(err.to_string().contains("el-1"));
}

#[test]
fn test_invalid_dimensions_are_rejected() {
    let json = r#"{ "name": "Broken", "dimensions": { "width": -5, "height": 20 } }"#;
    let template = TemplatePayload::from_json(json).unwrap();
    assert!(template.validate().is_err());
    assert!(template.label_size().is_err());
}

#[test]
fn test_malformed_json_is_an_error() {
    assert!(TemplatePayload::from_json("{ not json").is_err());
    assert!(TemplatePayload::from_json(r#"{ "name": "No size" }"#).is_err());
}

#[test]
fn test_save_and_load_template_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("shipping.json");

    let template = TemplatePayload::from_json(STORED_TEMPLATE).unwrap();
    template.save_to_file(&path).unwrap();

    let loaded = TemplatePayload::load_from_file(&path).unwrap();
    assert_eq!(loaded, template);
}

#[test]
fn test_load_missing_file_reports_context() {
    let dir = TempDir::new().unwrap();
    let err = TemplatePayload::load_from_file(dir.path().join("absent.json")).unwrap_err();
    assert!(err.to_string().contains("Failed to read template file"));
}

#[test]
fn test_parse_generated_label() {
    let json = r#"{
        "widthMm": 50,
        "heightMm": 25,
        "elements": [
            { "id": "g-1", "type": "rectangle", "x": 0, "y": 0, "width": 30, "height": 20 },
            { "id": "g-2", "type": "circle", "x": 40, "y": 0, "width": 20, "height": 20 }
        ]
    }"#;
    let label: GeneratedLabel = serde_json::from_str(json).unwrap();
    assert_eq!(label.label_size().unwrap(), LabelSize::new(50.0, 25.0));
    assert!(matches!(label.elements[0].kind, ElementKind::Rectangle));
    assert_eq!(label.elements[1].element_type(), ElementType::Circle);
}
