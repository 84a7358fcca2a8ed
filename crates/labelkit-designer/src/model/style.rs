use serde::{Deserialize, Serialize};

/// Visual attributes of an element.
///
/// Every field is optional in the stored form; which ones are present depends
/// on the element variant. The accessor methods resolve missing values to the
/// defaults used when rendering.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_decoration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_align: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lock_aspect_ratio: Option<bool>,
}

impl Style {
    /// Wire keys of all style fields.
    pub(crate) const WIRE_KEYS: &'static [&'static str] = &[
        "color",
        "backgroundColor",
        "borderWidth",
        "borderColor",
        "borderStyle",
        "borderRadius",
        "fontSize",
        "fontFamily",
        "fontWeight",
        "fontStyle",
        "textDecoration",
        "textAlign",
        "letterSpacing",
        "lineHeight",
        "opacity",
        "lockAspectRatio",
    ];

    /// Full style of a freshly added text, placeholder or barcode.
    pub fn text_defaults() -> Self {
        Self {
            color: Some("#000000".into()),
            background_color: Some("transparent".into()),
            border_width: Some(0.0),
            border_color: Some("#000000".into()),
            border_style: Some("solid".into()),
            border_radius: Some(0.0),
            font_size: Some(14.0),
            font_family: Some("Arial".into()),
            font_weight: Some("normal".into()),
            font_style: Some("normal".into()),
            text_decoration: Some("none".into()),
            text_align: Some("left".into()),
            letter_spacing: Some(0.0),
            line_height: Some(1.2),
            opacity: Some(1.0),
            lock_aspect_ratio: Some(true),
        }
    }

    /// Outline style of a freshly added rectangle or circle.
    pub fn shape_defaults() -> Self {
        Self {
            border_width: Some(2.0),
            border_color: Some("#000000".into()),
            border_style: Some("solid".into()),
            border_radius: Some(0.0),
            background_color: Some("transparent".into()),
            ..Default::default()
        }
    }

    /// A line is stroked with its border colour, width and style.
    pub fn line_defaults() -> Self {
        Self {
            color: Some("#000000".into()),
            background_color: Some("#000000".into()),
            border_width: Some(1.0),
            border_color: Some("#000000".into()),
            border_style: Some("solid".into()),
            font_size: Some(14.0),
            font_family: Some("Arial".into()),
            ..Default::default()
        }
    }

    /// Dash pattern for the border style, `None` for solid strokes.
    pub fn dash_pattern(&self) -> Option<[f64; 2]> {
        match self.border_style() {
            "dashed" => Some([5.0, 5.0]),
            "dotted" => Some([2.0, 2.0]),
            _ => None,
        }
    }

    pub fn table_defaults() -> Self {
        Self {
            border_color: Some("#000000".into()),
            border_width: Some(1.0),
            border_style: Some("solid".into()),
            background_color: Some("transparent".into()),
            font_size: Some(11.0),
            font_family: Some("Arial".into()),
            ..Default::default()
        }
    }

    pub fn image_defaults() -> Self {
        Self {
            opacity: Some(1.0),
            lock_aspect_ratio: Some(true),
            ..Default::default()
        }
    }

    /// Overwrites every field that is set in `other`.
    pub fn merge(&mut self, other: &Style) {
        macro_rules! take {
            ($($field:ident),* $(,)?) => {
                $(if other.$field.is_some() {
                    self.$field = other.$field.clone();
                })*
            };
        }
        take!(
            color,
            background_color,
            border_width,
            border_color,
            border_style,
            border_radius,
            font_size,
            font_family,
            font_weight,
            font_style,
            text_decoration,
            text_align,
            letter_spacing,
            line_height,
            opacity,
            lock_aspect_ratio,
        );
    }

    pub fn color(&self) -> &str {
        self.color.as_deref().unwrap_or("#000000")
    }

    pub fn background_color(&self) -> &str {
        self.background_color.as_deref().unwrap_or("transparent")
    }

    pub fn border_width(&self) -> f64 {
        self.border_width.unwrap_or(0.0)
    }

    pub fn border_color(&self) -> &str {
        self.border_color.as_deref().unwrap_or("#000000")
    }

    pub fn border_style(&self) -> &str {
        self.border_style.as_deref().unwrap_or("solid")
    }

    pub fn border_radius(&self) -> f64 {
        self.border_radius.unwrap_or(0.0)
    }

    pub fn font_size(&self) -> f64 {
        self.font_size.unwrap_or(14.0)
    }

    pub fn font_family(&self) -> &str {
        self.font_family.as_deref().unwrap_or("Arial")
    }

    pub fn font_weight(&self) -> &str {
        self.font_weight.as_deref().unwrap_or("normal")
    }

    pub fn font_style(&self) -> &str {
        self.font_style.as_deref().unwrap_or("normal")
    }

    pub fn text_decoration(&self) -> &str {
        self.text_decoration.as_deref().unwrap_or("none")
    }

    pub fn text_align(&self) -> &str {
        self.text_align.as_deref().unwrap_or("left")
    }

    pub fn letter_spacing(&self) -> f64 {
        self.letter_spacing.unwrap_or(0.0)
    }

    pub fn line_height(&self) -> f64 {
        self.line_height.unwrap_or(1.2)
    }

    /// Opacity clamped to `[0, 1]`.
    pub fn opacity(&self) -> f64 {
        self.opacity.unwrap_or(1.0).clamp(0.0, 1.0)
    }

    pub fn lock_aspect_ratio(&self) -> bool {
        self.lock_aspect_ratio.unwrap_or(false)
    }
}
