//! Wire formats exchanged with the persistence layer and the label generator.
//!
//! Templates are stored as JSON with camelCase keys; elements use the tagged
//! element format of [`crate::model::Element`]. Unknown optional fields fall
//! back to their documented defaults.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use labelkit_core::{LabelSize, LengthUnit, TemplateError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::canvas::Canvas;
use crate::model::Element;

/// Template category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TemplateCategory {
    Barcode,
    Qr,
    Shipping,
    Product,
    #[default]
    Custom,
}

/// Publication status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TemplateStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

/// Label dimensions as stored, in any supported unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub unit: LengthUnit,
}

impl Dimensions {
    pub fn mm(size: LabelSize) -> Self {
        Self {
            width: size.width,
            height: size.height,
            unit: LengthUnit::Mm,
        }
    }

    /// Converts to a validated millimetre size.
    pub fn label_size(&self) -> labelkit_core::Result<LabelSize> {
        Ok(LabelSize::from_unit(self.width, self.height, self.unit)?)
    }
}

fn default_true() -> bool {
    true
}

/// A stored label template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplatePayload {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: TemplateCategory,
    pub dimensions: Dimensions,
    #[serde(default)]
    pub elements: Vec<Element>,
    #[serde(default = "default_true")]
    pub is_public: bool,
    #[serde(default)]
    pub status: TemplateStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl TemplatePayload {
    /// Captures the canvas as a draft template in millimetres.
    pub fn from_canvas(name: impl Into<String>, canvas: &Canvas) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            description: String::new(),
            category: TemplateCategory::default(),
            dimensions: Dimensions::mm(canvas.label_size()),
            elements: canvas.elements().to_vec(),
            is_public: true,
            status: TemplateStatus::default(),
            preview_image: None,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    /// Label size in millimetres.
    pub fn label_size(&self) -> labelkit_core::Result<LabelSize> {
        self.dimensions.label_size()
    }

    /// Checks dimensions and element id uniqueness.
    pub fn validate(&self) -> labelkit_core::Result<()> {
        self.label_size()?;
        let mut seen = HashSet::new();
        for element in &self.elements {
            if !seen.insert(element.id.as_str()) {
                return Err(TemplateError::DuplicateId {
                    id: element.id.clone(),
                }
                .into());
            }
        }
        Ok(())
    }

    pub fn to_json(&self) -> labelkit_core::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> labelkit_core::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Save template to file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = self.to_json().context("Failed to serialize template")?;
        std::fs::write(path.as_ref(), json).context("Failed to write template file")?;
        Ok(())
    }

    /// Load template from file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read template file")?;
        let payload = Self::from_json(&content).context("Failed to parse template file")?;
        payload.validate().context("Invalid template")?;
        Ok(payload)
    }
}

/// Output of the offline label generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedLabel {
    pub width_mm: f64,
    pub height_mm: f64,
    #[serde(default)]
    pub elements: Vec<Element>,
}

impl GeneratedLabel {
    pub fn label_size(&self) -> labelkit_core::Result<LabelSize> {
        let size = LabelSize::new(self.width_mm, self.height_mm);
        size.validate()?;
        Ok(size)
    }
}
