//! Physical length units
//!
//! Label dimensions are stored in millimetres; the canvas works in pixels at
//! 96 dpi. Templates may declare their size in mm, inches or pixels.

use crate::constants::{MM_PER_INCH, MM_TO_PX};
use crate::error::TemplateError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unit a template's dimensions are expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    /// Millimetres
    #[default]
    Mm,
    /// Inches
    Inch,
    /// Canvas pixels
    Px,
}

impl LengthUnit {
    /// Convert a value in this unit to millimetres
    pub fn to_mm(self, value: f64) -> f64 {
        match self {
            Self::Mm => value,
            Self::Inch => value * MM_PER_INCH,
            Self::Px => px_to_mm(value),
        }
    }

    /// Convert a value in millimetres to this unit
    pub fn from_mm(self, value_mm: f64) -> f64 {
        match self {
            Self::Mm => value_mm,
            Self::Inch => value_mm / MM_PER_INCH,
            Self::Px => mm_to_px(value_mm),
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mm => write!(f, "mm"),
            Self::Inch => write!(f, "inch"),
            Self::Px => write!(f, "px"),
        }
    }
}

impl FromStr for LengthUnit {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mm" | "millimeter" | "millimetre" => Ok(Self::Mm),
            "inch" | "in" | "\"" => Ok(Self::Inch),
            "px" | "pixel" => Ok(Self::Px),
            _ => Err(TemplateError::UnsupportedUnit {
                unit: s.to_string(),
            }),
        }
    }
}

/// Millimetres to canvas pixels
pub fn mm_to_px(mm: f64) -> f64 {
    mm * MM_TO_PX
}

/// Canvas pixels to millimetres
pub fn px_to_mm(px: f64) -> f64 {
    px / MM_TO_PX
}

/// Physical size of a label in millimetres
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelSize {
    pub width: f64,
    pub height: f64,
}

impl LabelSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Build a size from dimensions in an arbitrary unit
    pub fn from_unit(width: f64, height: f64, unit: LengthUnit) -> Result<Self, TemplateError> {
        let size = Self::new(unit.to_mm(width), unit.to_mm(height));
        size.validate()?;
        Ok(size)
    }

    /// Width in canvas pixels
    pub fn width_px(&self) -> f64 {
        mm_to_px(self.width)
    }

    /// Height in canvas pixels
    pub fn height_px(&self) -> f64 {
        mm_to_px(self.height)
    }

    /// Reject zero, negative and non-finite sizes
    pub fn validate(&self) -> Result<(), TemplateError> {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        if ok(self.width) && ok(self.height) {
            Ok(())
        } else {
            Err(TemplateError::InvalidDimensions {
                width: self.width,
                height: self.height,
            })
        }
    }
}

impl Default for LabelSize {
    fn default() -> Self {
        Self::new(100.0, 50.0)
    }
}

impl fmt::Display for LabelSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} x {:.1} mm", self.width, self.height)
    }
}
