//! # LabelKit Core
//!
//! Shared building blocks for the LabelKit crates: canvas constants,
//! physical length units and the unified error type.

pub mod constants;
pub mod error;
pub mod units;

pub use error::{Error, Result, TemplateError};
pub use units::{mm_to_px, px_to_mm, LabelSize, LengthUnit};
