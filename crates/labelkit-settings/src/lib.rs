//! LabelKit Settings Crate
//!
//! Handles persisted canvas preferences: the defaults a new design starts
//! from and the tuning knobs of the interactive canvas.

pub mod config;
pub mod error;

pub use config::{CanvasSettings, CONFIG_FILE_NAME};
pub use error::{SettingsError, SettingsResult};
