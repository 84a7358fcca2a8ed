//! # LabelKit
//!
//! A label design engine: an interactive canvas for composing printable
//! labels from text, data placeholders, barcodes, lines, shapes, images and
//! tables, sized in physical units.
//!
//! ## Architecture
//!
//! LabelKit is organized as a workspace with multiple crates:
//!
//! 1. **labelkit-core** - Canvas constants, length units, error types
//! 2. **labelkit-settings** - Persisted canvas preferences
//! 3. **labelkit-designer** - Element model, interaction, history, rendering
//! 4. **labelkit** - Facade that re-exports the crates above
//!
//! ## Features
//!
//! - **Physical sizing**: millimetre labels mapped at 96 DPI
//! - **Direct manipulation**: draw, drag, resize, rotate, endpoint editing
//! - **Undo/Redo**: snapshot history committed per completed gesture
//! - **Renderer-agnostic**: draw lists consumed by any 2D backend
//! - **Templates**: JSON payloads, generator output and data merge

pub use labelkit_designer as designer;
pub use labelkit_settings as settings;

pub use labelkit_core::{mm_to_px, px_to_mm, Error, LabelSize, LengthUnit, Result, TemplateError};

pub use labelkit_settings::{CanvasSettings, SettingsError};

pub use labelkit_designer::{
    ApplyMode, Canvas, DesignerConfig, DesignerState, Element, ElementKind, ElementPatch,
    ElementType, GeneratedLabel, History, InteractionState, KeyEvent, MergePlan, Placement,
    PointerEvent, Scene, TemplatePayload, Viewport,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
///
/// Fails if a global subscriber is already installed.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(tracing::Level::INFO.to_string()));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
