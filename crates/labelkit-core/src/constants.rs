//! Canvas constants shared by the designer and its hosts.
//!
//! All lengths are canvas-space pixels unless the name says otherwise.

/// Pixels per millimetre (96 dpi).
pub const MM_TO_PX: f64 = 3.779_527_559_1;

/// Millimetres per inch.
pub const MM_PER_INCH: f64 = 25.4;

/// Zoom bounds, in percent.
pub const MIN_ZOOM: f64 = 10.0;
pub const MAX_ZOOM: f64 = 400.0;
pub const DEFAULT_ZOOM: f64 = 100.0;
pub const ZOOM_STEP: f64 = 10.0;

/// Auto-fit bounds, in percent.
pub const FIT_MIN_ZOOM: f64 = 20.0;
pub const FIT_MAX_ZOOM: f64 = 300.0;
/// Upper bound on the raw fit ratio before clamping.
pub const FIT_MAX_RATIO: f64 = 4.0;
/// Space kept free around the label when fitting.
pub const FIT_MARGIN: f64 = 100.0;
/// Width of the rulers along the top and left edges of the viewport.
pub const RULER_SIZE: f64 = 32.0;

/// Delay before refitting after the container is resized.
pub const FIT_DEBOUNCE_MS: u64 = 200;
/// Delay before the first fit after a document is opened.
pub const INITIAL_FIT_DELAY_MS: u64 = 500;

/// Smallest width/height a resize can produce.
pub const MIN_ELEMENT_SIZE: f64 = 20.0;
/// Smallest table cell dimension a resize can produce.
pub const MIN_TABLE_CELL: f64 = 8.0;
/// Line gestures shorter than this are discarded.
pub const MIN_LINE_LENGTH: f64 = 5.0;

/// Text gestures smaller than this produce a default-size box.
pub const MIN_TEXT_DRAW_WIDTH: f64 = 20.0;
pub const MIN_TEXT_DRAW_HEIGHT: f64 = 10.0;
/// Barcode gestures smaller than this are discarded.
pub const MIN_BARCODE_DRAW_WIDTH: f64 = 50.0;
pub const MIN_BARCODE_DRAW_HEIGHT: f64 = 30.0;
/// Shape gestures smaller than this on either side are discarded.
pub const MIN_SHAPE_DRAW_SIZE: f64 = 20.0;

/// Rotation snap increment in degrees.
pub const ROTATION_SNAP_DEGREES: f64 = 15.0;
/// Line angle snap increment in radians (45 degrees).
pub const LINE_SNAP_RADIANS: f64 = std::f64::consts::FRAC_PI_4;

/// Side of a square resize handle.
pub const RESIZE_HANDLE_SIZE: f64 = 7.0;
/// Distance of the rotate handle above the element's top edge.
pub const ROTATE_HANDLE_OFFSET: f64 = 28.0;
/// Diameter of the rotate handle.
pub const ROTATE_HANDLE_SIZE: f64 = 22.0;
/// Radius of a line endpoint handle.
pub const ENDPOINT_HANDLE_RADIUS: f64 = 5.0;
/// Presses within this distance of a line endpoint grab the endpoint.
pub const ENDPOINT_HIT_DISTANCE: f64 = 10.0;
/// Presses within this distance of a line segment hit the line.
pub const LINE_HIT_TOLERANCE: f64 = 5.0;

/// Grid spacing.
pub const GRID_SIZE: f64 = 20.0;

/// Offset applied to a duplicated element.
pub const DUPLICATE_OFFSET: f64 = 10.0;

/// Barcode symbology used when none is chosen.
pub const DEFAULT_BARCODE_TYPE: &str = "CODE128";
/// Placeholder content for new barcodes.
pub const DEFAULT_BARCODE_CONTENT: &str = "123456789";
