//! Shared numeric and style constants for the pixel canvas.

// ── Zoom ────────────────────────────────────────────────────────

/// Zoom change applied per wheel notch.
pub const ZOOM_STEP: f64 = 0.1;

/// Smallest zoom reachable by wheel-zoom.
pub const MIN_WHEEL_ZOOM: f64 = 0.001;

/// Largest zoom reachable by wheel-zoom.
pub const MAX_WHEEL_ZOOM: f64 = 5.0;

/// Upper bound for the explicit fit-to-view gesture.
pub const MAX_FIT_ZOOM: f64 = 10.0;

/// Upper bound for the fit computed on mount, resize and reset (never upscale).
pub const MAX_INITIAL_ZOOM: f64 = 1.0;

// ── Background ──────────────────────────────────────────────────

/// Checkerboard shade for even cells.
pub const CHECKER_LIGHT: &str = "#fff";

/// Checkerboard shade for odd cells.
pub const CHECKER_DARK: &str = "#ccc";

// ── Defaults ────────────────────────────────────────────────────

/// Color selected before the picker reports anything.
pub const DEFAULT_COLOR: &str = "#da1";

/// Logical width used until the sizing form says otherwise.
pub const DEFAULT_WIDTH: u32 = 900;

/// Logical height used until the sizing form says otherwise.
pub const DEFAULT_HEIGHT: u32 = 600;

/// Cell edge length in logical units used until the sizing form says otherwise.
pub const DEFAULT_CELL_SIZE: u32 = 10;

// ── Export ──────────────────────────────────────────────────────

/// File name offered for browser downloads.
pub const EXPORT_FILE_NAME: &str = "canvas_export.png";

/// Data URL prefix for exported PNGs.
pub const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";
