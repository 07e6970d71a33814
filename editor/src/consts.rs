//! Shared numeric constants for the editor crate.

// ── Page ────────────────────────────────────────────────────────

/// Page width in device pixels (A4 at 72 dpi). Also the PDF page width in points.
pub const PAGE_WIDTH: f64 = 595.0;

/// Page height in device pixels (A4 at 72 dpi). Also the PDF page height in points.
pub const PAGE_HEIGHT: f64 = 842.0;

/// Padding applied by the explicit left/top/bottom alignment commands.
pub const ALIGN_EDGE_PADDING: f64 = 20.0;

// ── Snapping ────────────────────────────────────────────────────

/// Distance in page pixels within which a dragged element snaps to a center line.
pub const SNAP_THRESHOLD_PX: f64 = 5.0;

/// Average glyph advance as a fraction of the font size, used by the text-width heuristic.
pub const GLYPH_WIDTH_RATIO: f64 = 0.6;

/// Line height as a multiple of the font size.
pub const LINE_HEIGHT_RATIO: f64 = 1.2;

// ── Text ────────────────────────────────────────────────────────

/// Smallest font size the text editor accepts.
pub const MIN_FONT_SIZE: u32 = 8;

/// Largest font size the text editor accepts.
pub const MAX_FONT_SIZE: u32 = 72;

/// Minimum rendered text box width on the editing surface.
pub const TEXT_MIN_WIDTH: f64 = 50.0;

/// Minimum rendered text box height on the editing surface.
pub const TEXT_MIN_HEIGHT: f64 = 24.0;

/// Fixed wrap width for text in the exported document.
pub const PDF_TEXT_WRAP_WIDTH: f64 = 300.0;

/// Baseline offset below the top of a text line, as a fraction of the font size.
pub const PDF_ASCENT_RATIO: f64 = 0.8;

// ── Images ──────────────────────────────────────────────────────

/// Minimum image width and height enforced while resizing.
pub const MIN_IMAGE_SIZE: f64 = 50.0;

/// Default width and height of a newly added image.
pub const DEFAULT_IMAGE_SIZE: f64 = 100.0;

// ── Hit-testing ─────────────────────────────────────────────────

/// Side length of the square image resize handle at the bottom-right corner.
pub const RESIZE_HANDLE_PX: f64 = 16.0;

/// Side length of each button in the element control strip.
pub const CONTROL_BUTTON_PX: f64 = 22.0;

/// Width of the selection ring drawn around an element; hits there select without arming a drag.
pub const SELECTION_RING_PX: f64 = 2.0;

// ── Persistence ─────────────────────────────────────────────────

/// Quiet period after the last scene mutation before it is written to storage.
pub const SAVE_DEBOUNCE_MS: u64 = 300;
