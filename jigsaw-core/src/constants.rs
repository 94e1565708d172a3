/// Engine-wide numeric constants.
/// Lengths are scene units (one unit = one piece edge by default).
pub const DEFAULT_PIECE_SIZE: f32 = 1.0;
pub const DEFAULT_PIECE_DEPTH: f32 = 1.0;
pub const DEFAULT_GRID_SIZE: usize = 4;

/// Default board anchor: centre of slot 0.
pub const DEFAULT_ORIGIN: [f32; 3] = [-1.5, 0.5, -4.0];

/// Spacing added between staging columns, on top of the piece size.
pub const DEFAULT_STAGING_GAP: f32 = 0.5;

/// Fraction of the edge where a tab/socket curve starts and ends.
pub const CURVE_START: f64 = 0.3;
pub const CURVE_END: f64 = 0.7;
/// Control point offset of a tab/socket curve, as a fraction of the edge.
pub const CURVE_BULGE: f64 = 0.3;
/// Flattening resolution per bezier.
pub const DEFAULT_CURVE_SEGMENTS: usize = 12;

/// Max distance between a committed piece and its own slot for an auto-snap.
pub const DEFAULT_SNAP_DISTANCE: f32 = 0.5;
/// How long the adapter keeps the rejection indicator visible.
pub const DEFAULT_ERROR_DISPLAY_MS: u64 = 2000;

pub const ROTATION_STEP_DEG: u16 = 90;
