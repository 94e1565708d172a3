use thiserror::Error;

use crate::edge::Side;
use crate::models::{PieceId, SlotId, TrashId};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid must have at least one row and one column (got {rows}x{cols})")]
    InvalidDimensions { rows: usize, cols: usize },
    #[error("`{field}` must be positive (got {value})")]
    NonPositive { field: &'static str, value: f64 },
    #[error("`snap_distance` ({value}) must be below the piece size ({piece_size})")]
    SnapDistance { value: f64, piece_size: f64 },
    #[error("failed to parse puzzle config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected {expected} pieces, got {actual}")]
    PieceCount { expected: usize, actual: usize },
    #[error("piece at position {index} is {found}, grid cell ({row}, {col}) expected")]
    PieceOutOfOrder {
        index: usize,
        found: PieceId,
        row: usize,
        col: usize,
    },
}

/// A facing pair that failed the fit predicate during a commit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Conflict {
    /// Side of the moving piece.
    pub side: Side,
    pub neighbor: PieceId,
}

/// Why a trigger did not move anything.
#[derive(Clone, Debug, PartialEq, Eq, Error, serde::Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum PlacementError {
    #[error("{piece} does not fit its neighbours at {slot}")]
    IllegalAdjacency {
        piece: PieceId,
        slot: SlotId,
        conflicts: Vec<Conflict>,
    },
    #[error("unknown target")]
    InvalidTarget,
    #[error("{armed} is already selected, {attempted} ignored")]
    DoubleSelection { armed: PieceId, attempted: PieceId },
    #[error("no piece is selected")]
    NothingArmed,
    #[error("{0} is locked in place")]
    PieceLocked(PieceId),
    #[error("{slot} is taken by {occupant}")]
    SlotOccupied { slot: SlotId, occupant: PieceId },
    #[error("no such piece: {0}")]
    UnknownPiece(PieceId),
    #[error("no such slot: {0}")]
    UnknownSlot(SlotId),
    #[error("no such trash location: {0}")]
    UnknownTrash(TrashId),
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("cannot parse target id `{0}`")]
pub struct TargetParseError(pub String);

#[derive(Debug, Error)]
pub enum ExtrudeError {
    #[error("outline has {0} points, need at least 3")]
    Degenerate(usize),
    #[error("cap triangulation failed: {0}")]
    Triangulation(String),
}
