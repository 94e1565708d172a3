use jigsaw_core::{BoardSlot, EdgeSet, PieceSpec, PuzzleSession, SlotId, StagingPlacement};
use serde::Serialize;

use crate::constants::{PIECE_COLOR, SLOT_COLOR, SLOT_HIGHLIGHTS};

/// Piece as handed to the page: scene names instead of indices.
#[derive(Clone, Debug, Serialize)]
pub struct PieceView {
    pub id: String,
    pub row: usize,
    pub col: usize,
    pub edges: EdgeSet,
    pub correct_slot: String,
    pub color: &'static str,
}

impl From<&PieceSpec> for PieceView {
    fn from(p: &PieceSpec) -> Self {
        PieceView {
            id: p.id.to_string(),
            row: p.row,
            col: p.col,
            edges: p.edges,
            correct_slot: p.correct_slot.to_string(),
            color: PIECE_COLOR,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct SlotView {
    pub id: String,
    pub row: usize,
    pub col: usize,
    pub position: [f32; 3],
    pub color: &'static str,
}

impl From<&BoardSlot> for SlotView {
    fn from(s: &BoardSlot) -> Self {
        SlotView {
            id: s.id.to_string(),
            row: s.row,
            col: s.col,
            position: s.position.to_array(),
            color: slot_color(s.id),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct PlacementView {
    pub id: String,
    pub position: [f32; 3],
    pub rotation_deg: u16,
    pub locked: bool,
    pub slot: Option<String>,
}

impl PlacementView {
    pub fn new(p: &StagingPlacement, session: &PuzzleSession) -> Self {
        PlacementView {
            id: p.piece.to_string(),
            position: p.position.to_array(),
            rotation_deg: p.rotation_deg,
            locked: p.locked,
            slot: session.board().slot_of(p.piece).map(|s| s.to_string()),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct TrashView {
    pub id: String,
    pub position: [f32; 3],
}

/// Marker colour for a slot; the first few get distinct highlights.
pub fn slot_color(slot: SlotId) -> &'static str {
    SLOT_HIGHLIGHTS.get(slot.0).copied().unwrap_or(SLOT_COLOR)
}
