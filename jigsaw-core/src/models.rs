use std::fmt;
use std::str::FromStr;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::edge::EdgeSet;
use crate::error::TargetParseError;

/// Basic two dimensional point used for contour geometry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from(v: (f64, f64)) -> Self {
        Point { x: v.0, y: v.1 }
    }
}

impl std::ops::Add for Point {
    type Output = Point;
    fn add(self, o: Point) -> Point {
        Point::new(self.x + o.x, self.y + o.y)
    }
}

impl std::ops::Mul<f64> for Point {
    type Output = Point;
    fn mul(self, k: f64) -> Point {
        Point::new(self.x * k, self.y * k)
    }
}

/// Identity of a generated piece. The inner value is the generation index,
/// which is also the row-major index of the slot the piece belongs in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId(pub usize);

/// Row-major board slot index, row 0 at the bottom.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotId(pub usize);

/// Index into the configured trash locations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrashId(pub usize);

// Scene names are 1-based: piece-1, skeleton-1, trash-1.
impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "piece-{}", self.0 + 1)
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "skeleton-{}", self.0 + 1)
    }
}

impl fmt::Display for TrashId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "trash-{}", self.0 + 1)
    }
}

/// Anything a trigger can point at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "index", rename_all = "lowercase")]
pub enum TargetId {
    Piece(PieceId),
    Slot(SlotId),
    Trash(TrashId),
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetId::Piece(p) => p.fmt(f),
            TargetId::Slot(s) => s.fmt(f),
            TargetId::Trash(t) => t.fmt(f),
        }
    }
}

impl FromStr for TargetId {
    type Err = TargetParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "trash" {
            return Ok(TargetId::Trash(TrashId(0)));
        }
        let err = || TargetParseError(s.to_string());
        let (prefix, num) = s.split_once('-').ok_or_else(err)?;
        let n: usize = num.parse().map_err(|_| err())?;
        let idx = n.checked_sub(1).ok_or_else(err)?;
        match prefix {
            "piece" => Ok(TargetId::Piece(PieceId(idx))),
            "skeleton" | "slot" => Ok(TargetId::Slot(SlotId(idx))),
            "trash" => Ok(TargetId::Trash(TrashId(idx))),
            _ => Err(err()),
        }
    }
}

/// Generated piece. Immutable for the lifetime of the puzzle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceSpec {
    pub id: PieceId,
    pub row: usize,
    pub col: usize,
    pub edges: EdgeSet,
    pub correct_slot: SlotId,
}

/// Solution position of one grid cell (centre of the cell).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardSlot {
    pub id: SlotId,
    pub row: usize,
    pub col: usize,
    pub position: Vec3,
}

/// Where a piece currently is in the scene.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StagingPlacement {
    pub piece: PieceId,
    /// Corner-anchored render position.
    pub position: Vec3,
    pub locked: bool,
    pub rotation_deg: u16,
}

impl StagingPlacement {
    pub fn quarter_turns(&self) -> u8 {
        ((self.rotation_deg / 90) % 4) as u8
    }
}
