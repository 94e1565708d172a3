use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::models::PieceId;

/// The piece picked up by the first half of a select-then-place gesture.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Armed {
    pub source: PieceId,
    /// Start point of the selection line drawn from the armed piece.
    pub line_start: Vec3,
}

/// Holds at most one armed selection.
///
/// Handlers `take()` the selection before doing anything else, which leaves
/// the handle idle on every exit path. Only paths that must keep the piece
/// armed hand it back through `restore()`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SelectionHandle {
    armed: Option<Armed>,
}

impl SelectionHandle {
    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    pub fn armed(&self) -> Option<&Armed> {
        self.armed.as_ref()
    }

    pub fn source(&self) -> Option<PieceId> {
        self.armed.map(|a| a.source)
    }

    pub fn arm(&mut self, source: PieceId, line_start: Vec3) {
        debug_assert!(self.armed.is_none(), "selection armed twice");
        self.armed = Some(Armed { source, line_start });
    }

    pub fn take(&mut self) -> Option<Armed> {
        self.armed.take()
    }

    pub fn restore(&mut self, armed: Armed) {
        self.armed = Some(armed);
    }

    pub fn reset(&mut self) {
        self.armed = None;
    }
}
