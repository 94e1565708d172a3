//! Core model of a select-then-place jigsaw puzzle: edge generation, piece
//! outlines and meshes, staging layout and the placement state machine.
//!
//! Nothing in here touches a DOM or a clock; the browser adapter lives in
//! `jigsaw-wasm`.

pub mod board;
pub mod config;
pub mod constants;
pub mod contour;
pub mod edge;
pub mod error;
pub mod extrude;
pub mod generator;
pub mod layout;
pub mod models;
pub mod selection;
pub mod session;

pub use board::BoardState;
pub use config::{PuzzleConfig, SecondPiecePolicy};
pub use contour::{Contour, Segment, synthesize};
pub use edge::{EdgeSet, EdgeShape, Side, fits};
pub use error::{ConfigError, Conflict, ExtrudeError, PlacementError, TargetParseError};
pub use extrude::{PieceMesh, extrude};
pub use generator::generate_pieces;
pub use models::{
    BoardSlot, PieceId, PieceSpec, Point, SlotId, StagingPlacement, TargetId, TrashId,
};
pub use selection::{Armed, SelectionHandle};
pub use session::{Commit, Completion, Discard, PuzzleSession, TriggerOutcome};
