//! Select-then-place interaction over one puzzle.
//!
//! A session owns everything that changes while a puzzle is being solved:
//! the board, where every piece sits, the armed selection and the random
//! source used for staging. Every operation runs to completion before the
//! next one starts; callers hold it behind `&mut`.

use std::time::Duration;

use glam::Vec3;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

use crate::board::BoardState;
use crate::config::{PuzzleConfig, SecondPiecePolicy};
use crate::constants::ROTATION_STEP_DEG;
use crate::contour::{Contour, synthesize};
use crate::edge::{EdgeSet, fits};
use crate::error::{ConfigError, Conflict, ExtrudeError, PlacementError};
use crate::extrude::{PieceMesh, extrude};
use crate::generator::generate_pieces;
use crate::layout::{render_anchor, solution_slots, staging_layout};
use crate::models::{BoardSlot, PieceId, PieceSpec, SlotId, StagingPlacement, TargetId, TrashId};
use crate::selection::SelectionHandle;

/// Result of the read-only completion check.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Completion {
    Incomplete { empty: usize },
    Solved,
    Mismatched { wrong: Vec<SlotId> },
}

impl Completion {
    pub fn is_solved(&self) -> bool {
        matches!(self, Completion::Solved)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Commit {
    pub piece: PieceId,
    /// Slot the piece ended up in (its own slot after a snap).
    pub slot: SlotId,
    pub position: Vec3,
    pub snapped: bool,
    pub completion: Completion,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Discard {
    pub piece: PieceId,
    pub trash: TrashId,
    pub position: Vec3,
    pub vacated: Option<SlotId>,
}

/// What a trigger did, for the adapter to render.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TriggerOutcome {
    Armed { piece: PieceId, line_start: Vec3 },
    Cancelled { piece: PieceId },
    Committed(Commit),
    Discarded(Discard),
    Rotated { piece: PieceId, rotation_deg: u16 },
    /// A placement attempt was refused; the selection is released.
    Rejected {
        error: PlacementError,
        error_display_ms: u64,
    },
    /// Nothing happened; the selection is as it was.
    Ignored { error: PlacementError },
}

impl TriggerOutcome {
    fn ignored(error: PlacementError) -> Self {
        TriggerOutcome::Ignored { error }
    }

    /// How long the adapter should show its error indicator, if at all.
    pub fn error_indicator(&self) -> Option<Duration> {
        match self {
            TriggerOutcome::Rejected {
                error_display_ms, ..
            } => Some(Duration::from_millis(*error_display_ms)),
            _ => None,
        }
    }
}

pub struct PuzzleSession {
    config: PuzzleConfig,
    pieces: Vec<PieceSpec>,
    slots: Vec<BoardSlot>,
    trash: Vec<Vec3>,
    board: BoardState,
    placements: Vec<StagingPlacement>,
    selection: SelectionHandle,
    rng: StdRng,
}

impl PuzzleSession {
    /// Generate a fresh puzzle. The seed drives edge generation and every
    /// staging shuffle of this session.
    pub fn new(config: PuzzleConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = StdRng::seed_from_u64(seed);
        let pieces = generate_pieces(config.rows, config.cols, &mut rng)?;
        Ok(Self::assemble(config, pieces, rng))
    }

    /// Start a session over pieces built elsewhere. Pieces must be listed in
    /// row-major order with matching ids; their edges are taken as given.
    pub fn from_pieces(
        config: PuzzleConfig,
        pieces: Vec<PieceSpec>,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        if pieces.len() != config.piece_count() {
            return Err(ConfigError::PieceCount {
                expected: config.piece_count(),
                actual: pieces.len(),
            });
        }
        for (index, p) in pieces.iter().enumerate() {
            let (row, col) = (index / config.cols, index % config.cols);
            if p.id != PieceId(index)
                || p.correct_slot != SlotId(index)
                || (p.row, p.col) != (row, col)
            {
                return Err(ConfigError::PieceOutOfOrder {
                    index,
                    found: p.id,
                    row,
                    col,
                });
            }
        }
        Ok(Self::assemble(config, pieces, StdRng::seed_from_u64(seed)))
    }

    fn assemble(config: PuzzleConfig, pieces: Vec<PieceSpec>, mut rng: StdRng) -> Self {
        let slots = solution_slots(&config);
        let trash = config.trash_locations();
        let board = BoardState::new(config.rows, config.cols);
        let placements = stage(&config, &mut rng);
        tracing::info!(
            rows = config.rows,
            cols = config.cols,
            "puzzle session ready"
        );
        PuzzleSession {
            config,
            pieces,
            slots,
            trash,
            board,
            placements,
            selection: SelectionHandle::default(),
            rng,
        }
    }

    pub fn config(&self) -> &PuzzleConfig {
        &self.config
    }

    pub fn pieces(&self) -> &[PieceSpec] {
        &self.pieces
    }

    pub fn piece(&self, id: PieceId) -> Option<&PieceSpec> {
        self.pieces.get(id.0)
    }

    pub fn slots(&self) -> &[BoardSlot] {
        &self.slots
    }

    pub fn trash_locations(&self) -> &[Vec3] {
        &self.trash
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    pub fn placements(&self) -> &[StagingPlacement] {
        &self.placements
    }

    pub fn placement(&self, id: PieceId) -> Option<&StagingPlacement> {
        self.placements.get(id.0)
    }

    pub fn selection(&self) -> &SelectionHandle {
        &self.selection
    }

    /// Corner-anchored render position of a slot.
    pub fn slot_anchor(&self, slot: SlotId) -> Option<Vec3> {
        self.slots
            .get(slot.0)
            .map(|s| render_anchor(s.position, &self.config))
    }

    /// Edges of a piece as currently rotated in the scene.
    pub fn effective_edges(&self, id: PieceId) -> Option<EdgeSet> {
        let spec = self.pieces.get(id.0)?;
        let placement = self.placements.get(id.0)?;
        Some(spec.edges.rotated(placement.quarter_turns()))
    }

    pub fn contour(&self, id: PieceId) -> Option<Contour> {
        self.piece(id)
            .map(|p| synthesize(&p.edges, self.config.piece_size as f64))
    }

    pub fn mesh(&self, id: PieceId) -> Result<Option<PieceMesh>, ExtrudeError> {
        self.contour(id)
            .map(|c| {
                extrude(
                    &c,
                    self.config.piece_depth as f64,
                    self.config.curve_segments,
                )
            })
            .transpose()
    }

    fn target_exists(&self, target: TargetId) -> bool {
        match target {
            TargetId::Piece(p) => p.0 < self.pieces.len(),
            TargetId::Slot(s) => self.board.contains_slot(s),
            TargetId::Trash(t) => t.0 < self.trash.len(),
        }
    }

    /// Trigger by scene name (`piece-3`, `skeleton-7`, `trash`).
    pub fn trigger_named(&mut self, name: &str) -> TriggerOutcome {
        match name.parse::<TargetId>() {
            Ok(target) => self.trigger(target),
            Err(err) => {
                tracing::debug!(%err, "trigger ignored");
                TriggerOutcome::ignored(PlacementError::InvalidTarget)
            }
        }
    }

    pub fn trigger_rotate_named(&mut self, name: &str) -> TriggerOutcome {
        match name.parse::<TargetId>() {
            Ok(target) => self.trigger_rotate(target),
            Err(_) => TriggerOutcome::ignored(PlacementError::InvalidTarget),
        }
    }

    /// One click-equivalent on `target`.
    pub fn trigger(&mut self, target: TargetId) -> TriggerOutcome {
        if !self.target_exists(target) {
            tracing::debug!(%target, "trigger on unknown target ignored");
            return TriggerOutcome::ignored(PlacementError::InvalidTarget);
        }
        let Some(armed) = self.selection.take() else {
            return match target {
                TargetId::Piece(p) => self.arm(p),
                TargetId::Slot(_) | TargetId::Trash(_) => {
                    TriggerOutcome::ignored(PlacementError::NothingArmed)
                }
            };
        };

        match target {
            TargetId::Piece(p) if p == armed.source => {
                tracing::debug!(piece = %p, "selection cancelled");
                TriggerOutcome::Cancelled { piece: p }
            }
            TargetId::Piece(p) => match self.config.second_piece_policy {
                SecondPiecePolicy::KeepFirst => {
                    self.selection.restore(armed);
                    tracing::debug!(armed = %armed.source, attempted = %p, "second piece ignored");
                    TriggerOutcome::ignored(PlacementError::DoubleSelection {
                        armed: armed.source,
                        attempted: p,
                    })
                }
                SecondPiecePolicy::Replace => {
                    let outcome = self.arm(p);
                    if !self.selection.is_armed() {
                        self.selection.restore(armed);
                    }
                    outcome
                }
            },
            TargetId::Slot(slot) => match self.attempt_commit(armed.source, slot) {
                Ok(commit) => TriggerOutcome::Committed(commit),
                Err(error) => self.rejected(error),
            },
            TargetId::Trash(trash) => match self.discard(armed.source, trash) {
                Ok(discard) => TriggerOutcome::Discarded(discard),
                Err(error) => self.rejected(error),
            },
        }
    }

    fn rejected(&self, error: PlacementError) -> TriggerOutcome {
        tracing::debug!(%error, "placement rejected");
        TriggerOutcome::Rejected {
            error,
            error_display_ms: self.config.error_display_ms,
        }
    }

    fn arm(&mut self, piece: PieceId) -> TriggerOutcome {
        let Some(placement) = self.placements.get(piece.0) else {
            return TriggerOutcome::ignored(PlacementError::UnknownPiece(piece));
        };
        if placement.locked {
            return TriggerOutcome::ignored(PlacementError::PieceLocked(piece));
        }
        let line_start = placement.position + self.config.anchor_offset();
        self.selection.arm(piece, line_start);
        tracing::debug!(piece = %piece, "piece armed");
        TriggerOutcome::Armed { piece, line_start }
    }

    /// Neighbour pairs that would not fit with `piece` in `slot`.
    pub fn conflicts_at(&self, piece: PieceId, slot: SlotId) -> Vec<Conflict> {
        let Some(mine) = self.effective_edges(piece) else {
            return Vec::new();
        };
        self.board
            .neighbors(slot)
            .filter_map(|(side, n)| {
                let other = self.board.occupant(n).filter(|o| *o != piece)?;
                let theirs = self.effective_edges(other)?;
                (!fits(mine.get(side), theirs.get(side.opposite()))).then_some(Conflict {
                    side,
                    neighbor: other,
                })
            })
            .collect()
    }

    /// Validate `piece` against the occupied neighbours of `slot` and move it
    /// there. Does not touch the selection.
    pub fn attempt_commit(
        &mut self,
        piece: PieceId,
        slot: SlotId,
    ) -> Result<Commit, PlacementError> {
        let placement = *self
            .placements
            .get(piece.0)
            .ok_or(PlacementError::UnknownPiece(piece))?;
        let anchor = self
            .slot_anchor(slot)
            .ok_or(PlacementError::UnknownSlot(slot))?;
        if placement.locked {
            return Err(PlacementError::PieceLocked(piece));
        }
        if let Some(occupant) = self.board.occupant(slot)
            && occupant != piece
        {
            return Err(PlacementError::SlotOccupied { slot, occupant });
        }
        let conflicts = self.conflicts_at(piece, slot);
        if !conflicts.is_empty() {
            return Err(PlacementError::IllegalAdjacency {
                piece,
                slot,
                conflicts,
            });
        }

        self.board.place(slot, piece);
        self.placements[piece.0].position = anchor;
        let snapped = self.try_snap(piece);
        let commit = Commit {
            piece,
            slot: self.board.slot_of(piece).unwrap_or(slot),
            position: self.placements[piece.0].position,
            snapped,
            completion: self.check_completion(),
        };
        tracing::info!(piece = %piece, slot = %commit.slot, snapped, "piece committed");
        if commit.completion.is_solved() {
            tracing::info!("puzzle solved");
        }
        Ok(commit)
    }

    /// Force an unlocked piece onto its own slot when it is close enough,
    /// and lock it there.
    fn try_snap(&mut self, piece: PieceId) -> bool {
        let target = self.pieces[piece.0].correct_slot;
        let placement = self.placements[piece.0];
        let Some(anchor) = self.slot_anchor(target) else {
            return false;
        };
        // only an upright piece can lock; a turned one stays movable
        if placement.locked
            || placement.quarter_turns() != 0
            || placement.position.distance(anchor) > self.config.snap_distance
        {
            return false;
        }
        if self.board.occupant(target).is_some_and(|o| o != piece) {
            return false;
        }
        self.board.place(target, piece);
        let p = &mut self.placements[piece.0];
        p.position = anchor;
        p.locked = true;
        tracing::info!(piece = %piece, "piece snapped and locked");
        true
    }

    /// Drop `piece` into a trash area. Always accepted for movable pieces.
    pub fn discard(&mut self, piece: PieceId, trash: TrashId) -> Result<Discard, PlacementError> {
        let centre = *self
            .trash
            .get(trash.0)
            .ok_or(PlacementError::UnknownTrash(trash))?;
        let placement = self
            .placements
            .get(piece.0)
            .ok_or(PlacementError::UnknownPiece(piece))?;
        if placement.locked {
            return Err(PlacementError::PieceLocked(piece));
        }
        let position = render_anchor(centre, &self.config);
        let vacated = self.board.remove(piece);
        self.placements[piece.0].position = position;
        tracing::debug!(piece = %piece, trash = %trash, "piece discarded");
        Ok(Discard {
            piece,
            trash,
            position,
            vacated,
        })
    }

    /// Turn a piece a quarter turn counter-clockwise. Leaves the selection
    /// alone.
    pub fn trigger_rotate(&mut self, target: TargetId) -> TriggerOutcome {
        let TargetId::Piece(piece) = target else {
            return TriggerOutcome::ignored(PlacementError::InvalidTarget);
        };
        let Some(placement) = self.placements.get_mut(piece.0) else {
            return TriggerOutcome::ignored(PlacementError::InvalidTarget);
        };
        if placement.locked {
            return TriggerOutcome::ignored(PlacementError::PieceLocked(piece));
        }
        placement.rotation_deg = (placement.rotation_deg + ROTATION_STEP_DEG) % 360;
        TriggerOutcome::Rotated {
            piece,
            rotation_deg: placement.rotation_deg,
        }
    }

    /// Clear the board and scatter the pieces again. Edges are kept.
    pub fn request_reset(&mut self) {
        self.selection.reset();
        self.board.clear();
        self.placements = stage(&self.config, &mut self.rng);
        tracing::info!("puzzle reset");
    }

    /// Read-only: is every slot filled with the piece generated for it?
    pub fn check_completion(&self) -> Completion {
        if !self.board.is_full() {
            return Completion::Incomplete {
                empty: self.board.empty_count(),
            };
        }
        let wrong: Vec<SlotId> = self
            .board
            .iter()
            .filter(|(slot, occupant)| {
                let upright = occupant
                    .and_then(|p| self.placement(p))
                    .is_some_and(|p| p.quarter_turns() == 0);
                !upright
                    || occupant.and_then(|p| self.piece(p)).map(|p| p.correct_slot) != Some(*slot)
            })
            .map(|(slot, _)| slot)
            .collect();
        if wrong.is_empty() {
            Completion::Solved
        } else {
            Completion::Mismatched { wrong }
        }
    }
}

fn stage(config: &PuzzleConfig, rng: &mut StdRng) -> Vec<StagingPlacement> {
    staging_layout(config, rng)
        .into_iter()
        .enumerate()
        .map(|(i, centre)| StagingPlacement {
            piece: PieceId(i),
            position: render_anchor(centre, config),
            locked: false,
            rotation_deg: 0,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::{EdgeShape::*, Side};

    fn session(rows: usize, cols: usize) -> PuzzleSession {
        PuzzleSession::new(PuzzleConfig::with_grid(rows, cols), 42).unwrap()
    }

    #[test]
    fn idle_slot_click_is_ignored() {
        let mut s = session(2, 2);
        let out = s.trigger(TargetId::Slot(SlotId(0)));
        assert_eq!(out, TriggerOutcome::ignored(PlacementError::NothingArmed));
        assert!(!s.selection().is_armed());
    }

    #[test]
    fn unknown_target_keeps_the_selection() {
        let mut s = session(2, 2);
        s.trigger(TargetId::Piece(PieceId(1)));
        let out = s.trigger_named("skeleton-99");
        assert_eq!(out, TriggerOutcome::ignored(PlacementError::InvalidTarget));
        assert_eq!(s.selection().source(), Some(PieceId(1)));
        let out = s.trigger_named("cursor");
        assert_eq!(out, TriggerOutcome::ignored(PlacementError::InvalidTarget));
        assert!(s.selection().is_armed());
    }

    #[test]
    fn armed_line_starts_at_the_piece_centre() {
        let mut s = session(2, 2);
        let anchor = s.placement(PieceId(0)).unwrap().position;
        match s.trigger(TargetId::Piece(PieceId(0))) {
            TriggerOutcome::Armed { line_start, .. } => {
                assert_eq!(line_start, anchor + s.config().anchor_offset());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn second_piece_is_ignored_by_default() {
        let mut s = session(2, 2);
        s.trigger(TargetId::Piece(PieceId(0)));
        let out = s.trigger(TargetId::Piece(PieceId(1)));
        assert_eq!(
            out,
            TriggerOutcome::ignored(PlacementError::DoubleSelection {
                armed: PieceId(0),
                attempted: PieceId(1)
            })
        );
        assert_eq!(s.selection().source(), Some(PieceId(0)));
    }

    #[test]
    fn replace_policy_rearms() {
        let cfg = PuzzleConfig {
            second_piece_policy: SecondPiecePolicy::Replace,
            ..PuzzleConfig::with_grid(2, 2)
        };
        let mut s = PuzzleSession::new(cfg, 1).unwrap();
        s.trigger(TargetId::Piece(PieceId(0)));
        assert!(matches!(
            s.trigger(TargetId::Piece(PieceId(3))),
            TriggerOutcome::Armed { piece: PieceId(3), .. }
        ));
        assert_eq!(s.selection().source(), Some(PieceId(3)));
    }

    #[test]
    fn replace_policy_keeps_the_selection_when_the_new_piece_is_locked() {
        let cfg = PuzzleConfig {
            second_piece_policy: SecondPiecePolicy::Replace,
            ..PuzzleConfig::with_grid(2, 2)
        };
        let mut s = PuzzleSession::new(cfg, 1).unwrap();
        assert!(s.attempt_commit(PieceId(3), SlotId(3)).unwrap().snapped);

        s.trigger(TargetId::Piece(PieceId(0)));
        assert_eq!(
            s.trigger(TargetId::Piece(PieceId(3))),
            TriggerOutcome::ignored(PlacementError::PieceLocked(PieceId(3)))
        );
        assert_eq!(s.selection().source(), Some(PieceId(0)));

        // the kept selection still commits
        assert!(matches!(
            s.trigger(TargetId::Slot(SlotId(0))),
            TriggerOutcome::Committed(_)
        ));
    }

    #[test]
    fn occupied_slot_is_refused() {
        let mut s = session(2, 2);
        s.attempt_commit(PieceId(1), SlotId(0)).unwrap();
        s.trigger(TargetId::Piece(PieceId(2)));
        let out = s.trigger(TargetId::Slot(SlotId(0)));
        assert!(matches!(
            out,
            TriggerOutcome::Rejected {
                error: PlacementError::SlotOccupied { .. },
                ..
            }
        ));
        assert!(!s.selection().is_armed());
        assert_eq!(s.board().occupant(SlotId(0)), Some(PieceId(1)));
    }

    #[test]
    fn own_slot_commit_snaps_and_locks() {
        let mut s = session(2, 2);
        s.trigger(TargetId::Piece(PieceId(2)));
        let out = s.trigger(TargetId::Slot(SlotId(2)));
        let TriggerOutcome::Committed(commit) = out else {
            panic!("expected commit, got {out:?}");
        };
        assert!(commit.snapped);
        assert_eq!(commit.position, s.slot_anchor(SlotId(2)).unwrap());
        assert!(s.placement(PieceId(2)).unwrap().locked);

        // locked pieces can be neither armed nor rotated
        assert_eq!(
            s.trigger(TargetId::Piece(PieceId(2))),
            TriggerOutcome::ignored(PlacementError::PieceLocked(PieceId(2)))
        );
        assert_eq!(
            s.trigger_rotate(TargetId::Piece(PieceId(2))),
            TriggerOutcome::ignored(PlacementError::PieceLocked(PieceId(2)))
        );
    }

    #[test]
    fn turned_piece_is_not_snapped_into_its_own_slot() {
        let mut s = session(1, 1);
        s.trigger(TargetId::Piece(PieceId(0)));
        assert_eq!(
            s.trigger_rotate(TargetId::Piece(PieceId(0))),
            TriggerOutcome::Rotated {
                piece: PieceId(0),
                rotation_deg: 90
            }
        );
        let out = s.trigger(TargetId::Slot(SlotId(0)));
        let TriggerOutcome::Committed(commit) = out else {
            panic!("expected commit, got {out:?}");
        };
        assert!(!commit.snapped);
        assert!(!s.placement(PieceId(0)).unwrap().locked);
        assert_eq!(
            s.check_completion(),
            Completion::Mismatched {
                wrong: vec![SlotId(0)]
            }
        );

        // still free to turn back upright, after which a commit snaps
        for _ in 0..3 {
            s.trigger_rotate(TargetId::Piece(PieceId(0)));
        }
        assert_eq!(s.placement(PieceId(0)).unwrap().quarter_turns(), 0);
        s.trigger(TargetId::Piece(PieceId(0)));
        let out = s.trigger(TargetId::Slot(SlotId(0)));
        let TriggerOutcome::Committed(commit) = out else {
            panic!("expected commit, got {out:?}");
        };
        assert!(commit.snapped);
        assert_eq!(s.check_completion(), Completion::Solved);
    }

    #[test]
    fn foreign_slot_commit_does_not_snap() {
        let mut s = session(1, 3);
        let commit = s.attempt_commit(PieceId(0), SlotId(2)).unwrap();
        assert!(!commit.snapped);
        assert_eq!(commit.slot, SlotId(2));
        assert!(!s.placement(PieceId(0)).unwrap().locked);
    }

    #[test]
    fn moving_a_placed_piece_vacates_its_old_slot() {
        let mut s = session(1, 3);
        s.attempt_commit(PieceId(0), SlotId(2)).unwrap();
        s.attempt_commit(PieceId(0), SlotId(1)).unwrap();
        assert_eq!(s.board().occupant(SlotId(2)), None);
        assert_eq!(s.board().slot_of(PieceId(0)), Some(SlotId(1)));
    }

    #[test]
    fn trash_always_accepts_and_frees_the_slot() {
        let mut s = session(1, 3);
        s.attempt_commit(PieceId(0), SlotId(1)).unwrap();
        s.trigger(TargetId::Piece(PieceId(0)));
        let out = s.trigger_named("trash");
        let TriggerOutcome::Discarded(d) = out else {
            panic!("expected discard, got {out:?}");
        };
        assert_eq!(d.vacated, Some(SlotId(1)));
        assert!(s.board().is_vacant());
        assert!(!s.selection().is_armed());
        assert_eq!(s.placement(PieceId(0)).unwrap().position, d.position);
    }

    #[test]
    fn rotation_changes_what_fits() {
        // p0.right = Socket; p1.left = Tab. One turn brings p1's top (Flat)
        // to its left, and Flat against Socket is refused.
        let edges = [
            EdgeSet::new(Flat, Socket, Flat, Flat),
            EdgeSet::new(Flat, Flat, Flat, Tab),
        ];
        let pieces = edges
            .iter()
            .enumerate()
            .map(|(i, e)| PieceSpec {
                id: PieceId(i),
                row: 0,
                col: i,
                edges: *e,
                correct_slot: SlotId(i),
            })
            .collect();
        let mut s = PuzzleSession::from_pieces(PuzzleConfig::with_grid(1, 2), pieces, 5).unwrap();
        s.attempt_commit(PieceId(0), SlotId(0)).unwrap();
        s.trigger(TargetId::Piece(PieceId(1)));
        let out = s.trigger_rotate(TargetId::Piece(PieceId(1)));
        assert_eq!(
            out,
            TriggerOutcome::Rotated {
                piece: PieceId(1),
                rotation_deg: 90
            }
        );
        // rotating does not disarm
        assert_eq!(s.selection().source(), Some(PieceId(1)));
        let out = s.trigger(TargetId::Slot(SlotId(1)));
        match out {
            TriggerOutcome::Rejected {
                error: PlacementError::IllegalAdjacency { conflicts, .. },
                error_display_ms,
            } => {
                assert_eq!(error_display_ms, 2000);
                assert_eq!(
                    conflicts,
                    vec![Conflict {
                        side: Side::Left,
                        neighbor: PieceId(0)
                    }]
                );
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn rotation_wraps_after_a_full_turn() {
        let mut s = session(2, 2);
        for _ in 0..4 {
            s.trigger_rotate(TargetId::Piece(PieceId(3)));
        }
        assert_eq!(s.placement(PieceId(3)).unwrap().rotation_deg, 0);
        assert_eq!(
            s.trigger_rotate(TargetId::Slot(SlotId(0))),
            TriggerOutcome::ignored(PlacementError::InvalidTarget)
        );
    }

    #[test]
    fn from_pieces_checks_order() {
        let s = session(1, 2);
        let mut pieces = s.pieces().to_vec();
        pieces.swap(0, 1);
        assert!(matches!(
            PuzzleSession::from_pieces(PuzzleConfig::with_grid(1, 2), pieces, 0),
            Err(ConfigError::PieceOutOfOrder { index: 0, .. })
        ));
        assert!(matches!(
            PuzzleSession::from_pieces(PuzzleConfig::with_grid(2, 2), s.pieces().to_vec(), 0),
            Err(ConfigError::PieceCount {
                expected: 4,
                actual: 2
            })
        ));
    }

    #[test]
    fn meshes_are_available_per_piece() {
        let s = session(2, 2);
        let mesh = s.mesh(PieceId(0)).unwrap().unwrap();
        assert!(mesh.is_closed_manifold());
        assert!(s.mesh(PieceId(9)).unwrap().is_none());
    }
}
