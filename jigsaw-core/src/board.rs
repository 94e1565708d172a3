use serde::{Deserialize, Serialize};

use crate::edge::Side;
use crate::models::{PieceId, SlotId};

/// Which piece sits in which solution slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardState {
    rows: usize,
    cols: usize,
    cells: Vec<Option<PieceId>>,
}

impl BoardState {
    pub fn new(rows: usize, cols: usize) -> Self {
        BoardState {
            rows,
            cols,
            cells: vec![None; rows * cols],
        }
    }

    pub fn slot_count(&self) -> usize {
        self.cells.len()
    }

    pub fn is_vacant(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    pub fn contains_slot(&self, slot: SlotId) -> bool {
        slot.0 < self.cells.len()
    }

    pub fn occupant(&self, slot: SlotId) -> Option<PieceId> {
        self.cells.get(slot.0).copied().flatten()
    }

    pub fn slot_of(&self, piece: PieceId) -> Option<SlotId> {
        self.cells
            .iter()
            .position(|c| *c == Some(piece))
            .map(SlotId)
    }

    /// Put `piece` into `slot`, taking it out of any slot it held before.
    /// Returns the piece that was displaced from `slot`, if any.
    pub fn place(&mut self, slot: SlotId, piece: PieceId) -> Option<PieceId> {
        self.remove(piece);
        self.cells
            .get_mut(slot.0)
            .and_then(|c| c.replace(piece))
    }

    /// Take `piece` off the board. Returns the slot it occupied.
    pub fn remove(&mut self, piece: PieceId) -> Option<SlotId> {
        let slot = self.slot_of(piece)?;
        self.cells[slot.0] = None;
        Some(slot)
    }

    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|c| *c = None);
    }

    pub fn iter(&self) -> impl Iterator<Item = (SlotId, Option<PieceId>)> + '_ {
        self.cells.iter().enumerate().map(|(i, c)| (SlotId(i), *c))
    }

    /// Grid neighbour of `slot` in direction `side`. Row 0 is the bottom row,
    /// so "top" is the next row up.
    pub fn neighbor(&self, slot: SlotId, side: Side) -> Option<SlotId> {
        let (row, col) = (slot.0 / self.cols, slot.0 % self.cols);
        match side {
            Side::Top if row + 1 < self.rows => Some(SlotId(slot.0 + self.cols)),
            Side::Right if col + 1 < self.cols => Some(SlotId(slot.0 + 1)),
            Side::Bottom if row > 0 => Some(SlotId(slot.0 - self.cols)),
            Side::Left if col > 0 => Some(SlotId(slot.0 - 1)),
            _ => None,
        }
    }

    pub fn neighbors(&self, slot: SlotId) -> impl Iterator<Item = (Side, SlotId)> + '_ {
        Side::ALL
            .into_iter()
            .filter_map(move |side| self.neighbor(slot, side).map(|n| (side, n)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_and_centre_neighbours() {
        let b = BoardState::new(3, 3);
        let corner: Vec<_> = b.neighbors(SlotId(0)).collect();
        assert_eq!(corner, vec![(Side::Top, SlotId(3)), (Side::Right, SlotId(1))]);
        assert_eq!(b.neighbors(SlotId(4)).count(), 4);
        assert_eq!(b.neighbor(SlotId(8), Side::Top), None);
        assert_eq!(b.neighbor(SlotId(8), Side::Bottom), Some(SlotId(5)));
    }

    #[test]
    fn a_piece_holds_one_slot_at_most() {
        let mut b = BoardState::new(2, 2);
        assert_eq!(b.place(SlotId(0), PieceId(3)), None);
        b.place(SlotId(2), PieceId(3));
        assert_eq!(b.occupant(SlotId(0)), None);
        assert_eq!(b.slot_of(PieceId(3)), Some(SlotId(2)));
        assert_eq!(b.empty_count(), 3);
        assert_eq!(b.remove(PieceId(3)), Some(SlotId(2)));
        assert!(b.is_vacant());
    }
}
