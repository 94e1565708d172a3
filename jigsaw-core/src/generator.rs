use rand::Rng;

use crate::edge::{EdgeSet, EdgeShape};
use crate::error::ConfigError;
use crate::models::{PieceId, PieceSpec, SlotId};

/// Uniform pick between the two interlocking shapes.
pub fn random_edge<R: Rng + ?Sized>(rng: &mut R) -> EdgeShape {
    if rng.gen_bool(0.5) {
        EdgeShape::Tab
    } else {
        EdgeShape::Socket
    }
}

/// Build a `rows` x `cols` grid of pieces whose shared edges interlock.
///
/// Cells are visited row-major from the bottom row. Top and right edges are
/// drawn at random (flat on the outer border); bottom and left edges are the
/// complement of the neighbour generated before, so every interior border
/// pairs a tab with a socket.
pub fn generate_pieces<R: Rng + ?Sized>(
    rows: usize,
    cols: usize,
    rng: &mut R,
) -> Result<Vec<PieceSpec>, ConfigError> {
    if rows == 0 || cols == 0 {
        return Err(ConfigError::InvalidDimensions { rows, cols });
    }
    let mut pieces: Vec<PieceSpec> = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        for col in 0..cols {
            let top = if row == rows - 1 {
                EdgeShape::Flat
            } else {
                random_edge(rng)
            };
            let right = if col == cols - 1 {
                EdgeShape::Flat
            } else {
                random_edge(rng)
            };
            let bottom = if row == 0 {
                EdgeShape::Flat
            } else {
                pieces[(row - 1) * cols + col].edges.top.complement()
            };
            let left = if col == 0 {
                EdgeShape::Flat
            } else {
                pieces[row * cols + col - 1].edges.right.complement()
            };
            let index = row * cols + col;
            pieces.push(PieceSpec {
                id: PieceId(index),
                row,
                col,
                edges: EdgeSet::new(top, right, bottom, left),
                correct_slot: SlotId(index),
            });
        }
    }
    tracing::debug!(rows, cols, "generated puzzle pieces");
    Ok(pieces)
}
