use glam::Vec3;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::config::PuzzleConfig;
use crate::models::{BoardSlot, SlotId};

/// Solution grid: one slot per cell, spaced by the piece size, row 0 at the
/// bottom.
pub fn solution_slots(config: &PuzzleConfig) -> Vec<BoardSlot> {
    let s = config.piece_size;
    (0..config.piece_count())
        .map(|i| {
            let (row, col) = (i / config.cols, i % config.cols);
            BoardSlot {
                id: SlotId(i),
                row,
                col,
                position: config.origin + Vec3::new(col as f32 * s, row as f32 * s, 0.0),
            }
        })
        .collect()
}

/// Off-board spots for loose pieces: column groups on both sides of the
/// board, as many columns per side as needed to hold `count` pieces with
/// `rows` spots per column.
pub fn staging_candidates(config: &PuzzleConfig, count: usize) -> Vec<Vec3> {
    let step = config.piece_size + config.staging_gap;
    let per_column = config.rows.max(1);
    let columns_per_side = count.div_ceil(2 * per_column).max(1);
    let board_right = config.origin.x + config.cols.saturating_sub(1) as f32 * config.piece_size;

    let mut out = Vec::with_capacity(2 * columns_per_side * per_column);
    for k in 0..columns_per_side {
        let offset = (k + 1) as f32 * step;
        for x in [config.origin.x - offset, board_right + offset] {
            for r in 0..per_column {
                out.push(Vec3::new(
                    x,
                    config.origin.y + r as f32 * step,
                    config.origin.z,
                ));
            }
        }
    }
    out
}

/// Fisher-Yates shuffle of a copy of `items`; the input is left untouched.
pub fn shuffle<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut copy = items.to_vec();
    copy.shuffle(rng);
    copy
}

/// Staging centre for every piece, in generation order.
pub fn staging_layout<R: Rng + ?Sized>(config: &PuzzleConfig, rng: &mut R) -> Vec<Vec3> {
    let count = config.piece_count();
    let mut spots = shuffle(&staging_candidates(config, count), rng);
    spots.truncate(count);
    spots
}

/// Centre position to the corner anchor the meshes are built from.
pub fn render_anchor(centre: Vec3, config: &PuzzleConfig) -> Vec3 {
    centre - config.anchor_offset()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn slots_are_one_piece_apart() {
        let cfg = PuzzleConfig::default();
        let slots = solution_slots(&cfg);
        assert_eq!(slots.len(), 16);
        assert_eq!(slots[0].position, Vec3::new(-1.5, 0.5, -4.0));
        assert_eq!(slots[5].position, Vec3::new(-0.5, 1.5, -4.0));
        assert_eq!(slots[15].position, Vec3::new(1.5, 3.5, -4.0));
    }

    #[test]
    fn staging_spots_stay_off_the_board() {
        let cfg = PuzzleConfig::with_grid(3, 5);
        let spots = staging_candidates(&cfg, cfg.piece_count());
        assert!(spots.len() >= cfg.piece_count());
        let left = cfg.origin.x;
        let right = cfg.origin.x + 4.0 * cfg.piece_size;
        for p in &spots {
            assert!(p.x < left - cfg.piece_size || p.x > right + cfg.piece_size);
        }
    }

    #[test]
    fn layout_gives_one_distinct_spot_per_piece() {
        let cfg = PuzzleConfig::default();
        let mut rng = StdRng::seed_from_u64(3);
        let spots = staging_layout(&cfg, &mut rng);
        assert_eq!(spots.len(), 16);
        for (i, a) in spots.iter().enumerate() {
            for b in &spots[i + 1..] {
                assert!(a.distance(*b) > cfg.piece_size);
            }
        }
    }

    #[test]
    fn anchor_is_half_a_piece_back() {
        let cfg = PuzzleConfig::default();
        let a = render_anchor(Vec3::new(0.0, 0.0, -4.0), &cfg);
        assert_eq!(a, Vec3::new(-0.5, -0.5, -4.5));
    }
}
