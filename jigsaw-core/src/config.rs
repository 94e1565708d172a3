use std::time::Duration;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ConfigError;

/// What happens when a second, different piece is triggered while one is armed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecondPiecePolicy {
    /// Keep the first selection and ignore the new piece.
    #[default]
    KeepFirst,
    /// Arm the newly triggered piece instead.
    Replace,
}

/// Puzzle configuration record. Every field has a default so a partial JSON
/// document (or `{}`) is a valid configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PuzzleConfig {
    pub rows: usize,
    pub cols: usize,
    pub piece_size: f32,
    pub piece_depth: f32,
    /// Centre of slot 0 (bottom-left cell).
    pub origin: Vec3,
    pub staging_gap: f32,
    pub snap_distance: f32,
    pub error_display_ms: u64,
    pub curve_segments: usize,
    pub second_piece_policy: SecondPiecePolicy,
    /// Centres of the discard areas. Empty means one area under the board.
    pub trash: Vec<Vec3>,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        PuzzleConfig {
            rows: DEFAULT_GRID_SIZE,
            cols: DEFAULT_GRID_SIZE,
            piece_size: DEFAULT_PIECE_SIZE,
            piece_depth: DEFAULT_PIECE_DEPTH,
            origin: Vec3::from_array(DEFAULT_ORIGIN),
            staging_gap: DEFAULT_STAGING_GAP,
            snap_distance: DEFAULT_SNAP_DISTANCE,
            error_display_ms: DEFAULT_ERROR_DISPLAY_MS,
            curve_segments: DEFAULT_CURVE_SEGMENTS,
            second_piece_policy: SecondPiecePolicy::default(),
            trash: Vec::new(),
        }
    }
}

impl PuzzleConfig {
    pub fn with_grid(rows: usize, cols: usize) -> Self {
        PuzzleConfig {
            rows,
            cols,
            ..Default::default()
        }
    }

    /// Parse a JSON document and validate it.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let cfg: PuzzleConfig = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::InvalidDimensions {
                rows: self.rows,
                cols: self.cols,
            });
        }
        let positive = [
            ("piece_size", self.piece_size),
            ("piece_depth", self.piece_depth),
        ];
        for (field, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::NonPositive {
                    field,
                    value: value as f64,
                });
            }
        }
        if self.curve_segments == 0 {
            return Err(ConfigError::NonPositive {
                field: "curve_segments",
                value: 0.0,
            });
        }
        let non_negative = [
            ("snap_distance", self.snap_distance),
            ("staging_gap", self.staging_gap),
        ];
        for (field, value) in non_negative {
            if value.is_nan() || value < 0.0 {
                return Err(ConfigError::NonPositive {
                    field,
                    value: value as f64,
                });
            }
        }
        // A neighbouring slot's anchor must never fall inside the snap radius.
        if self.snap_distance >= self.piece_size {
            return Err(ConfigError::SnapDistance {
                value: self.snap_distance as f64,
                piece_size: self.piece_size as f64,
            });
        }
        Ok(())
    }

    pub fn piece_count(&self) -> usize {
        self.rows * self.cols
    }

    pub fn error_display(&self) -> Duration {
        Duration::from_millis(self.error_display_ms)
    }

    /// Half extents that turn a centre position into the corner the mesh is
    /// built from.
    pub fn anchor_offset(&self) -> Vec3 {
        Vec3::new(
            self.piece_size / 2.0,
            self.piece_size / 2.0,
            self.piece_depth / 2.0,
        )
    }

    pub fn trash_locations(&self) -> Vec<Vec3> {
        if !self.trash.is_empty() {
            return self.trash.clone();
        }
        // Centred under the board, one free row below slot row 0.
        let span = self.cols.saturating_sub(1) as f32 * self.piece_size;
        vec![self.origin + Vec3::new(span / 2.0, -2.0 * self.piece_size, 0.0)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_gives_defaults() {
        let cfg = PuzzleConfig::from_json("{}").unwrap();
        assert_eq!(cfg, PuzzleConfig::default());
        assert_eq!(cfg.piece_count(), 16);
        assert_eq!(cfg.error_display(), Duration::from_millis(2000));
        assert_eq!(cfg.trash_locations().len(), 1);
    }

    #[test]
    fn partial_json_overrides_fields() {
        let cfg = PuzzleConfig::from_json(
            r#"{"rows": 3, "cols": 5, "second_piece_policy": "replace", "origin": [0, 0, 0]}"#,
        )
        .unwrap();
        assert_eq!((cfg.rows, cfg.cols), (3, 5));
        assert_eq!(cfg.second_piece_policy, SecondPiecePolicy::Replace);
        assert_eq!(cfg.origin, Vec3::ZERO);
    }

    #[test]
    fn invalid_values_are_reported() {
        assert!(matches!(
            PuzzleConfig::from_json(r#"{"rows": 0}"#),
            Err(ConfigError::InvalidDimensions { rows: 0, .. })
        ));
        assert!(matches!(
            PuzzleConfig::from_json(r#"{"piece_size": -1.0}"#),
            Err(ConfigError::NonPositive {
                field: "piece_size",
                ..
            })
        ));
        assert!(matches!(
            PuzzleConfig::from_json(r#"{"staging_gap": -0.5}"#),
            Err(ConfigError::NonPositive {
                field: "staging_gap",
                ..
            })
        ));
        assert!(matches!(
            PuzzleConfig::from_json("not json"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn snap_distance_must_stay_below_the_piece_size() {
        assert!(matches!(
            PuzzleConfig::from_json(r#"{"snap_distance": 1.0}"#),
            Err(ConfigError::SnapDistance { .. })
        ));
        assert!(matches!(
            PuzzleConfig::from_json(r#"{"piece_size": 2.0, "snap_distance": 2.5}"#),
            Err(ConfigError::SnapDistance { .. })
        ));
        assert!(PuzzleConfig::from_json(r#"{"piece_size": 2.0, "snap_distance": 1.5}"#).is_ok());

        let nan = PuzzleConfig {
            snap_distance: f32::NAN,
            ..PuzzleConfig::default()
        };
        assert!(matches!(
            nan.validate(),
            Err(ConfigError::NonPositive {
                field: "snap_distance",
                ..
            })
        ));
    }
}
