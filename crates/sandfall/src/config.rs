//! Simulation settings, loadable from JSON.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest grid the frame buffer is allowed to cover (four bytes per cell).
pub const MAX_CELLS: usize = 1 << 24;

/// Largest on-screen cell edge in pixels.
pub const MAX_CELL_SIZE: u32 = 1024;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid must have at least one row and one column (got {rows}x{cols})")]
    EmptyGrid { rows: usize, cols: usize },
    #[error("grid of {rows}x{cols} cells is too tall for 16-bit fall velocities")]
    TooTall { rows: usize, cols: usize },
    #[error("grid of {rows}x{cols} cells exceeds {} cells", MAX_CELLS)]
    TooLarge { rows: usize, cols: usize },
    #[error("cell size must be 1..={max} pixels (got {0})", max = MAX_CELL_SIZE)]
    CellSize(u32),
    #[error("brush radius must be 0..={max} cells (got {radius})")]
    BrushRadius { radius: i32, max: usize },
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub rows: usize,
    pub cols: usize,
    /// Screen pixels per cell edge.
    pub cell_size: u32,
    pub brush_radius: i32,
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            rows: 200,
            cols: 320,
            cell_size: 4,
            brush_radius: 3,
            seed: 0x5eed,
        }
    }
}

impl SimConfig {
    /// Parse and validate. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Malformed JSON or any [`SimConfig::validate`] failure.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// A zero or oversized grid, a cell size outside `1..=MAX_CELL_SIZE`, or
    /// a brush radius that is negative or wider than the grid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (rows, cols) = (self.rows, self.cols);
        if rows == 0 || cols == 0 {
            return Err(ConfigError::EmptyGrid { rows, cols });
        }
        // Velocity is bounded by the fall height, which must fit in a u16.
        if rows >= usize::from(u16::MAX) {
            return Err(ConfigError::TooTall { rows, cols });
        }
        if rows.checked_mul(cols).is_none_or(|cells| cells > MAX_CELLS) {
            return Err(ConfigError::TooLarge { rows, cols });
        }
        if !(1..=MAX_CELL_SIZE).contains(&self.cell_size) {
            return Err(ConfigError::CellSize(self.cell_size));
        }
        let max = rows.max(cols);
        if !usize::try_from(self.brush_radius).is_ok_and(|r| r <= max) {
            return Err(ConfigError::BrushRadius {
                radius: self.brush_radius,
                max,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_window() {
        let config = SimConfig::default();
        assert_eq!((config.rows, config.cols), (200, 320));
        assert_eq!(config.cell_size, 4);
        assert_eq!(config.brush_radius, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config = SimConfig::from_json(r#"{"rows": 50, "seed": 9}"#).unwrap();
        assert_eq!(config.rows, 50);
        assert_eq!(config.cols, 320);
        assert_eq!(config.seed, 9);
    }

    #[test]
    fn empty_grid_rejected() {
        let err = SimConfig::from_json(r#"{"cols": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyGrid { rows: 200, cols: 0 }));
    }

    #[test]
    fn zero_cell_size_rejected() {
        let err = SimConfig::from_json(r#"{"cell_size": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::CellSize(0)));
    }

    #[test]
    fn huge_cell_size_rejected() {
        let err = SimConfig::from_json(r#"{"cell_size": 4000000000}"#).unwrap_err();
        assert!(matches!(err, ConfigError::CellSize(4_000_000_000)));
        let config = SimConfig { cell_size: MAX_CELL_SIZE, ..SimConfig::default() };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn brush_radius_rejected() {
        let err = SimConfig::from_json(r#"{"brush_radius": 100000}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::BrushRadius { radius: 100_000, max: 320 }
        ));
        let err = SimConfig::from_json(r#"{"brush_radius": -1}"#).unwrap_err();
        assert!(matches!(err, ConfigError::BrushRadius { radius: -1, .. }));

        let config = SimConfig { brush_radius: 320, ..SimConfig::default() };
        assert!(config.validate().is_ok());
        let config = SimConfig { brush_radius: 0, ..SimConfig::default() };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn too_many_cells_rejected() {
        let config = SimConfig { rows: 60_000, cols: 60_000, ..SimConfig::default() };
        assert!(matches!(config.validate(), Err(ConfigError::TooLarge { .. })));
        let config = SimConfig { rows: 1, cols: usize::MAX, ..SimConfig::default() };
        assert!(matches!(config.validate(), Err(ConfigError::TooLarge { .. })));
    }

    #[test]
    fn oversized_grid_rejected() {
        let config = SimConfig { rows: 70_000, ..SimConfig::default() };
        assert!(matches!(config.validate(), Err(ConfigError::TooTall { .. })));
    }

    #[test]
    fn malformed_json_reports_parse_error() {
        let err = SimConfig::from_json("{rows:").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
        assert!(err.to_string().starts_with("invalid config JSON"));
    }

    #[test]
    fn json_round_trip() {
        let config = SimConfig { rows: 12, cols: 34, ..SimConfig::default() };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(SimConfig::from_json(&json).unwrap(), config);
    }
}
