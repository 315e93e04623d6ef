//! Loader configuration and grid geometry.

use std::path::Path;
use std::time::Duration;

use log::warn;
use serde::Deserialize;

use crate::error::LoaderError;
use crate::life::{EdgePolicy, EngineConfig, NotifyMode};
use crate::presets;

pub const DEFAULT_CELL_SIZE: f64 = 10.0;
pub const DEFAULT_LOADER_HEIGHT: f64 = 50.0;
pub const DEFAULT_LOADER_WIDTH: f64 = 50.0;
pub const DEFAULT_ALIVE_COLOR: &str = "#000000";
pub const DEFAULT_DEAD_COLOR: &str = "#ffffff";
pub const DEFAULT_ANIMATION_DELAY_MS: f64 = 0.5;
/// Upper bound on cells in a grid sized from the SVG extent.
pub const MAX_GRID_CELLS: usize = 1 << 24;
/// Divisor used for cell sizes when a dimension has no cells.
const FALLBACK_CELLS: f64 = 10.0;

/// Loader settings, usually read from TOML. Missing keys take the defaults.
///
/// ```toml
/// height = 120
/// width = 120
/// preset = "pulsar"
/// random_color = true
/// loop_pattern = false
/// notify = "changed"
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LoaderConfig {
    pub height: f64,
    pub width: f64,
    pub cell_size_r: f64,
    pub cell_size_c: f64,
    /// Rows of 0/1 values. Takes precedence over `preset`.
    pub initial_board: Option<Vec<Vec<u8>>>,
    pub preset: Option<String>,
    pub alive_color: String,
    /// Ignored in favour of the default when `random_color` is set.
    pub dead_color: String,
    pub random_color: bool,
    /// Seed for `random_color`; entropy when unset.
    pub color_seed: Option<u64>,
    pub animation_delay_ms: f64,
    /// Keep `cell_size_r`/`cell_size_c` instead of fitting cells to the SVG.
    pub fix_cell_sizes: bool,
    pub debug: bool,
    /// Wrap neighbor counting around the grid edges.
    pub loop_pattern: bool,
    pub notify: NotifyMode,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            height: DEFAULT_LOADER_HEIGHT,
            width: DEFAULT_LOADER_WIDTH,
            cell_size_r: DEFAULT_CELL_SIZE,
            cell_size_c: DEFAULT_CELL_SIZE,
            initial_board: None,
            preset: None,
            alive_color: DEFAULT_ALIVE_COLOR.to_string(),
            dead_color: DEFAULT_DEAD_COLOR.to_string(),
            random_color: false,
            color_seed: None,
            animation_delay_ms: DEFAULT_ANIMATION_DELAY_MS,
            fix_cell_sizes: false,
            debug: false,
            loop_pattern: true,
            notify: NotifyMode::Full,
        }
    }
}

/// Resolved grid shape and pixel layout.
#[derive(Clone, Debug, PartialEq)]
pub struct Geometry {
    pub rows: usize,
    pub cols: usize,
    pub height: f64,
    pub width: f64,
    pub cell_size_r: f64,
    pub cell_size_c: f64,
}

impl LoaderConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, LoaderError> {
        Ok(toml::from_str(source)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoaderError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// The starting board: `initial_board`, else the named preset, else none.
    pub fn starting_board(&self) -> Result<Option<Vec<Vec<u8>>>, LoaderError> {
        if let Some(board) = &self.initial_board {
            return Ok(Some(board.clone()));
        }
        match &self.preset {
            Some(name) => presets::by_name(name)
                .map(|pattern| Some(pattern.board()))
                .ok_or_else(|| LoaderError::UnknownPreset(name.clone())),
            None => Ok(None),
        }
    }

    /// Grid shape for `board`, or for an empty grid sized from the SVG
    /// extent and cell size when there is no board.
    ///
    /// Extents and cell sizes must be positive and finite. A grid sized from
    /// the extent may hold at most [`MAX_GRID_CELLS`] cells.
    pub fn geometry(&self, board: Option<&[Vec<u8>]>) -> Result<Geometry, LoaderError> {
        let height = positive("height", self.height)?;
        let width = positive("width", self.width)?;
        let cell_r = positive("cell_size_r", self.cell_size_r)?;
        let cell_c = positive("cell_size_c", self.cell_size_c)?;

        let (rows, cols) = match board {
            Some(board) => (board.len(), board.first().map_or(0, Vec::len)),
            None => cells_within(height / cell_r, width / cell_c)?,
        };

        let (cell_size_r, cell_size_c) = if self.fix_cell_sizes {
            (cell_r, cell_c)
        } else {
            (fit(height, rows), fit(width, cols))
        };

        Ok(Geometry {
            rows,
            cols,
            height,
            width,
            cell_size_r,
            cell_size_c,
        })
    }

    pub fn dead_fill(&self) -> &str {
        if self.random_color {
            DEFAULT_DEAD_COLOR
        } else {
            &self.dead_color
        }
    }

    pub fn animation_delay(&self) -> Duration {
        Duration::try_from_secs_f64(self.animation_delay_ms / 1000.0).unwrap_or_else(|_| {
            warn!(
                "animation delay {}ms is not usable, falling back to {DEFAULT_ANIMATION_DELAY_MS}ms",
                self.animation_delay_ms
            );
            Duration::from_secs_f64(DEFAULT_ANIMATION_DELAY_MS / 1000.0)
        })
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig::default()
            .edges(EdgePolicy::from_wrap(self.loop_pattern))
            .notify(self.notify)
    }
}

fn positive(field: &'static str, value: f64) -> Result<f64, LoaderError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(LoaderError::InvalidExtent { field, value })
    }
}

fn cells_within(rows: f64, cols: f64) -> Result<(usize, usize), LoaderError> {
    let (rows, cols) = (rows.floor(), cols.floor());
    let max = MAX_GRID_CELLS as f64;
    // Bound each side as well as the product; 0 * huge passes the product check.
    if rows > max || cols > max || rows * cols > max {
        return Err(LoaderError::GridTooLarge {
            rows,
            cols,
            max: MAX_GRID_CELLS,
        });
    }
    Ok((rows as usize, cols as usize))
}

fn fit(extent: f64, cells: usize) -> f64 {
    if cells > 0 {
        extent / cells as f64
    } else {
        extent / FALLBACK_CELLS
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{DEFAULT_DEAD_COLOR, LoaderConfig, MAX_GRID_CELLS};
    use crate::error::LoaderError;
    use crate::life::{EdgePolicy, NotifyMode};

    #[test]
    fn empty_toml_gives_defaults() {
        let config = LoaderConfig::from_toml_str("").unwrap();
        assert_eq!(config, LoaderConfig::default());
        assert!(config.loop_pattern);
        assert_eq!(config.engine_config().edges, EdgePolicy::Wrap);
    }

    #[test]
    fn toml_overrides_fields() {
        let config = LoaderConfig::from_toml_str(
            r##"
            height = 120.0
            width = 80.0
            alive_color = "#ff0000"
            loop_pattern = false
            notify = "changed"
            initial_board = [[0, 1, 0], [0, 1, 0], [0, 1, 0]]
            "##,
        )
        .unwrap();

        assert_eq!(config.height, 120.0);
        assert_eq!(config.alive_color, "#ff0000");
        assert_eq!(config.engine_config().edges, EdgePolicy::Bounded);
        assert_eq!(config.engine_config().notify, NotifyMode::Changed);
        assert_eq!(config.initial_board.as_ref().map(Vec::len), Some(3));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = LoaderConfig::from_toml_str("loopPattern = true").unwrap_err();
        assert!(matches!(err, LoaderError::Config(_)), "unexpected error: {err:?}");
    }

    #[test]
    fn geometry_without_board_divides_extent_by_cell_size() {
        let config = LoaderConfig {
            height: 55.0,
            width: 30.0,
            ..LoaderConfig::default()
        };
        let geometry = config.geometry(None).unwrap();
        assert_eq!((geometry.rows, geometry.cols), (5, 3));
        assert_eq!(geometry.cell_size_r, 11.0);
        assert_eq!(geometry.cell_size_c, 10.0);
    }

    #[test]
    fn geometry_fits_cells_to_board_unless_fixed() {
        let board = vec![vec![0u8; 4]; 2];
        let config = LoaderConfig::default();
        let geometry = config.geometry(Some(board.as_slice())).unwrap();
        assert_eq!((geometry.rows, geometry.cols), (2, 4));
        assert_eq!(geometry.cell_size_r, 25.0);
        assert_eq!(geometry.cell_size_c, 12.5);

        let fixed = LoaderConfig {
            fix_cell_sizes: true,
            cell_size_r: 3.0,
            cell_size_c: 4.0,
            ..LoaderConfig::default()
        };
        let geometry = fixed.geometry(Some(board.as_slice())).unwrap();
        assert_eq!(geometry.cell_size_r, 3.0);
        assert_eq!(geometry.cell_size_c, 4.0);
    }

    #[test]
    fn zero_dimension_uses_fallback_cell_size() {
        let config = LoaderConfig::default();
        let geometry = config.geometry(Some(&[][..])).unwrap();
        assert_eq!((geometry.rows, geometry.cols), (0, 0));
        assert_eq!(geometry.cell_size_r, 5.0);
    }

    #[test]
    fn infinite_height_is_rejected() {
        let config = LoaderConfig::from_toml_str("height = inf\n").unwrap();
        let err = config.geometry(None).unwrap_err();
        assert!(
            matches!(err, LoaderError::InvalidExtent { field: "height", value } if value.is_infinite()),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn non_positive_extents_and_cell_sizes_are_rejected() {
        for (field, config) in [
            ("width", LoaderConfig { width: -1.0, ..LoaderConfig::default() }),
            ("height", LoaderConfig { height: f64::NAN, ..LoaderConfig::default() }),
            ("cell_size_r", LoaderConfig { cell_size_r: 0.0, ..LoaderConfig::default() }),
            ("cell_size_c", LoaderConfig { cell_size_c: f64::INFINITY, ..LoaderConfig::default() }),
        ] {
            let err = config.geometry(None).unwrap_err();
            assert!(
                matches!(err, LoaderError::InvalidExtent { field: f, .. } if f == field),
                "{field}: unexpected error {err:?}"
            );
        }
    }

    #[test]
    fn oversized_grid_is_rejected() {
        let tiny_cells = LoaderConfig {
            cell_size_r: 1e-9,
            cell_size_c: 1e-9,
            ..LoaderConfig::default()
        };
        assert!(matches!(
            tiny_cells.geometry(None),
            Err(LoaderError::GridTooLarge { max: MAX_GRID_CELLS, .. })
        ));

        // A single row still cannot be arbitrarily long.
        let one_long_row = LoaderConfig {
            height: 10.0,
            width: 1e300,
            ..LoaderConfig::default()
        };
        assert!(matches!(
            one_long_row.geometry(None),
            Err(LoaderError::GridTooLarge { .. })
        ));

        let at_limit = LoaderConfig {
            height: 4096.0,
            width: 4096.0,
            cell_size_r: 1.0,
            cell_size_c: 1.0,
            ..LoaderConfig::default()
        };
        let geometry = at_limit.geometry(None).unwrap();
        assert_eq!(geometry.rows * geometry.cols, MAX_GRID_CELLS);
    }

    #[test]
    fn random_color_forces_default_dead_fill() {
        let config = LoaderConfig {
            dead_color: "#222222".to_string(),
            random_color: true,
            ..LoaderConfig::default()
        };
        assert_eq!(config.dead_fill(), DEFAULT_DEAD_COLOR);
    }

    #[test]
    fn starting_board_prefers_initial_board_over_preset() {
        let config = LoaderConfig {
            initial_board: Some(vec![vec![1]]),
            preset: Some("pulsar".to_string()),
            ..LoaderConfig::default()
        };
        assert_eq!(config.starting_board().unwrap(), Some(vec![vec![1]]));

        let config = LoaderConfig {
            preset: Some("nope".to_string()),
            ..LoaderConfig::default()
        };
        assert!(matches!(
            config.starting_board(),
            Err(LoaderError::UnknownPreset(name)) if name == "nope"
        ));
    }

    #[test]
    fn bad_delay_falls_back() {
        let config = LoaderConfig {
            animation_delay_ms: -4.0,
            ..LoaderConfig::default()
        };
        assert_eq!(config.animation_delay(), Duration::from_micros(500));
    }
}
