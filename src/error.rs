//! Error types for the engine and the loader.

use std::error::Error as StdError;

use thiserror::Error;

/// Boxed error produced by a cell callback.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("row {row} has {actual} columns, expected {expected}")]
    InvalidDimensions {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("cell ({row},{col}) holds {value}, expected 0 or 1")]
    InvalidCellValue { row: usize, col: usize, value: u8 },

    #[error("cell ({row},{col}) is outside the {rows}x{cols} board")]
    IndexOutOfRange {
        row: i64,
        col: i64,
        rows: usize,
        cols: usize,
    },

    /// The board was already advanced when the callback failed.
    #[error("cell callback failed at ({row},{col})")]
    CallbackFailure {
        row: usize,
        col: usize,
        #[source]
        source: BoxError,
    },
}

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("invalid loader configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("failed to read loader configuration")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("called loader start without rendering loader")]
    NotRendered,

    #[error("unknown preset: {0}")]
    UnknownPreset(String),

    #[error("{field} must be a positive finite number, got {value}")]
    InvalidExtent { field: &'static str, value: f64 },

    #[error("{rows}x{cols} grid exceeds the {max} cell limit")]
    GridTooLarge { rows: f64, cols: f64, max: usize },
}
