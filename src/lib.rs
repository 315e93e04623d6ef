//! Conway's Game of Life (B3/S23) on a fixed rectangular board, with an
//! animated SVG loader built on top.

pub mod error;
pub mod life;
pub mod loader;
pub mod presets;

pub use error::{EngineError, LoaderError};
pub use life::{CellUpdate, EdgePolicy, EngineConfig, Frame, LifeEngine, NotifyMode};
pub use loader::{Animation, Loader, LoaderConfig, StopHandle};
