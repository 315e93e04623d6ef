//! Dense Game of Life engine internals and public API.

mod board;
mod engine;
mod rules;

pub use board::EdgePolicy;
pub use engine::{CellUpdate, EngineConfig, EngineState, Frame, LifeEngine, NotifyMode};
