//! Dense Game of Life engine core.

use log::{debug, trace, warn};
use serde::Deserialize;

use super::board::{Board, EdgePolicy};
use super::rules::RuleTable;
use crate::error::{BoxError, EngineError};

static RULES: RuleTable = RuleTable::new();

/// Which cells a frame reports after a generation step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotifyMode {
    /// Every cell, every generation.
    #[default]
    Full,
    /// Only cells whose value differs from the previous generation.
    Changed,
}

/// One `(row, col, value)` paint record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellUpdate {
    pub row: usize,
    pub col: usize,
    pub value: u8,
}

/// Configuration for a LifeEngine instance.
///
/// `EngineConfig::default()` wraps edges and reports full frames.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EngineConfig {
    pub edges: EdgePolicy,
    pub notify: NotifyMode,
}

impl EngineConfig {
    pub fn edges(mut self, edges: EdgePolicy) -> Self {
        self.edges = edges;
        self
    }

    pub fn wrap_edges(self, wrap: bool) -> Self {
        self.edges(EdgePolicy::from_wrap(wrap))
    }

    pub fn notify(mut self, mode: NotifyMode) -> Self {
        self.notify = mode;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineState {
    /// Constructed; the initial frame has not been emitted yet.
    Uninitialized,
    /// `init` has been called at least once.
    Running,
}

/// Row-major paint records for one `init` or `step` call.
///
/// Borrows the engine, so the committed board cannot change while the
/// frame is being consumed.
#[derive(Clone, Debug)]
pub struct Frame<'a> {
    current: &'a [u8],
    previous: Option<&'a [u8]>,
    cols: usize,
    cursor: usize,
}

impl<'a> Frame<'a> {
    fn new(current: &'a [u8], previous: Option<&'a [u8]>, cols: usize) -> Self {
        Self {
            current,
            previous,
            cols,
            cursor: 0,
        }
    }

    fn empty() -> Self {
        Self::new(&[], None, 0)
    }
}

impl Iterator for Frame<'_> {
    type Item = CellUpdate;

    fn next(&mut self) -> Option<CellUpdate> {
        while self.cursor < self.current.len() {
            let i = self.cursor;
            self.cursor += 1;
            let value = self.current[i];
            if let Some(previous) = self.previous {
                if previous[i] == value {
                    continue;
                }
            }
            return Some(CellUpdate {
                row: i / self.cols,
                col: i % self.cols,
                value,
            });
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.current.len() - self.cursor;
        match self.previous {
            Some(_) => (0, Some(remaining)),
            None => (remaining, Some(remaining)),
        }
    }
}

#[derive(Debug)]
pub struct LifeEngine {
    current: Board,
    /// Scratch buffer. After a step it holds the generation that was replaced.
    previous: Board,
    config: EngineConfig,
    state: EngineState,
    generation: u64,
    /// A callback failed mid-frame; the next step reports every cell.
    resync: bool,
}

impl LifeEngine {
    /// All-dead `rows x cols` board, full frames.
    ///
    /// Panics if `rows * cols` overflows `usize`.
    pub fn new(rows: usize, cols: usize, edges: EdgePolicy) -> Self {
        Self::from_parts(
            Board::dead(rows, cols),
            EngineConfig::default().edges(edges),
        )
    }

    /// Copy `board` into a new engine; its shape sets the dimensions.
    pub fn from_board<R: AsRef<[u8]>>(board: &[R], edges: EdgePolicy) -> Result<Self, EngineError> {
        let board = Board::from_rows(board)?;
        Ok(Self::from_parts(board, EngineConfig::default().edges(edges)))
    }

    /// General constructor. When `initial` is given, its shape overrides
    /// `rows` and `cols`. Nothing is reported until `init` or `step`.
    pub fn with_config(
        rows: usize,
        cols: usize,
        initial: Option<&[Vec<u8>]>,
        config: EngineConfig,
    ) -> Result<Self, EngineError> {
        let board = match initial {
            Some(source) => {
                let board = Board::from_rows(source)?;
                if (board.rows(), board.cols()) != (rows, cols) {
                    debug!(
                        "initial board is {}x{}, overriding requested {rows}x{cols}",
                        board.rows(),
                        board.cols()
                    );
                }
                board
            }
            None => Board::dead(rows, cols),
        };
        Ok(Self::from_parts(board, config))
    }

    fn from_parts(board: Board, config: EngineConfig) -> Self {
        if board.is_empty() {
            warn!(
                "{}x{} board has no cells; steps will be no-ops",
                board.rows(),
                board.cols()
            );
        }
        debug!(
            "created {}x{} life engine ({:?} edges, {:?} notify)",
            board.rows(),
            board.cols(),
            config.edges,
            config.notify
        );
        Self {
            previous: board.clone(),
            current: board,
            config,
            state: EngineState::Uninitialized,
            generation: 0,
            resync: false,
        }
    }

    /// Report every cell of the current board in row-major order.
    pub fn init(&mut self) -> Frame<'_> {
        self.state = EngineState::Running;
        Frame::new(self.current.cells(), None, self.current.cols())
    }

    /// Advance one generation and report it according to the notify mode.
    ///
    /// The new board is committed before the frame is returned. Under
    /// `NotifyMode::Changed`, the first step after a failed `init_with` or
    /// `step_with` reports every cell so the receiver can catch up.
    pub fn step(&mut self) -> Frame<'_> {
        if self.current.is_empty() {
            return Frame::empty();
        }
        self.advance();

        let full = std::mem::take(&mut self.resync);
        let previous = match self.config.notify {
            NotifyMode::Changed if !full => Some(self.previous.cells()),
            _ => None,
        };
        Frame::new(self.current.cells(), previous, self.current.cols())
    }

    /// `init`, feeding each record to `on_cell_ready`.
    ///
    /// Stops at the first failing call and returns `CallbackFailure`.
    pub fn init_with<F, E>(&mut self, on_cell_ready: F) -> Result<(), EngineError>
    where
        F: FnMut(usize, usize, u8) -> Result<(), E>,
        E: Into<BoxError>,
    {
        let result = notify(self.init(), on_cell_ready);
        self.resync |= result.is_err();
        result
    }

    /// `step`, feeding each record to `on_cell_ready`.
    ///
    /// On `CallbackFailure` the generation has still advanced, and the
    /// cells after the failing one were not reported. The next step then
    /// sends a full frame in either notify mode.
    pub fn step_with<F, E>(&mut self, on_cell_ready: F) -> Result<(), EngineError>
    where
        F: FnMut(usize, usize, u8) -> Result<(), E>,
        E: Into<BoxError>,
    {
        let result = notify(self.step(), on_cell_ready);
        self.resync |= result.is_err();
        result
    }

    fn advance(&mut self) {
        let edges = self.config.edges;
        let cols = self.current.cols();
        let current = &self.current;
        for (i, slot) in self.previous.cells_mut().iter_mut().enumerate() {
            let neighbors = current.live_neighbors(i / cols, i % cols, edges);
            *slot = RULES.lookup(current.cells()[i], neighbors);
        }
        std::mem::swap(&mut self.current, &mut self.previous);
        self.generation += 1;
        trace!(
            "generation {} population {}",
            self.generation,
            self.current.population()
        );
    }

    /// Value at `(row, col)`. Never wraps, even under `EdgePolicy::Wrap`.
    pub fn cell(&self, row: i64, col: i64) -> Result<u8, EngineError> {
        self.current
            .get(row, col)
            .ok_or(EngineError::IndexOutOfRange {
                row,
                col,
                rows: self.current.rows(),
                cols: self.current.cols(),
            })
    }

    /// Copy of the current board as rows of 0/1 values.
    pub fn snapshot(&self) -> Vec<Vec<u8>> {
        self.current.to_rows()
    }

    pub fn rows(&self) -> usize {
        self.current.rows()
    }

    pub fn cols(&self) -> usize {
        self.current.cols()
    }

    pub fn edges(&self) -> EdgePolicy {
        self.config.edges
    }

    pub fn notify_mode(&self) -> NotifyMode {
        self.config.notify
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == EngineState::Running
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn population(&self) -> u64 {
        self.current.population()
    }
}

fn notify<F, E>(frame: Frame<'_>, mut on_cell_ready: F) -> Result<(), EngineError>
where
    F: FnMut(usize, usize, u8) -> Result<(), E>,
    E: Into<BoxError>,
{
    for update in frame {
        on_cell_ready(update.row, update.col, update.value).map_err(|source| {
            EngineError::CallbackFailure {
                row: update.row,
                col: update.col,
                source: source.into(),
            }
        })?;
    }
    Ok(())
}
