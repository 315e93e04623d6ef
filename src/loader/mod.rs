//! Animated SVG loader: wires a [`LifeEngine`] to an [`SvgGrid`] painter.

mod animation;
mod color;
mod config;
mod svg;

pub use animation::{Animation, StopHandle};
pub use color::{ColorSource, FixedColor, Palette, RandomColor};
pub use config::{
    DEFAULT_ALIVE_COLOR, DEFAULT_ANIMATION_DELAY_MS, DEFAULT_CELL_SIZE, DEFAULT_DEAD_COLOR,
    DEFAULT_LOADER_HEIGHT, DEFAULT_LOADER_WIDTH, Geometry, LoaderConfig, MAX_GRID_CELLS,
};
pub use svg::{PaintError, SvgGrid};

use std::time::Duration;

use log::{debug, info};

use crate::error::{EngineError, LoaderError};
use crate::life::LifeEngine;

pub struct Loader {
    engine: LifeEngine,
    svg: SvgGrid,
    palette: Palette,
    delay: Duration,
    rendered: bool,
    running: bool,
}

impl Loader {
    /// Build a loader whose live color comes from the configuration:
    /// `alive_color`, or random colors when `random_color` is set.
    pub fn new(config: LoaderConfig) -> Result<Self, LoaderError> {
        let alive: Box<dyn ColorSource> = if config.random_color {
            match config.color_seed {
                Some(seed) => Box::new(RandomColor::seeded(seed)),
                None => Box::new(RandomColor::from_os_rng()),
            }
        } else {
            Box::new(FixedColor(config.alive_color.clone()))
        };
        Self::with_color_source(config, alive)
    }

    /// Build a loader with an injected live-cell color source.
    pub fn with_color_source(
        config: LoaderConfig,
        alive: Box<dyn ColorSource>,
    ) -> Result<Self, LoaderError> {
        let board = config.starting_board()?;
        let geometry = config.geometry(board.as_deref())?;
        let engine = LifeEngine::with_config(
            geometry.rows,
            geometry.cols,
            board.as_deref(),
            config.engine_config(),
        )?;
        let svg = SvgGrid::new(geometry, config.dead_fill())?;
        let palette = Palette::new(alive, config.dead_fill());

        if config.debug {
            debug!("{engine:?}");
            debug!("{svg:?}");
        }

        Ok(Self {
            engine,
            svg,
            palette,
            delay: config.animation_delay(),
            rendered: false,
            running: false,
        })
    }

    /// SVG markup for the current paint state. Marks the loader rendered.
    pub fn render(&mut self) -> String {
        self.rendered = true;
        self.svg.to_svg()
    }

    /// Paint the initial board and start accepting ticks.
    pub fn start(&mut self) -> Result<(), LoaderError> {
        if !self.rendered {
            return Err(LoaderError::NotRendered);
        }
        let (svg, palette) = (&mut self.svg, &mut self.palette);
        self.engine
            .init_with(|row, col, value| svg.paint(row, col, value, palette))?;
        self.running = true;
        info!(
            "loader started on a {}x{} grid",
            self.engine.rows(),
            self.engine.cols()
        );
        Ok(())
    }

    /// Advance one generation and repaint. Returns `false` when stopped.
    pub fn tick(&mut self) -> Result<bool, LoaderError> {
        if !self.running {
            return Ok(false);
        }
        let (svg, palette) = (&mut self.svg, &mut self.palette);
        self.engine
            .step_with(|row, col, value| svg.paint(row, col, value, palette))?;
        Ok(true)
    }

    pub fn stop(&mut self) {
        if self.running {
            debug!("loader stopped at generation {}", self.engine.generation());
        }
        self.running = false;
    }

    pub fn is_rendered(&self) -> bool {
        self.rendered
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn animation_delay(&self) -> Duration {
        self.delay
    }

    /// Current value of one cell, read straight from the engine.
    pub fn cell(&self, row: i64, col: i64) -> Result<u8, EngineError> {
        self.engine.cell(row, col)
    }

    pub fn engine(&self) -> &LifeEngine {
        &self.engine
    }

    pub fn svg(&self) -> &SvgGrid {
        &self.svg
    }
}

impl std::fmt::Debug for Loader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Loader")
            .field("rows", &self.engine.rows())
            .field("cols", &self.engine.cols())
            .field("generation", &self.engine.generation())
            .field("rendered", &self.rendered)
            .field("running", &self.running)
            .finish()
    }
}
