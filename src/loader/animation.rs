//! Fixed-interval timer that drives a loader.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use log::debug;

use super::Loader;
use crate::error::LoaderError;

/// Shared flag that ends a running [`Animation`]. Clones share the flag.
#[derive(Clone, Debug, Default)]
pub struct StopHandle {
    stopped: Arc<AtomicBool>,
}

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.stopped.store(true, Ordering::Release);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }
}

#[derive(Clone, Debug)]
pub struct Animation {
    interval: Duration,
    max_ticks: Option<u64>,
}

impl Animation {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            max_ticks: None,
        }
    }

    /// Timer using the loader's configured delay.
    pub fn for_loader(loader: &Loader) -> Self {
        Self::new(loader.animation_delay())
    }

    /// Stop on its own after `n` ticks.
    pub fn max_ticks(mut self, n: u64) -> Self {
        self.max_ticks = Some(n);
        self
    }

    /// Start `loader` if needed, then tick it once per interval until `stop`
    /// is raised or the tick budget runs out. `on_frame` sees the loader after
    /// every tick. The loader is stopped on return, including on error.
    ///
    /// Returns the number of ticks performed.
    pub fn run<F>(
        &self,
        loader: &mut Loader,
        stop: &StopHandle,
        mut on_frame: F,
    ) -> Result<u64, LoaderError>
    where
        F: FnMut(&Loader),
    {
        if !loader.is_running() {
            loader.start()?;
        }

        let mut ticks = 0u64;
        let mut deadline = Instant::now();
        let result = loop {
            if stop.is_stopped() || self.max_ticks.is_some_and(|max| ticks >= max) {
                break Ok(ticks);
            }

            deadline += self.interval;
            let now = Instant::now();
            if deadline > now {
                std::thread::sleep(deadline - now);
            } else {
                // Running behind; don't try to catch up with a burst of ticks.
                deadline = now;
            }

            match loader.tick() {
                Ok(true) => {
                    ticks += 1;
                    on_frame(loader);
                }
                Ok(false) => break Ok(ticks),
                Err(err) => break Err(err),
            }
        };

        loader.stop();
        debug!("animation ended after {ticks} ticks");
        result
    }
}
