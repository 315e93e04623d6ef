//! Fill colors for live and dead cells.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Supplies the fill for a live cell each time one is painted.
pub trait ColorSource: Send {
    fn next_color(&mut self) -> String;
}

/// The same color on every paint.
#[derive(Clone, Debug)]
pub struct FixedColor(pub String);

impl ColorSource for FixedColor {
    fn next_color(&mut self) -> String {
        self.0.clone()
    }
}

/// A fresh `#RRGGBB` color on every paint.
#[derive(Clone, Debug)]
pub struct RandomColor<R = StdRng> {
    rng: R,
}

impl RandomColor<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_os_rng() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng> RandomColor<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng + Send> ColorSource for RandomColor<R> {
    fn next_color(&mut self) -> String {
        let mut color = String::with_capacity(7);
        color.push('#');
        for _ in 0..6 {
            // Rounding makes the first and last digits half as likely.
            let digit = (self.rng.random::<f64>() * 15.0).round() as usize;
            color.push(HEX_DIGITS[digit] as char);
        }
        color
    }
}

/// Live-cell color source plus the fixed dead-cell fill.
pub struct Palette {
    alive: Box<dyn ColorSource>,
    dead: String,
}

impl Palette {
    pub fn new(alive: Box<dyn ColorSource>, dead: impl Into<String>) -> Self {
        Self {
            alive,
            dead: dead.into(),
        }
    }

    pub fn fill_for(&mut self, value: u8) -> String {
        if value == 1 {
            self.alive.next_color()
        } else {
            self.dead.clone()
        }
    }

    pub fn dead(&self) -> &str {
        &self.dead
    }
}

impl std::fmt::Debug for Palette {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Palette").field("dead", &self.dead).finish_non_exhaustive()
    }
}
