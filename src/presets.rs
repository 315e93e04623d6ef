//! Named starting boards.
//!
//! Every pattern carries a natural board size with enough dead margin that it
//! behaves the same under either edge policy for its first period.

use rand::RngCore;
use rand::SeedableRng;

pub struct Pattern {
    pub name: &'static str,
    pub rows: usize,
    pub cols: usize,
    pub cells: &'static [(usize, usize)],
}

pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "blinker",
        rows: 5,
        cols: 5,
        cells: &[(2, 1), (2, 2), (2, 3)],
    },
    Pattern {
        name: "block",
        rows: 4,
        cols: 4,
        cells: &[(1, 1), (1, 2), (2, 1), (2, 2)],
    },
    Pattern {
        name: "glider",
        rows: 8,
        cols: 8,
        cells: &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)],
    },
    Pattern {
        name: "toad",
        rows: 6,
        cols: 6,
        cells: &[(2, 2), (2, 3), (2, 4), (3, 1), (3, 2), (3, 3)],
    },
    Pattern {
        name: "beacon",
        rows: 6,
        cols: 6,
        cells: &[(1, 1), (1, 2), (2, 1), (2, 2), (3, 3), (3, 4), (4, 3), (4, 4)],
    },
    Pattern {
        name: "pulsar",
        rows: 17,
        cols: 17,
        cells: &[
            (2, 4), (2, 5), (2, 6), (2, 10), (2, 11), (2, 12),
            (4, 2), (4, 7), (4, 9), (4, 14),
            (5, 2), (5, 7), (5, 9), (5, 14),
            (6, 2), (6, 7), (6, 9), (6, 14),
            (7, 4), (7, 5), (7, 6), (7, 10), (7, 11), (7, 12),
            (9, 4), (9, 5), (9, 6), (9, 10), (9, 11), (9, 12),
            (10, 2), (10, 7), (10, 9), (10, 14),
            (11, 2), (11, 7), (11, 9), (11, 14),
            (12, 2), (12, 7), (12, 9), (12, 14),
            (14, 4), (14, 5), (14, 6), (14, 10), (14, 11), (14, 12),
        ],
    },
];

impl Pattern {
    /// The pattern on its natural board.
    pub fn board(&self) -> Vec<Vec<u8>> {
        self.centered(self.rows, self.cols)
    }

    /// The pattern centered on a `rows x cols` board. Cells that fall
    /// outside a smaller board are dropped.
    pub fn centered(&self, rows: usize, cols: usize) -> Vec<Vec<u8>> {
        let mut board = vec![vec![0u8; cols]; rows];
        let row_shift = rows as isize / 2 - self.rows as isize / 2;
        let col_shift = cols as isize / 2 - self.cols as isize / 2;
        for &(row, col) in self.cells {
            let r = row as isize + row_shift;
            let c = col as isize + col_shift;
            if (0..rows as isize).contains(&r) && (0..cols as isize).contains(&c) {
                board[r as usize][c as usize] = 1;
            }
        }
        board
    }
}

/// Case-insensitive lookup in [`PATTERNS`].
pub fn by_name(name: &str) -> Option<&'static Pattern> {
    PATTERNS
        .iter()
        .find(|pattern| pattern.name.eq_ignore_ascii_case(name))
}

fn natural(name: &str) -> Vec<Vec<u8>> {
    by_name(name).map(Pattern::board).unwrap_or_default()
}

pub fn blinker() -> Vec<Vec<u8>> {
    natural("blinker")
}

pub fn block() -> Vec<Vec<u8>> {
    natural("block")
}

pub fn glider() -> Vec<Vec<u8>> {
    natural("glider")
}

pub fn toad() -> Vec<Vec<u8>> {
    natural("toad")
}

pub fn beacon() -> Vec<Vec<u8>> {
    natural("beacon")
}

pub fn pulsar() -> Vec<Vec<u8>> {
    natural("pulsar")
}

/// Seeded random soup; `density` is the live probability per cell.
pub fn random(rows: usize, cols: usize, density: f64, seed: u64) -> Vec<Vec<u8>> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let threshold = (u64::MAX as f64 * density.clamp(0.0, 1.0)) as u64;
    (0..rows)
        .map(|_| {
            (0..cols)
                .map(|_| u8::from(rng.next_u64() <= threshold && density > 0.0))
                .collect()
        })
        .collect()
}
