//! Dense row-major board storage and neighbor counting.

use crate::error::EngineError;

/// How neighbor lookups treat positions beyond the grid edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EdgePolicy {
    /// Toroidal: the top row touches the bottom row, the left column the right.
    #[default]
    Wrap,
    /// Off-grid positions do not exist and count as dead.
    Bounded,
}

impl EdgePolicy {
    #[inline]
    pub const fn from_wrap(wrap: bool) -> Self {
        if wrap { Self::Wrap } else { Self::Bounded }
    }

    #[inline]
    pub const fn wraps(self) -> bool {
        matches!(self, Self::Wrap)
    }
}

#[derive(Clone, PartialEq, Eq)]
pub(crate) struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<u8>,
}

impl Board {
    pub fn dead(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![0; rows * cols],
        }
    }

    /// Copy a rectangular 0/1 array into a new board.
    ///
    /// The row count is the outer length and the column count the length of
    /// the first row. Ragged rows and values other than 0 or 1 are rejected.
    pub fn from_rows<R: AsRef<[u8]>>(source: &[R]) -> Result<Self, EngineError> {
        let rows = source.len();
        let cols = source.first().map_or(0, |row| row.as_ref().len());
        let mut cells = Vec::with_capacity(rows * cols);

        for (row, values) in source.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != cols {
                return Err(EngineError::InvalidDimensions {
                    row,
                    expected: cols,
                    actual: values.len(),
                });
            }
            for (col, &value) in values.iter().enumerate() {
                if value > 1 {
                    return Err(EngineError::InvalidCellValue { row, col, value });
                }
                cells.push(value);
            }
        }

        Ok(Self { rows, cols, cells })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    #[inline]
    pub fn cells_mut(&mut self) -> &mut [u8] {
        &mut self.cells
    }

    #[inline(always)]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Strict lookup; never wraps regardless of edge policy.
    pub fn get(&self, row: i64, col: i64) -> Option<u8> {
        let row = usize::try_from(row).ok().filter(|&r| r < self.rows)?;
        let col = usize::try_from(col).ok().filter(|&c| c < self.cols)?;
        Some(self.cells[self.index(row, col)])
    }

    /// Number of live cells among the 8 positions around `(row, col)`.
    ///
    /// Under `Wrap` a position reached by two offsets (boards narrower than
    /// 3 along an axis) counts once, and a cell is never its own neighbor.
    pub fn live_neighbors(&self, row: usize, col: usize, edges: EdgePolicy) -> u8 {
        let (near_rows, row_count) = near(row, self.rows, edges);
        let (near_cols, col_count) = near(col, self.cols, edges);
        let mut count = 0u8;
        for &r in &near_rows[..row_count] {
            for &c in &near_cols[..col_count] {
                if (r, c) != (row, col) {
                    count += self.cells[self.index(r, c)];
                }
            }
        }
        count
    }

    pub fn population(&self) -> u64 {
        self.cells.iter().map(|&v| v as u64).sum()
    }

    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        if self.cols == 0 {
            return vec![Vec::new(); self.rows];
        }
        self.cells.chunks(self.cols).map(<[u8]>::to_vec).collect()
    }
}

/// Distinct positions within one step of `pos` along an axis of `len`,
/// including `pos` itself.
fn near(pos: usize, len: usize, edges: EdgePolicy) -> ([usize; 3], usize) {
    let mut out = [pos; 3];
    let mut n = 0;
    for delta in [-1isize, 0, 1] {
        let p = pos as isize + delta;
        let p = match edges {
            EdgePolicy::Wrap => p.rem_euclid(len as isize) as usize,
            EdgePolicy::Bounded if (0..len as isize).contains(&p) => p as usize,
            EdgePolicy::Bounded => continue,
        };
        if !out[..n].contains(&p) {
            out[n] = p;
            n += 1;
        }
    }
    (out, n)
}

impl std::fmt::Debug for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Board {}x{}", self.rows, self.cols)?;
        for row in 0..self.rows {
            for col in 0..self.cols {
                let glyph = if self.cells[self.index(row, col)] == 1 { '#' } else { '.' };
                write!(f, "{glyph}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
