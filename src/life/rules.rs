//! Rule table generation for B3/S23.

/// A live cell has at most 8 live neighbors, so 9 counts per state.
const COUNTS: usize = 9;

pub struct RuleTable {
    table: [u8; 2 * COUNTS],
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleTable {
    pub const fn new() -> Self {
        let mut table = [0u8; 2 * COUNTS];
        let mut i = 0;
        while i < table.len() {
            table[i] = output_for(i / COUNTS == 1, (i % COUNTS) as u8);
            i += 1;
        }
        Self { table }
    }

    /// Next state of a cell given its current value (0 or 1) and its live
    /// neighbor count.
    #[inline(always)]
    pub fn lookup(&self, current: u8, neighbors: u8) -> u8 {
        debug_assert!(current <= 1 && neighbors as usize <= 8);
        self.table[current as usize * COUNTS + neighbors as usize]
    }
}

const fn output_for(alive: bool, neighbors: u8) -> u8 {
    let next_alive = if alive {
        neighbors == 2 || neighbors == 3
    } else {
        neighbors == 3
    };
    next_alive as u8
}
