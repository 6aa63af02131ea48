use std::collections::BTreeSet;

use rayon::prelude::*;
use tracing::debug;

use crate::{
    board::{GridBoard, Position, Terrain},
    guard::Guard,
    patrol, Error,
};

/// Tries a new obstacle on every free cell and keeps the ones that trap the guard.
pub struct LoopScanner<'a> {
    board: &'a GridBoard,
    start: Guard,
}

impl<'a> LoopScanner<'a> {
    pub fn new(board: &'a GridBoard, start: Guard) -> Self {
        Self { board, start }
    }

    /// Free cells other than the start, row-major.
    pub fn candidates(&self) -> Vec<Position> {
        self.board
            .positions()
            .filter(|pos| !self.board.is_obstacle(pos) && pos != self.start.pos())
            .collect()
    }

    pub fn loop_positions(&self) -> Result<BTreeSet<Position>, Error> {
        let mut loop_positions = BTreeSet::new();
        let mut last_row = None;
        for pos in self.candidates() {
            if last_row != Some(pos.r) {
                debug!(row = pos.r, found = loop_positions.len(), "scanning row");
                last_row = Some(pos.r);
            }

            if self.traps_guard(&pos)? {
                debug!(%pos, "obstacle here traps the guard");
                loop_positions.insert(pos);
            }
        }

        Ok(loop_positions)
    }

    /// Same result as `loop_positions`, candidates run on the rayon pool.
    pub fn loop_positions_parallel(&self) -> Result<BTreeSet<Position>, Error> {
        let trapped = self
            .candidates()
            .into_par_iter()
            .map(|pos| self.traps_guard(&pos).map(|is_loop| is_loop.then_some(pos)))
            .collect::<Result<Vec<_>, Error>>()?;
        debug!(candidates = trapped.len(), "parallel scan finished");

        Ok(trapped.into_iter().flatten().collect())
    }

    pub fn scan(&self) -> Result<usize, Error> {
        self.loop_positions().map(|positions| positions.len())
    }

    pub fn scan_parallel(&self) -> Result<usize, Error> {
        self.loop_positions_parallel().map(|positions| positions.len())
    }

    fn traps_guard(&self, pos: &Position) -> Result<bool, Error> {
        let overlay = self.board.overlay_obstacle(pos)?;

        Ok(patrol::detect_loop(&overlay, self.start))
    }
}

/// Number of cells where one new obstacle makes the guard patrol forever.
pub fn scan(board: &GridBoard, start: Guard) -> Result<usize, Error> {
    LoopScanner::new(board, start).scan()
}
