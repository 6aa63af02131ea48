use std::collections::HashSet;

use tracing::trace;

use crate::{
    board::{Position, Terrain},
    guard::{Direction, Guard, Outcome},
    Error,
};

/// What a run records besides the guard states it needs for loop detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Also collect every distinct position the guard stands on.
    Coverage,
    LoopDetection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Running,
    Exited,
    Looped,
}

/// Drives a guard over some terrain until it leaves or repeats a state.
///
/// Every step either adds a new (position, direction) state or ends the run,
/// so a run takes at most `4 * row_n * col_n` steps.
pub struct PatrolSimulator<'a, T: Terrain + ?Sized> {
    terrain: &'a T,
    mode: Mode,
    guard: Guard,
    status: Status,
    visited_states: HashSet<Guard>,
    visited_positions: HashSet<Position>,
    advance_n: usize,
}

impl<'a, T: Terrain + ?Sized> PatrolSimulator<'a, T> {
    pub fn new(terrain: &'a T, start: Guard, mode: Mode) -> Self {
        let mut visited_positions = HashSet::new();
        if mode == Mode::Coverage {
            visited_positions.insert(*start.pos());
        }

        Self {
            terrain,
            mode,
            guard: start,
            status: Status::Running,
            visited_states: HashSet::from([start]),
            visited_positions,
            advance_n: 0,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn guard(&self) -> &Guard {
        &self.guard
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn advance_n(&self) -> usize {
        self.advance_n
    }

    /// Empty unless running in coverage mode.
    pub fn visited_positions(&self) -> &HashSet<Position> {
        &self.visited_positions
    }

    pub fn into_visited_positions(self) -> HashSet<Position> {
        self.visited_positions
    }

    /// Advance once, None after the run has ended.
    pub fn step(&mut self) -> Option<Outcome> {
        if self.status != Status::Running {
            return None;
        }

        let outcome = self.guard.advance(self.terrain);
        self.advance_n += 1;
        trace!(?outcome, steps = self.advance_n, "guard advanced");
        match outcome {
            Outcome::Exited => {
                self.status = Status::Exited;
                trace!(guard = %self.guard, steps = self.advance_n, "guard left the board");
            }
            Outcome::Rotated(next) | Outcome::Moved(next) => {
                self.guard = next;
                if self.mode == Mode::Coverage {
                    self.visited_positions.insert(*next.pos());
                }
                if !self.visited_states.insert(next) {
                    self.status = Status::Looped;
                    trace!(guard = %self.guard, steps = self.advance_n, "guard repeated a state");
                }
            }
        }

        Some(outcome)
    }

    pub fn run(&mut self) -> Status {
        while self.step().is_some() {}

        self.status
    }

    /// Face the guard towards `dir` without moving.
    ///
    /// The trajectory so far no longer predicts the one ahead, so the state history restarts
    /// from here. Visited positions are kept.
    pub fn steer(&mut self, dir: Direction) {
        if self.status != Status::Running || self.guard.dir() == dir {
            return;
        }

        self.guard = self.guard.facing(dir);
        self.visited_states.clear();
        self.visited_states.insert(self.guard);
    }
}

/// Distinct positions the guard stands on before leaving `terrain`.
pub fn coverage<T: Terrain + ?Sized>(terrain: &T, start: Guard) -> Result<HashSet<Position>, Error> {
    let mut simulator = PatrolSimulator::new(terrain, start, Mode::Coverage);
    match simulator.run() {
        Status::Exited => Ok(simulator.into_visited_positions()),
        _ => Err(Error::UnexpectedLoop(*simulator.guard())),
    }
}

pub fn detect_loop<T: Terrain + ?Sized>(terrain: &T, start: Guard) -> bool {
    PatrolSimulator::new(terrain, start, Mode::LoopDetection).run() == Status::Looped
}
