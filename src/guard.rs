use std::fmt::Display;

use crate::board::{Position, Terrain};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

impl Direction {
    pub fn from_glyph(c: char) -> Option<Self> {
        match c {
            '^' => Some(Direction::Up),
            '>' => Some(Direction::Right),
            'v' => Some(Direction::Down),
            '<' => Some(Direction::Left),
            _ => None,
        }
    }

    pub fn glyph(&self) -> char {
        match self {
            Direction::Up => '^',
            Direction::Right => '>',
            Direction::Down => 'v',
            Direction::Left => '<',
        }
    }

    /// 90 degrees clockwise.
    pub fn turn_right(&self) -> Self {
        match self {
            Direction::Up => Direction::Right,
            Direction::Right => Direction::Down,
            Direction::Down => Direction::Left,
            Direction::Left => Direction::Up,
        }
    }
}

/// Full state of the guard, also the key of loop detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Guard {
    pos: Position,
    dir: Direction,
}

impl Display for Guard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.dir, self.pos)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Exited,
    Rotated(Guard),
    Moved(Guard),
}

impl Outcome {
    pub fn guard(&self) -> Option<&Guard> {
        match self {
            Outcome::Exited => None,
            Outcome::Rotated(guard) | Outcome::Moved(guard) => Some(guard),
        }
    }
}

impl Guard {
    pub fn new(pos: Position, dir: Direction) -> Self {
        Self { pos, dir }
    }

    pub fn pos(&self) -> &Position {
        &self.pos
    }

    pub fn dir(&self) -> Direction {
        self.dir
    }

    pub fn ahead_pos(&self) -> Option<Position> {
        self.pos.along(self.dir)
    }

    pub fn facing(&self, dir: Direction) -> Self {
        Self::new(self.pos, dir)
    }

    /// One step: leave if the cell ahead is off the board, turn if it's blocked, or walk into it.
    /// Bounds come first so an obstacle on the edge never reads as an exit.
    pub fn advance<T: Terrain + ?Sized>(&self, terrain: &T) -> Outcome {
        match self.ahead_pos().filter(|pos| terrain.in_bounds(pos)) {
            None => Outcome::Exited,
            Some(ahead_pos) if terrain.is_obstacle(&ahead_pos) => {
                Outcome::Rotated(Self::new(self.pos, self.dir.turn_right()))
            }
            Some(ahead_pos) => Outcome::Moved(Self::new(ahead_pos, self.dir)),
        }
    }
}
