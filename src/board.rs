use std::{fmt::Display, str::FromStr};

use crate::{
    guard::{Direction, Guard},
    Error,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub r: usize,
    pub c: usize,
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.r, self.c)
    }
}

impl Position {
    pub fn new(r: usize, c: usize) -> Self {
        Self { r, c }
    }

    /// Neighbor one step along `dir`, None if it would leave the non-negative quadrant.
    /// The other edges are checked by the board.
    pub fn along(&self, dir: Direction) -> Option<Position> {
        match dir {
            Direction::Up if self.r > 0 => Some(Self::new(self.r - 1, self.c)),
            Direction::Right => Some(Self::new(self.r, self.c + 1)),
            Direction::Down => Some(Self::new(self.r + 1, self.c)),
            Direction::Left if self.c > 0 => Some(Self::new(self.r, self.c - 1)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Obstacle,
    // Guard's starting cell, walkable.
    Start(Direction),
}

impl Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Empty => write!(f, "."),
            Cell::Obstacle => write!(f, "#"),
            Cell::Start(dir) => write!(f, "{}", dir),
        }
    }
}

impl Cell {
    pub fn from_glyph(c: char) -> Option<Self> {
        match c {
            '.' => Some(Cell::Empty),
            '#' => Some(Cell::Obstacle),
            other => Direction::from_glyph(other).map(Cell::Start),
        }
    }
}

/// Anything the guard can patrol over.
pub trait Terrain {
    fn in_bounds(&self, pos: &Position) -> bool;
    fn is_obstacle(&self, pos: &Position) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridBoard {
    cells: Vec<Cell>,
    row_n: usize,
    col_n: usize,
}

impl Display for GridBoard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.cells.chunks(self.col_n.max(1)) {
            for cell in row {
                write!(f, "{}", cell)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl FromStr for GridBoard {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::load(s)
    }
}

impl Terrain for GridBoard {
    fn in_bounds(&self, pos: &Position) -> bool {
        pos.r < self.row_n && pos.c < self.col_n
    }

    fn is_obstacle(&self, pos: &Position) -> bool {
        self.cell(pos).is_some_and(|cell| cell == Cell::Obstacle)
    }
}

impl GridBoard {
    /// Parse a board, every line must have the same width. Blank lines before and after it are
    /// ignored.
    pub fn load(text: &str) -> Result<Self, Error> {
        Self::from_rows(text.lines(), false)
    }

    /// Like `load`, but lines are trimmed, blank ones dropped wherever they are, and short rows
    /// padded on the right with empty cells.
    pub fn load_padded(text: &str) -> Result<Self, Error> {
        Self::from_rows(text.lines(), true)
    }

    pub fn from_rows<'a, I>(rows: I, pad: bool) -> Result<Self, Error>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut rows = rows
            .into_iter()
            .map(|row| if pad { row.trim() } else { row.trim_end() })
            .collect::<Vec<_>>();
        if pad {
            rows.retain(|row| !row.is_empty());
        } else {
            // Only the surrounding blank lines, one inside the board is a zero-width row.
            let last = rows
                .iter()
                .rposition(|row| !row.is_empty())
                .map_or(0, |ind| ind + 1);
            rows.truncate(last);
            let first = rows
                .iter()
                .position(|row| !row.is_empty())
                .unwrap_or(rows.len());
            rows.drain(..first);
        }
        let pad_col_n = if pad {
            rows.iter().map(|row| row.chars().count()).max()
        } else {
            None
        };

        let mut builder = BoardBuilder::new();
        for row in rows {
            match pad_col_n {
                Some(col_n) => {
                    let padding = col_n - row.chars().count();
                    builder.add_row(&format!("{}{}", row, ".".repeat(padding)))?;
                }
                None => builder.add_row(row)?,
            }
        }

        builder.build()
    }

    pub fn row_n(&self) -> usize {
        self.row_n
    }

    pub fn col_n(&self) -> usize {
        self.col_n
    }

    pub fn cell(&self, pos: &Position) -> Option<Cell> {
        self.pos_to_ind(pos).and_then(|ind| self.cells.get(ind)).copied()
    }

    /// All positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.row_n).flat_map(move |r| (0..self.col_n).map(move |c| Position::new(r, c)))
    }

    pub fn find_start(&self) -> Result<Guard, Error> {
        self.cells
            .iter()
            .enumerate()
            .find_map(|(ind, cell)| match cell {
                Cell::Start(dir) => Some(Guard::new(self.ind_to_pos(ind), *dir)),
                _ => None,
            })
            .ok_or(Error::NoStartMarker)
    }

    /// Copy of this board with one more obstacle at `pos`, which must be an empty cell.
    pub fn with_obstacle_at(&self, pos: &Position) -> Result<GridBoard, Error> {
        let ind = self.placement_ind(pos)?;
        let mut board = self.clone();
        board.cells[ind] = Cell::Obstacle;

        Ok(board)
    }

    /// Same check as `with_obstacle_at`, without copying the cells.
    pub fn overlay_obstacle(&self, pos: &Position) -> Result<ObstacleOverlay<'_>, Error> {
        self.placement_ind(pos)?;

        Ok(ObstacleOverlay {
            board: self,
            obstacle: *pos,
        })
    }

    fn placement_ind(&self, pos: &Position) -> Result<usize, Error> {
        self.pos_to_ind(pos)
            .filter(|&ind| self.cells[ind] == Cell::Empty)
            .ok_or(Error::InvalidPlacement(*pos))
    }

    fn pos_to_ind(&self, pos: &Position) -> Option<usize> {
        if self.in_bounds(pos) {
            Some(pos.r * self.col_n + pos.c)
        } else {
            None
        }
    }

    fn ind_to_pos(&self, ind: usize) -> Position {
        Position::new(ind / self.col_n, ind % self.col_n)
    }
}

/// A board seen with a single extra obstacle.
#[derive(Debug, Clone, Copy)]
pub struct ObstacleOverlay<'a> {
    board: &'a GridBoard,
    obstacle: Position,
}

impl Terrain for ObstacleOverlay<'_> {
    fn in_bounds(&self, pos: &Position) -> bool {
        self.board.in_bounds(pos)
    }

    fn is_obstacle(&self, pos: &Position) -> bool {
        *pos == self.obstacle || self.board.is_obstacle(pos)
    }
}

impl ObstacleOverlay<'_> {
    pub fn obstacle(&self) -> &Position {
        &self.obstacle
    }
}

struct BoardBuilder {
    cells: Vec<Cell>,
    row_n: usize,
    col_n: Option<usize>,
    guard: Option<Guard>,
}

impl BoardBuilder {
    pub fn new() -> Self {
        Self {
            cells: Vec::new(),
            row_n: 0,
            col_n: None,
            guard: None,
        }
    }

    pub fn add_row(&mut self, row_text: &str) -> Result<(), Error> {
        let this_col_n = row_text.chars().count();
        let expect_col_n = *self.col_n.get_or_insert(this_col_n);
        if expect_col_n != this_col_n {
            return Err(Error::InconsistentRow(self.row_n, expect_col_n, this_col_n));
        }

        for (c_ind, c) in row_text.chars().enumerate() {
            let cell =
                Cell::from_glyph(c).ok_or(Error::InvalidChar(self.row_n, c_ind, c))?;
            if let Cell::Start(dir) = cell {
                let guard = Guard::new(Position::new(self.row_n, c_ind), dir);
                if let Some(last_guard) = self.guard {
                    return Err(Error::MultipleGuards(last_guard, guard));
                }

                self.guard = Some(guard);
            }
            self.cells.push(cell);
        }
        self.row_n += 1;

        Ok(())
    }

    pub fn build(self) -> Result<GridBoard, Error> {
        if self.guard.is_none() {
            return Err(Error::NoStartMarker);
        }

        Ok(GridBoard {
            cells: self.cells,
            row_n: self.row_n,
            col_n: self.col_n.unwrap_or(0),
        })
    }
}
