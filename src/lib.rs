use std::{
    error,
    fmt::Display,
    fs::File,
    io::{self, BufRead, BufReader},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

pub mod board;
pub mod guard;
pub mod logging;
pub mod patrol;
pub mod scan;
pub mod view;

pub use board::{Cell, GridBoard, ObstacleOverlay, Position, Terrain};
pub use guard::{Direction, Guard, Outcome};
pub use patrol::{Mode, PatrolSimulator, Status};
pub use scan::LoopScanner;

#[derive(Debug)]
pub enum Error {
    InconsistentRow(usize, usize, usize), // (row index, expected column count, given column count)
    InvalidChar(usize, usize, char),
    MultipleGuards(Guard, Guard),
    NoStartMarker,
    InvalidPlacement(Position),
    UnexpectedLoop(Guard),
    TerminalError(io::Error),
    NotEnoughTerminalSpace(usize, usize, usize, usize),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InconsistentRow(row_ind, expect_col_n, real_col_n) => write!(
                f,
                "Expect {} columns in row {}, given {}.",
                expect_col_n, row_ind, real_col_n
            ),
            Error::InvalidChar(r, c, ch) => write!(
                f,
                "Invalid character({}) at ({}, {}) in text of the board.",
                ch, r, c
            ),
            Error::MultipleGuards(guard0, guard1) => write!(
                f,
                "Found multiple guards({}, {}) on given board, expect one only.",
                guard0, guard1
            ),
            Error::NoStartMarker => write!(f, "There's no guard on given board, but expect one."),
            Error::InvalidPlacement(pos) => write!(
                f,
                "Can't place an obstacle at {}, only an empty cell other than the guard's start can take one.",
                pos
            ),
            Error::UnexpectedLoop(guard) => write!(
                f,
                "The guard walks in a loop(repeated {}) on a board it should leave.",
                guard
            ),
            Error::TerminalError(ioe) => {
                write!(f, "Failed to control terminal(stdout), get error({})", ioe)
            }
            Error::NotEnoughTerminalSpace(real_row_n, real_col_n, expect_row_n, expect_col_n) => {
                write!(
                    f,
                    "Terminal({} x {}) hasn't enough space to render, expect {} rows x {} columns",
                    real_row_n, real_col_n, expect_row_n, expect_col_n
                )
            }
        }
    }
}

impl error::Error for Error {}

#[derive(Debug, Parser)]
pub struct CLIArgs {
    pub input_path: PathBuf,
    /// Pad short rows with empty cells instead of rejecting them.
    #[arg(long)]
    pub pad: bool,
    /// Try the candidate obstacles on all cores.
    #[arg(long)]
    pub parallel: bool,
}

#[derive(Debug, Parser)]
pub struct PlayArgs {
    pub input_path: PathBuf,
    #[arg(long)]
    pub pad: bool,
    /// Milliseconds between two automatic steps.
    #[arg(long, default_value_t = 100)]
    pub frame_ms: u64,
    /// Only step when a key is pressed.
    #[arg(long)]
    pub manual: bool,
}

pub fn read_board<P: AsRef<Path>>(path: P, pad: bool) -> Result<GridBoard> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open given file({}).", path.as_ref().display()))?;
    let reader = BufReader::new(file);
    let mut rows = Vec::new();
    for (ind, line) in reader.lines().enumerate() {
        let line = line.with_context(|| {
            format!(
                "Failed to read line {} from given file({}).",
                ind + 1,
                path.as_ref().display()
            )
        })?;
        rows.push(line);
    }

    let board = GridBoard::from_rows(rows.iter().map(String::as_str), pad)?;
    info!(
        rows = board.row_n(),
        cols = board.col_n(),
        path = %path.as_ref().display(),
        "board loaded"
    );

    Ok(board)
}
