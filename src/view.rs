use std::{
    collections::HashSet,
    io::{self, Stdout, Write},
    ops::Range,
    time::Duration,
};

use crossterm::{
    cursor,
    event::{poll, read, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue, style,
    terminal::{self, ClearType},
};
use tracing::info;

use crate::{
    board::{GridBoard, Position, Terrain},
    guard::{Direction, Guard},
    patrol::{Mode, PatrolSimulator, Status},
    Error,
};

const VISITED_CHAR: char = 'X';
// Rows under the board for the status and the closing message.
const FOOTER_ROW_N: usize = 3;

/// How a playback session ended, with the distinct positions visited so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayEnd {
    Exited(usize),
    Looped(usize),
    Quit(usize),
}

/// Text rows of one frame: the guard as its direction glyph, visited cells as `X`.
pub fn frame_lines(board: &GridBoard, guard: &Guard, visited: &HashSet<Position>) -> Vec<String> {
    (0..board.row_n())
        .map(|r| {
            (0..board.col_n())
                .map(|c| {
                    let pos = Position::new(r, c);
                    if pos == *guard.pos() {
                        guard.dir().glyph()
                    } else if board.is_obstacle(&pos) {
                        '#'
                    } else if visited.contains(&pos) {
                        VISITED_CHAR
                    } else {
                        '.'
                    }
                })
                .collect::<String>()
        })
        .collect()
}

/// Part of an axis `len` cells long that fits in `view_len`, centered on `focus` when it can be.
pub fn viewport(len: usize, view_len: usize, focus: usize) -> Range<usize> {
    if view_len >= len {
        return 0..len;
    }

    let start = focus.saturating_sub(view_len / 2).min(len - view_len);
    start..start + view_len
}

/// `frame_lines` cut down to `view_row_n` x `view_col_n`, keeping the guard in sight.
pub fn visible_frame(
    board: &GridBoard,
    guard: &Guard,
    visited: &HashSet<Position>,
    view_row_n: usize,
    view_col_n: usize,
) -> Vec<String> {
    let rows = viewport(board.row_n(), view_row_n, guard.pos().r);
    let cols = viewport(board.col_n(), view_col_n, guard.pos().c);
    frame_lines(board, guard, visited)[rows]
        .iter()
        .map(|line| line.chars().skip(cols.start).take(cols.len()).collect::<String>())
        .collect()
}

enum Command {
    Steer(Direction),
    Step,
    Quit,
    Nothing,
}

fn command(ke: &KeyEvent) -> Command {
    if ke.kind != KeyEventKind::Press {
        return Command::Nothing;
    }

    match ke.code {
        KeyCode::Up => Command::Steer(Direction::Up),
        KeyCode::Right => Command::Steer(Direction::Right),
        KeyCode::Down => Command::Steer(Direction::Down),
        KeyCode::Left => Command::Steer(Direction::Left),
        KeyCode::Char(' ') => Command::Step,
        KeyCode::Char('q') | KeyCode::Esc => Command::Quit,
        _ => Command::Nothing,
    }
}

/// Watch (and steer) the guard patrolling `board` in the terminal.
///
/// Arrow keys turn the guard, `q` or Esc quits. Without `manual` the guard steps every
/// `frame_interval`; with it, an arrow key or space makes one step. Boards larger than the
/// terminal are shown through a window that follows the guard.
pub fn play(board: &GridBoard, frame_interval: Duration, manual: bool) -> Result<PlayEnd, Error> {
    let start = board.find_start()?;
    let mut simulator = PatrolSimulator::new(board, start, Mode::Coverage);
    let mut term = io::stdout();

    configure_term(&mut term).map_err(Error::TerminalError)?;
    let end = run_session(&mut term, board, &mut simulator, frame_interval, manual);
    restore_term(&mut term).map_err(Error::TerminalError)?;

    let end = end?;
    info!(?end, steps = simulator.advance_n(), "playback finished");
    Ok(end)
}

fn run_session(
    term: &mut Stdout,
    board: &GridBoard,
    simulator: &mut PatrolSimulator<'_, GridBoard>,
    frame_interval: Duration,
    manual: bool,
) -> Result<PlayEnd, Error> {
    loop {
        render(term, board, simulator, None)?;
        let visited_n = simulator.visited_positions().len();
        let end = match simulator.status() {
            Status::Running => None,
            Status::Exited => Some((
                PlayEnd::Exited(visited_n),
                format!("The guard left after visiting {} position(s).", visited_n),
            )),
            Status::Looped => Some((
                PlayEnd::Looped(visited_n),
                format!(
                    "The guard is stuck in a loop after visiting {} position(s).",
                    visited_n
                ),
            )),
        };
        if let Some((end, message)) = end {
            render(term, board, simulator, Some(&message))?;
            wait_any_key()?;
            return Ok(end);
        }

        let key_ready = manual || poll(frame_interval).map_err(Error::TerminalError)?;
        let cmd = if key_ready {
            match read().map_err(Error::TerminalError)? {
                Event::Key(ke) => command(&ke),
                _ => Command::Nothing,
            }
        } else {
            Command::Nothing
        };

        match cmd {
            Command::Quit => return Ok(PlayEnd::Quit(visited_n)),
            Command::Steer(dir) => {
                simulator.steer(dir);
                simulator.step();
            }
            Command::Step => {
                simulator.step();
            }
            Command::Nothing if !manual => {
                simulator.step();
            }
            Command::Nothing => (),
        }
    }
}

fn render(
    term: &mut Stdout,
    board: &GridBoard,
    simulator: &PatrolSimulator<'_, GridBoard>,
    message: Option<&str>,
) -> Result<(), Error> {
    let (term_col_n, term_row_n) = terminal::size().map_err(Error::TerminalError)?;
    let (term_col_n, term_row_n) = (term_col_n as usize, term_row_n as usize);
    if term_col_n == 0 || term_row_n <= FOOTER_ROW_N {
        return Err(Error::NotEnoughTerminalSpace(
            term_row_n,
            term_col_n,
            FOOTER_ROW_N + 1,
            1,
        ));
    }

    let guard = simulator.guard();
    let status_line = format!(
        "Visited: {}  Facing: {}  Steps: {}",
        simulator.visited_positions().len(),
        guard.dir(),
        simulator.advance_n()
    );
    let frame = visible_frame(
        board,
        guard,
        simulator.visited_positions(),
        term_row_n - FOOTER_ROW_N,
        term_col_n,
    );
    draw(term, &frame, &status_line, message).map_err(Error::TerminalError)
}

fn draw(
    term: &mut Stdout,
    frame: &[String],
    status_line: &str,
    message: Option<&str>,
) -> io::Result<()> {
    queue!(term, terminal::Clear(ClearType::All), cursor::MoveTo(0, 0))?;
    for line in frame {
        queue!(term, style::Print(line), cursor::MoveToNextLine(1))?;
    }
    queue!(term, style::Print(status_line), cursor::MoveToNextLine(1))?;
    if let Some(message) = message {
        queue!(
            term,
            style::Print(message),
            style::Print(" Press any key to exit."),
            cursor::MoveToNextLine(1)
        )?;
    }
    term.flush()
}

fn wait_any_key() -> Result<(), Error> {
    loop {
        if let Event::Key(ke) = read().map_err(Error::TerminalError)? {
            if ke.kind == KeyEventKind::Press {
                return Ok(());
            }
        }
    }
}

fn configure_term(term: &mut Stdout) -> io::Result<()> {
    execute!(term, terminal::EnterAlternateScreen)?;
    terminal::enable_raw_mode()?;
    queue!(
        term,
        style::ResetColor,
        terminal::Clear(ClearType::All),
        cursor::Hide,
        cursor::MoveTo(0, 0)
    )?;
    term.flush()
}

fn restore_term(term: &mut Stdout) -> io::Result<()> {
    execute!(
        term,
        style::ResetColor,
        cursor::Show,
        terminal::LeaveAlternateScreen
    )?;
    terminal::disable_raw_mode()
}
