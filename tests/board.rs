use guard_patrol::{Cell, Direction, Error, GridBoard, Guard, Outcome, Position, Terrain};

const SAMPLE: &str = include_str!("../sample.txt");

#[test]
fn load_sample_board() {
    let board = GridBoard::load(SAMPLE).unwrap();

    assert_eq!(board.row_n(), 10);
    assert_eq!(board.col_n(), 10);
    assert_eq!(
        board.find_start().unwrap(),
        Guard::new(Position::new(6, 4), Direction::Up)
    );
    assert!(board.is_obstacle(&Position::new(0, 4)));
    assert!(!board.is_obstacle(&Position::new(6, 4)));
    assert_eq!(board.to_string(), SAMPLE);
}

#[test]
fn start_glyph_sets_direction() {
    for (glyph, dir) in [
        ('^', Direction::Up),
        ('>', Direction::Right),
        ('v', Direction::Down),
        ('<', Direction::Left),
    ] {
        let board = GridBoard::load(&format!("..\n.{}", glyph)).unwrap();
        assert_eq!(
            board.find_start().unwrap(),
            Guard::new(Position::new(1, 1), dir)
        );
        assert_eq!(board.cell(&Position::new(1, 1)), Some(Cell::Start(dir)));
    }
}

#[test]
fn ragged_rows_are_rejected() {
    let result = GridBoard::load("..#.\n.^.\n....");

    assert!(matches!(result, Err(Error::InconsistentRow(1, 4, 3))));
}

#[test]
fn ragged_rows_are_padded_on_request() {
    let board = GridBoard::load_padded("..#.\n.^.\n....").unwrap();

    assert_eq!(board.col_n(), 4);
    assert_eq!(board.cell(&Position::new(1, 3)), Some(Cell::Empty));
}

#[test]
fn surrounding_blank_lines_are_dropped() {
    let board = GridBoard::load("\n\n.^\n#.\n\n").unwrap();

    assert_eq!(board.row_n(), 2);
    assert!(board.is_obstacle(&Position::new(1, 0)));
}

#[test]
fn blank_line_inside_board_is_rejected() {
    let result = GridBoard::load("..\n\n.^");

    assert!(matches!(result, Err(Error::InconsistentRow(1, 2, 0))));
}

#[test]
fn blank_line_inside_board_is_dropped_when_padding() {
    let board = GridBoard::load_padded("..\n\n.^").unwrap();

    assert_eq!(board.row_n(), 2);
    assert_eq!(
        board.find_start().unwrap(),
        Guard::new(Position::new(1, 1), Direction::Up)
    );
}

#[test]
fn padding_trims_leading_spaces() {
    let board = GridBoard::load_padded("  .^\n....").unwrap();

    assert_eq!(board.col_n(), 4);
    assert_eq!(
        board.find_start().unwrap(),
        Guard::new(Position::new(0, 1), Direction::Up)
    );
    assert_eq!(board.cell(&Position::new(0, 3)), Some(Cell::Empty));
    assert!(matches!(
        GridBoard::load("  .^\n...."),
        Err(Error::InvalidChar(0, 0, ' '))
    ));
}

#[test]
fn missing_guard_is_rejected() {
    assert!(matches!(
        GridBoard::load("...\n.#."),
        Err(Error::NoStartMarker)
    ));
    assert!(matches!(GridBoard::load(""), Err(Error::NoStartMarker)));
}

#[test]
fn second_guard_is_rejected() {
    let result = GridBoard::load("^..\n..<");

    match result {
        Err(Error::MultipleGuards(first, second)) => {
            assert_eq!(first, Guard::new(Position::new(0, 0), Direction::Up));
            assert_eq!(second, Guard::new(Position::new(1, 2), Direction::Left));
        }
        other => panic!("expect two guards error, get {:?}", other),
    }
}

#[test]
fn unknown_glyph_is_rejected() {
    assert!(matches!(
        GridBoard::load(".x\n^."),
        Err(Error::InvalidChar(0, 1, 'x'))
    ));
}

#[test]
fn obstacle_placement_copies_board() {
    let board = GridBoard::load(SAMPLE).unwrap();
    let pos = Position::new(6, 3);
    let blocked = board.with_obstacle_at(&pos).unwrap();

    assert!(blocked.is_obstacle(&pos));
    assert!(!board.is_obstacle(&pos));
    assert_eq!(board.cell(&pos), Some(Cell::Empty));
    assert_eq!(
        board
            .positions()
            .filter(|p| board.cell(p) != blocked.cell(p))
            .collect::<Vec<_>>(),
        vec![pos]
    );
}

#[test]
fn obstacle_placement_on_taken_cell_fails() {
    let board = GridBoard::load(SAMPLE).unwrap();
    let start_pos = Position::new(6, 4);
    let obstacle_pos = Position::new(0, 4);
    let outside_pos = Position::new(10, 0);

    for pos in [start_pos, obstacle_pos, outside_pos] {
        assert!(matches!(
            board.with_obstacle_at(&pos),
            Err(Error::InvalidPlacement(p)) if p == pos
        ));
        assert!(matches!(
            board.overlay_obstacle(&pos),
            Err(Error::InvalidPlacement(p)) if p == pos
        ));
    }
}

#[test]
fn overlay_adds_single_obstacle() {
    let board = GridBoard::load(SAMPLE).unwrap();
    let pos = Position::new(7, 6);
    let overlay = board.overlay_obstacle(&pos).unwrap();

    assert_eq!(*overlay.obstacle(), pos);
    assert!(overlay.is_obstacle(&pos));
    assert!(overlay.is_obstacle(&Position::new(0, 4)));
    assert!(!overlay.is_obstacle(&Position::new(7, 5)));
    assert!(!board.is_obstacle(&pos));
    assert!(overlay.in_bounds(&Position::new(9, 9)));
    assert!(!overlay.in_bounds(&Position::new(9, 10)));
}

#[test]
fn obstacle_on_edge_turns_instead_of_exiting() {
    let board = GridBoard::load(">#").unwrap();
    let start = board.find_start().unwrap();

    let turned = Guard::new(Position::new(0, 0), Direction::Down);
    assert_eq!(start.advance(&board), Outcome::Rotated(turned));
    assert_eq!(turned.advance(&board), Outcome::Exited);
}

#[test]
fn guard_moves_into_empty_cell() {
    let board = GridBoard::load(SAMPLE).unwrap();
    let start = board.find_start().unwrap();

    assert_eq!(
        start.advance(&board),
        Outcome::Moved(Guard::new(Position::new(5, 4), Direction::Up))
    );
}

#[test]
fn direction_turns_clockwise() {
    let mut dir = Direction::Up;
    let mut seen = Vec::new();
    for _ in 0..4 {
        seen.push(dir);
        dir = dir.turn_right();
    }

    assert_eq!(
        seen,
        vec![Direction::Up, Direction::Right, Direction::Down, Direction::Left]
    );
    assert_eq!(dir, Direction::Up);
}
