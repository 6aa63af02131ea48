use std::collections::HashSet;

use guard_patrol::{view, GridBoard, Mode, PatrolSimulator};

const SAMPLE: &str = include_str!("../sample.txt");

#[test]
fn first_frame_matches_board() {
    let board = GridBoard::load(SAMPLE).unwrap();
    let start = board.find_start().unwrap();

    let frame = view::frame_lines(&board, &start, &HashSet::from([*start.pos()]));
    assert_eq!(frame.join("\n") + "\n", SAMPLE);
}

#[test]
fn frame_follows_guard() {
    let board = GridBoard::load(SAMPLE).unwrap();
    let mut simulator = PatrolSimulator::new(&board, board.find_start().unwrap(), Mode::Coverage);
    // Five steps up, one turn.
    for _ in 0..6 {
        simulator.step();
    }

    let frame = view::frame_lines(&board, simulator.guard(), simulator.visited_positions());
    assert_eq!(frame[0], "....#.....");
    assert_eq!(frame[1], "....>....#");
    assert_eq!(frame[2], "....X.....");
    assert_eq!(frame[6], ".#..X.....");
}

#[test]
fn viewport_keeps_focus_inside() {
    assert_eq!(view::viewport(10, 20, 3), 0..10);
    assert_eq!(view::viewport(10, 4, 1), 0..4);
    assert_eq!(view::viewport(10, 4, 6), 4..8);
    assert_eq!(view::viewport(10, 4, 9), 6..10);
}

#[test]
fn frame_is_clipped_to_small_terminal() {
    let board = GridBoard::load(SAMPLE).unwrap();
    let start = board.find_start().unwrap();

    let frame = view::visible_frame(&board, &start, &HashSet::new(), 3, 4);
    assert_eq!(frame, vec!["....", "..^.", "...."]);

    let whole = view::visible_frame(&board, &start, &HashSet::new(), 40, 80);
    assert_eq!(whole.join("\n") + "\n", SAMPLE);
}
