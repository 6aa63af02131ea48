use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use guard_patrol::{
    logging,
    view::{self, PlayEnd},
    PlayArgs,
};

fn main() -> Result<()> {
    logging::init();
    let args = PlayArgs::parse();
    let board = guard_patrol::read_board(&args.input_path, args.pad).with_context(|| {
        format!(
            "Failed to read board from given file({}).",
            args.input_path.display()
        )
    })?;

    let end = view::play(&board, Duration::from_millis(args.frame_ms), args.manual)
        .context("Failed to play the patrol in terminal.")?;
    match end {
        PlayEnd::Exited(visited_n) => println!(
            "The guard left the mapped area after visiting {} distinct position(s).",
            visited_n
        ),
        PlayEnd::Looped(visited_n) => println!(
            "The guard got stuck in a loop after visiting {} distinct position(s).",
            visited_n
        ),
        PlayEnd::Quit(visited_n) => println!(
            "Stopped watching after the guard visited {} distinct position(s).",
            visited_n
        ),
    }

    Ok(())
}
