use anyhow::{Context, Result};
use clap::Parser;
use guard_patrol::{logging, patrol, CLIArgs};

fn main() -> Result<()> {
    logging::init();
    let args = CLIArgs::parse();
    let board = guard_patrol::read_board(&args.input_path, args.pad).with_context(|| {
        format!(
            "Failed to read board from given file({}).",
            args.input_path.display()
        )
    })?;

    let start = board.find_start()?;
    let patrol_positions = patrol::coverage(&board, start)?;
    println!(
        "The guard will visit {} distinct position(s) before leaving the mapped area.",
        patrol_positions.len()
    );

    Ok(())
}
