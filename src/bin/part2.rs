use anyhow::{Context, Result};
use clap::Parser;
use guard_patrol::{logging, CLIArgs, LoopScanner};

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
    let scanner = LoopScanner::new(&board, start);
    let loop_n = if args.parallel {
        scanner.scan_parallel()?
    } else {
        scanner.scan()?
    };
    println!(
        "There are {} position(s) where a new obstruction traps the guard in a loop.",
        loop_n
    );

    Ok(())
}
