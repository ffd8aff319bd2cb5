//! crucible — minimum-cost crucible routes across a digit grid.
//!
//! Run: cargo run -- <input-file> [min_run max_run]

use crucible_lib::{Args, solve};

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse(std::env::args().skip(1))?;
    let text = std::fs::read_to_string(&args.input)
        .map_err(|e| format!("reading {}: {e}", args.input))?;
    for line in solve(&text, args.mode)? {
        println!("{line}");
    }
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
