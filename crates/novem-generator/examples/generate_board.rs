//! Example demonstrating board generation.
//!
//! Generates a puzzle at the requested difficulty and prints the puzzle and
//! its solution in the 81-character text form (`.` marks an empty cell).
//!
//! # Usage
//!
//! ```sh
//! cargo run --example generate_board
//! cargo run --example generate_board -- --difficulty hard
//! cargo run --example generate_board -- --seed 42
//! ```

use clap::{Parser, ValueEnum};
use novem_generator::{BoardGenerator, Difficulty};
use rand::{RngExt as _, SeedableRng as _};
use rand_pcg::Pcg64Mcg;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DifficultyArg {
    Easy,
    Medium,
    Hard,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Self::Easy,
            DifficultyArg::Medium => Self::Medium,
            DifficultyArg::Hard => Self::Hard,
        }
    }
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Difficulty of the generated puzzle.
    #[arg(long, value_name = "LEVEL", default_value = "medium")]
    difficulty: DifficultyArg,

    /// Seed for reproducible generation; random if omitted.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,
}

fn main() {
    let args = Args::parse();
    let difficulty = Difficulty::from(args.difficulty);

    let seed = args
        .seed
        .unwrap_or_else(|| Pcg64Mcg::from_rng(&mut rand::rng()).random());
    let generated = BoardGenerator::new().generate_with_seed(difficulty, seed);

    println!("Difficulty: {difficulty}");
    println!("Seed:       {seed}");
    println!();
    println!("Puzzle:     {}", generated.puzzle);
    println!("Solution:   {}", generated.solution);
    println!();
    println!(
        "{} of 81 cells removed",
        generated.puzzle.empty_count()
    );
}
