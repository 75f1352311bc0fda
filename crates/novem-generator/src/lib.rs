//! Puzzle generation for the Novem sudoku game.
//!
//! [`BoardGenerator`] builds a fully solved grid with a randomized
//! minimum-remaining-values fill, then removes a difficulty-dependent number
//! of cells to produce the playable puzzle. Both grids are returned as a
//! [`GeneratedBoard`]; the untouched solution serves as the hint oracle for
//! the rest of the game.
//!
//! Randomness is injected: every generation call takes a [`rand::Rng`],
//! seeded once by the caller, so runs are reproducible from a seed.
//!
//! # Examples
//!
//! ```
//! use novem_generator::{BoardGenerator, Difficulty};
//!
//! let generator = BoardGenerator::new();
//! let generated = generator.generate_with_seed(Difficulty::Medium, 42);
//!
//! assert!(generated.solution.is_full());
//! assert_eq!(generated.puzzle.empty_count(), Difficulty::Medium.removal_count());
//! ```

pub mod difficulty;
pub mod generator;

pub use self::{
    difficulty::Difficulty,
    generator::{BoardGenerator, GeneratedBoard},
};
