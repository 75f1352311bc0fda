//! Core data structures for the Novem sudoku game.
//!
//! This crate provides the board representation and the rule checks that the
//! generator, the game session, and the front end all build on:
//!
//! - [`Digit`]: type-safe sudoku digits 1-9
//! - [`Position`]: a cell coordinate on the 9×9 board
//! - [`DigitSet`]: a set of digits, used for per-cell candidate computation
//! - [`Board`]: an owned 9×9 grid of optional digits with row/column/box
//!   legality checks, fullness and win detection
//!
//! # Examples
//!
//! ```
//! use novem_core::{Board, Digit, Position};
//!
//! let mut board = Board::new();
//! board.set(Position::new(0, 0), Digit::D5);
//!
//! // 5 is no longer legal anywhere else in row 0
//! assert!(!board.is_legal_placement(Position::new(1, 0), Digit::D5));
//! assert!(!board.candidates(Position::new(8, 0)).contains(Digit::D5));
//! ```

pub mod board;
pub mod digit;
pub mod digit_set;
pub mod position;

pub use self::{
    board::{Board, ParseBoardError},
    digit::Digit,
    digit_set::DigitSet,
    position::Position,
};
