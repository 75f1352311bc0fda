//! The 9×9 board and its rule checks.

use std::{
    fmt::{self, Display, Write as _},
    ops::{Index, IndexMut},
    str::FromStr,
};

use crate::{Digit, DigitSet, Position};

/// An owned 9×9 grid of optional digits.
///
/// `None` is the empty-cell sentinel. The board itself never enforces the
/// sudoku constraints on writes; play with checking disabled may transiently
/// violate them. Callers that want enforcement ask
/// [`Board::is_legal_placement`] first.
///
/// The text form used by [`Display`] and [`FromStr`] is 81 characters in
/// row-major order, `1`-`9` for filled cells and `.` for empty ones.
///
/// # Examples
///
/// ```
/// use novem_core::{Board, Digit, Position};
///
/// let mut board = Board::new();
/// assert!(!board.is_full());
///
/// let pos = Position::new(0, 0);
/// board.set(pos, Digit::D5);
/// assert_eq!(board[pos], Some(Digit::D5));
///
/// board.clear(pos);
/// assert_eq!(board[pos], None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [Option<Digit>; 81],
}

impl Board {
    /// The board with every cell empty.
    pub const EMPTY: Self = Self { cells: [None; 81] };

    /// Creates an empty board.
    #[must_use]
    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// Returns the digit at `pos`, or `None` if the cell is empty.
    #[must_use]
    pub fn get(&self, pos: Position) -> Option<Digit> {
        self.cells[pos.index()]
    }

    /// Writes a digit at `pos`, overwriting any previous value.
    pub const fn set(&mut self, pos: Position, digit: Digit) {
        self.cells[pos.index()] = Some(digit);
    }

    /// Empties the cell at `pos`.
    pub const fn clear(&mut self, pos: Position) {
        self.cells[pos.index()] = None;
    }

    /// Returns whether every cell holds a digit.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Returns the number of empty cells.
    #[must_use]
    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_none()).count()
    }

    /// Returns whether placing `digit` at `pos` violates no sudoku rule.
    ///
    /// A placement is legal iff the digit does not already occur in one of
    /// the 20 cells sharing a row, column, or 3×3 box with `pos`. The cell
    /// itself is ignored, so the check can also re-validate a filled cell
    /// against the rest of the board.
    #[must_use]
    pub fn is_legal_placement(&self, pos: Position, digit: Digit) -> bool {
        pos.house_peers().all(|peer| self.get(peer) != Some(digit))
    }

    /// Returns the digits that can legally occupy `pos` on the current
    /// board.
    #[must_use]
    pub fn candidates(&self, pos: Position) -> DigitSet {
        let mut candidates = DigitSet::FULL;
        for peer in pos.house_peers() {
            if let Some(digit) = self.get(peer) {
                candidates.remove(digit);
            }
        }
        candidates
    }

    /// Returns whether the board is a completed, rule-consistent grid.
    ///
    /// True iff the board is full and every cell's digit is legal with
    /// respect to its peers. Any such grid counts, not just the one the
    /// generator produced alongside this puzzle.
    #[must_use]
    pub fn is_winning(&self) -> bool {
        Position::ALL.into_iter().all(|pos| match self.get(pos) {
            Some(digit) => self.is_legal_placement(pos, digit),
            None => false,
        })
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Index<Position> for Board {
    type Output = Option<Digit>;

    fn index(&self, pos: Position) -> &Option<Digit> {
        &self.cells[pos.index()]
    }
}

impl IndexMut<Position> for Board {
    fn index_mut(&mut self, pos: Position) -> &mut Option<Digit> {
        &mut self.cells[pos.index()]
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cell in &self.cells {
            match cell {
                Some(digit) => write!(f, "{digit}")?,
                None => f.write_char('.')?,
            }
        }
        Ok(())
    }
}

/// Error parsing a board from its 81-character text form.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseBoardError {
    /// The input did not contain exactly 81 cells.
    #[display("expected 81 cells, found {_0}")]
    BadLength(#[error(not(source))] usize),
    /// A cell character was neither a digit 1-9 nor `.`.
    #[display("invalid cell character {_0:?}")]
    BadCell(#[error(not(source))] char),
}

impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, ParseBoardError> {
        let mut board = Self::EMPTY;
        let mut count = 0;
        for (i, c) in s.chars().enumerate() {
            match c {
                '.' => {}
                '1'..='9' => {
                    if i < 81 {
                        #[expect(clippy::cast_possible_truncation)]
                        let digit = Digit::from_value(c as u8 - b'0');
                        board.cells[i] = Some(digit);
                    }
                }
                _ => return Err(ParseBoardError::BadCell(c)),
            }
            count += 1;
        }
        if count != 81 {
            return Err(ParseBoardError::BadLength(count));
        }
        Ok(board)
    }
}
