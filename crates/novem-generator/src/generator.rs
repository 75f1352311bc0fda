//! The randomized board builder.

use std::time::{Duration, Instant};

use log::{debug, trace};
use novem_core::{Board, Digit, DigitSet, Position};
use rand::{Rng, RngExt as _, SeedableRng as _};
use rand_pcg::Pcg64Mcg;

use crate::Difficulty;

/// A generated puzzle together with the solved grid it was carved from.
///
/// Every filled cell of `puzzle` equals the corresponding cell of
/// `solution`; `solution` has no empty cells. The solution is only a lookup
/// oracle for hints; win detection accepts any rule-consistent completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedBoard {
    /// The playable board, with cells removed according to the difficulty.
    pub puzzle: Board,
    /// The fully solved grid.
    pub solution: Board,
}

/// Builds solved grids and carves puzzles out of them.
///
/// The fill works row by row. Within a row it repeatedly picks the empty
/// column with the fewest legal candidates (ties to the leftmost) and fills
/// it with a uniformly random candidate; a row whose remaining empty columns
/// all have zero candidates is cleared and refilled from scratch. An attempt
/// that exceeds the timeout is abandoned entirely and the fill restarts from
/// the first row with a fresh timer.
#[derive(Debug, Clone)]
pub struct BoardGenerator {
    attempt_timeout: Duration,
}

impl BoardGenerator {
    /// How long one fill attempt may run before it is discarded.
    pub const DEFAULT_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(5);

    /// Creates a generator with the default attempt timeout.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_attempt_timeout(Self::DEFAULT_ATTEMPT_TIMEOUT)
    }

    /// Creates a generator with a custom attempt timeout.
    #[must_use]
    pub const fn with_attempt_timeout(attempt_timeout: Duration) -> Self {
        Self { attempt_timeout }
    }

    /// Generates a puzzle and its solution for the given difficulty.
    ///
    /// This is a blocking call with no cancellation hook. The timeout bounds
    /// each attempt, not the call: a restart discards all progress and tries
    /// again, so generation retries until an attempt succeeds and can in
    /// principle run indefinitely. In practice the minimum-remaining-values
    /// ordering completes well inside a single attempt.
    pub fn generate<R: Rng>(&self, difficulty: Difficulty, rng: &mut R) -> GeneratedBoard {
        let solution = self.fill_grid(rng);
        debug_assert!(solution.is_winning());

        let mut puzzle = solution.clone();
        remove_cells(&mut puzzle, difficulty.removal_count(), rng);

        GeneratedBoard { puzzle, solution }
    }

    /// Generates a puzzle from a fixed seed, for reproducible runs.
    #[must_use]
    pub fn generate_with_seed(&self, difficulty: Difficulty, seed: u64) -> GeneratedBoard {
        let mut rng = Pcg64Mcg::seed_from_u64(seed);
        self.generate(difficulty, &mut rng)
    }

    fn fill_grid<R: Rng>(&self, rng: &mut R) -> Board {
        let mut board = Board::new();
        let mut started = Instant::now();
        let mut y = 0;
        while y < 9 {
            if self.fill_row(&mut board, y, &mut started, rng) {
                y += 1;
            } else {
                // Attempt timed out: drop everything and start over.
                board = Board::new();
                y = 0;
            }
        }
        board
    }

    /// Fills row `y` completely, or returns `false` if the attempt timed
    /// out (the timer is reset for the next attempt).
    fn fill_row<R: Rng>(
        &self,
        board: &mut Board,
        y: u8,
        started: &mut Instant,
        rng: &mut R,
    ) -> bool {
        loop {
            if started.elapsed() > self.attempt_timeout {
                debug!(
                    "fill attempt exceeded {:?} at row {y}; restarting from row 0",
                    self.attempt_timeout
                );
                *started = Instant::now();
                return false;
            }

            match most_constrained_cell(board, y) {
                RowScan::Complete => return true,
                RowScan::Stuck => {
                    trace!("row {y} unsatisfiable; clearing it");
                    clear_row(board, y);
                }
                RowScan::Fill(pos, candidates) => {
                    board.set(pos, pick_candidate(candidates, rng));
                }
            }
        }
    }
}

impl Default for BoardGenerator {
    fn default() -> Self {
        Self::new()
    }
}

enum RowScan {
    /// No empty cells remain in the row.
    Complete,
    /// Empty cells remain but none has a legal candidate.
    Stuck,
    /// The empty cell with the fewest (non-zero) candidates.
    Fill(Position, DigitSet),
}

/// Scans row `y` left to right for the empty cell with the fewest legal
/// candidates. Cells with zero candidates never win the scan; the strict
/// `<` comparison makes ties resolve to the lowest column index.
fn most_constrained_cell(board: &Board, y: u8) -> RowScan {
    let mut best: Option<(Position, DigitSet)> = None;
    let mut empty_cells = 0;
    for x in 0..9 {
        let pos = Position::new(x, y);
        if board.get(pos).is_some() {
            continue;
        }
        empty_cells += 1;
        let candidates = board.candidates(pos);
        if candidates.is_empty() {
            continue;
        }
        let improves = best
            .as_ref()
            .is_none_or(|(_, current)| candidates.len() < current.len());
        if improves {
            best = Some((pos, candidates));
        }
    }
    match best {
        Some((pos, candidates)) => RowScan::Fill(pos, candidates),
        None if empty_cells == 0 => RowScan::Complete,
        None => RowScan::Stuck,
    }
}

fn clear_row(board: &mut Board, y: u8) {
    for x in 0..9 {
        board.clear(Position::new(x, y));
    }
}

fn pick_candidate<R: Rng>(candidates: DigitSet, rng: &mut R) -> Digit {
    let choice = rng.random_range(0..candidates.len());
    candidates
        .into_iter()
        .nth(choice)
        .expect("choice is within the candidate set")
}

/// Clears `count` random cells by rejection sampling: already-empty picks
/// are simply re-rolled.
fn remove_cells<R: Rng>(board: &mut Board, count: usize, rng: &mut R) {
    let mut removed = 0;
    while removed < count {
        let pos = Position::new(rng.random_range(0..9), rng.random_range(0..9));
        if board.get(pos).is_some() {
            board.clear(pos);
            removed += 1;
        }
    }
}
