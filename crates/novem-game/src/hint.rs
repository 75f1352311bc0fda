//! Suggesting a cell to fill or fix.

use novem_core::{Board, Digit, Position};
use rand::{Rng, RngExt as _};

/// A suggested correction: write `digit` at `pos`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hint {
    /// The cell to change.
    pub pos: Position,
    /// The stored solution's value for that cell.
    pub digit: Digit,
}

/// Searches for a cell whose solution value the player should be told.
///
/// The search draws a random starting row and a random column, then walks
/// the rows downward (wrapping past the last row) while reading the same
/// fixed column on every step. Only the nine cells of that single column are
/// ever inspected, so the search can come up empty even when another column
/// holds an obvious hint. That narrow scan is the intended behavior here;
/// widening it to the whole board would change both hint odds and game
/// feel.
///
/// On a full board a cell qualifies when it disagrees with the solution; on
/// a partial board, when it is empty. The first qualifying cell in scan
/// order is returned.
pub fn find_hint<R: Rng>(board: &Board, solution: &Board, rng: &mut R) -> Option<Hint> {
    let start_row: u8 = rng.random_range(0..9);
    let column: u8 = rng.random_range(0..9);
    let is_full = board.is_full();

    (0..9).find_map(|step| {
        let pos = Position::new(column, (start_row + step) % 9);
        let digit = solution.get(pos)?;
        let qualifies = if is_full {
            board.get(pos) != Some(digit)
        } else {
            board.get(pos).is_none()
        };
        qualifies.then_some(Hint { pos, digit })
    })
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg64Mcg;

    use super::*;

    const SOLVED: &str =
        "534678912672195348198342567859761423426853791713924856961537284287419635345286179";

    fn solution() -> Board {
        SOLVED.parse().unwrap()
    }

    #[test]
    fn test_empty_board_always_yields_a_hint() {
        let board = Board::new();
        let solution = solution();
        for seed in 0..32 {
            let mut rng = Pcg64Mcg::seed_from_u64(seed);
            let hint = find_hint(&board, &solution, &mut rng)
                .expect("every cell of an empty board qualifies");
            assert_eq!(board.get(hint.pos), None);
            assert_eq!(solution.get(hint.pos), Some(hint.digit));
        }
    }

    #[test]
    fn test_partial_board_hints_point_at_empty_cells() {
        let solution = solution();
        let mut board = solution.clone();
        for pos in Position::ALL.into_iter().take(27) {
            board.clear(pos);
        }
        for seed in 0..32 {
            let mut rng = Pcg64Mcg::seed_from_u64(seed);
            let hint =
                find_hint(&board, &solution, &mut rng).expect("first three rows are empty");
            assert_eq!(board.get(hint.pos), None);
            assert_eq!(solution.get(hint.pos), Some(hint.digit));
        }
    }

    #[test]
    fn test_full_board_hints_point_at_wrong_cells() {
        let solution = solution();
        let mut board = solution.clone();
        // Swap two cells of row 0 so exactly two cells disagree.
        let a = Position::new(0, 0);
        let b = Position::new(1, 0);
        let (va, vb) = (solution.get(a).unwrap(), solution.get(b).unwrap());
        board.set(a, vb);
        board.set(b, va);

        for seed in 0..64 {
            let mut rng = Pcg64Mcg::seed_from_u64(seed);
            if let Some(hint) = find_hint(&board, &solution, &mut rng) {
                assert!(hint.pos == a || hint.pos == b);
                assert_eq!(solution.get(hint.pos), Some(hint.digit));
                assert_ne!(board.get(hint.pos), Some(hint.digit));
            }
        }
    }

    #[test]
    fn test_search_only_inspects_one_column() {
        let solution = solution();
        let mut board = solution.clone();
        // A single empty cell in column 4: hints exist, but only a search
        // that lands on column 4 can find one.
        board.clear(Position::new(4, 7));

        let mut found = 0;
        let mut missed = 0;
        for seed in 0..64 {
            let mut rng = Pcg64Mcg::seed_from_u64(seed);
            match find_hint(&board, &solution, &mut rng) {
                Some(hint) => {
                    assert_eq!(hint.pos, Position::new(4, 7));
                    found += 1;
                }
                None => missed += 1,
            }
        }
        // Roughly one seed in nine picks the right column; both outcomes
        // must show up across 64 seeds.
        assert!(found > 0);
        assert!(missed > 0);
    }

    #[test]
    fn test_correct_full_board_has_no_hints() {
        let solution = solution();
        let board = solution.clone();
        for seed in 0..16 {
            let mut rng = Pcg64Mcg::seed_from_u64(seed);
            assert_eq!(find_hint(&board, &solution, &mut rng), None);
        }
    }
}
