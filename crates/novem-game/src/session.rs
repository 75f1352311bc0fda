//! The session state machine that drives one game.

use std::{io, time::SystemTime};

use log::info;
use novem_core::{Board, Digit, Position};
use novem_generator::{Difficulty, GeneratedBoard};
use rand::Rng;

use crate::{
    Command, GameStats, Hint, ParseCommandError, SavedGame, codec, compute_score, find_hint,
};

/// Where a session currently stands.
///
/// A session starts in [`Playing`](Self::Playing) and leaves it through
/// exactly one of the three terminal phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// The game loop is accepting commands.
    Playing,
    /// The board was completed correctly.
    Won,
    /// The player quit without saving.
    Quit,
    /// The game was saved to disk and the session ended.
    Saved,
}

/// What a single turn did, for the front end to render.
#[derive(Debug)]
pub enum TurnOutcome {
    /// A move was applied; the game continues.
    Moved,
    /// A move was applied and completed the board correctly.
    Won {
        /// The final score.
        score: i64,
    },
    /// A move was applied, the board is full, but it has errors.
    FullButIncorrect,
    /// Checking is on and the move violated a rule; the board is unchanged.
    MoveRejected,
    /// A hint was requested; `None` means the search came up empty.
    HintGiven(Option<Hint>),
    /// The checking flag was flipped.
    CheckingToggled {
        /// The new state of the flag.
        enabled: bool,
    },
    /// The game was written to disk; the session is over.
    Saved,
    /// The save destination could not be written; the game continues.
    SaveFailed(io::Error),
    /// The player asked for the command reference.
    HelpRequested,
    /// The player quit.
    QuitRequested,
    /// The input matched no command form.
    Unrecognized(ParseCommandError),
}

/// One active game: the board being played, the solved grid behind it, and
/// the running stats.
///
/// The session is single-threaded and synchronous; [`turn`](Self::turn)
/// processes one command to completion (including save-file I/O) before the
/// next one is accepted. The board and solution are exclusively owned here
/// and the stats are only ever mutated through turns.
#[derive(Debug)]
pub struct Session {
    board: Board,
    solution: Board,
    stats: GameStats,
    phase: SessionPhase,
}

impl Session {
    /// Starts a session on a freshly generated puzzle.
    #[must_use]
    pub fn new(generated: GeneratedBoard, difficulty: Difficulty) -> Self {
        let GeneratedBoard { puzzle, solution } = generated;
        Self {
            board: puzzle,
            solution,
            stats: GameStats::new(difficulty),
            phase: SessionPhase::Playing,
        }
    }

    /// Resumes a session decoded from a save file.
    #[must_use]
    pub fn from_save(saved: SavedGame) -> Self {
        let SavedGame {
            board,
            solution,
            stats,
        } = saved;
        Self {
            board,
            solution,
            stats,
            phase: SessionPhase::Playing,
        }
    }

    /// Returns the board as the player sees it.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the solved grid backing hints.
    #[must_use]
    pub fn solution(&self) -> &Board {
        &self.solution
    }

    /// Returns the running stats.
    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    /// Returns the current phase.
    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Returns whether the session has reached a terminal phase.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase != SessionPhase::Playing
    }

    /// Processes one line of player input.
    ///
    /// Classifies the line, applies its effect to the board and stats, and
    /// reports what happened. Callers drive the loop while
    /// [`phase`](Self::phase) is [`SessionPhase::Playing`]; turns on a
    /// finished session are a caller bug.
    pub fn turn<R: Rng>(&mut self, line: &str, rng: &mut R) -> TurnOutcome {
        debug_assert_eq!(self.phase, SessionPhase::Playing, "turn on a finished session");

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => return TurnOutcome::Unrecognized(err),
        };

        match command {
            Command::Move { pos, digit } => self.apply_move(pos, digit),
            Command::Help => TurnOutcome::HelpRequested,
            Command::Quit => {
                self.phase = SessionPhase::Quit;
                TurnOutcome::QuitRequested
            }
            Command::Hint => {
                let hint = find_hint(&self.board, &self.solution, rng);
                self.stats.record_hint();
                TurnOutcome::HintGiven(hint)
            }
            Command::CheckingOn => {
                self.stats.set_checks_enabled(true);
                TurnOutcome::CheckingToggled { enabled: true }
            }
            Command::CheckingOff => {
                self.stats.set_checks_enabled(false);
                TurnOutcome::CheckingToggled { enabled: false }
            }
            Command::Save(filename) => self.save(&filename),
        }
    }

    fn apply_move(&mut self, pos: Position, digit: Digit) -> TurnOutcome {
        if self.stats.checks_enabled() && !self.board.is_legal_placement(pos, digit) {
            self.stats.record_check();
            return TurnOutcome::MoveRejected;
        }

        // With checking off any cell may be overwritten, givens included.
        self.board.set(pos, digit);

        if self.board.is_winning() {
            self.phase = SessionPhase::Won;
            let score = compute_score(&self.stats, SystemTime::now());
            info!("game won with score {score}");
            TurnOutcome::Won { score }
        } else if self.board.is_full() {
            TurnOutcome::FullButIncorrect
        } else {
            TurnOutcome::Moved
        }
    }

    fn save(&mut self, filename: &str) -> TurnOutcome {
        // Fold the live segment first so the file carries total play time.
        self.stats.fold_elapsed(SystemTime::now());
        match codec::save_to_path(filename, &self.board, &self.solution, &self.stats) {
            Ok(()) => {
                self.phase = SessionPhase::Saved;
                TurnOutcome::Saved
            }
            Err(err) => TurnOutcome::SaveFailed(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use novem_core::{Digit, Position};
    use rand::SeedableRng as _;
    use rand_pcg::Pcg64Mcg;

    use super::*;

    const SOLVED: &str =
        "534678912672195348198342567859761423426853791713924856961537284287419635345286179";

    fn solution() -> Board {
        SOLVED.parse().unwrap()
    }

    fn session_with_board(board: Board) -> Session {
        Session::new(
            GeneratedBoard {
                puzzle: board,
                solution: solution(),
            },
            Difficulty::Easy,
        )
    }

    fn rng() -> Pcg64Mcg {
        Pcg64Mcg::seed_from_u64(7)
    }

    #[test]
    fn test_move_fills_a_cell_with_checking_disabled() {
        let mut session = session_with_board(Board::new());
        let outcome = session.turn("1A 5", &mut rng());

        assert!(matches!(outcome, TurnOutcome::Moved));
        assert_eq!(
            session.board().get(Position::new(0, 0)),
            Some(Digit::D5)
        );
        assert_eq!(session.phase(), SessionPhase::Playing);
    }

    #[test]
    fn test_checking_rejects_conflicting_move_and_counts_it() {
        let mut session = session_with_board(Board::new());
        assert!(matches!(
            session.turn("1A 5", &mut rng()),
            TurnOutcome::Moved
        ));
        assert!(matches!(
            session.turn("checking on", &mut rng()),
            TurnOutcome::CheckingToggled { enabled: true }
        ));

        // 5 already sits in row 1.
        let outcome = session.turn("1B 5", &mut rng());
        assert!(matches!(outcome, TurnOutcome::MoveRejected));
        assert_eq!(session.board().get(Position::new(1, 0)), None);
        assert_eq!(session.stats().num_checks(), 1);
        assert_eq!(session.phase(), SessionPhase::Playing);
    }

    #[test]
    fn test_checking_off_allows_overwriting_conflicts() {
        let mut session = session_with_board(Board::new());
        session.turn("1A 5", &mut rng());
        let outcome = session.turn("1B 5", &mut rng());

        assert!(matches!(outcome, TurnOutcome::Moved));
        assert_eq!(
            session.board().get(Position::new(1, 0)),
            Some(Digit::D5)
        );
    }

    #[test]
    fn test_winning_move_ends_the_session_with_a_score() {
        let mut board = solution();
        board.clear(Position::new(0, 0));
        let mut session = session_with_board(board);

        // The top-left cell of the fixture solution is 5.
        let outcome = session.turn("1A 5", &mut rng());
        match outcome {
            TurnOutcome::Won { score } => {
                assert!(score <= 1000);
                assert!(score > 900);
            }
            other => panic!("expected a win, got {other:?}"),
        }
        assert_eq!(session.phase(), SessionPhase::Won);
        assert!(session.is_over());
    }

    #[test]
    fn test_wins_do_not_compare_against_the_stored_solution() {
        // A completion differing from the stored solution still wins as
        // long as it is rule-consistent: play a digit-relabeled grid.
        let mut board = Board::new();
        for pos in Position::ALL {
            let digit = solution().get(pos).unwrap();
            board.set(pos, Digit::from_value(digit.value() % 9 + 1));
        }
        board.clear(Position::new(0, 0));
        let mut session = session_with_board(board);

        // The fixture's 5 relabels to 6.
        let outcome = session.turn("1A 6", &mut rng());
        assert!(matches!(outcome, TurnOutcome::Won { .. }));
    }

    #[test]
    fn test_full_but_incorrect_board_keeps_playing() {
        let mut board = solution();
        board.clear(Position::new(0, 0));
        let mut session = session_with_board(board);

        // 9 is wrong for the top-left cell and collides elsewhere.
        let outcome = session.turn("1A 9", &mut rng());
        assert!(matches!(outcome, TurnOutcome::FullButIncorrect));
        assert_eq!(session.phase(), SessionPhase::Playing);
    }

    #[test]
    fn test_hint_increments_the_counter() {
        let mut session = session_with_board(Board::new());
        let outcome = session.turn("hint", &mut rng());

        match outcome {
            TurnOutcome::HintGiven(Some(hint)) => {
                assert_eq!(session.solution().get(hint.pos), Some(hint.digit));
            }
            other => panic!("empty board always has a hint, got {other:?}"),
        }
        assert_eq!(session.stats().num_hints(), 1);
    }

    #[test]
    fn test_quit_is_terminal() {
        let mut session = session_with_board(Board::new());
        assert!(matches!(
            session.turn("quit", &mut rng()),
            TurnOutcome::QuitRequested
        ));
        assert_eq!(session.phase(), SessionPhase::Quit);
    }

    #[test]
    fn test_help_and_unrecognized_input_keep_playing() {
        let mut session = session_with_board(Board::new());
        assert!(matches!(
            session.turn("help", &mut rng()),
            TurnOutcome::HelpRequested
        ));
        assert!(matches!(
            session.turn("frobnicate", &mut rng()),
            TurnOutcome::Unrecognized(_)
        ));
        assert_eq!(session.phase(), SessionPhase::Playing);
    }

    #[test]
    fn test_save_ends_the_session_and_round_trips() {
        let path = std::env::temp_dir().join("novem-session-save.sav");
        let mut session = session_with_board(Board::new());
        session.turn("1A 5", &mut rng());

        let line = format!("save {}", path.display());
        assert!(matches!(session.turn(&line, &mut rng()), TurnOutcome::Saved));
        assert_eq!(session.phase(), SessionPhase::Saved);

        let resumed = Session::from_save(codec::load_from_path(&path).unwrap());
        std::fs::remove_file(&path).ok();
        assert_eq!(
            resumed.board().get(Position::new(0, 0)),
            Some(Digit::D5)
        );
        assert_eq!(resumed.solution(), session.solution());
        assert_eq!(resumed.phase(), SessionPhase::Playing);
    }

    #[test]
    fn test_failed_save_keeps_the_session_alive() {
        let mut session = session_with_board(Board::new());
        let line = "save /no-such-directory/novem/game.sav";
        assert!(matches!(
            session.turn(line, &mut rng()),
            TurnOutcome::SaveFailed(_)
        ));
        assert_eq!(session.phase(), SessionPhase::Playing);
    }
}
