//! Game session management for the Novem sudoku game.
//!
//! This crate turns the passive board types of `novem-core` into a playable
//! game:
//!
//! - [`Command`]: classification of one line of player input
//! - [`Session`]: the state machine driving a game from its first move to a
//!   win, a quit, or a save-and-exit
//! - [`GameStats`]: the per-session counters that feed [`compute_score`]
//! - [`find_hint`]: the hint search over the stored solution
//! - [`codec`]: the save-file encoder/decoder
//!
//! # Examples
//!
//! ```
//! use novem_game::{Session, TurnOutcome};
//! use novem_generator::{BoardGenerator, Difficulty};
//! use rand::SeedableRng as _;
//! use rand_pcg::Pcg64Mcg;
//!
//! let generated = BoardGenerator::new().generate_with_seed(Difficulty::Easy, 1);
//! let mut session = Session::new(generated, Difficulty::Easy);
//!
//! let mut rng = Pcg64Mcg::seed_from_u64(2);
//! let outcome = session.turn("checking on", &mut rng);
//! assert!(matches!(outcome, TurnOutcome::CheckingToggled { enabled: true }));
//! ```

pub mod codec;
pub mod command;
pub mod hint;
pub mod score;
pub mod session;
pub mod stats;

pub use self::{
    codec::{LoadError, SavedGame},
    command::{Command, ParseCommandError},
    hint::{Hint, find_hint},
    score::{BASE_SCORE, compute_score},
    session::{Session, SessionPhase, TurnOutcome},
    stats::GameStats,
};
