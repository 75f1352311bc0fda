//! The save-file encoder and decoder.
//!
//! A saved game is plain text, eight lines long:
//!
//! 1. the board, 81 raw bytes in row-major order
//! 2. the solution, same encoding
//! 3. checking enabled (0 or 1)
//! 4. elapsed seconds
//! 5. hint count
//! 6. rejected-move count
//! 7. difficulty rank (1-3)
//! 8. blank
//!
//! Every value is shifted by a fixed additive offset of 30 before writing:
//! board cells become single bytes (a digit `d` is stored as the byte
//! `d + 30`, an empty cell as the space ordinal 32 plus 30), and the stat
//! lines are decimal integers of `value + 30`. The offset obfuscates casual
//! inspection of the file; it is not encryption and provides no
//! confidentiality.
//!
//! Decoding reverses the offset and validates everything: board bytes must
//! decode to a digit 1-9 or the empty marker, stats must be in range, and
//! the difficulty rank must name a real difficulty. The decoded stats start
//! a fresh session segment: the session start is reset to now and the
//! stored elapsed seconds become carry-over.

use std::{fs, io, path::Path};

use log::debug;
use novem_core::{Board, Digit, Position};
use novem_generator::Difficulty;

use crate::GameStats;

/// The additive offset applied to every stored value.
const CIPHER_OFFSET: u8 = 30;

/// The on-disk value of an empty cell (the space character's ordinal).
const EMPTY_VALUE: u8 = 32;

/// A successfully decoded save file.
#[derive(Debug, Clone)]
pub struct SavedGame {
    /// The board as the player left it.
    pub board: Board,
    /// The solved grid generated with it.
    pub solution: Board,
    /// The restored stats, with a freshly reset session start.
    pub stats: GameStats,
}

/// Error decoding or reading a save file.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum LoadError {
    /// The file could not be read at all.
    #[display("cannot read save file: {_0}")]
    Io(#[from] io::Error),
    /// The data ended before all eight lines were seen.
    #[display("save data ended early")]
    UnexpectedEnd,
    /// A board line did not hold exactly 81 cells.
    #[display("board line holds {_0} cells, expected 81")]
    BadBoardLine(#[error(not(source))] usize),
    /// A board byte decoded to neither a digit nor the empty marker.
    #[display("byte {_0:#04x} is not a valid cell")]
    BadCellByte(#[error(not(source))] u8),
    /// A stat line was not a decimal integer.
    #[display("stat line {_0:?} is not a number")]
    BadStatLine(#[error(not(source))] String),
    /// A stat decoded to a value outside its range.
    #[display("stat value {_0} is out of range")]
    #[from(skip)]
    StatOutOfRange(#[error(not(source))] i64),
    /// The difficulty rank named no difficulty.
    #[display("difficulty rank {_0} is out of range")]
    #[from(skip)]
    BadDifficultyRank(#[error(not(source))] i64),
}

/// Encodes a session into the save-file byte format.
#[must_use]
pub fn encode(board: &Board, solution: &Board, stats: &GameStats) -> Vec<u8> {
    let mut out = Vec::with_capacity(2 * 82 + 5 * 8 + 1);
    push_board_line(&mut out, board);
    push_board_line(&mut out, solution);

    let elapsed = i64::try_from(stats.carried_elapsed()).unwrap_or(i64::MAX);
    let stat_values = [
        i64::from(stats.checks_enabled()),
        elapsed,
        i64::from(stats.num_hints()),
        i64::from(stats.num_checks()),
        i64::from(stats.difficulty().rank()),
    ];
    for value in stat_values {
        out.extend_from_slice((value + i64::from(CIPHER_OFFSET)).to_string().as_bytes());
        out.push(b'\n');
    }
    out.push(b'\n');
    out
}

fn push_board_line(out: &mut Vec<u8>, board: &Board) {
    for pos in Position::ALL {
        let value = board.get(pos).map_or(EMPTY_VALUE, Digit::value);
        out.push(value + CIPHER_OFFSET);
    }
    out.push(b'\n');
}

/// Decodes a save file's bytes back into a session.
///
/// # Errors
///
/// Returns a [`LoadError`] describing the first malformed line or value.
pub fn decode(bytes: &[u8]) -> Result<SavedGame, LoadError> {
    let mut lines = bytes.split(|&b| b == b'\n');
    let mut next_line = || lines.next().ok_or(LoadError::UnexpectedEnd);

    let board = decode_board_line(next_line()?)?;
    let solution = decode_board_line(next_line()?)?;

    let checks_enabled = match decode_stat_line(next_line()?)? {
        0 => false,
        1 => true,
        value => return Err(LoadError::StatOutOfRange(value)),
    };
    let elapsed = decode_stat_line(next_line()?)?;
    let elapsed = u64::try_from(elapsed).map_err(|_| LoadError::StatOutOfRange(elapsed))?;
    let num_hints = decode_counter(next_line()?)?;
    let num_checks = decode_counter(next_line()?)?;
    let rank = decode_stat_line(next_line()?)?;
    let difficulty = u8::try_from(rank)
        .ok()
        .and_then(Difficulty::from_rank)
        .ok_or(LoadError::BadDifficultyRank(rank))?;

    let stats = GameStats::restored(difficulty, elapsed, checks_enabled, num_hints, num_checks);
    Ok(SavedGame {
        board,
        solution,
        stats,
    })
}

fn decode_board_line(line: &[u8]) -> Result<Board, LoadError> {
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    if line.len() != 81 {
        return Err(LoadError::BadBoardLine(line.len()));
    }
    let mut board = Board::new();
    for (pos, &byte) in Position::ALL.into_iter().zip(line) {
        let value = byte
            .checked_sub(CIPHER_OFFSET)
            .ok_or(LoadError::BadCellByte(byte))?;
        if value == EMPTY_VALUE {
            continue;
        }
        let digit = Digit::try_from_value(value).ok_or(LoadError::BadCellByte(byte))?;
        board.set(pos, digit);
    }
    Ok(board)
}

fn decode_stat_line(line: &[u8]) -> Result<i64, LoadError> {
    let text = std::str::from_utf8(line)
        .map_err(|_| LoadError::BadStatLine(String::from_utf8_lossy(line).into_owned()))?;
    let text = text.strip_suffix('\r').unwrap_or(text);
    let raw: i64 = text
        .parse()
        .map_err(|_| LoadError::BadStatLine(text.to_owned()))?;
    Ok(raw - i64::from(CIPHER_OFFSET))
}

fn decode_counter(line: &[u8]) -> Result<u32, LoadError> {
    let value = decode_stat_line(line)?;
    u32::try_from(value).map_err(|_| LoadError::StatOutOfRange(value))
}

/// Encodes a session and writes it to `path`.
///
/// # Errors
///
/// Returns the underlying I/O error when the destination cannot be written.
pub fn save_to_path(
    path: impl AsRef<Path>,
    board: &Board,
    solution: &Board,
    stats: &GameStats,
) -> io::Result<()> {
    let path = path.as_ref();
    fs::write(path, encode(board, solution, stats))?;
    debug!("saved game to {}", path.display());
    Ok(())
}

/// Reads and decodes a save file.
///
/// # Errors
///
/// Returns [`LoadError::Io`] when the file cannot be read, or the decoding
/// error for malformed contents.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<SavedGame, LoadError> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    let saved = decode(&bytes)?;
    debug!("loaded game from {}", path.display());
    Ok(saved)
}
