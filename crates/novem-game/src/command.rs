//! Classification of player input lines.

use std::str::FromStr;

use novem_core::{Digit, Position};

/// One classified line of player input.
///
/// Parsing is case and whitespace sensitive. Apart from stripping the
/// trailing line terminator, the input is matched exactly:
///
/// - `quit`, `help`, `hint`, `checking on`, `checking off`: literal
///   commands
/// - `save <filename>`: the rest of the line, verbatim, is the filename
/// - `<row><column> <value>`: a move such as `1A 5`, with row digit
///   `1`-`9`, column letter `A`-`I`, a space, and the value digit `1`-`9`
///
/// Anything else fails with [`ParseCommandError`].
///
/// # Examples
///
/// ```
/// use novem_core::{Digit, Position};
/// use novem_game::Command;
///
/// let command: Command = "3C 7".parse().unwrap();
/// assert_eq!(
///     command,
///     Command::Move {
///         pos: Position::new(2, 2),
///         digit: Digit::D7,
///     }
/// );
///
/// assert!("3c 7".parse::<Command>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Write `digit` at `pos`.
    Move {
        /// The target cell.
        pos: Position,
        /// The value to write.
        digit: Digit,
    },
    /// Show the command reference.
    Help,
    /// End the session without saving.
    Quit,
    /// Ask for a hint.
    Hint,
    /// Start rejecting rule-violating moves.
    CheckingOn,
    /// Stop rejecting rule-violating moves.
    CheckingOff,
    /// Save the session to the named file and exit.
    Save(String),
}

/// Error for input that matches no command form.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unrecognized command {line:?}")]
pub struct ParseCommandError {
    line: String,
}

impl ParseCommandError {
    /// Returns the offending input line (without its line terminator).
    #[must_use]
    pub fn line(&self) -> &str {
        &self.line
    }
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, ParseCommandError> {
        let line = s.strip_suffix('\n').unwrap_or(s);
        let line = line.strip_suffix('\r').unwrap_or(line);

        match line {
            "quit" => return Ok(Self::Quit),
            "help" => return Ok(Self::Help),
            "hint" => return Ok(Self::Hint),
            "checking on" => return Ok(Self::CheckingOn),
            "checking off" => return Ok(Self::CheckingOff),
            _ => {}
        }

        if let Some(name) = line.strip_prefix("save ")
            && !name.is_empty()
        {
            return Ok(Self::Save(name.to_owned()));
        }

        parse_move(line).ok_or_else(|| ParseCommandError {
            line: line.to_owned(),
        })
    }
}

fn parse_move(line: &str) -> Option<Command> {
    let &[row, column, b' ', value] = line.as_bytes() else {
        return None;
    };
    if !(b'1'..=b'9').contains(&row)
        || !(b'A'..=b'I').contains(&column)
        || !(b'1'..=b'9').contains(&value)
    {
        return None;
    }
    Some(Command::Move {
        pos: Position::new(column - b'A', row - b'1'),
        digit: Digit::from_value(value - b'0'),
    })
}
