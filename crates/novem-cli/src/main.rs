//! Terminal front end for the Novem sudoku game.
//!
//! Thin I/O glue around the engine crates: menus, board rendering, and the
//! line-based play loop. All rules, scoring, and persistence live in
//! `novem-game`.

use std::io::{self, BufRead, Write};

use novem_game::{BASE_SCORE, Session, TurnOutcome, codec};
use novem_generator::{BoardGenerator, Difficulty};
use rand::SeedableRng as _;
use rand_pcg::Pcg64Mcg;

mod render;

const PROMPT: char = '>';

const WIN_MESSAGE: &str = "Congratulations, you completed the sudoku correctly!";
const SCORE_MESSAGE: &str = "Score is based on difficulty, checks, hints, and time.";
const FULL_BUT_INCORRECT: &str = "The board is full but there are errors.";
const INVALID_FILE: &str = "Invalid or nonexistent file";

const HELP_TEXT: &str = "How to play:\n\n\
\tNOTE: Commands are case and whitespace sensitive\n\n\
\tCommands:\n\
\t  1A 1:              This is how to make moves. The 1A indicates\n\
\t                     the square to be changed and the value after\n\
\t                     is the value to change it to. In this example\n\
\t                     the value in row 1, column A, is changed\n\
\t                     to the value of 1\n\
\t  help:              Displays this message\n\
\t  save FILENAME:     Saves game to output file name provided\n\
\t  hint:              Returns a hint (affects score)\n\
\t  checking {on|off}: Turns checking on or off. Checking is a\n\
\t                     feature that tells you if a move violates\n\
\t                     the rules of sudoku and thus prevents you\n\
\t                     from making it (affects score)\n\
\t  quit:              Quits game without saving\n";

fn main() -> io::Result<()> {
    better_panic::install();
    env_logger::init();

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut rng = Pcg64Mcg::from_rng(&mut rand::rng());

    loop {
        println!("Welcome to Novem!\n");
        let Some(choice) = prompt_menu(
            &mut input,
            "Please select an option from the list below",
            &["Start a new game", "Load game", "Exit"],
        )?
        else {
            return Ok(());
        };

        match choice {
            1 => {
                println!();
                let Some(difficulty) = prompt_difficulty(&mut input)? else {
                    return Ok(());
                };
                println!("\nPlease wait while board generates...");
                let generated = BoardGenerator::new().generate(difficulty, &mut rng);
                play(Session::new(generated, difficulty), &mut input, &mut rng)?;
            }
            2 => match load_game(&mut input)? {
                Some(session) => play(session, &mut input, &mut rng)?,
                None => println!("\n{INVALID_FILE}"),
            },
            _ => return Ok(()),
        }
        println!();
    }
}

fn prompt_menu(
    input: &mut impl BufRead,
    title: &str,
    options: &[&str],
) -> io::Result<Option<usize>> {
    loop {
        println!("{title}:\n");
        for (i, option) in options.iter().enumerate() {
            println!("\t{}) {option}", i + 1);
        }
        println!();
        print!("{PROMPT} ");
        io::stdout().flush()?;

        let Some(line) = read_line(input)? else {
            return Ok(None);
        };
        match line.trim().parse::<usize>() {
            Ok(choice) if (1..=options.len()).contains(&choice) => return Ok(Some(choice)),
            _ => println!("\nInvalid choice\n"),
        }
    }
}

fn prompt_difficulty(input: &mut impl BufRead) -> io::Result<Option<Difficulty>> {
    let choice = prompt_menu(input, "Choose a difficulty", &["Easy", "Medium", "Hard"])?;
    Ok(choice.map(|choice| Difficulty::ALL[choice - 1]))
}

fn load_game(input: &mut impl BufRead) -> io::Result<Option<Session>> {
    println!("\nEnter the name of the save file:\n");
    print!("{PROMPT} ");
    io::stdout().flush()?;

    let Some(line) = read_line(input)? else {
        return Ok(None);
    };
    let name = line.trim_end_matches(['\n', '\r']);
    match codec::load_from_path(name) {
        Ok(saved) => Ok(Some(Session::from_save(saved))),
        Err(err) => {
            log::warn!("failed to load {name:?}: {err}");
            Ok(None)
        }
    }
}

fn play(mut session: Session, input: &mut impl BufRead, rng: &mut Pcg64Mcg) -> io::Result<()> {
    render::print_board(session.board());

    loop {
        println!("\nEnter a command. Type 'help' for how to play:\n");
        print!("{PROMPT} ");
        io::stdout().flush()?;

        let Some(line) = read_line(input)? else {
            // End of input quits without saving, like `quit`.
            return Ok(());
        };
        let outcome = session.turn(&line, rng);

        match &outcome {
            TurnOutcome::MoveRejected => {
                println!("\nChecks are on. This move violates constraints on a winning board.");
            }
            TurnOutcome::HintGiven(Some(hint)) => {
                println!("\nChange the value at {} to {}", hint.pos, hint.digit);
            }
            TurnOutcome::HintGiven(None) => println!("\nNo hints available"),
            TurnOutcome::Unrecognized(_) => println!("\nInvalid input"),
            TurnOutcome::SaveFailed(err) => println!("\nCould not save the game: {err}"),
            TurnOutcome::QuitRequested => return Ok(()),
            TurnOutcome::Saved => {
                println!("\nGame saved.");
                return Ok(());
            }
            TurnOutcome::HelpRequested => {
                println!("\n{HELP_TEXT}");
                // The board is not re-rendered after help.
                continue;
            }
            TurnOutcome::Moved
            | TurnOutcome::Won { .. }
            | TurnOutcome::FullButIncorrect
            | TurnOutcome::CheckingToggled { .. } => {}
        }

        render::print_board(session.board());

        match outcome {
            TurnOutcome::Won { score } => {
                println!("\n{WIN_MESSAGE}");
                println!("Score is {score}/{BASE_SCORE}");
                println!("{SCORE_MESSAGE}");
                return Ok(());
            }
            TurnOutcome::FullButIncorrect => println!("\n{FULL_BUT_INCORRECT}"),
            _ => {}
        }
    }
}

fn read_line(input: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}
