use crate::game_state::GameState;
use crate::letter::{LetterState, WORD_LENGTH, letters_from_word, uppercase_letter};
use crate::session::{GameInterface, UserAction};
use clap::Parser;
use std::io::BufRead;
use std::path::PathBuf;

/// Mastermind word game options
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Play with line-based commands instead of the terminal UI
    #[arg(short = 'p', long = "plain")]
    pub plain: bool,

    /// Use a fixed 4-letter secret (for debugging)
    #[arg(short = 's', long = "secret", value_parser = parse_secret)]
    pub secret: Option<[char; WORD_LENGTH]>,

    /// Seed for the random secret generator
    #[arg(long = "seed")]
    pub seed: Option<u64>,

    /// Write the log to this file instead of the default location
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

fn parse_secret(value: &str) -> Result<[char; WORD_LENGTH], String> {
    letters_from_word(value.trim())
        .ok_or_else(|| format!("secret must be exactly {WORD_LENGTH} letters, got '{value}'"))
}

// UI Input/Output functions

pub enum LineInput {
    Action(UserAction),
    Invalid(String),
}

pub fn parse_line(line: &str) -> LineInput {
    let input = line.trim();

    match input.to_uppercase().as_str() {
        "EXIT" | "QUIT" => return LineInput::Action(UserAction::Exit),
        "NEW" | "NEXT" => return LineInput::Action(UserAction::NewGame),
        "CHECK" => return LineInput::Action(UserAction::Evaluate),
        _ => {}
    }

    if let Some(letters) = letters_from_word(input) {
        return LineInput::Action(UserAction::Guess(letters.iter().collect()));
    }

    let mut parts = input.split_whitespace();
    let slot = parts.next().and_then(|s| s.parse::<usize>().ok());
    let value = parts.next();
    if parts.next().is_some() {
        return LineInput::Invalid(format!("Unrecognized command: '{}'", line.trim()));
    }

    match (slot, value) {
        (Some(slot @ 1..=WORD_LENGTH), None | Some("-")) => LineInput::Action(UserAction::SetLetter {
            position: slot - 1,
            letter: None,
        }),
        (Some(slot @ 1..=WORD_LENGTH), Some(letter)) => {
            let mut chars = letter.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_alphabetic() => {
                    LineInput::Action(UserAction::SetLetter {
                        position: slot - 1,
                        letter: Some(uppercase_letter(c)),
                    })
                }
                _ => LineInput::Invalid(format!("Only single letters are allowed! ('{letter}')")),
            }
        }
        (Some(_), _) => LineInput::Invalid(format!("Slot must be between 1 and {WORD_LENGTH}.")),
        (None, _) => LineInput::Invalid(format!(
            "Invalid input. Enter {WORD_LENGTH} letters, '<slot> <letter>', 'check', 'new' or 'exit'."
        )),
    }
}

/// Letters on one line, feedback codes underneath.
pub fn format_board(state: &GameState) -> String {
    let letters: Vec<String> = state
        .guess()
        .iter()
        .map(|letter| format!("[{}]", letter.display_char()))
        .collect();
    let feedback: Vec<String> = state
        .guess()
        .iter()
        .map(|letter| format!(" {} ", letter.state.code()))
        .collect();
    format!("{}\n{}", letters.join(" "), feedback.join(" "))
}

fn rejected_message(state: &GameState) -> String {
    if state.is_complete() {
        "Already checked. Change a letter before checking again.".to_string()
    } else {
        format!("Fill all {WORD_LENGTH} slots before checking.")
    }
}

pub fn display_instructions() {
    println!("Guess the {WORD_LENGTH}-letter secret. Letters may repeat.");
    println!(
        "Feedback: {}=right spot, {}=wrong spot, {}=not in word, {}=unchecked",
        LetterState::Correct.code(),
        LetterState::WrongPosition.code(),
        LetterState::Incorrect.code(),
        LetterState::Empty.code()
    );
}

/// CLI implementation of the GameInterface trait
/// This struct wraps a BufRead reader and implements the game interface for CLI interaction
pub struct CliInterface<R: BufRead> {
    reader: R,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        display_instructions();
        Self { reader }
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn display_board(&mut self, state: &GameState) {
        println!("\n{}", format_board(state));
    }

    fn read_action(&mut self) -> Option<UserAction> {
        println!(
            "\nEnter {WORD_LENGTH} letters, '<slot> <letter>', 'check', 'new' or 'exit':"
        );
        let mut input = String::new();
        match self.reader.read_line(&mut input) {
            // End of input ends the session
            Ok(0) | Err(_) => return Some(UserAction::Exit),
            Ok(_) => {}
        }

        match parse_line(&input) {
            LineInput::Action(action) => Some(action),
            LineInput::Invalid(message) => {
                println!("{message}");
                None
            }
        }
    }

    fn display_check_rejected(&mut self, state: &GameState) {
        println!("{}", rejected_message(state));
    }

    fn display_win(&mut self, secret: &str) {
        println!("Congratulations! You guessed the word: {secret}");
        println!("Type 'new' to play again or 'exit' to quit.");
    }

    fn display_new_game_message(&mut self) {
        println!("New game started. A new secret has been drawn.");
    }

    fn display_exit_message(&mut self) {
        println!("Exiting.");
    }
}
