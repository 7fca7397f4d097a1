/// Number of slots in a guess and letters in a secret.
pub const WORD_LENGTH: usize = 4;

/// Letters a secret is drawn from.
pub const ALPHABET: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Feedback for a single slot of the guess.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum LetterState {
    /// Not evaluated since the letter was last changed.
    #[default]
    Empty,
    Correct,       // Green
    WrongPosition, // Orange
    Incorrect,     // Red
}

impl LetterState {
    /// Single-character code used by the plain front end.
    pub fn code(self) -> char {
        match self {
            Self::Empty => '_',
            Self::Correct => 'G',
            Self::WrongPosition => 'Y',
            Self::Incorrect => 'X',
        }
    }
}

/// One slot of the guess: the typed letter and its feedback.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct GuessLetter {
    pub character: Option<char>,
    pub state: LetterState,
}

impl GuessLetter {
    pub fn new(character: Option<char>, state: LetterState) -> Self {
        Self { character, state }
    }

    pub fn is_empty(&self) -> bool {
        self.character.is_none()
    }

    /// The slot's letter in uppercase, or a blank when empty.
    pub fn display_char(&self) -> char {
        self.character.map_or(' ', uppercase_letter)
    }
}

/// Uppercase a single character.
///
/// A character whose uppercase form is more than one character (`'ß'` becomes
/// `"SS"`) is kept as it is, since a slot holds exactly one character.
pub fn uppercase_letter(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

/// Normalize a slot value: letters are uppercased, anything else clears.
pub fn normalize_letter(value: Option<char>) -> Option<char> {
    value.filter(|c| c.is_alphabetic()).map(uppercase_letter)
}

/// Parse exactly `WORD_LENGTH` letters into an uppercase sequence.
pub fn letters_from_word(word: &str) -> Option<[char; WORD_LENGTH]> {
    let mut letters = [' '; WORD_LENGTH];
    let mut chars = word.chars();
    for slot in &mut letters {
        *slot = normalize_letter(chars.next())?;
    }
    if chars.next().is_some() {
        return None;
    }
    Some(letters)
}
