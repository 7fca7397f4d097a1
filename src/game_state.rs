use crate::letter::{GuessLetter, LetterState, WORD_LENGTH, uppercase_letter};

/// Snapshot of a round: the secret, the guess slots and the evaluation flags.
///
/// Only [`GameEngine`](crate::engine::GameEngine) mutates a `GameState`;
/// everything else reads it through the accessors below.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct GameState {
    pub(crate) secret: [char; WORD_LENGTH],
    pub(crate) guess: [GuessLetter; WORD_LENGTH],
    pub(crate) has_evaluated: bool,
    pub(crate) is_won: bool,
}

impl GameState {
    /// Start a round for `secret` with every slot empty.
    pub fn new(secret: [char; WORD_LENGTH]) -> Self {
        Self {
            secret: secret.map(uppercase_letter),
            guess: [GuessLetter::default(); WORD_LENGTH],
            has_evaluated: false,
            is_won: false,
        }
    }

    pub fn secret(&self) -> &[char; WORD_LENGTH] {
        &self.secret
    }

    pub fn guess(&self) -> &[GuessLetter; WORD_LENGTH] {
        &self.guess
    }

    pub fn has_evaluated(&self) -> bool {
        self.has_evaluated
    }

    /// Stale while `has_evaluated` is false; read it together with that flag.
    pub fn is_won(&self) -> bool {
        self.is_won
    }

    /// True once the last evaluation marked every slot correct.
    pub fn is_solved(&self) -> bool {
        self.has_evaluated && self.is_won
    }

    pub fn is_complete(&self) -> bool {
        self.guess.iter().all(|letter| !letter.is_empty())
    }

    /// All slots filled and no evaluation since the last edit.
    pub fn can_evaluate(&self) -> bool {
        self.is_complete() && !self.has_evaluated
    }

    /// The guessed letters, or `None` while any slot is empty.
    pub fn guess_letters(&self) -> Option<[char; WORD_LENGTH]> {
        let mut letters = [' '; WORD_LENGTH];
        for (slot, letter) in letters.iter_mut().zip(&self.guess) {
            *slot = letter.character?;
        }
        Some(letters)
    }

    /// Letters typed so far, in slot order, skipping empty slots.
    pub fn guess_word(&self) -> String {
        self.guess.iter().filter_map(|letter| letter.character).collect()
    }

    pub fn secret_word(&self) -> String {
        self.secret.iter().collect()
    }

    pub fn states(&self) -> [LetterState; WORD_LENGTH] {
        self.guess.map(|letter| letter.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(secret: [char; WORD_LENGTH], guess: &str) -> GameState {
        let mut state = GameState::new(secret);
        for (slot, c) in state.guess.iter_mut().zip(guess.chars()) {
            slot.character = Some(c);
        }
        state
    }

    #[test]
    fn test_new_state_uppercases_secret() {
        let state = GameState::new(['t', 'e', 's', 't']);
        assert_eq!(state.secret(), &['T', 'E', 'S', 'T']);
        assert_eq!(state.secret_word(), "TEST");
        assert_eq!(state.guess().len(), WORD_LENGTH);
        assert!(state.guess().iter().all(GuessLetter::is_empty));
        assert!(!state.has_evaluated());
        assert!(!state.is_won());
        assert!(!state.is_solved());
    }

    #[test]
    fn test_guess_word() {
        let state = filled(['T', 'E', 'S', 'T'], "ABCD");
        assert_eq!(state.guess_word(), "ABCD");
        assert_eq!(state.guess_letters(), Some(['A', 'B', 'C', 'D']));
    }

    #[test]
    fn test_partial_guess() {
        let state = filled(['T', 'E', 'S', 'T'], "AB");
        assert_eq!(state.guess_word(), "AB");
        assert_eq!(state.guess_letters(), None);
        assert!(!state.is_complete());
        assert!(!state.can_evaluate());
    }

    #[test]
    fn test_can_evaluate_requires_every_slot() {
        // Every filling with at least one gap must be rejected
        for mask in 0u8..16 {
            let mut state = GameState::new(['A', 'B', 'C', 'D']);
            for (i, slot) in state.guess.iter_mut().enumerate() {
                if mask & (1 << i) != 0 {
                    slot.character = Some('Z');
                }
            }
            assert_eq!(state.can_evaluate(), mask == 0b1111, "mask {mask:04b}");
        }
    }

    #[test]
    fn test_can_evaluate_false_after_evaluation() {
        let mut state = filled(['A', 'B', 'C', 'D'], "WXYZ");
        assert!(state.can_evaluate());
        state.has_evaluated = true;
        assert!(!state.can_evaluate());
    }
}
