//! Game engine: owns the active [`GameState`] and scores guesses.
//!
//! # State Machine
//! - `Editing` (not evaluated) → `evaluate()` → `Evaluated-Won` / `Evaluated-Lost`
//! - Any letter edit returns to `Editing`; `new_game()` starts a fresh round.
//!
//! Every operation either applies completely and then notifies observers, or
//! leaves the state untouched and notifies nobody.

use crate::game_state::GameState;
use crate::generator::SecretGenerator;
use crate::letter::{GuessLetter, LetterState, WORD_LENGTH, normalize_letter};
use crate::{debug_log, info_log};

/// Handle returned by [`GameEngine::subscribe`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ObserverId(usize);

type Observer = Box<dyn FnMut(&GameState)>;

pub struct GameEngine {
    generator: Box<dyn SecretGenerator>,
    state: GameState,
    observers: Vec<(ObserverId, Observer)>,
    next_observer: usize,
}

impl GameEngine {
    pub fn new(generator: impl SecretGenerator + 'static) -> Self {
        let mut generator: Box<dyn SecretGenerator> = Box::new(generator);
        let state = GameState::new(generator.generate());
        info_log!("GameEngine::new() - Round started");
        Self {
            generator,
            state,
            observers: Vec::new(),
            next_observer: 0,
        }
    }

    pub fn current_state(&self) -> &GameState {
        &self.state
    }

    /// The hidden word. Meant for tests and debugging.
    pub fn secret(&self) -> &[char; WORD_LENGTH] {
        self.state.secret()
    }

    pub fn secret_word(&self) -> String {
        self.state.secret_word()
    }

    /// Register a callback that receives the new state after every applied change.
    pub fn subscribe(&mut self, observer: impl FnMut(&GameState) + 'static) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(observer_id, _)| *observer_id != id);
        self.observers.len() != before
    }

    /// Put `value` into slot `position`.
    ///
    /// Letters are uppercased; anything else clears the slot. The slot's
    /// feedback and the evaluation flag are reset. Returns `false` (and
    /// changes nothing) when `position` is out of range.
    pub fn set_letter(&mut self, position: usize, value: Option<char>) -> bool {
        let Some(slot) = self.state.guess.get_mut(position) else {
            debug_log!("set_letter() - Ignoring out-of-range position {}", position);
            return false;
        };
        let character = normalize_letter(value);
        *slot = GuessLetter::new(character, LetterState::Empty);
        self.state.has_evaluated = false;
        debug_log!(
            "set_letter() - Slot {} now {:?}, guess: '{}'",
            position,
            character,
            self.state.guess_word()
        );
        self.notify();
        true
    }

    /// Score the current guess against the secret.
    ///
    /// Returns `false` without touching the state unless every slot is filled
    /// and the guess has not been evaluated since the last edit.
    pub fn evaluate(&mut self) -> bool {
        if !self.state.can_evaluate() {
            debug_log!("evaluate() - Guess not ready, ignoring");
            return false;
        }
        let Some(guess) = self.state.guess_letters() else {
            return false;
        };

        let states = score_guess(&guess, &self.state.secret);
        for (slot, state) in self.state.guess.iter_mut().zip(states) {
            slot.state = state;
        }
        self.state.has_evaluated = true;
        self.state.is_won = states.iter().all(|&s| s == LetterState::Correct);
        info_log!(
            "evaluate() - Guess '{}' scored {:?}, won: {}",
            self.state.guess_word(),
            states,
            self.state.is_won
        );
        self.notify();
        true
    }

    /// Draw a fresh secret and reset every slot.
    pub fn new_game(&mut self) {
        self.state = GameState::new(self.generator.generate());
        info_log!("new_game() - Round started");
        self.notify();
    }

    fn notify(&mut self) {
        for (_, observer) in &mut self.observers {
            observer(&self.state);
        }
    }
}

/// Per-position feedback for `guess` against `secret`.
///
/// Exact matches are marked first across the whole word. Each remaining guess
/// letter, left to right, then claims the first unclaimed secret position
/// holding the same letter, so a letter never earns more `Correct` plus
/// `WrongPosition` marks than it has occurrences in the secret.
pub fn score_guess<const N: usize>(guess: &[char; N], secret: &[char; N]) -> [LetterState; N] {
    let mut states = [LetterState::Incorrect; N];
    let mut secret_consumed = [false; N];
    let mut guess_resolved = [false; N];

    // First pass: exact matches
    for i in 0..N {
        if guess[i] == secret[i] {
            states[i] = LetterState::Correct;
            secret_consumed[i] = true;
            guess_resolved[i] = true;
        }
    }

    // Second pass: displaced matches
    for i in 0..N {
        if guess_resolved[i] {
            continue;
        }
        if let Some(j) = (0..N).find(|&j| !secret_consumed[j] && secret[j] == guess[i]) {
            states[i] = LetterState::WrongPosition;
            secret_consumed[j] = true;
        }
    }

    states
}
