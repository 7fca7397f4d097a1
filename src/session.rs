use crate::engine::GameEngine;
use crate::game_state::GameState;
use crate::letter::WORD_LENGTH;
use crate::{debug_log, info_log};
use std::sync::mpsc;

/// What the player asked for, as produced by a front end.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UserAction {
    SetLetter {
        position: usize,
        letter: Option<char>,
    },
    /// Fill every slot from a word, then check it.
    Guess(String),
    Evaluate,
    NewGame,
    Exit,
}

/// Presentation seam between the game loop and a concrete front end.
pub trait GameInterface {
    fn display_board(&mut self, state: &GameState);
    /// `None` means nothing actionable was entered; the loop asks again.
    fn read_action(&mut self) -> Option<UserAction>;
    fn display_check_rejected(&mut self, state: &GameState);
    fn display_win(&mut self, secret: &str);
    fn display_new_game_message(&mut self);
    fn display_exit_message(&mut self);
}

/// Drive `engine` from `interface` until the player exits.
///
/// Engine changes are picked up through a subscription; after each action the
/// newest published state is rendered, and a won round reveals the secret.
pub fn game_loop<I: GameInterface + ?Sized>(engine: &mut GameEngine, interface: &mut I) {
    let (tx, rx) = mpsc::channel();
    let observer = engine.subscribe(move |state: &GameState| {
        // The receiver outlives the subscription
        let _ = tx.send(state.clone());
    });

    interface.display_board(engine.current_state());

    loop {
        let Some(action) = interface.read_action() else {
            continue;
        };
        info_log!("game_loop() - Action: {:?}", action);

        match action {
            UserAction::Exit => {
                interface.display_exit_message();
                break;
            }
            UserAction::NewGame => {
                engine.new_game();
                interface.display_new_game_message();
            }
            UserAction::SetLetter { position, letter } => {
                engine.set_letter(position, letter);
            }
            UserAction::Guess(word) => {
                let mut letters = word.chars();
                for position in 0..WORD_LENGTH {
                    engine.set_letter(position, letters.next());
                }
                check(engine, interface);
            }
            UserAction::Evaluate => check(engine, interface),
        }

        if let Some(state) = rx.try_iter().last() {
            interface.display_board(&state);
            if state.is_solved() {
                info_log!("game_loop() - Round won: {}", state.secret_word());
                interface.display_win(&state.secret_word());
            }
        }
    }

    engine.unsubscribe(observer);
}

fn check<I: GameInterface + ?Sized>(engine: &mut GameEngine, interface: &mut I) {
    if !engine.evaluate() {
        debug_log!("check() - Rejected, guess: '{}'", engine.current_state().guess_word());
        interface.display_check_rejected(engine.current_state());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::FixedSecretGenerator;
    use std::collections::VecDeque;

    /// Scripted front end that records what the loop showed it.
    #[derive(Default)]
    struct ScriptedInterface {
        actions: VecDeque<Option<UserAction>>,
        boards: Vec<GameState>,
        rejected: usize,
        wins: Vec<String>,
        new_games: usize,
        exited: bool,
    }

    impl ScriptedInterface {
        fn new(actions: Vec<Option<UserAction>>) -> Self {
            Self {
                actions: actions.into(),
                ..Self::default()
            }
        }
    }

    impl GameInterface for ScriptedInterface {
        fn display_board(&mut self, state: &GameState) {
            self.boards.push(state.clone());
        }

        fn read_action(&mut self) -> Option<UserAction> {
            self.actions.pop_front().unwrap_or(Some(UserAction::Exit))
        }

        fn display_check_rejected(&mut self, _state: &GameState) {
            self.rejected += 1;
        }

        fn display_win(&mut self, secret: &str) {
            self.wins.push(secret.to_string());
        }

        fn display_new_game_message(&mut self) {
            self.new_games += 1;
        }

        fn display_exit_message(&mut self) {
            self.exited = true;
        }
    }

    fn engine() -> GameEngine {
        GameEngine::new(FixedSecretGenerator::from_word("ABCD").unwrap())
    }

    fn set(position: usize, letter: char) -> Option<UserAction> {
        Some(UserAction::SetLetter {
            position,
            letter: Some(letter),
        })
    }

    #[test]
    fn test_game_loop_immediate_exit() {
        let mut engine = engine();
        let mut interface = ScriptedInterface::new(vec![Some(UserAction::Exit)]);
        game_loop(&mut engine, &mut interface);

        assert!(interface.exited);
        assert_eq!(interface.boards.len(), 1); // Initial board only
        assert!(interface.wins.is_empty());
    }

    #[test]
    fn test_game_loop_winning_guess() {
        let mut engine = engine();
        let mut interface = ScriptedInterface::new(vec![Some(UserAction::Guess("abcd".into()))]);
        game_loop(&mut engine, &mut interface);

        assert_eq!(interface.wins, vec!["ABCD".to_string()]);
        let last = interface.boards.last().unwrap();
        assert!(last.is_solved());
        assert_eq!(last.guess_word(), "ABCD");
    }

    #[test]
    fn test_game_loop_letter_by_letter() {
        let mut engine = engine();
        let mut interface = ScriptedInterface::new(vec![
            set(0, 'A'),
            set(1, 'C'),
            set(2, 'X'),
            set(3, 'D'),
            Some(UserAction::Evaluate),
        ]);
        game_loop(&mut engine, &mut interface);

        // Initial board plus one per applied action
        assert_eq!(interface.boards.len(), 6);
        assert!(interface.wins.is_empty());
        assert_eq!(interface.rejected, 0);
        let state = engine.current_state();
        assert!(state.has_evaluated());
        assert!(!state.is_won());
    }

    #[test]
    fn test_game_loop_rejects_incomplete_check() {
        let mut engine = engine();
        let mut interface =
            ScriptedInterface::new(vec![set(0, 'A'), Some(UserAction::Evaluate)]);
        game_loop(&mut engine, &mut interface);

        assert_eq!(interface.rejected, 1);
        assert_eq!(interface.boards.len(), 2);
        assert!(!engine.current_state().has_evaluated());
    }

    #[test]
    fn test_game_loop_rejects_repeat_check() {
        let mut engine = engine();
        let mut interface = ScriptedInterface::new(vec![
            Some(UserAction::Guess("XYZW".into())),
            Some(UserAction::Evaluate),
        ]);
        game_loop(&mut engine, &mut interface);
        assert_eq!(interface.rejected, 1);
    }

    #[test]
    fn test_game_loop_short_guess_clears_remaining_slots() {
        let mut engine = engine();
        let mut interface = ScriptedInterface::new(vec![
            Some(UserAction::Guess("WXYZ".into())),
            Some(UserAction::Guess("AB".into())),
        ]);
        game_loop(&mut engine, &mut interface);

        assert_eq!(interface.rejected, 1);
        assert_eq!(engine.current_state().guess_word(), "AB");
    }

    #[test]
    fn test_game_loop_ignores_empty_reads() {
        let mut engine = engine();
        let mut interface = ScriptedInterface::new(vec![None, None, set(0, 'Q')]);
        game_loop(&mut engine, &mut interface);
        assert_eq!(interface.boards.len(), 2);
    }

    #[test]
    fn test_game_loop_out_of_range_letter_renders_nothing() {
        let mut engine = engine();
        let mut interface = ScriptedInterface::new(vec![set(10, 'Q')]);
        game_loop(&mut engine, &mut interface);
        assert_eq!(interface.boards.len(), 1);
    }

    #[test]
    fn test_game_loop_new_game_after_win() {
        let mut engine = engine();
        let mut interface = ScriptedInterface::new(vec![
            Some(UserAction::Guess("ABCD".into())),
            Some(UserAction::NewGame),
        ]);
        game_loop(&mut engine, &mut interface);

        assert_eq!(interface.wins.len(), 1);
        assert_eq!(interface.new_games, 1);
        let last = interface.boards.last().unwrap();
        assert!(!last.has_evaluated());
        assert!(last.guess().iter().all(|l| l.is_empty()));
    }

    #[test]
    fn test_game_loop_unsubscribes_on_exit() {
        let mut engine = engine();
        let mut interface = ScriptedInterface::new(vec![]);
        game_loop(&mut engine, &mut interface);

        // Mutating after the loop must not try to reach the dropped receiver
        engine.set_letter(0, Some('A'));
        assert_eq!(engine.current_state().guess_word(), "A");
    }
}
