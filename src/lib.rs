// Library interface for the Mastermind word game
// This allows integration tests to access internal modules

pub mod cli;
pub mod engine;
pub mod game_state;
pub mod generator;
pub mod letter;
pub mod logging;
pub mod session;
pub mod tui;

// Re-export commonly used items for easier testing
pub use engine::{GameEngine, ObserverId, score_guess};
pub use game_state::GameState;
pub use generator::{FixedSecretGenerator, RandomSecretGenerator, SecretGenerator};
pub use letter::{GuessLetter, LetterState, WORD_LENGTH};
pub use session::{GameInterface, UserAction, game_loop};
