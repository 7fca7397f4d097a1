//! Secret word generation.
//!
//! The engine takes any [`SecretGenerator`]: the random default, a fixed word
//! for tests and debugging, or a plain closure.

use crate::letter::{ALPHABET, WORD_LENGTH, letters_from_word};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub trait SecretGenerator {
    fn generate(&mut self) -> [char; WORD_LENGTH];
}

impl<F> SecretGenerator for F
where
    F: FnMut() -> [char; WORD_LENGTH],
{
    fn generate(&mut self) -> [char; WORD_LENGTH] {
        self()
    }
}

/// Draws every letter independently and uniformly from `A..=Z`.
pub struct RandomSecretGenerator<R = StdRng> {
    rng: R,
}

impl RandomSecretGenerator<StdRng> {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Same seed, same sequence of secrets.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomSecretGenerator<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> RandomSecretGenerator<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> SecretGenerator for RandomSecretGenerator<R> {
    fn generate(&mut self) -> [char; WORD_LENGTH] {
        std::array::from_fn(|_| char::from(ALPHABET[self.rng.gen_range(0..ALPHABET.len())]))
    }
}

/// Always returns the same secret.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedSecretGenerator {
    secret: [char; WORD_LENGTH],
}

impl FixedSecretGenerator {
    pub fn new(secret: [char; WORD_LENGTH]) -> Self {
        Self { secret }
    }

    /// `None` unless `word` is exactly four letters.
    pub fn from_word(word: &str) -> Option<Self> {
        letters_from_word(word).map(Self::new)
    }
}

impl SecretGenerator for FixedSecretGenerator {
    fn generate(&mut self) -> [char; WORD_LENGTH] {
        self.secret
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_secret_is_uppercase_letters() {
        let mut generator = RandomSecretGenerator::seeded(7);
        for _ in 0..200 {
            let secret = generator.generate();
            assert!(secret.iter().all(char::is_ascii_uppercase), "{secret:?}");
        }
    }

    #[test]
    fn test_same_seed_same_secrets() {
        let mut a = RandomSecretGenerator::seeded(42);
        let mut b = RandomSecretGenerator::seeded(42);
        for _ in 0..10 {
            assert_eq!(a.generate(), b.generate());
        }
    }

    #[test]
    fn test_random_secret_covers_alphabet() {
        // 4000 draws over 26 letters: every letter should show up
        let mut generator = RandomSecretGenerator::seeded(1);
        let mut seen = [false; 26];
        for _ in 0..1000 {
            for c in generator.generate() {
                seen[(c as u8 - b'A') as usize] = true;
            }
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_random_secret_allows_duplicates() {
        let mut generator = RandomSecretGenerator::seeded(3);
        let has_duplicate = (0..500).any(|_| {
            let secret = generator.generate();
            (0..WORD_LENGTH).any(|i| secret[i + 1..].contains(&secret[i]))
        });
        assert!(has_duplicate);
    }

    #[test]
    fn test_with_rng() {
        let mut a = RandomSecretGenerator::with_rng(StdRng::seed_from_u64(9));
        let mut b = RandomSecretGenerator::seeded(9);
        assert_eq!(a.generate(), b.generate());
    }

    #[test]
    fn test_fixed_generator() {
        let mut generator = FixedSecretGenerator::from_word("abcd").unwrap();
        assert_eq!(generator.generate(), ['A', 'B', 'C', 'D']);
        assert_eq!(generator.generate(), ['A', 'B', 'C', 'D']);
    }

    #[test]
    fn test_fixed_generator_rejects_bad_words() {
        assert!(FixedSecretGenerator::from_word("abc").is_none());
        assert!(FixedSecretGenerator::from_word("abcde").is_none());
        assert!(FixedSecretGenerator::from_word("ab-d").is_none());
    }

    #[test]
    fn test_closure_generator() {
        let mut calls = 0;
        let mut generator = || {
            calls += 1;
            ['W', 'O', 'R', 'D']
        };
        assert_eq!(generator.generate(), ['W', 'O', 'R', 'D']);
        assert_eq!(generator.generate(), ['W', 'O', 'R', 'D']);
        drop(generator);
        assert_eq!(calls, 2);
    }
}
