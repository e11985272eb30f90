use std::fmt;

use tracing::debug;

use crate::error::{EndgameError, Result};
use crate::word_source::WordSource;

/// Keys on the guessing keyboard, in display order.
pub const ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz";

pub fn is_keyboard_letter(c: char) -> bool {
    c.is_ascii_lowercase()
}

/// The word the player has to uncover.
///
/// Always non-empty and made only of keyboard letters, so the engine never
/// has to deal with letters the player cannot type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SecretWord(String);

impl SecretWord {
    pub fn new(raw: &str) -> Result<Self> {
        let word = raw.trim().to_lowercase();

        if word.is_empty() {
            return Err(EndgameError::InvalidWord {
                word,
                reason: "word is empty",
            });
        }

        if !word.chars().all(is_keyboard_letter) {
            return Err(EndgameError::InvalidWord {
                word,
                reason: "word contains characters outside a-z",
            });
        }

        Ok(Self(word))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn contains(&self, letter: char) -> bool {
        self.0.contains(letter)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for SecretWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SecretWord {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Phase {
    #[strum(serialize = "in progress")]
    InProgress,
    #[strum(serialize = "won")]
    Won,
    #[strum(serialize = "lost")]
    Lost,
}

/// Everything derivable from a word and the guesses made against it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub wrong_guesses: Vec<char>,
    pub wrong_count: usize,
    pub max_errors: usize,
    /// Attempts left before the game is lost; stays at zero once lost.
    pub remaining: usize,
    pub is_lost: bool,
    pub is_won: bool,
    pub last_guess: Option<char>,
    pub is_last_guess_wrong: bool,
}

impl Status {
    pub fn is_over(&self) -> bool {
        self.is_won || self.is_lost
    }

    /// A win is checked before a loss, so a winning final guess is never
    /// reported as a loss.
    pub fn phase(&self) -> Phase {
        if self.is_won {
            Phase::Won
        } else if self.is_lost {
            Phase::Lost
        } else {
            Phase::InProgress
        }
    }
}

/// Derive the full game status. `schedule_len` is the number of penalty
/// entries; one fewer wrong guesses are tolerated.
pub fn compute_status(word: &str, guessed: &[char], schedule_len: usize) -> Status {
    let max_errors = schedule_len.saturating_sub(1);

    let wrong_guesses: Vec<char> = guessed
        .iter()
        .copied()
        .filter(|&l| !word.contains(l))
        .collect();
    let wrong_count = wrong_guesses.len();

    let last_guess = guessed.last().copied();

    Status {
        remaining: max_errors.saturating_sub(wrong_count),
        is_lost: wrong_count >= max_errors,
        is_won: word.chars().all(|l| guessed.contains(&l)),
        is_last_guess_wrong: last_guess.is_some_and(|l| !word.contains(l)),
        wrong_guesses,
        wrong_count,
        max_errors,
        last_guess,
    }
}

/// A single round: one secret word and the letters guessed against it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    word: SecretWord,
    guessed: Vec<char>,
    schedule_len: usize,
}

impl Game {
    pub fn new(word: SecretWord, schedule_len: usize) -> Self {
        Self {
            word,
            guessed: Vec::new(),
            schedule_len,
        }
    }

    /// Start a game with a word drawn from `source`.
    pub fn start(source: &mut dyn WordSource) -> Self {
        let schedule_len = source.schedule().len();
        let word = source.choose_word();
        debug!(len = word.len(), schedule_len, "new game");
        Self::new(word, schedule_len)
    }

    /// Throw this game away and start a fresh one. The new word may be the
    /// same as the old one.
    pub fn restart(&mut self, source: &mut dyn WordSource) {
        *self = Self::start(source);
    }

    /// Record a guess. Guessing a letter twice is a no-op; returns whether
    /// the guess was recorded.
    ///
    /// The letter is trusted to come from the keyboard, and guesses after
    /// the game is over are not rejected here.
    pub fn guess_letter(&mut self, letter: char) -> bool {
        if self.guessed.contains(&letter) {
            return false;
        }

        let before = self.status().phase();
        self.guessed.push(letter);
        let after = self.status().phase();

        debug!(%letter, hit = self.word.contains(letter), "guess");
        if before != after {
            debug!(from = %before, to = %after, "phase change");
        }

        true
    }

    pub fn status(&self) -> Status {
        compute_status(self.word.as_str(), &self.guessed, self.schedule_len)
    }

    pub fn word(&self) -> &SecretWord {
        &self.word
    }

    pub fn guessed(&self) -> &[char] {
        &self.guessed
    }

    pub fn schedule_len(&self) -> usize {
        self.schedule_len
    }

    pub fn is_guessed(&self, letter: char) -> bool {
        self.guessed.contains(&letter)
    }

    pub fn contains(&self, letter: char) -> bool {
        self.word.contains(letter)
    }
}
