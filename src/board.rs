// What the screen shows, derived from a game and its penalty schedule.
//
// Nothing here is stored; a `Board` is rebuilt for every frame.

use itertools::Itertools;

use crate::game::{Game, Phase, Status, ALPHABET};
use crate::word_source::Schedule;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LetterSlot {
    pub letter: char,
    pub revealed: bool,
    /// Never guessed, shown only once the game is lost.
    pub missed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum KeyState {
    Unused,
    Correct,
    Wrong,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Key {
    pub letter: char,
    pub state: KeyState,
    /// Whole keyboard is disabled once the game is over.
    pub disabled: bool,
}

impl Key {
    pub fn already_guessed(&self) -> bool {
        self.state != KeyState::Unused
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chip<'a> {
    pub name: &'a str,
    pub background: &'a str,
    pub foreground: &'a str,
    pub lost: bool,
}

pub struct Board<'a> {
    game: &'a Game,
    schedule: &'a Schedule,
    status: Status,
}

impl<'a> Board<'a> {
    pub fn new(game: &'a Game, schedule: &'a Schedule) -> Self {
        Self {
            game,
            schedule,
            status: game.status(),
        }
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn phase(&self) -> Phase {
        self.status.phase()
    }

    pub fn slots(&self) -> Vec<LetterSlot> {
        let over = self.status.is_over();
        self.game
            .word()
            .as_str()
            .chars()
            .map(|letter| {
                let guessed = self.game.is_guessed(letter);
                LetterSlot {
                    letter,
                    revealed: over || guessed,
                    missed: self.status.is_lost && !guessed,
                }
            })
            .collect()
    }

    pub fn keys(&self) -> Vec<Key> {
        let disabled = self.status.is_over();
        ALPHABET
            .chars()
            .map(|letter| {
                let state = match (self.game.is_guessed(letter), self.game.contains(letter)) {
                    (false, _) => KeyState::Unused,
                    (true, true) => KeyState::Correct,
                    (true, false) => KeyState::Wrong,
                };
                Key {
                    letter,
                    state,
                    disabled,
                }
            })
            .collect()
    }

    pub fn chips(&self) -> Vec<Chip<'a>> {
        self.schedule
            .penalties()
            .iter()
            .enumerate()
            .map(|(index, penalty)| Chip {
                name: &penalty.name,
                background: &penalty.background,
                foreground: &penalty.foreground,
                lost: index < self.status.wrong_count,
            })
            .collect()
    }

    /// Name of the chip crossed off by the latest guess, if that guess was
    /// wrong and the game is still going.
    pub fn just_lost_chip(&self) -> Option<&'a str> {
        if self.status.is_over() || !self.status.is_last_guess_wrong {
            return None;
        }
        self.schedule
            .get(self.status.wrong_count.checked_sub(1)?)
            .map(|p| p.name.as_str())
    }

    pub fn headline(&self) -> String {
        match self.phase() {
            Phase::InProgress => format!("You have {} attempts left...", self.status.remaining),
            Phase::Lost => "Game over!".to_string(),
            Phase::Won => "You win!".to_string(),
        }
    }

    pub fn subline(&self) -> Option<String> {
        match self.phase() {
            Phase::InProgress => None,
            Phase::Lost => Some(format!(
                "You lose! Better start learning {}",
                self.schedule.last().name
            )),
            Phase::Won => Some("Well done!".to_string()),
        }
    }

    pub fn intro(&self) -> String {
        format!(
            "Guess the word within {} attempts to keep the programming world safe from {}!",
            self.schedule.max_errors(),
            self.schedule.last().name
        )
    }

    /// Plain-text summary of the latest guess and the current word, for
    /// screen readers.
    pub fn announcement(&self) -> String {
        let guess = self.status.last_guess.map(|letter| {
            if self.game.contains(letter) {
                format!("Correct! The letter {letter} is in the word. ")
            } else {
                format!("Sorry, the letter {letter} is not in the word. ")
            }
        });

        let current = self
            .game
            .word()
            .as_str()
            .chars()
            .map(|letter| {
                if self.game.is_guessed(letter) {
                    format!("{letter}.")
                } else {
                    "blank.".to_string()
                }
            })
            .join(" ");

        format!(
            "{}You have {} attempts left. Current word: {}",
            guess.unwrap_or_default(),
            self.status.remaining,
            current
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::SecretWord;

    fn setup(word: &str, guesses: &str) -> (Game, Schedule) {
        let schedule = Schedule::embedded().unwrap();
        let mut game = Game::new(SecretWord::new(word).unwrap(), schedule.len());
        for c in guesses.chars() {
            game.guess_letter(c);
        }
        (game, schedule)
    }

    #[test]
    fn test_slots_hidden_until_guessed() {
        let (game, schedule) = setup("react", "ex");
        let board = Board::new(&game, &schedule);

        let revealed: Vec<bool> = board.slots().iter().map(|s| s.revealed).collect();
        assert_eq!(revealed, vec![false, true, false, false, false]);
        assert!(board.slots().iter().all(|s| !s.missed));
    }

    #[test]
    fn test_slots_all_revealed_and_missed_on_loss() {
        let (game, schedule) = setup("go", "gzqwxvbnm");
        let board = Board::new(&game, &schedule);
        assert_eq!(board.phase(), Phase::Lost);

        let slots = board.slots();
        assert!(slots.iter().all(|s| s.revealed));
        assert!(!slots[0].missed);
        assert!(slots[1].missed);
    }

    #[test]
    fn test_keys_reflect_guesses() {
        let (game, schedule) = setup("ts", "tz");
        let board = Board::new(&game, &schedule);
        let keys = board.keys();

        assert_eq!(keys.len(), 26);
        let key = |c: char| keys.iter().find(|k| k.letter == c).copied().unwrap();
        assert_eq!(key('t').state, KeyState::Correct);
        assert_eq!(key('z').state, KeyState::Wrong);
        assert_eq!(key('a').state, KeyState::Unused);
        assert!(key('z').already_guessed());
        assert!(!key('a').already_guessed());
        assert!(keys.iter().all(|k| !k.disabled));
    }

    #[test]
    fn test_keys_disabled_when_over() {
        let (game, schedule) = setup("ts", "ts");
        let board = Board::new(&game, &schedule);
        assert!(board.keys().iter().all(|k| k.disabled));
    }

    #[test]
    fn test_chips_crossed_off_in_order() {
        let (game, schedule) = setup("go", "zq");
        let board = Board::new(&game, &schedule);
        let chips = board.chips();

        assert_eq!(chips.len(), 9);
        assert!(chips[0].lost && chips[1].lost);
        assert!(chips[2..].iter().all(|c| !c.lost));
        assert_eq!(chips[0].name, "HTML");
    }

    #[test]
    fn test_just_lost_chip() {
        let (game, schedule) = setup("go", "zq");
        assert_eq!(Board::new(&game, &schedule).just_lost_chip(), Some("CSS"));

        let (game, schedule) = setup("go", "zg");
        assert_eq!(Board::new(&game, &schedule).just_lost_chip(), None);

        let (game, schedule) = setup("go", "");
        assert_eq!(Board::new(&game, &schedule).just_lost_chip(), None);
    }

    #[test]
    fn test_headlines() {
        let (game, schedule) = setup("go", "z");
        let board = Board::new(&game, &schedule);
        assert_eq!(board.headline(), "You have 7 attempts left...");
        assert_eq!(board.subline(), None);

        let (game, schedule) = setup("go", "go");
        let board = Board::new(&game, &schedule);
        assert_eq!(board.headline(), "You win!");
        assert_eq!(board.subline().as_deref(), Some("Well done!"));

        let (game, schedule) = setup("go", "zqwxvbnm");
        let board = Board::new(&game, &schedule);
        assert_eq!(board.headline(), "Game over!");
        assert_eq!(
            board.subline().as_deref(),
            Some("You lose! Better start learning Assembly")
        );
    }

    #[test]
    fn test_intro_uses_schedule() {
        let (game, schedule) = setup("go", "");
        assert_eq!(
            Board::new(&game, &schedule).intro(),
            "Guess the word within 8 attempts to keep the programming world safe from Assembly!"
        );
    }

    #[test]
    fn test_announcement_before_any_guess() {
        let (game, schedule) = setup("go", "");
        assert_eq!(
            Board::new(&game, &schedule).announcement(),
            "You have 8 attempts left. Current word: blank. blank."
        );
    }

    #[test]
    fn test_announcement_after_guesses() {
        let (game, schedule) = setup("ts", "t");
        assert_eq!(
            Board::new(&game, &schedule).announcement(),
            "Correct! The letter t is in the word. You have 8 attempts left. Current word: t. blank."
        );

        let (game, schedule) = setup("ts", "tz");
        assert_eq!(
            Board::new(&game, &schedule).announcement(),
            "Sorry, the letter z is not in the word. You have 7 attempts left. Current word: t. blank."
        );
    }
}
