use rand::{rngs::StdRng, SeedableRng};
use tracing::info;

use crate::board::Board;
use crate::celebration::Confetti;
use crate::farewell::farewell_text;
use crate::game::{is_keyboard_letter, Game, Phase};
use crate::word_source::{Schedule, WordSource};

/// Everything one terminal session needs: the current game, where new words
/// come from, and the bits of presentation state that outlive a frame.
pub struct App {
    pub game: Game,
    source: Box<dyn WordSource>,
    pub confetti: Confetti,
    /// Send-off for the chip lost on the latest guess.
    pub farewell: Option<String>,
    pub celebrate: bool,
    rng: StdRng,
    viewport: (u16, u16),
}

impl App {
    pub fn new(source: Box<dyn WordSource>, celebrate: bool) -> Self {
        Self::with_rng(source, celebrate, StdRng::from_entropy())
    }

    pub fn with_rng(mut source: Box<dyn WordSource>, celebrate: bool, rng: StdRng) -> Self {
        Self {
            game: Game::start(source.as_mut()),
            source,
            confetti: Confetti::new(),
            farewell: None,
            celebrate,
            rng,
            viewport: (80, 24),
        }
    }

    pub fn schedule(&self) -> &Schedule {
        self.source.schedule()
    }

    pub fn board(&self) -> Board<'_> {
        Board::new(&self.game, self.source.schedule())
    }

    pub fn is_over(&self) -> bool {
        self.game.status().is_over()
    }

    /// Terminal size, used to place the confetti.
    pub fn set_viewport(&mut self, width: u16, height: u16) {
        self.viewport = (width, height);
    }

    /// A keyboard press. The keyboard is locked once the game is over and
    /// only knows `a` to `z`; returns whether the guess was recorded.
    pub fn press(&mut self, letter: char) -> bool {
        if !is_keyboard_letter(letter) || self.is_over() {
            return false;
        }
        if !self.game.guess_letter(letter) {
            return false;
        }

        let board = Board::new(&self.game, self.source.schedule());
        self.farewell = board
            .just_lost_chip()
            .map(|name| farewell_text(name, &mut self.rng));

        match board.phase() {
            Phase::Won => {
                info!(word = %self.game.word(), guesses = self.game.guessed().len(), "game won");
                if self.celebrate {
                    let (width, height) = self.viewport;
                    self.confetti.start(width, height, &mut self.rng);
                }
            }
            Phase::Lost => {
                info!(word = %self.game.word(), "game lost");
            }
            Phase::InProgress => {}
        }

        true
    }

    /// Start over with a new word. Only offered once the current game is
    /// over; returns whether a new game was started.
    pub fn new_game(&mut self) -> bool {
        if !self.is_over() {
            return false;
        }
        self.game.restart(self.source.as_mut());
        self.farewell = None;
        self.confetti.stop();
        true
    }

    pub fn on_tick(&mut self, dt: f64) {
        self.confetti.update(dt);
    }
}
