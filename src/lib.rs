// Library surface for the binary, headless integration tests and reuse.
pub mod app;
pub mod app_dirs;
pub mod board;
pub mod celebration;
pub mod config;
pub mod error;
pub mod farewell;
pub mod game;
pub mod logging;
pub mod runtime;
pub mod ui;
pub mod word_source;

pub use app::App;
pub use error::EndgameError;
pub use game::{compute_status, Game, Phase, SecretWord, Status};
pub use word_source::{FixedWordSource, RandomWordSource, Schedule, WordList, WordSource};
