use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use endgame::{
    app::App,
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    error::EndgameError,
    logging,
    runtime::{CrosstermEventSource, EventSource, FixedTicker, GameEvent, Runner, Ticker},
    word_source::{FixedWordSource, RandomWordSource, Schedule, WordList, WordSource},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
};
use tracing::info;

/// guess the word before Assembly takes over the programming world
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A terminal word-guessing game. Every wrong letter crosses off another programming language; lose them all and you are stuck with Assembly."
)]
pub struct Cli {
    /// play this word instead of a random one
    #[clap(short = 'w', long, conflicts_with_all = ["seed", "words_file"])]
    word: Option<String>,

    /// json word list to draw from, shaped like {"name": "...", "words": ["..."]}
    #[clap(long)]
    words_file: Option<PathBuf>,

    /// seed the word picker for a repeatable sequence of words
    #[clap(long)]
    seed: Option<u64>,

    /// skip the confetti when you win
    #[clap(long)]
    no_celebration: bool,

    /// where to write logs (defaults to the local state directory)
    #[clap(long)]
    log_file: Option<PathBuf>,

    /// log debug output
    #[clap(short = 'v', long)]
    verbose: bool,

    /// remember --words-file and --no-celebration as defaults
    #[clap(long)]
    save_config: bool,
}

impl Cli {
    /// Command line flags take precedence over the stored config.
    fn merge(&self, stored: Config) -> Config {
        Config {
            words_file: self.words_file.clone().or(stored.words_file),
            celebrate: stored.celebrate && !self.no_celebration,
            tick_rate_ms: stored.tick_rate_ms,
        }
    }

    fn word_source(&self, config: &Config) -> Result<Box<dyn WordSource>, EndgameError> {
        if let Some(word) = &self.word {
            return Ok(Box::new(FixedWordSource::new([word])?));
        }

        let words = match &config.words_file {
            Some(path) => WordList::from_path(path)?,
            None => WordList::embedded()?,
        };
        let schedule = Schedule::embedded()?;

        Ok(match self.seed {
            Some(seed) => Box::new(RandomWordSource::seeded(words, schedule, seed)),
            None => Box::new(RandomWordSource::from_entropy(words, schedule)),
        })
    }

    fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "warn"
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Redraw,
    Quit,
}

fn handle_key(app: &mut App, key: KeyEvent) -> Flow {
    match key.code {
        KeyCode::Esc => Flow::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Flow::Quit,
        KeyCode::Enter => {
            if app.new_game() {
                Flow::Redraw
            } else {
                Flow::Continue
            }
        }
        KeyCode::Char(c) if key.modifiers.difference(KeyModifiers::SHIFT).is_empty() => {
            if app.press(c.to_ascii_lowercase()) {
                Flow::Redraw
            } else {
                Flow::Continue
            }
        }
        _ => Flow::Continue,
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Some(path) = cli.log_file.clone().or_else(AppDirs::log_path) {
        if let Err(err) = logging::init(&path, cli.log_level()) {
            eprintln!("endgame: logging disabled ({}): {err}", path.display());
        }
    }

    let store = FileConfigStore::new();
    let config = cli.merge(store.load());
    if cli.save_config {
        store.save(&config)?;
        info!(path = %store.path().display(), "saved config");
    }

    let mut app = App::new(cli.word_source(&config)?, config.celebrate);
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(config.tick_rate()),
    );

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app, &runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend, E: EventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E, T>,
) -> Result<(), Box<dyn Error>> {
    let dt = runner.tick_interval().as_secs_f64();

    let size = terminal.size().unwrap_or_default();
    app.set_viewport(size.width, size.height);
    terminal.draw(|f| ui(app, f))?;

    loop {
        match runner.step() {
            GameEvent::Tick => {
                if app.confetti.is_active {
                    app.on_tick(dt);
                    terminal.draw(|f| ui(app, f))?;
                }
            }
            GameEvent::Resize => {
                let size = terminal.size().unwrap_or_default();
                app.set_viewport(size.width, size.height);
                terminal.draw(|f| ui(app, f))?;
            }
            GameEvent::Key(key) => match handle_key(app, key) {
                Flow::Quit => break,
                Flow::Redraw => {
                    terminal.draw(|f| ui(app, f))?;
                }
                Flow::Continue => {}
            },
        }
    }

    Ok(())
}

fn ui(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}
