use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use endgame::runtime::{ChannelEventSource, FixedTicker, GameEvent, Runner};
use endgame::{App, FixedWordSource, Phase};
use rand::{rngs::StdRng, SeedableRng};

fn app(words: &[&str]) -> App {
    let source = FixedWordSource::new(words.iter().copied()).unwrap();
    App::with_rng(Box::new(source), true, StdRng::seed_from_u64(17))
}

fn send_word(tx: &mpsc::Sender<GameEvent>, letters: &str) {
    for c in letters.chars() {
        tx.send(GameEvent::Key(KeyEvent::new(
            KeyCode::Char(c),
            KeyModifiers::NONE,
        )))
        .unwrap();
    }
}

/// Drive a bounded event loop the way the binary does, without a TTY.
fn drive(app: &mut App, runner: &Runner<ChannelEventSource, FixedTicker>, steps: u32) {
    let dt = runner.tick_interval().as_secs_f64();
    for _ in 0..steps {
        match runner.step() {
            GameEvent::Tick => app.on_tick(dt),
            GameEvent::Resize => {}
            GameEvent::Key(key) => match key.code {
                KeyCode::Char(c) => {
                    app.press(c);
                }
                KeyCode::Enter => {
                    app.new_game();
                }
                _ => {}
            },
        }
    }
}

#[test]
fn headless_win_flow() {
    let mut app = app(&["react"]);
    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(
        ChannelEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(5)),
    );

    send_word(&tx, "tcaer");
    drive(&mut app, &runner, 5);

    let status = app.game.status();
    assert_eq!(status.phase(), Phase::Won);
    assert_eq!(status.wrong_count, 0);
    assert_eq!(status.remaining, 8);
    assert!(app.confetti.is_active);
}

#[test]
fn headless_loss_locks_keyboard_until_new_game() {
    let mut app = app(&["go", "ts"]);
    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(
        ChannelEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(5)),
    );

    send_word(&tx, "zqwxvbnm");
    drive(&mut app, &runner, 8);
    assert_eq!(app.game.status().phase(), Phase::Lost);

    // keyboard is locked; this guess never lands
    send_word(&tx, "g");
    drive(&mut app, &runner, 1);
    assert!(!app.game.is_guessed('g'));

    tx.send(GameEvent::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)))
        .unwrap();
    drive(&mut app, &runner, 1);

    assert_eq!(app.game.word().as_str(), "ts");
    assert!(app.game.guessed().is_empty());
    assert_eq!(app.game.status().phase(), Phase::InProgress);
}

#[test]
fn headless_confetti_burns_out_on_ticks() {
    let mut app = app(&["go"]);
    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(
        ChannelEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(1)),
    );

    send_word(&tx, "go");
    drive(&mut app, &runner, 2);
    assert!(app.confetti.is_active);

    // 1ms ticks advance the animation by 1ms each
    drive(&mut app, &runner, 3100);
    assert!(!app.confetti.is_active);
}
