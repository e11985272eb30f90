use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::{
    app::App,
    board::{Board, Chip, KeyState},
    celebration::Confetti,
    game::Phase,
};

const HORIZONTAL_MARGIN: u16 = 2;
const VERTICAL_MARGIN: u16 = 1;
const KEYS_PER_ROW: usize = 13;
const TITLE: &str = "Assembly: Endgame";

/// `#rrggbb` to a terminal colour.
pub fn parse_hex(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

fn chip_label(chip: &Chip) -> String {
    if chip.lost {
        format!(" ☠ {} ", chip.name)
    } else {
        format!(" {} ", chip.name)
    }
}

/// Rows needed to show every chip within `width` columns.
fn chip_rows(chips: &[Chip], width: u16) -> u16 {
    let total: usize = chips.iter().map(|c| chip_label(c).width() + 1).sum();
    let width = width.max(1) as usize;
    total.div_ceil(width).max(1) as u16
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let board = self.board();

        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let dim_style = Style::default().add_modifier(Modifier::DIM);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        let inner_width = area.width.saturating_sub(HORIZONTAL_MARGIN * 2);
        let chips = board.chips();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(2), // title + intro
                Constraint::Length(1),
                Constraint::Length(2), // status
                Constraint::Length(1),
                Constraint::Length(chip_rows(&chips, inner_width)),
                Constraint::Length(1),
                Constraint::Length(1), // word
                Constraint::Length(1),
                Constraint::Length(2), // keyboard
                Constraint::Length(1),
                Constraint::Length(2), // announcement
                Constraint::Min(0),
                Constraint::Length(1), // legend
            ])
            .split(area);

        Paragraph::new(vec![
            Line::from(Span::styled(TITLE, bold_style.fg(Color::Yellow))),
            Line::from(Span::styled(board.intro(), dim_style)),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(chunks[0], buf);

        render_status(self, &board, chunks[2], buf);

        let chip_spans: Vec<Span> = chips
            .iter()
            .flat_map(|chip| {
                let mut style = Style::default()
                    .bg(parse_hex(chip.background).unwrap_or(Color::DarkGray))
                    .fg(parse_hex(chip.foreground).unwrap_or(Color::White));
                if chip.lost {
                    style = style.add_modifier(Modifier::DIM | Modifier::CROSSED_OUT);
                }
                [Span::styled(chip_label(chip), style), Span::raw(" ")]
            })
            .collect();
        Paragraph::new(Line::from(chip_spans))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(chunks[4], buf);

        let slot_spans: Vec<Span> = board
            .slots()
            .iter()
            .map(|slot| {
                let text = if slot.revealed {
                    format!(" {} ", slot.letter.to_ascii_uppercase())
                } else {
                    " _ ".to_string()
                };
                let style = if slot.missed {
                    bold_style.fg(Color::Red)
                } else {
                    bold_style.add_modifier(Modifier::UNDERLINED)
                };
                Span::styled(text, style)
            })
            .collect();
        Paragraph::new(Line::from(slot_spans))
            .alignment(Alignment::Center)
            .render(chunks[6], buf);

        let keys = board.keys();
        let key_lines: Vec<Line> = keys
            .chunks(KEYS_PER_ROW)
            .map(|row| {
                Line::from(
                    row.iter()
                        .map(|key| {
                            let style = match key.state {
                                KeyState::Correct => bold_style.fg(Color::Black).bg(Color::Green),
                                KeyState::Wrong => bold_style.fg(Color::White).bg(Color::Red),
                                KeyState::Unused if key.disabled => dim_style,
                                KeyState::Unused => bold_style.fg(Color::Black).bg(Color::Yellow),
                            };
                            Span::styled(format!(" {} ", key.letter.to_ascii_uppercase()), style)
                        })
                        .flat_map(|span| [span, Span::raw(" ")])
                        .collect::<Vec<_>>(),
                )
            })
            .collect();
        Paragraph::new(key_lines)
            .alignment(Alignment::Center)
            .render(chunks[8], buf);

        Paragraph::new(Span::styled(board.announcement(), dim_style.patch(italic_style)))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(chunks[10], buf);

        let legend = if board.status().is_over() {
            "(enter) new game / (esc)ape"
        } else {
            "(a-z) guess / (esc)ape"
        };
        Paragraph::new(Span::styled(legend, italic_style))
            .alignment(Alignment::Center)
            .render(chunks[12], buf);

        if self.confetti.is_active {
            render_confetti(&self.confetti, area, buf);
        }
    }
}

fn render_status(app: &App, board: &Board, area: Rect, buf: &mut Buffer) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);

    let lines = match board.phase() {
        Phase::InProgress => {
            let mut lines = Vec::with_capacity(2);
            if let Some(farewell) = &app.farewell {
                lines.push(Line::from(Span::styled(
                    farewell.clone(),
                    bold_style.fg(Color::Magenta).add_modifier(Modifier::ITALIC),
                )));
            }
            lines.push(Line::from(board.headline()));
            lines
        }
        Phase::Won => vec![
            Line::from(Span::styled(board.headline(), bold_style.fg(Color::Green))),
            Line::from(board.subline().unwrap_or_default()),
        ],
        Phase::Lost => vec![
            Line::from(Span::styled(board.headline(), bold_style.fg(Color::Red))),
            Line::from(board.subline().unwrap_or_default()),
        ],
    };

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .render(area, buf);
}

fn render_confetti(confetti: &Confetti, area: Rect, buf: &mut Buffer) {
    let colors = [
        Color::Yellow,
        Color::Magenta,
        Color::Cyan,
        Color::Green,
        Color::Red,
        Color::Blue,
        Color::LightYellow,
    ];

    // banner letters drawn last so confetti never covers them
    let (letters, bits): (Vec<_>, Vec<_>) = confetti.particles.iter().partition(|p| p.is_letter());

    for particle in bits.into_iter().chain(letters) {
        if particle.x < 0.0 || particle.y < 0.0 {
            continue;
        }
        let (x, y) = (particle.x as u16, particle.y as u16);
        if x >= area.width || y >= area.height {
            continue;
        }

        let color = colors[particle.color_index % colors.len()];
        let style = if particle.is_letter() {
            Style::default().fg(color).add_modifier(Modifier::BOLD)
        } else if particle.age / particle.max_age < 0.6 {
            Style::default().fg(color)
        } else {
            Style::default().fg(color).add_modifier(Modifier::DIM)
        };

        if let Some(cell) = buf.cell_mut((area.x + x, area.y + y)) {
            cell.set_symbol(&particle.symbol.to_string());
            cell.set_style(style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::word_source::FixedWordSource;
    use rand::{rngs::StdRng, SeedableRng};

    fn create_test_app(word: &str, celebrate: bool) -> App {
        let source = FixedWordSource::new([word]).unwrap();
        App::with_rng(Box::new(source), celebrate, StdRng::seed_from_u64(3))
    }

    fn render(app: &App) -> (Buffer, String) {
        let area = Rect::new(0, 0, 100, 30);
        let mut buf = Buffer::empty(area);
        app.render(area, &mut buf);
        let text = buf
            .content
            .chunks(area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n");
        (buf, text)
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("#E2680F"), Some(Color::Rgb(0xe2, 0x68, 0x0f)));
        assert_eq!(parse_hex("#f9f4da"), Some(Color::Rgb(0xf9, 0xf4, 0xda)));
        assert_eq!(parse_hex("E2680F"), None);
        assert_eq!(parse_hex("#E268"), None);
        assert_eq!(parse_hex("#GG680F"), None);
    }

    #[test]
    fn test_chip_rows() {
        let chip = Chip {
            name: "Python",
            background: "#000000",
            foreground: "#ffffff",
            lost: false,
        };
        // " Python " plus a gap is 9 columns
        assert_eq!(chip_rows(&[chip.clone(), chip.clone()], 100), 1);
        assert_eq!(chip_rows(&[chip.clone(), chip.clone()], 10), 2);
        assert_eq!(chip_rows(&[], 10), 1);
    }

    #[test]
    fn test_render_fresh_game() {
        let app = create_test_app("react", true);
        let (_, text) = render(&app);

        assert!(text.contains(TITLE));
        assert!(text.contains("You have 8 attempts left..."));
        assert!(text.contains("HTML"));
        assert!(text.contains("Assembly"));
        assert!(text.contains(" A "));
        assert!(text.contains(" Z "));
        assert!(text.contains("(a-z) guess"));
        assert!(!text.contains("REACT"));
    }

    #[test]
    fn test_render_reveals_guessed_letters_and_farewell() {
        let mut app = create_test_app("react", true);
        app.press('r');
        app.press('z');
        let (_, text) = render(&app);

        assert!(text.contains(" R "));
        assert!(text.contains("You have 7 attempts left..."));
        assert!(text.contains("☠ HTML"));
        assert!(text.contains(app.farewell.as_deref().unwrap()));
        assert!(text.contains("Sorry, the letter z is not in the word."));
    }

    #[test]
    fn test_render_lost_game_reveals_word() {
        let mut app = create_test_app("go", true);
        for c in "zqwxvbnm".chars() {
            app.press(c);
        }
        let (buf, text) = render(&app);

        assert!(text.contains("Game over!"));
        assert!(text.contains("You lose! Better start learning Assembly"));
        assert!(text.contains("(enter) new game"));
        assert!(text.contains(" G  O "));

        // the never-guessed 'o' is the only red capital O on screen
        assert!(buf
            .content
            .iter()
            .any(|c| c.symbol() == "O" && c.fg == Color::Red));
    }

    #[test]
    fn test_render_won_game() {
        let mut app = create_test_app("go", false);
        app.press('g');
        app.press('o');
        let (_, text) = render(&app);

        assert!(text.contains("You win!"));
        assert!(text.contains("Well done!"));
    }

    #[test]
    fn test_render_confetti_on_win() {
        let mut app = create_test_app("go", true);
        app.set_viewport(100, 30);
        app.press('g');
        app.press('o');
        // let the banner letters settle
        for _ in 0..15 {
            app.on_tick(0.1);
        }
        let (buf, _) = render(&app);

        assert!(app.confetti.is_active);
        let letters: Vec<_> = app.confetti.particles.iter().filter(|p| p.is_letter()).collect();
        assert_eq!(letters.len(), 7);
        for p in letters {
            let cell = buf.cell((p.x as u16, p.y as u16)).unwrap();
            assert_eq!(cell.symbol(), p.symbol.to_string());
        }
    }

    #[test]
    fn test_render_tiny_area_does_not_panic() {
        let app = create_test_app("react", true);
        let area = Rect::new(0, 0, 10, 5);
        let mut buf = Buffer::empty(area);
        app.render(area, &mut buf);
    }
}
