use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::difficulty::Difficulty;
use crate::game::{Game, Outcome, Phase};
use crate::App;

const HORIZONTAL_MARGIN: u16 = 5;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let game = &self.game;
        match game.phase() {
            Phase::Start => render_start(game, area, buf),
            Phase::Memorize => render_memorize(game, area, buf),
            Phase::Recall => render_recall(game, area, buf),
            Phase::Complete => render_complete(game, area, buf),
        }
    }
}

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn dim() -> Style {
    Style::default().add_modifier(Modifier::DIM)
}

fn hint() -> Style {
    Style::default()
        .add_modifier(Modifier::DIM)
        .add_modifier(Modifier::ITALIC)
}

/// Vertically centers `content_lines` worth of text within `area`
fn centered_chunk(area: Rect, content_lines: u16) -> Rect {
    let top = area.height.saturating_sub(content_lines) / 2;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([Constraint::Length(top), Constraint::Min(content_lines)])
        .split(area);

    chunks[1]
}

fn render_lines(lines: Vec<Line>, area: Rect, buf: &mut Buffer) {
    let content_lines = lines.len() as u16;
    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    widget.render(centered_chunk(area, content_lines), buf);
}

fn render_start(game: &Game, area: Rect, buf: &mut Buffer) {
    let selector = Difficulty::ALL
        .iter()
        .map(|d| {
            let label = format!("{} ({} words / {}s)", d, d.word_count(), d.memorize_secs());
            if *d == game.difficulty() {
                Span::styled(label, bold().fg(Color::Magenta))
            } else {
                Span::styled(label, dim())
            }
        })
        .flat_map(|span| [Span::raw("  "), span])
        .skip(1)
        .collect::<Vec<Span>>();

    let lines = vec![
        Line::from(Span::styled("remem", bold())),
        Line::default(),
        Line::from(Span::styled(
            "memorize the words shown, then recall them in order",
            dim(),
        )),
        Line::default(),
        Line::from(selector),
        Line::default(),
        Line::from(Span::styled(
            "(←/→) difficulty   (enter) start   (esc) quit",
            hint(),
        )),
    ];

    render_lines(lines, area, buf);
}

fn render_memorize(game: &Game, area: Rect, buf: &mut Buffer) {
    let mut lines = vec![
        Line::from(Span::styled(
            format!("{}s", game.seconds_remaining()),
            bold().fg(Color::Yellow),
        )),
        Line::default(),
        Line::from(Span::styled("memorize these words", bold())),
        Line::default(),
    ];

    for word in game.words() {
        lines.push(Line::from(Span::styled(word.text.clone(), bold())));
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled("(esc) exit", hint())));

    render_lines(lines, area, buf);
}

fn render_recall(game: &Game, area: Rect, buf: &mut Buffer) {
    let lines = vec![
        Line::from(Span::styled(
            format!("word {} of {}", game.current_index() + 1, game.words().len()),
            dim(),
        )),
        Line::default(),
        Line::from(Span::styled(
            format!("enter word #{}", game.current_index() + 1),
            bold(),
        )),
        Line::default(),
        Line::from(vec![
            Span::styled(game.input().to_string(), bold()),
            Span::styled("█", dim()),
        ]),
        Line::default(),
        Line::from(Span::styled("(enter) submit   (esc) exit", hint())),
    ];

    render_lines(lines, area, buf);
}

fn render_complete(game: &Game, area: Rect, buf: &mut Buffer) {
    let headline = if game.is_perfect() {
        Span::styled("perfect recall!", bold().fg(Color::Magenta))
    } else {
        Span::styled("game complete", bold())
    };

    let mut lines = vec![
        Line::from(headline),
        Line::default(),
        Line::from(Span::styled(
            format!(
                "you recalled {} out of {} words correctly",
                game.score(),
                game.words().len()
            ),
            dim(),
        )),
        Line::default(),
    ];

    let column = game
        .words()
        .iter()
        .map(|w| w.text.width())
        .max()
        .unwrap_or(0);

    for (word, outcome) in game.words().iter().zip(game.outcomes()) {
        let padding = " ".repeat(column - word.text.width());
        let marker = match outcome {
            Outcome::Correct => Span::styled("✓", bold().fg(Color::Green)),
            Outcome::Incorrect => Span::styled("✗", bold().fg(Color::Red)),
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{}{} ", word.text, padding), bold()),
            marker,
        ]));
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "(enter) play again   (esc) quit",
        hint(),
    )));

    render_lines(lines, area, buf);
}
