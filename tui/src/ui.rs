//! Screen rendering
//!
//! Declarative layout for the two screens: the connection-entry card and
//! the themed birthday screen. Everything here is a pure function of the
//! observable state; theme and age are re-derived on every draw.

use birthday_core::{calculate_age, BirthdayPayload, ConnectionStatus};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::theme::{palette_color, status_color, DIM_GRAY, ENTRY_ACCENT};

/// Background behind the connection card
const ENTRY_BACKGROUND: Color = Color::Rgb(0xF5, 0xF5, 0xF5);

/// Ink color on the connection card
const ENTRY_TEXT: Color = Color::Rgb(0x2C, 0x3E, 0x50);

/// Placeholder for the user-selectable photo
const PHOTO_CIRCLE: [&str; 5] = [
    "  .--\"\"--.  ",
    " /        \\ ",
    "|   [o]    |",
    " \\        / ",
    "  '--..--'  ",
];

/// Draw the connection-entry screen
pub fn draw_connection(
    frame: &mut Frame,
    address: &str,
    status: ConnectionStatus,
    hint: Option<&str>,
) {
    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(ENTRY_BACKGROUND)),
        area,
    );

    let card = centered_rect(area, 52, 12);
    frame.render_widget(Clear, card);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Baby Birthday ")
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(ENTRY_ACCENT).bg(Color::White));
    let inner = block.inner(card);
    frame.render_widget(block, card);

    let mut lines = vec![
        Line::raw(""),
        Line::styled(
            "Server address (host:port)",
            Style::default().fg(ENTRY_TEXT),
        ),
        Line::styled(
            format!("> {address}_"),
            Style::default().fg(ENTRY_TEXT).add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
        Line::styled(status_text(status), Style::default().fg(status_color(status))),
        Line::raw(""),
        Line::styled(
            "Enter connect / Tab suggestion / Esc quit",
            Style::default().fg(DIM_GRAY),
        ),
    ];
    if let Some(hint) = hint {
        lines.push(Line::styled(
            format!("next: {hint}"),
            Style::default().fg(DIM_GRAY),
        ));
    }

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

/// Draw the themed birthday screen for a payload
pub fn draw_birthday(frame: &mut Frame, payload: &BirthdayPayload) {
    let theme = payload.theme();
    let palette = theme.palette();
    let area = frame.area();

    frame.render_widget(
        Block::default().style(Style::default().bg(palette_color(palette.background))),
        area,
    );

    let age = calculate_age(payload.dob);
    let text = Style::default().fg(palette_color(palette.text));
    let primary = Style::default()
        .fg(palette_color(palette.primary))
        .add_modifier(Modifier::BOLD);
    let accent = Style::default().fg(palette_color(palette.accent));
    let border = Style::default().fg(palette_color(palette.circle_border));

    let mut lines: Vec<Line> = vec![
        Line::styled(
            format!("TODAY {} IS", payload.name.to_uppercase()),
            text.add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
        Line::styled("*--------------------*", accent),
    ];
    for row in big_number(age.value) {
        lines.push(Line::styled(row, primary));
    }
    lines.push(Line::styled("*--------------------*", accent));
    lines.push(Line::raw(""));
    lines.push(Line::styled(
        format!("{} OLD!", age.unit.to_uppercase()),
        text.add_modifier(Modifier::BOLD),
    ));
    lines.push(Line::raw(""));
    for row in PHOTO_CIRCLE {
        lines.push(Line::styled(row, border));
    }
    lines.push(Line::raw(""));
    lines.push(Line::styled(
        format!(
            "{} birthday / d disconnect / q quit",
            theme.identifier()
        ),
        Style::default().fg(DIM_GRAY),
    ));

    let height = u16::try_from(lines.len()).unwrap_or(area.height);
    let content = centered_rect(area, area.width, height);
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), content);
}

fn status_text(status: ConnectionStatus) -> &'static str {
    match status {
        ConnectionStatus::Connecting => "Connecting...",
        ConnectionStatus::Connected => "Connected - waiting for birthday data",
        ConnectionStatus::Disconnected => "Enter the server address and press Enter",
        ConnectionStatus::Failed => "Connection failed - check the address and try again",
    }
}

/// Banner digits, 5 rows tall
const DIGIT_ROWS: usize = 5;
const DIGITS: [[&str; DIGIT_ROWS]; 10] = [
    ["███", "█ █", "█ █", "█ █", "███"],
    ["  █", "  █", "  █", "  █", "  █"],
    ["███", "  █", "███", "█  ", "███"],
    ["███", "  █", "███", "  █", "███"],
    ["█ █", "█ █", "███", "  █", "  █"],
    ["███", "█  ", "███", "  █", "███"],
    ["███", "█  ", "███", "█ █", "███"],
    ["███", "  █", "  █", "  █", "  █"],
    ["███", "█ █", "███", "█ █", "███"],
    ["███", "█ █", "███", "  █", "███"],
];

/// Render a number as banner rows of block characters
#[must_use]
pub fn big_number(value: u32) -> Vec<String> {
    let digits: Vec<usize> = value
        .to_string()
        .bytes()
        .map(|b| usize::from(b - b'0'))
        .collect();

    (0..DIGIT_ROWS)
        .map(|row| {
            digits
                .iter()
                .map(|&d| DIGITS[d][row])
                .collect::<Vec<_>>()
                .join("  ")
        })
        .collect()
}

/// A rect of at most `width` x `height`, centered in `area`
fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
