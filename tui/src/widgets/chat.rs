//! Chat Widget
//!
//! The mock customer-support window from the hero section:
//!
//! ```text
//! ╭──────────────────────────────╮
//! │ C  Customer                  │
//! │    Online                    │
//! │──────────────────────────────│
//! │ B  Hi! How can I assist ...  │
//! │                              │
//! │     I need help with ...  C  │
//! │                              │
//! │ B  . • .                     │
//! │──────────────────────────────│
//! │ Type your message...     ➜   │
//! ╰──────────────────────────────╯
//! ```
//!
//! Bot bubbles hug the left edge, user bubbles the right. The newest
//! messages stay in view when the conversation outgrows the window.

use std::time::Duration;

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Widget};
use unicode_width::UnicodeWidthStr;

use botmatata_core::{AnimatorSnapshot, DisplayMessage, Speaker};

use crate::theme::{self, AVATAR_GRAY, AVATAR_LIGHT, BORDER_GRAY, BOT_BUBBLE, EMERALD};
use crate::theme::{FADED_TEXT, ONLINE_GREEN, PAGE_WHITE, PLACEHOLDER_GRAY, USER_BUBBLE};
use crate::widgets::typing;

/// Header: name, status, separator
const HEADER_HEIGHT: u16 = 3;

/// Input: separator, field
const INPUT_HEIGHT: u16 = 2;

/// Narrowest bubble text column
const MIN_BUBBLE_WIDTH: usize = 8;

/// Placeholder shown in the disabled input
pub const INPUT_PLACEHOLDER: &str = "Type your message...";

/// Renders one [`AnimatorSnapshot`] as the chat window
pub struct ChatWidget<'a> {
    snapshot: &'a AnimatorSnapshot,
    typing_elapsed: Duration,
}

impl<'a> ChatWidget<'a> {
    /// Chat window for `snapshot`
    #[must_use]
    pub fn new(snapshot: &'a AnimatorSnapshot) -> Self {
        Self {
            snapshot,
            typing_elapsed: Duration::ZERO,
        }
    }

    /// Time since the typing indicator appeared, drives the dot bounce
    #[must_use]
    pub fn typing_elapsed(mut self, elapsed: Duration) -> Self {
        self.typing_elapsed = elapsed;
        self
    }

    /// Every transcript row for a window `width` columns wide
    #[must_use]
    pub fn transcript(&self, width: u16) -> Vec<Line<'static>> {
        let bubble_width = bubble_text_width(width);
        let mut lines = Vec::new();

        for message in &self.snapshot.displayed {
            if !lines.is_empty() {
                lines.push(Line::default());
            }
            lines.extend(message_lines(message, bubble_width));
        }

        if let Some(speaker) = self.snapshot.typing_speaker {
            if !lines.is_empty() {
                lines.push(Line::default());
            }
            lines.push(typing_line(speaker, self.typing_elapsed));
        }

        lines
    }
}

impl Widget for ChatWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(BORDER_GRAY))
            .style(theme::page());
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height < HEADER_HEIGHT + INPUT_HEIGHT + 1 || inner.width < 12 {
            return;
        }

        let [header, body, input] = Layout::vertical([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(1),
            Constraint::Length(INPUT_HEIGHT),
        ])
        .areas(inner);

        render_header(header, buf);
        self.render_transcript(body, buf);
        render_input(input, buf);
    }
}

impl ChatWidget<'_> {
    fn render_transcript(&self, area: Rect, buf: &mut Buffer) {
        let lines = self.transcript(area.width);
        let overflow = lines.len().saturating_sub(usize::from(area.height));
        let scroll = u16::try_from(overflow).unwrap_or(u16::MAX);

        Paragraph::new(lines)
            .style(theme::page())
            .scroll((scroll, 0))
            .render(area, buf);
    }
}

// ============================================================================
// Pieces
// ============================================================================

fn render_header(area: Rect, buf: &mut Buffer) {
    let name = Line::from(vec![
        Span::styled(
            " C ",
            Style::default()
                .bg(AVATAR_GRAY)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled("Customer", Style::default().add_modifier(Modifier::BOLD)),
    ]);
    let status = Line::from(vec![
        Span::raw("    "),
        Span::styled("Online", Style::default().fg(ONLINE_GREEN)),
    ]);
    let rule = Line::styled(
        "─".repeat(usize::from(area.width)),
        Style::default().fg(BORDER_GRAY),
    );

    Paragraph::new(vec![name, status, rule])
        .style(theme::page())
        .render(area, buf);
}

fn render_input(area: Rect, buf: &mut Buffer) {
    let rule = Line::styled(
        "─".repeat(usize::from(area.width)),
        Style::default().fg(BORDER_GRAY),
    );

    let button = " ➜ ";
    let field_width = usize::from(area.width).saturating_sub(button.width() + 1);
    let field = Line::from(vec![
        Span::styled(
            pad_to_width(INPUT_PLACEHOLDER, field_width),
            Style::default().fg(PLACEHOLDER_GRAY),
        ),
        Span::raw(" "),
        Span::styled(button, Style::default().bg(EMERALD).fg(Color::White)),
    ]);

    Paragraph::new(vec![rule, field])
        .style(theme::page())
        .render(area, buf);
}

fn avatar(speaker: Speaker, fading: bool) -> Span<'static> {
    let style = if fading {
        Style::default().bg(PAGE_WHITE).fg(FADED_TEXT)
    } else {
        match speaker {
            Speaker::Bot => Style::default().bg(EMERALD).fg(Color::White),
            Speaker::User => Style::default().bg(AVATAR_LIGHT).fg(AVATAR_GRAY),
        }
    };
    Span::styled(format!(" {} ", speaker.avatar()), style)
}

fn bubble_background(speaker: Speaker) -> Color {
    match speaker {
        Speaker::Bot => BOT_BUBBLE,
        Speaker::User => USER_BUBBLE,
    }
}

fn message_lines(message: &DisplayMessage, bubble_width: usize) -> Vec<Line<'static>> {
    let background = bubble_background(message.speaker);
    let style = if message.is_fading {
        theme::bubble_fading()
    } else if message.is_entering {
        theme::bubble_entering(background)
    } else {
        theme::bubble(background)
    };

    let rows = wrap_bubble(&message.text, bubble_width);
    let column = rows.iter().map(|r| r.width()).max().unwrap_or(0);

    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            let body = Span::styled(format!(" {} ", pad_to_width(row, column)), style);
            let lead = if i == 0 {
                avatar(message.speaker, message.is_fading)
            } else {
                Span::raw("   ")
            };
            bubble_row(message.speaker, lead, body)
        })
        .collect()
}

fn typing_line(speaker: Speaker, elapsed: Duration) -> Line<'static> {
    let body = Span::styled(
        format!(" {} ", typing::dots(elapsed)),
        Style::default()
            .bg(bubble_background(speaker))
            .fg(theme::TYPING_DOT),
    );
    bubble_row(speaker, avatar(speaker, false), body)
}

fn bubble_row(speaker: Speaker, lead: Span<'static>, body: Span<'static>) -> Line<'static> {
    match speaker {
        Speaker::Bot => Line::from(vec![lead, Span::raw(" "), body]),
        Speaker::User => Line::from(vec![body, Span::raw(" "), lead]).alignment(Alignment::Right),
    }
}

// ============================================================================
// Text helpers
// ============================================================================

/// Text column available to a bubble in a window `width` columns wide
///
/// Bubbles take at most three quarters of the window, less the avatar and
/// padding.
#[must_use]
pub fn bubble_text_width(width: u16) -> usize {
    let max_bubble = usize::from(width) * 3 / 4;
    max_bubble.saturating_sub(6).max(MIN_BUBBLE_WIDTH)
}

/// Wrap `text` into rows no wider than `width` display columns
#[must_use]
pub fn wrap_bubble(text: &str, width: usize) -> Vec<String> {
    if text.is_empty() {
        return vec![String::new()];
    }
    textwrap::wrap(text, width.max(1))
        .into_iter()
        .map(|row| row.into_owned())
        .collect()
}

/// Right-pad `text` with spaces to `width` display columns
#[must_use]
pub fn pad_to_width(text: &str, width: usize) -> String {
    let pad = width.saturating_sub(text.width());
    format!("{text}{}", " ".repeat(pad))
}
