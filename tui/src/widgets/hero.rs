//! Hero Panel
//!
//! Headline, tagline and call to action from the landing page.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget, Wrap};

use crate::theme::{self, BODY_GRAY, BRAND_GREEN, HEADLINE_INDIGO};

/// First headline row
pub const HEADLINE: &str = "Smart AI Assistant,";

/// Second headline row
pub const HEADLINE_LEAD: &str = "Powered by";

/// Brand name, rendered in brand green
pub const BRAND: &str = "BotMatata";

/// Copy under the headline
pub const TAGLINE: &str = "Automate chats, engage customers, and grow your business effortlessly. \
     Let BotMatata handle the conversations while you focus on success";

/// Call-to-action label
pub const CALL_TO_ACTION: &str = "Start Free Trial →";

/// Left half of the hero section
#[derive(Default)]
pub struct HeroPanel;

impl HeroPanel {
    /// Rows of the panel, unwrapped
    #[must_use]
    pub fn lines() -> Vec<Line<'static>> {
        let headline = Style::default()
            .fg(HEADLINE_INDIGO)
            .add_modifier(Modifier::BOLD);

        vec![
            Line::styled(HEADLINE, headline),
            Line::styled(HEADLINE_LEAD, headline),
            Line::styled(
                BRAND,
                Style::default()
                    .fg(BRAND_GREEN)
                    .add_modifier(Modifier::BOLD),
            ),
            Line::default(),
            Line::styled(TAGLINE, Style::default().fg(BODY_GRAY)),
            Line::default(),
            Line::from(Span::styled(
                format!("  {CALL_TO_ACTION}  "),
                Style::default()
                    .bg(HEADLINE_INDIGO)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
        ]
    }
}

impl Widget for HeroPanel {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(Self::lines())
            .style(theme::page())
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}
