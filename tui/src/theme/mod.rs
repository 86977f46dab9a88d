//! Theme and Colors
//!
//! The BotMatata hero palette. The landing page is light, so bubbles keep
//! their own background and foreground instead of inheriting the
//! terminal's.

use ratatui::style::{Color, Modifier, Style};

// ============================================================================
// Brand
// ============================================================================

/// "BotMatata" wordmark green
pub const BRAND_GREEN: Color = Color::Rgb(0, 199, 116);

/// Headline ink (indigo-950)
pub const HEADLINE_INDIGO: Color = Color::Rgb(30, 27, 75);

/// Body copy (gray-800)
pub const BODY_GRAY: Color = Color::Rgb(31, 41, 55);

/// Page background
pub const PAGE_WHITE: Color = Color::Rgb(255, 255, 255);

// ============================================================================
// Chat Widget
// ============================================================================

/// Bot avatar and send button (emerald-500)
pub const EMERALD: Color = Color::Rgb(16, 185, 129);

/// Header avatar (gray-500)
pub const AVATAR_GRAY: Color = Color::Rgb(107, 114, 128);

/// User avatar background (gray-200)
pub const AVATAR_LIGHT: Color = Color::Rgb(229, 231, 235);

/// "Online" status (green-500)
pub const ONLINE_GREEN: Color = Color::Rgb(34, 197, 94);

/// Bot bubble (gray-100)
pub const BOT_BUBBLE: Color = Color::Rgb(243, 244, 246);

/// User bubble (green-100)
pub const USER_BUBBLE: Color = Color::Rgb(220, 252, 231);

/// Bubble text (gray-800)
pub const BUBBLE_TEXT: Color = BODY_GRAY;

/// Typing dots (gray-400)
pub const TYPING_DOT: Color = Color::Rgb(156, 163, 175);

/// Hairline borders (gray-100/200)
pub const BORDER_GRAY: Color = Color::Rgb(229, 231, 235);

/// Faded bubble text, close to the page background
pub const FADED_TEXT: Color = Color::Rgb(209, 213, 219);

/// Placeholder text in the disabled input
pub const PLACEHOLDER_GRAY: Color = TYPING_DOT;

// ============================================================================
// Styles
// ============================================================================

/// Base style for the whole page
#[must_use]
pub fn page() -> Style {
    Style::default().bg(PAGE_WHITE).fg(BODY_GRAY)
}

/// Bubble body for a settled message
#[must_use]
pub fn bubble(background: Color) -> Style {
    Style::default().bg(background).fg(BUBBLE_TEXT)
}

/// Bubble body for a message that just arrived
#[must_use]
pub fn bubble_entering(background: Color) -> Style {
    bubble(background).add_modifier(Modifier::BOLD)
}

/// Bubble body while the conversation fades out
#[must_use]
pub fn bubble_fading() -> Style {
    Style::default()
        .bg(PAGE_WHITE)
        .fg(FADED_TEXT)
        .add_modifier(Modifier::DIM)
}
