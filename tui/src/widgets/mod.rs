//! Widgets for the hero screen

pub mod chat;
pub mod hero;
pub mod typing;

pub use chat::ChatWidget;
pub use hero::HeroPanel;
