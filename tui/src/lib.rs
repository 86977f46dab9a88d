//! BotMatata TUI - The hero section in a terminal
//!
//! This crate mounts the headless chat animator from `botmatata-core` and
//! renders the landing page's hero: headline on one side, the animated
//! customer-support window on the other.
//!
//! # Architecture
//!
//! - **App**: Event loop, mount/unmount lifecycle, layout
//! - **Widgets**: Hero panel, chat window, typing dots
//! - **Theme**: BotMatata palette
//! - **Cli/Logging**: Flags, headless timeline output, log setup

pub mod app;
pub mod cli;
pub mod logging;
pub mod theme;
pub mod widgets;

pub use app::App;
pub use cli::Args;
