//! BotMatata Core - Headless Chat Sequence Animator
//!
//! This crate provides the scripted chat animation shown in the BotMatata
//! hero widget, completely independent of any UI framework. A surface
//! mounts a [`ChatAnimator`], renders the [`AnimatorSnapshot`]s it
//! publishes, and stops it on unmount.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        UI Surfaces                           │
//! │      ┌─────────────┐      ┌──────────────────────────┐       │
//! │      │ TUI (hero)  │      │ Headless (--timeline)    │       │
//! │      └──────┬──────┘      └────────────┬─────────────┘       │
//! │             │ start()/stop()           │ record()            │
//! │             │ AnimatorSnapshot (watch) │ TimelineEntry       │
//! └─────────────┼──────────────────────────┼─────────────────────┘
//!               │                          │
//! ┌─────────────┼──────────────────────────┼─────────────────────┐
//! │             ▼        BOTMATATA CORE    ▼                     │
//! │     ┌──────────────┐            ┌────────────┐               │
//! │     │ ChatAnimator │            │  Timeline  │               │
//! │     │ (tokio+bag)  │            │ (virtual)  │               │
//! │     └──────┬───────┘            └─────┬──────┘               │
//! │            └──────────┬───────────────┘                      │
//! │                 ┌─────▼─────┐                                │
//! │                 │ Sequencer │ ◀── Script + TimingConfig      │
//! │                 └───────────┘                                │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```no_run
//! use botmatata_core::ChatAnimator;
//!
//! #[tokio::main]
//! async fn main() {
//!     let animator = ChatAnimator::botmatata();
//!     animator.start().unwrap();
//!
//!     let mut updates = animator.subscribe();
//!     while updates.changed().await.is_ok() {
//!         let snapshot = updates.borrow().clone();
//!         println!("{} messages, typing: {:?}", snapshot.displayed.len(), snapshot.typing_speaker);
//!     }
//! }
//! ```
//!
//! # Module Overview
//!
//! - [`script`]: Scripted conversation and speakers
//! - [`timing`]: Choreography delays and the typing-duration formula
//! - [`state`]: Animator state, display messages, published snapshots
//! - [`sequencer`]: Pure state machine, no clock
//! - [`timers`]: Cancellable collection of scheduled work
//! - [`animator`]: tokio driver with start/stop lifecycle
//! - [`timeline`]: Virtual-clock recording of whole cycles
//! - [`config`]: TOML/env/CLI configuration
//!
//! # No TUI Dependencies
//!
//! This crate has **zero** dependencies on ratatui, crossterm, or any other
//! UI framework.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod animator;
pub mod config;
pub mod script;
pub mod sequencer;
pub mod state;
pub mod timeline;
pub mod timers;
pub mod timing;

// Re-exports for convenience
pub use animator::{AnimatorError, ChatAnimator};
pub use config::{
    default_config_path, load_config, load_config_with_env, ConfigError, ConfigOverrides,
    ConfigSource, HeroConfig, HeroToml,
};
pub use script::{Script, ScriptError, ScriptedMessage, Speaker};
pub use sequencer::Sequencer;
pub use state::{AnimatorSnapshot, AnimatorState, DisplayMessage, Phase};
pub use timeline::{Timeline, TimelineEntry};
pub use timers::{TimerBag, TimerId};
pub use timing::{TimingConfig, TimingError};
