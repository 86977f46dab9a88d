//! Main Application
//!
//! The App mounts a [`ChatAnimator`] and renders whatever it publishes:
//! - Event loop (keyboard, resize, snapshot updates, frame tick)
//! - Mount/unmount lifecycle mapped onto `start()`/`stop()`
//! - Hero layout with the chat window beside or below the headline
//!
//! # Keys
//!
//! | Key | Action |
//! |-----|--------|
//! | `q`, `Esc`, `Ctrl-C` | Unmount and quit |
//! | `p` | Pause (stop) or resume (fresh start) |
//! | `r` | Remount with a new animator |

use std::time::Duration;

use anyhow::Context;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::backend::Backend;
use ratatui::layout::{Constraint, Layout, Margin, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use ratatui::{Frame, Terminal};
use tokio::sync::watch;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info};

use botmatata_core::{AnimatorSnapshot, ChatAnimator, HeroConfig, Script, Speaker, TimingConfig};

use crate::theme::{self, BORDER_GRAY, BRAND_GREEN, PLACEHOLDER_GRAY};
use crate::widgets::{ChatWidget, HeroPanel};

/// Redraw interval for the typing dots (~10 fps)
pub const FRAME_INTERVAL: Duration = Duration::from_millis(100);

/// Below this width the chat window moves under the headline
const WIDE_LAYOUT_WIDTH: u16 = 80;

/// Chat window size, clamped to the space available
const CHAT_WIDTH: u16 = 44;
const CHAT_HEIGHT: u16 = 20;

/// Headline block height in the narrow layout
const NARROW_HERO_HEIGHT: u16 = 10;

/// One wake-up of the event loop
enum Step {
    Terminal(Option<std::io::Result<Event>>),
    Snapshot(bool),
    Frame,
}

/// Main application state
pub struct App {
    // === Core State ===
    /// Is the app still running?
    running: bool,
    /// Animation paused by the user
    paused: bool,

    // === Animator ===
    script: Script,
    timing: TimingConfig,
    /// The mounted animator
    animator: ChatAnimator,
    /// Updates from the mounted animator
    snapshots: watch::Receiver<AnimatorSnapshot>,
    /// Latest published state
    snapshot: AnimatorSnapshot,

    // === Rendering State ===
    /// Who is typing and since when, drives the dot bounce
    typing_since: Option<(Speaker, Instant)>,
    /// Times the chat has been mounted
    mounts: u64,
}

impl App {
    /// Build an unmounted app from resolved configuration
    pub fn new(config: &HeroConfig) -> anyhow::Result<Self> {
        let timing = config
            .effective_timing()
            .context("resolving animation timing")?;
        let script = config.script.clone();
        let animator = ChatAnimator::new(script.clone(), timing.clone());
        let snapshots = animator.subscribe();

        Ok(Self {
            running: true,
            paused: false,
            script,
            timing,
            animator,
            snapshots,
            snapshot: AnimatorSnapshot::default(),
            typing_since: None,
            mounts: 0,
        })
    }

    /// Run until the user quits
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        self.mount()?;

        let mut events = EventStream::new();
        let mut frames = tokio::time::interval(FRAME_INTERVAL);
        frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

        while self.running {
            terminal.draw(|frame| self.render(frame))?;

            let step = tokio::select! {
                event = events.next() => Step::Terminal(event),
                changed = self.snapshots.changed() => Step::Snapshot(changed.is_ok()),
                _ = frames.tick() => Step::Frame,
            };

            match step {
                Step::Terminal(Some(Ok(Event::Key(key)))) => self.handle_key(key)?,
                Step::Terminal(Some(Ok(_))) | Step::Frame => {}
                Step::Terminal(Some(Err(e))) => {
                    self.unmount();
                    return Err(e).context("reading terminal events");
                }
                Step::Terminal(None) => self.running = false,
                Step::Snapshot(true) => self.sync_snapshot(),
                Step::Snapshot(false) => anyhow::bail!("chat animator closed its update channel"),
            }
        }

        self.unmount();
        Ok(())
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Start the mounted animator and pick up its first snapshot
    pub fn mount(&mut self) -> anyhow::Result<()> {
        self.animator.start().context("starting chat animator")?;
        self.mounts += 1;
        self.paused = false;
        self.sync_snapshot();
        info!(mount = self.mounts, "Chat widget mounted");
        Ok(())
    }

    /// Stop the animator; nothing changes on screen afterwards
    pub fn unmount(&mut self) {
        self.animator.stop();
        debug!(mount = self.mounts, "Chat widget unmounted");
    }

    /// Replace the animator with a new one and mount it
    pub fn remount(&mut self) -> anyhow::Result<()> {
        self.unmount();
        self.animator = ChatAnimator::new(self.script.clone(), self.timing.clone());
        self.snapshots = self.animator.subscribe();
        self.snapshot = AnimatorSnapshot::default();
        self.typing_since = None;
        self.mount()
    }

    /// Stop, or start again from an empty conversation
    pub fn toggle_pause(&mut self) -> anyhow::Result<()> {
        if self.paused {
            self.animator.start().context("resuming chat animator")?;
            self.paused = false;
            self.sync_snapshot();
            info!("Chat animation resumed");
        } else {
            self.animator.stop();
            self.paused = true;
            info!("Chat animation paused");
        }
        Ok(())
    }

    /// Handle keyboard input
    pub fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.running = false,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.running = false;
            }
            KeyCode::Char('p') => self.toggle_pause()?,
            KeyCode::Char('r') => self.remount()?,
            _ => {}
        }
        Ok(())
    }

    /// Pull the latest published snapshot
    pub fn sync_snapshot(&mut self) {
        let snapshot = self.snapshots.borrow_and_update().clone();

        let typing = snapshot.typing_speaker;
        let current = self.typing_since.map(|(speaker, _)| speaker);
        if typing != current {
            self.typing_since = typing.map(|speaker| (speaker, Instant::now()));
        }

        self.snapshot = snapshot;
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Still running?
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Paused by the user?
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// What is on screen
    #[must_use]
    pub fn snapshot(&self) -> &AnimatorSnapshot {
        &self.snapshot
    }

    /// The mounted animator
    #[must_use]
    pub fn animator(&self) -> &ChatAnimator {
        &self.animator
    }

    /// Times the chat has been mounted
    #[must_use]
    pub fn mounts(&self) -> u64 {
        self.mounts
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Render the whole screen
    pub fn render(&self, frame: &mut Frame<'_>) {
        let area = frame.area();
        frame.render_widget(Block::default().style(theme::page()), area);

        let [main, status] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(area);

        let (hero, chat) = if main.width >= WIDE_LAYOUT_WIDTH {
            let [hero, chat] =
                Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                    .areas(main);
            (hero, chat)
        } else {
            let [hero, chat] =
                Layout::vertical([Constraint::Length(NARROW_HERO_HEIGHT), Constraint::Min(1)])
                    .areas(main);
            (hero, chat)
        };

        frame.render_widget(HeroPanel, hero.inner(Margin::new(2, 1)));

        let typing_elapsed = self
            .typing_since
            .map_or(Duration::ZERO, |(_, since)| since.elapsed());
        frame.render_widget(
            ChatWidget::new(&self.snapshot).typing_elapsed(typing_elapsed),
            chat_window(chat),
        );

        frame.render_widget(self.status_line(), status);
    }

    fn status_line(&self) -> Paragraph<'static> {
        let key = Style::default()
            .fg(BRAND_GREEN)
            .add_modifier(Modifier::BOLD);
        let dim = Style::default().fg(PLACEHOLDER_GRAY);
        let state = if self.paused {
            "paused".to_string()
        } else {
            format!(
                "cycle {} · {}",
                self.snapshot.cycle,
                self.snapshot.phase.label()
            )
        };

        Paragraph::new(Line::from(vec![
            Span::styled(" q", key),
            Span::styled(" quit  ", dim),
            Span::styled("p", key),
            Span::styled(if self.paused { " resume  " } else { " pause  " }, dim),
            Span::styled("r", key),
            Span::styled(" remount", dim),
            Span::styled("  │  ", Style::default().fg(BORDER_GRAY)),
            Span::styled(state, dim),
        ]))
        .style(theme::page())
    }
}

/// Center the chat window inside `area`
fn chat_window(area: Rect) -> Rect {
    let width = area.width.min(CHAT_WIDTH);
    let height = area.height.min(CHAT_HEIGHT);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
