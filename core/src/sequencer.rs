//! Chat Sequencer
//!
//! The pure state machine behind the hero chat animation. It owns an
//! [`AnimatorState`] and knows, for every phase, what to do when the
//! pending delay elapses and how long to wait before the next transition.
//!
//! The sequencer never touches a clock. Drivers decide how a delay is
//! waited out: [`ChatAnimator`](crate::animator::ChatAnimator) uses tokio
//! timers, [`Timeline`](crate::timeline::Timeline) uses a virtual clock.
//!
//! ```text
//! Idle ─start─▶ WaitingInitial ─▶ Typing(i) ─▶ Settling(i) ─┬▶ WaitingNext(i+1) ─▶ Typing(i+1) …
//!                     ▲                                      └▶ Fading ─▶ Resetting ─┐
//!                     └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Settling the last message starts the fade in the same transition, so a
//! settled-but-not-fading final bubble is never published.

use std::time::Duration;

use tracing::{debug, trace};

use crate::script::Script;
use crate::state::{AnimatorState, DisplayMessage, Phase};
use crate::timing::TimingConfig;

/// Deterministic chat animation state machine
#[derive(Clone, Debug)]
pub struct Sequencer {
    script: Script,
    timing: TimingConfig,
    state: AnimatorState,
}

impl Sequencer {
    /// Create an idle sequencer
    pub fn new(script: Script, timing: TimingConfig) -> Self {
        Self {
            script,
            timing,
            state: AnimatorState::default(),
        }
    }

    /// Current state
    #[must_use]
    pub fn state(&self) -> &AnimatorState {
        &self.state
    }

    /// Current phase
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// Whether the sequencer has not been started
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.state.phase == Phase::Idle
    }

    /// Leave `Idle` and return the initial delay
    ///
    /// Returns `None` if the sequencer is already running.
    pub fn start(&mut self) -> Option<Duration> {
        if !self.is_idle() {
            return None;
        }

        self.state.phase = Phase::WaitingInitial;
        debug!(messages = self.script.len(), "Chat sequence started");
        Some(self.timing.initial_delay)
    }

    /// Drop all progress and return to `Idle`
    pub fn reset(&mut self) {
        self.state = AnimatorState::default();
    }

    /// Perform the transition owed now that the pending delay has elapsed
    ///
    /// Returns how long to wait before calling `fire` again, or `None`
    /// while idle.
    pub fn fire(&mut self) -> Option<Duration> {
        let delay = match self.state.phase {
            Phase::Idle => return None,
            Phase::WaitingInitial | Phase::WaitingNext(_) => self.begin_turn(),
            Phase::Typing(index) => self.reveal(index),
            Phase::Settling(index) => self.settle(index),
            Phase::Fading => self.clear(),
            Phase::Resetting => {
                self.state.phase = Phase::WaitingInitial;
                self.timing.initial_delay
            }
        };

        trace!(
            phase = self.state.phase.label(),
            cursor = self.state.cursor,
            shown = self.state.displayed.len(),
            next_ms = delay.as_millis() as u64,
            "Sequencer transition"
        );
        Some(delay)
    }

    /// Show the typing indicator for the message at the cursor
    fn begin_turn(&mut self) -> Duration {
        let cursor = self.state.cursor;
        let Some(message) = self.script.get(cursor) else {
            return self.begin_fade();
        };

        self.state.typing_speaker = Some(message.speaker);
        self.state.phase = Phase::Typing(cursor);
        self.timing.typing_duration(message)
    }

    /// Hide the indicator and append the message in its entering state
    fn reveal(&mut self, index: usize) -> Duration {
        let Some(message) = self.script.get(index) else {
            return self.begin_fade();
        };

        self.state.typing_speaker = None;
        self.state.displayed.push(DisplayMessage::entering(message));
        self.state.phase = Phase::Settling(index);
        self.timing.settle_delay
    }

    /// Settle the newest message and advance the cursor
    fn settle(&mut self, index: usize) -> Duration {
        if let Some(last) = self.state.displayed.last_mut() {
            last.is_entering = false;
        }
        self.state.cursor += 1;

        let cursor = self.state.cursor;
        match (self.script.get(index), self.script.get(cursor)) {
            (Some(current), Some(next)) => {
                self.state.phase = Phase::WaitingNext(cursor);
                self.timing.inter_turn_delay(current.speaker, next.speaker)
            }
            // last message: fade now, no separate hold
            _ => self.begin_fade(),
        }
    }

    /// Mark everything as fading; no advancement until the clear
    fn begin_fade(&mut self) -> Duration {
        self.state.resetting = true;
        self.state.typing_speaker = None;
        for message in &mut self.state.displayed {
            message.is_fading = true;
        }
        self.state.phase = Phase::Fading;
        self.timing.fade_delay
    }

    /// Empty the conversation and wait out the pre-roll
    fn clear(&mut self) -> Duration {
        self.state.clear_cycle();
        self.state.cycle += 1;
        self.state.phase = Phase::Resetting;
        debug!(cycle = self.state.cycle, "Chat sequence cycle complete");
        self.timing.preroll_delay
    }
}
