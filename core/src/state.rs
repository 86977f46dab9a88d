//! Animator State Types
//!
//! What the animator owns ([`AnimatorState`]) and what it publishes to
//! surfaces ([`AnimatorSnapshot`]).
//!
//! # Design Philosophy
//!
//! Surfaces are dumb renderers. They map `is_entering`/`is_fading` to
//! whatever visual transition they support and never mutate the state.

use serde::{Deserialize, Serialize};

use crate::script::{ScriptedMessage, Speaker};

/// A scripted message currently on screen
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayMessage {
    /// Who said it
    pub speaker: Speaker,
    /// The message text
    pub text: String,
    /// Freshly revealed, still playing its entrance
    pub is_entering: bool,
    /// Part of the end-of-cycle fade-out
    pub is_fading: bool,
}

impl DisplayMessage {
    /// Project a scripted line into a freshly revealed display message
    pub fn entering(source: &ScriptedMessage) -> Self {
        Self {
            speaker: source.speaker,
            text: source.text.clone(),
            is_entering: true,
            is_fading: false,
        }
    }
}

/// Where the sequencer is in its cycle
///
/// `Idle → WaitingInitial → Typing(i) → Settling(i) → (WaitingNext(i+1) | Fading)
/// → Resetting → WaitingInitial → …`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Not started (or stopped)
    #[default]
    Idle,
    /// Waiting out the initial connection delay
    WaitingInitial,
    /// Typing indicator shown for message `i`
    Typing(usize),
    /// Message `i` revealed and still entering
    Settling(usize),
    /// Pausing before the turn for message `i`
    WaitingNext(usize),
    /// Everything displayed is fading out
    Fading,
    /// Cleared; waiting out the pre-roll before the next cycle
    Resetting,
}

impl Phase {
    /// Short label for logs and status lines
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::WaitingInitial => "waiting",
            Self::Typing(_) => "typing",
            Self::Settling(_) => "settling",
            Self::WaitingNext(_) => "pausing",
            Self::Fading => "fading",
            Self::Resetting => "resetting",
        }
    }
}

/// Mutable state owned by exactly one sequencer
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AnimatorState {
    /// Messages on screen, in script order
    pub displayed: Vec<DisplayMessage>,
    /// Whose typing indicator is visible, if anyone's
    pub typing_speaker: Option<Speaker>,
    /// Index of the next message to reveal
    pub cursor: usize,
    /// End-of-script fade has been triggered
    pub resetting: bool,
    /// Current state-machine phase
    pub phase: Phase,
    /// Completed cycles
    pub cycle: u64,
}

impl AnimatorState {
    /// Clear everything a cycle accumulated
    pub fn clear_cycle(&mut self) {
        self.displayed.clear();
        self.typing_speaker = None;
        self.cursor = 0;
        self.resetting = false;
    }
}

/// Read-only view of the animator published to surfaces
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimatorSnapshot {
    /// Messages to render
    pub displayed: Vec<DisplayMessage>,
    /// Typing indicator to render
    pub typing_speaker: Option<Speaker>,
    /// Phase at publication time
    pub phase: Phase,
    /// Completed cycles at publication time
    pub cycle: u64,
    /// Increments on every publication
    pub revision: u64,
}

impl AnimatorSnapshot {
    /// Capture `state` as publication number `revision`
    pub fn capture(state: &AnimatorState, revision: u64) -> Self {
        Self {
            displayed: state.displayed.clone(),
            typing_speaker: state.typing_speaker,
            phase: state.phase,
            cycle: state.cycle,
            revision,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entering_projection() {
        let msg = DisplayMessage::entering(&ScriptedMessage::user("hi"));
        assert_eq!(msg.speaker, Speaker::User);
        assert!(msg.is_entering);
        assert!(!msg.is_fading);
    }

    #[test]
    fn test_clear_cycle_keeps_counters() {
        let mut state = AnimatorState {
            displayed: vec![DisplayMessage::entering(&ScriptedMessage::bot("x"))],
            typing_speaker: Some(Speaker::Bot),
            cursor: 1,
            resetting: true,
            phase: Phase::Fading,
            cycle: 4,
        };
        state.clear_cycle();
        assert!(state.displayed.is_empty());
        assert_eq!(state.typing_speaker, None);
        assert_eq!(state.cursor, 0);
        assert!(!state.resetting);
        assert_eq!(state.cycle, 4);
        assert_eq!(state.phase, Phase::Fading);
    }

    #[test]
    fn test_snapshot_json_shape() {
        let state = AnimatorState {
            phase: Phase::Typing(2),
            typing_speaker: Some(Speaker::Bot),
            cursor: 2,
            ..AnimatorState::default()
        };
        let json = serde_json::to_value(AnimatorSnapshot::capture(&state, 7)).unwrap();
        assert_eq!(json["phase"]["typing"], 2);
        assert_eq!(json["typing_speaker"], "bot");
        assert_eq!(json["revision"], 7);
    }

    #[test]
    fn test_unit_phase_serializes_as_string() {
        let json = serde_json::to_value(Phase::Fading).unwrap();
        assert_eq!(json, "fading");
    }
}
