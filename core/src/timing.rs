//! Choreography Timing
//!
//! Every delay the animator waits on lives here, so surfaces and tests can
//! compress the choreography without touching the state machine.
//!
//! | Delay                | Default | When                                   |
//! |----------------------|---------|----------------------------------------|
//! | initial              | 1000 ms | before the first turn of each cycle    |
//! | typing               | 700 ms + 25 ms/char, capped at 2000 ms | typing indicator shown |
//! | settle               | 500 ms  | entering → settled                     |
//! | same speaker         | 800 ms  | next turn by the same speaker          |
//! | speaker change       | 1200 ms | next turn by the other speaker         |
//! | fade                 | 800 ms  | fade-out before the list is cleared    |
//! | pre-roll             | 500 ms  | after a reset, before the initial wait |

use std::time::Duration;

use thiserror::Error;

use crate::script::{ScriptedMessage, Speaker};

/// Errors raised by [`TimingConfig::validate`] and [`TimingConfig::scaled`]
#[derive(Debug, Error, PartialEq)]
pub enum TimingError {
    /// The typing cap is below the typing base, so the formula is not monotonic
    #[error("typing cap ({cap:?}) must not be below typing base ({base:?})")]
    CapBelowBase {
        /// Configured base
        base: Duration,
        /// Configured cap
        cap: Duration,
    },

    /// Speed factor was zero, negative or not finite
    #[error("speed factor must be a positive finite number, got {0}")]
    InvalidSpeed(f64),

    /// Dividing a delay by the speed factor does not fit in a `Duration`
    #[error("speed factor {0} stretches a delay beyond the representable range")]
    SpeedOutOfRange(f64),
}

/// All delays used by the chat sequence choreography
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimingConfig {
    /// Wait before the first turn of a cycle
    pub initial_delay: Duration,
    /// Typing duration floor
    pub typing_base: Duration,
    /// Extra typing time per character of text
    pub typing_per_char: Duration,
    /// Typing duration ceiling
    pub typing_cap: Duration,
    /// Time a freshly revealed message stays in the entering state
    pub settle_delay: Duration,
    /// Pause before a turn by the same speaker
    pub same_speaker_delay: Duration,
    /// Pause before a turn by the other speaker (a "response")
    pub speaker_change_delay: Duration,
    /// Fade-out time before the conversation is cleared
    pub fade_delay: Duration,
    /// Pause after a reset before the initial delay starts again
    pub preroll_delay: Duration,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_millis(1000),
            typing_base: Duration::from_millis(700),
            typing_per_char: Duration::from_millis(25),
            typing_cap: Duration::from_millis(2000),
            settle_delay: Duration::from_millis(500),
            same_speaker_delay: Duration::from_millis(800),
            speaker_change_delay: Duration::from_millis(1200),
            fade_delay: Duration::from_millis(800),
            preroll_delay: Duration::from_millis(500),
        }
    }
}

impl TimingConfig {
    /// Check internal consistency
    pub fn validate(&self) -> Result<(), TimingError> {
        if self.typing_cap < self.typing_base {
            return Err(TimingError::CapBelowBase {
                base: self.typing_base,
                cap: self.typing_cap,
            });
        }
        Ok(())
    }

    /// Return a copy with every delay divided by `speed`
    ///
    /// `speed = 2.0` plays the choreography twice as fast.
    pub fn scaled(&self, speed: f64) -> Result<Self, TimingError> {
        if !speed.is_finite() || speed <= 0.0 {
            return Err(TimingError::InvalidSpeed(speed));
        }

        let scale = |d: Duration| {
            Duration::try_from_secs_f64(d.as_secs_f64() / speed)
                .map_err(|_| TimingError::SpeedOutOfRange(speed))
        };
        Ok(Self {
            initial_delay: scale(self.initial_delay)?,
            typing_base: scale(self.typing_base)?,
            typing_per_char: scale(self.typing_per_char)?,
            typing_cap: scale(self.typing_cap)?,
            settle_delay: scale(self.settle_delay)?,
            same_speaker_delay: scale(self.same_speaker_delay)?,
            speaker_change_delay: scale(self.speaker_change_delay)?,
            fade_delay: scale(self.fade_delay)?,
            preroll_delay: scale(self.preroll_delay)?,
        })
    }

    /// Typing duration for a text of `char_len` characters
    ///
    /// `min(base + per_char * len, cap)`
    #[must_use]
    pub fn typing_duration_for_len(&self, char_len: usize) -> Duration {
        let chars = u32::try_from(char_len).unwrap_or(u32::MAX);
        self.typing_base
            .saturating_add(self.typing_per_char.saturating_mul(chars))
            .min(self.typing_cap)
    }

    /// Typing duration for a scripted message
    #[must_use]
    pub fn typing_duration(&self, message: &ScriptedMessage) -> Duration {
        self.typing_duration_for_len(message.char_len())
    }

    /// Pause between a turn by `previous` and the next turn by `next`
    #[must_use]
    pub fn inter_turn_delay(&self, previous: Speaker, next: Speaker) -> Duration {
        if previous == next {
            self.same_speaker_delay
        } else {
            self.speaker_change_delay
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(d: Duration) -> u128 {
        d.as_millis()
    }

    #[test]
    fn test_typing_duration_floor() {
        let timing = TimingConfig::default();
        assert_eq!(ms(timing.typing_duration_for_len(0)), 700);
    }

    #[test]
    fn test_typing_duration_linear() {
        let timing = TimingConfig::default();
        assert_eq!(ms(timing.typing_duration_for_len(10)), 950);
    }

    #[test]
    fn test_typing_duration_cap() {
        let timing = TimingConfig::default();
        assert_eq!(ms(timing.typing_duration_for_len(52)), 2000);
        assert_eq!(ms(timing.typing_duration_for_len(10_000)), 2000);
        assert_eq!(ms(timing.typing_duration_for_len(usize::MAX)), 2000);
    }

    #[test]
    fn test_typing_duration_for_script_lines() {
        let timing = TimingConfig::default();
        // 31 chars -> 1475 ms
        let greeting = ScriptedMessage::bot("Hi! How can I assist you today?");
        assert_eq!(ms(timing.typing_duration(&greeting)), 1475);
        // 46 chars -> 1850 ms
        let follow_up = ScriptedMessage::bot("What kind of help do you need with your order?");
        assert_eq!(ms(timing.typing_duration(&follow_up)), 1850);
    }

    #[test]
    fn test_inter_turn_delay() {
        let timing = TimingConfig::default();
        assert_eq!(ms(timing.inter_turn_delay(Speaker::Bot, Speaker::User)), 1200);
        assert_eq!(ms(timing.inter_turn_delay(Speaker::User, Speaker::Bot)), 1200);
        assert_eq!(ms(timing.inter_turn_delay(Speaker::Bot, Speaker::Bot)), 800);
    }

    #[test]
    fn test_scaled_halves_delays() {
        let fast = TimingConfig::default().scaled(2.0).unwrap();
        assert_eq!(ms(fast.initial_delay), 500);
        assert_eq!(ms(fast.typing_duration_for_len(0)), 350);
        assert_eq!(ms(fast.fade_delay), 400);
    }

    #[test]
    fn test_scaled_rejects_bad_speed() {
        let timing = TimingConfig::default();
        assert_eq!(timing.scaled(0.0), Err(TimingError::InvalidSpeed(0.0)));
        assert!(timing.scaled(-1.0).is_err());
        assert!(timing.scaled(f64::NAN).is_err());
    }

    #[test]
    fn test_scaled_rejects_speed_that_overflows_delays() {
        let timing = TimingConfig::default();
        assert_eq!(
            timing.scaled(1e-20),
            Err(TimingError::SpeedOutOfRange(1e-20))
        );
        assert!(timing.scaled(f64::MIN_POSITIVE).is_err());
    }

    #[test]
    fn test_scaled_slow_speed_within_range() {
        let slow = TimingConfig::default().scaled(0.5).unwrap();
        assert_eq!(ms(slow.initial_delay), 2000);
        assert_eq!(ms(slow.typing_cap), 4000);
    }

    #[test]
    fn test_validate_cap_below_base() {
        let timing = TimingConfig {
            typing_cap: Duration::from_millis(100),
            ..TimingConfig::default()
        };
        assert!(matches!(
            timing.validate(),
            Err(TimingError::CapBelowBase { .. })
        ));
        assert!(TimingConfig::default().validate().is_ok());
    }
}
