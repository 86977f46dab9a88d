//! Typing Indicator
//!
//! Three dots bouncing in a wave. Each dot runs a 0.6 s cycle and starts
//! 0.15 s after its left neighbour, so the crest travels left to right.

use std::time::Duration;

/// One full bounce
pub const BOUNCE_PERIOD: Duration = Duration::from_millis(600);

/// Delay between neighbouring dots
pub const DOT_STAGGER: Duration = Duration::from_millis(150);

/// Number of dots
pub const DOT_COUNT: usize = 3;

const RAISED: &str = "•";
const RESTING: &str = ".";

/// Whether dot `index` is in the upper half of its bounce at `elapsed`
///
/// `elapsed` is measured from when the indicator appeared. A dot sits at
/// rest until its stagger delay has passed.
#[must_use]
pub fn dot_raised(elapsed: Duration, index: usize) -> bool {
    let delay = DOT_STAGGER * u32::try_from(index).unwrap_or(u32::MAX);
    let Some(local) = elapsed.checked_sub(delay) else {
        return false;
    };

    let period = BOUNCE_PERIOD.as_millis();
    let phase = local.as_millis() % period;
    phase >= period / 4 && phase < period * 3 / 4
}

/// The dots as a short string, for bubbles and plain output
#[must_use]
pub fn dots(elapsed: Duration) -> String {
    (0..DOT_COUNT)
        .map(|i| if dot_raised(elapsed, i) { RAISED } else { RESTING })
        .collect::<Vec<_>>()
        .join(" ")
}
