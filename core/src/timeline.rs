//! Virtual-Clock Timeline
//!
//! Plays a [`Sequencer`] against a virtual clock and records every
//! published snapshot with its timestamp. No real time passes, so whole
//! cycles can be inspected instantly.

use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::script::Script;
use crate::sequencer::Sequencer;
use crate::state::AnimatorSnapshot;
use crate::timing::TimingConfig;

/// One publication on the virtual clock
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TimelineEntry {
    /// Milliseconds since `start()`
    pub at_ms: u64,
    /// What was published
    pub snapshot: AnimatorSnapshot,
}

impl fmt::Display for TimelineEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.at_ms / 1000;
        let millis = self.at_ms % 1000;
        write!(
            f,
            "{secs:>4}.{millis:03}s  cycle {:<3} {:<10}",
            self.snapshot.cycle,
            self.snapshot.phase.label()
        )?;

        match self.snapshot.typing_speaker {
            Some(speaker) => write!(f, " {speaker} typing…")?,
            None => write!(f, " {:<14}", "")?,
        }

        for message in &self.snapshot.displayed {
            let marker = if message.is_fading {
                "~"
            } else if message.is_entering {
                "+"
            } else {
                ""
            };
            write!(f, " [{marker}{}]", message.speaker.avatar())?;
        }
        Ok(())
    }
}

/// Recorded sequence of publications
#[derive(Clone, Debug, Default, Serialize)]
pub struct Timeline {
    entries: Vec<TimelineEntry>,
}

impl Timeline {
    /// Record from `start()` until `cycles` cycles have completed
    ///
    /// The final entry is the clear that completes the last cycle.
    pub fn record(script: Script, timing: TimingConfig, cycles: u64) -> Self {
        let mut sequencer = Sequencer::new(script, timing);
        let mut entries = Vec::new();
        let mut revision = 0;
        let mut now = Duration::ZERO;

        let Some(mut delay) = sequencer.start() else {
            return Self { entries };
        };
        revision += 1;
        entries.push(TimelineEntry {
            at_ms: millis(now),
            snapshot: AnimatorSnapshot::capture(sequencer.state(), revision),
        });

        while sequencer.state().cycle < cycles {
            now += delay;
            let Some(next) = sequencer.fire() else {
                break;
            };
            delay = next;
            revision += 1;
            entries.push(TimelineEntry {
                at_ms: millis(now),
                snapshot: AnimatorSnapshot::capture(sequencer.state(), revision),
            });
        }

        Self { entries }
    }

    /// All entries in publication order
    #[must_use]
    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    /// Entries published while `cycle` cycles had completed
    #[must_use]
    pub fn cycle(&self, cycle: u64) -> Vec<&TimelineEntry> {
        self.entries
            .iter()
            .filter(|e| e.snapshot.cycle == cycle)
            .collect()
    }

    /// Time between the starts of two consecutive cycles, if recorded
    #[must_use]
    pub fn period_ms(&self) -> Option<u64> {
        let first = self.cycle(1).first()?.at_ms;
        let second = self.cycle(2).first()?.at_ms;
        Some(second - first)
    }

    /// Render one line per entry
    #[must_use]
    pub fn to_text(&self) -> String {
        self.entries
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Phase;

    fn record(cycles: u64) -> Timeline {
        Timeline::record(Script::botmatata(), TimingConfig::default(), cycles)
    }

    #[test]
    fn test_first_cycle_timestamps() {
        let timeline = record(1);
        let stamps: Vec<(u64, Phase)> = timeline
            .entries()
            .iter()
            .map(|e| (e.at_ms, e.snapshot.phase))
            .collect();

        assert_eq!(
            stamps,
            vec![
                (0, Phase::WaitingInitial),
                (1000, Phase::Typing(0)),
                (2475, Phase::Settling(0)),
                (2975, Phase::WaitingNext(1)),
                (4175, Phase::Typing(1)),
                (5500, Phase::Settling(1)),
                (6000, Phase::WaitingNext(2)),
                (7200, Phase::Typing(2)),
                (9050, Phase::Settling(2)),
                (9550, Phase::Fading),
                (10350, Phase::Resetting),
            ]
        );
    }

    #[test]
    fn test_revisions_increase() {
        let timeline = record(2);
        for pair in timeline.entries().windows(2) {
            assert_eq!(pair[1].snapshot.revision, pair[0].snapshot.revision + 1);
        }
    }

    #[test]
    fn test_period() {
        // 500 pre-roll + 1000 initial + 3 turns + 800 fade
        assert_eq!(record(3).period_ms(), Some(10_850));
    }

    #[test]
    fn test_cycles_replay_identically() {
        let timeline = record(4);
        let relative = |cycle: u64| -> Vec<(u64, AnimatorSnapshot)> {
            let entries = timeline.cycle(cycle);
            let origin = entries[0].at_ms;
            entries
                .iter()
                .map(|e| {
                    let mut snapshot = e.snapshot.clone();
                    snapshot.revision = 0;
                    snapshot.cycle = 0;
                    (e.at_ms - origin, snapshot)
                })
                .collect()
        };

        let reference = relative(1);
        assert_eq!(reference.len(), 11);
        assert_eq!(relative(2), reference);
        assert_eq!(relative(3), reference);
    }

    #[test]
    fn test_appends_in_script_order_each_cycle() {
        let timeline = record(2);
        let script = Script::botmatata();
        let expected: Vec<&str> = script.messages().iter().map(|m| m.text.as_str()).collect();
        for cycle in 0..2 {
            let fading = timeline
                .cycle(cycle)
                .into_iter()
                .find(|e| e.snapshot.phase == Phase::Fading)
                .expect("every cycle fades");
            let texts: Vec<&str> = fading
                .snapshot
                .displayed
                .iter()
                .map(|m| m.text.as_str())
                .collect();
            assert_eq!(texts, expected);
        }
    }

    #[test]
    fn test_display_line() {
        let timeline = record(1);
        let settling = &timeline.entries()[2];
        let line = settling.to_string();
        assert!(line.starts_with("   2.475s"));
        assert!(line.contains("settling"));
        assert!(line.contains("[+B]"));

        let fading = &timeline.entries()[9];
        assert!(fading.to_string().contains("[~B] [~C] [~B]"));
    }

    #[test]
    fn test_to_text_has_line_per_entry() {
        let timeline = record(1);
        assert_eq!(timeline.to_text().lines().count(), timeline.entries().len());
    }
}
