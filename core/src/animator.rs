//! Chat Animator
//!
//! Drives a [`Sequencer`] with tokio timers and publishes an
//! [`AnimatorSnapshot`] after every transition.
//!
//! # Scheduling
//!
//! Every wait is one spawned unit of work tracked in the animator's own
//! [`TimerBag`]. A unit sleeps until its deadline, then takes the state
//! lock and claims its bag entry before touching the sequencer. `stop()`
//! takes the same lock, aborts everything and empties the bag, so a unit
//! that was about to fire finds its entry gone and does nothing. Units
//! scheduled from inside another unit go through the same bag.
//!
//! Deadlines chain from the previous deadline rather than from the moment
//! the unit actually ran, so a late wake-up does not stretch the cycle.
//!
//! # Lifecycle
//!
//! ```text
//! mount ── start() ──▶ running ── stop() ──▶ stopped ── start() ──▶ running (fresh state)
//!                                    ▲
//!                                 drop()
//! ```

use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::time::Instant;
use tracing::{debug, trace};

use crate::script::Script;
use crate::sequencer::Sequencer;
use crate::state::AnimatorSnapshot;
use crate::timers::{TimerBag, TimerId};
use crate::timing::TimingConfig;

/// Errors raised by [`ChatAnimator`]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnimatorError {
    /// `start()` was called outside a tokio runtime
    #[error("chat animator must be started from within a tokio runtime")]
    NoRuntime,
}

/// State shared between the animator handle and its scheduled units
#[derive(Debug)]
struct Shared {
    sequencer: Sequencer,
    timers: TimerBag,
    runtime: Option<Handle>,
    running: bool,
    revision: u64,
    publisher: watch::Sender<AnimatorSnapshot>,
}

impl Shared {
    fn publish(&mut self) {
        self.revision += 1;
        let snapshot = AnimatorSnapshot::capture(self.sequencer.state(), self.revision);
        self.publisher.send_replace(snapshot);
    }
}

/// Looping, cancellable chat sequence animation
///
/// One instance per mounted view. Instances share nothing.
#[derive(Debug)]
pub struct ChatAnimator {
    shared: Arc<Mutex<Shared>>,
    snapshots: watch::Receiver<AnimatorSnapshot>,
}

impl ChatAnimator {
    /// Create a stopped animator for `script` with `timing`
    pub fn new(script: Script, timing: TimingConfig) -> Self {
        let (publisher, snapshots) = watch::channel(AnimatorSnapshot::default());
        let shared = Shared {
            sequencer: Sequencer::new(script, timing),
            timers: TimerBag::new(),
            runtime: None,
            running: false,
            revision: 0,
            publisher,
        };

        Self {
            shared: Arc::new(Mutex::new(shared)),
            snapshots,
        }
    }

    /// The hero-section animator with default timing
    #[must_use]
    pub fn botmatata() -> Self {
        Self::new(Script::botmatata(), TimingConfig::default())
    }

    /// Begin the loop
    ///
    /// A no-op while already running. After a `stop()` the loop restarts
    /// from an empty conversation.
    pub fn start(&self) -> Result<(), AnimatorError> {
        let runtime = Handle::try_current().map_err(|_| AnimatorError::NoRuntime)?;
        let mut shared = self.shared.lock();

        if shared.running {
            trace!("Chat animator already running");
            return Ok(());
        }

        if !shared.sequencer.is_idle() {
            shared.sequencer.reset();
        }
        let Some(delay) = shared.sequencer.start() else {
            return Ok(());
        };

        shared.running = true;
        shared.runtime = Some(runtime);
        shared.publish();
        schedule(
            Arc::downgrade(&self.shared),
            &mut shared,
            Instant::now() + delay,
        );

        debug!("Chat animator started");
        Ok(())
    }

    /// Cancel all pending work
    ///
    /// Once this returns the published state never changes again until
    /// the next `start()`.
    pub fn stop(&self) {
        let mut shared = self.shared.lock();
        let cancelled = shared.timers.cancel_all();
        shared.runtime = None;

        if shared.running {
            shared.running = false;
            debug!(cancelled, "Chat animator stopped");
        }
    }

    /// Whether the loop is running
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.shared.lock().running
    }

    /// Number of scheduled units not yet fired
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.shared.lock().timers.len()
    }

    /// Latest published snapshot
    #[must_use]
    pub fn snapshot(&self) -> AnimatorSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Receiver notified on every publication
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AnimatorSnapshot> {
        self.snapshots.clone()
    }
}

impl Drop for ChatAnimator {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Spawn the unit that fires at `deadline` and track it in the bag
fn schedule(weak: Weak<Mutex<Shared>>, shared: &mut Shared, deadline: Instant) {
    let Some(runtime) = shared.runtime.as_ref() else {
        return;
    };

    let id = shared.timers.reserve();
    let handle = runtime.spawn(async move {
        tokio::time::sleep_until(deadline).await;
        fire(&weak, id, deadline);
    });
    shared.timers.insert(id, handle);
}

/// Body of a scheduled unit: claim the entry, transition, schedule the next
fn fire(weak: &Weak<Mutex<Shared>>, id: TimerId, deadline: Instant) {
    let Some(shared_arc) = weak.upgrade() else {
        return;
    };
    let mut shared = shared_arc.lock();

    if !shared.timers.complete(id) {
        trace!(timer = %id, "Cancelled timer woke up; ignoring");
        return;
    }

    let Some(delay) = shared.sequencer.fire() else {
        return;
    };
    shared.publish();
    schedule(Arc::downgrade(&shared_arc), &mut shared, deadline + delay);
}
