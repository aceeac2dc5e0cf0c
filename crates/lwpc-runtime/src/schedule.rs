//! Deferred work driven by the host's event loop.
//!
//! Nothing here spawns timers. The embedding loop calls `take`/`poll` on its
//! own animation-frame or timer tick and acts on the answer.

use web_time::{Duration, Instant};

/// Delay between the last window resize event and the layout pass it
/// triggers.
pub const WINDOW_RESIZE_DEBOUNCE: Duration = Duration::from_millis(20);

/// One-shot flag armed by a layout pass and consumed on the next tick.
///
/// Chart resizes are deferred so the DOM has applied the new frame styles
/// before charts measure themselves. Arming twice before a tick still yields
/// a single resize.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeferredTick {
    armed: bool,
}

impl DeferredTick {
    #[must_use]
    pub const fn new() -> Self {
        Self { armed: false }
    }

    pub fn arm(&mut self) {
        self.armed = true;
    }

    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.armed
    }

    /// Disarm, returning whether work was pending.
    pub fn take(&mut self) -> bool {
        std::mem::replace(&mut self.armed, false)
    }
}

/// Fires once `delay` has passed without another [`poke`](Self::poke).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrailingDebounce {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Default for TrailingDebounce {
    fn default() -> Self {
        Self::new(WINDOW_RESIZE_DEBOUNCE)
    }
}

impl TrailingDebounce {
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Record an event at `now`, pushing the deadline out.
    pub fn poke(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// True exactly once per burst, on the first poll at or after the
    /// deadline.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}
