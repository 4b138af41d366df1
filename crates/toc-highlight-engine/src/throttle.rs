//! Rate limiting for scroll-driven updates.
//!
//! [`Throttle`] is a pure state machine: callers feed it events and timer
//! expiries with the current time, and it answers whether to run the update now
//! and what to do with the single trailing timer.
//!
//! ```text
//!              event / run, arm
//!   Idle ─────────────────────────▶ CoolingDown
//!    ▲                                │  event, interval not yet elapsed
//!    │ timer, nothing pending         │    / pending = true, re-arm
//!    └────────────────────────────────┤  event, interval elapsed
//!                                     │    / run, arm
//!                                     │  timer, pending
//!                                     │    / run, arm
//! ```
//!
//! Re-arming on every coalesced event pushes the trailing run to one interval
//! after the last event, so it always observes the final scroll position.

use std::time::Duration;

/// Spacing between updates under sustained scrolling.
pub const DEFAULT_THROTTLE_INTERVAL: Duration = Duration::from_millis(120);

/// Host-side one-shot timer used for trailing updates.
///
/// Only one timer is ever outstanding: arming replaces any previous one.
pub trait TimerHost {
    /// Monotonic time since an arbitrary origin.
    fn now(&self) -> Duration;

    /// Fire [`crate::TocSync::timer_fired`] after `delay`, replacing any armed timer.
    fn arm(&mut self, delay: Duration);

    fn cancel(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrottleState {
    Idle,
    CoolingDown { last_run: Duration },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCommand {
    /// Leave the timer as it is.
    Leave,
    Arm(Duration),
    Cancel,
}

/// What the caller must do in response to an event or timer expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThrottleStep {
    pub run: bool,
    pub timer: TimerCommand,
}

impl ThrottleStep {
    fn run_and_arm(interval: Duration) -> Self {
        Self {
            run: true,
            timer: TimerCommand::Arm(interval),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Throttle {
    interval: Duration,
    state: ThrottleState,
    pending: bool,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            state: ThrottleState::Idle,
            pending: false,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn state(&self) -> ThrottleState {
        self.state
    }

    /// Whether a coalesced event is waiting for the trailing run.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn event(&mut self, now: Duration) -> ThrottleStep {
        match self.state {
            ThrottleState::CoolingDown { last_run }
                if now.saturating_sub(last_run) < self.interval =>
            {
                self.pending = true;
                ThrottleStep {
                    run: false,
                    timer: TimerCommand::Arm(self.interval),
                }
            }
            _ => self.run_at(now),
        }
    }

    pub fn timer_fired(&mut self, now: Duration) -> ThrottleStep {
        match self.state {
            ThrottleState::CoolingDown { .. } if self.pending => self.run_at(now),
            ThrottleState::CoolingDown { .. } => {
                self.state = ThrottleState::Idle;
                ThrottleStep {
                    run: false,
                    timer: TimerCommand::Leave,
                }
            }
            // A timer that outlived a reset.
            ThrottleState::Idle => ThrottleStep {
                run: false,
                timer: TimerCommand::Leave,
            },
        }
    }

    /// Drop any pending trailing run and return to `Idle`.
    pub fn reset(&mut self) -> TimerCommand {
        let was_idle = self.state == ThrottleState::Idle;
        self.state = ThrottleState::Idle;
        self.pending = false;
        if was_idle {
            TimerCommand::Leave
        } else {
            TimerCommand::Cancel
        }
    }

    fn run_at(&mut self, now: Duration) -> ThrottleStep {
        self.state = ThrottleState::CoolingDown { last_run: now };
        self.pending = false;
        ThrottleStep::run_and_arm(self.interval)
    }
}

impl Default for Throttle {
    fn default() -> Self {
        Self::new(DEFAULT_THROTTLE_INTERVAL)
    }
}
