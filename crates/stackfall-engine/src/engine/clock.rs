use std::time::Duration;

/// Period of a single clock poll.
///
/// Gravity and continuous soft drop are both driven from this poll. Gravity fires once every
/// `ceil(interval / POLL_INTERVAL)` polls, soft drop on every poll while held.
pub const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Upper bound on polls replayed by a single [`GameClock::elapsed_polls`] call.
pub const MAX_CATCH_UP_POLLS: u32 = 20;

/// Counts polls and decides when gravity fires.
///
/// The clock does not own a timer. A driver either calls [`GameClock::poll`] once per
/// [`POLL_INTERVAL`] directly, or feeds wall-clock time through
/// [`GameClock::elapsed_polls`] to learn how many polls are due.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameClock {
    idle_polls: u32,
    backlog: Duration,
}

impl GameClock {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            idle_polls: 0,
            backlog: Duration::ZERO,
        }
    }

    /// Registers one poll and returns `true` if gravity is due.
    ///
    /// At most one gravity step fires per interval; the count restarts after firing.
    pub fn poll(&mut self, gravity_interval: Duration) -> bool {
        self.idle_polls += 1;
        if self.idle_polls >= polls_per_step(gravity_interval) {
            self.idle_polls = 0;
            return true;
        }
        false
    }

    /// Adds elapsed wall-clock time and returns the number of whole polls now due.
    ///
    /// The fraction of a poll left over is carried into the next call. If the driver fell
    /// far behind, only [`MAX_CATCH_UP_POLLS`] polls are returned and the rest are dropped.
    pub fn elapsed_polls(&mut self, elapsed: Duration) -> u32 {
        self.backlog += elapsed;
        let poll_nanos = POLL_INTERVAL.as_nanos();
        let backlog_nanos = self.backlog.as_nanos();
        let polls = backlog_nanos / poll_nanos;
        let remainder = backlog_nanos % poll_nanos;
        self.backlog = Duration::from_nanos(u64::try_from(remainder).unwrap_or(0));
        u32::try_from(polls)
            .unwrap_or(u32::MAX)
            .min(MAX_CATCH_UP_POLLS)
    }

    /// Forgets all pending polls.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

fn polls_per_step(gravity_interval: Duration) -> u32 {
    let polls = gravity_interval
        .as_millis()
        .div_ceil(POLL_INTERVAL.as_millis());
    u32::try_from(polls).unwrap_or(u32::MAX).max(1)
}
