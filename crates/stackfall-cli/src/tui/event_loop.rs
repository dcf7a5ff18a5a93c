use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event;

use super::event::TuiEvent;

/// When to emit render events.
#[derive(Debug, Clone, Copy, Default)]
pub enum RenderMode {
    /// Render after every state change (tick or terminal event).
    #[default]
    OnDirty,
    /// Render after state changes, at most once per interval.
    Throttled(Duration),
}

/// Produces the next tick, render or terminal event.
///
/// Ticks follow a fixed cadence: each one is scheduled one interval after the previous
/// deadline, not after the moment it was delivered. If the loop falls more than one interval
/// behind, the schedule restarts from now instead of bursting.
#[derive(Debug)]
pub(super) struct EventLoop {
    tick_interval: Option<Duration>,
    next_tick: Instant,
    render_mode: RenderMode,
    last_render: Option<Instant>,
    dirty: bool,
}

impl EventLoop {
    pub(super) fn new() -> Self {
        Self {
            tick_interval: None,
            next_tick: Instant::now(),
            render_mode: RenderMode::default(),
            last_render: None,
            dirty: true,
        }
    }

    /// Pass `None` to stop ticking.
    pub(super) fn set_tick_interval(&mut self, interval: Option<Duration>) {
        self.tick_interval = interval;
        if let Some(interval) = interval {
            self.next_tick = Instant::now() + interval;
        }
    }

    pub(super) fn set_render_mode(&mut self, render_mode: RenderMode) {
        self.render_mode = render_mode;
    }

    /// Blocks until the next event is due.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if let Some(interval) = self.tick_interval
                && now >= self.next_tick
            {
                self.next_tick += interval;
                if self.next_tick + interval < now {
                    self.next_tick = now + interval;
                }
                self.dirty = true;
                return Ok(TuiEvent::Tick);
            }

            if self.render_due(now) {
                self.last_render = Some(now);
                self.dirty = false;
                return Ok(TuiEvent::Render);
            }

            let timeout = self.timeout(now);
            if event::poll(timeout)? {
                self.dirty = true;
                return Ok(event::read()?.into());
            }
        }
    }

    fn render_at(&self, now: Instant) -> Option<Instant> {
        if !self.dirty {
            return None;
        }
        match (self.render_mode, self.last_render) {
            (RenderMode::Throttled(interval), Some(last)) => Some(last + interval),
            _ => Some(now),
        }
    }

    fn render_due(&self, now: Instant) -> bool {
        self.render_at(now).is_some_and(|at| at <= now)
    }

    fn timeout(&self, now: Instant) -> Duration {
        const IDLE_TIMEOUT: Duration = Duration::from_millis(250);
        let tick_at = self.tick_interval.map(|_| self.next_tick);
        [tick_at, self.render_at(now)]
            .into_iter()
            .flatten()
            .min()
            .map_or(IDLE_TIMEOUT, |at| at.saturating_duration_since(now))
    }
}
