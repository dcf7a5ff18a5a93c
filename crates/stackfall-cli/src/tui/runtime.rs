use std::{io, time::Duration};

use crossterm::{
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute, terminal,
};
use ratatui::DefaultTerminal;

use super::{
    App,
    event::TuiEvent,
    event_loop::{EventLoop, RenderMode},
};

/// Owns the terminal session and dispatches events to an [`App`].
#[derive(Debug)]
pub struct Runtime {
    events: EventLoop,
    reports_key_release: bool,
}

impl Runtime {
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: EventLoop::new(),
            reports_key_release: false,
        }
    }

    /// Pass `None` to stop tick events.
    pub fn set_tick_interval(&mut self, interval: Option<Duration>) {
        self.events.set_tick_interval(interval);
    }

    pub fn set_render_mode(&mut self, mode: RenderMode) {
        self.events.set_render_mode(mode);
    }

    /// Whether the terminal sends key release (and repeat) events.
    #[must_use]
    pub fn reports_key_release(&self) -> bool {
        self.reports_key_release
    }

    /// Runs the application until [`App::should_exit`] returns `true`.
    ///
    /// Key release reporting is requested from terminals that support the keyboard
    /// enhancement protocol and switched off again on exit.
    pub fn run<A>(mut self, app: &mut A) -> io::Result<()>
    where
        A: App,
    {
        ratatui::run(|terminal| {
            self.reports_key_release = push_key_event_types();
            log::debug!("key release events: {}", self.reports_key_release);
            app.init(&mut self);

            let result = self.dispatch(terminal, app);

            if self.reports_key_release {
                _ = execute!(io::stdout(), PopKeyboardEnhancementFlags);
            }
            result
        })
    }
}

impl Runtime {
    fn dispatch<A>(&mut self, terminal: &mut DefaultTerminal, app: &mut A) -> io::Result<()>
    where
        A: App,
    {
        while !app.should_exit() {
            match self.events.next()? {
                TuiEvent::Tick => app.update(self),
                TuiEvent::Render => {
                    terminal.draw(|frame| app.draw(frame))?;
                }
                TuiEvent::Terminal(event) => app.handle_event(self, &event),
            }
        }
        Ok(())
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

fn push_key_event_types() -> bool {
    if !matches!(terminal::supports_keyboard_enhancement(), Ok(true)) {
        return false;
    }
    execute!(
        io::stdout(),
        PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
    )
    .is_ok()
}
