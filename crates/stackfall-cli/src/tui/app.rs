use crossterm::event::Event;
use ratatui::Frame;

use super::Runtime;

/// Application run by [`Runtime::run`].
pub trait App {
    /// Called once the terminal is set up, before the first event.
    ///
    /// Configure the tick interval and render mode here.
    fn init(&mut self, runtime: &mut Runtime);

    fn should_exit(&self) -> bool;

    /// Handles key input, resizes and other terminal events.
    fn handle_event(&mut self, runtime: &mut Runtime, event: &Event);

    fn draw(&self, frame: &mut Frame);

    /// Advances the application state (called on each tick).
    fn update(&mut self, runtime: &mut Runtime);
}
