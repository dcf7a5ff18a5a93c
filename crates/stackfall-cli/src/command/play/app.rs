use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
};
use stackfall_engine::{GameSession, POLL_INTERVAL, SessionState};

use crate::{
    tui::{App, RenderMode, Runtime},
    view::widgets::{KeyBinding, KeyBindingDisplay, SessionDisplay},
};

const RENDER_INTERVAL: Duration = Duration::from_millis(16);

const PLAYING_KEYS: &[KeyBinding] = &[
    (&["←", "→"], "Move"),
    (&["↑", "Space"], "Rotate"),
    (&["↓"], "Drop"),
    (&["P"], "Pause"),
    (&["R"], "Restart"),
    (&["Q"], "Quit"),
];
const PAUSED_KEYS: &[KeyBinding] = &[(&["P"], "Resume"), (&["R"], "Restart"), (&["Q"], "Quit")];
const GAME_OVER_KEYS: &[KeyBinding] = &[(&["R"], "Restart"), (&["Q"], "Quit")];
const CONFIRM_KEYS: &[KeyBinding] = &[(&["Y", "Enter"], "Restart"), (&["N", "Esc"], "Cancel")];

#[derive(Debug)]
pub struct PlayApp {
    session: GameSession,
    confirm_restart: bool,
    reports_key_release: bool,
    last_update: Option<Instant>,
    is_exiting: bool,
}

impl PlayApp {
    pub fn new(session: GameSession) -> Self {
        Self {
            session,
            confirm_restart: false,
            reports_key_release: false,
            last_update: None,
            is_exiting: false,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    fn key_bindings(&self) -> &'static [KeyBinding<'static>] {
        if self.confirm_restart {
            return CONFIRM_KEYS;
        }
        match self.session.session_state() {
            SessionState::Playing => PLAYING_KEYS,
            SessionState::Paused => PAUSED_KEYS,
            SessionState::GameOver => GAME_OVER_KEYS,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.is_exiting = true;
            return;
        }
        if self.confirm_restart {
            self.handle_confirm_key(key);
            return;
        }
        if key.code == KeyCode::Down {
            self.handle_soft_drop_key(key.kind);
            return;
        }
        if key.is_release() {
            return;
        }

        match key.code {
            KeyCode::Left => _ = self.session.try_move_left(),
            KeyCode::Right => _ = self.session.try_move_right(),
            KeyCode::Up | KeyCode::Char(' ') => _ = self.session.try_rotate(),
            KeyCode::Char('p' | 'P') => self.session.toggle_pause(),
            KeyCode::Char('r' | 'R') => {
                self.session.soft_drop_stop();
                self.confirm_restart = true;
            }
            KeyCode::Char('q' | 'Q') | KeyCode::Esc => self.is_exiting = true,
            _ => {}
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) {
        if !key.is_press() {
            return;
        }
        match key.code {
            KeyCode::Char('y' | 'Y') | KeyCode::Enter => {
                self.session.restart();
                self.confirm_restart = false;
            }
            KeyCode::Char('n' | 'N') | KeyCode::Esc => self.confirm_restart = false,
            _ => {}
        }
    }

    /// Held soft drop when the terminal reports releases, one step per key event otherwise.
    fn handle_soft_drop_key(&mut self, kind: KeyEventKind) {
        match kind {
            KeyEventKind::Press if self.reports_key_release => self.session.soft_drop_start(),
            KeyEventKind::Press | KeyEventKind::Repeat if !self.reports_key_release => {
                _ = self.session.try_soft_drop();
            }
            KeyEventKind::Release => self.session.soft_drop_stop(),
            _ => {}
        }
    }
}

impl App for PlayApp {
    fn init(&mut self, runtime: &mut Runtime) {
        runtime.set_tick_interval(Some(POLL_INTERVAL));
        runtime.set_render_mode(RenderMode::Throttled(RENDER_INTERVAL));
        self.reports_key_release = runtime.reports_key_release();
        self.last_update = Some(Instant::now());
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, _runtime: &mut Runtime, event: &Event) {
        if let Some(key) = event.as_key_event() {
            self.handle_key(key);
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let [main_area, help_area] =
            Layout::vertical([Constraint::Length(24), Constraint::Length(1)])
                .areas::<2>(frame.area());
        frame.render_widget(
            SessionDisplay::new(&self.session).confirm_restart(self.confirm_restart),
            main_area,
        );
        frame.render_widget(KeyBindingDisplay::new(self.key_bindings()), help_area);
    }

    fn update(&mut self, _runtime: &mut Runtime) {
        let now = Instant::now();
        let elapsed = self
            .last_update
            .map_or(Duration::ZERO, |last| now.saturating_duration_since(last));
        self.last_update = Some(now);
        // the game is frozen while the restart prompt is open
        if !self.confirm_restart {
            self.session.advance(elapsed);
        }
    }
}

#[cfg(test)]
mod tests {
    use stackfall_engine::{Descent, FigureSeed, GameConfig};

    use super::*;

    fn app() -> PlayApp {
        PlayApp::new(GameSession::new(GameConfig {
            seed: Some(FigureSeed::from_bytes([7; 16])),
            ..GameConfig::default()
        }))
    }

    fn press(app: &mut PlayApp, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn top_row(app: &PlayApp) -> i32 {
        app.session
            .falling_figure()
            .cells()
            .iter()
            .map(|c| c.row)
            .min()
            .unwrap()
    }

    #[test]
    fn test_down_steps_without_release_events() {
        let mut app = app();
        let row = top_row(&app);
        press(&mut app, KeyCode::Down);
        app.handle_key(KeyEvent::new_with_kind(
            KeyCode::Down,
            KeyModifiers::NONE,
            KeyEventKind::Repeat,
        ));
        assert_eq!(top_row(&app), row + 2);
        assert!(!app.session.is_soft_drop_held());
    }

    #[test]
    fn test_down_holds_with_release_events() {
        let mut app = app();
        app.reports_key_release = true;
        let row = top_row(&app);
        press(&mut app, KeyCode::Down);
        assert!(app.session.is_soft_drop_held());
        assert_eq!(top_row(&app), row);
        app.handle_key(KeyEvent::new_with_kind(
            KeyCode::Down,
            KeyModifiers::NONE,
            KeyEventKind::Release,
        ));
        assert!(!app.session.is_soft_drop_held());
    }

    #[test]
    fn test_restart_needs_confirmation() {
        let mut app = app();
        while !matches!(app.session.try_soft_drop(), Ok(Descent::Settled { .. })) {}
        assert!(!app.session.settled().is_empty());

        press(&mut app, KeyCode::Char('r'));
        assert!(app.confirm_restart);
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Char('n'));
        assert!(!app.confirm_restart);
        assert!(!app.session.settled().is_empty());

        press(&mut app, KeyCode::Char('r'));
        press(&mut app, KeyCode::Char('y'));
        assert!(!app.confirm_restart);
        assert!(app.session.settled().is_empty());
        assert_eq!(app.session.score(), 0);
    }

    #[test]
    fn test_pause_and_quit() {
        let mut app = app();
        press(&mut app, KeyCode::Char('p'));
        assert!(app.session.session_state().is_paused());
        assert_eq!(app.key_bindings(), PAUSED_KEYS);

        let before = app.session.snapshot();
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.session.snapshot(), before);

        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_exit());
    }
}
