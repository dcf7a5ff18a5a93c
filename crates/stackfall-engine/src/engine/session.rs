use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    MoveRejected,
    core::{
        figure::{Figure, FigureKind},
        settled_field::SettledField,
    },
};

use super::{
    clock::GameClock,
    game_field::{Descent, GameField},
    game_stats::GameStats,
    progression::Progression,
    random::{FigureRng, FigureSeed, RandomSource},
    snapshot::SessionSnapshot,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    Playing,
    Paused,
    GameOver,
}

/// Everything needed to start a session.
///
/// Without a seed, the figure sequence is seeded randomly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub progression: Progression,
    pub seed: Option<FigureSeed>,
}

/// A single game from the first spawn to game over, and across restarts.
///
/// Owns all mutable game state. Front-ends submit commands, drive [`GameSession::tick`]
/// (or [`GameSession::advance`]) from their timer, and read back a [`SessionSnapshot`].
///
/// Commands are ignored while paused or after game over, with two exceptions:
/// [`GameSession::restart`] always takes effect, and [`GameSession::toggle_pause`] works
/// unless the game is over.
///
/// # Example
///
/// ```
/// use stackfall_engine::{FigureSeed, GameConfig, GameSession};
///
/// let config = GameConfig {
///     seed: Some(FigureSeed::from_bytes([42; 16])),
///     ..GameConfig::default()
/// };
/// let mut session = GameSession::new(config);
/// _ = session.try_move_left();
/// _ = session.try_rotate();
/// for _ in 0..100 {
///     session.tick();
/// }
///
/// session.toggle_pause();
/// assert!(session.session_state().is_paused());
/// assert!(session.try_move_right().is_err());
/// ```
#[derive(Debug, Clone)]
pub struct GameSession<R = FigureRng> {
    field: GameField<R>,
    stats: GameStats,
    progression: Progression,
    clock: GameClock,
    session_state: SessionState,
    soft_drop_held: bool,
}

impl GameSession<FigureRng> {
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        let rng = config
            .seed
            .map_or_else(FigureRng::new, FigureRng::with_seed);
        Self::with_random(rng, config.progression)
    }
}

impl<R> GameSession<R>
where
    R: RandomSource,
{
    /// Creates a session drawing figures from the given source.
    #[must_use]
    pub fn with_random(rng: R, progression: Progression) -> Self {
        Self::from_field(GameField::new(rng), progression)
    }

    /// Starts playing on an existing field, keeping its settled cells and falling figure.
    #[must_use]
    pub fn from_field(field: GameField<R>, progression: Progression) -> Self {
        log::info!(
            "session started with {}",
            field.falling_figure().kind().as_char()
        );
        Self {
            field,
            stats: GameStats::new(),
            progression,
            clock: GameClock::new(),
            session_state: SessionState::Playing,
            soft_drop_held: false,
        }
    }

    #[must_use]
    pub fn field(&self) -> &GameField<R> {
        &self.field
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn progression(&self) -> &Progression {
        &self.progression
    }

    #[must_use]
    pub fn session_state(&self) -> SessionState {
        self.session_state
    }

    #[must_use]
    pub fn falling_figure(&self) -> &Figure {
        self.field.falling_figure()
    }

    #[must_use]
    pub fn settled(&self) -> &SettledField {
        self.field.settled()
    }

    #[must_use]
    pub fn next_kind(&self) -> FigureKind {
        self.field.next_kind()
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.stats.score()
    }

    #[must_use]
    pub fn level(&self) -> usize {
        self.stats.level()
    }

    #[must_use]
    pub fn is_soft_drop_held(&self) -> bool {
        self.soft_drop_held
    }

    /// Gravity interval at the current level.
    #[must_use]
    pub fn gravity_interval(&self) -> Duration {
        self.progression.gravity_interval(self.stats.level())
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        let figure = self.field.falling_figure();
        SessionSnapshot {
            figure_kind: figure.kind(),
            figure_cells: *figure.cells(),
            settled: self.field.settled().clone(),
            score: self.stats.score(),
            level: self.stats.level(),
            paused: self.session_state.is_paused(),
            game_over: self.session_state.is_game_over(),
            next_kind: self.field.next_kind(),
        }
    }

    pub fn toggle_pause(&mut self) {
        self.session_state = match self.session_state {
            SessionState::Playing => SessionState::Paused,
            SessionState::Paused => SessionState::Playing,
            SessionState::GameOver => SessionState::GameOver, // No change from game over
        };
        if !self.session_state.is_game_over() {
            log::info!("session {:?}", self.session_state);
        }
    }

    /// Discards the current game and starts over: empty field, fresh figure, score 0, level 1.
    pub fn restart(&mut self) {
        self.field.reset();
        self.stats = GameStats::new();
        self.clock.reset();
        self.soft_drop_held = false;
        self.session_state = SessionState::Playing;
        log::info!(
            "session restarted with {}",
            self.field.falling_figure().kind().as_char()
        );
    }

    pub fn try_move_left(&mut self) -> Result<(), MoveRejected> {
        self.ensure_playing()?;
        self.field
            .try_move_left()
            .inspect_err(|_| log::trace!("move left rejected"))
    }

    pub fn try_move_right(&mut self) -> Result<(), MoveRejected> {
        self.ensure_playing()?;
        self.field
            .try_move_right()
            .inspect_err(|_| log::trace!("move right rejected"))
    }

    pub fn try_rotate(&mut self) -> Result<(), MoveRejected> {
        self.ensure_playing()?;
        self.field
            .try_rotate()
            .inspect_err(|_| log::trace!("rotation rejected"))
    }

    /// Moves the falling figure down one row right now, as gravity would.
    pub fn try_soft_drop(&mut self) -> Result<Descent, MoveRejected> {
        self.ensure_playing()?;
        Ok(self.step_down())
    }

    /// Starts continuous soft drop: one extra step on every tick until stopped.
    pub fn soft_drop_start(&mut self) {
        if self.session_state.is_playing() {
            self.soft_drop_held = true;
        }
    }

    /// Stops continuous soft drop. Releasing is accepted in any state.
    pub fn soft_drop_stop(&mut self) {
        self.soft_drop_held = false;
    }

    /// Runs one clock poll.
    ///
    /// While soft drop is held the figure steps down on every poll. Gravity steps it down
    /// once per gravity interval of the current level. Nothing happens unless playing.
    pub fn tick(&mut self) {
        if !self.session_state.is_playing() {
            return;
        }
        if self.soft_drop_held {
            self.step_down();
        }
        let gravity_interval = self.gravity_interval();
        if self.clock.poll(gravity_interval) && self.session_state.is_playing() {
            log::trace!("gravity step after {gravity_interval:?}");
            self.step_down();
        }
    }

    /// Runs as many ticks as fit in the elapsed wall-clock time.
    ///
    /// # Returns
    ///
    /// The number of ticks run.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        let polls = self.clock.elapsed_polls(elapsed);
        for _ in 0..polls {
            self.tick();
        }
        polls
    }

    fn ensure_playing(&self) -> Result<(), MoveRejected> {
        if self.session_state.is_playing() {
            Ok(())
        } else {
            log::trace!("command ignored while {:?}", self.session_state);
            Err(MoveRejected)
        }
    }

    fn step_down(&mut self) -> Descent {
        let descent = self.field.advance_down();
        match descent {
            Descent::Moved => {}
            Descent::Settled { cleared_lines } => {
                let level_up = self
                    .stats
                    .record_settlement(cleared_lines, &self.progression);
                if cleared_lines > 0 {
                    log::info!(
                        "cleared {cleared_lines} lines, score {}",
                        self.stats.score()
                    );
                }
                if let Some(level) = level_up {
                    log::info!(
                        "level {level}, gravity interval {:?}",
                        self.gravity_interval()
                    );
                }
            }
            Descent::ToppedOut => {
                self.session_state = SessionState::GameOver;
                self.soft_drop_held = false;
                log::info!(
                    "game over: score {}, level {}, {} figures settled",
                    self.stats.score(),
                    self.stats.level(),
                    self.stats.settled_figures()
                );
            }
        }
        descent
    }
}
