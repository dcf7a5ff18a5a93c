//! Stateful game logic built on top of [`crate::core`].
//!
//! - [`Spawner`] - Random shape and column for each new figure, plus the upcoming shape
//! - [`GameField`] - Falling figure and settled field; movement, rotation and settlement rules
//! - [`GameStats`] - Score, level and clear counts
//! - [`Progression`] - Score thresholds and per-level gravity intervals
//! - [`GameClock`] - Poll counting for gravity and wall-clock catch-up
//! - [`GameSession`] - Pause, game over and restart around a [`GameField`]
//! - [`SessionSnapshot`] - Plain copy of the session state for renderers
//!
//! # Game Flow
//!
//! 1. Create a [`GameSession`] from a [`GameConfig`]
//! 2. Every [`POLL_INTERVAL`], call [`GameSession::tick`]; gravity moves the figure down
//! 3. Between ticks, apply player commands (move, rotate, soft drop)
//! 4. A figure that cannot move down settles, full rows clear, the next figure spawns
//! 5. A figure that cannot move down while touching the top row ends the game
//!
//! All randomness comes from the [`RandomSource`] the session owns, so a seeded
//! [`FigureRng`] replays the same game for the same commands.

pub use self::{
    clock::*, game_field::*, game_stats::*, progression::*, random::*, session::*, snapshot::*,
    spawner::*,
};

mod clock;
mod game_field;
mod game_stats;
mod progression;
mod random;
mod session;
mod snapshot;
pub(crate) mod spawner;
