use std::path::PathBuf;

use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;
use serde::Serialize;
use stackfall_engine::{FigureSeed, GameSession, GameStats, SessionSnapshot};

use crate::util;

use super::SessionConfigArg;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    #[clap(flatten)]
    config: SessionConfigArg,
    /// Number of clock polls to run (50 ms of game time each)
    #[arg(long, default_value_t = 10_000)]
    polls: usize,
    /// Seed of the random player's command choices
    #[arg(long, default_value_t = 0)]
    player_seed: u64,
    /// Output file path (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct SimulationReport<'a> {
    seed: Option<FigureSeed>,
    player_seed: u64,
    polls: usize,
    stats: &'a GameStats,
    snapshot: SessionSnapshot,
}

/// Commands the random player can issue on a single poll.
#[derive(Debug, Clone, Copy)]
enum PlayerMove {
    Idle,
    Left,
    Right,
    Rotate,
    SoftDrop,
}

impl PlayerMove {
    // idle is drawn more often so figures have time to fall under gravity
    const CHOICES: [Self; 8] = [
        Self::Idle,
        Self::Idle,
        Self::Idle,
        Self::Idle,
        Self::Left,
        Self::Right,
        Self::Rotate,
        Self::SoftDrop,
    ];

    fn apply(self, session: &mut GameSession) {
        match self {
            Self::Idle => {}
            Self::Left => _ = session.try_move_left(),
            Self::Right => _ = session.try_move_right(),
            Self::Rotate => _ = session.try_rotate(),
            Self::SoftDrop => _ = session.try_soft_drop(),
        }
    }
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let SimulateArg {
        config,
        polls,
        player_seed,
        output,
    } = arg;

    util::init_stderr_logger()?;
    let config = config.load()?;
    let seed = config.seed;
    let mut session = GameSession::new(config);
    let mut player = Pcg32::seed_from_u64(*player_seed);

    let mut elapsed_polls = 0;
    while elapsed_polls < *polls && !session.session_state().is_game_over() {
        let choice = PlayerMove::CHOICES[player.random_range(0..PlayerMove::CHOICES.len())];
        choice.apply(&mut session);
        session.tick();
        elapsed_polls += 1;
    }

    let stats = session.stats();
    log::info!(
        "simulation finished after {elapsed_polls} polls: score {}, level {}, {} lines",
        stats.score(),
        stats.level(),
        stats.cleared_lines()
    );

    let report = SimulationReport {
        seed,
        player_seed: *player_seed,
        polls: elapsed_polls,
        stats,
        snapshot: session.snapshot(),
    };
    util::save_json(&report, output.as_deref())?;
    Ok(())
}
