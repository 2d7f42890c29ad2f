//! Drive a game to completion with automated shooters.

use log::debug;
use rand::rngs::SmallRng;

use crate::config::Mask;
use crate::engine::{Engine, GameSnapshot};
use crate::game::GameState;
use crate::ids::{GameId, PlayerId};
use crate::repository::GameRepository;
use crate::strategy::Targeting;

/// One automated seat: who fires and how it picks targets.
pub struct Shooter {
    pub player: PlayerId,
    pub targeting: Box<dyn Targeting>,
    fired: Mask,
    hits: Mask,
}

impl Shooter {
    pub fn new(player: PlayerId, targeting: Box<dyn Targeting>) -> Self {
        Self {
            player,
            targeting,
            fired: Mask::new(),
            hits: Mask::new(),
        }
    }

    /// Number of shots this seat has fired.
    pub fn shots(&self) -> usize {
        self.fired.count()
    }
}

/// Alternate shots between `shooters` until the game ends. Both fleets must
/// already be placed.
pub async fn play_out<R: GameRepository>(
    engine: &Engine<R>,
    game_id: GameId,
    shooters: &mut [Shooter; 2],
    rng: &mut SmallRng,
) -> anyhow::Result<GameSnapshot> {
    let game = engine.repository().game(game_id).await?;
    let starting = game
        .starting_player
        .ok_or_else(|| anyhow::anyhow!("game {} has not started", game_id))?;
    let mut current = shooters
        .iter()
        .position(|s| s.player == starting)
        .ok_or_else(|| anyhow::anyhow!("starting player {} has no shooter", starting))?;

    loop {
        let shooter = &mut shooters[current];
        let target = shooter
            .targeting
            .select_target(rng, &shooter.fired, &shooter.hits)
            .ok_or_else(|| anyhow::anyhow!("player {} has no cells left", shooter.player))?;
        let outcome = engine.submit_turn(shooter.player, target).await?;
        shooter.fired.set(target)?;
        if outcome.hit() {
            shooter.hits.set(target)?;
        }
        debug!(
            "autoplay: player {} turn {} at {} hit={}",
            shooter.player,
            outcome.turn.number,
            target,
            outcome.hit()
        );
        if matches!(outcome.state, GameState::Ended(_)) {
            break;
        }
        current = 1 - current;
    }
    Ok(engine.game_snapshot(game_id).await?)
}
