//! Game records and the lifecycle state machine.
//!
//! A game moves through `Forming → Placing → Active → Ended`. The state is
//! stored explicitly on [`Game`] and only changes through the guarded
//! transition methods below; timestamps are stamped by those same methods so
//! they cannot drift from the state.

use core::fmt;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::common::InvalidTransition;
use crate::config::StartingPlayerPolicy;
use crate::geometry::Coord;
use crate::ids::{GameId, PlayerId, ShipId, TurnId, UserId};

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameResult {
    Won(PlayerId),
    Draw,
}

/// Lifecycle state of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameState {
    /// Waiting for the second player.
    Forming,
    /// Both players seated, fleets incomplete.
    Placing,
    /// Fleets complete, turns are accepted.
    Active,
    Ended(GameResult),
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameState::Forming => f.write_str("forming"),
            GameState::Placing => f.write_str("placing"),
            GameState::Active => f.write_str("active"),
            GameState::Ended(GameResult::Won(p)) => write!(f, "ended (won by {})", p),
            GameState::Ended(GameResult::Draw) => f.write_str("ended (draw)"),
        }
    }
}

/// Per-game rule switches chosen at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameOptions {
    /// Reveal the sunk ship on the sinking turn.
    pub announce_sinking: bool,
    /// Let the trailing player answer a fleet-clearing shot for a draw.
    pub allow_draw: bool,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            announce_sinking: true,
            allow_draw: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub created_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
    pub announce_sinking: bool,
    pub allow_draw: bool,
    pub starting_player: Option<PlayerId>,
    state: GameState,
}

impl Game {
    pub fn new(options: GameOptions, now: DateTime<Utc>) -> Self {
        Self {
            id: GameId::new(),
            created_at: now,
            started_at: None,
            ended_at: None,
            announce_sinking: options.announce_sinking,
            allow_draw: options.allow_draw,
            starting_player: None,
            state: GameState::Forming,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// True once the game is active or ended.
    pub fn has_started(&self) -> bool {
        matches!(self.state, GameState::Active | GameState::Ended(_))
    }

    pub fn has_ended(&self) -> bool {
        matches!(self.state, GameState::Ended(_))
    }

    pub fn winner(&self) -> Option<PlayerId> {
        match self.state {
            GameState::Ended(GameResult::Won(p)) => Some(p),
            _ => None,
        }
    }

    pub fn is_draw(&self) -> bool {
        self.state == GameState::Ended(GameResult::Draw)
    }

    /// `Forming → Placing`, once the second player has joined.
    pub fn seat_complete(&mut self) -> Result<(), InvalidTransition> {
        self.expect(GameState::Forming, "close seating")?;
        self.state = GameState::Placing;
        Ok(())
    }

    /// `Placing → Active`, once both fleets are complete.
    pub fn start(
        &mut self,
        starting_player: PlayerId,
        now: DateTime<Utc>,
    ) -> Result<(), InvalidTransition> {
        self.expect(GameState::Placing, "start")?;
        self.state = GameState::Active;
        self.started_at = Some(now);
        self.starting_player = Some(starting_player);
        Ok(())
    }

    /// `Active → Ended`. `ended_at` is written exactly once, here.
    pub fn finish(&mut self, result: GameResult, now: DateTime<Utc>) -> Result<(), InvalidTransition> {
        self.expect(GameState::Active, "finish")?;
        self.state = GameState::Ended(result);
        self.ended_at = Some(now);
        Ok(())
    }

    /// Fails unless the game accepts combat.
    pub fn ensure_active(&self, event: &'static str) -> Result<(), InvalidTransition> {
        self.expect(GameState::Active, event)
    }

    fn expect(&self, wanted: GameState, event: &'static str) -> Result<(), InvalidTransition> {
        if self.state == wanted {
            Ok(())
        } else {
            Err(InvalidTransition {
                from: self.state,
                event,
            })
        }
    }
}

/// A seat in a game held by an external user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub game: GameId,
    pub user: UserId,
    pub joined_at: DateTime<Utc>,
}

impl Player {
    pub fn new(game: GameId, user: UserId, now: DateTime<Utc>) -> Self {
        Self {
            id: PlayerId::new(),
            game,
            user,
            joined_at: now,
        }
    }
}

/// One shot fired by a player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub id: TurnId,
    pub player: PlayerId,
    /// 1-based, gapless per player.
    pub number: u32,
    pub target: Coord,
    pub hit: bool,
    pub sunk_ship: Option<ShipId>,
    pub created_at: DateTime<Utc>,
}

/// Fleet status of one seat, as seen after a resolved turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeatStatus {
    pub player: PlayerId,
    pub defeated: bool,
    pub turns_taken: usize,
}

/// Decide whether the game ends. `seats` must be in join order, which is the
/// tie-break when draws are disallowed.
///
/// With draws allowed, a single defeat only ends the game once both players
/// have taken the same number of turns; until then the trailing player still
/// has a shot to answer with.
pub fn evaluate_end(allow_draw: bool, seats: &[SeatStatus; 2]) -> Option<GameResult> {
    let [first, second] = seats;
    let opponent_of = |seat: &SeatStatus| {
        if seat.player == first.player {
            second.player
        } else {
            first.player
        }
    };
    let loser = match (first.defeated, second.defeated) {
        (false, false) => return None,
        (true, true) if allow_draw => return Some(GameResult::Draw),
        (true, _) => first,
        (false, true) => second,
    };
    if !allow_draw || first.turns_taken == second.turns_taken {
        Some(GameResult::Won(opponent_of(loser)))
    } else {
        None
    }
}

/// Pick who opens. `players` must be in join order.
pub fn choose_starting_player<R: Rng>(
    policy: StartingPlayerPolicy,
    players: &[Player; 2],
    rng: &mut R,
) -> PlayerId {
    match policy {
        StartingPlayerPolicy::FirstJoined => players[0].id,
        StartingPlayerPolicy::Random => {
            if rng.random() {
                players[0].id
            } else {
                players[1].id
            }
        }
    }
}
