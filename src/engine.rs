//! The engine service: the operations exposed to the request layer.
//!
//! Every mutating call runs inside a keyed exclusive section. Turn submission
//! holds the game's section from numbering to commit; placements hold the
//! player's section and also take the game's section for the batch that
//! completes a fleet. Sections are always taken player first, then game.
//! Each request ends in a single repository write.

use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::combat::{self, is_defeated, shot_mask, sunk_ships};
use crate::common::{EngineError, JoinError, PlacementError};
use crate::config::{EngineConfig, PLAYERS_PER_GAME, SHIPS_PER_PLAYER};
use crate::game::{
    choose_starting_player, evaluate_end, Game, GameOptions, GameState, Player, SeatStatus, Turn,
};
use crate::geometry::{Coord, Orientation};
use crate::ids::{GameId, PlayerId, ShipId, TurnId, UserId};
use crate::locks::LockRegistry;
use crate::placement::{missing_types, random_placement, validate_placement};
use crate::repository::GameRepository;
use crate::sequencer::{next_turn_number, validate_turn_order};
use crate::ship::{Ship, ShipType};
use crate::view::BoardView;

/// What a successful turn submission produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnOutcome {
    /// The committed turn, carrying its number, `hit` and `sunk_ship`.
    pub turn: Turn,
    /// Game state after the turn, `Ended` if it decided the game.
    pub state: GameState,
}

impl TurnOutcome {
    pub fn hit(&self) -> bool {
        self.turn.hit
    }

    pub fn sunk_ship(&self) -> Option<ShipId> {
        self.turn.sunk_ship
    }
}

/// Per-player part of a [`GameSnapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub id: PlayerId,
    pub user: UserId,
    pub joined_at: DateTime<Utc>,
    pub ships: Vec<ShipType>,
    /// Ships whose every cell the opponent has hit, announced or not.
    pub sunk: Vec<ShipType>,
    pub turns_taken: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub id: GameId,
    pub state: GameState,
    pub players: Vec<PlayerSummary>,
    pub created_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
    pub winner: Option<PlayerId>,
    pub is_draw: bool,
    pub starting_player: Option<PlayerId>,
    pub announce_sinking: bool,
    pub allow_draw: bool,
}

pub struct Engine<R: GameRepository> {
    repo: R,
    config: EngineConfig,
    rng: Mutex<SmallRng>,
    game_locks: LockRegistry<GameId>,
    player_locks: LockRegistry<PlayerId>,
}

impl<R: GameRepository> Engine<R> {
    pub fn new(repo: R, config: EngineConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_rng(&mut rand::rng()),
        };
        Self {
            repo,
            config,
            rng: Mutex::new(rng),
            game_locks: LockRegistry::new(),
            player_locks: LockRegistry::new(),
        }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn with_rng<T>(&self, f: impl FnOnce(&mut SmallRng) -> T) -> T {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut rng)
    }

    pub async fn create_game(&self, options: GameOptions) -> Result<Game, EngineError> {
        let game = Game::new(options, Utc::now());
        self.repo.insert_game(game.clone()).await?;
        info!(
            "game {} created (announce_sinking={}, allow_draw={})",
            game.id, game.announce_sinking, game.allow_draw
        );
        Ok(game)
    }

    /// Seat `user` in `game`. The second seat moves the game to `Placing`.
    pub async fn join_game(&self, game_id: GameId, user: UserId) -> Result<Player, EngineError> {
        let _section = self.game_locks.acquire(game_id).await;
        let mut game = self.repo.game(game_id).await?;
        match game.state() {
            GameState::Forming => {}
            GameState::Placing => return Err(JoinError::GameFull.into()),
            _ => return Err(JoinError::GameStarted.into()),
        }
        let players = self.repo.players(game_id).await?;
        if players.iter().any(|p| p.user == user) {
            return Err(JoinError::AlreadyJoined(user).into());
        }
        if players.len() >= PLAYERS_PER_GAME {
            return Err(JoinError::GameFull.into());
        }
        let player = Player::new(game_id, user, Utc::now());
        if players.len() + 1 == PLAYERS_PER_GAME {
            game.seat_complete()?;
        }
        self.repo.insert_player(player.clone(), &game).await?;
        info!("user {} joined game {} as player {}", user, game_id, player.id);
        if game.state() == GameState::Placing {
            info!("game {} is {}", game_id, game.state());
        }
        Ok(player)
    }

    /// Validate and store one ship for `player_id`.
    pub async fn place_ship(
        &self,
        player_id: PlayerId,
        ship_type: ShipType,
        anchor: Coord,
        orientation: Orientation,
    ) -> Result<Ship, EngineError> {
        let player = self.repo.player(player_id).await?;
        let _section = self.player_locks.acquire(player_id).await;
        let game = self.repo.game(player.game).await?;
        let fleet = self.repo.ships(player_id).await?;
        let ship = Ship::new(player_id, ship_type, anchor, orientation);
        if let Err(e) = validate_placement(&fleet, &ship, game.has_started()) {
            debug!("player {} placement of {} rejected: {}", player_id, ship, e);
            if fleet.len() == SHIPS_PER_PLAYER && !game.has_started() {
                self.commit_placement(&player, &fleet, Vec::new()).await?;
            }
            return Err(e.into());
        }
        self.commit_placement(&player, &fleet, vec![ship.clone()]).await?;
        debug!("player {} placed {}", player_id, ship);
        Ok(ship)
    }

    /// Place every ship type `player_id` is still missing at random.
    ///
    /// All positions are found before anything is stored; when one type
    /// exhausts its attempts nothing is placed.
    pub async fn auto_place(&self, player_id: PlayerId) -> Result<Vec<Ship>, EngineError> {
        let player = self.repo.player(player_id).await?;
        let _section = self.player_locks.acquire(player_id).await;
        let game = self.repo.game(player.game).await?;
        if game.has_started() {
            return Err(PlacementError::GameAlreadyStarted.into());
        }
        let fleet = self.repo.ships(player_id).await?;
        let attempts = self.config.max_placement_attempts;
        let mut planned = fleet.clone();
        for ship_type in missing_types(&fleet) {
            let (anchor, orientation) = self
                .with_rng(|rng| random_placement(rng, &planned, player_id, ship_type, attempts))
                .inspect_err(|e| warn!("player {}: {}", player_id, e))?;
            planned.push(Ship::new(player_id, ship_type, anchor, orientation));
        }
        let placed = planned.split_off(fleet.len());
        self.commit_placement(&player, &fleet, placed.clone()).await?;
        for ship in &placed {
            debug!("player {} auto-placed {}", player_id, ship);
        }
        Ok(placed)
    }

    /// Store `ships` on top of `player`'s current `fleet`.
    ///
    /// A batch that completes the fleet is stored under the game's section,
    /// and when the opponent's fleet is complete as well the `Placing →
    /// Active` transition goes into the same repository call.
    async fn commit_placement(
        &self,
        player: &Player,
        fleet: &[Ship],
        ships: Vec<Ship>,
    ) -> Result<(), EngineError> {
        if fleet.len() + ships.len() < SHIPS_PER_PLAYER {
            self.repo.commit_ships(ships, None).await?;
            return Ok(());
        }
        let _section = self.game_locks.acquire(player.game).await;
        let mut game = self.repo.game(player.game).await?;
        let seats = <[Player; 2]>::try_from(self.repo.players(game.id).await?).ok();
        let starting = match seats {
            Some(seats) if game.state() == GameState::Placing => {
                let mut ready = true;
                for p in seats.iter().filter(|p| p.id != player.id) {
                    ready &= self.repo.ships(p.id).await?.len() == SHIPS_PER_PLAYER;
                }
                let policy = self.config.starting_player;
                ready.then(|| self.with_rng(|rng| choose_starting_player(policy, &seats, rng)))
            }
            _ => None,
        };
        match starting {
            Some(starting) => {
                game.start(starting, Utc::now())?;
                self.repo.commit_ships(ships, Some(&game)).await?;
                info!("game {} started, player {} opens", game.id, starting);
            }
            None => self.repo.commit_ships(ships, None).await?,
        }
        Ok(())
    }

    /// Number, validate, resolve and commit one shot as a single unit.
    pub async fn submit_turn(
        &self,
        player_id: PlayerId,
        target: Coord,
    ) -> Result<TurnOutcome, EngineError> {
        let player = self.repo.player(player_id).await?;
        let _section = self.game_locks.acquire(player.game).await;

        let mut game = self.repo.game(player.game).await?;
        let turns = self.repo.turns(game.id).await?;
        if let Err(e) = validate_turn_order(&game, player_id, &turns, target) {
            debug!("player {} turn at {} rejected: {}", player_id, target, e);
            return Err(e.into());
        }
        let players = <[Player; 2]>::try_from(self.repo.players(game.id).await?)
            .map_err(|_| EngineError::NoOpponent(player_id))?;
        let opponent = if players[0].id == player_id {
            &players[1]
        } else {
            &players[0]
        };
        let opponent_fleet = self.repo.ships(opponent.id).await?;
        let own_fleet = self.repo.ships(player_id).await?;

        let prior_shots: Vec<Coord> = turns
            .iter()
            .filter(|t| t.player == player_id)
            .map(|t| t.target)
            .collect();
        let number = next_turn_number(turns.iter().filter(|t| t.player == player_id));
        let strike = combat::resolve(&game, &opponent_fleet, &prior_shots, target)?;
        let now = Utc::now();
        let turn = Turn {
            id: TurnId::new(),
            player: player_id,
            number,
            target,
            hit: strike.hit,
            sunk_ship: strike.sunk_ship,
            created_at: now,
        };

        let seat = |p: &Player| {
            let fleet = if p.id == player_id {
                &own_fleet
            } else {
                &opponent_fleet
            };
            let opponent_targets = turns
                .iter()
                .chain([&turn])
                .filter(|t| t.player != p.id)
                .map(|t| &t.target);
            SeatStatus {
                player: p.id,
                defeated: is_defeated(fleet, &shot_mask(opponent_targets)),
                turns_taken: turns.iter().chain([&turn]).filter(|t| t.player == p.id).count(),
            }
        };
        let seats = [seat(&players[0]), seat(&players[1])];
        if let Some(result) = evaluate_end(game.allow_draw, &seats) {
            game.finish(result, now)?;
        }

        self.repo.commit_turn(&game, turn.clone()).await?;
        debug!(
            "player {} turn {} at {}: hit={} sunk={:?}",
            player_id, number, target, turn.hit, turn.sunk_ship
        );
        if game.has_ended() {
            info!("game {} {}", game.id, game.state());
        }
        Ok(TurnOutcome {
            turn,
            state: game.state(),
        })
    }

    pub async fn game_snapshot(&self, game_id: GameId) -> Result<GameSnapshot, EngineError> {
        let game = self.repo.game(game_id).await?;
        self.snapshot_of(game).await
    }

    async fn snapshot_of(&self, game: Game) -> Result<GameSnapshot, EngineError> {
        let turns = self.repo.turns(game.id).await?;
        let mut players = Vec::new();
        for p in self.repo.players(game.id).await? {
            let ships = self.repo.ships(p.id).await?;
            let opponent_shots =
                shot_mask(turns.iter().filter(|t| t.player != p.id).map(|t| &t.target));
            players.push(PlayerSummary {
                id: p.id,
                user: p.user,
                joined_at: p.joined_at,
                ships: ships.iter().map(|s| s.ship_type).collect(),
                sunk: sunk_ships(&ships, &opponent_shots)
                    .into_iter()
                    .map(|s| s.ship_type)
                    .collect(),
                turns_taken: turns.iter().filter(|t| t.player == p.id).count(),
            });
        }
        Ok(GameSnapshot {
            id: game.id,
            state: game.state(),
            players,
            created_at: game.created_at,
            started_at: game.started_at,
            ended_at: game.ended_at,
            winner: game.winner(),
            is_draw: game.is_draw(),
            starting_player: game.starting_player,
            announce_sinking: game.announce_sinking,
            allow_draw: game.allow_draw,
        })
    }

    /// Snapshots of every game, oldest first.
    pub async fn list_games(&self) -> Result<Vec<GameSnapshot>, EngineError> {
        let mut snapshots = Vec::new();
        for game in self.repo.games().await? {
            snapshots.push(self.snapshot_of(game).await?);
        }
        Ok(snapshots)
    }

    /// `player_id`'s ships overlaid with `opponent_id`'s shots.
    pub async fn board_view(
        &self,
        player_id: PlayerId,
        opponent_id: PlayerId,
    ) -> Result<BoardView, EngineError> {
        let player = self.repo.player(player_id).await?;
        let opponent = self.repo.player(opponent_id).await?;
        if opponent.game != player.game || opponent.id == player.id {
            return Err(EngineError::NoOpponent(player_id));
        }
        let fleet = self.repo.ships(player_id).await?;
        let opponent_turns: Vec<Turn> = self
            .repo
            .turns(player.game)
            .await?
            .into_iter()
            .filter(|t| t.player == opponent_id)
            .collect();
        Ok(BoardView::project(&fleet, &opponent_turns))
    }

    /// The other seat in `player_id`'s game, if it is taken.
    pub async fn opponent_of(&self, player_id: PlayerId) -> Result<Option<Player>, EngineError> {
        let player = self.repo.player(player_id).await?;
        Ok(self
            .repo
            .players(player.game)
            .await?
            .into_iter()
            .find(|p| p.id != player_id))
    }
}
