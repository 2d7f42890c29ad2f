//! Storage seam. The engine only talks to persistence through
//! [`GameRepository`]; [`InMemoryRepository`] backs tests and the CLI.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::common::RepositoryError;
use crate::game::{Game, Player, Turn};
use crate::ids::{GameId, PlayerId};
use crate::ship::Ship;

/// Persisted collections of games, players, ships and turns.
///
/// Implementations must enforce the uniqueness constraints noted on each
/// insert. Every call that takes a `game` stores it together with the new
/// records: either all of it is applied or none of it.
#[async_trait::async_trait]
pub trait GameRepository: Send + Sync {
    async fn insert_game(&self, game: Game) -> Result<(), RepositoryError>;
    async fn game(&self, id: GameId) -> Result<Game, RepositoryError>;
    /// Every game, oldest first.
    async fn games(&self) -> Result<Vec<Game>, RepositoryError>;

    /// Store `player` and its `game`, which may have moved to `Placing`.
    /// Unique per (game, user).
    async fn insert_player(&self, player: Player, game: &Game) -> Result<(), RepositoryError>;
    async fn player(&self, id: PlayerId) -> Result<Player, RepositoryError>;
    /// Players of `game` in join order.
    async fn players(&self, game: GameId) -> Result<Vec<Player>, RepositoryError>;

    /// Store `ships`, and `game` when a placement started it. Unique per
    /// (player, ship type), including within `ships`.
    async fn commit_ships(
        &self,
        ships: Vec<Ship>,
        game: Option<&Game>,
    ) -> Result<(), RepositoryError>;
    async fn ships(&self, player: PlayerId) -> Result<Vec<Ship>, RepositoryError>;

    /// Every turn of every player in `game`, in commit order.
    async fn turns(&self, game: GameId) -> Result<Vec<Turn>, RepositoryError>;
    /// Store `turn` and the updated `game` together. Unique per
    /// (player, number) and per (player, target).
    async fn commit_turn(&self, game: &Game, turn: Turn) -> Result<(), RepositoryError>;
}

#[derive(Default)]
struct Tables {
    games: HashMap<GameId, Game>,
    players: Vec<Player>,
    ships: Vec<Ship>,
    turns: Vec<Turn>,
}

impl Tables {
    fn player_ids(&self, game: GameId) -> Vec<PlayerId> {
        self.players
            .iter()
            .filter(|p| p.game == game)
            .map(|p| p.id)
            .collect()
    }

    fn require_game(&self, id: GameId) -> Result<(), RepositoryError> {
        if self.games.contains_key(&id) {
            Ok(())
        } else {
            Err(RepositoryError::GameNotFound(id))
        }
    }

    fn put_game(&mut self, game: &Game) -> Result<(), RepositoryError> {
        let slot = self
            .games
            .get_mut(&game.id)
            .ok_or(RepositoryError::GameNotFound(game.id))?;
        *slot = game.clone();
        Ok(())
    }
}

/// Process-local repository guarded by a single mutex.
///
/// The mutex only protects the tables for the duration of one call; it is not
/// the engine's per-game exclusive section.
#[derive(Default)]
pub struct InMemoryRepository {
    tables: Mutex<Tables>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait::async_trait]
impl GameRepository for InMemoryRepository {
    async fn insert_game(&self, game: Game) -> Result<(), RepositoryError> {
        let mut tables = self.tables();
        if tables.games.contains_key(&game.id) {
            return Err(RepositoryError::Conflict(format!("game {} exists", game.id)));
        }
        tables.games.insert(game.id, game);
        Ok(())
    }

    async fn game(&self, id: GameId) -> Result<Game, RepositoryError> {
        self.tables()
            .games
            .get(&id)
            .cloned()
            .ok_or(RepositoryError::GameNotFound(id))
    }

    async fn games(&self) -> Result<Vec<Game>, RepositoryError> {
        let mut games: Vec<Game> = self.tables().games.values().cloned().collect();
        games.sort_by_key(|g| g.created_at);
        Ok(games)
    }

    async fn insert_player(&self, player: Player, game: &Game) -> Result<(), RepositoryError> {
        let mut tables = self.tables();
        tables.require_game(player.game)?;
        if game.id != player.game {
            return Err(RepositoryError::Conflict(format!(
                "player {} belongs to game {}, not {}",
                player.id, player.game, game.id
            )));
        }
        if tables
            .players
            .iter()
            .any(|p| p.game == player.game && p.user == player.user)
        {
            return Err(RepositoryError::Conflict(format!(
                "user {} already in game {}",
                player.user, player.game
            )));
        }
        tables.put_game(game)?;
        tables.players.push(player);
        Ok(())
    }

    async fn player(&self, id: PlayerId) -> Result<Player, RepositoryError> {
        self.tables()
            .players
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(RepositoryError::PlayerNotFound(id))
    }

    async fn players(&self, game: GameId) -> Result<Vec<Player>, RepositoryError> {
        Ok(self
            .tables()
            .players
            .iter()
            .filter(|p| p.game == game)
            .cloned()
            .collect())
    }

    async fn commit_ships(
        &self,
        ships: Vec<Ship>,
        game: Option<&Game>,
    ) -> Result<(), RepositoryError> {
        let mut tables = self.tables();
        for (i, ship) in ships.iter().enumerate() {
            if !tables.players.iter().any(|p| p.id == ship.player) {
                return Err(RepositoryError::PlayerNotFound(ship.player));
            }
            if tables
                .ships
                .iter()
                .chain(&ships[..i])
                .any(|s| s.player == ship.player && s.ship_type == ship.ship_type)
            {
                return Err(RepositoryError::Conflict(format!(
                    "player {} already has a {}",
                    ship.player, ship.ship_type
                )));
            }
        }
        if let Some(game) = game {
            tables.put_game(game)?;
        }
        tables.ships.extend(ships);
        Ok(())
    }

    async fn ships(&self, player: PlayerId) -> Result<Vec<Ship>, RepositoryError> {
        Ok(self
            .tables()
            .ships
            .iter()
            .filter(|s| s.player == player)
            .cloned()
            .collect())
    }

    async fn turns(&self, game: GameId) -> Result<Vec<Turn>, RepositoryError> {
        let tables = self.tables();
        let players = tables.player_ids(game);
        Ok(tables
            .turns
            .iter()
            .filter(|t| players.contains(&t.player))
            .cloned()
            .collect())
    }

    async fn commit_turn(&self, game: &Game, turn: Turn) -> Result<(), RepositoryError> {
        let mut tables = self.tables();
        if !tables.player_ids(game.id).contains(&turn.player) {
            return Err(RepositoryError::PlayerNotFound(turn.player));
        }
        if let Some(clash) = tables.turns.iter().find(|t| {
            t.player == turn.player && (t.number == turn.number || t.target == turn.target)
        }) {
            return Err(RepositoryError::Conflict(format!(
                "turn {} at {} clashes with turn {} at {}",
                turn.number, turn.target, clash.number, clash.target
            )));
        }
        tables.put_game(game)?;
        tables.turns.push(turn);
        Ok(())
    }
}
