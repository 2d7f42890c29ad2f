//! Error types shared by the engine components.

use thiserror::Error;

use crate::game::GameState;
use crate::geometry::Coord;
use crate::ids::{GameId, PlayerId, UserId};
use crate::ship::ShipType;

/// Reasons a ship placement is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("ship placement is out of bounds")]
    OutOfBounds,
    #[error("a {0} is already placed for this player")]
    DuplicateType(ShipType),
    #[error("ship placement overlaps with another ship")]
    Overlap,
    #[error("ships cannot be placed once the game has started")]
    GameAlreadyStarted,
    #[error("no valid position for {ship_type} after {attempts} attempts")]
    PlacementExhausted { ship_type: ShipType, attempts: u32 },
}

/// Reasons a turn is rejected before combat is resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TurnOrderError {
    #[error("game has not started")]
    GameNotStarted,
    #[error("game has already ended")]
    GameEnded,
    #[error("the starting player must take the first turn")]
    NotStartingPlayerFirst,
    #[error("it is the opponent's turn")]
    OutOfTurn,
    #[error("already fired at {0}")]
    RepeatedCoordinate(Coord),
    #[error("target {0} is off the board")]
    OffBoard(Coord),
}

/// A lifecycle transition attempted from a state that does not allow it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot {event} while game is {from}")]
pub struct InvalidTransition {
    pub from: GameState,
    pub event: &'static str,
}

/// Reasons a user cannot take a seat in a game.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinError {
    #[error("game already has two players")]
    GameFull,
    #[error("user {0} already plays in this game")]
    AlreadyJoined(UserId),
    #[error("game has already started")]
    GameStarted,
}

/// Failures reported by a [`GameRepository`](crate::repository::GameRepository).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("game {0} not found")]
    GameNotFound(GameId),
    #[error("player {0} not found")]
    PlayerNotFound(PlayerId),
    #[error("conflicting record: {0}")]
    Conflict(String),
}

/// Any failure surfaced by the [`Engine`](crate::engine::Engine).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Placement(#[from] PlacementError),
    #[error(transparent)]
    TurnOrder(#[from] TurnOrderError),
    #[error(transparent)]
    InvalidTransition(#[from] InvalidTransition),
    #[error(transparent)]
    Join(#[from] JoinError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("player {0} has no opponent")]
    NoOpponent(PlayerId),
}
