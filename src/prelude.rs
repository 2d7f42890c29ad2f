//! Commonly used types and utilities for ease of import.

pub use crate::{
    init_logging, Coord, Engine, EngineConfig, EngineError, GameOptions, GameRepository, GameState,
    InMemoryRepository, Orientation, PlacementError, ShipType, TurnOrderError, TurnOutcome,
    UserId,
};
