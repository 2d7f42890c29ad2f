//! Rule engine for two-player Battleship: placement validation, turn
//! sequencing, hit/sink/win detection and the per-game exclusive sections
//! that keep turn numbering consistent under concurrent requests.

mod autoplay;
mod bitboard;
mod combat;
mod common;
mod config;
mod engine;
mod game;
mod geometry;
mod ids;
mod locks;
mod logging;
mod placement;
pub mod prelude;
pub mod repository;
mod sequencer;
mod ship;
mod strategy;
mod view;

pub use autoplay::*;
pub use bitboard::{BitBoard, BitBoardError};
pub use combat::*;
pub use common::*;
pub use config::*;
pub use engine::*;
pub use game::*;
pub use geometry::*;
pub use ids::*;
pub use locks::{LockRegistry, SectionGuard};
pub use logging::init_logging;
pub use placement::*;
pub use repository::{GameRepository, InMemoryRepository};
pub use sequencer::*;
pub use ship::*;
pub use strategy::*;
pub use view::*;
