use serde::{Deserialize, Serialize};

use crate::bitboard::BitBoard;
use crate::ship::ShipType;

pub const BOARD_SIZE: u8 = 10;
pub const SHIPS_PER_PLAYER: usize = ShipType::ALL.len();
pub const PLAYERS_PER_GAME: usize = 2;

/// Total number of ship segments in one fleet.
pub const TOTAL_FLEET_CELLS: usize = fleet_cells(&ShipType::ALL);

const fn fleet_cells(types: &[ShipType]) -> usize {
    let mut total = 0;
    let mut i = 0;
    while i < types.len() {
        total += types[i].length();
        i += 1;
    }
    total
}

/// Default cap for the random placement generate-and-test loop.
pub const DEFAULT_MAX_PLACEMENT_ATTEMPTS: u32 = 1_000;

/// Cell mask sized for the standard board.
pub type Mask = BitBoard<u128, { BOARD_SIZE as usize }>;

/// How the starting player is chosen when a game becomes active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartingPlayerPolicy {
    /// The player who joined first always opens.
    FirstJoined,
    /// A coin flip from the engine RNG.
    #[default]
    Random,
}

/// Engine-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub starting_player: StartingPlayerPolicy,
    pub max_placement_attempts: u32,
    /// Fixed RNG seed for reproducible games.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            starting_player: StartingPlayerPolicy::default(),
            max_placement_attempts: DEFAULT_MAX_PLACEMENT_ATTEMPTS,
            seed: None,
        }
    }
}

impl EngineConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_starting_player(mut self, policy: StartingPlayerPolicy) -> Self {
        self.starting_player = policy;
        self
    }

    pub fn with_max_placement_attempts(mut self, attempts: u32) -> Self {
        self.max_placement_attempts = attempts;
        self
    }
}
