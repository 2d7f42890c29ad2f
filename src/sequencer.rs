//! Turn numbering and the alternating-turn ordering gate.
//!
//! Nothing here locks. Callers must hold the game's exclusive section from
//! numbering until the turn is committed.

use crate::common::TurnOrderError;
use crate::game::{Game, GameState, Turn};
use crate::geometry::{on_board, Coord};
use crate::ids::PlayerId;

/// One more than the highest number among `player_turns`, or 1 if empty.
pub fn next_turn_number<'a, I>(player_turns: I) -> u32
where
    I: IntoIterator<Item = &'a Turn>,
{
    player_turns
        .into_iter()
        .map(|t| t.number)
        .max()
        .unwrap_or(0)
        + 1
}

/// The most recent turn across both players.
///
/// Numbers are per player, so the starting player's turn `n` and the
/// opponent's turn `n` share a number; the opponent's is the later one.
pub fn latest_turn<'a>(turns: &'a [Turn], starting_player: Option<PlayerId>) -> Option<&'a Turn> {
    turns
        .iter()
        .max_by_key(|t| (t.number, Some(t.player) != starting_player))
}

/// Check that `submitter` may fire at `target` now. `turns` holds every turn
/// of the game, both players included.
pub fn validate_turn_order(
    game: &Game,
    submitter: PlayerId,
    turns: &[Turn],
    target: Coord,
) -> Result<(), TurnOrderError> {
    match game.state() {
        GameState::Forming | GameState::Placing => return Err(TurnOrderError::GameNotStarted),
        GameState::Ended(_) => return Err(TurnOrderError::GameEnded),
        GameState::Active => {}
    }
    match latest_turn(turns, game.starting_player) {
        None if game.starting_player != Some(submitter) => {
            return Err(TurnOrderError::NotStartingPlayerFirst)
        }
        Some(last) if last.player == submitter => return Err(TurnOrderError::OutOfTurn),
        _ => {}
    }
    if !on_board(target) {
        return Err(TurnOrderError::OffBoard(target));
    }
    if turns
        .iter()
        .any(|t| t.player == submitter && t.target == target)
    {
        return Err(TurnOrderError::RepeatedCoordinate(target));
    }
    Ok(())
}
