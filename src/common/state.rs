//! Global state machine.
//!
//! `Restarting` exists only to leave `InGame` for one frame so everything tagged
//! `DespawnOnExit(GameState::InGame)` is torn down and rebuilt on re-entry.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, States, Default)]
pub enum GameState {
    #[default]
    InGame,
    Restarting,
}
