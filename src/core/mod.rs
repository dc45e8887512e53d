//! Core types: game state, actions, RNG, configuration.

pub mod rng;
pub mod config;
pub mod action;
pub mod state;

pub use rng::GameRng;
pub use config::{GameConfig, PhasePolicy};
pub use action::{Action, ActionParseError, CardChoice, Direction};
pub use state::{Difficulty, GameState, LaneTally, Phase, ResourcePool, UnknownDifficulty};
