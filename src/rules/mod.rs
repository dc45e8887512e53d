//! Game rules: the round state machine and the scoring table.

pub mod engine;
pub mod error;
pub mod scoring;

pub use engine::GameStateMachine;
pub use error::GameError;
pub use scoring::{ScoringRow, ScoringTable, STANDARD_ROWS};
