//! Errors returned by state transitions.
//!
//! A failed transition never changes the state it was given.

use thiserror::Error;

use crate::cards::{DeckExhausted, DeckKind};
use crate::core::Phase;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    /// A draw ran past the end of a deck order. Treated as game over.
    #[error(transparent)]
    DeckExhausted(#[from] DeckExhausted),

    /// No scoring row exists for this round. Treated as game over.
    #[error("no scoring row for round {round}")]
    ScoringTableExhausted { round: u32 },

    /// Rejected under `PhasePolicy::Strict`.
    #[error("{action} is not allowed during {phase}")]
    OutOfPhase { action: &'static str, phase: Phase },

    /// A deck order names a card the library does not have.
    #[error("{deck} card {index} is not in the card library")]
    UnknownCard { deck: DeckKind, index: usize },
}

impl GameError {
    /// Whether this error means the game cannot continue.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        matches!(self, GameError::DeckExhausted(_) | GameError::ScoringTableExhausted { .. })
    }
}
