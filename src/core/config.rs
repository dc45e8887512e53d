//! Game configuration.
//!
//! `GameConfig::default()` is the standard game: one ongoing stone, the
//! six-round scoring table, and advisory phases. Variants are built with the
//! `with_*` methods.

use serde::{Deserialize, Serialize};

use super::state::ResourcePool;
use crate::cards::Resource;
use crate::rules::ScoringTable;

/// Whether transitions check the current phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhasePolicy {
    /// Phase is recorded for the view only; every action is accepted.
    #[default]
    Advisory,
    /// Actions outside their phase fail with `GameError::OutOfPhase`.
    Strict,
}

/// Settings fixed for the lifetime of a `GameStateMachine`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Ongoing resources a new game starts with.
    pub starting_ongoing: ResourcePool,

    pub scoring: ScoringTable,

    pub phase_policy: PhasePolicy,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_ongoing: ResourcePool::ongoing(),
            scoring: ScoringTable::default(),
            phase_policy: PhasePolicy::default(),
        }
    }
}

impl GameConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_phase_policy(mut self, policy: PhasePolicy) -> Self {
        self.phase_policy = policy;
        self
    }

    /// Reject out-of-phase actions.
    #[must_use]
    pub fn strict(self) -> Self {
        self.with_phase_policy(PhasePolicy::Strict)
    }

    #[must_use]
    pub fn with_scoring(mut self, scoring: ScoringTable) -> Self {
        self.scoring = scoring;
        self
    }

    /// Override one starting ongoing resource. Non-ongoing resources are ignored.
    #[must_use]
    pub fn with_starting_ongoing(mut self, resource: Resource, value: i64) -> Self {
        self.starting_ongoing.set(resource, value);
        self
    }
}
