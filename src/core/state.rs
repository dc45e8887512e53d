//! Game state: one record per player session.
//!
//! `GameState` is plain data. Transitions live in `rules::engine` and return
//! a new state rather than mutating in place; `im` vectors make the copy
//! cheap. The serialized form is a flat camelCase object suitable for a
//! session blob.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use im::Vector;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cards::{Lane, Resource};

/// Difficulty, fixed for the whole game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown difficulty `{0}`")]
pub struct UnknownDifficulty(pub String);

impl FromStr for Difficulty {
    type Err = UnknownDifficulty;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(UnknownDifficulty(other.to_string())),
        }
    }
}

/// Round phase. Tells the view which controls to show.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Start,
    PlayerCards,
    PictAttack,
    NextRound,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Start => "start",
            Phase::PlayerCards => "player_cards",
            Phase::PictAttack => "pict_attack",
            Phase::NextRound => "next_round",
        })
    }
}

/// Counters for a fixed set of resources.
///
/// The key set is decided at construction; `add` on a resource outside it
/// does nothing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourcePool(BTreeMap<Resource, i64>);

impl ResourcePool {
    /// A pool tracking `keys`, all at zero.
    #[must_use]
    pub fn with_keys(keys: &[Resource]) -> Self {
        Self(keys.iter().map(|&r| (r, 0)).collect())
    }

    /// Empty round pool: soldier, builder, servant, civilian, stone.
    #[must_use]
    pub fn round() -> Self {
        Self::with_keys(&Resource::ROUND)
    }

    /// Default ongoing pool: one stone, everything else zero.
    #[must_use]
    pub fn ongoing() -> Self {
        let mut pool = Self::with_keys(&Resource::ONGOING);
        pool.set(Resource::Stone, 1);
        pool
    }

    /// Current count, zero for untracked resources.
    #[must_use]
    pub fn get(&self, resource: Resource) -> i64 {
        self.0.get(&resource).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn tracks(&self, resource: Resource) -> bool {
        self.0.contains_key(&resource)
    }

    /// Add `delta` to a tracked resource. Returns false if untracked.
    pub fn add(&mut self, resource: Resource, delta: i64) -> bool {
        match self.0.get_mut(&resource) {
            Some(count) => {
                *count += delta;
                true
            }
            None => false,
        }
    }

    /// Overwrite a tracked resource. Returns false if untracked.
    pub fn set(&mut self, resource: Resource, value: i64) -> bool {
        match self.0.get_mut(&resource) {
            Some(count) => {
                *count = value;
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Resource, i64)> + '_ {
        self.0.iter().map(|(&r, &n)| (r, n))
    }
}

/// Attack count per lane for the current round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaneTally {
    pub left: u32,
    pub middle: u32,
    pub right: u32,
}

impl LaneTally {
    pub fn record(&mut self, lane: Lane) {
        match lane {
            Lane::Left => self.left += 1,
            Lane::Middle => self.middle += 1,
            Lane::Right => self.right += 1,
        }
    }

    #[must_use]
    pub fn get(&self, lane: Lane) -> u32 {
        match lane {
            Lane::Left => self.left,
            Lane::Middle => self.middle,
            Lane::Right => self.right,
        }
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.left + self.middle + self.right
    }
}

/// Complete state of one game.
///
/// Deck orders are permutations of the deck index range, fixed at game start.
/// Each `*_location` is a cursor into its order and never exceeds its length.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub difficulty: Difficulty,

    /// Rounds started so far. Zero before the first round.
    pub round: u32,

    pub phase: Phase,

    pub ongoing_resources: ResourcePool,
    pub round_resources: ResourcePool,

    pub player_card_order: Vector<usize>,
    pub player_card_location: usize,
    /// Kept player cards, oldest first.
    pub player_cards_selected: Vector<usize>,
    /// Card rejected by the most recent pick.
    pub player_card_not_selected: Option<usize>,

    /// Shuffled alongside the player deck; nothing draws from it yet.
    pub enemy_card_order: Vector<usize>,
    pub enemy_card_location: usize,

    pub pict_card_order: Vector<usize>,
    pub pict_card_location: usize,

    pub round_pict_attack: LaneTally,
    /// Extra pict cards bought at the enemy market this round.
    pub round_market_pict_cards: u32,
    /// Gladiator strength drawn this round, if a battle was fought.
    pub round_gladiator: Option<u32>,
    /// Market number drawn this round, if any.
    pub round_market_number: Option<u32>,

    pub debug_flag: bool,

    /// Seed the deck orders were shuffled from.
    pub seed: u64,
}

impl GameState {
    /// Player cards left to offer.
    #[must_use]
    pub fn remaining_player_cards(&self) -> usize {
        self.player_card_order.len().saturating_sub(self.player_card_location)
    }

    /// Pict cards left to draw.
    #[must_use]
    pub fn remaining_pict_cards(&self) -> usize {
        self.pict_card_order.len().saturating_sub(self.pict_card_location)
    }

    /// The two player cards currently on offer, if two remain.
    #[must_use]
    pub fn player_card_offer(&self) -> Option<(usize, usize)> {
        let first = self.player_card_order.get(self.player_card_location)?;
        let second = self.player_card_order.get(self.player_card_location + 1)?;
        Some((*first, *second))
    }

    /// Most recently kept player card.
    #[must_use]
    pub fn last_selected(&self) -> Option<usize> {
        self.player_cards_selected.last().copied()
    }

    /// Pict card that opened the current round.
    ///
    /// Valid right after `advance_round`; later draws move the cursor past it.
    #[must_use]
    pub fn last_pict_drawn(&self) -> Option<usize> {
        let cursor = self.pict_card_location.checked_sub(1)?;
        self.pict_card_order.get(cursor).copied()
    }
}
