//! Per-round scoring table.
//!
//! Each row gives the victory points for the round and how many pict cards
//! attack at each difficulty. The table also bounds the game: there is no
//! round after the last row.

use serde::{Deserialize, Serialize};

use crate::core::Difficulty;

/// One round of the scoring table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringRow {
    /// 1-based round number.
    pub round: u32,
    pub victory_points: u32,
    pub easy: u32,
    pub medium: u32,
    pub hard: u32,
}

impl ScoringRow {
    /// Pict cards drawn in this round's attack.
    #[must_use]
    pub const fn pict_draws(&self, difficulty: Difficulty) -> u32 {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }
}

const fn row(round: u32, victory_points: u32, easy: u32, medium: u32, hard: u32) -> ScoringRow {
    ScoringRow {
        round,
        victory_points,
        easy,
        medium,
        hard,
    }
}

/// The standard six-round table.
pub const STANDARD_ROWS: [ScoringRow; 6] = [
    row(1, 1, 1, 1, 1),
    row(2, 2, 2, 2, 3),
    row(3, 2, 3, 4, 5),
    row(4, 3, 4, 6, 7),
    row(5, 3, 6, 8, 9),
    row(6, 4, 8, 10, 12),
];

/// Ordered scoring rows, looked up by 1-based round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoringTable {
    rows: Vec<ScoringRow>,
}

impl Default for ScoringTable {
    fn default() -> Self {
        Self {
            rows: STANDARD_ROWS.to_vec(),
        }
    }
}

impl ScoringTable {
    /// Custom table. Rows are renumbered `1..=n` in the given order.
    #[must_use]
    pub fn new(rows: impl IntoIterator<Item = ScoringRow>) -> Self {
        let rows = rows
            .into_iter()
            .zip(1..)
            .map(|(row, round)| ScoringRow { round, ..row })
            .collect();
        Self { rows }
    }

    /// Row for a 1-based round; `None` for round 0 or past the end.
    #[must_use]
    pub fn row(&self, round: u32) -> Option<&ScoringRow> {
        let index = usize::try_from(round).ok()?.checked_sub(1)?;
        self.rows.get(index)
    }

    /// Number of rounds in a game.
    #[must_use]
    pub fn rounds(&self) -> u32 {
        u32::try_from(self.rows.len()).unwrap_or(u32::MAX)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScoringRow> {
        self.rows.iter()
    }
}
