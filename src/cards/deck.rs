//! Shuffled draw orders and cursor-based draws.
//!
//! A deck never moves cards around. It is a permutation of card indices plus
//! a cursor; drawing reads the next `n` indices and moves the cursor.

use std::fmt;

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use crate::core::GameRng;

/// Which deck a draw was made from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeckKind {
    Player,
    Pict,
}

impl fmt::Display for DeckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DeckKind::Player => "player",
            DeckKind::Pict => "pict",
        })
    }
}

/// A draw would read past the end of a deck order.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{deck} deck exhausted: needed {needed} card(s), {remaining} remaining")]
pub struct DeckExhausted {
    pub deck: DeckKind,
    pub needed: usize,
    pub remaining: usize,
}

/// Card indices returned by one draw. Attacks draw at most a dozen or so.
pub type Drawn = SmallVec<[usize; 16]>;

/// Uniformly random permutation of `0..size`.
#[must_use]
pub fn shuffled_order(size: usize, rng: &mut GameRng) -> Vector<usize> {
    let mut order: Vec<usize> = (0..size).collect();
    rng.shuffle(&mut order);
    order.into_iter().collect()
}

/// Read `count` indices from `order` starting at `cursor`.
///
/// Fails without side effects if fewer than `count` cards remain.
pub fn draw(
    order: &Vector<usize>,
    cursor: usize,
    count: usize,
    deck: DeckKind,
) -> Result<Drawn, DeckExhausted> {
    let remaining = order.len().saturating_sub(cursor);
    if count > remaining {
        return Err(DeckExhausted {
            deck,
            needed: count,
            remaining,
        });
    }
    Ok(order.iter().skip(cursor).take(count).copied().collect())
}

/// Check that `order` is a permutation of `0..size`.
#[must_use]
pub fn is_permutation(order: &Vector<usize>, size: usize) -> bool {
    if order.len() != size {
        return false;
    }
    let mut seen = vec![false; size];
    for &index in order {
        match seen.get_mut(index) {
            Some(slot) if !*slot => *slot = true,
            _ => return false,
        }
    }
    true
}
