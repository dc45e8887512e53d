//! # hadrians-wall
//!
//! Round tracker for a solo Hadrian's Wall companion app.
//!
//! ## Design
//!
//! 1. **State as a value**: `GameState` is a plain serializable record.
//!    Every transition borrows a state and returns the next one, so the web
//!    layer only has to store one blob per session.
//!
//! 2. **Replayable decks**: each game shuffles three deck orders from one
//!    seed. Decks are permutations plus cursors; nothing is ever removed.
//!
//! 3. **Explicit game over**: running out of pict cards, player cards or
//!    scoring rows is an error value, not a crash.
//!
//! ## Modules
//!
//! - `core`: state, actions, RNG, configuration
//! - `cards`: card data, the card library, deck helpers
//! - `rules`: the round state machine and scoring table
//! - `session`: session store seam and blob encoding

pub mod core;
pub mod cards;
pub mod rules;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionParseError, CardChoice, Difficulty, Direction, GameConfig, GameRng, GameState,
    LaneTally, Phase, PhasePolicy, ResourcePool,
};

pub use crate::cards::{CardLibrary, DataError, DeckExhausted, DeckKind, Lane, PictCard, PlayerCard, Resource};

pub use crate::rules::{GameError, GameStateMachine, ScoringRow, ScoringTable};

pub use crate::session::{GameSession, MemorySessionStore, SessionCodec, SessionError, SessionStore};
