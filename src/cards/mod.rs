//! Card data and deck helpers.
//!
//! - `definition`: static card records (`PlayerCard`, `PictCard`) and the
//!   small enums they use
//! - `registry`: `CardLibrary`, the loaded reference data
//! - `deck`: shuffled orders and bounds-checked draws

pub mod definition;
pub mod registry;
pub mod deck;

pub use definition::{Lane, PictCard, PlayerCard, Resource, Shape, UnknownResource};
pub use registry::{CardLibrary, DataError, PICT_CARDS_FILE, PLAYER_CARDS_FILE};
pub use deck::{draw, is_permutation, shuffled_order, DeckExhausted, DeckKind, Drawn};
