//! Card library: the two static decks.
//!
//! The library is parsed once and then only read. Share it with `Arc`.
//!
//! ## Example
//!
//! ```
//! use hadrians_wall::cards::CardLibrary;
//!
//! let library = CardLibrary::embedded().unwrap();
//! assert!(library.pict_deck_len() > 0);
//!
//! let card = library.player_card(0).unwrap();
//! assert_eq!(library.find_player_card(&card.name), Some(card));
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::info;
use once_cell::sync::OnceCell;
use rustc_hash::FxHashMap;
use thiserror::Error;

use super::deck::DeckKind;
use super::definition::{PictCard, PlayerCard};

/// File name of the player deck inside a data directory.
pub const PLAYER_CARDS_FILE: &str = "player-cards.json";
/// File name of the pict deck inside a data directory.
pub const PICT_CARDS_FILE: &str = "pict-cards.json";

const EMBEDDED_PLAYER_CARDS: &str = include_str!("../../data/player-cards.json");
const EMBEDDED_PICT_CARDS: &str = include_str!("../../data/pict-cards.json");

static EMBEDDED: OnceCell<Arc<CardLibrary>> = OnceCell::new();

/// Reference data could not be loaded.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed {deck} card data: {source}")]
    Json {
        deck: DeckKind,
        #[source]
        source: serde_json::Error,
    },
    #[error("{0} deck is empty")]
    Empty(DeckKind),
    #[error("{deck} card at position {position} has index {index}")]
    BadIndex {
        deck: DeckKind,
        position: usize,
        index: usize,
    },
}

/// Both decks, indexed by card index.
#[derive(Clone, Debug)]
pub struct CardLibrary {
    player_cards: Vec<PlayerCard>,
    pict_cards: Vec<PictCard>,
    player_names: FxHashMap<String, usize>,
}

impl CardLibrary {
    /// Build a library from already parsed decks.
    ///
    /// Card `index` fields must run `0..n` in order.
    pub fn new(player_cards: Vec<PlayerCard>, pict_cards: Vec<PictCard>) -> Result<Self, DataError> {
        check_indices(DeckKind::Player, player_cards.iter().map(|c| c.index))?;
        check_indices(DeckKind::Pict, pict_cards.iter().map(|c| c.index))?;

        let player_names = player_cards
            .iter()
            .map(|c| (c.name.clone(), c.index))
            .collect();

        Ok(Self {
            player_cards,
            pict_cards,
            player_names,
        })
    }

    /// Parse both decks from JSON text.
    pub fn from_json(player_json: &str, pict_json: &str) -> Result<Self, DataError> {
        let player_cards = serde_json::from_str(player_json).map_err(|source| DataError::Json {
            deck: DeckKind::Player,
            source,
        })?;
        let pict_cards = serde_json::from_str(pict_json).map_err(|source| DataError::Json {
            deck: DeckKind::Pict,
            source,
        })?;
        Self::new(player_cards, pict_cards)
    }

    /// Load `player-cards.json` and `pict-cards.json` from a directory.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, DataError> {
        let dir = dir.as_ref();
        let player_json = read(dir.join(PLAYER_CARDS_FILE))?;
        let pict_json = read(dir.join(PICT_CARDS_FILE))?;
        let library = Self::from_json(&player_json, &pict_json)?;
        info!(
            "loaded {} player cards and {} pict cards from {}",
            library.player_deck_len(),
            library.pict_deck_len(),
            dir.display()
        );
        Ok(library)
    }

    /// The decks bundled with the crate, parsed on first use.
    pub fn embedded() -> Result<Arc<CardLibrary>, DataError> {
        EMBEDDED
            .get_or_try_init(|| {
                Self::from_json(EMBEDDED_PLAYER_CARDS, EMBEDDED_PICT_CARDS).map(Arc::new)
            })
            .cloned()
    }

    /// Get a player card by index.
    #[must_use]
    pub fn player_card(&self, index: usize) -> Option<&PlayerCard> {
        self.player_cards.get(index)
    }

    /// Get a pict card by index.
    #[must_use]
    pub fn pict_card(&self, index: usize) -> Option<&PictCard> {
        self.pict_cards.get(index)
    }

    /// Look up a player card by name.
    #[must_use]
    pub fn find_player_card(&self, name: &str) -> Option<&PlayerCard> {
        self.player_names.get(name).and_then(|&i| self.player_cards.get(i))
    }

    #[must_use]
    pub fn player_deck_len(&self) -> usize {
        self.player_cards.len()
    }

    #[must_use]
    pub fn pict_deck_len(&self) -> usize {
        self.pict_cards.len()
    }

    /// Iterate over player cards in index order.
    pub fn player_cards(&self) -> impl Iterator<Item = &PlayerCard> {
        self.player_cards.iter()
    }

    /// Iterate over pict cards in index order.
    pub fn pict_cards(&self) -> impl Iterator<Item = &PictCard> {
        self.pict_cards.iter()
    }
}

fn read(path: PathBuf) -> Result<String, DataError> {
    fs::read_to_string(&path).map_err(|source| DataError::Io { path, source })
}

fn check_indices(deck: DeckKind, indices: impl Iterator<Item = usize>) -> Result<(), DataError> {
    let mut count = 0;
    for (position, index) in indices.enumerate() {
        if position != index {
            return Err(DataError::BadIndex {
                deck,
                position,
                index,
            });
        }
        count += 1;
    }
    if count == 0 {
        return Err(DataError::Empty(deck));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::definition::{Lane, Resource};

    const PLAYERS: &str = r#"[
        {"index": 0, "name": "Mason", "resources": ["stone"]},
        {"index": 1, "name": "Scout", "resources": ["soldier", "civilian"]}
    ]"#;
    const PICTS: &str = r#"[
        {"index": 0, "attack": "left", "resources": {"builder": 2}},
        {"index": 1, "attack": "center", "gladiator": 5, "market": 3}
    ]"#;

    #[test]
    fn test_from_json() {
        let library = CardLibrary::from_json(PLAYERS, PICTS).unwrap();

        assert_eq!(library.player_deck_len(), 2);
        assert_eq!(library.pict_deck_len(), 2);
        assert_eq!(library.player_card(1).unwrap().resources, vec![Resource::Soldier, Resource::Civilian]);
        assert_eq!(library.pict_card(1).unwrap().attack, Lane::Middle);
        assert_eq!(library.pict_card(0).unwrap().resources.get(&Resource::Builder), Some(&2));
        assert!(library.pict_card(2).is_none());
    }

    #[test]
    fn test_find_by_name() {
        let library = CardLibrary::from_json(PLAYERS, PICTS).unwrap();

        assert_eq!(library.find_player_card("Scout").map(|c| c.index), Some(1));
        assert!(library.find_player_card("Nobody").is_none());
    }

    #[test]
    fn test_malformed_json() {
        let err = CardLibrary::from_json("[{", PICTS).unwrap_err();
        assert!(matches!(err, DataError::Json { deck: DeckKind::Player, .. }));

        let err = CardLibrary::from_json(PLAYERS, "{}").unwrap_err();
        assert!(matches!(err, DataError::Json { deck: DeckKind::Pict, .. }));
    }

    #[test]
    fn test_empty_deck() {
        let err = CardLibrary::from_json("[]", PICTS).unwrap_err();
        assert!(matches!(err, DataError::Empty(DeckKind::Player)));
    }

    #[test]
    fn test_indices_must_match_positions() {
        let players = r#"[{"index": 0, "name": "A"}, {"index": 2, "name": "B"}]"#;
        let err = CardLibrary::from_json(players, PICTS).unwrap_err();
        assert!(matches!(
            err,
            DataError::BadIndex { deck: DeckKind::Player, position: 1, index: 2 }
        ));
    }

    #[test]
    fn test_missing_directory() {
        let err = CardLibrary::load_dir("/definitely/not/here").unwrap_err();
        assert!(matches!(err, DataError::Io { .. }));
    }

    #[test]
    fn test_load_dir_matches_embedded() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
        let loaded = CardLibrary::load_dir(dir).unwrap();
        let embedded = CardLibrary::embedded().unwrap();

        assert_eq!(loaded.player_deck_len(), embedded.player_deck_len());
        assert_eq!(loaded.pict_deck_len(), embedded.pict_deck_len());
    }

    #[test]
    fn test_embedded_is_shared() {
        let a = CardLibrary::embedded().unwrap();
        let b = CardLibrary::embedded().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
