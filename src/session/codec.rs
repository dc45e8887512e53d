//! Session blob encoding.

use serde::{Deserialize, Serialize};

use super::SessionError;
use crate::core::GameState;

/// How a `GameState` is written into a session blob.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionCodec {
    /// Flat JSON with camelCase field names. Readable by a browser.
    #[default]
    Json,
    /// bincode. Opaque to the front end.
    Bincode,
}

impl SessionCodec {
    pub fn encode(self, state: &GameState) -> Result<Vec<u8>, SessionError> {
        Ok(match self {
            SessionCodec::Json => serde_json::to_vec(state)?,
            SessionCodec::Bincode => bincode::serialize(state)?,
        })
    }

    pub fn decode(self, blob: &[u8]) -> Result<GameState, SessionError> {
        Ok(match self {
            SessionCodec::Json => serde_json::from_slice(blob)?,
            SessionCodec::Bincode => bincode::deserialize(blob)?,
        })
    }
}
