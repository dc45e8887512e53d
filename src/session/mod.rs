//! Per-session game handling.
//!
//! `GameSession` does what every request handler needs: load the session's
//! game (starting an easy one if there is none), apply one action, store the
//! result. A failed action leaves the stored game as it was.
//!
//! ```
//! use hadrians_wall::core::{Action, GameRng, Phase};
//! use hadrians_wall::rules::GameStateMachine;
//! use hadrians_wall::session::{GameSession, MemorySessionStore};
//!
//! let machine = GameStateMachine::standard().unwrap();
//! let mut session = GameSession::new(machine, MemorySessionStore::new());
//! let mut rng = GameRng::new(1);
//!
//! let action = Action::parse_route("nextround").unwrap();
//! let state = session.dispatch("player-1", &action, &mut rng).unwrap();
//! assert_eq!(state.phase, Phase::PlayerCards);
//! ```

pub mod codec;
pub mod store;

pub use codec::SessionCodec;
pub use store::{MemorySessionStore, SessionStore};

use log::{debug, info};
use thiserror::Error;

use crate::core::{Action, Difficulty, GameRng, GameState};
use crate::rules::{GameError, GameStateMachine};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session blob is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("session blob is not valid bincode: {0}")]
    Bincode(#[from] bincode::Error),
    #[error("session storage failed: {0}")]
    Storage(String),
    #[error(transparent)]
    Game(#[from] GameError),
}

/// A state machine bound to a session store.
#[derive(Debug)]
pub struct GameSession<S> {
    machine: GameStateMachine,
    store: S,
    codec: SessionCodec,
}

impl<S: SessionStore> GameSession<S> {
    #[must_use]
    pub fn new(machine: GameStateMachine, store: S) -> Self {
        Self {
            machine,
            store,
            codec: SessionCodec::default(),
        }
    }

    #[must_use]
    pub fn with_codec(mut self, codec: SessionCodec) -> Self {
        self.codec = codec;
        self
    }

    #[must_use]
    pub fn machine(&self) -> &GameStateMachine {
        &self.machine
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current game for a session, starting an easy game if there is none.
    pub fn state(&mut self, session: &str, rng: &mut GameRng) -> Result<GameState, SessionError> {
        if let Some(blob) = self.store.load(session)? {
            return self.codec.decode(&blob);
        }
        info!("no game in session {session}, starting one");
        let state = self.machine.start_game(Difficulty::Easy, rng);
        self.save(session, &state)?;
        Ok(state)
    }

    /// Apply an action to a session's game and store the result.
    ///
    /// `StartGame` replaces the session's game without loading it first.
    /// `NewGame` also clears the session before starting over.
    pub fn dispatch(&mut self, session: &str, action: &Action, rng: &mut GameRng) -> Result<GameState, SessionError> {
        debug!("session {session}: {action}");

        let next = match action {
            Action::StartGame(difficulty) => self.machine.start_game(*difficulty, rng),
            Action::NewGame(difficulty) => {
                self.store.clear(session)?;
                self.machine.new_game(*difficulty, rng)
            }
            _ => {
                let current = self.state(session, rng)?;
                self.machine.apply(&current, action, rng)?
            }
        };

        self.save(session, &next)?;
        Ok(next)
    }

    /// Forget a session's game.
    pub fn clear(&mut self, session: &str) -> Result<(), SessionError> {
        self.store.clear(session)
    }

    fn save(&mut self, session: &str, state: &GameState) -> Result<(), SessionError> {
        let blob = self.codec.encode(state)?;
        self.store.save(session, blob)
    }
}
