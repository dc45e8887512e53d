//! Round state machine.
//!
//! `GameStateMachine` holds the shared card library and the game config. Each
//! transition borrows the current `GameState` and returns the next one; on
//! error the caller keeps the state it already has.
//!
//! ```text
//! start -> player_cards -> pict_attack -> next_round -> player_cards -> ...
//! ```
//!
//! ## Example
//!
//! ```
//! use hadrians_wall::core::{CardChoice, Difficulty, GameRng, Phase};
//! use hadrians_wall::rules::GameStateMachine;
//!
//! let machine = GameStateMachine::standard().unwrap();
//! let mut rng = GameRng::new(42);
//!
//! let state = machine.start_game(Difficulty::Easy, &mut rng);
//! let state = machine.advance_round(&state).unwrap();
//! let state = machine.pick_player_card(&state, CardChoice::First).unwrap();
//! let state = machine.resolve_attack(&state).unwrap();
//!
//! assert_eq!(state.round, 1);
//! assert_eq!(state.phase, Phase::NextRound);
//! assert_eq!(state.round_pict_attack.total(), 1);
//! ```

use std::sync::Arc;

use log::{debug, info, warn};
use smallvec::SmallVec;

use super::error::GameError;
use super::scoring::ScoringRow;
use crate::cards::{
    draw, shuffled_order, CardLibrary, DataError, DeckExhausted, DeckKind, PictCard, PlayerCard,
    Resource,
};
use crate::core::{
    Action, CardChoice, Difficulty, Direction, GameConfig, GameRng, GameState, LaneTally, Phase,
    PhasePolicy, ResourcePool,
};

/// Applies player actions to game states.
#[derive(Clone, Debug)]
pub struct GameStateMachine {
    library: Arc<CardLibrary>,
    config: GameConfig,
}

impl GameStateMachine {
    /// Machine with the default config.
    #[must_use]
    pub fn new(library: Arc<CardLibrary>) -> Self {
        Self::with_config(library, GameConfig::default())
    }

    #[must_use]
    pub fn with_config(library: Arc<CardLibrary>, config: GameConfig) -> Self {
        Self { library, config }
    }

    /// Machine over the bundled card data with the default config.
    pub fn standard() -> Result<Self, DataError> {
        Ok(Self::new(CardLibrary::embedded()?))
    }

    #[must_use]
    pub fn library(&self) -> &CardLibrary {
        &self.library
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    // === Transitions ===

    /// Fresh game: new deck orders, default resources, round 0.
    ///
    /// The game gets its own seed forked from `rng`. That seed is stored on
    /// the state and [`replay_game`](Self::replay_game) rebuilds the same
    /// orders from it.
    pub fn start_game(&self, difficulty: Difficulty, rng: &mut GameRng) -> GameState {
        self.replay_game(difficulty, rng.fork().seed())
    }

    /// Fresh game whose deck orders come from `seed` alone.
    #[must_use]
    pub fn replay_game(&self, difficulty: Difficulty, seed: u64) -> GameState {
        let player_len = self.library.player_deck_len();
        let pict_len = self.library.pict_deck_len();

        let mut game = GameRng::new(seed);
        let player_card_order = shuffled_order(player_len, &mut game.fork());
        let enemy_card_order = shuffled_order(player_len, &mut game.fork());
        let pict_card_order = shuffled_order(pict_len, &mut game.fork());

        info!("starting {difficulty} game with seed {seed}");

        GameState {
            difficulty,
            round: 0,
            phase: Phase::Start,
            ongoing_resources: self.config.starting_ongoing.clone(),
            round_resources: ResourcePool::round(),
            player_card_order,
            player_card_location: 0,
            player_cards_selected: im::Vector::new(),
            player_card_not_selected: None,
            enemy_card_order,
            enemy_card_location: 0,
            pict_card_order,
            pict_card_location: 0,
            round_pict_attack: LaneTally::default(),
            round_market_pict_cards: 0,
            round_gladiator: None,
            round_market_number: None,
            debug_flag: false,
            seed,
        }
    }

    /// Same as [`start_game`](Self::start_game). Session handling differs, the game does not.
    pub fn new_game(&self, difficulty: Difficulty, rng: &mut GameRng) -> GameState {
        self.start_game(difficulty, rng)
    }

    /// Open the next round.
    ///
    /// Draws one pict card whose yield seeds the round resources, with the
    /// carried ongoing resources added on top. Clears last round's attack,
    /// market purchases and draws.
    pub fn advance_round(&self, state: &GameState) -> Result<GameState, GameError> {
        self.guard(state, "advance_round", &[Phase::Start, Phase::NextRound])?;

        let round = state.round + 1;
        if self.config.scoring.row(round).is_none() {
            warn!("no round {round}: the game is over");
            return Err(GameError::ScoringTableExhausted { round });
        }

        let drawn = self.draw_picts(state, 1)?;
        let card = drawn[0];

        let mut resources = ResourcePool::round();
        for (&resource, &count) in &card.resources {
            if !resources.set(resource, count) {
                debug!("pict card {} yields untracked {resource}", card.index);
            }
        }
        for resource in Resource::CARRIED {
            resources.add(resource, state.ongoing_resources.get(resource));
        }

        let mut next = state.clone();
        next.pict_card_location += 1;
        next.round_resources = resources;
        next.round_pict_attack = LaneTally::default();
        next.round_market_pict_cards = 0;
        next.round_gladiator = None;
        next.round_market_number = None;
        next.round = round;
        next.phase = Phase::PlayerCards;

        debug!("round {round} opened with pict card {}", card.index);
        Ok(next)
    }

    /// Keep one of the two offered player cards.
    ///
    /// Every resource named on the rejected card adds exactly one to the
    /// round pool, whatever the card's own counts.
    pub fn pick_player_card(&self, state: &GameState, choice: CardChoice) -> Result<GameState, GameError> {
        self.guard(state, "pick_player_card", &[Phase::PlayerCards])?;

        let offer = draw(
            &state.player_card_order,
            state.player_card_location,
            2,
            DeckKind::Player,
        )
        .map_err(exhausted)?;
        let selected = self.player_card(offer[choice.selected_offset()])?;
        let rejected = self.player_card(offer[choice.rejected_offset()])?;

        let mut next = state.clone();
        next.player_cards_selected.push_back(selected.index);
        next.player_card_not_selected = Some(rejected.index);
        for &resource in &rejected.resources {
            if !next.round_resources.add(resource, 1) {
                debug!("rejected card {} names untracked {resource}", rejected.index);
            }
        }
        next.player_card_location += 2;
        next.phase = Phase::PictAttack;

        debug!("kept player card {}, rejected {}", selected.index, rejected.index);
        Ok(next)
    }

    /// Buy one extra pict card for this round's attack. Cumulative.
    #[must_use]
    pub fn use_enemy_market(&self, state: &GameState) -> GameState {
        let mut next = state.clone();
        next.round_market_pict_cards += 1;
        debug!("enemy market used, {} extra pict card(s)", next.round_market_pict_cards);
        next
    }

    /// Draw this round's attackers and tally them by lane.
    ///
    /// Draws the scoring table's count for the difficulty plus any cards
    /// bought at the enemy market.
    pub fn resolve_attack(&self, state: &GameState) -> Result<GameState, GameError> {
        self.guard(state, "resolve_attack", &[Phase::PictAttack])?;

        let row = self
            .config
            .scoring
            .row(state.round)
            .ok_or(GameError::ScoringTableExhausted { round: state.round })?;
        let total = row.pict_draws(state.difficulty) + state.round_market_pict_cards;

        let mut tally = LaneTally::default();
        for card in self.draw_picts(state, total as usize)? {
            tally.record(card.attack);
        }

        let mut next = state.clone();
        next.pict_card_location += total as usize;
        next.round_pict_attack = tally;
        next.phase = Phase::NextRound;

        debug!(
            "round {} attack: {} left, {} middle, {} right",
            state.round, tally.left, tally.middle, tally.right
        );
        Ok(next)
    }

    /// Step an ongoing resource by one. Unknown names change nothing.
    ///
    /// There is no floor: counts may go negative.
    #[must_use]
    pub fn adjust_ongoing_resource(&self, state: &GameState, resource: &str, direction: Direction) -> GameState {
        let mut next = state.clone();
        let applied = resource
            .parse::<Resource>()
            .map(|r| next.ongoing_resources.add(r, direction.delta()))
            .unwrap_or(false);

        if applied {
            debug!("ongoing {resource} {direction:?}");
        } else {
            warn!("ignoring adjustment of unknown ongoing resource `{resource}`");
        }
        next
    }

    /// Step a round resource by one, never below zero.
    ///
    /// Unknown names and resources the round pool does not track change
    /// nothing.
    #[must_use]
    pub fn adjust_round_resource(&self, state: &GameState, resource: &str, direction: Direction) -> GameState {
        let mut next = state.clone();
        let applied = resource.parse::<Resource>().map_or(false, |r| {
            let count = (next.round_resources.get(r) + direction.delta()).max(0);
            next.round_resources.set(r, count)
        });

        if applied {
            debug!("round {resource} {direction:?}");
        } else {
            warn!("ignoring adjustment of unknown round resource `{resource}`");
        }
        next
    }

    /// Turn on debug display. There is no way to turn it off.
    #[must_use]
    pub fn set_debug_flag(&self, state: &GameState) -> GameState {
        let mut next = state.clone();
        next.debug_flag = true;
        next
    }

    /// Draw one pict card and record its gladiator strength.
    pub fn gladiator_battle(&self, state: &GameState) -> Result<GameState, GameError> {
        self.guard(state, "gladiator_battle", &[Phase::PictAttack, Phase::NextRound])?;

        let card = self.draw_picts(state, 1)?[0];
        let mut next = state.clone();
        next.pict_card_location += 1;
        next.round_gladiator = Some(card.gladiator);

        debug!("gladiator battle: strength {}", card.gladiator);
        Ok(next)
    }

    /// Draw one pict card and record its market number.
    pub fn draw_market_number(&self, state: &GameState) -> Result<GameState, GameError> {
        self.guard(state, "draw_market_number", &[Phase::PictAttack, Phase::NextRound])?;

        let card = self.draw_picts(state, 1)?[0];
        let mut next = state.clone();
        next.pict_card_location += 1;
        next.round_market_number = Some(card.market);

        debug!("market number {}", card.market);
        Ok(next)
    }

    /// Dispatch an action to its transition.
    pub fn apply(&self, state: &GameState, action: &Action, rng: &mut GameRng) -> Result<GameState, GameError> {
        match action {
            Action::StartGame(difficulty) => Ok(self.start_game(*difficulty, rng)),
            Action::NewGame(difficulty) => Ok(self.new_game(*difficulty, rng)),
            Action::AdvanceRound => self.advance_round(state),
            Action::PickPlayerCard(choice) => self.pick_player_card(state, *choice),
            Action::UseEnemyMarket => Ok(self.use_enemy_market(state)),
            Action::ResolveAttack => self.resolve_attack(state),
            Action::AdjustOngoingResource { resource, direction } => {
                Ok(self.adjust_ongoing_resource(state, resource, *direction))
            }
            Action::AdjustRoundResource { resource, direction } => {
                Ok(self.adjust_round_resource(state, resource, *direction))
            }
            Action::SetDebugFlag => Ok(self.set_debug_flag(state)),
            Action::GladiatorBattle => self.gladiator_battle(state),
            Action::DrawMarketNumber => self.draw_market_number(state),
        }
    }

    // === Queries ===

    /// Scoring row for the state's current round.
    #[must_use]
    pub fn current_row(&self, state: &GameState) -> Option<&ScoringRow> {
        self.config.scoring.row(state.round)
    }

    /// Victory points awarded for the current round, zero before round 1.
    #[must_use]
    pub fn victory_points(&self, state: &GameState) -> u32 {
        self.current_row(state).map_or(0, |row| row.victory_points)
    }

    /// The last round's attack has been resolved.
    #[must_use]
    pub fn is_final_round(&self, state: &GameState) -> bool {
        state.round == self.config.scoring.rounds() && state.phase == Phase::NextRound
    }

    // === Helpers ===

    fn guard(&self, state: &GameState, action: &'static str, allowed: &[Phase]) -> Result<(), GameError> {
        if self.config.phase_policy == PhasePolicy::Strict && !allowed.contains(&state.phase) {
            warn!("rejected {action} during {}", state.phase);
            return Err(GameError::OutOfPhase {
                action,
                phase: state.phase,
            });
        }
        Ok(())
    }

    fn draw_picts(&self, state: &GameState, count: usize) -> Result<SmallVec<[&PictCard; 16]>, GameError> {
        draw(&state.pict_card_order, state.pict_card_location, count, DeckKind::Pict)
            .map_err(exhausted)?
            .into_iter()
            .map(|index| {
                self.library
                    .pict_card(index)
                    .ok_or(GameError::UnknownCard { deck: DeckKind::Pict, index })
            })
            .collect()
    }

    fn player_card(&self, index: usize) -> Result<&PlayerCard, GameError> {
        self.library
            .player_card(index)
            .ok_or(GameError::UnknownCard { deck: DeckKind::Player, index })
    }
}

fn exhausted(err: DeckExhausted) -> GameError {
    warn!("{err}");
    err.into()
}
