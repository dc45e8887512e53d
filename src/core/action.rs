//! Named player actions.
//!
//! Every request the view layer can make maps to one `Action`. Routes use the
//! slash-separated shape the web front end already links to:
//!
//! ```
//! use hadrians_wall::core::{Action, CardChoice, Difficulty, Direction};
//!
//! assert_eq!(Action::parse_route("/newgame/hard"), Ok(Action::NewGame(Difficulty::Hard)));
//! assert_eq!(Action::parse_route("pickplayercard/2"), Ok(Action::PickPlayerCard(CardChoice::Second)));
//! assert_eq!(
//!     Action::parse_route("ongoing/stone/decrement"),
//!     Ok(Action::AdjustOngoingResource {
//!         resource: "stone".to_string(),
//!         direction: Direction::Decrement,
//!     })
//! );
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::state::Difficulty;

/// Which of the two offered player cards to keep.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardChoice {
    First,
    Second,
}

impl CardChoice {
    /// Offset of the kept card from the deck cursor.
    #[must_use]
    pub const fn selected_offset(self) -> usize {
        match self {
            CardChoice::First => 0,
            CardChoice::Second => 1,
        }
    }

    /// Offset of the rejected card from the deck cursor.
    #[must_use]
    pub const fn rejected_offset(self) -> usize {
        1 - self.selected_offset()
    }
}

impl TryFrom<u8> for CardChoice {
    type Error = ActionParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(CardChoice::First),
            2 => Ok(CardChoice::Second),
            other => Err(ActionParseError::InvalidChoice(other.to_string())),
        }
    }
}

/// Step applied to a resource count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Increment,
    Decrement,
}

impl Direction {
    #[must_use]
    pub const fn delta(self) -> i64 {
        match self {
            Direction::Increment => 1,
            Direction::Decrement => -1,
        }
    }
}

impl FromStr for Direction {
    type Err = ActionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "increment" => Ok(Direction::Increment),
            "decrement" => Ok(Direction::Decrement),
            other => Err(ActionParseError::InvalidDirection(other.to_string())),
        }
    }
}

/// A player action.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    StartGame(Difficulty),
    /// Same as `StartGame`, but the session is cleared first.
    NewGame(Difficulty),
    AdvanceRound,
    PickPlayerCard(CardChoice),
    UseEnemyMarket,
    ResolveAttack,
    /// `resource` is kept as text: unknown names are a no-op, not an error.
    AdjustOngoingResource {
        resource: String,
        direction: Direction,
    },
    /// Manual correction of this round's pool; counts stop at zero.
    AdjustRoundResource {
        resource: String,
        direction: Direction,
    },
    SetDebugFlag,
    GladiatorBattle,
    DrawMarketNumber,
}

impl Action {
    /// Short name for logs and errors.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Action::StartGame(_) => "start_game",
            Action::NewGame(_) => "new_game",
            Action::AdvanceRound => "advance_round",
            Action::PickPlayerCard(_) => "pick_player_card",
            Action::UseEnemyMarket => "use_enemy_market",
            Action::ResolveAttack => "resolve_attack",
            Action::AdjustOngoingResource { .. } => "adjust_ongoing_resource",
            Action::AdjustRoundResource { .. } => "adjust_round_resource",
            Action::SetDebugFlag => "set_debug_flag",
            Action::GladiatorBattle => "gladiator_battle",
            Action::DrawMarketNumber => "draw_market_number",
        }
    }

    /// Parse a route such as `nextround` or `ongoing/stone/increment`.
    ///
    /// Leading and trailing slashes are ignored.
    pub fn parse_route(route: &str) -> Result<Self, ActionParseError> {
        let segments: Vec<&str> = route
            .trim_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        let difficulty = |s: &str| {
            s.parse::<Difficulty>()
                .map_err(|_| ActionParseError::InvalidDifficulty(s.to_string()))
        };

        match segments.as_slice() {
            ["startgame", d] => Ok(Action::StartGame(difficulty(*d)?)),
            ["newgame"] => Ok(Action::NewGame(Difficulty::Easy)),
            ["newgame", d] => Ok(Action::NewGame(difficulty(*d)?)),
            ["nextround"] => Ok(Action::AdvanceRound),
            ["pickplayercard", c] => {
                let choice = c
                    .parse::<u8>()
                    .map_err(|_| ActionParseError::InvalidChoice(c.to_string()))?;
                Ok(Action::PickPlayerCard(CardChoice::try_from(choice)?))
            }
            ["enemymarket"] => Ok(Action::UseEnemyMarket),
            ["pictattack"] => Ok(Action::ResolveAttack),
            ["ongoing", resource, direction] => Ok(Action::AdjustOngoingResource {
                resource: resource.to_string(),
                direction: direction.parse()?,
            }),
            ["round", resource, direction] => Ok(Action::AdjustRoundResource {
                resource: resource.to_string(),
                direction: direction.parse()?,
            }),
            ["debug"] => Ok(Action::SetDebugFlag),
            ["gladiator"] => Ok(Action::GladiatorBattle),
            ["marketnumber"] => Ok(Action::DrawMarketNumber),
            _ => Err(ActionParseError::UnknownRoute(route.to_string())),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A route or argument could not be turned into an `Action`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ActionParseError {
    #[error("unknown route `{0}`")]
    UnknownRoute(String),
    #[error("player card choice must be 1 or 2, got `{0}`")]
    InvalidChoice(String),
    #[error("direction must be increment or decrement, got `{0}`")]
    InvalidDirection(String),
    #[error("unknown difficulty `{0}`")]
    InvalidDifficulty(String),
}
