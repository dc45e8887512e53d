//! Card definitions - static card data.
//!
//! Two decks exist. Player cards are offered in pairs: the kept card gives a
//! task, the rejected one gives its resource names to the round. Pict cards
//! either seed the round's resources or attack one lane of the wall.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// A resource tracked by the game.
///
/// Not every resource lives in every pool: see [`Resource::ROUND`] and
/// [`Resource::ONGOING`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Soldier,
    Builder,
    Servant,
    Civilian,
    Stone,
    Renown,
    Piety,
    Valour,
    Discipline,
}

impl Resource {
    /// Resources gained per round.
    pub const ROUND: [Resource; 5] = [
        Resource::Soldier,
        Resource::Builder,
        Resource::Servant,
        Resource::Civilian,
        Resource::Stone,
    ];

    /// Resources tracked across rounds.
    ///
    /// Only the first three feed the round pool; the rest are reminders for
    /// the player.
    pub const ONGOING: [Resource; 7] = [
        Resource::Stone,
        Resource::Builder,
        Resource::Civilian,
        Resource::Renown,
        Resource::Piety,
        Resource::Valour,
        Resource::Discipline,
    ];

    /// Ongoing resources added on top of each round's pict yield.
    pub const CARRIED: [Resource; 3] = [Resource::Stone, Resource::Builder, Resource::Civilian];

    /// Lowercase name, as used in card data and routes.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Resource::Soldier => "soldier",
            Resource::Builder => "builder",
            Resource::Servant => "servant",
            Resource::Civilian => "civilian",
            Resource::Stone => "stone",
            Resource::Renown => "renown",
            Resource::Piety => "piety",
            Resource::Valour => "valour",
            Resource::Discipline => "discipline",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A resource name that matched nothing.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown resource `{0}`")]
pub struct UnknownResource(pub String);

impl FromStr for Resource {
    type Err = UnknownResource;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "soldier" => Resource::Soldier,
            "builder" => Resource::Builder,
            "servant" => Resource::Servant,
            "civilian" => Resource::Civilian,
            "stone" => Resource::Stone,
            "renown" => Resource::Renown,
            "piety" => Resource::Piety,
            "valour" => Resource::Valour,
            "discipline" => Resource::Discipline,
            other => return Err(UnknownResource(other.to_string())),
        })
    }
}

/// Attack column of the wall.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lane {
    Left,
    #[serde(alias = "center")]
    Middle,
    Right,
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Lane::Left => "left",
            Lane::Middle => "middle",
            Lane::Right => "right",
        })
    }
}

/// Footprint a player card occupies when placed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    Square,
    Long,
    S,
    L,
    T,
}

impl Shape {
    /// Grid pattern, `true` for a filled cell.
    #[must_use]
    pub fn pattern(self) -> &'static [&'static [bool]] {
        const X: bool = true;
        const O: bool = false;
        match self {
            Shape::Square => &[&[X, X], &[X, X]],
            Shape::Long => &[&[X, X, X, X]],
            Shape::S => &[&[O, X, X], &[X, X, O]],
            Shape::L => &[&[O, O, X], &[X, X, X]],
            Shape::T => &[&[O, X, O], &[X, X, X]],
        }
    }
}

/// Static player card definition.
///
/// `resources` accepts either a list of names or a name-to-count mapping in
/// the source data; only the names matter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerCard {
    /// Position in the player deck.
    pub index: usize,

    pub name: String,

    /// Task the player takes on when keeping this card.
    #[serde(default)]
    pub task: String,

    /// Completed task count to victory points.
    #[serde(default)]
    pub task_count_vp: BTreeMap<String, u32>,

    #[serde(default)]
    pub market: Option<u32>,

    /// Resource names granted (+1 each) when this card is rejected.
    #[serde(default, deserialize_with = "resource_names")]
    pub resources: Vec<Resource>,

    #[serde(default)]
    pub shape: Option<Shape>,
}

/// Static pict card definition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PictCard {
    /// Position in the pict deck.
    pub index: usize,

    /// Lane this card attacks when drawn during an attack.
    pub attack: Lane,

    /// Strength used by gladiator battles.
    #[serde(default)]
    pub gladiator: u32,

    /// Market number revealed by a market draw.
    #[serde(default)]
    pub market: u32,

    /// Resources yielded when this card opens a round.
    #[serde(default)]
    pub resources: BTreeMap<Resource, i64>,
}

fn resource_names<'de, D>(deserializer: D) -> Result<Vec<Resource>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Names {
        List(Vec<Resource>),
        Yield(BTreeMap<Resource, i64>),
    }

    Ok(match Names::deserialize(deserializer)? {
        Names::List(names) => names,
        Names::Yield(map) => map.into_keys().collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_parse() {
        assert_eq!("stone".parse::<Resource>(), Ok(Resource::Stone));
        assert_eq!("valour".parse::<Resource>(), Ok(Resource::Valour));
        assert_eq!(
            "notarealresource".parse::<Resource>(),
            Err(UnknownResource("notarealresource".to_string()))
        );
    }

    #[test]
    fn test_resource_name_round_trips() {
        for r in Resource::ONGOING.iter().chain(Resource::ROUND.iter()) {
            assert_eq!(r.name().parse::<Resource>(), Ok(*r));
        }
    }

    #[test]
    fn test_lane_accepts_center_alias() {
        let lane: Lane = serde_json::from_str("\"center\"").unwrap();
        assert_eq!(lane, Lane::Middle);
        assert_eq!(serde_json::to_string(&Lane::Middle).unwrap(), "\"middle\"");
    }

    #[test]
    fn test_player_card_resource_list() {
        let json = r#"{"index": 3, "name": "Mason", "resources": ["stone", "builder"], "shape": "t"}"#;
        let card: PlayerCard = serde_json::from_str(json).unwrap();

        assert_eq!(card.index, 3);
        assert_eq!(card.resources, vec![Resource::Stone, Resource::Builder]);
        assert_eq!(card.shape, Some(Shape::T));
        assert!(card.task_count_vp.is_empty());
    }

    #[test]
    fn test_player_card_resource_mapping() {
        // Counts are ignored, only the names are kept
        let json = r#"{"index": 0, "name": "Trader", "resources": {"servant": 4, "civilian": 2}}"#;
        let card: PlayerCard = serde_json::from_str(json).unwrap();

        assert_eq!(card.resources, vec![Resource::Servant, Resource::Civilian]);
    }

    #[test]
    fn test_pict_card_defaults() {
        let json = r#"{"index": 1, "attack": "right"}"#;
        let card: PictCard = serde_json::from_str(json).unwrap();

        assert_eq!(card.attack, Lane::Right);
        assert_eq!(card.gladiator, 0);
        assert_eq!(card.market, 0);
        assert!(card.resources.is_empty());
    }

    #[test]
    fn test_pict_card_rejects_unknown_lane() {
        let json = r#"{"index": 1, "attack": "sky"}"#;
        assert!(serde_json::from_str::<PictCard>(json).is_err());
    }

    #[test]
    fn test_shape_patterns() {
        let filled = |s: Shape| s.pattern().iter().flat_map(|r| r.iter()).filter(|c| **c).count();
        for shape in [Shape::Square, Shape::Long, Shape::S, Shape::L, Shape::T] {
            assert_eq!(filled(shape), 4);
        }
    }
}
