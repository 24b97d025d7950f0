//! Puzzle instance types: actors, locations, the validated roster and the
//! JSON configuration it is built from.
//!
//! Configuration structs deserialize from camelCase JSON. `Puzzle` is the
//! validated, immutable form every other module works with.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Largest roster an `ActorSet` can hold.
pub const MAX_ACTORS: usize = 64;

/// One of the two banks of the river.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Start,
    End,
}

impl Location {
    pub const ALL: [Location; 2] = [Location::Start, Location::End];

    /// The other bank.
    pub fn opposite(self) -> Location {
        match self {
            Location::Start => Location::End,
            Location::End => Location::Start,
        }
    }
}

/// Index of an actor in its `Roster`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ActorId(u8);

impl ActorId {
    pub(crate) fn new(index: usize) -> Self {
        debug_assert!(index < MAX_ACTORS);
        Self(index as u8)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A set of actors, stored as a bitmask over roster indices.
///
/// Iteration yields ids in ascending index order, which for a `Roster` is
/// ascending crossing time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ActorSet(u64);

impl ActorSet {
    pub fn empty() -> Self {
        Self(0)
    }

    /// The set of the first `count` actors.
    pub fn full(count: usize) -> Self {
        if count >= MAX_ACTORS {
            Self(u64::MAX)
        } else {
            Self((1u64 << count) - 1)
        }
    }

    pub fn contains(self, id: ActorId) -> bool {
        self.0 & (1u64 << id.0) != 0
    }

    pub fn with(self, id: ActorId) -> Self {
        Self(self.0 | (1u64 << id.0))
    }

    pub fn without(self, id: ActorId) -> Self {
        Self(self.0 & !(1u64 << id.0))
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn union(self, other: ActorSet) -> Self {
        Self(self.0 | other.0)
    }

    pub fn is_disjoint(self, other: ActorSet) -> bool {
        self.0 & other.0 == 0
    }

    pub fn iter(self) -> ActorSetIter {
        ActorSetIter(self.0)
    }
}

impl IntoIterator for ActorSet {
    type Item = ActorId;
    type IntoIter = ActorSetIter;

    fn into_iter(self) -> ActorSetIter {
        self.iter()
    }
}

impl FromIterator<ActorId> for ActorSet {
    fn from_iter<I: IntoIterator<Item = ActorId>>(iter: I) -> Self {
        iter.into_iter().fold(ActorSet::empty(), ActorSet::with)
    }
}

/// Iterator over the members of an `ActorSet`, lowest index first.
#[derive(Debug, Clone)]
pub struct ActorSetIter(u64);

impl Iterator for ActorSetIter {
    type Item = ActorId;

    fn next(&mut self) -> Option<ActorId> {
        if self.0 == 0 {
            return None;
        }
        let index = self.0.trailing_zeros();
        self.0 &= self.0 - 1;
        Some(ActorId(index as u8))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for ActorSetIter {}

/// A puzzle participant. Only constructed through roster validation, so the
/// crossing time is always positive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    name: String,
    crossing_time: u32,
}

impl Actor {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn crossing_time(&self) -> u32 {
        self.crossing_time
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// The validated set of actors, ordered by ascending crossing time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    actors: Vec<Actor>,
}

impl Roster {
    /// Validate raw actor entries. Ties in crossing time keep their input order.
    pub fn new(entries: &[ActorConfig]) -> Result<Self, ConfigError> {
        if entries.is_empty() {
            return Err(ConfigError::EmptyRoster);
        }
        if entries.len() > MAX_ACTORS {
            return Err(ConfigError::TooManyActors {
                count: entries.len(),
                max: MAX_ACTORS,
            });
        }

        let mut seen = HashSet::new();
        let mut actors = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            let name = entry.name.trim();
            if name.is_empty() {
                return Err(ConfigError::EmptyName { index });
            }
            if entry.crossing_time == 0 {
                return Err(ConfigError::NonPositiveCrossingTime {
                    name: name.to_string(),
                });
            }
            if !seen.insert(name.to_string()) {
                return Err(ConfigError::DuplicateName(name.to_string()));
            }
            actors.push(Actor {
                name: name.to_string(),
                crossing_time: entry.crossing_time,
            });
        }

        actors.sort_by_key(|a| a.crossing_time);
        Ok(Self { actors })
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    /// # Panics
    ///
    /// If `id` does not belong to this roster.
    pub fn get(&self, id: ActorId) -> &Actor {
        &self.actors[id.index()]
    }

    pub fn ids(&self) -> impl Iterator<Item = ActorId> + '_ {
        (0..self.actors.len()).map(ActorId::new)
    }

    pub fn all(&self) -> ActorSet {
        ActorSet::full(self.actors.len())
    }

    /// Look up an actor by display name.
    pub fn find(&self, name: &str) -> Option<ActorId> {
        self.actors
            .iter()
            .position(|a| a.name == name)
            .map(ActorId::new)
    }

    pub fn min_crossing_time(&self) -> u32 {
        self.actors.first().map_or(0, |a| a.crossing_time)
    }

    /// Comma-separated names of the members of `set`.
    pub fn names(&self, set: impl IntoIterator<Item = ActorId>) -> String {
        set.into_iter()
            .map(|id| self.get(id).name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Which moves the walker is allowed to follow.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum MovePolicy {
    /// Pairs cross towards the end, single actors bring the light back.
    #[default]
    Restricted,
    /// Any group of one or two may cross in either direction.
    Permissive,
}

/// Display names of the two banks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceNames {
    pub start: String,
    pub end: String,
}

impl PlaceNames {
    pub fn name(&self, location: Location) -> &str {
        match location {
            Location::Start => &self.start,
            Location::End => &self.end,
        }
    }
}

impl Default for PlaceNames {
    fn default() -> Self {
        Self {
            start: "Peak".to_string(),
            end: "Safety".to_string(),
        }
    }
}

/// Raw actor entry as it appears in JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorConfig {
    pub name: String,
    pub crossing_time: u32,
}

impl ActorConfig {
    pub fn new(name: impl Into<String>, crossing_time: u32) -> Self {
        Self {
            name: name.into(),
            crossing_time,
        }
    }
}

/// Unvalidated puzzle description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PuzzleConfig {
    pub actors: Vec<ActorConfig>,
    pub time_limit: u32,
    #[serde(default)]
    pub policy: MovePolicy,
    #[serde(default)]
    pub places: PlaceNames,
}

impl PuzzleConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for PuzzleConfig {
    /// The classic four-person instance.
    fn default() -> Self {
        Self {
            actors: vec![
                ActorConfig::new("Me", 1),
                ActorConfig::new("Lab assistant", 2),
                ActorConfig::new("Janitor", 5),
                ActorConfig::new("Professor", 10),
            ],
            time_limit: 17,
            policy: MovePolicy::Restricted,
            places: PlaceNames::default(),
        }
    }
}

/// A validated puzzle instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    pub roster: Roster,
    pub time_limit: u32,
    pub policy: MovePolicy,
    pub places: PlaceNames,
}

impl Puzzle {
    pub fn from_config(config: &PuzzleConfig) -> Result<Self, ConfigError> {
        let roster = Roster::new(&config.actors)?;
        if config.time_limit == 0 {
            return Err(ConfigError::ZeroTimeLimit);
        }
        Ok(Self {
            roster,
            time_limit: config.time_limit,
            policy: config.policy,
            places: config.places.clone(),
        })
    }

    pub fn with_policy(mut self, policy: MovePolicy) -> Self {
        self.policy = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let puzzle = Puzzle::from_config(&PuzzleConfig::default()).unwrap();
        assert_eq!(puzzle.roster.len(), 4);
        assert_eq!(puzzle.time_limit, 17);
        assert_eq!(puzzle.policy, MovePolicy::Restricted);
        assert_eq!(puzzle.places.name(Location::Start), "Peak");
    }

    #[test]
    fn test_roster_sorted_by_crossing_time() {
        let roster = Roster::new(&[
            ActorConfig::new("Slow", 10),
            ActorConfig::new("Fast", 1),
            ActorConfig::new("Mid", 5),
            ActorConfig::new("AlsoFast", 1),
        ])
        .unwrap();

        let names: Vec<&str> = roster.ids().map(|id| roster.get(id).name()).collect();
        assert_eq!(names, vec!["Fast", "AlsoFast", "Mid", "Slow"]);
        assert_eq!(roster.min_crossing_time(), 1);
    }

    #[test]
    fn test_rejects_malformed_rosters() {
        assert!(matches!(Roster::new(&[]), Err(ConfigError::EmptyRoster)));
        assert!(matches!(
            Roster::new(&[ActorConfig::new("A", 1), ActorConfig::new("A", 2)]),
            Err(ConfigError::DuplicateName(name)) if name == "A"
        ));
        assert!(matches!(
            Roster::new(&[ActorConfig::new("A", 0)]),
            Err(ConfigError::NonPositiveCrossingTime { .. })
        ));
        assert!(matches!(
            Roster::new(&[ActorConfig::new("  ", 3)]),
            Err(ConfigError::EmptyName { index: 0 })
        ));

        let crowd: Vec<ActorConfig> = (0..65).map(|i| ActorConfig::new(format!("a{i}"), 1)).collect();
        assert!(matches!(
            Roster::new(&crowd),
            Err(ConfigError::TooManyActors { count: 65, max: 64 })
        ));
    }

    #[test]
    fn test_rejects_zero_time_limit() {
        let config = PuzzleConfig {
            time_limit: 0,
            ..PuzzleConfig::default()
        };
        assert!(matches!(
            Puzzle::from_config(&config),
            Err(ConfigError::ZeroTimeLimit)
        ));
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{
            "actors": [
                { "name": "Me", "crossingTime": 1 },
                { "name": "You", "crossingTime": 3 }
            ],
            "timeLimit": 9,
            "policy": "permissive"
        }"#;
        let config = PuzzleConfig::from_json(json).unwrap();
        assert_eq!(config.actors[1], ActorConfig::new("You", 3));
        assert_eq!(config.policy, MovePolicy::Permissive);
        assert_eq!(config.places, PlaceNames::default());

        assert!(matches!(
            PuzzleConfig::from_json("{ \"actors\": [] }"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_actor_set_operations() {
        let a = ActorId::new(0);
        let c = ActorId::new(2);
        let set = ActorSet::empty().with(c).with(a);

        assert_eq!(set.len(), 2);
        assert!(set.contains(a) && set.contains(c));
        assert!(!set.contains(ActorId::new(1)));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![a, c]);
        assert_eq!(set.without(a).iter().collect::<Vec<_>>(), vec![c]);
        assert_eq!(ActorSet::full(3).len(), 3);
        assert_eq!(ActorSet::full(64).len(), 64);
        assert!(set.is_disjoint(ActorSet::empty().with(ActorId::new(1))));
    }

    #[test]
    fn test_location_opposite() {
        assert_eq!(Location::Start.opposite(), Location::End);
        assert_eq!(Location::End.opposite(), Location::Start);
    }
}
