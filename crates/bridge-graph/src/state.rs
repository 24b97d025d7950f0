//! Puzzle states and the moves between them.

use crate::puzzle::{ActorId, ActorSet, Location, Puzzle, Roster};

/// The actors crossing together in one move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Group {
    Single(ActorId),
    Pair(ActorId, ActorId),
}

impl Group {
    /// A pair of two distinct actors, lower id first. `None` if `a == b`.
    pub fn pair(a: ActorId, b: ActorId) -> Option<Group> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Group::Pair(a, b)),
            std::cmp::Ordering::Greater => Some(Group::Pair(b, a)),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn len(self) -> usize {
        match self {
            Group::Single(_) => 1,
            Group::Pair(..) => 2,
        }
    }

    pub fn members(self) -> ActorSet {
        match self {
            Group::Single(a) => ActorSet::empty().with(a),
            Group::Pair(a, b) => ActorSet::empty().with(a).with(b),
        }
    }

    /// Crossing time of the slowest member.
    pub fn duration(self, roster: &Roster) -> u32 {
        match self {
            Group::Single(a) => roster.get(a).crossing_time(),
            Group::Pair(a, b) => roster
                .get(a)
                .crossing_time()
                .max(roster.get(b).crossing_time()),
        }
    }
}

/// A group carrying the light from one bank to the other. The destination is
/// always the bank opposite the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    group: Group,
    origin: Location,
    destination: Location,
    duration: u32,
}

impl Move {
    /// # Panics
    ///
    /// If a member of `group` is not an id of `roster`.
    pub fn new(group: Group, origin: Location, roster: &Roster) -> Self {
        Self {
            group,
            origin,
            destination: origin.opposite(),
            duration: group.duration(roster),
        }
    }

    pub fn group(&self) -> Group {
        self.group
    }

    pub fn origin(&self) -> Location {
        self.origin
    }

    pub fn destination(&self) -> Location {
        self.destination
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }
}

/// Snapshot of actor and light placement. States are values: applying a
/// move yields a new state and leaves the old one untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    start: ActorSet,
    end: ActorSet,
    light: Location,
    elapsed: u64,
    criticality: f64,
}

impl State {
    /// Everyone and the light at the start, no time spent.
    pub fn initial(puzzle: &Puzzle) -> Self {
        Self {
            start: puzzle.roster.all(),
            end: ActorSet::empty(),
            light: Location::Start,
            elapsed: 0,
            criticality: 0.0,
        }
    }

    pub fn actors_at(&self, location: Location) -> ActorSet {
        match location {
            Location::Start => self.start,
            Location::End => self.end,
        }
    }

    pub fn light_location(&self) -> Location {
        self.light
    }

    pub fn elapsed_time(&self) -> u64 {
        self.elapsed
    }

    /// Elapsed time clamped to the limit, as a fraction of the limit.
    pub fn criticality(&self) -> f64 {
        self.criticality
    }

    pub fn is_victory(&self, time_limit: u32) -> bool {
        self.start.is_empty() && self.elapsed <= u64::from(time_limit)
    }

    pub fn is_exceeded(&self, time_limit: u32) -> bool {
        self.elapsed > u64::from(time_limit)
    }

    /// Apply a move known to be valid for this state.
    pub(crate) fn advance(&self, mv: &Move, time_limit: u32) -> State {
        let members = mv.group.members();
        let mut start = self.start;
        let mut end = self.end;
        for id in members {
            match mv.destination {
                Location::End => {
                    start = start.without(id);
                    end = end.with(id);
                }
                Location::Start => {
                    end = end.without(id);
                    start = start.with(id);
                }
            }
        }

        // u32 durations added to a u64 total cannot overflow within any
        // walk bounded by a u32 limit.
        let elapsed = self.elapsed + u64::from(mv.duration);
        State {
            start,
            end,
            light: mv.destination,
            elapsed,
            criticality: criticality(elapsed, time_limit),
        }
    }
}

fn criticality(elapsed: u64, time_limit: u32) -> f64 {
    if time_limit == 0 {
        return 1.0;
    }
    let limit = u64::from(time_limit);
    elapsed.min(limit) as f64 / limit as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::{ActorConfig, PuzzleConfig};

    fn classic() -> Puzzle {
        Puzzle::from_config(&PuzzleConfig::default()).unwrap()
    }

    #[test]
    fn test_group_duration_is_slowest_member() {
        let puzzle = classic();
        let me = puzzle.roster.find("Me").unwrap();
        let professor = puzzle.roster.find("Professor").unwrap();

        assert_eq!(Group::Single(me).duration(&puzzle.roster), 1);
        assert_eq!(Group::Pair(me, professor).duration(&puzzle.roster), 10);
        assert_eq!(Group::Pair(me, professor).len(), 2);
    }

    #[test]
    fn test_initial_state() {
        let puzzle = classic();
        let state = State::initial(&puzzle);

        assert_eq!(state.actors_at(Location::Start).len(), 4);
        assert!(state.actors_at(Location::End).is_empty());
        assert_eq!(state.light_location(), Location::Start);
        assert_eq!(state.elapsed_time(), 0);
        assert_eq!(state.criticality(), 0.0);
        assert!(!state.is_victory(puzzle.time_limit));
    }

    #[test]
    fn test_advance_leaves_source_untouched() {
        let puzzle = classic();
        let me = puzzle.roster.find("Me").unwrap();
        let janitor = puzzle.roster.find("Janitor").unwrap();
        let state = State::initial(&puzzle);
        let mv = Move::new(Group::Pair(me, janitor), Location::Start, &puzzle.roster);

        let next = state.advance(&mv, puzzle.time_limit);

        assert_eq!(state, State::initial(&puzzle));
        assert_eq!(next.elapsed_time(), 5);
        assert_eq!(next.light_location(), Location::End);
        assert!(next.actors_at(Location::End).contains(me));
        assert!(next.actors_at(Location::End).contains(janitor));
        assert_eq!(next.actors_at(Location::Start).len(), 2);
        assert!((next.criticality() - 5.0 / 17.0).abs() < 1e-12);
    }

    #[test]
    fn test_pair_requires_distinct_actors() {
        let puzzle = classic();
        let me = puzzle.roster.find("Me").unwrap();
        let janitor = puzzle.roster.find("Janitor").unwrap();

        assert_eq!(Group::pair(me, me), None);
        assert_eq!(Group::pair(janitor, me), Some(Group::Pair(me, janitor)));
    }

    #[test]
    fn test_move_destination_is_other_bank() {
        let puzzle = classic();
        let me = puzzle.roster.find("Me").unwrap();

        let forward = Move::new(Group::Single(me), Location::Start, &puzzle.roster);
        let back = Move::new(Group::Single(me), Location::End, &puzzle.roster);
        assert_eq!(forward.destination(), Location::End);
        assert_eq!(back.destination(), Location::Start);
    }

    #[test]
    fn test_elapsed_time_grows_past_u32() {
        let config = PuzzleConfig {
            actors: vec![
                ActorConfig::new("A", 4_000_000_000),
                ActorConfig::new("B", 4_000_000_000),
            ],
            time_limit: u32::MAX,
            ..PuzzleConfig::default()
        };
        let puzzle = Puzzle::from_config(&config).unwrap();
        let a = puzzle.roster.find("A").unwrap();
        let forward = Move::new(Group::Single(a), Location::Start, &puzzle.roster);
        let back = Move::new(Group::Single(a), Location::End, &puzzle.roster);

        let state = State::initial(&puzzle)
            .advance(&forward, puzzle.time_limit)
            .advance(&back, puzzle.time_limit);

        assert_eq!(state.elapsed_time(), 8_000_000_000);
        assert!(state.is_exceeded(puzzle.time_limit));
        assert_eq!(state.criticality(), 1.0);
    }

    #[test]
    fn test_criticality_is_clamped() {
        assert_eq!(criticality(40, 17), 1.0);
        assert_eq!(criticality(0, 17), 0.0);
    }
}
