//! Candidate move generation and the direction policy.
//!
//! The raw generator follows only the physical rules: the light leaves from
//! where it is, with one or two of the actors standing there. The restricted
//! policy additionally requires pairs going forward and single actors coming
//! back.

use smallvec::SmallVec;

use crate::puzzle::{ActorId, Location, MovePolicy, Roster};
use crate::state::{Group, Move, State};

/// Move list sized for small rosters without heap allocation.
pub type MoveList = SmallVec<[Move; 16]>;

/// Every group of one or two actors at the light, singles first, then pairs,
/// each in ascending crossing-time order.
pub fn candidate_groups(state: &State) -> SmallVec<[Group; 16]> {
    let here: SmallVec<[ActorId; 8]> = state.actors_at(state.light_location()).iter().collect();
    let mut groups: SmallVec<[Group; 16]> = here.iter().map(|&a| Group::Single(a)).collect();

    for (i, &a) in here.iter().enumerate() {
        groups.extend(here[i + 1..].iter().filter_map(|&b| Group::pair(a, b)));
    }

    groups
}

/// Every physically possible move from `state`: one per group, each heading
/// to the only other bank.
pub fn generate_candidate_moves(state: &State, roster: &Roster) -> MoveList {
    let origin = state.light_location();
    candidate_groups(state)
        .into_iter()
        .map(|group| Move::new(group, origin, roster))
        .collect()
}

/// Whether `mv` is allowed under `policy`.
pub fn is_allowed(mv: &Move, policy: MovePolicy) -> bool {
    match policy {
        MovePolicy::Permissive => true,
        MovePolicy::Restricted => match mv.destination() {
            Location::End => mv.group().len() == 2,
            Location::Start => mv.group().len() == 1,
        },
    }
}

/// Candidate moves filtered by `policy`, in generation order.
pub fn legal_moves(state: &State, roster: &Roster, policy: MovePolicy) -> MoveList {
    generate_candidate_moves(state, roster)
        .into_iter()
        .filter(|mv| is_allowed(mv, policy))
        .collect()
}
