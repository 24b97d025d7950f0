//! Checked move execution.
//!
//! `execute` validates a move against the state it is applied to before
//! producing the successor. The walker skips the checks because its moves
//! come straight from the generator.

use crate::error::MoveError;
use crate::puzzle::Puzzle;
use crate::state::{Group, Move, State};

/// Apply `mv` to `state`, returning the successor state.
///
/// Fails if the move does not leave from the light's location, if its pair
/// names the same actor twice, or if any member of its group is not standing
/// there.
pub fn execute(puzzle: &Puzzle, state: &State, mv: &Move) -> Result<State, MoveError> {
    if mv.origin() != state.light_location() {
        return Err(MoveError::OriginMismatch {
            origin: mv.origin(),
            light: state.light_location(),
        });
    }

    if let Group::Pair(a, b) = mv.group() {
        if a == b {
            return Err(MoveError::DuplicateMember {
                actor: puzzle.roster.get(a).name().to_string(),
            });
        }
    }

    let present = state.actors_at(mv.origin());
    if let Some(missing) = mv.group().members().iter().find(|&id| !present.contains(id)) {
        return Err(MoveError::ActorNotAtOrigin {
            actor: puzzle.roster.get(missing).name().to_string(),
            origin: mv.origin(),
        });
    }

    Ok(state.advance(mv, puzzle.time_limit))
}

/// Replay a sequence of moves from the initial state.
pub fn replay<'m>(
    puzzle: &Puzzle,
    moves: impl IntoIterator<Item = &'m Move>,
) -> Result<State, MoveError> {
    moves
        .into_iter()
        .try_fold(State::initial(puzzle), |state, mv| execute(puzzle, &state, mv))
}
