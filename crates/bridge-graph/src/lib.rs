//! State-transition graph generator for the bridge and torch puzzle.
//!
//! Actors with fixed crossing times must all get from the start bank to the
//! end bank, at most two at a time, always carrying the single light, within
//! a time limit. This crate enumerates every reachable state and every move
//! between them, marking victories and states past the limit, and renders
//! the result as a trace, JSON lines, or a Graphviz graph.

pub mod error;
pub mod executor;
pub mod logger;
pub mod moves;
pub mod puzzle;
pub mod render;
pub mod state;
pub mod walker;

// Re-export main types
pub use error::{AppError, ConfigError, MoveError};
pub use executor::{execute, replay};
pub use moves::{generate_candidate_moves, is_allowed, legal_moves, MoveList};
pub use puzzle::{
    Actor, ActorConfig, ActorId, ActorSet, Location, MovePolicy, PlaceNames, Puzzle, PuzzleConfig,
    Roster,
};
pub use render::{render_dot, render_json, render_trace};
pub use state::{Group, Move, State};
pub use walker::{explore, max_path_length, Outcome, Transition, WalkReport, WalkStats, Walker};
