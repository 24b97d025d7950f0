//! Exhaustive depth-first walk over the puzzle's state graph.
//!
//! The walker is a lazy iterator of transitions. It keeps an explicit stack
//! of frames, one per state on the current path, each holding the moves not
//! yet taken from that state. A branch stops growing once its state is a
//! victory or has run past the time limit. There is no visited set: a state
//! reached along different paths is expanded again each time.
//!
//! Every move costs at least the fastest crossing time, so a path holds at
//! most `time_limit / min_crossing_time + 1` moves and the walk always ends.

use std::time::Instant;

use serde::Serialize;

use crate::moves::{legal_moves, MoveList};
use crate::puzzle::Puzzle;
use crate::state::{Move, State};

/// Classification of the state a transition leads to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// Still within the limit with actors left to cross; will be expanded.
    Exploring,
    /// Everyone across within the limit.
    Victory,
    /// Over the time limit.
    Exceeded,
}

impl Outcome {
    pub fn classify(state: &State, time_limit: u32) -> Outcome {
        if state.is_exceeded(time_limit) {
            Outcome::Exceeded
        } else if state.is_victory(time_limit) {
            Outcome::Victory
        } else {
            Outcome::Exploring
        }
    }

    pub fn is_terminal(self) -> bool {
        !matches!(self, Outcome::Exploring)
    }
}

/// One edge of the state graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub from: State,
    pub mv: Move,
    pub to: State,
    pub outcome: Outcome,
    /// Number of moves from the initial state to `from`.
    pub depth: usize,
}

/// Counters collected while walking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkStats {
    pub transitions: usize,
    pub victories: usize,
    pub exceeded: usize,
    /// Non-terminal states with no legal move, the initial state included.
    pub dead_ends: usize,
    /// Longest path, in moves.
    pub max_depth: usize,
}

/// A state on the current path and the moves still to try from it.
#[derive(Debug, Clone)]
struct Frame {
    state: State,
    moves: MoveList,
    next: usize,
}

/// Lazy producer of every transition reachable from the initial state.
#[derive(Debug, Clone)]
pub struct Walker<'p> {
    puzzle: &'p Puzzle,
    stack: Vec<Frame>,
    stats: WalkStats,
}

impl<'p> Walker<'p> {
    pub fn new(puzzle: &'p Puzzle) -> Self {
        let mut walker = Self {
            puzzle,
            stack: Vec::new(),
            stats: WalkStats::default(),
        };
        walker.push(State::initial(puzzle));
        walker
    }

    pub fn stats(&self) -> &WalkStats {
        &self.stats
    }

    pub fn puzzle(&self) -> &'p Puzzle {
        self.puzzle
    }

    fn push(&mut self, state: State) {
        let moves = legal_moves(&state, &self.puzzle.roster, self.puzzle.policy);
        if moves.is_empty() {
            self.stats.dead_ends += 1;
            return;
        }
        self.stack.push(Frame {
            state,
            moves,
            next: 0,
        });
    }
}

impl Iterator for Walker<'_> {
    type Item = Transition;

    fn next(&mut self) -> Option<Transition> {
        loop {
            let depth = self.stack.len().checked_sub(1)?;
            let frame = &mut self.stack[depth];

            let Some(&mv) = frame.moves.get(frame.next) else {
                self.stack.pop();
                continue;
            };
            frame.next += 1;

            let from = frame.state.clone();
            let to = from.advance(&mv, self.puzzle.time_limit);
            let outcome = Outcome::classify(&to, self.puzzle.time_limit);

            self.stats.transitions += 1;
            self.stats.max_depth = self.stats.max_depth.max(depth + 1);
            match outcome {
                Outcome::Victory => self.stats.victories += 1,
                Outcome::Exceeded => self.stats.exceeded += 1,
                Outcome::Exploring => self.push(to.clone()),
            }

            return Some(Transition {
                from,
                mv,
                to,
                outcome,
                depth,
            });
        }
    }
}

/// Summary of a complete walk.
#[derive(Debug, Clone)]
pub struct WalkReport {
    pub stats: WalkStats,
    /// Elapsed puzzle time of the first victory the walk emitted.
    pub first_victory_time: Option<u64>,
    pub time_elapsed_ms: u64,
}

impl WalkReport {
    pub fn solvable(&self) -> bool {
        self.stats.victories > 0
    }
}

/// Drain a walker over `puzzle`, keeping only the counters.
pub fn explore(puzzle: &Puzzle) -> WalkReport {
    let start_time = Instant::now();
    let mut walker = Walker::new(puzzle);
    let mut first_victory_time = None;

    for transition in walker.by_ref() {
        if transition.outcome == Outcome::Victory && first_victory_time.is_none() {
            first_victory_time = Some(transition.to.elapsed_time());
        }
    }

    WalkReport {
        stats: walker.stats().clone(),
        first_victory_time,
        time_elapsed_ms: start_time.elapsed().as_millis() as u64,
    }
}

/// Upper bound on moves along any path of the walk.
pub fn max_path_length(puzzle: &Puzzle) -> usize {
    (puzzle.time_limit / puzzle.roster.min_crossing_time()) as usize + 1
}
