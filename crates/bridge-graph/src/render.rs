//! Text renderings of a walk: Graphviz DOT, an indented trace, and JSON lines.
//!
//! Renderers consume transitions as they are produced and write them out
//! immediately, so memory use stays bounded by the walker's stack.

use std::io::{self, Write};

use serde::Serialize;

use crate::puzzle::{Location, Puzzle};
use crate::state::{Move, State};
use crate::walker::{Outcome, Transition};

/// `t = 3min: Peak (Janitor, Professor) | Safety (Me, Lab assistant)`
pub fn state_label(puzzle: &Puzzle, state: &State) -> String {
    format!("t = {}min: {}", state.elapsed_time(), placement(puzzle, state))
}

fn placement(puzzle: &Puzzle, state: &State) -> String {
    Location::ALL
        .iter()
        .map(|&l| {
            format!(
                "{} ({})",
                puzzle.places.name(l),
                puzzle.roster.names(state.actors_at(l))
            )
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

/// `Peak ----(Me, Lab assistant | 2min)----> Safety`
pub fn move_label(puzzle: &Puzzle, mv: &Move) -> String {
    format!(
        "{} ----({} | {}min)----> {}",
        puzzle.places.name(mv.origin()),
        puzzle.roster.names(mv.group().members()),
        mv.duration(),
        puzzle.places.name(mv.destination())
    )
}

fn dot_escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

fn dot_node(puzzle: &Puzzle, state: &State) -> String {
    format!(
        "\"t = {}min\\n{}\"",
        state.elapsed_time(),
        dot_escape(&placement(puzzle, state))
    )
}

/// Hue runs from green at no time spent to red at the limit.
fn criticality_color(criticality: f64) -> String {
    let hue = (1.0 - criticality.clamp(0.0, 1.0)) / 3.0;
    format!("{:.3} 1.000 0.850", hue)
}

fn dot_node_attributes(state: &State, outcome: Outcome) -> String {
    match outcome {
        Outcome::Victory => {
            "style=filled, fillcolor=\"0.333 0.600 1.000\", peripheries=2".to_string()
        }
        Outcome::Exceeded => "style=dashed, color=red, fontcolor=red".to_string(),
        Outcome::Exploring => format!("color=\"{}\"", criticality_color(state.criticality())),
    }
}

/// Write the walk as a strict Graphviz digraph.
///
/// Nodes are keyed by their label: elapsed time and who stands on each bank.
/// The light's position is not part of the label, so two states that differ
/// only in where the light is share a node. The walker re-expands states it
/// reaches more than once and repeats their edges; `strict` makes Graphviz
/// draw each edge once.
pub fn render_dot<W: Write>(
    out: &mut W,
    puzzle: &Puzzle,
    transitions: impl IntoIterator<Item = Transition>,
) -> io::Result<()> {
    writeln!(out, "strict digraph \"Bridge Riddle graph\" {{")?;
    writeln!(out, "\tnode [shape=box];")?;
    writeln!(
        out,
        "\t{} [{}];",
        dot_node(puzzle, &State::initial(puzzle)),
        dot_node_attributes(&State::initial(puzzle), Outcome::Exploring)
    )?;

    for t in transitions {
        let to = dot_node(puzzle, &t.to);
        writeln!(out, "\t{} [{}];", to, dot_node_attributes(&t.to, t.outcome))?;
        writeln!(
            out,
            "\t{} -> {} [label=\"{} | {}min\"];",
            dot_node(puzzle, &t.from),
            to,
            dot_escape(&puzzle.roster.names(t.mv.group().members())),
            t.mv.duration()
        )?;
    }

    writeln!(out, "}}")
}

/// Write one indented line per transition, followed by a summary line.
pub fn render_trace<W: Write>(
    out: &mut W,
    puzzle: &Puzzle,
    transitions: impl IntoIterator<Item = Transition>,
) -> io::Result<()> {
    writeln!(out, "{}", state_label(puzzle, &State::initial(puzzle)))?;

    let mut victories = 0usize;
    let mut count = 0usize;
    for t in transitions {
        count += 1;
        let marker = match t.outcome {
            Outcome::Victory => {
                victories += 1;
                "  VICTORY"
            }
            Outcome::Exceeded => "  EXCEEDED",
            Outcome::Exploring => "",
        };
        writeln!(
            out,
            "{}{}  =>  {}{}",
            "  ".repeat(t.depth + 1),
            move_label(puzzle, &t.mv),
            state_label(puzzle, &t.to),
            marker
        )?;
    }

    if victories == 0 {
        writeln!(out, "no solution found ({} transitions)", count)
    } else {
        writeln!(out, "{} victories in {} transitions", victories, count)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StateRecord<'a> {
    elapsed_time: u64,
    light: &'a str,
    start: Vec<&'a str>,
    end: Vec<&'a str>,
    criticality: f64,
}

impl<'a> StateRecord<'a> {
    fn new(puzzle: &'a Puzzle, state: &State) -> Self {
        let names = |l: Location| -> Vec<&'a str> {
            state
                .actors_at(l)
                .iter()
                .map(|id| puzzle.roster.get(id).name())
                .collect()
        };
        Self {
            elapsed_time: state.elapsed_time(),
            light: puzzle.places.name(state.light_location()),
            start: names(Location::Start),
            end: names(Location::End),
            criticality: state.criticality(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MoveRecord<'a> {
    group: Vec<&'a str>,
    origin: &'a str,
    destination: &'a str,
    duration: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TransitionRecord<'a> {
    depth: usize,
    from: StateRecord<'a>,
    #[serde(rename = "move")]
    mv: MoveRecord<'a>,
    to: StateRecord<'a>,
    outcome: Outcome,
}

/// Write one JSON object per transition.
pub fn render_json<W: Write>(
    out: &mut W,
    puzzle: &Puzzle,
    transitions: impl IntoIterator<Item = Transition>,
) -> io::Result<()> {
    for t in transitions {
        let record = TransitionRecord {
            depth: t.depth,
            from: StateRecord::new(puzzle, &t.from),
            mv: MoveRecord {
                group: t
                    .mv
                    .group()
                    .members()
                    .iter()
                    .map(|id| puzzle.roster.get(id).name())
                    .collect(),
                origin: puzzle.places.name(t.mv.origin()),
                destination: puzzle.places.name(t.mv.destination()),
                duration: t.mv.duration(),
            },
            to: StateRecord::new(puzzle, &t.to),
            outcome: t.outcome,
        };
        serde_json::to_writer(&mut *out, &record)?;
        writeln!(out)?;
    }
    Ok(())
}
