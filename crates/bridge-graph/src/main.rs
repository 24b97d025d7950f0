//! CLI entry point for the bridge graph generator.
//!
//! Usage:
//!   bridge-graph dot [<puzzle.json>] [options]
//!   bridge-graph trace --stdin [options]
//!   bridge-graph json [<puzzle.json>] [options]
//!   bridge-graph summary [<puzzle.json>] [options]
//!
//! Without a file or --stdin the classic four-person puzzle is used.
//!
//! Options:
//!   --time-limit <n>      Override the puzzle's time limit
//!   --policy <policy>     restricted (default) or permissive
//!   --log-file <path>     Write verbose progress messages to a file

use std::fs;
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use bridge_graph::logger::{
    flush_global_logger, init_global_logger, log_verbose_error, log_verbose_message,
};
use bridge_graph::{
    explore, render_dot, render_json, render_trace, AppError, MovePolicy, Puzzle, PuzzleConfig,
    WalkReport, Walker,
};

#[derive(Parser)]
#[command(name = "bridge-graph")]
#[command(about = "State-transition graph generator for the bridge and torch puzzle")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the state graph in Graphviz DOT format
    Dot(InputArgs),
    /// Print an indented, human-readable trace of every transition
    Trace(InputArgs),
    /// Print one JSON object per transition
    Json(InputArgs),
    /// Walk the graph and print counts as JSON; exits 1 when unsolvable
    Summary(InputArgs),
}

#[derive(Args)]
struct InputArgs {
    /// Path to puzzle JSON file
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Read puzzle from stdin instead of file
    #[arg(long, conflicts_with = "file")]
    stdin: bool,

    /// Override the time limit, in minutes
    #[arg(long)]
    time_limit: Option<u32>,

    /// Which moves the walk follows
    #[arg(long, value_enum)]
    policy: Option<MovePolicy>,

    /// Write verbose progress messages to this file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

/// Output format for the summary command
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SummaryOutput {
    solvable: bool,
    time_limit: u32,
    policy: MovePolicy,
    transitions: usize,
    victories: usize,
    exceeded: usize,
    dead_ends: usize,
    max_depth: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    first_victory_time: Option<u64>,
    time_elapsed_ms: u64,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Dot(input) => run_render(&input, |out, puzzle| {
            render_dot(out, puzzle, Walker::new(puzzle))
        }),
        Commands::Trace(input) => run_render(&input, |out, puzzle| {
            render_trace(out, puzzle, Walker::new(puzzle))
        }),
        Commands::Json(input) => run_render(&input, |out, puzzle| {
            render_json(out, puzzle, Walker::new(puzzle))
        }),
        Commands::Summary(input) => run_summary(&input),
    };

    let code = match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            log_verbose_error(&e.to_string());
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    };
    flush_global_logger();
    code
}

/// Read, override and validate the puzzle named by the arguments.
fn load_puzzle(input: &InputArgs) -> Result<Puzzle, AppError> {
    if let Some(path) = &input.log_file {
        init_global_logger(path)?;
    }

    let mut config = if input.stdin {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        log_verbose_message("Loaded puzzle from stdin");
        PuzzleConfig::from_json(&buffer)?
    } else if let Some(path) = &input.file {
        let json = fs::read_to_string(path)?;
        log_verbose_message(&format!("Loaded puzzle from {}", path.display()));
        PuzzleConfig::from_json(&json)?
    } else {
        log_verbose_message("Using the built-in puzzle");
        PuzzleConfig::default()
    };

    if let Some(time_limit) = input.time_limit {
        config.time_limit = time_limit;
    }
    if let Some(policy) = input.policy {
        config.policy = policy;
    }

    let puzzle = Puzzle::from_config(&config)?;
    log_verbose_message(&format!(
        "Puzzle: {} actors, time limit {}min, {:?} policy",
        puzzle.roster.len(),
        puzzle.time_limit,
        puzzle.policy
    ));
    Ok(puzzle)
}

fn run_render<F>(input: &InputArgs, render: F) -> Result<bool, AppError>
where
    F: FnOnce(&mut BufWriter<io::StdoutLock<'static>>, &Puzzle) -> io::Result<()>,
{
    let puzzle = load_puzzle(input)?;
    let mut out = BufWriter::new(io::stdout().lock());
    render(&mut out, &puzzle)?;
    out.flush()?;
    log_verbose_message("Rendering finished");
    Ok(true)
}

fn run_summary(input: &InputArgs) -> Result<bool, AppError> {
    let puzzle = load_puzzle(input)?;
    let report = explore(&puzzle);
    log_verbose_message(&format!(
        "Walk finished: {} transitions, {} victories, {} exceeded, {} dead ends in {}ms",
        report.stats.transitions,
        report.stats.victories,
        report.stats.exceeded,
        report.stats.dead_ends,
        report.time_elapsed_ms
    ));

    let output = format_report(&puzzle, &report);
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(report.solvable())
}

fn format_report(puzzle: &Puzzle, report: &WalkReport) -> SummaryOutput {
    SummaryOutput {
        solvable: report.solvable(),
        time_limit: puzzle.time_limit,
        policy: puzzle.policy,
        transitions: report.stats.transitions,
        victories: report.stats.victories,
        exceeded: report.stats.exceeded,
        dead_ends: report.stats.dead_ends,
        max_depth: report.stats.max_depth,
        first_victory_time: report.first_victory_time,
        time_elapsed_ms: report.time_elapsed_ms,
    }
}
