//! Error types for configuration, move execution and the command-line tool.

use thiserror::Error;

use crate::puzzle::Location;

/// Problems found while loading or validating a puzzle configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("roster is empty, at least one actor is required")]
    EmptyRoster,

    #[error("actor #{index} has an empty name")]
    EmptyName { index: usize },

    #[error("duplicate actor name '{0}'")]
    DuplicateName(String),

    #[error("actor '{name}' has a crossing time of 0, crossing times must be positive")]
    NonPositiveCrossingTime { name: String },

    #[error("time limit must be positive")]
    ZeroTimeLimit,

    #[error("roster has {count} actors, at most {max} are supported")]
    TooManyActors { count: usize, max: usize },

    #[error("invalid puzzle JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A move that cannot be applied to the state it was offered to.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("move departs from {origin:?} but the light is at {light:?}")]
    OriginMismatch { origin: Location, light: Location },

    #[error("actor '{actor}' is not at {origin:?}")]
    ActorNotAtOrigin { actor: String, origin: Location },

    #[error("actor '{actor}' appears twice in one pair")]
    DuplicateMember { actor: String },
}

/// Top-level error of the `bridge-graph` binary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("JSON output error: {0}")]
    Json(#[from] serde_json::Error),
}
