//! Engine error taxonomy.
//!
//! Nothing inside the simulation core is fatal: every variant here is
//! recovered at the protocol boundary and reported as a structured
//! response. Malformed JSON input is not represented here because it can
//! only occur in the harness layer, where the `serde_json` error is
//! reported directly.

use thiserror::Error;

/// Errors surfaced by the engine and its environment layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A spatial query addressed a cell outside the grid.
    #[error("coordinates ({x}, {y}) are out of bounds for a {width}x{height} grid")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },

    /// `create_environment` was given a name that is not registered.
    #[error("Unknown environment: {0}. Use 'list_envs' to see available environments.")]
    UnknownEnvironment(String),

    /// `step` or `info` was requested before any environment was reset.
    #[error("No environment loaded. Use 'reset' first.")]
    NoEnvironmentLoaded,

    /// An action string outside the five recognized values.
    #[error("Invalid action: {0}. Valid actions: up, down, left, right, wait")]
    InvalidAction(String),
}
