//! # rulegrid
//!
//! A grid puzzle engine in which the rules governing object behavior are
//! themselves movable, on-grid text tokens. The active rule set is spelled
//! out by adjacent text tiles (`BABA IS YOU`, `WALL IS STOP`), so moving a
//! tile rewrites the physics mid-episode.
//!
//! ## Design Principles
//!
//! 1. **Rules are derived state**: the rule tables are rebuilt by a full
//!    board rescan every tick, never updated incrementally. One moved tile
//!    can break and form several rules in both axes; at tens of cells per
//!    side a rescan is cheap and obviously correct.
//!
//! 2. **Capabilities are plain data**: what an object can do is a lookup
//!    in the per-tick property table, not dynamic dispatch.
//!
//! 3. **Single-owner state**: a grid exclusively owns its objects and is
//!    mutated by one caller at a time. Snapshots are explicit deep copies
//!    that share nothing with the source.
//!
//! ## Modules
//!
//! - `core`: objects, actions, properties, errors
//! - `grid`: the board, spatial queries, observations
//! - `rules`: rule derivation and queries
//! - `step`: the per-tick resolver (movement, pushes, contacts, terminal
//!   state)
//! - `envs`: named level registry and the reset/step environment contract
//! - `harness`: the line-oriented JSON evaluation protocol

pub mod core;
pub mod envs;
pub mod grid;
pub mod harness;
pub mod rules;
pub mod step;

// Re-export commonly used types
pub use crate::core::{Action, Direction, EngineError, Object, Property, Word};
pub use crate::envs::{
    create_environment, Environment, EnvironmentRegistry, LevelEntry, StepInfo, Transition,
};
pub use crate::grid::{Grid, ObjectQuery, Observation};
pub use crate::harness::{Reply, Session};
pub use crate::rules::{Rule, RuleManager, RulePredicate};
