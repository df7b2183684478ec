//! Environments: named level layouts bound to the step resolver.
//!
//! The registry is an explicit lookup table, constructed once and passed
//! around; there is no implicit shared global. Each [`Environment`] owns
//! its own grid exclusively.

pub mod levels;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{Action, EngineError};
use crate::grid::{Grid, Observation};

/// One registered level: a name, a difficulty annotation, and a layout
/// constructor. Difficulty carries no game logic.
#[derive(Clone, Copy)]
pub struct LevelEntry {
    pub name: &'static str,
    pub difficulty: u8,
    pub build: fn() -> Grid,
}

/// Explicit name -> layout lookup table.
#[derive(Clone, Default)]
pub struct EnvironmentRegistry {
    entries: Vec<LevelEntry>,
}

impl EnvironmentRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry of built-in levels.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for entry in levels::builtin() {
            registry.register(entry);
        }
        registry
    }

    /// Register a level.
    ///
    /// Panics if the name is already taken.
    pub fn register(&mut self, entry: LevelEntry) {
        if self.entries.iter().any(|e| e.name == entry.name) {
            panic!("Environment '{}' already registered", entry.name);
        }
        self.entries.push(entry);
    }

    /// Registered levels in registration order.
    #[must_use]
    pub fn entries(&self) -> &[LevelEntry] {
        &self.entries
    }

    /// Is `name` registered?
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }

    /// Instantiate a registered environment.
    pub fn create(&self, name: &str) -> Result<Environment, EngineError> {
        let entry = self
            .entries
            .iter()
            .find(|e| e.name == name)
            .ok_or_else(|| EngineError::UnknownEnvironment(name.to_string()))?;
        debug!(env = entry.name, difficulty = entry.difficulty, "created environment");
        Ok(Environment::new(entry))
    }
}

/// Instantiate a built-in environment by name.
pub fn create_environment(name: &str) -> Result<Environment, EngineError> {
    EnvironmentRegistry::builtin().create(name)
}

/// Free-form diagnostic data attached to a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepInfo {
    pub steps: u32,
    pub won: bool,
    pub lost: bool,
}

/// The result of one environment step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub observation: Observation,
    /// Sparse terminal reward: 1.0 on the transition into `won`, else 0.0.
    pub reward: f64,
    pub done: bool,
    pub info: StepInfo,
}

/// A named level bound to a live grid, with the reset/step contract.
#[derive(Debug)]
pub struct Environment {
    name: &'static str,
    difficulty: u8,
    build: fn() -> Grid,
    grid: Grid,
}

impl Environment {
    fn new(entry: &LevelEntry) -> Self {
        Self {
            name: entry.name,
            difficulty: entry.difficulty,
            build: entry.build,
            grid: (entry.build)(),
        }
    }

    /// Environment name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name
    }

    /// Difficulty annotation (1-3 for built-ins).
    #[must_use]
    pub fn difficulty(&self) -> u8 {
        self.difficulty
    }

    /// The live grid.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Mutable access to the live grid, for direct engine-level play.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// Discard the current grid and rebuild a fresh one from the layout.
    pub fn reset(&mut self) -> Observation {
        self.grid = (self.build)();
        self.grid.observe()
    }

    /// Step the grid and package the (observation, reward, done, info)
    /// contract.
    pub fn step(&mut self, action: Action) -> Transition {
        let was_won = self.grid.won();
        self.grid.step(action);

        let won = self.grid.won();
        let lost = self.grid.lost();
        let reward = if won && !was_won { 1.0 } else { 0.0 };

        Transition {
            observation: self.grid.observe(),
            reward,
            done: won || lost,
            info: StepInfo {
                steps: self.grid.steps(),
                won,
                lost,
            },
        }
    }

    /// The current observation without stepping.
    pub fn observe(&mut self) -> Observation {
        self.grid.observe()
    }
}
