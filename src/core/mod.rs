//! Core engine types: objects, actions, properties, errors.
//!
//! This module contains the fundamental building blocks. Levels introduce
//! content (which nouns exist, where text sits) via the environment layer
//! rather than by modifying the core.

pub mod action;
pub mod error;
pub mod object;
pub mod properties;

pub use action::{Action, Direction};
pub use error::EngineError;
pub use object::{Object, TEXT_TYPE_OFFSET};
pub use properties::{Property, Word};
