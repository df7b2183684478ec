//! Rule derivation from on-board text.
//!
//! Rules are derived, transient state: the manager rescans the whole grid
//! on demand and never tries to update incrementally. A single moved text
//! tile can break and form several rules in both axes at once, so a full
//! O(width x height) rescan is the correctness-preserving choice at these
//! grid sizes.

pub mod manager;

pub use manager::{Rule, RuleManager, RulePredicate};
