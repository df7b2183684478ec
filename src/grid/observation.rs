//! The canonical observation: a typed projection of grid state.
//!
//! This is the exact structure external agents see, both from the
//! environment layer and over the wire. Map fields use `BTreeMap` so that
//! serializing the same state twice yields byte-identical JSON.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Grid;

/// Grid dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: usize,
    pub height: usize,
}

/// One observable object. Facing and color are internal and not exposed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservedObject {
    pub name: String,
    pub type_id: u16,
    pub x: usize,
    pub y: usize,
    pub is_text: bool,
}

/// Episode bookkeeping flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeState {
    pub won: bool,
    pub lost: bool,
    pub steps: u32,
}

/// The full observation structure.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub dimensions: Dimensions,
    /// All objects, row-major, stack order within a cell.
    pub objects: Vec<ObservedObject>,
    /// Human-readable `"A IS B"` strings in scan order.
    pub rules: Vec<String>,
    /// Uppercase noun -> sorted active property names.
    pub properties: BTreeMap<String, Vec<String>>,
    /// Uppercase noun -> uppercase transformation target.
    pub transformations: BTreeMap<String, String>,
    pub state: EpisodeState,
}

impl Observation {
    /// Project the grid's current state.
    ///
    /// Assumes the rule tables are fresh; [`Grid::observe`] rescans before
    /// calling this.
    #[must_use]
    pub(crate) fn capture(grid: &Grid) -> Self {
        let objects = grid
            .objects()
            .map(|o| ObservedObject {
                name: o.name.clone(),
                type_id: o.type_id(),
                x: o.x,
                y: o.y,
                is_text: o.is_text,
            })
            .collect();

        let manager = grid.rule_manager();
        let rules = manager.rules().iter().map(|r| r.display()).collect();

        let properties = manager
            .properties()
            .iter()
            .map(|(noun, props)| {
                let mut names: Vec<String> =
                    props.iter().map(|p| p.display().to_string()).collect();
                names.sort_unstable();
                (noun.to_uppercase(), names)
            })
            .collect();

        let transformations = manager
            .transformations()
            .iter()
            .map(|(noun, target)| (noun.to_uppercase(), target.to_uppercase()))
            .collect();

        Self {
            dimensions: Dimensions {
                width: grid.width(),
                height: grid.height(),
            },
            objects,
            rules,
            properties,
            transformations,
            state: EpisodeState {
                won: grid.won(),
                lost: grid.lost(),
                steps: grid.steps(),
            },
        }
    }
}
