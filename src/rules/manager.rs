//! The rule manager: scan, resolution, and queries.
//!
//! ## Scan
//!
//! For every cell holding a noun text tile, the two cells to the right and
//! the two cells below are examined for the pattern
//! `[NOUN] [IS] [PROPERTY or NOUN]`. Both reading directions are checked
//! independently, so one tile can participate in a horizontal and a
//! vertical statement at the same time. Duplicate statements collapse to
//! one; otherwise scan order (row-major, horizontal before vertical) is
//! preserved.
//!
//! ## Resolution
//!
//! Property rules accumulate into a noun -> property-set table. Noun rules
//! populate the noun -> transformation-target table; when two rules target
//! the same noun the last-scanned rule wins, which is deterministic given
//! the fixed scan order.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{Object, Property, Word};
use crate::grid::Grid;

/// The object side of a rule: a property flag or a transformation target.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RulePredicate {
    Property(Property),
    Noun(String),
}

/// A derived rule: `subject IS predicate`.
///
/// Rules are recomputed from scratch on every rescan and never persisted
/// between ticks, because the text that forms them can move.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rule {
    /// Lowercase subject noun.
    pub subject: String,
    pub predicate: RulePredicate,
}

impl Rule {
    /// Human-readable form, e.g. `"BABA IS YOU"`.
    #[must_use]
    pub fn display(&self) -> String {
        let object = match &self.predicate {
            RulePredicate::Property(p) => p.display().to_string(),
            RulePredicate::Noun(n) => n.to_uppercase(),
        };
        format!("{} IS {}", self.subject.to_uppercase(), object)
    }
}

/// Holds the last-computed rule list and the tables derived from it.
///
/// Owned by a [`Grid`]; refreshed via [`Grid::update_rules`] before any
/// query that depends on freshness.
#[derive(Clone, Debug, Default)]
pub struct RuleManager {
    rules: Vec<Rule>,
    properties: FxHashMap<String, FxHashSet<Property>>,
    transformations: FxHashMap<String, String>,
}

impl RuleManager {
    /// Create an empty manager with no active rules.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rescan the grid and rebuild every derived table from scratch.
    pub fn rescan(&mut self, grid: &Grid) {
        self.rules.clear();
        self.properties.clear();
        self.transformations.clear();

        let mut seen: FxHashSet<Rule> = FxHashSet::default();
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                for rule in rules_starting_at(grid, x, y) {
                    if seen.insert(rule.clone()) {
                        self.rules.push(rule);
                    }
                }
            }
        }

        for rule in &self.rules {
            match &rule.predicate {
                RulePredicate::Property(prop) => {
                    self.properties
                        .entry(rule.subject.clone())
                        .or_default()
                        .insert(*prop);
                }
                RulePredicate::Noun(target) => {
                    // Last-scanned rule wins on conflicting targets.
                    self.transformations
                        .insert(rule.subject.clone(), target.clone());
                }
            }
        }

        trace!(rules = self.rules.len(), "rescanned rules");
    }

    /// Active rules in scan order.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Does `noun` currently carry `property`?
    #[must_use]
    pub fn has_property(&self, noun: &str, property: Property) -> bool {
        self.properties
            .get(noun)
            .is_some_and(|set| set.contains(&property))
    }

    /// Active properties for `noun`, if any.
    #[must_use]
    pub fn properties_of(&self, noun: &str) -> Option<&FxHashSet<Property>> {
        self.properties.get(noun)
    }

    /// The full noun -> property-set table.
    #[must_use]
    pub fn properties(&self) -> &FxHashMap<String, FxHashSet<Property>> {
        &self.properties
    }

    /// Transformation target for `noun`, if one is active.
    #[must_use]
    pub fn transformation_of(&self, noun: &str) -> Option<&str> {
        self.transformations.get(noun).map(String::as_str)
    }

    /// The full noun -> target table.
    #[must_use]
    pub fn transformations(&self) -> &FxHashMap<String, String> {
        &self.transformations
    }

    /// All icons on the grid whose noun currently carries YOU.
    #[must_use]
    pub fn you_objects<'g>(&self, grid: &'g Grid) -> Vec<&'g Object> {
        self.objects_with(grid, Property::You)
    }

    /// All icons on the grid whose noun currently carries WIN.
    #[must_use]
    pub fn win_objects<'g>(&self, grid: &'g Grid) -> Vec<&'g Object> {
        self.objects_with(grid, Property::Win)
    }

    fn objects_with<'g>(&self, grid: &'g Grid, property: Property) -> Vec<&'g Object> {
        grid.objects()
            .filter(|o| !o.is_text && self.has_property(&o.name, property))
            .collect()
    }
}

/// Rules whose subject text sits at `(x, y)`, horizontal reading first.
fn rules_starting_at(grid: &Grid, x: usize, y: usize) -> Vec<Rule> {
    let mut found = Vec::new();

    for obj in grid.cell(x, y) {
        if !obj.is_text {
            continue;
        }
        let Word::Noun(subject) = Word::classify(&obj.name) else {
            continue;
        };

        // Horizontal: (x+1, y) (x+2, y).
        if x + 2 < grid.width() {
            if let Some(predicate) = read_statement(grid, (x + 1, y), (x + 2, y)) {
                found.push(Rule {
                    subject: subject.clone(),
                    predicate,
                });
            }
        }

        // Vertical: (x, y+1) (x, y+2).
        if y + 2 < grid.height() {
            if let Some(predicate) = read_statement(grid, (x, y + 1), (x, y + 2)) {
                found.push(Rule {
                    subject,
                    predicate,
                });
            }
        }
    }

    found
}

/// Read `IS <predicate>` from the two cells following a subject.
fn read_statement(
    grid: &Grid,
    is_at: (usize, usize),
    object_at: (usize, usize),
) -> Option<RulePredicate> {
    let has_is = grid
        .cell(is_at.0, is_at.1)
        .iter()
        .any(|o| o.is_text && Word::classify(&o.name) == Word::Is);
    if !has_is {
        return None;
    }

    grid.cell(object_at.0, object_at.1)
        .iter()
        .find_map(|o| match (o.is_text, Word::classify(&o.name)) {
            (true, Word::Property(prop)) => Some(RulePredicate::Property(prop)),
            (true, Word::Noun(noun)) => Some(RulePredicate::Noun(noun)),
            _ => None,
        })
}
