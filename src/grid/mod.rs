//! The grid: a 2-D array of object stacks.
//!
//! The grid exclusively owns every [`Object`]; nothing else holds a
//! reference to one except through grid queries. Each cell is a small
//! stacking collection, because heterogeneous objects routinely co-occupy
//! a cell (an icon under a text tile, an icon standing on water).
//!
//! The grid is a single-owner, single-threaded mutable structure. Its only
//! concurrency-adjacent operation is [`Grid::copy`], whose contract is a
//! pure snapshot: after it returns, mutating either side is never
//! observable in the other.

pub mod observation;

use smallvec::SmallVec;
use tracing::debug;

use crate::core::{Action, EngineError, Object};
use crate::rules::RuleManager;

pub use observation::{Dimensions, EpisodeState, ObservedObject, Observation};

/// One cell's object stack. Almost all cells hold 0-2 objects.
pub type CellStack = SmallVec<[Object; 2]>;

/// Filter for [`Grid::find_objects`]. Unset criteria match everything.
///
/// ## Example
///
/// ```
/// use rulegrid::grid::{Grid, ObjectQuery};
/// use rulegrid::core::Object;
///
/// let mut grid = Grid::new(5, 5);
/// grid.place(Object::icon("baba", 2, 3));
/// grid.place(Object::text("baba", 0, 0));
///
/// let icons = grid.find_objects(ObjectQuery::new().name("baba").is_text(false));
/// assert_eq!(icons.len(), 1);
/// assert_eq!(icons[0].y, 3);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct ObjectQuery<'a> {
    name: Option<&'a str>,
    x: Option<usize>,
    y: Option<usize>,
    is_text: Option<bool>,
}

impl<'a> ObjectQuery<'a> {
    /// An empty query matching every object.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Match objects with this exact name.
    #[must_use]
    pub fn name(mut self, name: &'a str) -> Self {
        self.name = Some(name);
        self
    }

    /// Match objects in this column.
    #[must_use]
    pub fn x(mut self, x: usize) -> Self {
        self.x = Some(x);
        self
    }

    /// Match objects in this row.
    #[must_use]
    pub fn y(mut self, y: usize) -> Self {
        self.y = Some(y);
        self
    }

    /// Match text tiles (`true`) or icons (`false`).
    #[must_use]
    pub fn is_text(mut self, is_text: bool) -> Self {
        self.is_text = Some(is_text);
        self
    }

    fn matches(&self, object: &Object) -> bool {
        self.name.is_none_or(|n| object.name == n)
            && self.x.is_none_or(|x| object.x == x)
            && self.y.is_none_or(|y| object.y == y)
            && self.is_text.is_none_or(|t| object.is_text == t)
    }
}

/// The game board plus episode bookkeeping.
#[derive(Clone, Debug)]
pub struct Grid {
    width: usize,
    height: usize,
    /// Row-major: cell `(x, y)` lives at `y * width + x`.
    cells: Vec<CellStack>,
    pub(crate) steps: u32,
    pub(crate) won: bool,
    pub(crate) lost: bool,
    pub(crate) rule_manager: RuleManager,
}

impl Grid {
    /// Create an empty grid.
    ///
    /// Panics if either dimension is zero.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0, "Grid width must be positive");
        assert!(height > 0, "Grid height must be positive");

        Self {
            width,
            height,
            cells: vec![CellStack::new(); width * height],
            steps: 0,
            won: false,
            lost: false,
            rule_manager: RuleManager::new(),
        }
    }

    /// Grid width in cells.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells.
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Monotonic step counter.
    #[must_use]
    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Sticky terminal win flag.
    #[must_use]
    pub fn won(&self) -> bool {
        self.won
    }

    /// Sticky terminal loss flag.
    #[must_use]
    pub fn lost(&self) -> bool {
        self.lost
    }

    /// The rule manager holding the last-computed rule tables.
    ///
    /// Call [`Grid::update_rules`] first when text may have moved.
    #[must_use]
    pub fn rule_manager(&self) -> &RuleManager {
        &self.rule_manager
    }

    /// Place an object in the cell its coordinates name.
    ///
    /// Panics if the coordinates are outside the grid; placement is a
    /// construction-time operation and misplacement is a programmer error.
    pub fn place(&mut self, object: Object) {
        assert!(
            object.x < self.width && object.y < self.height,
            "Object ({}, {}) placed outside {}x{} grid",
            object.x,
            object.y,
            self.width,
            self.height
        );
        let idx = object.y * self.width + object.x;
        self.cells[idx].push(object);
    }

    /// Iterate over every object on the grid, row-major.
    pub fn objects(&self) -> impl Iterator<Item = &Object> {
        self.cells.iter().flat_map(|cell| cell.iter())
    }

    /// Objects matching every set criterion of `query`.
    ///
    /// No match returns an empty vector, never an error.
    #[must_use]
    pub fn find_objects(&self, query: ObjectQuery<'_>) -> Vec<&Object> {
        self.objects().filter(|o| query.matches(o)).collect()
    }

    /// The object stack at `(x, y)`.
    ///
    /// Fails with [`EngineError::OutOfBounds`] when the coordinates fall
    /// outside the grid.
    pub fn get_objects_at(&self, x: usize, y: usize) -> Result<&[Object], EngineError> {
        if x >= self.width || y >= self.height {
            return Err(EngineError::OutOfBounds {
                x: x as i32,
                y: y as i32,
                width: self.width,
                height: self.height,
            });
        }
        Ok(&self.cells[y * self.width + x])
    }

    /// A fully independent deep copy.
    ///
    /// Identical object multiset per cell, identical `steps`/`won`/`lost`,
    /// no shared mutable storage.
    #[must_use]
    pub fn copy(&self) -> Grid {
        self.clone()
    }

    /// Rescan the board and rebuild the derived rule tables.
    pub fn update_rules(&mut self) {
        let mut manager = std::mem::take(&mut self.rule_manager);
        manager.rescan(self);
        self.rule_manager = manager;
    }

    /// Advance one tick with the given action.
    ///
    /// Once `won` or `lost` is set the grid is terminal: further calls are
    /// accepted but skip physics and only advance the step counter.
    pub fn step(&mut self, action: Action) {
        crate::step::resolve(self, action);
    }

    /// Capture the canonical observation, recomputing rules first so the
    /// rule, property, and transformation views are current.
    pub fn observe(&mut self) -> Observation {
        self.update_rules();
        debug!(steps = self.steps, won = self.won, lost = self.lost, "captured observation");
        Observation::capture(self)
    }

    // === Internal cell access for the rule scan and step resolver ===

    pub(crate) fn cell(&self, x: usize, y: usize) -> &CellStack {
        &self.cells[y * self.width + x]
    }

    /// Split-borrow the cell array mutably alongside the rule tables, so
    /// contact resolution can consult rules while rewriting cells.
    pub(crate) fn split_cells_and_rules(&mut self) -> (&mut [CellStack], &RuleManager) {
        (&mut self.cells, &self.rule_manager)
    }

    /// Remove the first icon named `name` at `(x, y)` that has not yet
    /// acted in the current resolver phase.
    pub(crate) fn take_unacted(&mut self, x: usize, y: usize, name: &str) -> Option<Object> {
        let idx = y * self.width + x;
        let pos = self.cells[idx]
            .iter()
            .position(|o| !o.is_text && !o.acted && o.name == name)?;
        Some(self.cells[idx].remove(pos))
    }

    /// Remove one object matching `(name, is_text)` from the cell at
    /// `(x, y)`, if present.
    pub(crate) fn take_object(
        &mut self,
        x: usize,
        y: usize,
        name: &str,
        is_text: bool,
    ) -> Option<Object> {
        let idx = y * self.width + x;
        let pos = self.cells[idx]
            .iter()
            .position(|o| o.is_text == is_text && o.name == name)?;
        Some(self.cells[idx].remove(pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_empty_and_fresh() {
        let grid = Grid::new(8, 6);
        assert_eq!(grid.width(), 8);
        assert_eq!(grid.height(), 6);
        assert_eq!(grid.steps(), 0);
        assert!(!grid.won());
        assert!(!grid.lost());
        assert_eq!(grid.objects().count(), 0);
    }

    #[test]
    #[should_panic(expected = "width must be positive")]
    fn test_zero_width_panics() {
        let _ = Grid::new(0, 5);
    }

    #[test]
    fn test_find_objects_filters() {
        let mut grid = Grid::new(6, 6);
        grid.place(Object::icon("baba", 1, 2));
        grid.place(Object::icon("wall", 1, 2));
        grid.place(Object::text("baba", 3, 3));

        assert_eq!(grid.find_objects(ObjectQuery::new()).len(), 3);
        assert_eq!(grid.find_objects(ObjectQuery::new().name("baba")).len(), 2);
        assert_eq!(
            grid.find_objects(ObjectQuery::new().name("baba").is_text(true)).len(),
            1
        );
        assert_eq!(grid.find_objects(ObjectQuery::new().x(1).y(2)).len(), 2);
        // No match is an empty result, not an error.
        assert!(grid.find_objects(ObjectQuery::new().name("ghost")).is_empty());
    }

    #[test]
    fn test_get_objects_at_bounds() {
        let mut grid = Grid::new(4, 4);
        grid.place(Object::icon("rock", 2, 2));

        assert_eq!(grid.get_objects_at(2, 2).unwrap().len(), 1);
        assert_eq!(grid.get_objects_at(3, 3).unwrap().len(), 0);
        assert!(matches!(
            grid.get_objects_at(4, 0),
            Err(EngineError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_copy_is_independent() {
        let mut grid = Grid::new(5, 5);
        grid.place(Object::text("baba", 0, 0));
        grid.place(Object::text("is", 1, 0));
        grid.place(Object::text("you", 2, 0));
        grid.place(Object::icon("baba", 2, 2));

        let mut snapshot = grid.copy();
        assert_eq!(snapshot.steps(), grid.steps());
        for y in 0..5 {
            for x in 0..5 {
                let a: Vec<&str> = grid.cell(x, y).iter().map(|o| o.name.as_str()).collect();
                let b: Vec<&str> =
                    snapshot.cell(x, y).iter().map(|o| o.name.as_str()).collect();
                assert_eq!(a, b);
            }
        }

        snapshot.step(Action::Right);
        assert_eq!(grid.steps(), 0);
        assert_eq!(snapshot.steps(), 1);
        assert_eq!(grid.find_objects(ObjectQuery::new().is_text(false))[0].x, 2);
    }

    #[test]
    fn test_observe_refreshes_rules() {
        let mut grid = Grid::new(6, 6);
        grid.place(Object::text("baba", 0, 0));
        grid.place(Object::text("is", 1, 0));
        grid.place(Object::text("you", 2, 0));

        let obs = grid.observe();
        assert_eq!(obs.rules, vec!["BABA IS YOU".to_string()]);
    }
}
