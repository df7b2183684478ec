//! The step resolver: one tick of simulation.
//!
//! A stateless algorithm over a grid and its rule manager. Fixed phase
//! order per tick:
//!
//! 1. Rescan rules.
//! 2. Move every YOU icon along the action's vector, cascading pushes.
//! 3. Advance MOVE icons along their facing.
//! 4. Resolve contacts (SINK, DEFEAT, HOT/MELT) and transformations,
//!    using the tables from phase 1.
//! 5. Rescan rules (moved text may have rewritten them).
//! 6. Win/lose check against the fresh tables.
//! 7. Increment the step counter.
//!
//! Pushing is all-or-nothing: a contiguous chain of pushable objects moves
//! one cell together, or nothing moves when the cell beyond the chain is
//! the grid edge or a blocking STOP object. Text tiles are intrinsically
//! pushable; icons are pushable when their noun carries PUSH. An
//! out-of-bounds target is a blocked move, never an error.

use tracing::debug;

use crate::core::{Action, Direction, Object, Property};
use crate::grid::Grid;
use crate::rules::RuleManager;

/// Resolve one tick. Terminal grids skip physics and only count the step.
pub fn resolve(grid: &mut Grid, action: Action) {
    if grid.won || grid.lost {
        grid.steps += 1;
        return;
    }

    grid.update_rules();

    if let Some(direction) = action.direction() {
        move_you(grid, direction);
    }
    move_autonomous(grid);

    apply_contacts(grid);
    apply_transformations(grid);

    grid.update_rules();
    check_terminal(grid);
    grid.steps += 1;

    debug!(
        action = action.name(),
        steps = grid.steps,
        won = grid.won,
        lost = grid.lost,
        "tick resolved"
    );
}

/// Move every YOU icon one cell along `direction`.
///
/// Icons move farthest-first along the movement axis so a line of YOU
/// icons advances without colliding with itself.
fn move_you(grid: &mut Grid, direction: Direction) {
    let mut movers: Vec<(usize, usize, String)> = grid
        .rule_manager
        .you_objects(grid)
        .into_iter()
        .map(|o| (o.x, o.y, o.name.clone()))
        .collect();

    movers.sort_by_key(|&(x, y, _)| match direction {
        Direction::Right => -(x as i64),
        Direction::Left => x as i64,
        Direction::Down => -(y as i64),
        Direction::Up => y as i64,
    });

    for (x, y, name) in movers {
        try_move_icon(grid, x, y, &name, direction);
    }
}

/// Advance every MOVE icon along its facing, reversing when blocked.
///
/// Movers are processed one at a time and held off the board while they
/// act, so an icon shoved by an earlier mover in the same phase still
/// takes its own move from its current cell, and same-named icons each
/// advance exactly once.
fn move_autonomous(grid: &mut Grid) {
    while let Some((x, y, name)) = next_mover(grid) {
        let Some(mut mover) = grid.take_unacted(x, y, &name) else {
            break;
        };
        mover.acted = true;

        let mut landing = None;
        for direction in [mover.facing, mover.facing.opposite()] {
            if let Some((tx, ty)) =
                direction.offset(mover.x, mover.y, grid.width(), grid.height())
            {
                if clear_for_entry(grid, tx, ty, direction) {
                    landing = Some((tx, ty, direction));
                    break;
                }
            }
        }
        match landing {
            Some((tx, ty, direction)) => {
                mover.x = tx;
                mover.y = ty;
                mover.facing = direction;
            }
            // Blocked both ways: stay put but remember the turn.
            None => mover.facing = mover.facing.opposite(),
        }
        grid.place(mover);
    }
    clear_acted(grid);
}

/// Row-major first MOVE icon that has not acted in this phase.
fn next_mover(grid: &Grid) -> Option<(usize, usize, String)> {
    grid.objects()
        .find(|o| !o.is_text && !o.acted && grid.rule_manager.has_property(&o.name, Property::Move))
        .map(|o| (o.x, o.y, o.name.clone()))
}

fn clear_acted(grid: &mut Grid) {
    let (cells, _) = grid.split_cells_and_rules();
    for cell in cells.iter_mut() {
        for object in cell.iter_mut() {
            object.acted = false;
        }
    }
}

/// Attempt to move one icon a single cell, cascading pushes.
///
/// Returns false when the move is blocked (grid edge, STOP, or a push
/// chain that cannot advance); the icon stays put in that case.
fn try_move_icon(grid: &mut Grid, x: usize, y: usize, name: &str, direction: Direction) -> bool {
    let Some((tx, ty)) = direction.offset(x, y, grid.width(), grid.height()) else {
        return false;
    };
    if !clear_for_entry(grid, tx, ty, direction) {
        return false;
    }
    let Some(mut object) = grid.take_object(x, y, name, false) else {
        return false;
    };
    object.x = tx;
    object.y = ty;
    object.facing = direction;
    grid.place(object);
    true
}

/// Make the cell at `(x, y)` enterable by shoving its pushable occupants
/// one cell along `direction`.
///
/// Recursion reaches the far end of the push chain before any object
/// moves, so a blocked chain leaves the grid untouched.
fn clear_for_entry(grid: &mut Grid, x: usize, y: usize, direction: Direction) -> bool {
    let mut pushables: Vec<(String, bool)> = Vec::new();
    for object in grid.cell(x, y) {
        if is_pushable(&grid.rule_manager, object) {
            pushables.push((object.name.clone(), object.is_text));
        } else if !object.is_text && grid.rule_manager.has_property(&object.name, Property::Stop) {
            return false;
        }
    }

    if pushables.is_empty() {
        return true;
    }

    let Some((nx, ny)) = direction.offset(x, y, grid.width(), grid.height()) else {
        return false;
    };
    if !clear_for_entry(grid, nx, ny, direction) {
        return false;
    }

    for (name, is_text) in pushables {
        if let Some(mut object) = grid.take_object(x, y, &name, is_text) {
            object.x = nx;
            object.y = ny;
            grid.place(object);
        }
    }
    true
}

/// Text tiles are always pushable; icons are pushable when their noun
/// carries PUSH (including STOP+PUSH combinations).
fn is_pushable(manager: &RuleManager, object: &Object) -> bool {
    object.is_text || manager.has_property(&object.name, Property::Push)
}

/// Resolve same-cell contacts using the tables computed before movement.
fn apply_contacts(grid: &mut Grid) {
    let (cells, manager) = grid.split_cells_and_rules();

    for cell in cells.iter_mut() {
        // SINK clears the whole stack on any contact.
        let sink_contact = cell.len() >= 2
            && cell
                .iter()
                .any(|o| !o.is_text && manager.has_property(&o.name, Property::Sink));
        if sink_contact {
            cell.clear();
            continue;
        }

        // DEFEAT destroys co-located YOU icons and survives the contact.
        let defeat_here = cell
            .iter()
            .any(|o| !o.is_text && manager.has_property(&o.name, Property::Defeat));
        if defeat_here {
            cell.retain(|o| {
                o.is_text
                    || manager.has_property(&o.name, Property::Defeat)
                    || !manager.has_property(&o.name, Property::You)
            });
        }

        // HOT destroys co-located MELT icons, same survivor semantics.
        let hot_here = cell
            .iter()
            .any(|o| !o.is_text && manager.has_property(&o.name, Property::Hot));
        if hot_here {
            cell.retain(|o| {
                o.is_text
                    || manager.has_property(&o.name, Property::Hot)
                    || !manager.has_property(&o.name, Property::Melt)
            });
        }
    }
}

/// Rename icons per the active transformation table, position preserved.
fn apply_transformations(grid: &mut Grid) {
    let (cells, manager) = grid.split_cells_and_rules();
    if manager.transformations().is_empty() {
        return;
    }

    for cell in cells.iter_mut() {
        for object in cell.iter_mut() {
            if object.is_text {
                continue;
            }
            if let Some(target) = manager.transformation_of(&object.name) {
                object.name = target.to_string();
            }
        }
    }
}

/// Win/lose bookkeeping. Flags are sticky once set.
fn check_terminal(grid: &mut Grid) {
    let you: Vec<(usize, usize)> = grid
        .rule_manager
        .you_objects(grid)
        .into_iter()
        .map(|o| (o.x, o.y))
        .collect();

    if you.is_empty() {
        if !grid.won {
            grid.lost = true;
        }
        return;
    }

    let wins: Vec<(usize, usize)> = grid
        .rule_manager
        .win_objects(grid)
        .into_iter()
        .map(|o| (o.x, o.y))
        .collect();

    if you.iter().any(|pos| wins.contains(pos)) {
        grid.won = true;
    }
}
