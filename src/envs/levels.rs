//! Built-in level layouts.
//!
//! Each constructor builds the initial grid for one named level. Rule
//! text is placed like any other object; nothing here is special-cased by
//! the engine. Coordinates are chosen so statements never touch a second
//! statement's tiles by accident in either axis.

use crate::core::Object;
use crate::grid::Grid;

use super::LevelEntry;

/// All built-in levels, in listing order.
pub(crate) fn builtin() -> Vec<LevelEntry> {
    vec![
        LevelEntry { name: "simple", difficulty: 1, build: simple },
        LevelEntry { name: "push_puzzle", difficulty: 2, build: push_puzzle },
        LevelEntry { name: "transformation", difficulty: 3, build: transformation },
        LevelEntry { name: "wall_maze", difficulty: 2, build: wall_maze },
        LevelEntry { name: "make_win", difficulty: 2, build: make_win },
        LevelEntry { name: "make_win_distr", difficulty: 2, build: make_win_distr },
        LevelEntry { name: "two_room", difficulty: 2, build: two_room },
        LevelEntry { name: "two_room_break_stop", difficulty: 2, build: two_room_break_stop },
        LevelEntry { name: "you_win", difficulty: 2, build: you_win },
        LevelEntry { name: "goto_win_color", difficulty: 1, build: goto_win_color },
        LevelEntry { name: "make_you", difficulty: 3, build: make_you },
        LevelEntry { name: "multi_rule", difficulty: 3, build: multi_rule },
        LevelEntry { name: "rule_chain", difficulty: 3, build: rule_chain },
        LevelEntry { name: "transform_puzzle", difficulty: 3, build: transform_puzzle },
    ]
}

/// Place a horizontal `SUBJECT IS OBJECT` statement starting at `(x, y)`.
fn statement(grid: &mut Grid, x: usize, y: usize, subject: &str, object: &str) {
    grid.place(Object::text(subject, x, y));
    grid.place(Object::text("is", x + 1, y));
    grid.place(Object::text(object, x + 2, y));
}

/// BABA IS YOU, FLAG IS WIN; an empty corridor. Ten steps right win.
pub fn simple() -> Grid {
    let mut grid = Grid::new(15, 10);
    statement(&mut grid, 1, 1, "baba", "you");
    statement(&mut grid, 5, 1, "flag", "win");
    grid.place(Object::icon("baba", 2, 5));
    grid.place(Object::icon("flag", 12, 5));
    grid
}

/// A rock on the path; ROCK IS PUSH lets it be shoved along.
pub fn push_puzzle() -> Grid {
    let mut grid = Grid::new(12, 8);
    statement(&mut grid, 1, 1, "baba", "you");
    statement(&mut grid, 5, 1, "rock", "push");
    statement(&mut grid, 1, 6, "flag", "win");
    grid.place(Object::icon("baba", 2, 4));
    grid.place(Object::icon("rock", 5, 4));
    grid.place(Object::icon("flag", 9, 4));
    grid
}

/// A wall line with one gap; WALL IS STOP forces the detour.
pub fn wall_maze() -> Grid {
    let mut grid = Grid::new(13, 9);
    statement(&mut grid, 1, 1, "baba", "you");
    statement(&mut grid, 5, 1, "wall", "stop");
    statement(&mut grid, 1, 7, "flag", "win");
    for y in 3..9 {
        grid.place(Object::icon("wall", 6, y));
    }
    // Gap at (6, 2).
    grid.place(Object::icon("baba", 2, 4));
    grid.place(Object::icon("flag", 10, 4));
    grid
}

/// Two rooms split by a stopping wall with a low doorway.
pub fn two_room() -> Grid {
    let mut grid = Grid::new(13, 8);
    statement(&mut grid, 1, 1, "baba", "you");
    statement(&mut grid, 5, 1, "wall", "stop");
    statement(&mut grid, 9, 1, "flag", "win");
    for y in 2..8 {
        if y != 5 {
            grid.place(Object::icon("wall", 6, y));
        }
    }
    grid.place(Object::icon("baba", 3, 4));
    grid.place(Object::icon("flag", 10, 4));
    grid
}

/// No WIN rule at the start: push the loose "win" tile up two cells to
/// spell FLAG IS WIN, then walk to the flag.
pub fn make_win() -> Grid {
    let mut grid = Grid::new(12, 8);
    statement(&mut grid, 1, 1, "baba", "you");
    grid.place(Object::text("flag", 2, 4));
    grid.place(Object::text("is", 3, 4));
    grid.place(Object::text("win", 4, 6));
    grid.place(Object::icon("baba", 6, 2));
    grid.place(Object::icon("flag", 9, 4));
    grid
}

/// make_win with distractor words and an inert rock in the way of
/// nothing: only the "win" tile placement matters.
pub fn make_win_distr() -> Grid {
    let mut grid = Grid::new(12, 8);
    statement(&mut grid, 1, 1, "baba", "you");
    grid.place(Object::text("flag", 2, 4));
    grid.place(Object::text("is", 3, 4));
    grid.place(Object::text("win", 4, 6));
    grid.place(Object::text("rock", 1, 6));
    grid.place(Object::text("stop", 10, 6));
    grid.place(Object::icon("rock", 10, 2));
    grid.place(Object::icon("baba", 6, 2));
    grid.place(Object::icon("flag", 9, 4));
    grid
}

/// Two rooms and no doorway: the only way through is to shove a tile out
/// of the WALL IS STOP statement.
pub fn two_room_break_stop() -> Grid {
    let mut grid = Grid::new(13, 8);
    statement(&mut grid, 1, 1, "baba", "you");
    statement(&mut grid, 9, 1, "flag", "win");
    statement(&mut grid, 1, 6, "wall", "stop");
    for y in 0..8 {
        grid.place(Object::icon("wall", 6, y));
    }
    grid.place(Object::icon("baba", 3, 4));
    grid.place(Object::icon("flag", 10, 4));
    grid
}

/// No flag anywhere: push the loose "win" tile into "BABA IS _" and the
/// player piece becomes its own win condition.
pub fn you_win() -> Grid {
    let mut grid = Grid::new(12, 8);
    statement(&mut grid, 1, 1, "baba", "you");
    grid.place(Object::text("baba", 2, 4));
    grid.place(Object::text("is", 3, 4));
    grid.place(Object::text("win", 4, 6));
    grid.place(Object::icon("baba", 6, 2));
    grid
}

/// The simple corridor with display colors on the scenery.
pub fn goto_win_color() -> Grid {
    let mut grid = Grid::new(15, 10);
    statement(&mut grid, 1, 1, "baba", "you");
    statement(&mut grid, 5, 1, "flag", "win");
    grid.place(Object::icon("baba", 2, 5));
    grid.place(Object::icon("flag", 12, 5).with_color("gold"));
    grid.place(Object::icon("water", 7, 8).with_color("blue"));
    grid.place(Object::icon("water", 8, 8).with_color("blue"));
    grid
}

/// The flag sits in a sealed chamber with a rock: spell ROCK IS YOU and
/// walk the recruit onto it.
pub fn make_you() -> Grid {
    let mut grid = Grid::new(13, 9);
    statement(&mut grid, 1, 1, "baba", "you");
    statement(&mut grid, 5, 1, "wall", "stop");
    statement(&mut grid, 9, 1, "flag", "win");
    grid.place(Object::text("rock", 1, 5));
    grid.place(Object::text("is", 2, 5));
    grid.place(Object::text("you", 3, 7));
    for y in 4..9 {
        grid.place(Object::icon("wall", 8, y));
    }
    for x in 9..13 {
        grid.place(Object::icon("wall", x, 4));
    }
    grid.place(Object::icon("baba", 5, 3));
    grid.place(Object::icon("rock", 9, 5));
    grid.place(Object::icon("flag", 11, 7));
    grid
}

/// "ROCK IS _" awaits a noun: push the loose "flag" tile up to complete
/// ROCK IS FLAG and turn the rocks into winnable flags.
pub fn transformation() -> Grid {
    let mut grid = Grid::new(12, 8);
    statement(&mut grid, 1, 1, "baba", "you");
    statement(&mut grid, 5, 1, "flag", "win");
    grid.place(Object::text("rock", 2, 3));
    grid.place(Object::text("is", 3, 3));
    grid.place(Object::text("flag", 4, 5));
    grid.place(Object::icon("baba", 6, 6));
    grid.place(Object::icon("rock", 8, 5));
    grid.place(Object::icon("rock", 9, 2));
    grid
}

/// Several rules at once: a sinkable moat crossed by sacrificing a rock.
pub fn multi_rule() -> Grid {
    let mut grid = Grid::new(13, 9);
    statement(&mut grid, 1, 1, "baba", "you");
    statement(&mut grid, 5, 1, "rock", "push");
    statement(&mut grid, 9, 1, "wall", "stop");
    statement(&mut grid, 1, 7, "water", "sink");
    statement(&mut grid, 5, 7, "flag", "win");
    for y in 3..6 {
        grid.place(Object::icon("water", 7, y).with_color("blue"));
    }
    for x in 9..12 {
        grid.place(Object::icon("wall", x, 3));
    }
    grid.place(Object::icon("baba", 2, 4));
    grid.place(Object::icon("rock", 5, 4));
    grid.place(Object::icon("flag", 10, 4));
    grid
}

/// An active transformation: ROCK IS BABA recruits the rock into the YOU
/// set on the first tick.
pub fn rule_chain() -> Grid {
    let mut grid = Grid::new(12, 8);
    statement(&mut grid, 1, 1, "baba", "you");
    statement(&mut grid, 5, 1, "rock", "baba");
    statement(&mut grid, 1, 6, "flag", "win");
    grid.place(Object::icon("baba", 2, 3));
    grid.place(Object::icon("rock", 8, 3));
    grid.place(Object::icon("flag", 10, 5).with_color("gold"));
    grid
}

/// A solid wall line guards the flag: spell WALL IS FLAG and the barrier
/// itself becomes the win condition.
pub fn transform_puzzle() -> Grid {
    let mut grid = Grid::new(13, 9);
    statement(&mut grid, 1, 1, "baba", "you");
    statement(&mut grid, 9, 1, "flag", "win");
    grid.place(Object::text("wall", 1, 3));
    grid.place(Object::text("is", 1, 4));
    grid.place(Object::text("stop", 1, 5));
    grid.place(Object::text("wall", 3, 5));
    grid.place(Object::text("is", 3, 6));
    grid.place(Object::text("flag", 5, 7));
    for y in 0..9 {
        grid.place(Object::icon("wall", 7, y));
    }
    grid.place(Object::icon("baba", 5, 3));
    grid.place(Object::icon("flag", 10, 4));
    grid
}
