//! Player actions and movement directions.
//!
//! Actions are plain data: the engine stores and compares them but leaves
//! interpretation to the step resolver. `wait` maps to no movement vector
//! at all, which is why [`Action::direction`] returns an `Option`.

use serde::{Deserialize, Serialize};

use super::error::EngineError;

/// One of the four cardinal movement directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Movement vector for this direction.
    ///
    /// The origin is top-left, so `Up` is negative `y`.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// The opposite direction.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Offset `(x, y)` one cell in this direction inside a `width`/`height` grid.
    ///
    /// Returns `None` when the target would leave the grid.
    #[must_use]
    pub fn offset(self, x: usize, y: usize, width: usize, height: usize) -> Option<(usize, usize)> {
        let (dx, dy) = self.delta();
        let nx = x as i32 + dx;
        let ny = y as i32 + dy;
        if nx < 0 || ny < 0 || nx >= width as i32 || ny >= height as i32 {
            None
        } else {
            Some((nx as usize, ny as usize))
        }
    }
}

/// A player action for one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
    Wait,
}

impl Action {
    /// All recognized actions, in wire order.
    pub const ALL: [Action; 5] = [
        Action::Up,
        Action::Down,
        Action::Left,
        Action::Right,
        Action::Wait,
    ];

    /// Wire name of this action.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Action::Up => "up",
            Action::Down => "down",
            Action::Left => "left",
            Action::Right => "right",
            Action::Wait => "wait",
        }
    }

    /// Movement direction, or `None` for `wait`.
    #[must_use]
    pub const fn direction(self) -> Option<Direction> {
        match self {
            Action::Up => Some(Direction::Up),
            Action::Down => Some(Direction::Down),
            Action::Left => Some(Direction::Left),
            Action::Right => Some(Direction::Right),
            Action::Wait => None,
        }
    }

    /// Parse a wire action string.
    pub fn parse(s: &str) -> Result<Self, EngineError> {
        match s {
            "up" => Ok(Action::Up),
            "down" => Ok(Action::Down),
            "left" => Ok(Action::Left),
            "right" => Ok(Action::Right),
            "wait" => Ok(Action::Wait),
            other => Err(EngineError::InvalidAction(other.to_string())),
        }
    }
}
