//! The `Object` record: one entity on the grid.
//!
//! Objects are identity-independent data: the same name may appear many
//! times, and nothing outside the grid holds a reference to one. An object
//! is either an in-world icon (`is_text == false`) or a rule-forming text
//! tile (`is_text == true`) carrying the word it spells.
//!
//! ## Type ids
//!
//! The observation exposes a stable integer id per name, drawn from a
//! fixed vocabulary table. Icons and text tiles have disjoint id ranges
//! (text ids are offset by [`TEXT_TYPE_OFFSET`]); names outside the table
//! map to id 0.

use serde::{Deserialize, Serialize};

use super::action::Direction;

/// Icon names with assigned type ids (index + 1).
const ICON_VOCABULARY: [&str; 10] = [
    "baba", "flag", "wall", "rock", "water", "skull", "lava", "key", "door", "box",
];

/// Text words with assigned type ids (offset + index).
const TEXT_VOCABULARY: [&str; 20] = [
    "baba", "flag", "wall", "rock", "water", "skull", "lava", "key", "door", "box", // nouns
    "is", // verb
    "you", "win", "stop", "push", "sink", "defeat", "move", "hot", "melt", // properties
];

/// First type id assigned to text tiles.
pub const TEXT_TYPE_OFFSET: u16 = 100;

/// A single entity on the grid.
///
/// Position is authoritative only while the object is stored in a grid
/// cell; the grid keeps `(x, y)` and the owning cell in sync.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Object {
    /// Noun or word token, lowercase (e.g. "baba", "is", "you").
    pub name: String,
    /// Column, 0-indexed from the left.
    pub x: usize,
    /// Row, 0-indexed from the top.
    pub y: usize,
    /// True for rule-forming text tiles, false for in-world icons.
    pub is_text: bool,
    /// Optional display color tag; no engine semantics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Facing used by MOVE autonomy. Internal; not observable.
    #[serde(default = "default_facing")]
    pub facing: Direction,
    /// Set while a resolver phase is working through icons one by one.
    #[serde(skip)]
    pub(crate) acted: bool,
}

fn default_facing() -> Direction {
    Direction::Right
}

impl Object {
    /// Create an in-world icon.
    #[must_use]
    pub fn icon(name: impl Into<String>, x: usize, y: usize) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            is_text: false,
            color: None,
            facing: Direction::Right,
            acted: false,
        }
    }

    /// Create a rule-forming text tile.
    #[must_use]
    pub fn text(word: impl Into<String>, x: usize, y: usize) -> Self {
        Self {
            name: word.into(),
            x,
            y,
            is_text: true,
            color: None,
            facing: Direction::Right,
            acted: false,
        }
    }

    /// Attach a color tag.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Stable type id for the observation. Unknown names map to 0.
    #[must_use]
    pub fn type_id(&self) -> u16 {
        if self.is_text {
            TEXT_VOCABULARY
                .iter()
                .position(|w| *w == self.name)
                .map_or(0, |i| TEXT_TYPE_OFFSET + i as u16)
        } else {
            ICON_VOCABULARY
                .iter()
                .position(|w| *w == self.name)
                .map_or(0, |i| i as u16 + 1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_and_text_ids_disjoint() {
        let icon = Object::icon("baba", 0, 0);
        let text = Object::text("baba", 0, 0);
        assert_eq!(icon.type_id(), 1);
        assert_eq!(text.type_id(), TEXT_TYPE_OFFSET);
        assert_ne!(icon.type_id(), text.type_id());
    }

    #[test]
    fn test_unknown_name_maps_to_zero() {
        assert_eq!(Object::icon("zyzzy", 0, 0).type_id(), 0);
        assert_eq!(Object::text("zyzzy", 0, 0).type_id(), 0);
    }

    #[test]
    fn test_property_words_have_text_ids() {
        assert_eq!(Object::text("is", 0, 0).type_id(), TEXT_TYPE_OFFSET + 10);
        assert_eq!(Object::text("you", 0, 0).type_id(), TEXT_TYPE_OFFSET + 11);
    }

    #[test]
    fn test_color_tag() {
        let obj = Object::icon("key", 1, 2).with_color("gold");
        assert_eq!(obj.color.as_deref(), Some("gold"));
    }
}
