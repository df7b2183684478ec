//! Property vocabulary and text-word classification.
//!
//! Properties are a closed enumeration of behavioral flags a noun can
//! carry. They are not mutually exclusive: a noun may accumulate several
//! properties from several rules at once.
//!
//! A text tile's word falls into exactly one of three classes: the verb
//! `IS`, a property name, or a noun. Anything that is neither `is` nor a
//! recognized property reads as a noun, so levels can introduce new object
//! categories without touching the engine.

use serde::{Deserialize, Serialize};

/// Behavioral flags derived from active rules.
///
/// Flags bind to nouns but take effect on in-world icons only; text tiles
/// never carry derived properties.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Property {
    /// Directly controlled by the player action each tick.
    You,
    /// Overlapping a YOU object ends the episode as a win.
    Win,
    /// Blocks movement into its cell.
    Stop,
    /// Shoved forward by a moving object.
    Push,
    /// Destroys itself and anything sharing its cell on contact.
    Sink,
    /// Destroys YOU objects on contact; survives the contact itself.
    Defeat,
    /// Advances autonomously each tick along its facing.
    Move,
    /// Destroys MELT objects on contact; survives the contact itself.
    Hot,
    /// Destroyed on contact with a HOT object.
    Melt,
}

impl Property {
    /// All recognized properties.
    pub const ALL: [Property; 9] = [
        Property::You,
        Property::Win,
        Property::Stop,
        Property::Push,
        Property::Sink,
        Property::Defeat,
        Property::Move,
        Property::Hot,
        Property::Melt,
    ];

    /// Lowercase word form, as it appears on a text tile.
    #[must_use]
    pub const fn word(self) -> &'static str {
        match self {
            Property::You => "you",
            Property::Win => "win",
            Property::Stop => "stop",
            Property::Push => "push",
            Property::Sink => "sink",
            Property::Defeat => "defeat",
            Property::Move => "move",
            Property::Hot => "hot",
            Property::Melt => "melt",
        }
    }

    /// Uppercase display form, as it appears in serialized rules.
    #[must_use]
    pub const fn display(self) -> &'static str {
        match self {
            Property::You => "YOU",
            Property::Win => "WIN",
            Property::Stop => "STOP",
            Property::Push => "PUSH",
            Property::Sink => "SINK",
            Property::Defeat => "DEFEAT",
            Property::Move => "MOVE",
            Property::Hot => "HOT",
            Property::Melt => "MELT",
        }
    }

    /// Look up a property by its word form.
    #[must_use]
    pub fn from_word(word: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.word() == word)
    }
}

/// Classification of a text tile's word for rule scanning.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Word {
    /// The connective verb.
    Is,
    /// A recognized property name.
    Property(Property),
    /// Any other word names an object category.
    Noun(String),
}

impl Word {
    /// Classify the word carried by a text tile.
    #[must_use]
    pub fn classify(word: &str) -> Self {
        if word == "is" {
            Word::Is
        } else if let Some(prop) = Property::from_word(word) {
            Word::Property(prop)
        } else {
            Word::Noun(word.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_round_trip() {
        for prop in Property::ALL {
            assert_eq!(Property::from_word(prop.word()), Some(prop));
        }
    }

    #[test]
    fn test_classify() {
        assert_eq!(Word::classify("is"), Word::Is);
        assert_eq!(Word::classify("you"), Word::Property(Property::You));
        assert_eq!(Word::classify("baba"), Word::Noun("baba".to_string()));
        // Unrecognized words read as nouns, not errors.
        assert_eq!(Word::classify("zyzzy"), Word::Noun("zyzzy".to_string()));
    }

    #[test]
    fn test_display_is_uppercase_word() {
        for prop in Property::ALL {
            assert_eq!(prop.display(), prop.word().to_uppercase());
        }
    }
}
