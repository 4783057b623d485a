use std::fmt;
use std::str::FromStr;

/// Discrete review level shown as a row of stars
///
/// The site encodes the level as a word in the class list of the rating
/// element, e.g. `<p class="star-rating Three">`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rating {
    One,
    Two,
    Three,
    Four,
    Five,
}

impl Rating {
    /// All levels, lowest first
    pub const ALL: [Rating; 5] = [Self::One, Self::Two, Self::Three, Self::Four, Self::Five];

    /// Textual level as it appears in the markup and in the CSV output
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::One => "One",
            Self::Two => "Two",
            Self::Three => "Three",
            Self::Four => "Four",
            Self::Five => "Five",
        }
    }

    /// Number of stars
    pub fn stars(&self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
            Self::Four => 4,
            Self::Five => 5,
        }
    }

    /// Reads the level from a class token; None for unknown tokens
    pub fn from_class_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == token)
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rating {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_class_token(s.trim()).ok_or_else(|| format!("unknown rating level '{}'", s))
    }
}
