use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("difficulty must be between 1 and 5, got {0}")]
pub struct InvalidDifficulty(pub u8);

/// Difficulty ordinal on a 1-5 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Difficulty(u8);

impl Difficulty {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// # Errors
    ///
    /// Returns `InvalidDifficulty` if `level` is outside `1..=5`.
    pub fn new(level: u8) -> Result<Self, InvalidDifficulty> {
        if (Self::MIN..=Self::MAX).contains(&level) {
            Ok(Self(level))
        } else {
            Err(InvalidDifficulty(level))
        }
    }

    #[must_use]
    pub fn level(self) -> u8 {
        self.0
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self.0 {
            1 => "Beginner",
            2 => "Easy",
            3 => "Intermediate",
            4 => "Advanced",
            _ => "Expert",
        }
    }
}

impl TryFrom<u8> for Difficulty {
    type Error = InvalidDifficulty;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Difficulty> for u8 {
    fn from(value: Difficulty) -> Self {
        value.0
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range() {
        assert_eq!(Difficulty::new(0), Err(InvalidDifficulty(0)));
        assert_eq!(Difficulty::new(6), Err(InvalidDifficulty(6)));
    }

    #[test]
    fn labels_follow_scale() {
        let labels: Vec<_> = (1..=5)
            .map(|level| Difficulty::new(level).unwrap().label())
            .collect();
        assert_eq!(
            labels,
            ["Beginner", "Easy", "Intermediate", "Advanced", "Expert"]
        );
    }

    #[test]
    fn deserialize_validates_range() {
        let ok: Difficulty = serde_json::from_str("3").unwrap();
        assert_eq!(ok.level(), 3);
        assert!(serde_json::from_str::<Difficulty>("9").is_err());
    }
}
