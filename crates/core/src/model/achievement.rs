use chrono::{DateTime, Utc};

use crate::model::AchievementId;

/// What an achievement rewards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AchievementKind {
    Progress,
    Streak,
    Course,
    Milestone,
}

/// Rarity tier derived from points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rarity {
    Basic,
    Common,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    #[must_use]
    pub fn from_points(points: u32) -> Self {
        match points {
            100.. => Rarity::Legendary,
            50.. => Rarity::Epic,
            25.. => Rarity::Rare,
            10.. => Rarity::Common,
            _ => Rarity::Basic,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Rarity::Basic => "Basic",
            Rarity::Common => "Common",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
        }
    }

    /// ARGB badge colour.
    #[must_use]
    pub fn color(self) -> u32 {
        match self {
            Rarity::Legendary => 0xFFFF_D700,
            Rarity::Epic => 0xFF9B_59B6,
            Rarity::Rare => 0xFF21_96F3,
            Rarity::Common => 0xFF4C_AF50,
            Rarity::Basic => 0xFF75_7575,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Achievement {
    id: AchievementId,
    title: String,
    description: String,
    kind: AchievementKind,
    icon: String,
    points: u32,
    requirement: Option<String>,
    unlocked_at: Option<DateTime<Utc>>,
}

impl Achievement {
    #[must_use]
    pub fn new(
        id: AchievementId,
        title: impl Into<String>,
        description: impl Into<String>,
        kind: AchievementKind,
        icon: impl Into<String>,
        points: u32,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            kind,
            icon: icon.into(),
            points,
            requirement: None,
            unlocked_at: None,
        }
    }

    #[must_use]
    pub fn with_requirement(mut self, requirement: impl Into<String>) -> Self {
        self.requirement = Some(requirement.into());
        self
    }

    /// Returns an unlocked copy. The first unlock time is kept on repeat calls.
    #[must_use]
    pub fn unlock(&self, now: DateTime<Utc>) -> Self {
        let mut next = self.clone();
        next.unlocked_at = Some(self.unlocked_at.unwrap_or(now));
        next
    }

    #[must_use]
    pub fn id(&self) -> AchievementId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn kind(&self) -> AchievementKind {
        self.kind
    }

    #[must_use]
    pub fn icon(&self) -> &str {
        &self.icon
    }

    #[must_use]
    pub fn points(&self) -> u32 {
        self.points
    }

    #[must_use]
    pub fn requirement(&self) -> Option<&str> {
        self.requirement.as_deref()
    }

    #[must_use]
    pub fn unlocked_at(&self) -> Option<DateTime<Utc>> {
        self.unlocked_at
    }

    #[must_use]
    pub fn is_unlocked(&self) -> bool {
        self.unlocked_at.is_some()
    }

    #[must_use]
    pub fn rarity(&self) -> Rarity {
        Rarity::from_points(self.points)
    }

    /// Unlock date as `14 Nov 2023`, or `Locked`.
    #[must_use]
    pub fn formatted_unlock_date(&self) -> String {
        self.unlocked_at
            .map_or_else(|| "Locked".to_owned(), |at| at.format("%d %b %Y").to_string())
    }
}
