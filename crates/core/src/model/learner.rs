/// Home screen snapshot of the learner's activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LearnerSummary {
    pub name: String,
    pub enrolled_courses: u32,
    pub completed_lessons: u32,
    pub learning_streak_days: u32,
    pub total_minutes: u64,
}

impl LearnerSummary {
    /// Whole hours spent learning, rounded down.
    #[must_use]
    pub fn total_hours(&self) -> u64 {
        self.total_minutes / 60
    }
}
