mod achievement;
mod asset;
mod category;
mod course;
mod detail;
mod difficulty;
mod ids;
mod learner;
mod lesson;
mod sequence;

pub use achievement::{Achievement, AchievementKind, Rarity};
pub use asset::{AssetPath, CONTENT_ROOT};
pub use category::{Category, UnknownCategory};
pub use course::{Course, CourseError, CourseUpdate};
pub use detail::{CourseDetail, Instructor, Pricing};
pub use difficulty::{Difficulty, InvalidDifficulty};
pub use ids::{AchievementId, CourseId, ParseIdError};
pub use learner::LearnerSummary;
pub use lesson::{LessonId, LessonIdError};
pub use sequence::{LessonSequence, SequenceError};
