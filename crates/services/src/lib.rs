#![forbid(unsafe_code)]

pub mod app_services;
pub mod content;
pub mod course_detail;
pub mod course_list;
pub mod error;
pub mod home;
pub mod progress;
pub mod scheduler;

pub use codelearn_core::Clock;

pub use app_services::AppServices;
pub use content::{ContentService, Direction, LessonNavigation, LessonPage};
pub use course_detail::{CourseDetailService, CourseDetailView};
pub use course_list::{CourseListService, CourseListState};
pub use error::{
    AppServicesError, ContentError, CourseDetailError, CourseListError, HomeError, ProgressError,
};
pub use home::{HomeService, HomeView};
pub use progress::{CourseProgress, ProgressService};
pub use scheduler::{Scheduler, SimulatedLatency, Task, TokioScheduler};
