//! Derived views over a course collection: category filter, ordering, and
//! free-text search. Everything here is pure; the source slice is never
//! mutated.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

use crate::model::{Category, Course};

/// Which courses make it into the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CourseFilter {
    #[default]
    All,
    Category(Category),
}

impl CourseFilter {
    #[must_use]
    pub fn matches(self, course: &Course) -> bool {
        match self {
            CourseFilter::All => true,
            CourseFilter::Category(category) => course.category() == category,
        }
    }
}

/// Ordering of the list.
///
/// `Popularity` has no real signal behind it yet and orders by ascending id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CourseSort {
    #[default]
    Title,
    Difficulty,
    Popularity,
}

impl CourseSort {
    fn sort(self, courses: &mut [Course]) {
        match self {
            CourseSort::Title => courses.sort_by(|a, b| a.title().cmp(b.title())),
            CourseSort::Difficulty => courses.sort_by_key(Course::difficulty),
            CourseSort::Popularity => courses.sort_by_key(Course::id),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown {kind}: {raw}")]
pub struct ParseQueryError {
    kind: &'static str,
    raw: String,
}

impl FromStr for CourseFilter {
    type Err = ParseQueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(CourseFilter::All);
        }
        s.parse::<Category>()
            .map(CourseFilter::Category)
            .map_err(|_| ParseQueryError {
                kind: "filter",
                raw: s.to_owned(),
            })
    }
}

impl FromStr for CourseSort {
    type Err = ParseQueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "title" => Ok(CourseSort::Title),
            "difficulty" => Ok(CourseSort::Difficulty),
            "popular" | "popularity" => Ok(CourseSort::Popularity),
            _ => Err(ParseQueryError {
                kind: "sort",
                raw: s.to_owned(),
            }),
        }
    }
}

/// Filter then sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CatalogQuery {
    pub filter: CourseFilter,
    pub sort: CourseSort,
}

impl CatalogQuery {
    #[must_use]
    pub fn new(filter: CourseFilter, sort: CourseSort) -> Self {
        Self { filter, sort }
    }

    /// Filtered and sorted copy of `courses`. Equal sort keys keep their
    /// original relative order.
    #[must_use]
    pub fn apply(&self, courses: &[Course]) -> Vec<Course> {
        let mut selected: Vec<Course> = courses
            .iter()
            .filter(|course| self.filter.matches(course))
            .cloned()
            .collect();
        self.sort.sort(&mut selected);
        selected
    }
}

/// Case-insensitive substring search over title and description.
///
/// A blank query returns `courses` unchanged.
#[must_use]
pub fn search(courses: &[Course], query: &str) -> Vec<Course> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return courses.to_vec();
    }
    courses
        .iter()
        .filter(|course| {
            course.title().to_lowercase().contains(&needle)
                || course.description().to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}
