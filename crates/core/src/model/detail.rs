use crate::model::Course;

/// Person presenting a course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instructor {
    pub name: String,
    pub title: String,
    pub image: Option<String>,
}

impl Instructor {
    #[must_use]
    pub fn new(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            image: None,
        }
    }

    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

/// Price of a course, in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pricing {
    Free,
    Paid { price_cents: u32, original_price_cents: u32 },
}

impl Pricing {
    #[must_use]
    pub fn is_free(self) -> bool {
        matches!(self, Pricing::Free)
    }

    /// `Free` or the current price, e.g. `$19.99`.
    #[must_use]
    pub fn label(self) -> String {
        match self {
            Pricing::Free => "Free".to_owned(),
            Pricing::Paid { price_cents, .. } => format_cents(price_cents),
        }
    }

    /// Struck-through list price; `None` for free courses.
    #[must_use]
    pub fn original_label(self) -> Option<String> {
        match self {
            Pricing::Free => None,
            Pricing::Paid {
                original_price_cents,
                ..
            } => Some(format_cents(original_price_cents)),
        }
    }
}

fn format_cents(cents: u32) -> String {
    format!("${}.{:02}", cents / 100, cents % 100)
}

/// Everything the detail screen shows for one course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseDetail {
    pub course: Course,
    pub learning_outcomes: Vec<String>,
    pub requirements: Vec<String>,
    pub instructor: Instructor,
    pub pricing: Pricing,
    pub student_count: u32,
}

impl CourseDetail {
    /// `950 students`, `15.4k students`, `1.2M students`.
    #[must_use]
    pub fn formatted_student_count(&self) -> String {
        format_student_count(self.student_count)
    }
}

fn format_student_count(count: u32) -> String {
    let count_f = f64::from(count);
    if count < 1_000 {
        format!("{count} students")
    } else if count < 1_000_000 {
        format!("{:.1}k students", count_f / 1_000.0)
    } else {
        format!("{:.1}M students", count_f / 1_000_000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn student_count_scales() {
        assert_eq!(format_student_count(950), "950 students");
        assert_eq!(format_student_count(15_420), "15.4k students");
        assert_eq!(format_student_count(1_250_000), "1.2M students");
    }

    #[test]
    fn pricing_labels() {
        assert_eq!(Pricing::Free.label(), "Free");
        assert_eq!(Pricing::Free.original_label(), None);

        let paid = Pricing::Paid {
            price_cents: 1_999,
            original_price_cents: 4_999,
        };
        assert!(!paid.is_free());
        assert_eq!(paid.label(), "$19.99");
        assert_eq!(paid.original_label().as_deref(), Some("$49.99"));
        assert_eq!(
            Pricing::Paid {
                price_cents: 500,
                original_price_cents: 500
            }
            .label(),
            "$5.00"
        );
    }
}
