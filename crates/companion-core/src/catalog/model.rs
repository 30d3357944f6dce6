//! Course catalog domain models.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Difficulty level of a catalog course.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter, AsRefStr,
)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

/// A read-only entry of the course catalog.
///
/// Catalog entries are defined at load time and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub difficulty: Difficulty,
    /// Human-readable duration, e.g. "6 hours"
    pub duration: String,
    pub tags: BTreeSet<String>,
    pub is_purchased: bool,
}

impl Course {
    /// Case-insensitive substring match against title, description and tags.
    pub fn matches_text(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
            || self.tags.iter().any(|tag| tag.to_lowercase().contains(&needle))
    }

    /// Returns true when the course category contains the given category id.
    ///
    /// Category ids use dashes where display names use spaces
    /// (`data-science` vs `Data Science`), so dashes are compared as spaces.
    pub fn in_category(&self, category_id: &str) -> bool {
        let needle = category_id.to_lowercase().replace('-', " ");
        self.category.to_lowercase().contains(&needle)
    }
}

/// A course reference held in the widget's selection list and in chat contexts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectedCourse {
    pub id: String,
    pub name: String,
}

impl SelectedCourse {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl From<&Course> for SelectedCourse {
    fn from(course: &Course) -> Self {
        Self {
            id: course.id.clone(),
            name: course.title.clone(),
        }
    }
}

/// An entry of the category filter bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseCategory {
    /// Filter id (`all` disables category filtering)
    pub id: String,
    /// Display label
    pub name: String,
}

impl CourseCategory {
    pub const ALL: &'static str = "all";

    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Course {
        Course {
            id: "python-data-science-201".to_string(),
            title: "Python for Data Science".to_string(),
            description: "Master Python libraries for data analysis".to_string(),
            category: "Data Science".to_string(),
            difficulty: Difficulty::Intermediate,
            duration: "10 hours".to_string(),
            tags: ["python", "pandas"].iter().map(|t| t.to_string()).collect(),
            is_purchased: true,
        }
    }

    #[test]
    fn test_matches_text_is_case_insensitive() {
        let course = sample();
        assert!(course.matches_text("PYTHON"));
        assert!(course.matches_text("analysis"));
        assert!(course.matches_text("pand"));
        assert!(!course.matches_text("flutter"));
    }

    #[test]
    fn test_in_category_treats_dashes_as_spaces() {
        let course = sample();
        assert!(course.in_category("data-science"));
        assert!(course.in_category("Data"));
        assert!(!course.in_category("design"));
    }

    #[test]
    fn test_selected_course_from_course() {
        let selected = SelectedCourse::from(&sample());
        assert_eq!(selected.id, "python-data-science-201");
        assert_eq!(selected.name, "Python for Data Science");
    }

    #[test]
    fn test_difficulty_parses_from_str() {
        let parsed: Difficulty = "Advanced".parse().unwrap();
        assert_eq!(parsed, Difficulty::Advanced);
        assert_eq!(Difficulty::Beginner.to_string(), "Beginner");
    }
}
