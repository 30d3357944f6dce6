//! Catalog filtering shared by the search and discovery views.

use super::model::{Course, CourseCategory};

/// A combined text + category filter over a list of courses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseQuery {
    pub text: String,
    pub category: String,
}

impl Default for CourseQuery {
    fn default() -> Self {
        Self {
            text: String::new(),
            category: CourseCategory::ALL.to_string(),
        }
    }
}

impl CourseQuery {
    pub fn new(text: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            category: category.into(),
        }
    }

    pub fn matches(&self, course: &Course) -> bool {
        let text_ok = self.text.trim().is_empty() || course.matches_text(self.text.trim());
        let category_ok = self.category == CourseCategory::ALL || course.in_category(&self.category);
        text_ok && category_ok
    }

    /// Applies the query, preserving catalog order.
    pub fn apply<'a, I>(&self, courses: I) -> Vec<Course>
    where
        I: IntoIterator<Item = &'a Course>,
    {
        courses
            .into_iter()
            .filter(|course| self.matches(course))
            .cloned()
            .collect()
    }
}

/// Text search; an empty query returns every course.
pub fn search_courses(courses: &[Course], query: &str) -> Vec<Course> {
    CourseQuery::new(query, CourseCategory::ALL).apply(courses)
}

/// Category filter; `all` returns every course.
pub fn filter_by_category(courses: &[Course], category: &str) -> Vec<Course> {
    CourseQuery::new("", category).apply(courses)
}
