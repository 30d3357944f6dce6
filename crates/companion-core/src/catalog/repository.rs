use super::model::{Course, CourseCategory};

/// Read access to the course catalog.
///
/// The catalog is static for the lifetime of the widget, so lookups are
/// infallible and return owned copies.
pub trait CourseRepository: Send + Sync {
    /// Returns every course in catalog order.
    fn get_all(&self) -> Vec<Course>;

    /// Returns the category filter entries, `all` first.
    fn categories(&self) -> Vec<CourseCategory>;

    /// Finds a course by id.
    fn find_by_id(&self, id: &str) -> Option<Course> {
        self.get_all().into_iter().find(|course| course.id == id)
    }

    /// Returns only the courses the user owns.
    fn get_purchased(&self) -> Vec<Course> {
        self.get_all()
            .into_iter()
            .filter(|course| course.is_purchased)
            .collect()
    }
}
