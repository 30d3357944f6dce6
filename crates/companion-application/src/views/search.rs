use crate::store::WidgetStore;
use companion_core::catalog::{Course, CourseCategory, CourseQuery, CourseRepository, SelectedCourse};
use std::sync::Arc;

/// Search over the whole catalog.
pub struct SearchView {
    store: Arc<WidgetStore>,
    catalog: Arc<dyn CourseRepository>,
    query: CourseQuery,
}

impl SearchView {
    pub fn new(store: Arc<WidgetStore>, catalog: Arc<dyn CourseRepository>) -> Self {
        Self {
            store,
            catalog,
            query: CourseQuery::default(),
        }
    }

    pub fn set_query(&mut self, text: &str) {
        self.query.text = text.to_string();
    }

    pub fn set_category(&mut self, category_id: &str) {
        self.query.category = category_id.to_string();
    }

    pub fn query(&self) -> &CourseQuery {
        &self.query
    }

    pub fn categories(&self) -> Vec<CourseCategory> {
        self.catalog.categories()
    }

    /// Matching courses in catalog order; an empty query lists everything.
    pub fn results(&self) -> Vec<Course> {
        self.query.apply(&self.catalog.get_all())
    }

    /// Highlights a course in the detail view.
    pub fn select_course(&self, course: &Course) {
        self.store.set_selected_course(Some(SelectedCourse::from(course)));
    }

    pub fn clear_selection(&self) {
        self.store.set_selected_course(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use companion_infrastructure::StaticCourseRepository;

    #[test]
    fn test_search_and_select() {
        let store = Arc::new(WidgetStore::new());
        let mut view = SearchView::new(Arc::clone(&store), Arc::new(StaticCourseRepository::new()));
        assert_eq!(view.results().len(), 10);

        view.set_query("ai");
        view.set_category("all");
        let results = view.results();
        assert!(results.iter().any(|c| c.id == "nlp-transformers-801"));

        view.select_course(&results[0]);
        assert!(store.snapshot().selected_course.is_some());
        view.clear_selection();
        assert!(store.snapshot().selected_course.is_none());
    }

    #[test]
    fn test_category_filter_uses_catalog_categories() {
        let mut view = SearchView::new(
            Arc::new(WidgetStore::new()),
            Arc::new(StaticCourseRepository::new()),
        );
        assert_eq!(view.categories().len(), 9);
        view.set_category("cloud");
        let ids: Vec<_> = view.results().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["cloud-aws-basics-701"]);
    }
}
