//! Course catalog domain module.
//!
//! - `model`: `Course`, `Difficulty`, `SelectedCourse`, `CourseCategory`
//! - `repository`: read access trait implemented by infrastructure
//! - `search`: text and category filtering

mod model;
mod repository;
mod search;

pub use model::{Course, CourseCategory, Difficulty, SelectedCourse};
pub use repository::CourseRepository;
pub use search::{CourseQuery, filter_by_category, search_courses};
