pub mod catalog;
pub mod paths;
pub mod samples;
pub mod storage;

pub use crate::catalog::StaticCourseRepository;
pub use crate::paths::CompanionPaths;
pub use crate::storage::ConfigStorage;
