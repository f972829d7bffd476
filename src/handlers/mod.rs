pub mod courses;
pub mod health;
pub mod metrics;

pub use courses::{create_course, delete_course, get_course, list_courses, update_course};
pub use health::{health_check, readiness_check};
