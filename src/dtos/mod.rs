pub mod courses;

pub use courses::{DeleteCourseResponse, UpdateCourseResponse};
