use crate::models::Course;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct UpdateCourseResponse {
    pub message: String,
    pub course: Course,
}

#[derive(Debug, Serialize)]
pub struct DeleteCourseResponse {
    pub message: String,
    pub course: Course,
}
