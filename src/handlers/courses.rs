use crate::dtos::{DeleteCourseResponse, UpdateCourseResponse};
use crate::error::AppError;
use crate::models::Course;
use crate::startup::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use mongodb::bson::Document;

/// Parse the `{id}` path segment as a strict base-10 integer.
///
/// Runs before any storage access; anything non-numeric is rejected with
/// a 400 without touching the database.
fn parse_course_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>()
        .map_err(|_| AppError::BadRequest(anyhow::anyhow!("Invalid course ID.")))
}

/// GET /courses — every course, natural collection order.
pub async fn list_courses(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let courses = state.db.find_all().await?;
    Ok(Json(courses))
}

/// GET /courses/{id}
pub async fn get_course(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let course_id = parse_course_id(&raw_id)?;

    let course = state
        .db
        .find_by_id(course_id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Course not found.")))?;

    Ok(Json(course))
}

/// POST /courses — assign the next sequential id and insert.
///
/// The max-id read and the insert are two round-trips, not one atomic
/// step; under concurrent creates the unique id index rejects the loser.
pub async fn create_course(
    State(state): State<AppState>,
    Json(body): Json<Document>,
) -> Result<impl IntoResponse, AppError> {
    let next_id = state.db.next_course_id().await?;
    let course = Course::new(next_id, body);

    state.db.insert(&course).await?;

    tracing::info!(course_id = course.id, "Course created");
    metrics::counter!("courses_created_total").increment(1);

    Ok((StatusCode::CREATED, Json(course)))
}

/// PUT /courses/{id} — merge-patch the supplied fields onto the course.
pub async fn update_course(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Json(body): Json<Document>,
) -> Result<impl IntoResponse, AppError> {
    let course_id = parse_course_id(&raw_id)?;

    let course = state
        .db
        .update(course_id, body)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Course not found.")))?;

    tracing::info!(course_id, "Course updated");
    metrics::counter!("courses_updated_total").increment(1);

    Ok(Json(UpdateCourseResponse {
        message: "Course updated successfully".to_string(),
        course,
    }))
}

/// DELETE /courses/{id} — remove and return the course as it was.
pub async fn delete_course(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let course_id = parse_course_id(&raw_id)?;

    let course = state
        .db
        .delete(course_id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Course not found.")))?;

    tracing::info!(course_id, "Course deleted");
    metrics::counter!("courses_deleted_total").increment(1);

    Ok(Json(DeleteCourseResponse {
        message: format!("Course with ID {} deleted.", course_id),
        course,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_ids_parse() {
        assert_eq!(parse_course_id("1").unwrap(), 1);
        assert_eq!(parse_course_id("42").unwrap(), 42);
    }

    #[test]
    fn non_numeric_ids_are_rejected() {
        for raw in ["abc", "1.5", "1x", "", " 1", "0x10"] {
            let err = parse_course_id(raw).unwrap_err();
            assert!(matches!(err, AppError::BadRequest(_)), "accepted {:?}", raw);
        }
    }
}
