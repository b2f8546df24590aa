//! Course directory API handlers
//!
//! Contains HTTP request handlers for the `/api/v1/courses` endpoints.

use crate::error::AppError;
use crate::services::courses::CourseService;
use crate::state::{Course, SharedState};
use axum::{
    extract::{Path, State},
    http::{StatusCode, Uri},
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};

/// Enroll request
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct EnrollRequest {
    /// Email of the user to enroll
    pub email: Option<String>,
}

/// GET /api/v1/courses - List all courses
pub async fn list_courses(
    State(state): State<SharedState>,
) -> Result<Json<Vec<Course>>, AppError> {
    let courses = CourseService::list_all(state.store.as_ref()).await?;
    Ok(Json(courses))
}

/// GET /api/v1/courses/user/:userEmail - List courses a user is enrolled in
pub async fn list_user_courses(
    State(state): State<SharedState>,
    Path(user_email): Path<String>,
) -> Result<Json<Vec<Course>>, AppError> {
    let courses = CourseService::list_for_user(state.store.as_ref(), &user_email).await?;
    Ok(Json(courses))
}

/// GET /api/v1/courses/title/:title - Find a course by title
pub async fn get_course_by_title(
    State(state): State<SharedState>,
    Path(title): Path<String>,
) -> Result<Json<Course>, AppError> {
    let course = CourseService::find_by_title(state.store.as_ref(), &title).await?;
    Ok(Json(course))
}

/// PUT /api/v1/courses/:id/enroll - Enroll a user in a course
///
/// A missing or unparsable body is treated the same as a body without an
/// email, so the client always gets the 400 message rather than a rejection.
pub async fn enroll_in_course(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    body: Option<Json<EnrollRequest>>,
) -> Result<Json<Course>, AppError> {
    let request = body.map(|Json(request)| request).unwrap_or_default();
    let course =
        CourseService::enroll(state.store.as_ref(), &id, request.email.as_deref()).await?;
    Ok(Json(course))
}

/// PUT /api/v1/courses/{user,title}/:segment - Enroll where the id is `user` or `title`
///
/// The fixed `user` and `title` routes take precedence over `:id`, so an
/// enrollment addressed to those ids lands here. When the last segment is
/// `enroll` the request is handled as an enrollment against the id segment;
/// any other path has no PUT route.
pub async fn enroll_in_shadowed_course(
    State(state): State<SharedState>,
    uri: Uri,
    body: Option<Json<EnrollRequest>>,
) -> Response {
    let mut segments = uri.path().rsplit('/');
    match (segments.next(), segments.next()) {
        (Some("enroll"), Some(id)) => {
            enroll_in_course(State(state), Path(id.to_string()), body)
                .await
                .into_response()
        }
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}
