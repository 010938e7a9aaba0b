//! Student endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::error::ApiResult;
use crate::state::AppState;
use mentorship_core::service::MentorAssignment;
use mentorship_core::types::{Mentor, RecordId, Student};

/// Request body for creating a student.
#[derive(Debug, Deserialize)]
pub struct CreateStudentRequest {
    #[serde(default)]
    pub name: Option<String>,
}

/// Create a student.
/// POST /students
pub async fn create_student(
    State(state): State<AppState>,
    Json(request): Json<CreateStudentRequest>,
) -> ApiResult<(StatusCode, Json<Student>)> {
    let student = state.service.create_student(request.name).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

/// Get a student by id.
/// GET /students/:student_id
pub async fn get_student(
    State(state): State<AppState>,
    Path(student_id): Path<RecordId>,
) -> ApiResult<Json<Student>> {
    Ok(Json(state.service.get_student(&student_id).await?))
}

/// List students without a mentor.
/// GET /students/unassigned
pub async fn list_unassigned_students(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<Student>>> {
    Ok(Json(state.service.list_unassigned_students().await?))
}

/// Request body for assigning a mentor to one student.
///
/// A missing or `null` mentor id unassigns the student.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignMentorRequest {
    #[serde(default)]
    pub mentor_id: Option<RecordId>,
}

/// Assign or change the mentor of a student.
/// PUT /students/:student_id/assign-mentor
pub async fn assign_mentor(
    State(state): State<AppState>,
    Path(student_id): Path<RecordId>,
    Json(request): Json<AssignMentorRequest>,
) -> ApiResult<Json<MentorAssignment>> {
    let result = state
        .service
        .assign_mentor(&student_id, request.mentor_id)
        .await?;
    Ok(Json(result))
}

/// List the former mentors of a student, oldest first.
/// GET /students/:student_id/previous-mentors
pub async fn list_previous_mentors(
    State(state): State<AppState>,
    Path(student_id): Path<RecordId>,
) -> ApiResult<Json<Vec<Mentor>>> {
    Ok(Json(state.service.list_previous_mentors(&student_id).await?))
}
