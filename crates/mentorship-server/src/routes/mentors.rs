//! Mentor endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::error::ApiResult;
use crate::state::AppState;
use mentorship_core::service::BulkAssignment;
use mentorship_core::types::{Mentor, RecordId, Student};

/// Request body for creating a mentor.
#[derive(Debug, Deserialize)]
pub struct CreateMentorRequest {
    #[serde(default)]
    pub name: Option<String>,
}

/// Create a mentor.
/// POST /mentors
pub async fn create_mentor(
    State(state): State<AppState>,
    Json(request): Json<CreateMentorRequest>,
) -> ApiResult<(StatusCode, Json<Mentor>)> {
    let mentor = state.service.create_mentor(request.name).await?;
    Ok((StatusCode::CREATED, Json(mentor)))
}

/// Get a mentor by id.
/// GET /mentors/:mentor_id
pub async fn get_mentor(
    State(state): State<AppState>,
    Path(mentor_id): Path<RecordId>,
) -> ApiResult<Json<Mentor>> {
    Ok(Json(state.service.get_mentor(&mentor_id).await?))
}

/// Request body for assigning students to a mentor.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignStudentsRequest {
    pub student_ids: Vec<RecordId>,
}

/// Assign unassigned students to a mentor.
/// POST /mentors/:mentor_id/assign-students
pub async fn assign_students(
    State(state): State<AppState>,
    Path(mentor_id): Path<RecordId>,
    Json(request): Json<AssignStudentsRequest>,
) -> ApiResult<Json<BulkAssignment>> {
    let result = state
        .service
        .bulk_assign_students(&mentor_id, &request.student_ids)
        .await?;
    Ok(Json(result))
}

/// List the students recorded under a mentor.
/// GET /mentors/:mentor_id/students
pub async fn list_mentor_students(
    State(state): State<AppState>,
    Path(mentor_id): Path<RecordId>,
) -> ApiResult<Json<Vec<Student>>> {
    Ok(Json(state.service.list_mentor_students(&mentor_id).await?))
}
