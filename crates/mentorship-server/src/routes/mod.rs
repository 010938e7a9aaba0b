//! Route definitions for the REST API.

mod health;
mod mentors;
mod students;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::state::AppState;

/// Create the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Mentors
        .route("/mentors", post(mentors::create_mentor))
        .route("/mentors/:mentor_id", get(mentors::get_mentor))
        .route(
            "/mentors/:mentor_id/assign-students",
            post(mentors::assign_students),
        )
        .route("/mentors/:mentor_id/students", get(mentors::list_mentor_students))
        // Students
        .route("/students", post(students::create_student))
        .route("/students/unassigned", get(students::list_unassigned_students))
        .route("/students/:student_id", get(students::get_student))
        .route(
            "/students/:student_id/assign-mentor",
            put(students::assign_mentor),
        )
        .route(
            "/students/:student_id/previous-mentors",
            get(students::list_previous_mentors),
        )
        // Attach state
        .with_state(state)
}

pub use health::*;
pub use mentors::*;
pub use students::*;
