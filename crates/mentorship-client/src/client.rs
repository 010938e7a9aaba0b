//! HTTP client for the mentorship REST API.

use mentorship_core::error::{Entity, MentorshipError, MentorshipResult};
use mentorship_core::service::{BulkAssignment, MentorAssignment};
use mentorship_core::types::{Mentor, RecordId, Student};

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

/// Client for the mentorship REST API.
#[derive(Debug, Clone)]
pub struct MentorshipClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub store: String,
    pub version: String,
}

impl MentorshipClient {
    /// Create a client for the server at `base_url`.
    pub fn new(base_url: &str) -> MentorshipResult<Self> {
        Self::with_client(Client::new(), base_url)
    }

    /// Create a client around a preconfigured `reqwest::Client`.
    pub fn with_client(client: Client, base_url: &str) -> MentorshipResult<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(MentorshipError::Configuration(format!(
                "Base URL must start with http:// or https://, got '{}'",
                base_url
            )));
        }
        Ok(Self { client, base_url })
    }

    /// Create a client from environment variables.
    pub fn from_env() -> MentorshipResult<Self> {
        let base_url = std::env::var("MENTORSHIP_URL")
            .unwrap_or_else(|_| "http://localhost:5000".to_string());
        Self::new(&base_url)
    }

    /// The server base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Create a mentor.
    pub async fn create_mentor(&self, name: &str) -> MentorshipResult<Mentor> {
        let response = self
            .client
            .post(self.url("/mentors"))
            .json(&json!({ "name": name }))
            .send()
            .await
            .map_err(|e| network("create mentor", e))?;
        parse(response, None).await
    }

    /// Create a student.
    pub async fn create_student(&self, name: &str) -> MentorshipResult<Student> {
        let response = self
            .client
            .post(self.url("/students"))
            .json(&json!({ "name": name }))
            .send()
            .await
            .map_err(|e| network("create student", e))?;
        parse(response, None).await
    }

    /// Get a mentor by id.
    pub async fn get_mentor(&self, mentor_id: &RecordId) -> MentorshipResult<Mentor> {
        let response = self
            .client
            .get(self.url(&format!("/mentors/{}", mentor_id)))
            .send()
            .await
            .map_err(|e| network("get mentor", e))?;
        parse(response, Some((Entity::Mentor, mentor_id))).await
    }

    /// Get a student by id.
    pub async fn get_student(&self, student_id: &RecordId) -> MentorshipResult<Student> {
        let response = self
            .client
            .get(self.url(&format!("/students/{}", student_id)))
            .send()
            .await
            .map_err(|e| network("get student", e))?;
        parse(response, Some((Entity::Student, student_id))).await
    }

    /// Assign unassigned students to a mentor.
    pub async fn assign_students(
        &self,
        mentor_id: &RecordId,
        student_ids: &[RecordId],
    ) -> MentorshipResult<BulkAssignment> {
        let response = self
            .client
            .post(self.url(&format!("/mentors/{}/assign-students", mentor_id)))
            .json(&json!({ "studentIds": student_ids }))
            .send()
            .await
            .map_err(|e| network("assign students", e))?;
        parse(response, Some((Entity::Mentor, mentor_id))).await
    }

    /// List students without a mentor.
    pub async fn list_unassigned_students(&self) -> MentorshipResult<Vec<Student>> {
        let response = self
            .client
            .get(self.url("/students/unassigned"))
            .send()
            .await
            .map_err(|e| network("list unassigned students", e))?;
        parse(response, None).await
    }

    /// Assign or change a student's mentor. `None` unassigns.
    pub async fn assign_mentor(
        &self,
        student_id: &RecordId,
        mentor_id: Option<&RecordId>,
    ) -> MentorshipResult<MentorAssignment> {
        let response = self
            .client
            .put(self.url(&format!("/students/{}/assign-mentor", student_id)))
            .json(&json!({ "mentorId": mentor_id }))
            .send()
            .await
            .map_err(|e| network("assign mentor", e))?;

        // With mentor verification on, the server may also report the mentor missing.
        if response.status() == StatusCode::NOT_FOUND {
            let body: ErrorBody = response.json().await.unwrap_or(ErrorBody {
                message: String::new(),
            });
            return Err(match (body.message.starts_with("Mentor"), mentor_id) {
                (true, Some(id)) => MentorshipError::mentor_not_found(id.as_str()),
                _ => MentorshipError::student_not_found(student_id.as_str()),
            });
        }
        parse(response, Some((Entity::Student, student_id))).await
    }

    /// List the students recorded under a mentor.
    pub async fn list_mentor_students(&self, mentor_id: &RecordId) -> MentorshipResult<Vec<Student>> {
        let response = self
            .client
            .get(self.url(&format!("/mentors/{}/students", mentor_id)))
            .send()
            .await
            .map_err(|e| network("list mentor students", e))?;
        parse(response, Some((Entity::Mentor, mentor_id))).await
    }

    /// List a student's former mentors, oldest first.
    pub async fn list_previous_mentors(&self, student_id: &RecordId) -> MentorshipResult<Vec<Mentor>> {
        let response = self
            .client
            .get(self.url(&format!("/students/{}/previous-mentors", student_id)))
            .send()
            .await
            .map_err(|e| network("list previous mentors", e))?;
        parse(response, Some((Entity::Student, student_id))).await
    }

    /// Check server health.
    pub async fn health(&self) -> MentorshipResult<HealthStatus> {
        let response = self
            .client
            .get(self.url("/health"))
            .send()
            .await
            .map_err(|e| network("health check", e))?;
        parse(response, None).await
    }
}

fn network(action: &str, err: reqwest::Error) -> MentorshipError {
    MentorshipError::connection(format!("Failed to {}: {}", action, err))
}

/// Decode a success body, or turn an error status into a [`MentorshipError`].
///
/// `target` names the record a 404 refers to.
async fn parse<T: DeserializeOwned>(
    response: Response,
    target: Option<(Entity, &RecordId)>,
) -> MentorshipResult<T> {
    let status = response.status();
    if status.is_success() {
        return response
            .json()
            .await
            .map_err(|e| MentorshipError::Internal(format!("Failed to parse response: {}", e)));
    }

    let url = response.url().to_string();
    let body = response.text().await.unwrap_or_default();
    debug!(status = status.as_u16(), url = %url, "Request returned error status");
    Err(from_http_status(status, &body, target))
}

fn from_http_status(
    status: StatusCode,
    body: &str,
    target: Option<(Entity, &RecordId)>,
) -> MentorshipError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.message)
        .unwrap_or_else(|_| body.to_string());

    match (status, target) {
        (StatusCode::NOT_FOUND, Some((entity, id))) => MentorshipError::NotFound {
            entity,
            id: id.as_str().to_string(),
        },
        (
            StatusCode::BAD_REQUEST
            | StatusCode::UNPROCESSABLE_ENTITY
            | StatusCode::UNSUPPORTED_MEDIA_TYPE,
            _,
        ) => MentorshipError::validation(message),
        _ => MentorshipError::store(format!("HTTP {}: {}", status.as_u16(), message)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_normalized() {
        let client = MentorshipClient::new("http://localhost:5000/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000");
        assert_eq!(client.url("/mentors"), "http://localhost:5000/mentors");
    }

    #[test]
    fn test_base_url_requires_scheme() {
        assert!(MentorshipClient::new("localhost:5000").is_err());
    }

    #[test]
    fn test_status_mapping() {
        let mentor_id = RecordId::new("m1");
        let err = from_http_status(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"message":"missing field `studentIds`","code":"VALIDATION_ERROR"}"#,
            Some((Entity::Mentor, &mentor_id)),
        );
        assert!(matches!(err, MentorshipError::Validation { ref message } if message.contains("studentIds")));

        let err = from_http_status(
            StatusCode::NOT_FOUND,
            r#"{"message":"Mentor not found","code":"NOT_FOUND"}"#,
            Some((Entity::Mentor, &mentor_id)),
        );
        assert!(matches!(err, MentorshipError::NotFound { entity: Entity::Mentor, ref id } if id == "m1"));

        let err = from_http_status(StatusCode::NOT_FOUND, "", None);
        assert!(err.to_string().contains("HTTP 404"));

        let err = from_http_status(StatusCode::INTERNAL_SERVER_ERROR, "boom", None);
        assert!(err.to_string().contains("HTTP 500: boom"));
    }
}
