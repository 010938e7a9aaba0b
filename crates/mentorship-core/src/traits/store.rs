//! Document store trait and related types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::MentorshipResult;
use crate::types::{Mentor, NewMentor, NewStudent, RecordId, Student};

/// Result of a bulk assignment at the store level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkAssignOutcome {
    /// The mentor after its `students` list was extended.
    pub mentor: Mentor,
    /// Ids of the students whose `mentor` was actually set, in request order.
    pub assigned: Vec<RecordId>,
}

/// Supported store backends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Memory,
    #[serde(alias = "mongo")]
    MongoDb,
}

impl StoreBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreBackend::Memory => "memory",
            StoreBackend::MongoDb => "mongodb",
        }
    }
}

impl std::str::FromStr for StoreBackend {
    type Err = crate::error::MentorshipError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" | "in-memory" => Ok(StoreBackend::Memory),
            "mongodb" | "mongo" => Ok(StoreBackend::MongoDb),
            other => Err(crate::error::MentorshipError::Configuration(format!(
                "Unknown store backend: {}. Supported: memory, mongodb",
                other
            ))),
        }
    }
}

/// Persistence interface for mentors and students.
///
/// Single-record reads and inserts map directly onto a document store's
/// insert-one and find operations. The two compound writes,
/// [`assign_students`](MentorshipStore::assign_students) and
/// [`reassign_student`](MentorshipStore::reassign_student), must be atomic:
/// a backend either applies them in full or not at all.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MentorshipStore: Send + Sync {
    /// Insert a new mentor with an empty `students` list.
    async fn insert_mentor(&self, mentor: NewMentor) -> MentorshipResult<Mentor>;

    /// Insert a new unassigned student with no history.
    async fn insert_student(&self, student: NewStudent) -> MentorshipResult<Student>;

    /// Find a mentor by id.
    async fn find_mentor(&self, id: &RecordId) -> MentorshipResult<Option<Mentor>>;

    /// Find a student by id.
    async fn find_student(&self, id: &RecordId) -> MentorshipResult<Option<Student>>;

    /// Fetch every mentor whose id is in `ids`. Unknown ids are skipped and
    /// the result order is unspecified.
    async fn find_mentors(&self, ids: &[RecordId]) -> MentorshipResult<Vec<Mentor>>;

    /// Fetch every student whose id is in `ids`. Unknown ids are skipped and
    /// the result order is unspecified.
    async fn find_students(&self, ids: &[RecordId]) -> MentorshipResult<Vec<Student>>;

    /// Fetch every student whose `mentor` is null, in store order.
    async fn find_unassigned_students(&self) -> MentorshipResult<Vec<Student>>;

    /// Set `mentor` on every unassigned student in `student_ids` and append
    /// exactly those ids to the mentor's `students` list.
    ///
    /// Returns `None` without writing anything when the mentor does not exist.
    async fn assign_students(
        &self,
        mentor_id: &RecordId,
        student_ids: &[RecordId],
    ) -> MentorshipResult<Option<BulkAssignOutcome>>;

    /// Point a student at `mentor_id`, moving any current mentor onto
    /// `previous_mentors`.
    ///
    /// Returns `None` when the student does not exist.
    async fn reassign_student(
        &self,
        student_id: &RecordId,
        mentor_id: Option<RecordId>,
    ) -> MentorshipResult<Option<Student>>;

    /// Short backend name, reported by the health endpoint.
    fn backend_name(&self) -> &'static str;
}
