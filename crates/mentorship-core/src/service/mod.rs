//! Assignment service: mentor/student lifecycle and relationship rules.

mod populate;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::config::ServiceConfig;
use crate::error::{MentorshipError, MentorshipResult};
use crate::traits::MentorshipStore;
use crate::types::{Mentor, NewMentor, NewStudent, RecordId, Student};

pub use populate::populate;

/// Confirmation returned by a bulk assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkAssignment {
    pub message: String,
    pub mentor: Mentor,
}

/// Confirmation returned by a single-student assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentorAssignment {
    pub message: String,
    pub student: Student,
}

/// The mentor/student assignment service.
///
/// Holds a shared store handle; cloning is cheap.
#[derive(Clone)]
pub struct AssignmentService {
    store: Arc<dyn MentorshipStore>,
    config: ServiceConfig,
}

impl AssignmentService {
    /// Create a service over the given store.
    pub fn new(store: Arc<dyn MentorshipStore>, config: ServiceConfig) -> Self {
        Self { store, config }
    }

    /// The underlying store.
    pub fn store(&self) -> &Arc<dyn MentorshipStore> {
        &self.store
    }

    /// The active business rule switches.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Store a new mentor with an empty student list.
    #[instrument(skip(self))]
    pub async fn create_mentor(&self, name: Option<String>) -> MentorshipResult<Mentor> {
        let mentor = self.store.insert_mentor(NewMentor { name }).await?;
        info!(mentor_id = %mentor.id, "Mentor created");
        Ok(mentor)
    }

    /// Store a new unassigned student.
    #[instrument(skip(self))]
    pub async fn create_student(&self, name: Option<String>) -> MentorshipResult<Student> {
        let student = self.store.insert_student(NewStudent { name }).await?;
        info!(student_id = %student.id, "Student created");
        Ok(student)
    }

    /// Fetch a mentor by id.
    pub async fn get_mentor(&self, mentor_id: &RecordId) -> MentorshipResult<Mentor> {
        self.store
            .find_mentor(mentor_id)
            .await?
            .ok_or_else(|| MentorshipError::mentor_not_found(mentor_id.as_str()))
    }

    /// Fetch a student by id.
    pub async fn get_student(&self, student_id: &RecordId) -> MentorshipResult<Student> {
        self.store
            .find_student(student_id)
            .await?
            .ok_or_else(|| MentorshipError::student_not_found(student_id.as_str()))
    }

    /// Assign every currently unassigned student in `student_ids` to a mentor.
    ///
    /// Students that already have a mentor are skipped without error. Only the
    /// students actually assigned are appended to the mentor's list.
    #[instrument(skip(self, student_ids), fields(requested = student_ids.len()))]
    pub async fn bulk_assign_students(
        &self,
        mentor_id: &RecordId,
        student_ids: &[RecordId],
    ) -> MentorshipResult<BulkAssignment> {
        let outcome = self
            .store
            .assign_students(mentor_id, student_ids)
            .await?
            .ok_or_else(|| MentorshipError::mentor_not_found(mentor_id.as_str()))?;

        let skipped = student_ids.len().saturating_sub(outcome.assigned.len());
        if skipped > 0 {
            debug!(mentor_id = %mentor_id, skipped, "Some students were already assigned or unknown");
        }
        info!(
            mentor_id = %mentor_id,
            assigned = outcome.assigned.len(),
            "Students assigned"
        );

        Ok(BulkAssignment {
            message: "Students assigned successfully".to_string(),
            mentor: outcome.mentor,
        })
    }

    /// All students without a mentor, in store order.
    pub async fn list_unassigned_students(&self) -> MentorshipResult<Vec<Student>> {
        self.store.find_unassigned_students().await
    }

    /// Assign a single student to a mentor, overwriting any current mentor.
    ///
    /// Any current mentor is moved onto the student's history. `None`
    /// unassigns the student.
    #[instrument(skip(self))]
    pub async fn assign_mentor(
        &self,
        student_id: &RecordId,
        mentor_id: Option<RecordId>,
    ) -> MentorshipResult<MentorAssignment> {
        if self.config.verify_mentor_exists {
            if let Some(ref id) = mentor_id {
                if self.store.find_mentor(id).await?.is_none() {
                    return Err(MentorshipError::mentor_not_found(id.as_str()));
                }
            }
        }

        let student = self
            .store
            .reassign_student(student_id, mentor_id)
            .await?
            .ok_or_else(|| MentorshipError::student_not_found(student_id.as_str()))?;

        info!(
            student_id = %student.id,
            mentor_id = student.mentor.as_ref().map(RecordId::as_str).unwrap_or("null"),
            history = student.previous_mentors.len(),
            "Mentor assigned"
        );

        Ok(MentorAssignment {
            message: "Mentor assigned successfully".to_string(),
            student,
        })
    }

    /// The mentor's `students` list expanded into full records.
    pub async fn list_mentor_students(&self, mentor_id: &RecordId) -> MentorshipResult<Vec<Student>> {
        let mentor = self.get_mentor(mentor_id).await?;
        if mentor.students.is_empty() {
            return Ok(Vec::new());
        }
        let students = self.store.find_students(&mentor.students).await?;
        Ok(populate(&mentor.students, students, |s| &s.id))
    }

    /// The student's former mentors expanded into full records, oldest first.
    pub async fn list_previous_mentors(&self, student_id: &RecordId) -> MentorshipResult<Vec<Mentor>> {
        let student = self.get_student(student_id).await?;
        if student.previous_mentors.is_empty() {
            return Ok(Vec::new());
        }
        let mentors = self.store.find_mentors(&student.previous_mentors).await?;
        Ok(populate(&student.previous_mentors, mentors, |m| &m.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{BulkAssignOutcome, MockMentorshipStore};

    fn id(raw: &str) -> RecordId {
        RecordId::new(raw)
    }

    fn service(store: MockMentorshipStore, verify: bool) -> AssignmentService {
        AssignmentService::new(
            Arc::new(store),
            ServiceConfig {
                verify_mentor_exists: verify,
            },
        )
    }

    #[tokio::test]
    async fn test_bulk_assign_missing_mentor_is_not_found() {
        let mut store = MockMentorshipStore::new();
        store
            .expect_assign_students()
            .times(1)
            .returning(|_, _| Ok(None));

        let err = service(store, false)
            .bulk_assign_students(&id("m1"), &[id("s1")])
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Mentor not found");
    }

    #[tokio::test]
    async fn test_bulk_assign_returns_updated_mentor() {
        let mut store = MockMentorshipStore::new();
        store
            .expect_assign_students()
            .withf(|mentor, students| mentor.as_str() == "m1" && students.len() == 2)
            .returning(|mentor, _| {
                let mut updated = Mentor::new(mentor.clone(), Some("Alice".to_string()));
                updated.students.push(RecordId::new("s1"));
                Ok(Some(BulkAssignOutcome {
                    mentor: updated,
                    assigned: vec![RecordId::new("s1")],
                }))
            });

        let result = service(store, false)
            .bulk_assign_students(&id("m1"), &[id("s1"), id("s2")])
            .await
            .unwrap();

        assert_eq!(result.message, "Students assigned successfully");
        assert_eq!(result.mentor.students, vec![id("s1")]);
    }

    #[tokio::test]
    async fn test_assign_mentor_permissive_skips_lookup() {
        let mut store = MockMentorshipStore::new();
        store.expect_find_mentor().never();
        store
            .expect_reassign_student()
            .returning(|student, mentor| {
                let mut s = Student::new(student.clone(), None);
                s.reassign(mentor);
                Ok(Some(s))
            });

        let result = service(store, false)
            .assign_mentor(&id("s1"), Some(id("m-unknown")))
            .await
            .unwrap();

        assert_eq!(result.student.mentor, Some(id("m-unknown")));
        assert_eq!(result.message, "Mentor assigned successfully");
    }

    #[tokio::test]
    async fn test_assign_mentor_verified_rejects_unknown_mentor_without_write() {
        let mut store = MockMentorshipStore::new();
        store.expect_find_mentor().times(1).returning(|_| Ok(None));
        store.expect_reassign_student().never();

        let err = service(store, true)
            .assign_mentor(&id("s1"), Some(id("m-unknown")))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Mentor not found");
    }

    #[tokio::test]
    async fn test_assign_mentor_verified_allows_unassign() {
        let mut store = MockMentorshipStore::new();
        store.expect_find_mentor().never();
        store
            .expect_reassign_student()
            .returning(|student, _| Ok(Some(Student::new(student.clone(), None))));

        let result = service(store, true).assign_mentor(&id("s1"), None).await.unwrap();
        assert!(result.student.is_unassigned());
    }

    #[tokio::test]
    async fn test_assign_mentor_missing_student() {
        let mut store = MockMentorshipStore::new();
        store.expect_reassign_student().returning(|_, _| Ok(None));

        let err = service(store, false)
            .assign_mentor(&id("s404"), Some(id("m1")))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Student not found");
    }

    #[tokio::test]
    async fn test_list_mentor_students_skips_fetch_for_empty_list() {
        let mut store = MockMentorshipStore::new();
        store
            .expect_find_mentor()
            .returning(|m| Ok(Some(Mentor::new(m.clone(), None))));
        store.expect_find_students().never();

        let students = service(store, false)
            .list_mentor_students(&id("m1"))
            .await
            .unwrap();
        assert!(students.is_empty());
    }

    #[tokio::test]
    async fn test_list_previous_mentors_missing_student() {
        let mut store = MockMentorshipStore::new();
        store.expect_find_student().returning(|_| Ok(None));
        store.expect_find_mentors().never();

        let err = service(store, false)
            .list_previous_mentors(&id("s1"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
