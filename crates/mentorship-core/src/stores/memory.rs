//! In-process store backed by ordered maps.
//!
//! All state sits behind one `RwLock`, so the compound writes required by
//! [`MentorshipStore`] are atomic without any further coordination.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::error::{Entity, MentorshipError, MentorshipResult};
use crate::traits::{BulkAssignOutcome, MentorshipStore};
use crate::types::{Mentor, NewMentor, NewStudent, RecordId, Student};

/// Records kept in insertion order with an id index.
#[derive(Debug)]
struct Table<T> {
    rows: Vec<T>,
    index: HashMap<RecordId, usize>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T> Table<T> {
    fn insert(&mut self, id: RecordId, row: T) {
        self.index.insert(id, self.rows.len());
        self.rows.push(row);
    }

    fn get(&self, id: &RecordId) -> Option<&T> {
        self.index.get(id).map(|&i| &self.rows[i])
    }

    fn get_mut(&mut self, id: &RecordId) -> Option<&mut T> {
        match self.index.get(id) {
            Some(&i) => self.rows.get_mut(i),
            None => None,
        }
    }

    fn len(&self) -> usize {
        self.rows.len()
    }
}

#[derive(Debug, Default)]
struct Tables {
    mentors: Table<Mentor>,
    students: Table<Student>,
}

/// In-memory [`MentorshipStore`] with UUID ids.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored mentors.
    pub async fn mentor_count(&self) -> usize {
        self.tables.read().await.mentors.len()
    }

    /// Number of stored students.
    pub async fn student_count(&self) -> usize {
        self.tables.read().await.students.len()
    }

    fn generate_id() -> RecordId {
        RecordId::new(Uuid::new_v4().to_string())
    }

    fn check_id(entity: Entity, id: &RecordId) -> MentorshipResult<()> {
        Uuid::parse_str(id.as_str())
            .map(|_| ())
            .map_err(|_| MentorshipError::invalid_id(entity, id.as_str()))
    }

    fn check_ids(entity: Entity, ids: &[RecordId]) -> MentorshipResult<()> {
        ids.iter().try_for_each(|id| Self::check_id(entity, id))
    }
}

#[async_trait]
impl MentorshipStore for MemoryStore {
    async fn insert_mentor(&self, mentor: NewMentor) -> MentorshipResult<Mentor> {
        let record = Mentor::new(Self::generate_id(), mentor.name);
        let mut tables = self.tables.write().await;
        tables.mentors.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    async fn insert_student(&self, student: NewStudent) -> MentorshipResult<Student> {
        let record = Student::new(Self::generate_id(), student.name);
        let mut tables = self.tables.write().await;
        tables.students.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    async fn find_mentor(&self, id: &RecordId) -> MentorshipResult<Option<Mentor>> {
        Self::check_id(Entity::Mentor, id)?;
        Ok(self.tables.read().await.mentors.get(id).cloned())
    }

    async fn find_student(&self, id: &RecordId) -> MentorshipResult<Option<Student>> {
        Self::check_id(Entity::Student, id)?;
        Ok(self.tables.read().await.students.get(id).cloned())
    }

    async fn find_mentors(&self, ids: &[RecordId]) -> MentorshipResult<Vec<Mentor>> {
        Self::check_ids(Entity::Mentor, ids)?;
        let tables = self.tables.read().await;
        Ok(tables
            .mentors
            .rows
            .iter()
            .filter(|m| ids.contains(&m.id))
            .cloned()
            .collect())
    }

    async fn find_students(&self, ids: &[RecordId]) -> MentorshipResult<Vec<Student>> {
        Self::check_ids(Entity::Student, ids)?;
        let tables = self.tables.read().await;
        Ok(tables
            .students
            .rows
            .iter()
            .filter(|s| ids.contains(&s.id))
            .cloned()
            .collect())
    }

    async fn find_unassigned_students(&self) -> MentorshipResult<Vec<Student>> {
        let tables = self.tables.read().await;
        Ok(tables
            .students
            .rows
            .iter()
            .filter(|s| s.is_unassigned())
            .cloned()
            .collect())
    }

    async fn assign_students(
        &self,
        mentor_id: &RecordId,
        student_ids: &[RecordId],
    ) -> MentorshipResult<Option<BulkAssignOutcome>> {
        Self::check_id(Entity::Mentor, mentor_id)?;
        let mut tables = self.tables.write().await;
        if tables.mentors.get(mentor_id).is_none() {
            return Ok(None);
        }
        Self::check_ids(Entity::Student, student_ids)?;

        let mut assigned = Vec::new();
        for id in student_ids {
            if let Some(student) = tables.students.get_mut(id) {
                if student.is_unassigned() {
                    student.mentor = Some(mentor_id.clone());
                    assigned.push(id.clone());
                }
            }
        }

        let mentor = tables
            .mentors
            .get_mut(mentor_id)
            .ok_or_else(|| MentorshipError::Internal("mentor vanished under lock".to_string()))?;
        mentor.students.extend(assigned.iter().cloned());

        debug!(
            mentor_id = %mentor_id,
            requested = student_ids.len(),
            assigned = assigned.len(),
            "Bulk assignment applied"
        );

        Ok(Some(BulkAssignOutcome {
            mentor: mentor.clone(),
            assigned,
        }))
    }

    async fn reassign_student(
        &self,
        student_id: &RecordId,
        mentor_id: Option<RecordId>,
    ) -> MentorshipResult<Option<Student>> {
        Self::check_id(Entity::Student, student_id)?;
        if let Some(ref id) = mentor_id {
            Self::check_id(Entity::Mentor, id)?;
        }
        let mut tables = self.tables.write().await;
        Ok(tables.students.get_mut(student_id).map(|student| {
            student.reassign(mentor_id);
            student.clone()
        }))
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_generates_uuid_ids() {
        let store = MemoryStore::new();
        let mentor = store.insert_mentor(NewMentor::named("Alice")).await.unwrap();
        assert!(Uuid::parse_str(mentor.id.as_str()).is_ok());
        assert!(mentor.students.is_empty());
        assert_eq!(store.mentor_count().await, 1);
    }

    #[tokio::test]
    async fn test_malformed_id_is_rejected() {
        let store = MemoryStore::new();
        let err = store
            .find_student(&RecordId::new("not-an-id"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            MentorshipError::InvalidId {
                entity: Entity::Student,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_assign_students_skips_duplicates_in_request() {
        let store = MemoryStore::new();
        let mentor = store.insert_mentor(NewMentor::named("Alice")).await.unwrap();
        let bob = store.insert_student(NewStudent::named("Bob")).await.unwrap();

        let outcome = store
            .assign_students(&mentor.id, &[bob.id.clone(), bob.id.clone()])
            .await
            .unwrap()
            .unwrap();

        assert_eq!(outcome.assigned, vec![bob.id.clone()]);
        assert_eq!(outcome.mentor.students, vec![bob.id]);
    }

    #[tokio::test]
    async fn test_assign_students_missing_mentor_writes_nothing() {
        let store = MemoryStore::new();
        let bob = store.insert_student(NewStudent::named("Bob")).await.unwrap();
        let ghost = MemoryStore::generate_id();

        let outcome = store.assign_students(&ghost, &[bob.id.clone()]).await.unwrap();
        assert!(outcome.is_none());

        let bob = store.find_student(&bob.id).await.unwrap().unwrap();
        assert!(bob.is_unassigned());
    }

    #[tokio::test]
    async fn test_unassigned_students_keep_insertion_order() {
        let store = MemoryStore::new();
        let mut ids = Vec::new();
        for name in ["a", "b", "c"] {
            ids.push(store.insert_student(NewStudent::named(name)).await.unwrap().id);
        }

        let found = store.find_unassigned_students().await.unwrap();
        let found: Vec<_> = found.into_iter().map(|s| s.id).collect();
        assert_eq!(found, ids);
    }
}
