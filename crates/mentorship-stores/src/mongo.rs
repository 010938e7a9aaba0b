//! MongoDB store implementation.
//!
//! Mentors and students live in two collections of the configured database.
//! Bulk assignment runs inside a client session transaction, which requires a
//! replica set or sharded deployment.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Bson, Document},
    options::{ClientOptions, FindOneAndUpdateOptions, ReturnDocument},
    Client, ClientSession, Collection,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use mentorship_core::config::StoreConfig;
use mentorship_core::error::{Entity, MentorshipError, MentorshipResult};
use mentorship_core::traits::{BulkAssignOutcome, MentorshipStore};
use mentorship_core::types::{Mentor, NewMentor, NewStudent, RecordId, Student};

const MENTORS: &str = "mentors";
const STUDENTS: &str = "students";

#[derive(Debug, Serialize, Deserialize)]
struct MentorDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default)]
    students: Vec<ObjectId>,
}

#[derive(Debug, Serialize, Deserialize)]
struct StudentDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default)]
    mentor: Option<ObjectId>,
    #[serde(rename = "previousMentors", default)]
    previous_mentors: Vec<ObjectId>,
}

impl From<MentorDocument> for Mentor {
    fn from(doc: MentorDocument) -> Self {
        Mentor {
            id: to_record_id(&doc.id),
            name: doc.name,
            students: doc.students.iter().map(to_record_id).collect(),
        }
    }
}

impl From<StudentDocument> for Student {
    fn from(doc: StudentDocument) -> Self {
        Student {
            id: to_record_id(&doc.id),
            name: doc.name,
            mentor: doc.mentor.as_ref().map(to_record_id),
            previous_mentors: doc.previous_mentors.iter().map(to_record_id).collect(),
        }
    }
}

fn to_record_id(oid: &ObjectId) -> RecordId {
    RecordId::new(oid.to_hex())
}

fn parse_id(entity: Entity, id: &RecordId) -> MentorshipResult<ObjectId> {
    ObjectId::parse_str(id.as_str()).map_err(|_| MentorshipError::invalid_id(entity, id.as_str()))
}

fn parse_ids(entity: Entity, ids: &[RecordId]) -> MentorshipResult<Vec<ObjectId>> {
    ids.iter().map(|id| parse_id(entity, id)).collect()
}

fn store_err(context: &'static str) -> impl FnOnce(mongodb::error::Error) -> MentorshipError {
    move |e| MentorshipError::store_with_source(format!("{}: {}", context, e), e)
}

/// MongoDB-backed [`MentorshipStore`].
pub struct MongoStore {
    client: Client,
    database: String,
}

impl MongoStore {
    /// Connect using the URL and database from `config` and verify the
    /// deployment answers a ping.
    pub async fn connect(config: &StoreConfig) -> MentorshipResult<Self> {
        let mut options = ClientOptions::parse(&config.mongodb_url).await.map_err(|e| {
            MentorshipError::Configuration(format!("Failed to parse MongoDB URL: {}", e))
        })?;
        options.app_name = Some("mentorship".to_string());

        let client = Client::with_options(options)
            .map_err(|e| MentorshipError::connection(format!("Failed to create MongoDB client: {}", e)))?;

        client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| MentorshipError::connection(format!("MongoDB ping failed: {}", e)))?;

        info!(database = %config.database, "Connected to MongoDB");

        Ok(Self::with_client(client, config.database.clone()))
    }

    /// Wrap an existing client.
    pub fn with_client(client: Client, database: impl Into<String>) -> Self {
        Self {
            client,
            database: database.into(),
        }
    }

    fn mentors(&self) -> Collection<MentorDocument> {
        self.client.database(&self.database).collection(MENTORS)
    }

    fn students(&self) -> Collection<StudentDocument> {
        self.client.database(&self.database).collection(STUDENTS)
    }

    async fn query_students(&self, filter: Document) -> MentorshipResult<Vec<Student>> {
        let docs: Vec<StudentDocument> = self
            .students()
            .find(filter, None)
            .await
            .map_err(store_err("Failed to find students"))?
            .try_collect()
            .await
            .map_err(store_err("Failed to read students"))?;
        Ok(docs.into_iter().map(Into::into).collect())
    }

    /// The transactional body of [`MentorshipStore::assign_students`].
    async fn assign_in_session(
        &self,
        session: &mut ClientSession,
        mentor_id: ObjectId,
        student_ids: &[ObjectId],
    ) -> MentorshipResult<Option<BulkAssignOutcome>> {
        let mentors = self.mentors();
        let students = self.students();

        let exists = mentors
            .find_one_with_session(doc! { "_id": mentor_id }, None, session)
            .await
            .map_err(store_err("Failed to find mentor"))?;
        if exists.is_none() {
            return Ok(None);
        }

        let mut cursor = students
            .find_with_session(
                doc! { "_id": { "$in": student_ids.to_vec() }, "mentor": Bson::Null },
                None,
                session,
            )
            .await
            .map_err(store_err("Failed to find students"))?;

        let mut unassigned = Vec::new();
        while let Some(student) = cursor.next(session).await {
            unassigned.push(student.map_err(store_err("Failed to read student"))?.id);
        }

        // Request order, each id once.
        let mut assigned: Vec<ObjectId> = Vec::new();
        for id in student_ids {
            if unassigned.contains(id) && !assigned.contains(id) {
                assigned.push(*id);
            }
        }

        if !assigned.is_empty() {
            let result = students
                .update_many_with_session(
                    doc! { "_id": { "$in": assigned.clone() }, "mentor": Bson::Null },
                    doc! { "$set": { "mentor": mentor_id } },
                    None,
                    session,
                )
                .await
                .map_err(store_err("Failed to assign students"))?;
            if result.modified_count != assigned.len() as u64 {
                warn!(
                    expected = assigned.len(),
                    modified = result.modified_count,
                    "Student update count differs from snapshot"
                );
            }
        }

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();
        let mentor = mentors
            .find_one_and_update_with_session(
                doc! { "_id": mentor_id },
                doc! { "$push": { "students": { "$each": assigned.clone() } } },
                options,
                session,
            )
            .await
            .map_err(store_err("Failed to update mentor"))?
            .ok_or_else(|| MentorshipError::store("Mentor disappeared during assignment"))?;

        Ok(Some(BulkAssignOutcome {
            mentor: mentor.into(),
            assigned: assigned.iter().map(to_record_id).collect(),
        }))
    }
}

#[async_trait]
impl MentorshipStore for MongoStore {
    async fn insert_mentor(&self, mentor: NewMentor) -> MentorshipResult<Mentor> {
        let doc = MentorDocument {
            id: ObjectId::new(),
            name: mentor.name,
            students: Vec::new(),
        };
        self.mentors()
            .insert_one(&doc, None)
            .await
            .map_err(store_err("Failed to insert mentor"))?;
        Ok(doc.into())
    }

    async fn insert_student(&self, student: NewStudent) -> MentorshipResult<Student> {
        let doc = StudentDocument {
            id: ObjectId::new(),
            name: student.name,
            mentor: None,
            previous_mentors: Vec::new(),
        };
        self.students()
            .insert_one(&doc, None)
            .await
            .map_err(store_err("Failed to insert student"))?;
        Ok(doc.into())
    }

    async fn find_mentor(&self, id: &RecordId) -> MentorshipResult<Option<Mentor>> {
        let oid = parse_id(Entity::Mentor, id)?;
        let found = self
            .mentors()
            .find_one(doc! { "_id": oid }, None)
            .await
            .map_err(store_err("Failed to find mentor"))?;
        Ok(found.map(Into::into))
    }

    async fn find_student(&self, id: &RecordId) -> MentorshipResult<Option<Student>> {
        let oid = parse_id(Entity::Student, id)?;
        let found = self
            .students()
            .find_one(doc! { "_id": oid }, None)
            .await
            .map_err(store_err("Failed to find student"))?;
        Ok(found.map(Into::into))
    }

    async fn find_mentors(&self, ids: &[RecordId]) -> MentorshipResult<Vec<Mentor>> {
        let oids = parse_ids(Entity::Mentor, ids)?;
        let docs: Vec<MentorDocument> = self
            .mentors()
            .find(doc! { "_id": { "$in": oids } }, None)
            .await
            .map_err(store_err("Failed to find mentors"))?
            .try_collect()
            .await
            .map_err(store_err("Failed to read mentors"))?;
        Ok(docs.into_iter().map(Into::into).collect())
    }

    async fn find_students(&self, ids: &[RecordId]) -> MentorshipResult<Vec<Student>> {
        let oids = parse_ids(Entity::Student, ids)?;
        self.query_students(doc! { "_id": { "$in": oids } }).await
    }

    async fn find_unassigned_students(&self) -> MentorshipResult<Vec<Student>> {
        self.query_students(doc! { "mentor": Bson::Null }).await
    }

    async fn assign_students(
        &self,
        mentor_id: &RecordId,
        student_ids: &[RecordId],
    ) -> MentorshipResult<Option<BulkAssignOutcome>> {
        let mentor_oid = parse_id(Entity::Mentor, mentor_id)?;
        let student_oids = parse_ids(Entity::Student, student_ids)?;

        let mut session = self
            .client
            .start_session(None)
            .await
            .map_err(store_err("Failed to start session"))?;
        session
            .start_transaction(None)
            .await
            .map_err(store_err("Failed to start transaction"))?;

        match self
            .assign_in_session(&mut session, mentor_oid, &student_oids)
            .await
        {
            Ok(outcome) => {
                session
                    .commit_transaction()
                    .await
                    .map_err(store_err("Failed to commit assignment"))?;
                debug!(mentor_id = %mentor_id, "Assignment transaction committed");
                Ok(outcome)
            }
            Err(err) => {
                if let Err(abort_err) = session.abort_transaction().await {
                    warn!(error = %abort_err, "Failed to abort assignment transaction");
                }
                Err(err)
            }
        }
    }

    async fn reassign_student(
        &self,
        student_id: &RecordId,
        mentor_id: Option<RecordId>,
    ) -> MentorshipResult<Option<Student>> {
        let student_oid = parse_id(Entity::Student, student_id)?;
        let new_mentor = match mentor_id {
            Some(ref id) => Bson::ObjectId(parse_id(Entity::Mentor, id)?),
            None => Bson::Null,
        };

        // Evaluated against the pre-update document, so "$mentor" is the old value.
        let current = doc! { "$ifNull": ["$mentor", Bson::Null] };
        let pipeline = vec![doc! {
            "$set": {
                "previousMentors": {
                    "$cond": [
                        { "$ne": [current, Bson::Null] },
                        { "$concatArrays": [ { "$ifNull": ["$previousMentors", []] }, ["$mentor"] ] },
                        { "$ifNull": ["$previousMentors", []] }
                    ]
                },
                "mentor": { "$literal": new_mentor }
            }
        }];

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();
        let updated = self
            .students()
            .find_one_and_update(doc! { "_id": student_oid }, pipeline, options)
            .await
            .map_err(store_err("Failed to reassign student"))?;
        Ok(updated.map(Into::into))
    }

    fn backend_name(&self) -> &'static str {
        "mongodb"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_rejects_non_object_ids() {
        let err = parse_id(Entity::Mentor, &RecordId::new("not-hex")).unwrap_err();
        assert!(matches!(err, MentorshipError::InvalidId { .. }));

        let oid = ObjectId::new();
        assert_eq!(parse_id(Entity::Mentor, &to_record_id(&oid)).unwrap(), oid);
    }

    #[test]
    fn test_student_document_maps_wire_names() {
        let mentor = ObjectId::new();
        let doc = StudentDocument {
            id: ObjectId::new(),
            name: Some("Bob".to_string()),
            mentor: None,
            previous_mentors: vec![mentor],
        };
        let bson = mongodb::bson::to_document(&doc).unwrap();
        assert!(bson.contains_key("previousMentors"));
        assert_eq!(bson.get("mentor"), Some(&Bson::Null));

        let student: Student = doc.into();
        assert_eq!(student.previous_mentors, vec![to_record_id(&mentor)]);
        assert!(student.mentor.is_none());
    }
}
