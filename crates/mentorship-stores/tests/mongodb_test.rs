//! Integration tests for MongoStore.
//!
//! These tests require a running MongoDB replica set (transactions are used
//! for bulk assignment). Set MONGODB_URL to run them.
//!
//! Example:
//! ```bash
//! MONGODB_URL="mongodb://localhost:27017/?replicaSet=rs0" \
//!     cargo test -p mentorship-stores --features mongodb -- --ignored
//! ```

#![cfg(feature = "mongodb")]

use mentorship_core::config::StoreConfig;
use mentorship_core::error::{MentorshipError, MentorshipResult};
use mentorship_core::traits::{MentorshipStore, StoreBackend};
use mentorship_core::types::{NewMentor, NewStudent, RecordId};
use mentorship_stores::MongoStore;

fn get_test_url() -> Option<String> {
    std::env::var("MONGODB_URL").ok()
}

async fn connect(url: String, database: &str) -> MentorshipResult<MongoStore> {
    let config = StoreConfig {
        backend: StoreBackend::MongoDb,
        mongodb_url: url,
        database: database.to_string(),
    };
    MongoStore::connect(&config).await
}

/// Bulk assignment skips assigned students and appends only the updated ids.
#[tokio::test]
#[ignore] // Requires MongoDB replica set
async fn test_assign_students_conditional() -> MentorshipResult<()> {
    let url = match get_test_url() {
        Some(url) => url,
        None => return Ok(()), // Skip if no DB
    };
    let store = connect(url, "mentorship_test_assign").await?;

    let alice = store.insert_mentor(NewMentor::named("Alice")).await?;
    let dan = store.insert_mentor(NewMentor::named("Dan")).await?;
    let bob = store.insert_student(NewStudent::named("Bob")).await?;
    let cara = store.insert_student(NewStudent::named("Cara")).await?;

    store.assign_students(&dan.id, &[cara.id.clone()]).await?;
    let outcome = store
        .assign_students(&alice.id, &[bob.id.clone(), cara.id.clone()])
        .await?
        .expect("mentor exists");

    assert_eq!(outcome.assigned, vec![bob.id.clone()]);
    assert_eq!(outcome.mentor.students, vec![bob.id.clone()]);

    let cara = store.find_student(&cara.id).await?.expect("student exists");
    assert_eq!(cara.mentor, Some(dan.id));

    let unassigned = store.find_unassigned_students().await?;
    assert!(unassigned.iter().all(|s| s.id != bob.id && s.id != cara.id));

    Ok(())
}

/// Reassignment pushes any current mentor and overwrites it.
#[tokio::test]
#[ignore] // Requires MongoDB
async fn test_reassign_student_history() -> MentorshipResult<()> {
    let url = match get_test_url() {
        Some(url) => url,
        None => return Ok(()),
    };
    let store = connect(url, "mentorship_test_reassign").await?;

    let m1 = store.insert_mentor(NewMentor::named("Alice")).await?;
    let m2 = store.insert_mentor(NewMentor::named("Dan")).await?;
    let bob = store.insert_student(NewStudent::named("Bob")).await?;

    let first = store
        .reassign_student(&bob.id, Some(m1.id.clone()))
        .await?
        .expect("student exists");
    assert!(first.previous_mentors.is_empty());

    let same = store
        .reassign_student(&bob.id, Some(m1.id.clone()))
        .await?
        .expect("student exists");
    assert_eq!(same.previous_mentors, vec![m1.id.clone()]);

    let second = store
        .reassign_student(&bob.id, Some(m2.id.clone()))
        .await?
        .expect("student exists");
    assert_eq!(second.mentor, Some(m2.id));
    assert_eq!(second.previous_mentors, vec![m1.id.clone(), m1.id]);

    Ok(())
}

/// Missing and malformed ids are distinguished.
#[tokio::test]
#[ignore] // Requires MongoDB
async fn test_missing_and_malformed_ids() -> MentorshipResult<()> {
    let url = match get_test_url() {
        Some(url) => url,
        None => return Ok(()),
    };
    let store = connect(url, "mentorship_test_ids").await?;

    let missing = RecordId::new("000000000000000000000000");
    assert!(store.find_mentor(&missing).await?.is_none());
    assert!(store.assign_students(&missing, &[]).await?.is_none());

    let err = store
        .find_student(&RecordId::new("nope"))
        .await
        .unwrap_err();
    assert!(matches!(err, MentorshipError::InvalidId { .. }));

    Ok(())
}
