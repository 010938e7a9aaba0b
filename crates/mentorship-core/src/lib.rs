//! mentorship-core - Core library for mentorship.
//!
//! This crate provides the domain types, the store trait, an in-memory store,
//! and the [`AssignmentService`] that enforces the mentor/student assignment
//! rules.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use mentorship_core::{AssignmentService, MemoryStore, ServiceConfig};
//!
//! let service = AssignmentService::new(Arc::new(MemoryStore::new()), ServiceConfig::default());
//!
//! let alice = service.create_mentor(Some("Alice".to_string())).await?;
//! let bob = service.create_student(Some("Bob".to_string())).await?;
//! service.bulk_assign_students(&alice.id, &[bob.id.clone()]).await?;
//! ```

pub mod config;
pub mod error;
pub mod service;
pub mod stores;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use config::{LogConfig, MentorshipConfig, ServerConfig, ServiceConfig, StoreConfig};
pub use error::{Entity, ErrorCode, MentorshipError, MentorshipResult};
pub use service::{AssignmentService, BulkAssignment, MentorAssignment};
pub use stores::MemoryStore;
pub use traits::{BulkAssignOutcome, MentorshipStore, StoreBackend};
pub use types::{Mentor, NewMentor, NewStudent, RecordId, Student};
