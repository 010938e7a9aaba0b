//! mentorship-stores - Store backends for mentorship.
//!
//! The in-memory store ships with `mentorship-core`. This crate adds
//! database-backed stores and a factory that picks one from configuration.
//!
//! # Supported Backends
//!
//! - **Memory** (always available) - process-local, for tests and demos
//! - **MongoDB** (feature: `mongodb`) - `mentors` and `students` collections

mod factory;

#[cfg(feature = "mongodb")]
mod mongo;

// Public exports
pub use factory::StoreFactory;

#[cfg(feature = "mongodb")]
pub use mongo::MongoStore;

// Re-export core types for convenience
pub use mentorship_core::stores::MemoryStore;
pub use mentorship_core::traits::{BulkAssignOutcome, MentorshipStore, StoreBackend};
