//! mentorship-client - Client library for the mentorship REST API.
//!
//! # Example
//!
//! ```ignore
//! use mentorship_client::MentorshipClient;
//!
//! let client = MentorshipClient::new("http://localhost:5000")?;
//!
//! let alice = client.create_mentor("Alice").await?;
//! let bob = client.create_student("Bob").await?;
//! client.assign_students(&alice.id, &[bob.id.clone()]).await?;
//! ```

mod client;

pub use client::{HealthStatus, MentorshipClient};
pub use mentorship_core::service::{BulkAssignment, MentorAssignment};
pub use mentorship_core::types::{Mentor, RecordId, Student};
