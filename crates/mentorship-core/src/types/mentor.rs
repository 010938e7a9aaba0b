//! Mentor records.

use serde::{Deserialize, Serialize};

use super::RecordId;

/// A mentor supervising zero or more students.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mentor {
    /// Store-generated identifier.
    #[serde(rename = "_id")]
    pub id: RecordId,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Ids of students listed under this mentor, in assignment order.
    #[serde(default)]
    pub students: Vec<RecordId>,
}

impl Mentor {
    /// Create a mentor with no students.
    pub fn new(id: impl Into<RecordId>, name: Option<String>) -> Self {
        Self {
            id: id.into(),
            name,
            students: Vec::new(),
        }
    }
}

/// Fields supplied when creating a mentor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMentor {
    #[serde(default)]
    pub name: Option<String>,
}

impl NewMentor {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }
}
