//! Student records.

use serde::{Deserialize, Serialize};

use super::RecordId;

/// A student, optionally assigned to one mentor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    /// Store-generated identifier.
    #[serde(rename = "_id")]
    pub id: RecordId,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Current mentor; `None` means unassigned.
    #[serde(default)]
    pub mentor: Option<RecordId>,
    /// Former mentors, oldest first. May repeat an id.
    #[serde(default)]
    pub previous_mentors: Vec<RecordId>,
}

impl Student {
    /// Create an unassigned student with no history.
    pub fn new(id: impl Into<RecordId>, name: Option<String>) -> Self {
        Self {
            id: id.into(),
            name,
            mentor: None,
            previous_mentors: Vec::new(),
        }
    }

    /// Whether the student currently has no mentor.
    pub fn is_unassigned(&self) -> bool {
        self.mentor.is_none()
    }

    /// Move the student to `mentor`, recording any current mentor in the
    /// history, even when it is the same as the new one.
    ///
    /// Returns `true` if a history entry was appended.
    pub fn reassign(&mut self, mentor: Option<RecordId>) -> bool {
        let previous = std::mem::replace(&mut self.mentor, mentor);
        match previous {
            Some(current) => {
                self.previous_mentors.push(current);
                true
            }
            None => false,
        }
    }
}

/// Fields supplied when creating a student.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStudent {
    #[serde(default)]
    pub name: Option<String>,
}

impl NewStudent {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_shape() {
        let mut student = Student::new("s1", Some("Bob".to_string()));
        let json = serde_json::to_value(&student).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "_id": "s1",
                "name": "Bob",
                "mentor": null,
                "previousMentors": []
            })
        );

        student.reassign(Some(RecordId::new("m1")));
        student.reassign(Some(RecordId::new("m2")));
        let json = serde_json::to_value(&student).unwrap();
        assert_eq!(json["mentor"], "m2");
        assert_eq!(json["previousMentors"], serde_json::json!(["m1"]));
    }

    #[test]
    fn test_reassign_from_unassigned_keeps_history_empty() {
        let mut student = Student::new("s1", None);
        assert!(!student.reassign(Some(RecordId::new("m1"))));
        assert!(student.previous_mentors.is_empty());
        assert_eq!(student.mentor, Some(RecordId::new("m1")));
    }

    #[test]
    fn test_reassign_to_same_mentor_records_history() {
        let mut student = Student::new("s1", None);
        student.reassign(Some(RecordId::new("m1")));
        assert!(student.reassign(Some(RecordId::new("m1"))));
        assert_eq!(student.mentor, Some(RecordId::new("m1")));
        assert_eq!(student.previous_mentors, vec![RecordId::new("m1")]);
    }

    #[test]
    fn test_unassign_records_old_mentor() {
        let mut student = Student::new("s1", None);
        student.reassign(Some(RecordId::new("m1")));
        assert!(student.reassign(None));
        assert!(student.is_unassigned());
        assert_eq!(student.previous_mentors, vec![RecordId::new("m1")]);
    }
}
