//! Error types for mentorship operations.
//!
//! Every failure carries a structured [`ErrorCode`] so the HTTP layer and
//! clients can branch on it without parsing messages.

use std::fmt;
use thiserror::Error;

/// Result type alias for mentorship operations.
pub type MentorshipResult<T> = Result<T, MentorshipError>;

/// The kind of record an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Mentor,
    Student,
}

impl Entity {
    /// Lowercase name, as used in log fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            Entity::Mentor => "mentor",
            Entity::Student => "student",
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Mentor => f.write_str("Mentor"),
            Entity::Student => f.write_str("Student"),
        }
    }
}

/// Main error type for all mentorship operations.
#[derive(Error, Debug)]
pub enum MentorshipError {
    /// A mentor or student id did not resolve to a stored record.
    #[error("{entity} not found")]
    NotFound { entity: Entity, id: String },

    /// An id was rejected by the store as malformed.
    #[error("Invalid {} id: '{id}'", .entity.as_str())]
    InvalidId { entity: Entity, id: String },

    /// Input validation failed.
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Store operation failed.
    #[error("Store error: {message}")]
    Store {
        message: String,
        code: ErrorCode,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error codes for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    MentorNotFound,
    StudentNotFound,
    InvalidId,
    ValInvalidInput,
    StoreConnectionFailed,
    StoreOperationFailed,
    Configuration,
    Serialization,
    Internal,
}

impl ErrorCode {
    /// Get the string representation of the error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::MentorNotFound => "MSH_001",
            ErrorCode::StudentNotFound => "MSH_002",
            ErrorCode::InvalidId => "MSH_003",
            ErrorCode::ValInvalidInput => "VAL_001",
            ErrorCode::StoreConnectionFailed => "STORE_001",
            ErrorCode::StoreOperationFailed => "STORE_002",
            ErrorCode::Configuration => "CFG_001",
            ErrorCode::Serialization => "SER_001",
            ErrorCode::Internal => "INT_001",
        }
    }
}

impl MentorshipError {
    /// Create a not found error for a mentor id.
    pub fn mentor_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: Entity::Mentor,
            id: id.into(),
        }
    }

    /// Create a not found error for a student id.
    pub fn student_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: Entity::Student,
            id: id.into(),
        }
    }

    /// Create an invalid id error.
    pub fn invalid_id(entity: Entity, id: impl Into<String>) -> Self {
        Self::InvalidId {
            entity,
            id: id.into(),
        }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a store error.
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
            code: ErrorCode::StoreOperationFailed,
            source: None,
        }
    }

    /// Create a store error that keeps the driver error as its source.
    pub fn store_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Store {
            message: message.into(),
            code: ErrorCode::StoreOperationFailed,
            source: Some(Box::new(source)),
        }
    }

    /// Create a store connection error.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
            code: ErrorCode::StoreConnectionFailed,
            source: None,
        }
    }

    /// Get the error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::NotFound {
                entity: Entity::Mentor,
                ..
            } => ErrorCode::MentorNotFound,
            Self::NotFound {
                entity: Entity::Student,
                ..
            } => ErrorCode::StudentNotFound,
            Self::InvalidId { .. } => ErrorCode::InvalidId,
            Self::Validation { .. } => ErrorCode::ValInvalidInput,
            Self::Store { code, .. } => *code,
            Self::Configuration(_) => ErrorCode::Configuration,
            Self::Serialization(_) => ErrorCode::Serialization,
            Self::Io(_) | Self::Internal(_) => ErrorCode::Internal,
        }
    }

    /// Whether this error means a referenced record does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_is_plain() {
        let err = MentorshipError::mentor_not_found("abc");
        assert_eq!(err.to_string(), "Mentor not found");
        assert_eq!(err.code(), ErrorCode::MentorNotFound);
        assert!(err.is_not_found());

        let err = MentorshipError::student_not_found("abc");
        assert_eq!(err.to_string(), "Student not found");
        assert_eq!(err.code().as_str(), "MSH_002");
    }

    #[test]
    fn test_invalid_id_names_entity() {
        let err = MentorshipError::invalid_id(Entity::Student, "xyz");
        assert_eq!(err.to_string(), "Invalid student id: 'xyz'");
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_store_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "socket closed");
        let err = MentorshipError::store_with_source("insert failed", io);
        assert_eq!(err.code(), ErrorCode::StoreOperationFailed);
        assert!(std::error::Error::source(&err).is_some());
    }
}
