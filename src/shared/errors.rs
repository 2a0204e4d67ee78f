use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    /// Deployment precondition not met (e.g. reference data was never seeded).
    #[error("{0}")]
    Configuration(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// `"{entity} not found with {field} : '{value}'"`
    pub fn not_found(entity: &str, field: &str, value: impl std::fmt::Display) -> Self {
        Self::NotFound(format!("{} not found with {} : '{}'", entity, field, value))
    }

    /// Whether this error is likely transient (e.g. DB connection lost)
    /// and the operation may succeed if retried.
    pub fn is_transient(&self) -> bool {
        matches!(self, DomainError::Storage(_))
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_entity_and_field() {
        let err = DomainError::not_found("Parcel", "parcelId", 42);
        assert_eq!(err.to_string(), "Parcel not found with parcelId : '42'");
    }

    #[test]
    fn only_storage_errors_are_transient() {
        assert!(DomainError::Storage("connection reset".into()).is_transient());
        assert!(!DomainError::Conflict("taken".into()).is_transient());
    }
}
