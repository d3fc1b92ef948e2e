//! Error types for the tour ratings service.

/// Domain-level errors (business rule violations).
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Unknown difficulty: {0}")]
    UnknownDifficulty(String),

    #[error("Unknown region: {0}")]
    UnknownRegion(String),
}

/// Repository-level errors (data access failures).
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Transaction error: {0}")]
    Transaction(String),

    #[error("Entity not found")]
    NotFound,

    /// A uniqueness or other storage constraint rejected the write.
    #[error("Data integrity violation: {0}")]
    DataIntegrity(String),
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Data integrity violation: {0}")]
    DataIntegrity(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Domain(DomainError::ValidationError(msg)) => AppError::BadRequest(msg),
            RepoError::Domain(e) => AppError::BadRequest(e.to_string()),
            RepoError::NotFound => AppError::NotFound("Resource not found".into()),
            RepoError::DataIntegrity(e) => AppError::DataIntegrity(e),
            RepoError::Database(e) => AppError::Internal(e),
            RepoError::Transaction(e) => AppError::Internal(e),
        }
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        RepoError::Domain(err).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integrity_stays_distinct_from_not_found() {
        let app: AppError = RepoError::DataIntegrity("duplicate".into()).into();
        assert!(matches!(app, AppError::DataIntegrity(ref m) if m == "duplicate"));

        let app: AppError = RepoError::NotFound.into();
        assert!(matches!(app, AppError::NotFound(_)));
    }

    #[test]
    fn test_validation_maps_to_bad_request() {
        let app: AppError = DomainError::ValidationError("bad".into()).into();
        assert!(matches!(app, AppError::BadRequest(_)));
    }
}
