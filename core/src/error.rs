use thiserror::Error;

/// Result type alias for todo operations
pub type Result<T> = std::result::Result<T, TodoError>;

/// Error types for the todo service.
///
/// Each variant maps to the HTTP status code the route layer responds with.
/// Insert conflicts deliberately map to 500 rather than 409: a duplicate id
/// is treated as a failed write, not a client-correctable conflict.
///
/// # Examples
///
/// ```rust
/// use todo_core::error::TodoError;
///
/// let not_found = TodoError::not_found_id(42);
/// assert!(not_found.is_not_found());
/// assert_eq!(not_found.status_code(), 404);
///
/// let invalid = TodoError::no_valid_fields();
/// assert_eq!(invalid.status_code(), 400);
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TodoError {
    /// Todo not found by the given identifier
    #[error("Todo not found: {0}")]
    NotFound(String),

    /// Validation error with details
    #[error("Validation error: {0}")]
    Validation(String),

    /// A todo with this id already exists
    #[error("Todo with id {0} already exists")]
    DuplicateId(i64),

    /// Database operation error
    #[error("Database error: {0}")]
    Database(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal system error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl TodoError {
    /// Create a not found error for a todo id
    pub fn not_found_id(id: i64) -> Self {
        Self::NotFound(format!("Todo with id {id} not found"))
    }

    /// Create the validation error for a body with no whitelisted fields
    pub fn no_valid_fields() -> Self {
        Self::Validation("No valid fields supplied".to_string())
    }

    /// Check if this error indicates a not found condition
    pub fn is_not_found(&self) -> bool {
        matches!(self, TodoError::NotFound(_))
    }

    /// Check if this error indicates a validation problem
    pub fn is_validation(&self) -> bool {
        matches!(self, TodoError::Validation(_))
    }

    /// Check if this error indicates a database problem
    pub fn is_database(&self) -> bool {
        matches!(self, TodoError::Database(_) | TodoError::DuplicateId(_))
    }

    /// Convert to the HTTP status code the route layer responds with
    pub fn status_code(&self) -> u16 {
        match self {
            TodoError::NotFound(_) => 404,
            TodoError::Validation(_) => 400,
            TodoError::DuplicateId(_) => 500,
            TodoError::Database(_) => 500,
            TodoError::Configuration(_) => 500,
            TodoError::Internal(_) => 500,
        }
    }
}
