//! Error types for the planner library.

use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all planner operations.
#[derive(Error, Debug)]
pub enum PlannerError {
    /// Database connection, query, schema or commit errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Plan not found for the given name
    #[error("plan with name '{name}' not found")]
    PlanNotFound { name: String },
    /// Step not found within the given plan
    #[error("step with ID '{step}' not found in plan '{plan}'")]
    StepNotFound { plan: String, step: String },
    /// A plan saved with create intent collided with a stored plan
    #[error("plan with name '{name}' already exists in database, cannot save as new")]
    PlanAlreadyExists { name: String },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration and runtime errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
    /// One or more plans could not be removed during compaction
    #[error("encountered {error_count} error(s) during compaction, first error: {first_error}")]
    CompactionFailed {
        error_count: usize,
        first_error: String,
    },
}

/// Coarse classification of a [`PlannerError`].
///
/// Interfaces use this to decide how to surface a failure without matching on
/// every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A plan or step referenced by id does not exist
    NotFound,
    /// A create-intent save hit an existing plan
    AlreadyExists,
    /// The caller supplied an unusable argument
    InvalidArgument,
    /// Transaction, connection, schema or environment failure
    StorageFailure,
}

impl PlannerError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Returns the taxonomy bucket this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PlannerError::PlanNotFound { .. } | PlannerError::StepNotFound { .. } => {
                ErrorKind::NotFound
            }
            PlannerError::PlanAlreadyExists { .. } => ErrorKind::AlreadyExists,
            PlannerError::InvalidInput { .. } => ErrorKind::InvalidArgument,
            PlannerError::Database { .. }
            | PlannerError::FileSystem { .. }
            | PlannerError::XdgDirectory(_)
            | PlannerError::Serialization { .. }
            | PlannerError::Configuration { .. }
            | PlannerError::CompactionFailed { .. } => ErrorKind::StorageFailure,
        }
    }

    /// Shorthand for a missing plan.
    pub(crate) fn plan_not_found(name: impl Into<String>) -> Self {
        PlannerError::PlanNotFound { name: name.into() }
    }

    /// Shorthand for a missing step inside a plan.
    pub(crate) fn step_not_found(plan: impl Into<String>, step: impl Into<String>) -> Self {
        PlannerError::StepNotFound {
            plan: plan.into(),
            step: step.into(),
        }
    }
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> PlannerError {
        PlannerError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> PlannerError {
        PlannerError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;

    /// Map database errors with a lazily built message.
    fn db_context_with<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| PlannerError::database(message).with_source(e))
    }

    fn db_context_with<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| PlannerError::database(f()).with_source(e))
    }
}

/// Returns true when a rusqlite error is a constraint violation
/// (primary key, unique, foreign key, check).
pub(crate) fn is_constraint_violation(error: &rusqlite::Error) -> bool {
    matches!(
        error,
        rusqlite::Error::SqliteFailure(e, _) if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

/// Result type alias for planner operations
pub type Result<T> = std::result::Result<T, PlannerError>;
