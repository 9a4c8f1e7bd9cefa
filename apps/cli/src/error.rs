//! # Application Error Type
//!
//! Unified error type for CLI commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in PrintCost                              │
//! │                                                                         │
//! │  Command Function                                                      │
//! │  Result<T, AppError>                                                   │
//! │         │                                                               │
//! │         ├── ValidationErrors ─── every failed check ──┐                │
//! │         ├── CoreError ────────── bad position ────────┤                │
//! │         ├── DbError ──────────── store failure ───────┼──► AppError    │
//! │         ├── ReportError ──────── empty quote, fonts ──┤                │
//! │         └── ConfigError ──────── bad config file ─────┘                │
//! │                                                        │                │
//! │                                                        ▼                │
//! │                                stderr: "error: <line>" per message     │
//! │                                exit code from ErrorCode                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::process::ExitCode;

use printcost_core::{CoreError, ValidationError, ValidationErrors};
use printcost_db::DbError;
use printcost_report::ReportError;

use crate::state::ConfigError;

/// Error returned from CLI commands.
#[derive(Debug, Clone)]
pub struct AppError {
    /// Machine-readable category, also drives the exit code
    pub code: ErrorCode,

    /// Human-readable message; one line per problem
    pub message: String,
}

/// Error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Input validation failed
    ValidationError,

    /// Quote position does not exist
    NotFound,

    /// Quote store failed
    DatabaseError,

    /// Document could not be produced
    ExportError,

    /// Configuration is unreadable or invalid
    ConfigError,

    /// Filesystem or other unexpected failure
    Internal,
}

impl ErrorCode {
    /// Process exit code for this category.
    pub fn exit_code(&self) -> u8 {
        match self {
            ErrorCode::ValidationError | ErrorCode::NotFound => 2,
            ErrorCode::ConfigError => 3,
            ErrorCode::DatabaseError => 4,
            ErrorCode::ExportError => 5,
            ErrorCode::Internal => 1,
        }
    }
}

impl AppError {
    /// Creates a new application error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Internal, message)
    }

    /// The individual messages, one per line.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.message.lines()
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.code.exit_code())
    }
}

/// Every failed check becomes its own line.
impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let message = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n");
        AppError::validation(message)
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::validation(err.to_string())
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::PositionOutOfRange { position, len } => AppError::new(
                ErrorCode::NotFound,
                format!("No item at position {} (quote has {} items)", position + 1, len),
            ),
            CoreError::Validation(e) => e.into(),
        }
    }
}

impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::ConnectionFailed(e) => {
                AppError::new(ErrorCode::DatabaseError, format!("Cannot open quote store: {}", e))
            }
            DbError::MigrationFailed(e) => {
                AppError::new(ErrorCode::DatabaseError, format!("Quote store migration failed: {}", e))
            }
            DbError::CorruptRecord { id, reason } => AppError::new(
                ErrorCode::DatabaseError,
                format!("Stored quote item {} is unreadable: {}", id, reason),
            ),
            other => {
                tracing::error!(error = %other, "Quote store operation failed");
                AppError::new(
                    ErrorCode::DatabaseError,
                    format!("Quote was not saved: {}", other),
                )
            }
        }
    }
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::Validation(e) => e.into(),
            other => AppError::new(ErrorCode::ExportError, other.to_string()),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::internal(err.to_string())
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {}

/// Convenience type alias for command results.
pub type AppResult<T> = Result<T, AppError>;
