pub use masterror::{AppError, AppResult};
use masterror::Error;
use serde::Serialize;

/// Failure of a single tool operation.
///
/// Every variant is recovered at the tool boundary and rendered into the
/// response envelope; none of them ends the process.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolError {
    /// Malformed structured argument, detected before any database access
    #[error("invalid input: {0}")]
    InputFormat(String),
    /// Statement rejected by the read-only guard
    #[error("policy violation: {0}")]
    PolicyViolation(String),
    /// Referenced table or column does not exist
    #[error("not found: {0}")]
    NotFound(String),
    /// Driver-level failure (syntax, connectivity, constraint)
    #[error("{0}")]
    Execution(String)
}

/// Stable machine-readable name of a [`ToolError`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolErrorKind {
    InputFormat,
    PolicyViolation,
    NotFound,
    Execution
}

impl ToolError {
    pub fn kind(&self) -> ToolErrorKind {
        match self {
            Self::InputFormat(_) => ToolErrorKind::InputFormat,
            Self::PolicyViolation(_) => ToolErrorKind::PolicyViolation,
            Self::NotFound(_) => ToolErrorKind::NotFound,
            Self::Execution(_) => ToolErrorKind::Execution
        }
    }
}

impl From<ToolError> for AppError {
    fn from(err: ToolError) -> Self {
        let msg = err.to_string();
        match err {
            ToolError::InputFormat(_) => AppError::bad_request(msg),
            ToolError::PolicyViolation(_) => AppError::forbidden(msg),
            ToolError::NotFound(_) => AppError::not_found(msg),
            ToolError::Execution(_) => AppError::service(msg)
        }
    }
}

impl From<sqlx::Error> for ToolError {
    fn from(err: sqlx::Error) -> Self {
        let msg = match &err {
            sqlx::Error::Database(db) => match db.code() {
                Some(code) => format!("({}) {}", code, db.message()),
                None => db.message().to_string()
            },
            other => other.to_string()
        };
        Self::Execution(msg)
    }
}

/// Create input format error
pub fn input_format_error(message: impl Into<String>) -> ToolError {
    ToolError::InputFormat(message.into())
}

/// Create file read error
pub fn file_read_error(path: &str, source: std::io::Error) -> AppError {
    AppError::internal(format!("Failed to read file '{}': {}", path, source))
}

/// Create config error
pub fn config_error(message: impl Into<String>) -> AppError {
    AppError::bad_request(message.into())
}

/// Create database connection error
///
/// Raised only while opening the connection at startup.
pub fn connection_error(err: sqlx::Error) -> AppError {
    let msg = match &err {
        sqlx::Error::Io(io) => format!("Connection failed: {}", io),
        sqlx::Error::Tls(tls) => format!("TLS handshake failed: {}", tls),
        sqlx::Error::Configuration(cfg) => format!("Invalid connection options: {}", cfg),
        other => format!("Connection failed: {}", other)
    };
    AppError::service(msg)
}

/// Create transport I/O error
pub fn io_error(context: &str, source: std::io::Error) -> AppError {
    AppError::internal(format!("{}: {}", context, source))
}
