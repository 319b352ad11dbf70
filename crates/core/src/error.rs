use thiserror::Error;

/// Failures raised by the application while executing a delegated operation.
///
/// Every operation on the application port returns `AppResult` so that the
/// command dispatcher can turn a failure into a structured response with a
/// pattern match instead of a catch-all.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// A command could not be carried out; the text is operator-facing.
    #[error("{0}")]
    Command(String),

    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Strategy file not found: {0}")]
    StrategyNotFound(String),

    #[error("No strategy is running")]
    NoActiveStrategy,
}

impl AppError {
    /// Shorthand for the free-text command failure.
    pub fn command(text: impl Into<String>) -> Self {
        AppError::Command(text.into())
    }
}

pub type AppResult<T> = std::result::Result<T, AppError>;
