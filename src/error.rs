// print-sheet: layout error type

use thiserror::Error;

/// Errors surfaced by the layout engine.
///
/// The engine is best-effort: spans that do not fit and overrides that are
/// too small are handled by degrading or truncating, never by failing. Only
/// inputs that break the contract are rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl LayoutError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        LayoutError::InvalidInput(msg.into())
    }

    /// Prefix the message with where the bad input was found.
    pub(crate) fn context(self, location: impl std::fmt::Display) -> Self {
        match self {
            LayoutError::InvalidInput(msg) => LayoutError::InvalidInput(format!("{}: {}", location, msg)),
        }
    }
}

pub type Result<T> = std::result::Result<T, LayoutError>;
