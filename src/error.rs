use thiserror::Error;

/// Failures the resolver and input validation report to their callers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FootballError {
    #[error("Team not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl FootballError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, FootballError::NotFound(_))
    }
}
