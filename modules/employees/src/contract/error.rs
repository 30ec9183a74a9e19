use thiserror::Error;

use crate::domain::error::DomainError;

/// Errors that are safe to expose to other modules.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EmployeesError {
    #[error("Employee with NIRC '{nirc}' already exists")]
    Conflict { nirc: String },

    #[error("Validation error: {}", .messages.join("; "))]
    Validation { messages: Vec<String> },

    #[error("Internal error")]
    Internal,
}

impl EmployeesError {
    pub fn conflict(nirc: impl Into<String>) -> Self {
        Self::Conflict { nirc: nirc.into() }
    }

    pub fn validation(messages: Vec<String>) -> Self {
        Self::Validation { messages }
    }

    pub fn internal() -> Self {
        Self::Internal
    }
}

impl From<DomainError> for EmployeesError {
    fn from(domain_error: DomainError) -> Self {
        match domain_error {
            DomainError::DuplicateNirc { nirc } => Self::conflict(nirc),
            DomainError::Validation { messages } => Self::validation(messages),
            DomainError::StorageUnavailable | DomainError::Storage { .. } => Self::internal(),
        }
    }
}
