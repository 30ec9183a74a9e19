use thiserror::Error;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation failed: {}", .messages.join("; "))]
    Validation { messages: Vec<String> },

    #[error("Employee with NIRC '{nirc}' already exists")]
    DuplicateNirc { nirc: String },

    #[error("Storage is not configured")]
    StorageUnavailable,

    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl DomainError {
    pub fn validation(messages: Vec<String>) -> Self {
        Self::Validation { messages }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Validation {
            messages: vec![message.into()],
        }
    }

    pub fn duplicate_nirc(nirc: impl Into<String>) -> Self {
        Self::DuplicateNirc { nirc: nirc.into() }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }
}
