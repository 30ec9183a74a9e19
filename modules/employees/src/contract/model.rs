use chrono::{DateTime, Utc};

/// Pure employee model for inter-module communication (no serde).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    pub id: i32,
    pub nirc: String,
    pub full_name: String,
    pub position: String,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Raw creation input. Normalized and validated by the domain service.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewEmployee {
    pub nirc: String,
    pub full_name: String,
    pub position: Option<String>,
    pub email: Option<String>,
}

/// Result of an all-or-nothing bulk delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Every requested id existed; this many rows were removed.
    Deleted(u64),
    /// Some ids did not exist; nothing was removed.
    Missing(Vec<i32>),
}

impl DeleteOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Deleted(_))
    }

    pub fn deleted_count(&self) -> u64 {
        match self {
            Self::Deleted(n) => *n,
            Self::Missing(_) => 0,
        }
    }
}
