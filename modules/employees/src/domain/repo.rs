use async_trait::async_trait;
use thiserror::Error;

use crate::contract::model::{DeleteOutcome, Employee, NewEmployee};

/// Failure reported by a repository.
#[derive(Debug, Error)]
pub enum RepoError {
    /// The store's uniqueness constraint rejected the write.
    #[error("duplicate key: {0}")]
    DuplicateKey(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Port for the domain layer: persistence operations the domain needs.
/// Object-safe and async-friendly via `async_trait`.
#[async_trait]
pub trait EmployeesRepository: Send + Sync {
    /// Create the `employees` table if it does not exist. Idempotent.
    async fn ensure_schema(&self) -> Result<(), RepoError>;

    /// Insert a normalized, validated employee and return the stored row.
    async fn insert(&self, new_employee: NewEmployee) -> Result<Employee, RepoError>;

    /// All rows, `created_at` descending then `id` descending.
    async fn list(&self) -> Result<Vec<Employee>, RepoError>;

    /// Transactionally delete `ids` (already deduplicated), or nothing if any is missing.
    async fn delete_many(&self, ids: &[i32]) -> Result<DeleteOutcome, RepoError>;
}
