use std::sync::Arc;

use tracing::{debug, error, info, instrument, warn};

use crate::contract::model::{DeleteOutcome, Employee, NewEmployee};
use crate::domain::error::DomainError;
use crate::domain::repo::{EmployeesRepository, RepoError};
use crate::domain::validation;

/// Domain service with business rules for the employee directory.
/// Depends only on the repository port, not on infra types.
///
/// A service built without a repository answers every call with
/// [`DomainError::StorageUnavailable`].
#[derive(Clone)]
pub struct Service {
    repo: Option<Arc<dyn EmployeesRepository>>,
}

impl Service {
    pub fn new(repo: Arc<dyn EmployeesRepository>) -> Self {
        Self { repo: Some(repo) }
    }

    /// Service with no configured store.
    pub fn unconfigured() -> Self {
        Self { repo: None }
    }

    pub fn is_configured(&self) -> bool {
        self.repo.is_some()
    }

    fn repo(&self) -> Result<&Arc<dyn EmployeesRepository>, DomainError> {
        self.repo.as_ref().ok_or(DomainError::StorageUnavailable)
    }

    #[instrument(name = "employees.service.ensure_schema", skip(self))]
    pub async fn ensure_schema(&self) -> Result<(), DomainError> {
        self.repo()?
            .ensure_schema()
            .await
            .map_err(|e| storage_error("ensure schema", e))
    }

    #[instrument(
        name = "employees.service.create_employee",
        skip(self, new_employee),
        fields(nirc = %new_employee.nirc)
    )]
    pub async fn create_employee(&self, new_employee: NewEmployee) -> Result<Employee, DomainError> {
        info!("Creating new employee");

        let new_employee = validation::normalize(new_employee);
        let errors = validation::check(&new_employee);
        if !errors.is_empty() {
            debug!(count = errors.len(), "Rejected employee input");
            return Err(DomainError::validation(errors));
        }

        let nirc = new_employee.nirc.clone();
        let employee = self.repo()?.insert(new_employee).await.map_err(|e| match e {
            RepoError::DuplicateKey(_) => {
                warn!("Duplicate NIRC");
                DomainError::duplicate_nirc(nirc)
            }
            other => storage_error("insert employee", other),
        })?;

        info!("Successfully created employee with id={}", employee.id);
        Ok(employee)
    }

    #[instrument(name = "employees.service.list_employees", skip(self))]
    pub async fn list_employees(&self) -> Result<Vec<Employee>, DomainError> {
        let employees = self
            .repo()?
            .list()
            .await
            .map_err(|e| storage_error("list employees", e))?;
        debug!("Listed {} employees", employees.len());
        Ok(employees)
    }

    /// All-or-nothing delete. Missing ids are reported in the outcome, not as an error.
    #[instrument(name = "employees.service.delete_employees", skip(self, ids), fields(requested = ids.len()))]
    pub async fn delete_employees(&self, ids: Vec<i32>) -> Result<DeleteOutcome, DomainError> {
        if ids.is_empty() {
            return Err(DomainError::invalid(validation::IDS_REQUIRED));
        }
        let ids = validation::dedup_ids(ids);
        if ids.len() > validation::MAX_IDS_PER_DELETE {
            return Err(DomainError::invalid(validation::IDS_TOO_MANY));
        }

        let outcome = self
            .repo()?
            .delete_many(&ids)
            .await
            .map_err(|e| storage_error("delete employees", e))?;

        match &outcome {
            DeleteOutcome::Deleted(n) => info!("Deleted {} employees", n),
            DeleteOutcome::Missing(missing) => {
                info!(?missing, "Bulk delete rejected, some employees do not exist")
            }
        }
        Ok(outcome)
    }
}

/// Log the full cause and keep a human-readable summary for the caller.
fn storage_error(op: &str, e: RepoError) -> DomainError {
    error!(error = ?e, "Failed to {}", op);
    DomainError::storage(format!("failed to {op}: {e}"))
}
