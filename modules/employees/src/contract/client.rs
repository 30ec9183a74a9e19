use async_trait::async_trait;

use crate::contract::{
    error::EmployeesError,
    model::{DeleteOutcome, Employee, NewEmployee},
};

/// Public API of the employees module for in-process consumers.
#[async_trait]
pub trait EmployeesApi: Send + Sync {
    /// Create an employee; the store assigns `id` and `created_at`.
    async fn create_employee(&self, new_employee: NewEmployee)
        -> Result<Employee, EmployeesError>;

    /// All employees, newest first.
    async fn list_employees(&self) -> Result<Vec<Employee>, EmployeesError>;

    /// Delete every id or none of them.
    async fn delete_employees(&self, ids: Vec<i32>) -> Result<DeleteOutcome, EmployeesError>;
}
