use std::sync::Arc;

use async_trait::async_trait;

use crate::contract::{
    client::EmployeesApi,
    error::EmployeesError,
    model::{DeleteOutcome, Employee, NewEmployee},
};
use crate::domain::service::Service;

/// Local implementation of [`EmployeesApi`] that delegates to the domain service.
pub struct EmployeesLocalClient {
    service: Arc<Service>,
}

impl EmployeesLocalClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl EmployeesApi for EmployeesLocalClient {
    async fn create_employee(
        &self,
        new_employee: NewEmployee,
    ) -> Result<Employee, EmployeesError> {
        self.service
            .create_employee(new_employee)
            .await
            .map_err(Into::into)
    }

    async fn list_employees(&self) -> Result<Vec<Employee>, EmployeesError> {
        self.service.list_employees().await.map_err(Into::into)
    }

    async fn delete_employees(&self, ids: Vec<i32>) -> Result<DeleteOutcome, EmployeesError> {
        self.service.delete_employees(ids).await.map_err(Into::into)
    }
}
