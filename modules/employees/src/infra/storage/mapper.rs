use crate::contract::model::Employee;
use crate::infra::storage::entity::Model as EmployeeEntity;

impl From<EmployeeEntity> for Employee {
    fn from(e: EmployeeEntity) -> Self {
        Self {
            id: e.id,
            nirc: e.nirc,
            full_name: e.full_name,
            position: e.position,
            email: e.email,
            created_at: e.created_at,
        }
    }
}
