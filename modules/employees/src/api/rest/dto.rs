use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::contract::model::{DeleteOutcome, Employee, NewEmployee};
use crate::domain::validation::{
    IDS_NOT_INTEGERS, IDS_REQUIRED, IDS_TOO_MANY, MAX_IDS_PER_DELETE,
};

/// REST DTO for employee representation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDto {
    pub id: i32,
    pub nirc: String,
    pub full_name: String,
    pub position: String,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// REST DTO for creating an employee. Every field is optional on the wire so
/// missing values surface as validation messages rather than parse errors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateEmployeeReq {
    pub nirc: Option<String>,
    pub full_name: Option<String>,
    pub position: Option<String>,
    pub email: Option<String>,
}

/// REST DTO for bulk delete. `ids` stays untyped until [`Self::parse_ids`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DeleteEmployeesReq {
    pub ids: Option<Value>,
}

/// Bulk delete report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResultDto {
    pub success: bool,
    pub deleted_count: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_ids: Vec<i32>,
}

impl From<Employee> for EmployeeDto {
    fn from(e: Employee) -> Self {
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

impl From<CreateEmployeeReq> for NewEmployee {
    fn from(req: CreateEmployeeReq) -> Self {
        Self {
            nirc: req.nirc.unwrap_or_default(),
            full_name: req.full_name.unwrap_or_default(),
            position: req.position,
            email: req.email,
        }
    }
}

impl From<DeleteOutcome> for DeleteResultDto {
    fn from(outcome: DeleteOutcome) -> Self {
        match outcome {
            DeleteOutcome::Deleted(n) => Self {
                success: true,
                deleted_count: n,
                errors: Vec::new(),
                missing_ids: Vec::new(),
            },
            DeleteOutcome::Missing(ids) => {
                let listed = ids
                    .iter()
                    .map(i32::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                Self {
                    success: false,
                    deleted_count: 0,
                    errors: vec![format!("Employees not found: {listed}")],
                    missing_ids: ids,
                }
            }
        }
    }
}

impl DeleteEmployeesReq {
    /// Accept a non-empty array of integers (or integer strings), at most
    /// [`MAX_IDS_PER_DELETE`] of them.
    pub fn parse_ids(self) -> Result<Vec<i32>, &'static str> {
        let items = match self.ids {
            Some(Value::Array(items)) if !items.is_empty() => items,
            _ => return Err(IDS_REQUIRED),
        };
        if items.len() > MAX_IDS_PER_DELETE {
            return Err(IDS_TOO_MANY);
        }
        items
            .iter()
            .map(|v| id_from_value(v).ok_or(IDS_NOT_INTEGERS))
            .collect()
    }
}

fn id_from_value(v: &Value) -> Option<i32> {
    let n = match v {
        Value::Number(n) => n.as_i64()?,
        Value::String(s) => s.trim().parse::<i64>().ok()?,
        _ => return None,
    };
    i32::try_from(n).ok()
}
