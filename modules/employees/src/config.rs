use serde::{Deserialize, Serialize};

/// Configuration for the employees module (`modules.employees`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EmployeesConfig {
    /// Run the idempotent table check before every API request.
    #[serde(default = "default_ensure_schema_per_request")]
    pub ensure_schema_per_request: bool,
}

impl Default for EmployeesConfig {
    fn default() -> Self {
        Self {
            ensure_schema_per_request: default_ensure_schema_per_request(),
        }
    }
}

fn default_ensure_schema_per_request() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let cfg: EmployeesConfig = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(cfg.ensure_schema_per_request);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let res: Result<EmployeesConfig, _> =
            serde_json::from_value(serde_json::json!({ "page_size": 10 }));
        assert!(res.is_err());
    }
}
