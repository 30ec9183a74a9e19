use std::sync::Arc;

use api_ingress::{ErrorResponse, XRequestId};
use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
    Extension,
};
use tracing::{error, info};

use crate::api::rest::dto::{CreateEmployeeReq, DeleteEmployeesReq, DeleteResultDto, EmployeeDto};
use crate::api::rest::error::{from_parts, map_domain_error};
use crate::api::rest::extract::JsonBody;
use crate::domain::service::Service;

/// List all employees, newest first
pub async fn list_employees(
    Extension(svc): Extension<Arc<Service>>,
    Extension(rid): Extension<XRequestId>,
) -> Result<Json<Vec<EmployeeDto>>, ErrorResponse> {
    match svc.list_employees().await {
        Ok(employees) => Ok(Json(employees.into_iter().map(EmployeeDto::from).collect())),
        Err(e) => {
            error!("Failed to list employees: {}", e);
            Err(map_domain_error(&e, Some(&rid.0)))
        }
    }
}

/// Create a new employee
pub async fn create_employee(
    Extension(svc): Extension<Arc<Service>>,
    Extension(rid): Extension<XRequestId>,
    JsonBody(req_body): JsonBody<CreateEmployeeReq>,
) -> Result<(StatusCode, Json<EmployeeDto>), ErrorResponse> {
    info!("Creating employee: nirc={:?}", req_body.nirc);

    match svc.create_employee(req_body.into()).await {
        Ok(employee) => Ok((StatusCode::CREATED, Json(EmployeeDto::from(employee)))),
        Err(e) => {
            info!("Failed to create employee: {}", e);
            Err(map_domain_error(&e, Some(&rid.0)))
        }
    }
}

/// Delete a batch of employees, all or nothing
pub async fn delete_employees(
    Extension(svc): Extension<Arc<Service>>,
    Extension(rid): Extension<XRequestId>,
    JsonBody(req_body): JsonBody<DeleteEmployeesReq>,
) -> Result<(StatusCode, Json<DeleteResultDto>), ErrorResponse> {
    let ids = req_body.parse_ids().map_err(|msg| {
        from_parts(
            StatusCode::BAD_REQUEST,
            "Validation failed",
            vec![msg.to_owned()],
            Some(&rid.0),
        )
    })?;
    info!("Deleting employees: {:?}", ids);

    match svc.delete_employees(ids).await {
        Ok(outcome) => {
            let status = if outcome.is_success() {
                StatusCode::OK
            } else {
                StatusCode::BAD_REQUEST
            };
            Ok((status, Json(DeleteResultDto::from(outcome))))
        }
        Err(e) => {
            error!("Failed to delete employees: {}", e);
            Err(map_domain_error(&e, Some(&rid.0)))
        }
    }
}

/// Idempotent table check ahead of every API request.
pub async fn ensure_schema(
    State(svc): State<Arc<Service>>,
    req: Request,
    next: Next,
) -> Response {
    if let Err(e) = svc.ensure_schema().await {
        let rid = req.extensions().get::<XRequestId>().map(|r| r.0.clone());
        return map_domain_error(&e, rid.as_deref()).into_response();
    }
    next.run(req).await
}
