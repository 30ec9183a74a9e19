#![allow(dead_code)]

use std::sync::Arc;

use api_ingress::ApiIngress;
use axum::{body::Body, http::Request, response::Response, Router};
use dbkit::{ConnectOpts, DbHandle};
use sea_orm::DatabaseConnection;
use serde_json::Value;

use employees::{config::EmployeesConfig, domain::service::Service, Employees};
use employees::infra::storage::SeaOrmEmployeesRepository;

/// Fresh single-connection in-memory SQLite database with the table in place.
pub async fn test_db() -> DatabaseConnection {
    let db = DbHandle::connect("sqlite::memory:", ConnectOpts::default())
        .await
        .expect("Failed to connect to test database");
    let conn = db.sea();
    employees::infra::storage::schema::ensure_employees_table(&conn)
        .await
        .expect("Failed to create employees table");
    conn
}

pub async fn test_service() -> Arc<Service> {
    let repo = SeaOrmEmployeesRepository::new(test_db().await);
    Arc::new(Service::new(Arc::new(repo)))
}

/// Full HTTP stack: ingress middleware around the module routes.
pub fn app_for(module: &Employees) -> Router {
    ApiIngress::default()
        .build_router(module.register_rest(Router::new()))
        .expect("router should build")
}

pub async fn test_app() -> Router {
    let module = Employees::init(Some(test_db().await), EmployeesConfig::default());
    app_for(&module)
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_json(resp: Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
