use std::sync::Arc;

use axum::{middleware::from_fn_with_state, routing::get, Extension, Router};

use crate::api::rest::{handlers, web};
use crate::config::EmployeesConfig;
use crate::domain::service::Service;

/// Mount the employees API and the UI onto `router`.
///
/// | Method | Path | Handler |
/// |---|---|---|
/// | GET | `/` | UI page |
/// | GET | `/assets/{*file}` | UI script and stylesheet |
/// | GET | `/api/employees` | list |
/// | POST | `/api/employees` | create |
/// | DELETE | `/api/employees` | bulk delete |
pub fn register_routes(router: Router, service: Arc<Service>, config: &EmployeesConfig) -> Router {
    let mut api = Router::new().route(
        "/api/employees",
        get(handlers::list_employees)
            .post(handlers::create_employee)
            .delete(handlers::delete_employees),
    );

    if config.ensure_schema_per_request {
        api = api.layer(from_fn_with_state(service.clone(), handlers::ensure_schema));
    }

    let ui = Router::new()
        .route("/", get(web::index))
        .route("/assets/{*file}", get(web::serve_asset));

    router.merge(api.layer(Extension(service))).merge(ui)
}
