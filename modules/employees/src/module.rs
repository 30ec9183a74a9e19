use std::sync::Arc;

use axum::Router;
use sea_orm::DatabaseConnection;
use tracing::{debug, info, warn};

use crate::api::rest::routes;
use crate::config::EmployeesConfig;
use crate::contract::client::EmployeesApi;
use crate::domain::service::Service;
use crate::gateways::local::EmployeesLocalClient;
use crate::infra::storage::SeaOrmEmployeesRepository;

/// The employee directory: domain service plus its REST surface.
#[derive(Clone)]
pub struct Employees {
    service: Arc<Service>,
    config: EmployeesConfig,
}

impl Employees {
    /// Wire the SeaORM repository to the domain service.
    ///
    /// Without a connection every API call answers with a storage error.
    pub fn init(db: Option<DatabaseConnection>, config: EmployeesConfig) -> Self {
        info!("Initializing employees module");
        debug!(
            "Loaded employees config: ensure_schema_per_request={}",
            config.ensure_schema_per_request
        );

        let service = match db {
            Some(conn) => Service::new(Arc::new(SeaOrmEmployeesRepository::new(conn))),
            None => {
                warn!("No database configured; employee storage is unavailable");
                Service::unconfigured()
            }
        };

        Self {
            service: Arc::new(service),
            config,
        }
    }

    /// Create the employees table when a store is configured.
    pub async fn migrate(&self) -> anyhow::Result<()> {
        if !self.service.is_configured() {
            return Ok(());
        }
        info!("Ensuring employees schema");
        self.service
            .ensure_schema()
            .await
            .map_err(|e| anyhow::anyhow!("employees schema setup failed: {e}"))?;
        Ok(())
    }

    pub fn register_rest(&self, router: Router) -> Router {
        info!("Registering employees REST routes");
        routes::register_routes(router, self.service.clone(), &self.config)
    }

    /// In-process client for other modules.
    pub fn client(&self) -> Arc<dyn EmployeesApi> {
        Arc::new(EmployeesLocalClient::new(self.service.clone()))
    }
}
