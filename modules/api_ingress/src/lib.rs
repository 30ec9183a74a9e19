use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use axum::{http::StatusCode, middleware::from_fn, routing::get, Router};
use tokio::net::TcpListener;
use tower_http::{
    catch_panic::CatchPanicLayer,
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
};

mod config;
pub mod error;
pub mod request_id;
pub mod security;
pub mod shutdown;
mod web;

pub use config::{ApiIngressConfig, DEFAULT_CSP};
pub use error::ErrorResponse;
pub use request_id::XRequestId;

/// HTTP host: wraps module routes with the global middleware stack and serves them.
#[derive(Debug, Clone, Default)]
pub struct ApiIngress {
    config: ApiIngressConfig,
}

impl ApiIngress {
    pub fn new(config: ApiIngressConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ApiIngressConfig {
        &self.config
    }

    /// Merge `routes` under the base router and apply the middleware stack.
    ///
    /// Outermost to innermost:
    /// security headers -> CatchPanic -> PropagateRequestId -> SetRequestId
    /// -> push_req_id_to_extensions -> Trace -> Timeout -> preflight -> BodyLimit
    pub fn build_router(&self, routes: Router) -> Result<Router> {
        tracing::debug!("Building HTTP router");
        let x_request_id = request_id::header();

        let mut router = Router::new()
            .route("/health", get(web::health_check))
            .merge(routes)
            .fallback(error::not_found);

        router = router.layer(RequestBodyLimitLayer::new(self.config.body_limit_bytes));
        router = router.layer(from_fn(security::preflight));
        router = router.layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(self.config.request_timeout_sec.max(1)),
        ));
        router = router.layer(request_id::create_trace_layer());
        router = router.layer(from_fn(request_id::push_req_id_to_extensions));
        router = router.layer(SetRequestIdLayer::new(
            x_request_id.clone(),
            request_id::MakeReqId,
        ));
        router = router.layer(PropagateRequestIdLayer::new(x_request_id));
        router = router.layer(CatchPanicLayer::custom(error::handle_panic));

        security::with_security_headers(router, &self.config.content_security_policy)
    }

    /// Serve until `shutdown` resolves, then drain in-flight requests.
    pub async fn serve<F>(&self, listener: TcpListener, router: Router, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!("HTTP server bound on {}", addr);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| anyhow::anyhow!(e))?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Parse `host:port` into a socket address.
pub fn bind_addr(host: &str, port: u16) -> Result<SocketAddr> {
    format!("{host}:{port}")
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid bind address '{}:{}': {}", host, port, e))
}
