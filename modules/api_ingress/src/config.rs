use serde::{Deserialize, Serialize};

pub const DEFAULT_CSP: &str = "default-src 'self'; \
script-src 'self' https://cdnjs.cloudflare.com; \
style-src 'self'; \
img-src 'self' data:; \
connect-src 'self'; \
object-src 'none'; \
base-uri 'none'; \
frame-ancestors 'none'";

/// HTTP host settings, read from `modules.api_ingress`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ApiIngressConfig {
    #[serde(default = "default_body_limit_bytes")]
    pub body_limit_bytes: usize,
    #[serde(default = "default_request_timeout_sec")]
    pub request_timeout_sec: u64,
    #[serde(default = "default_csp")]
    pub content_security_policy: String,
}

impl Default for ApiIngressConfig {
    fn default() -> Self {
        Self {
            body_limit_bytes: default_body_limit_bytes(),
            request_timeout_sec: default_request_timeout_sec(),
            content_security_policy: default_csp(),
        }
    }
}

fn default_body_limit_bytes() -> usize {
    1024 * 1024
}

fn default_request_timeout_sec() -> u64 {
    30
}

fn default_csp() -> String {
    DEFAULT_CSP.to_string()
}
