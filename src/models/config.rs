//! Configuration model loaded from external sources.

use std::time::Duration;

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub domain: String,
    pub address: String,
    pub port: u16,
    pub templates_dir: String,
    pub secret: String,
    /// Base URL of the REST backend, e.g. `http://localhost:5000/api`.
    pub backend_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Idle time after which a viewer's list state is forgotten.
    #[serde(default = "default_view_idle_ttl_secs")]
    pub view_idle_ttl_secs: u64,
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_view_idle_ttl_secs() -> u64 {
    3600
}

impl ServerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn view_idle_ttl(&self) -> Duration {
        Duration::from_secs(self.view_idle_ttl_secs)
    }
}
