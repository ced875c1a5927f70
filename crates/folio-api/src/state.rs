//! Application state

use chrono::Duration;
use folio_auth::JwtManager;
use folio_db::Database;
use folio_mail::Notifier;
use std::sync::Arc;

/// Prometheus render handle used by the metrics endpoint
pub type MetricsHandle = metrics_exporter_prometheus::PrometheusHandle;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub jwt: Arc<JwtManager>,
    pub notifier: Arc<dyn Notifier>,
    /// Lifetime of tokens issued at login
    pub login_ttl: Duration,
}

impl AppState {
    pub fn new(
        db: Database,
        jwt: Arc<JwtManager>,
        notifier: Arc<dyn Notifier>,
        login_ttl: Duration,
    ) -> Self {
        Self {
            db,
            jwt,
            notifier,
            login_ttl,
        }
    }
}
