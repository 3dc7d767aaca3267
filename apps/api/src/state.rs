use crate::config::Config;
use crate::predictor::Predictor;

/// Shared application state injected into all route handlers via Axum
/// extractors. Built once at startup and never mutated afterwards.
#[derive(Clone)]
pub struct AppState {
    /// `None` when no model artifact could be loaded; /predict answers 503
    /// and /health reports the service as degraded.
    pub predictor: Option<Predictor>,
    pub config: Config,
}
