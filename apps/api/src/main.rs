use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::http::HeaderValue;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use career_api::config::Config;
use career_api::model::CareerModel;
use career_api::predictor::Predictor;
use career_api::routes::build_router;
use career_api::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting career prediction API v{}", env!("CARGO_PKG_VERSION"));

    // Load the model once; the service starts degraded when it is missing.
    let predictor = match CareerModel::load(&config.model_path) {
        Ok(model) => {
            info!(
                "Loaded model from {} ({} samples, seed {})",
                config.model_path.display(),
                model.meta.n_samples,
                model.meta.seed
            );
            Some(Predictor::new(Arc::new(model)))
        }
        Err(err) => {
            warn!("Running without a model: {err}");
            None
        }
    };

    let state = AppState {
        predictor,
        config: config.clone(),
    };

    let cors = match &config.allowed_origins {
        Some(origins) => {
            let origins = origins
                .iter()
                .map(|origin| origin.parse::<HeaderValue>())
                .collect::<Result<Vec<_>, _>>()?;
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        }
        None => CorsLayer::permissive(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
