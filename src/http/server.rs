//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the fixture and health handlers
//! - Wire up middleware (request ID, tracing, timeout)
//! - Bind server to listener
//! - Run fixture responders off the async runtime
//! - Stop on shutdown trigger or OS signal

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::validation::HEALTH_ROUTE;
use crate::config::FixtureConfig;
use crate::fixture::{FixtureError, ImageResponder};
use crate::http::query::QueryParams;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer, RequestIdExt};
use crate::http::response::WireResponse;
use crate::lifecycle::{shutdown_signal, ShutdownSignal};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub image: Arc<ImageResponder>,
}

/// HTTP server for the fixture responders.
pub struct HttpServer {
    router: Router,
    config: FixtureConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// The configuration is expected to have passed `validate_config`.
    pub fn new(config: FixtureConfig) -> Self {
        let state = AppState {
            image: Arc::new(ImageResponder::from_settings(&config.fixture)),
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &FixtureConfig, state: AppState) -> Router {
        Router::new()
            .route(&config.fixture.route, get(image_handler))
            .route(HEALTH_ROUTE, get(health_handler))
            .fallback(not_found_handler)
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http())
            .layer(set_request_id_layer())
    }

    /// A clone of the router, for driving requests without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires or the process receives a termination signal.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: ShutdownSignal,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            route = %self.config.fixture.route,
            image = %self.config.fixture.image_path().display(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                tokio::select! {
                    _ = shutdown.recv() => tracing::info!("Shutdown triggered"),
                    _ = shutdown_signal() => {},
                }
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &FixtureConfig {
        &self.config
    }
}

/// Serves the image fixture.
/// The file read and header decisions run on the blocking pool.
async fn image_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    uri: Uri,
) -> Result<Response, FixtureError> {
    let query = QueryParams::from_uri(&uri);
    tracing::debug!(
        request_id = %headers.request_id(),
        query = uri.query().unwrap_or(""),
        params = query.len(),
        "Serving image fixture"
    );

    let responder = Arc::clone(&state.image);

    let response = tokio::task::spawn_blocking(move || {
        let mut writer = WireResponse::new();
        responder.handle(&query, &mut writer)?;
        Ok::<_, FixtureError>(writer.into_response()?)
    })
    .await??;

    Ok(response.into_response())
}

async fn health_handler() -> &'static str {
    "ok"
}

async fn not_found_handler(uri: Uri) -> impl IntoResponse {
    tracing::debug!(path = %uri.path(), "No fixture at path");
    (StatusCode::NOT_FOUND, "Not found")
}
