//! HTTP Server configuration and startup.

use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get, post},
};
use tower_http::trace::TraceLayer;

use tours_types::{RatingRepository, TourCatalog};

use super::assembler::RatingAssembler;
use super::handlers::{self, AppState};
use crate::TourRatingService;

/// HTTP Server for the Tour Ratings API.
pub struct HttpServer<T: TourCatalog, R: RatingRepository> {
    state: Arc<AppState<T, R>>,
}

impl<T: TourCatalog, R: RatingRepository> HttpServer<T, R> {
    /// Creates a new HTTP server; hypermedia links are rooted at `public_url`.
    pub fn new(service: TourRatingService<T, R>, public_url: &str) -> Self {
        Self {
            state: Arc::new(AppState {
                service,
                assembler: RatingAssembler::new(public_url),
            }),
        }
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        // Build HTTP metrics layer (uses globally set MeterProvider)
        let metrics = axum_otel_metrics::HttpMetricsLayerBuilder::new().build();

        Router::new()
            .route("/health", get(handlers::health))
            .route("/api-docs/openapi.json", get(handlers::openapi_json))
            .route("/ratings", get(handlers::list_ratings::<T, R>))
            .route("/ratings/{id}", get(handlers::get_rating::<T, R>))
            .route(
                "/tours",
                post(handlers::create_tour::<T, R>).get(handlers::list_tours::<T, R>),
            )
            .route("/tours/{tour_id}", get(handlers::get_tour::<T, R>))
            .route(
                "/tours/{tour_id}/ratings",
                post(handlers::create_rating::<T, R>)
                    .get(handlers::list_tour_ratings::<T, R>)
                    .put(handlers::update_rating::<T, R>)
                    .patch(handlers::patch_rating::<T, R>),
            )
            .route(
                "/tours/{tour_id}/ratings/batch",
                post(handlers::rate_many::<T, R>),
            )
            .route(
                "/tours/{tour_id}/ratings/average",
                get(handlers::average_score::<T, R>),
            )
            .route(
                "/tours/{tour_id}/ratings/{customer_id}",
                delete(handlers::delete_rating::<T, R>),
            )
            .layer(metrics)
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
