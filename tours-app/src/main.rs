//! # Tours Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Initialize logging and optional OTLP export
//! - Initialize the repository adapter
//! - Create the rating service
//! - Start the HTTP server

mod config;

use opentelemetry::global;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{metrics::SdkMeterProvider, propagation::TraceContextPropagator, trace as sdktrace};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::{Config, LogFormat};
use tours_hex::{HttpServer, TourRatingService};
use tours_repo::build_repo;

/// Providers that must be flushed before the process exits.
struct Telemetry {
    tracer_provider: sdktrace::SdkTracerProvider,
    meter_provider: SdkMeterProvider,
}

impl Telemetry {
    fn shutdown(self) {
        if let Err(e) = self.tracer_provider.shutdown() {
            eprintln!("failed to flush spans: {e}");
        }
        if let Err(e) = self.meter_provider.shutdown() {
            eprintln!("failed to flush metrics: {e}");
        }
    }
}

fn init_telemetry(endpoint: &str) -> anyhow::Result<(sdktrace::Tracer, Telemetry)> {
    global::set_text_map_propagator(TraceContextPropagator::new());

    // Use gRPC exporter with batch processing (non-blocking)
    let span_exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()?;

    let tracer_provider = sdktrace::SdkTracerProvider::builder()
        .with_batch_exporter(span_exporter)
        .build();
    global::set_tracer_provider(tracer_provider.clone());

    // HTTP metrics layer reads the global meter provider
    let metric_exporter = opentelemetry_otlp::MetricExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()?;

    let meter_provider = SdkMeterProvider::builder()
        .with_periodic_exporter(metric_exporter)
        .build();
    global::set_meter_provider(meter_provider.clone());

    use opentelemetry::trace::TracerProvider as _;
    let tracer = tracer_provider.tracer("tours-service");

    Ok((
        tracer,
        Telemetry {
            tracer_provider,
            meter_provider,
        },
    ))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    let (otel_layer, telemetry) = match config.otlp_endpoint.as_deref() {
        Some(endpoint) => {
            let (tracer, telemetry) = init_telemetry(endpoint)?;
            (
                Some(tracing_opentelemetry::layer().with_tracer(tracer)),
                Some(telemetry),
            )
        }
        None => (None, None),
    };

    let (pretty, json) = match config.log_format {
        LogFormat::Pretty => (Some(tracing_subscriber::fmt::layer()), None),
        LogFormat::Json => (None, Some(tracing_subscriber::fmt::layer().json())),
    };

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tours_app=debug,tours_hex=debug".into()),
        )
        .with(pretty)
        .with(json)
        .with(otel_layer)
        .init();

    tracing::info!("Starting tours server on port {}", config.port);
    tracing::debug!(public_url = %config.public_url, otlp = telemetry.is_some(), "loaded configuration");

    // Build repository (handles connection and migration)
    let repo = build_repo(&config.database_url).await?;

    // The same adapter serves as tour catalog and rating store
    let service = TourRatingService::new(repo.clone(), repo);

    let server = HttpServer::new(service, &config.public_url);
    let addr = format!("0.0.0.0:{}", config.port);

    let result = server.run(&addr).await;

    // Ensure traces are flushed before exit
    if let Some(telemetry) = telemetry {
        telemetry.shutdown();
    }
    result
}
