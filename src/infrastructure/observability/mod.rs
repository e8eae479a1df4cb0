use crate::config::Config;
use metrics::Unit;
use opentelemetry::{global, trace::TraceError, KeyValue};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{runtime, trace as sdktrace, Resource};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Registry};

const DEFAULT_FILTER: &str = "notification_service=debug,tower_http=debug,sqlx=warn";

/// Flushes pending spans when dropped.
pub struct ObservabilityGuard;

impl Drop for ObservabilityGuard {
    fn drop(&mut self) {
        shutdown();
    }
}

/// Install the tracing subscriber and the Prometheus exporter.
pub fn init(config: &Config) -> Result<ObservabilityGuard, Box<dyn std::error::Error>> {
    init_tracing(config)?;
    init_metrics(config)?;
    Ok(ObservabilityGuard)
}

fn init_tracing(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_thread_ids(true)
        .with_target(true);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_FILTER.into());

    // Spans are exported only when an OTLP endpoint is configured
    let otel_layer = match &config.otel_exporter_endpoint {
        Some(endpoint) => {
            let tracer = otlp_tracer(endpoint, &config.service_name)?;
            Some(tracing_opentelemetry::layer().with_tracer(tracer))
        }
        None => None,
    };
    let exporting = otel_layer.is_some();

    Registry::default()
        .with(env_filter)
        .with(fmt_layer)
        .with(otel_layer)
        .try_init()?;

    if exporting {
        tracing::info!(
            "Exporting spans for {} to {:?}",
            config.service_name,
            config.otel_exporter_endpoint
        );
    }

    Ok(())
}

fn otlp_tracer(endpoint: &str, service_name: &str) -> Result<sdktrace::Tracer, TraceError> {
    let exporter = opentelemetry_otlp::new_exporter()
        .tonic()
        .with_endpoint(endpoint);

    opentelemetry_otlp::new_pipeline()
        .tracing()
        .with_exporter(exporter)
        .with_trace_config(sdktrace::config().with_resource(Resource::new(vec![
            KeyValue::new("service.name", service_name.to_string()),
        ])))
        .install_batch(runtime::Tokio)
}

fn init_metrics(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(([0, 0, 0, 0], config.metrics_port))
        .install()?;

    describe_metrics();

    tracing::info!(
        "Metrics exporter (Prometheus) listening on port {}",
        config.metrics_port
    );
    Ok(())
}

/// Help text for the counters incremented by the application services.
fn describe_metrics() {
    metrics::describe_counter!(
        "notifications_created_total",
        Unit::Count,
        "Notifications created"
    );
    metrics::describe_counter!(
        "notifications_read_total",
        Unit::Count,
        "Notifications marked as read, including repeated marks"
    );
    metrics::describe_counter!(
        "notifications_deleted_total",
        Unit::Count,
        "Notifications removed by per-user bulk deletes"
    );
    metrics::describe_counter!(
        "deletion_requests_submitted_total",
        Unit::Count,
        "Account deletion requests recorded as PENDING"
    );
    metrics::describe_counter!(
        "deletion_requests_decided_total",
        Unit::Count,
        "Account deletion request decisions, labelled by resulting status"
    );
}

pub fn shutdown() {
    global::shutdown_tracer_provider();
}
