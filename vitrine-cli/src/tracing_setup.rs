//! Logging for the vitrine server
//!
//! Console output always; OTLP span export on top with `--otel` when built
//! with the `telemetry` feature.
//!
//! Environment variables:
//!   RUST_LOG                          # Overrides the built-in filter
//!   OTEL_EXPORTER_OTLP_ENDPOINT       # OTLP endpoint (default: http://localhost:4317)
//!   OTEL_SERVICE_NAME                 # Service name (default: vitrine)

use anyhow::{anyhow, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Request spans from `TraceLayer` live under `tower_http`.
const DEFAULT_DIRECTIVES: &str = "warn,vitrine=info,vitrine_server=info,tower_http=info";
const DEBUG_DIRECTIVES: &str = "info,vitrine=debug,vitrine_server=debug,tower_http=debug,sqlx=debug";

/// Tracing configuration options
#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    /// Louder built-in filter (ignored when RUST_LOG is set)
    pub debug: bool,
    /// Enable OpenTelemetry OTLP export
    pub otel: bool,
}

/// Filter directives: a non-blank RUST_LOG wins over the built-in ones.
fn filter_directives(config: &TracingConfig, rust_log: Option<&str>) -> String {
    match rust_log.map(str::trim) {
        Some(directives) if !directives.is_empty() => directives.to_owned(),
        _ if config.debug => DEBUG_DIRECTIVES.to_owned(),
        _ => DEFAULT_DIRECTIVES.to_owned(),
    }
}

fn env_filter(config: &TracingConfig) -> Result<EnvFilter> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let directives = filter_directives(config, rust_log.as_deref());
    EnvFilter::try_new(&directives).map_err(|err| anyhow!("invalid log filter {directives:?}: {err}"))
}

/// Initialize tracing based on configuration
pub fn init(config: &TracingConfig) -> Result<()> {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(config.debug)
        .compact();

    let registry = tracing_subscriber::registry()
        .with(env_filter(config)?)
        .with(fmt_layer);

    #[cfg(feature = "telemetry")]
    if config.otel {
        let otel = otel::layer()?;
        let endpoint = otel.endpoint.clone();
        registry
            .with(otel.layer)
            .try_init()
            .map_err(|err| anyhow!(err))?;
        tracing::info!(%endpoint, "exporting spans over OTLP");
        return Ok(());
    }

    #[cfg(not(feature = "telemetry"))]
    if config.otel {
        registry.try_init().map_err(|err| anyhow!(err))?;
        tracing::warn!("--otel ignored: built without the `telemetry` feature");
        return Ok(());
    }

    registry.try_init().map_err(|err| anyhow!(err))
}

#[cfg(feature = "telemetry")]
mod otel {
    use anyhow::{anyhow, Result};
    use opentelemetry::trace::TracerProvider as _;
    use opentelemetry::KeyValue;
    use opentelemetry_otlp::WithExportConfig;
    use opentelemetry_sdk::trace::{Tracer, TracerProvider};
    use tracing_opentelemetry::OpenTelemetryLayer;

    pub(super) struct OtelLayer<S> {
        pub layer: OpenTelemetryLayer<S, Tracer>,
        pub endpoint: String,
    }

    pub(super) fn layer<S>() -> Result<OtelLayer<S>>
    where
        S: tracing::Subscriber + for<'span> tracing_subscriber::registry::LookupSpan<'span>,
    {
        let endpoint = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .unwrap_or_else(|_| "http://localhost:4317".to_string());
        let service_name =
            std::env::var("OTEL_SERVICE_NAME").unwrap_or_else(|_| "vitrine".to_string());

        let exporter = opentelemetry_otlp::SpanExporter::builder()
            .with_tonic()
            .with_endpoint(&endpoint)
            .build()
            .map_err(|e| anyhow!("Failed to create OTLP exporter: {}", e))?;

        let resource = opentelemetry_sdk::Resource::new(vec![
            KeyValue::new("service.name", service_name),
            KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
            KeyValue::new("service.namespace", "catalogs"),
        ]);

        let provider = TracerProvider::builder()
            .with_batch_exporter(exporter, opentelemetry_sdk::runtime::Tokio)
            .with_resource(resource)
            .build();
        let tracer = provider.tracer("vitrine-server");

        // Kept globally so export continues until shutdown_otel
        let _ = opentelemetry::global::set_tracer_provider(provider);

        Ok(OtelLayer {
            layer: tracing_opentelemetry::layer().with_tracer(tracer),
            endpoint,
        })
    }
}

/// Flush pending spans
#[cfg(feature = "telemetry")]
pub fn shutdown_otel() {
    opentelemetry::global::shutdown_tracer_provider();
}

#[cfg(not(feature = "telemetry"))]
pub fn shutdown_otel() {}
