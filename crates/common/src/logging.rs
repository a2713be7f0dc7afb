//! Provides utilities to initialize logging and OpenTelemetry tracing.
use std::env;

use opentelemetry::{trace::TracerProvider, KeyValue};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::Resource;
use tracing::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

/// Environment variable name for the OTLP endpoint used to export traces.
pub const OTLP_URL_ENVVAR: &str = "STAKING_OTLP_URL";

/// Environment variable name for the service label, which is appended to the
/// whoami string.
pub const SVC_LABEL_ENVVAR: &str = "STAKING_SVC_LABEL";

/// Configuration for the logger.
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// The whoami string, which is used to identify the service in logs.
    whoami: String,

    /// The OpenTelemetry URL for exporting traces.
    otel_url: Option<String>,
}

impl LoggerConfig {
    /// Creates a new instance with whoami set and no trace export.
    pub const fn new(whoami: String) -> Self {
        Self {
            whoami,
            otel_url: None,
        }
    }

    /// Creates a new instance with the whoami string derived from the given
    /// base name and the service label envvar.
    pub fn with_base_name(base: &str) -> Self {
        Self::new(get_whoami_string(base))
    }

    /// Sets the opentelemetry URL to the provided string.
    pub fn set_otlp_url(&mut self, url: String) {
        self.otel_url = Some(url);
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self::with_base_name("(staking)")
    }
}

/// Initializes the logging subsystem with the provided config.
///
/// Always installs a compact stdout layer gated by `RUST_LOG`; additionally
/// exports spans over OTLP when the config carries an endpoint.
pub fn init(config: LoggerConfig) {
    let with_file = env::var("LOG_FILE").is_ok_and(|v| v == "1");
    let with_line_num = env::var("LOG_LINE_NUM").is_ok_and(|v| v == "1");

    let stdout = tracing_subscriber::fmt::layer()
        .compact()
        .event_format(
            tracing_subscriber::fmt::format()
                .with_file(with_file)
                .with_line_number(with_line_num),
        )
        .with_filter(tracing_subscriber::EnvFilter::from_default_env());

    let registry = tracing_subscriber::registry().with(stdout);

    match &config.otel_url {
        Some(otel_url) => registry.with(otel_layer(&config.whoami, otel_url)).init(),
        None => registry.init(),
    }

    info!(whoami = %config.whoami, "logging started");
}

/// Builds the OTLP span-export layer identified by the whoami string.
fn otel_layer<S>(whoami: &str, otel_url: &str) -> impl Layer<S>
where
    S: Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    let resource = Resource::builder()
        .with_attribute(KeyValue::new("service.name", whoami.to_owned()))
        .build();

    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(otel_url)
        .build()
        .expect("must be able to initialize exporter");

    let provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
        .with_resource(resource)
        .with_batch_exporter(exporter)
        .build();

    tracing_opentelemetry::layer().with_tracer(provider.tracer("staking"))
}

/// Gets the OTLP URL from the standard envvar.
pub fn get_otlp_url_from_env() -> Option<String> {
    env::var(OTLP_URL_ENVVAR).ok()
}

/// Gets the service label from the standard envvar, which should be included
/// in the whoami string.
pub fn get_service_label_from_env() -> Option<String> {
    env::var(SVC_LABEL_ENVVAR).ok()
}

/// Computes a standard whoami string.
pub fn get_whoami_string(base: &str) -> String {
    match get_service_label_from_env() {
        Some(label) => format!("{base}%{label}"),
        None => base.to_owned(),
    }
}
