//! Logging and trace export for Sentinel
//!
//! Always installs a `tracing-subscriber` fmt layer; when an OTLP exporter
//! is configured, spans are additionally shipped through OpenTelemetry.

mod metadata;

use opentelemetry::global;
use opentelemetry::trace::TracerProvider;
use opentelemetry_sdk::trace::{Sampler, SdkTracerProvider};
use sentinel_config::TelemetryConfig;
use sentinel_config::telemetry::exporters::{ExportProtocol, ExporterConfig};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Guard that flushes and shuts down the tracer provider on drop
pub struct TelemetryGuard {
    tracer_provider: Option<SdkTracerProvider>,
}

impl TelemetryGuard {
    /// Whether spans are being exported
    pub const fn exporting(&self) -> bool {
        self.tracer_provider.is_some()
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        if let Some(provider) = self.tracer_provider.take()
            && let Err(e) = provider.shutdown()
        {
            eprintln!("failed to shutdown tracer provider: {e}");
        }
    }
}

/// Initialize logging and optional trace export
///
/// `log_filter` uses `EnvFilter` syntax (e.g. `info,sentinel_server=debug`);
/// an unparseable filter falls back to `info`. The returned guard must be
/// held for the lifetime of the application.
///
/// # Errors
///
/// Returns an error if the OTLP span exporter cannot be built
pub fn init(config: Option<&TelemetryConfig>, log_filter: &str) -> anyhow::Result<TelemetryGuard> {
    let filter = EnvFilter::try_new(log_filter).unwrap_or_else(|_| EnvFilter::new("info"));

    // stdout is reserved for command output
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    let Some((telemetry_config, exporter)) = config.and_then(|c| c.trace_exporter().map(|e| (c, e))) else {
        tracing_subscriber::registry().with(filter).with(fmt_layer).init();
        return Ok(TelemetryGuard { tracer_provider: None });
    };

    let tracer_provider = init_tracer(telemetry_config, exporter)?;
    let tracer = tracer_provider.tracer("sentinel");
    global::set_tracer_provider(tracer_provider.clone());

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(tracing_opentelemetry::layer().with_tracer(tracer))
        .init();

    if exporter.protocol == ExportProtocol::Grpc && !exporter.headers.is_empty() {
        tracing::warn!("exporter headers are only applied with the http_proto protocol");
    }

    tracing::info!(endpoint = %exporter.endpoint, "exporting traces over OTLP");

    Ok(TelemetryGuard {
        tracer_provider: Some(tracer_provider),
    })
}

fn init_tracer(config: &TelemetryConfig, exporter_config: &ExporterConfig) -> anyhow::Result<SdkTracerProvider> {
    let exporter = build_span_exporter(exporter_config)?;

    let (sampling_rate, parent_based) = config
        .tracing
        .as_ref()
        .map_or((1.0, true), |t| (t.sampling_rate, t.parent_based));

    let sampler = sampler_for(sampling_rate, parent_based);

    Ok(SdkTracerProvider::builder()
        .with_resource(metadata::build_resource(config))
        .with_sampler(sampler)
        .with_batch_exporter(exporter)
        .build())
}

fn sampler_for(sampling_rate: f64, parent_based: bool) -> Sampler {
    let sampler = if sampling_rate >= 1.0 {
        Sampler::AlwaysOn
    } else if sampling_rate <= 0.0 {
        Sampler::AlwaysOff
    } else {
        Sampler::TraceIdRatioBased(sampling_rate)
    };

    if parent_based {
        Sampler::ParentBased(Box::new(sampler))
    } else {
        sampler
    }
}

fn build_span_exporter(config: &ExporterConfig) -> anyhow::Result<opentelemetry_otlp::SpanExporter> {
    use opentelemetry_otlp::{SpanExporter, WithExportConfig, WithHttpConfig};

    let exporter = match config.protocol {
        ExportProtocol::Grpc => SpanExporter::builder()
            .with_tonic()
            .with_endpoint(config.endpoint.as_str())
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build gRPC span exporter: {e}"))?,
        ExportProtocol::HttpProto => SpanExporter::builder()
            .with_http()
            .with_endpoint(config.endpoint.as_str())
            .with_headers(config.headers.clone())
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build HTTP span exporter: {e}"))?,
    };

    Ok(exporter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_rate_always_samples() {
        assert!(matches!(sampler_for(1.0, false), Sampler::AlwaysOn));
        assert!(matches!(sampler_for(2.0, false), Sampler::AlwaysOn));
    }

    #[test]
    fn zero_rate_never_samples() {
        assert!(matches!(sampler_for(0.0, false), Sampler::AlwaysOff));
        assert!(matches!(sampler_for(-0.5, false), Sampler::AlwaysOff));
    }

    #[test]
    fn partial_rate_samples_by_trace_id() {
        assert!(matches!(
            sampler_for(0.25, false),
            Sampler::TraceIdRatioBased(rate) if (rate - 0.25).abs() < f64::EPSILON
        ));
    }

    #[test]
    fn parent_based_wraps_every_rate() {
        for rate in [0.0, 0.5, 1.0] {
            assert!(matches!(sampler_for(rate, true), Sampler::ParentBased(_)), "rate {rate}");
        }
    }
}
