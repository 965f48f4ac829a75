//! Tracing subscriber bootstrap for the catalog binaries.

use anyhow::Context;
use catalog_kernel::settings::{LogFormat, TelemetrySettings};
use tracing_subscriber::{fmt::MakeWriter, EnvFilter};

/// Build the filter from `RUST_LOG`, falling back to the configured directive.
pub fn env_filter(settings: &TelemetrySettings) -> anyhow::Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&settings.filter)
            .with_context(|| format!("invalid log filter '{}'", settings.filter)),
    }
}

/// Install the global subscriber writing to stdout. A second call is a no-op.
pub fn init(settings: &TelemetrySettings) -> anyhow::Result<()> {
    init_with_writer(settings, std::io::stdout)
}

/// Install the global subscriber writing to `writer`; command-line tools
/// pass stderr so their stdout stays clean.
pub fn init_with_writer<W>(settings: &TelemetrySettings, writer: W) -> anyhow::Result<()>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let filter = env_filter(settings)?;

    let installed = match settings.log_format {
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(writer)
            .with_target(true)
            .try_init()
            .is_ok(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(writer)
            .with_current_span(false)
            .try_init()
            .is_ok(),
    };

    if installed {
        tracing::debug!(
            target: "catalog-telemetry",
            format = ?settings.log_format,
            "tracing subscriber installed"
        );
    }

    Ok(())
}
