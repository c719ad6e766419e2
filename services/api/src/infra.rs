use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use traffic_risk::config::{LiveSignalConfig, SignalMode};
use traffic_risk::error::AppError;
use traffic_risk::providers::{LiveSignalProvider, SignalProvider, StubSignalProvider};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Builds the provider selected by configuration.
pub(crate) fn build_provider(
    mode: SignalMode,
    config: &LiveSignalConfig,
) -> Result<Arc<dyn SignalProvider>, AppError> {
    let provider: Arc<dyn SignalProvider> = match mode {
        SignalMode::Stub => Arc::new(StubSignalProvider),
        SignalMode::Live => Arc::new(LiveSignalProvider::new(config.clone())?),
    };
    Ok(provider)
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    traffic_risk::prediction::parse_date(raw)
}
