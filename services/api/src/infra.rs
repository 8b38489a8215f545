use metrics_exporter_prometheus::PrometheusHandle;
use residence_docs::renewal::RenewalRulebook;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Shared handles for the HTTP layer. The rulebook is built and verified
/// once at startup and only ever read afterwards.
#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) rulebook: Arc<RenewalRulebook>,
}
