// Metrics hooks for the comparison pipeline.
//
// Callers install a process-wide `PipelineMetrics` implementation via
// [`set_pipeline_metrics`]; every `Checker` then reports per-stage latency and
// outcome. No metrics backend is linked here.
use std::sync::{Arc, OnceLock, RwLock};
use std::time::{Duration, Instant};

use matcher::PlagiarismVerdict;

use crate::PipelineError;

/// Metrics observer for pipeline stages.
pub trait PipelineMetrics: Send + Sync {
    /// One document read and extracted (called once per side).
    fn record_extract(&self, latency: Duration, result: Result<(), &PipelineError>);
    /// One document normalized. Normalization cannot fail.
    fn record_normalize(&self, latency: Duration, token_count: usize);
    /// Scoring plus decision for a pair.
    fn record_score(&self, latency: Duration, result: Result<&PlagiarismVerdict, &PipelineError>);
}

/// Install or clear the global pipeline metrics recorder.
pub fn set_pipeline_metrics(recorder: Option<Arc<dyn PipelineMetrics>>) {
    let mut guard = metrics_lock()
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = recorder;
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn PipelineMetrics>>> {
    static METRICS: OnceLock<RwLock<Option<Arc<dyn PipelineMetrics>>>> = OnceLock::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

fn metrics_recorder() -> Option<Arc<dyn PipelineMetrics>> {
    let guard = metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

pub(crate) struct MetricsSpan {
    recorder: Arc<dyn PipelineMetrics>,
    start: Instant,
}

impl MetricsSpan {
    pub(crate) fn start() -> Option<Self> {
        metrics_recorder().map(|recorder| Self {
            recorder,
            start: Instant::now(),
        })
    }

    pub(crate) fn record_extract(self, result: Result<(), &PipelineError>) {
        self.recorder.record_extract(self.start.elapsed(), result);
    }

    pub(crate) fn record_normalize(self, token_count: usize) {
        self.recorder
            .record_normalize(self.start.elapsed(), token_count);
    }

    pub(crate) fn record_score(self, result: Result<&PlagiarismVerdict, &PipelineError>) {
        self.recorder.record_score(self.start.elapsed(), result);
    }
}
