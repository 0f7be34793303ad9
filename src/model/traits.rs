use crate::error::CollectorError;
use async_trait::async_trait;

use super::metrics::MetricSample;

/// Receiver for the samples produced by a scrape.
///
/// The exporter renders into a Prometheus registry; tests collect into a
/// plain `Vec`.
pub trait SampleSink {
    fn emit(&mut self, sample: MetricSample);
}

impl SampleSink for Vec<MetricSample> {
    fn emit(&mut self, sample: MetricSample) {
        self.push(sample);
    }
}

/// Trait for types that collect one metric family from the console.
///
/// Each collector fetches its own page and returns every sample of its
/// family, or an error and nothing at all. Implementors must be thread-safe
/// since concurrent pulls share them.
#[async_trait]
pub trait MetricCollector: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// Runs one collection.
    async fn collect(&self) -> Result<Vec<MetricSample>, CollectorError>;
}
