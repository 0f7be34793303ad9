//! Runs one scrape of every metric family.

use std::sync::Arc;

use crate::console::client::Client;
use crate::console::collectors::{PowerMetricCollector, TemperatureMetricCollector};
use crate::console::targets::{PowerTarget, SensorTableTarget};
use crate::error::CollectorError;
use crate::model::{batch_collect_metrics, MetricCollector, MetricMapper, MetricSample, SampleSink};

/// Owns the per-family collectors and runs them for each pull.
///
/// Every call works on its own documents and sample buffers; the shared
/// client and mapper are read-only, so overlapping pulls never see each
/// other's values.
pub struct ScrapeCoordinator {
    power: PowerMetricCollector,
    temperature: TemperatureMetricCollector,
}

impl ScrapeCoordinator {
    pub fn new(client: Arc<Client>, mapper: Arc<MetricMapper>) -> Self {
        Self::with_targets(
            client,
            mapper,
            PowerTarget::default(),
            SensorTableTarget::default(),
        )
    }

    pub fn with_targets(
        client: Arc<Client>,
        mapper: Arc<MetricMapper>,
        power: PowerTarget,
        sensors: SensorTableTarget,
    ) -> Self {
        Self {
            power: PowerMetricCollector::with_target(Arc::clone(&client), Arc::clone(&mapper), power),
            temperature: TemperatureMetricCollector::with_target(client, mapper, sensors),
        }
    }

    pub async fn scrape_power(&self) -> Result<Vec<MetricSample>, CollectorError> {
        self.power.collect().await
    }

    pub async fn scrape_temperature(&self) -> Result<Vec<MetricSample>, CollectorError> {
        self.temperature.collect().await
    }

    /// Scrapes both families concurrently. A family that fails is logged and
    /// left out; the other is still returned.
    pub async fn scrape(&self) -> Vec<MetricSample> {
        let collectors: [&dyn MetricCollector; 2] = [&self.power, &self.temperature];
        batch_collect_metrics(&collectors).await
    }

    /// Scrapes and emits every sample into `sink`.
    pub async fn scrape_into<S: SampleSink>(&self, sink: &mut S) {
        for sample in self.scrape().await {
            sink.emit(sample);
        }
    }
}
