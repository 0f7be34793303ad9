//! Temperature metric collector implementation.

use async_trait::async_trait;
use scraper::Html;
use std::sync::Arc;

use crate::console::client::Client;
use crate::console::parsers::{parse_sensor_table, SensorReading};
use crate::console::targets::SensorTableTarget;
use crate::error::{CollectorError, MetricError};
use crate::model::{MetricCollector, MetricKey, MetricMapper, MetricSample};

/// Collector for the temperature family, one sample per sensor row.
pub struct TemperatureMetricCollector {
    client: Arc<Client>,
    mapper: Arc<MetricMapper>,
    target: SensorTableTarget,
}

impl TemperatureMetricCollector {
    pub fn with_target(
        client: Arc<Client>,
        mapper: Arc<MetricMapper>,
        target: SensorTableTarget,
    ) -> Self {
        Self {
            client,
            mapper,
            target,
        }
    }
}

pub fn temperature_samples(
    mapper: &MetricMapper,
    readings: &[SensorReading],
) -> Result<Vec<MetricSample>, MetricError> {
    readings
        .iter()
        .map(|reading| {
            mapper.sample(
                MetricKey::TemperatureElement,
                reading.current,
                &[
                    reading.name.as_str(),
                    reading.warning.as_str(),
                    reading.critical.as_str(),
                ],
            )
        })
        .collect()
}

#[async_trait]
impl MetricCollector for TemperatureMetricCollector {
    fn name(&self) -> &'static str {
        "temperature"
    }

    async fn collect(&self) -> Result<Vec<MetricSample>, CollectorError> {
        let body = self.client.get_with_retry(&self.target.path).await?;
        let readings = parse_sensor_table(&Html::parse_document(&body), &self.target)?;
        tracing::debug!(sensors = readings.len(), "Parsed sensor page");
        Ok(temperature_samples(&self.mapper, &readings)?)
    }
}
