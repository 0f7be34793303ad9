//! Power metric collector implementation.

use async_trait::async_trait;
use scraper::Html;
use std::sync::Arc;

use crate::console::client::Client;
use crate::console::parsers::{parse_power_page, PowerReading};
use crate::console::targets::PowerTarget;
use crate::error::{CollectorError, MetricError};
use crate::model::{MetricCollector, MetricKey, MetricMapper, MetricSample};

/// Collector for the power family: the whole-system draw plus one sample per
/// hardware element, all labelled with the configured capacity.
pub struct PowerMetricCollector {
    client: Arc<Client>,
    mapper: Arc<MetricMapper>,
    target: PowerTarget,
}

impl PowerMetricCollector {
    pub fn with_target(client: Arc<Client>, mapper: Arc<MetricMapper>, target: PowerTarget) -> Self {
        Self {
            client,
            mapper,
            target,
        }
    }
}

/// Turns one power page reading into samples, overall first.
pub fn power_samples(
    mapper: &MetricMapper,
    reading: &PowerReading,
) -> Result<Vec<MetricSample>, MetricError> {
    let mut samples = Vec::with_capacity(reading.elements.len() + 1);
    samples.push(mapper.sample(
        MetricKey::PowerOverall,
        reading.current,
        &[reading.total.as_str()],
    )?);
    for (element, value) in &reading.elements {
        samples.push(mapper.sample(
            MetricKey::PowerElement,
            *value,
            &[element.to_string(), reading.total.clone()],
        )?);
    }
    Ok(samples)
}

#[async_trait]
impl MetricCollector for PowerMetricCollector {
    fn name(&self) -> &'static str {
        "power"
    }

    async fn collect(&self) -> Result<Vec<MetricSample>, CollectorError> {
        let body = self.client.get_with_retry(&self.target.path).await?;
        // Html is not Send; keep it out of any await point
        let reading = parse_power_page(&Html::parse_document(&body), &self.target)?;
        tracing::debug!(
            current = reading.current,
            total = %reading.total,
            "Parsed power page"
        );
        Ok(power_samples(&self.mapper, &reading)?)
    }
}
