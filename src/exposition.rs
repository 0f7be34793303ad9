//! Prometheus text exposition of scraped samples.

use prometheus::{Encoder, GaugeVec, Opts, Registry, TextEncoder};
use std::collections::HashMap;

use crate::error::ExportError;
use crate::model::{MetricKey, MetricKind, MetricMapper, MetricSample, SampleSink};

/// Content type of the text exposition format.
pub const TEXT_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// A [`SampleSink`] backed by a private Prometheus registry.
///
/// Built fresh for every pull, so a family that failed this time shows up
/// with no series at all rather than with values from an earlier pull.
pub struct PrometheusSink {
    registry: Registry,
    gauges: HashMap<MetricKey, GaugeVec>,
}

impl PrometheusSink {
    /// Registers one gauge family per definition in the mapper.
    pub fn new(mapper: &MetricMapper) -> Result<Self, ExportError> {
        let registry = Registry::new();
        let mut gauges = HashMap::new();

        for definition in mapper.definitions() {
            match definition.kind {
                MetricKind::Gauge => {
                    let gauge = GaugeVec::new(
                        Opts::new(definition.name.as_str(), definition.help),
                        definition.label_names,
                    )?;
                    registry.register(Box::new(gauge.clone()))?;
                    gauges.insert(definition.key, gauge);
                }
            }
        }

        Ok(Self { registry, gauges })
    }

    /// Encodes everything emitted so far in the text format.
    pub fn encode(&self) -> Result<String, ExportError> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}

impl SampleSink for PrometheusSink {
    fn emit(&mut self, sample: MetricSample) {
        let Some(gauge) = self.gauges.get(&sample.key) else {
            tracing::error!(key = %sample.key, "No gauge registered for sample");
            return;
        };
        let labels: Vec<&str> = sample.label_values.iter().map(String::as_str).collect();
        match gauge.get_metric_with_label_values(&labels) {
            Ok(series) => series.set(sample.value),
            Err(e) => tracing::error!(key = %sample.key, error = %e, "Failed to set gauge"),
        }
    }
}
