use crate::error::MetricError;

use super::types::{MetricKey, MetricKind};

/// Prefix shared by every exported metric name.
pub const NAMESPACE: &str = "fujitsu";

/// Static description of one exported metric family.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricDefinition {
    pub key: MetricKey,
    pub name: String,
    pub help: &'static str,
    /// Label names, in the order sample values must follow.
    pub label_names: &'static [&'static str],
    pub kind: MetricKind,
}

/// One measured value bound to a definition and concrete label values.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSample {
    pub key: MetricKey,
    pub label_values: Vec<String>,
    pub value: f64,
}

/// Builds a `namespace_subsystem_name` metric name.
fn fq_name(subsystem: &str, name: &str) -> String {
    format!("{}_{}_{}", NAMESPACE, subsystem, name)
}

/// The fixed, read-only catalogue of metric definitions.
///
/// Built once at startup and shared behind an `Arc`; the set of definitions
/// and their label schemas never change afterwards.
#[derive(Debug, Clone)]
pub struct MetricMapper {
    definitions: [MetricDefinition; 3],
}

impl MetricMapper {
    pub fn new() -> Self {
        let definitions = [
            MetricDefinition {
                key: MetricKey::PowerOverall,
                name: fq_name("power", "overall"),
                help: "Power consumption by the whole hardware",
                label_names: &["max"],
                kind: MetricKind::Gauge,
            },
            MetricDefinition {
                key: MetricKey::PowerElement,
                name: fq_name("power", "element"),
                help: "General power consumption by hardware element",
                label_names: &["element", "max"],
                kind: MetricKind::Gauge,
            },
            MetricDefinition {
                key: MetricKey::TemperatureElement,
                name: fq_name("temperature", "element"),
                help: "Temperature of the hardware elements",
                label_names: &["element", "warning", "critical"],
                kind: MetricKind::Gauge,
            },
        ];
        debug_assert!(MetricKey::ALL
            .iter()
            .all(|key| definitions[key.index()].key == *key));
        Self { definitions }
    }

    pub fn definition(&self, key: MetricKey) -> &MetricDefinition {
        &self.definitions[key.index()]
    }

    pub fn definitions(&self) -> impl Iterator<Item = &MetricDefinition> {
        self.definitions.iter()
    }

    /// Builds a sample, checking the label values against the definition.
    ///
    /// # Errors
    /// [`MetricError::LabelArityMismatch`] when the number of label values
    /// differs from the definition's label names.
    pub fn sample<S: AsRef<str>>(
        &self,
        key: MetricKey,
        value: f64,
        label_values: &[S],
    ) -> Result<MetricSample, MetricError> {
        let definition = self.definition(key);
        if label_values.len() != definition.label_names.len() {
            return Err(MetricError::LabelArityMismatch {
                metric: definition.name.clone(),
                expected: definition.label_names.len(),
                actual: label_values.len(),
            });
        }
        Ok(MetricSample {
            key,
            label_values: label_values
                .iter()
                .map(|v| v.as_ref().to_string())
                .collect(),
            value,
        })
    }
}

impl Default for MetricMapper {
    fn default() -> Self {
        Self::new()
    }
}
