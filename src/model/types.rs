use std::fmt;

/// Identifies one of the fixed metric definitions.
///
/// Each key maps to exactly one Prometheus gauge family exposed by the
/// exporter.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum MetricKey {
    /// Whole-system power draw, labeled with the configured capacity
    PowerOverall,
    /// Power draw per hardware element (cpu1, cpu2, system, disk)
    PowerElement,
    /// Temperature per sensor with warning/critical thresholds
    TemperatureElement,
}

impl MetricKey {
    /// All keys, in registry order.
    pub const ALL: [MetricKey; 3] = [
        MetricKey::PowerOverall,
        MetricKey::PowerElement,
        MetricKey::TemperatureElement,
    ];

    /// Position of this key in the registry.
    pub fn index(self) -> usize {
        match self {
            MetricKey::PowerOverall => 0,
            MetricKey::PowerElement => 1,
            MetricKey::TemperatureElement => 2,
        }
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MetricKey::PowerOverall => write!(f, "power_overall"),
            MetricKey::PowerElement => write!(f, "power_element"),
            MetricKey::TemperatureElement => write!(f, "temperature_element"),
        }
    }
}

/// Kind of Prometheus metric a definition produces.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum MetricKind {
    Gauge,
}

/// Hardware elements reported on the power page.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum PowerElement {
    Cpu1,
    Cpu2,
    System,
    Disk,
}

impl PowerElement {
    pub const ALL: [PowerElement; 4] = [
        PowerElement::Cpu1,
        PowerElement::Cpu2,
        PowerElement::System,
        PowerElement::Disk,
    ];
}

impl fmt::Display for PowerElement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PowerElement::Cpu1 => write!(f, "cpu1"),
            PowerElement::Cpu2 => write!(f, "cpu2"),
            PowerElement::System => write!(f, "system"),
            PowerElement::Disk => write!(f, "disk"),
        }
    }
}
