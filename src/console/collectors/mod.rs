//! Collector implementations for each console metric family.

pub mod power_collector;
pub mod temperature_collector;

pub use power_collector::PowerMetricCollector;
pub use temperature_collector::TemperatureMetricCollector;
