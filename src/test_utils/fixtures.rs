//! Test fixtures and common test data.

/// Common test data constants.
pub mod constants {
    /// Whole-system draw on the default power page, in W.
    pub const TEST_POWER_CURRENT: f64 = 450.5;

    /// Configured capacity on the default power page, in W.
    pub const TEST_POWER_TOTAL: &str = "1200";

    pub const TEST_POWER_CPU1: f64 = 80.2;
    pub const TEST_POWER_CPU2: f64 = 79.8;
    pub const TEST_POWER_SYSTEM: f64 = 150.0;
    pub const TEST_POWER_DISK: f64 = 20.0;
}

/// Sample data generators.
pub mod samples {
    use crate::test_utils::html::SensorRow;

    /// Sensor rows as they appear on a healthy RX300 sensor page.
    pub fn sensor_rows() -> Vec<SensorRow> {
        vec![
            SensorRow::new("Ambient", "24", "37 C", "42 C"),
            SensorRow::new("Systemboard", "38", "75 C", "80 C"),
            SensorRow::new("CPU1", "45", "88 C", "89 C"),
            SensorRow::new("CPU2", "43.5", "88 C", "89 C"),
        ]
    }
}
