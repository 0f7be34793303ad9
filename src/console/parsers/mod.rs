pub mod power_parser;
pub mod temperature_parser;

pub use power_parser::{parse_power_page, PowerReading};
pub use temperature_parser::{parse_sensor_table, SensorReading};
