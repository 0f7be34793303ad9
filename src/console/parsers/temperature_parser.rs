//! HTML parsing for the sensor (temperature) page.

use scraper::Html;

use crate::console::html_parsing::{count_rows, extract_number, extract_text};
use crate::console::targets::SensorTableTarget;
use crate::error::ExtractionError;

/// One row of the sensor table.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorReading {
    pub name: String,
    pub current: f64,
    pub warning: String,
    pub critical: String,
}

/// Row count of the sensor table, rejected when it cannot hold the header
/// and footer rows or exceeds the target's maximum.
pub fn sensor_row_count(
    document: &Html,
    target: &SensorTableTarget,
) -> Result<usize, ExtractionError> {
    let count = count_rows(document, &target.rows)?;
    if count < target.leading_rows + target.trailing_rows || count > target.max_rows {
        return Err(ExtractionError::ImplausibleRowCount {
            path: target.rows.clone(),
            count,
        });
    }
    Ok(count)
}

fn parse_sensor_row(
    document: &Html,
    target: &SensorTableTarget,
    row: usize,
) -> Result<SensorReading, ExtractionError> {
    Ok(SensorReading {
        name: extract_text(document, &target.cell(row, target.name_column))?,
        current: extract_number(document, &target.cell(row, target.current_column))?,
        warning: extract_text(document, &target.cell(row, target.warning_column))?,
        critical: extract_text(document, &target.cell(row, target.critical_column))?,
    })
}

/// Parses every data row of the sensor table.
///
/// The row count is discovered from the page on each call. A row without a
/// readable value (an absent sensor shows `N/A`) is logged and skipped; the
/// table itself being missing or implausibly sized fails the whole page.
pub fn parse_sensor_table(
    document: &Html,
    target: &SensorTableTarget,
) -> Result<Vec<SensorReading>, ExtractionError> {
    let count = sensor_row_count(document, target)?;

    let mut readings = Vec::with_capacity(count);
    for row in target.data_rows(count) {
        match parse_sensor_row(document, target, row) {
            Ok(reading) => readings.push(reading),
            Err(e) => tracing::warn!(
                row,
                path = e.path(),
                error = %e,
                "Skipping unreadable sensor row"
            ),
        }
    }

    Ok(readings)
}
