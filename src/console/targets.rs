//! Where each value lives on the console pages.
//!
//! A target pairs a relative page path with the structural selectors for the
//! values on that page. The defaults match the iRMC power (`/13`) and sensor
//! (`/18`) pages.

use crate::model::PowerElement;

const POWER_SUMMARY_CELL: &str = "div.form:nth-child(1) > table:nth-child(3) > tbody:nth-child(1) \
     > tr:nth-child(2) > td:nth-child(5) > table:nth-child(1) > tbody:nth-child(1) > tr:nth-child(1)";

const POWER_ELEMENT_ROWS: &str = "div.form:nth-child(3) > table:nth-child(3) > tbody:nth-child(1)";

/// Power detail page layout.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerTarget {
    pub path: String,
    /// Configured capacity, e.g. `"1200 W"`
    pub total: String,
    /// Current whole-system draw
    pub current: String,
    pub elements: Vec<(PowerElement, String)>,
}

impl Default for PowerTarget {
    fn default() -> Self {
        let element_cell = |row: usize| {
            format!(
                "{} > tr:nth-child({}) > td:nth-child(4)",
                POWER_ELEMENT_ROWS, row
            )
        };
        Self {
            path: "/13".to_string(),
            total: format!("{} > td:nth-child(3)", POWER_SUMMARY_CELL),
            current: format!("{} > td:nth-child(1)", POWER_SUMMARY_CELL),
            // element rows start after the header row
            elements: PowerElement::ALL
                .iter()
                .zip(2..)
                .map(|(element, row)| (*element, element_cell(row)))
                .collect(),
        }
    }
}

/// Sensor table layout. Rows are addressed by position, columns by index.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorTableTarget {
    pub path: String,
    /// The element whose children are the table rows
    pub rows: String,
    pub name_column: usize,
    pub current_column: usize,
    pub warning_column: usize,
    pub critical_column: usize,
    /// Header and separator rows before the first sensor
    pub leading_rows: usize,
    /// Footer rows after the last sensor
    pub trailing_rows: usize,
    /// Upper bound on the row count; anything larger is treated as a broken page
    pub max_rows: usize,
}

impl Default for SensorTableTarget {
    fn default() -> Self {
        Self {
            path: "/18".to_string(),
            rows: ".sensor > tbody:nth-child(1)".to_string(),
            name_column: 4,
            current_column: 5,
            warning_column: 6,
            critical_column: 7,
            leading_rows: 2,
            trailing_rows: 1,
            max_rows: 512,
        }
    }
}

impl SensorTableTarget {
    /// Selector for the cell at `column` of the 1-based `row`.
    pub fn cell(&self, row: usize, column: usize) -> String {
        format!(
            "{} > tr:nth-child({}) > td:nth-child({})",
            self.rows, row, column
        )
    }

    /// 1-based positions of the data rows in a table of `row_count` rows.
    pub fn data_rows(&self, row_count: usize) -> std::ops::RangeInclusive<usize> {
        (self.leading_rows + 1)..=row_count.saturating_sub(self.trailing_rows)
    }
}
