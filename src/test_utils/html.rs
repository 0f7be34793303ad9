//! HTML generation utilities for testing.
//!
//! The generated pages mirror the element structure of the console's power
//! and sensor pages closely enough for the positional selectors to match.

use scraper::Html;

use super::fixtures::constants::*;

/// Creates a standard HTML document wrapper for test content.
pub fn create_html_document(content: &str) -> Html {
    Html::parse_document(&format!(r#"<html><body>{}</body></html>"#, content))
}

/// Cell contents of a generated power page. Values are rendered as
/// `"<value> W"`.
#[derive(Debug, Clone)]
pub struct PowerPageValues {
    pub total: String,
    pub current: String,
    /// cpu1, cpu2, system and disk, in page order
    pub elements: Vec<String>,
    /// How many element rows to render; fewer than four leaves selectors
    /// without a match.
    pub element_rows: usize,
}

impl Default for PowerPageValues {
    fn default() -> Self {
        Self {
            total: TEST_POWER_TOTAL.to_string(),
            current: TEST_POWER_CURRENT.to_string(),
            elements: [
                TEST_POWER_CPU1,
                TEST_POWER_CPU2,
                TEST_POWER_SYSTEM,
                TEST_POWER_DISK,
            ]
            .iter()
            .map(f64::to_string)
            .collect(),
            element_rows: 4,
        }
    }
}

/// Renders a power page: the summary form first, a spacer, then the
/// per-element form.
pub fn power_page_html(values: &PowerPageValues) -> String {
    let mut element_rows = String::new();
    for value in values.elements.iter().take(values.element_rows) {
        element_rows.push_str(&format!(
            r#"<tr><td>Sensor</td><td>ok</td><td>Dynamic</td><td>{} W</td></tr>"#,
            value
        ));
    }

    format!(
        r#"<html><body>
<div class="form">
  <h3>Power Consumption</h3>
  <p>Current overall power consumption</p>
  <table><tbody>
    <tr><th>Status</th><th>Mode</th><th>Limit</th><th>Warning</th><th>Consumption</th></tr>
    <tr><td>ok</td><td>Power Limit</td><td>-</td><td>-</td><td>
      <table><tbody><tr><td>{current} W</td><td>/</td><td>{total} W</td></tr></tbody></table>
    </td></tr>
  </tbody></table>
</div>
<div class="spacer"></div>
<div class="form">
  <h3>Power Consumption Details</h3>
  <p>Power consumption per component</p>
  <table><tbody>
    <tr><th>Name</th><th>Status</th><th>Mode</th><th>Current</th></tr>
    {rows}
  </tbody></table>
</div>
</body></html>"#,
        current = values.current,
        total = values.total,
        rows = element_rows,
    )
}

/// One row of a generated sensor table.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorRow {
    pub name: String,
    /// Reading without unit; rendered as `"<current> C"`
    pub current: String,
    pub warning: String,
    pub critical: String,
}

impl SensorRow {
    pub fn new(name: &str, current: &str, warning: &str, critical: &str) -> Self {
        Self {
            name: name.to_string(),
            current: current.to_string(),
            warning: warning.to_string(),
            critical: critical.to_string(),
        }
    }
}

/// Renders a sensor page: header row, separator row, one row per sensor and
/// a footer row.
pub fn sensor_page_html(rows: &[SensorRow]) -> String {
    let mut body = String::new();
    for (index, row) in rows.iter().enumerate() {
        body.push_str(&format!(
            r#"<tr><td><img src="ok.png"></td><td>{}</td><td>ok</td><td>{}</td><td>{} C</td><td>{}</td><td>{}</td></tr>"#,
            index, row.name, row.current, row.warning, row.critical
        ));
    }

    format!(
        r#"<html><body>
<h3>Temperature</h3>
<table class="sensor"><tbody>
  <tr><th></th><th>#</th><th>Status</th><th>Sensor</th><th>Current</th><th>Warning</th><th>Critical</th></tr>
  <tr><td colspan="7"></td></tr>
  {}
  <tr><td colspan="7">All values in degrees Celsius</td></tr>
</tbody></table>
</body></html>"#,
        body
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Selector;

    #[test]
    fn test_create_html_document() {
        let doc = create_html_document(r#"<div id="test">Hello</div>"#);
        let selector = Selector::parse("#test").unwrap();
        assert_eq!(doc.select(&selector).count(), 1);
    }

    #[test]
    fn test_sensor_page_row_count() {
        let doc = Html::parse_document(&sensor_page_html(&[SensorRow::new("A", "1", "2", "3")]));
        let selector = Selector::parse(".sensor > tbody:nth-child(1) > tr").unwrap();
        assert_eq!(doc.select(&selector).count(), 4);
    }
}
