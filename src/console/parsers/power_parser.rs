//! HTML parsing for the power detail page.

use scraper::Html;

use crate::console::html_parsing::{extract_number, extract_text, first_token};
use crate::console::targets::PowerTarget;
use crate::error::ExtractionError;
use crate::model::PowerElement;

/// Values read from one power page.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerReading {
    /// Configured capacity as shown on the page, unit stripped (`"1200"`).
    /// Only ever a label, so a console without a limit (`"--"`) still reports.
    pub total: String,
    /// Current whole-system draw in watts
    pub current: f64,
    pub elements: Vec<(PowerElement, f64)>,
}

/// Parses the power page. Every reading is required; the first missing or
/// malformed one fails the whole page. The capacity cell must exist but its
/// text is taken as is.
pub fn parse_power_page(
    document: &Html,
    target: &PowerTarget,
) -> Result<PowerReading, ExtractionError> {
    let total_text = extract_text(document, &target.total)?;
    let total = first_token(&total_text).unwrap_or("").to_string();

    let current = extract_number(document, &target.current)?;

    let elements = target
        .elements
        .iter()
        .map(|(element, selector)| Ok((*element, extract_number(document, selector)?)))
        .collect::<Result<Vec<_>, ExtractionError>>()?;

    Ok(PowerReading {
        total,
        current,
        elements,
    })
}
