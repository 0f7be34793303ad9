//! HTML extraction utilities for console pages.
//!
//! The console renders its readings as nested tables with no ids, so every
//! value is addressed by a structural CSS path (`tr:nth-child(2) > td:nth-child(4)`).
//! A path that matches nothing, or text that is not a number, is an
//! [`ExtractionError`]; nothing here ever falls back to zero.

use crate::error::ExtractionError;
use scraper::{Html, Selector};

/// Compiles a CSS selector.
///
/// # Examples
///
/// Valid selectors:
/// - `".sensor > tbody"` - Class and child
/// - `"tr:nth-child(3) > td:nth-child(5)"` - Positional path
pub fn html_selector(path: &str) -> Result<Selector, ExtractionError> {
    Selector::parse(path).map_err(|e| ExtractionError::invalid_selector(path, e))
}

/// Returns the trimmed text content of the first node matching `path`.
///
/// An element that matches but has no text yields an empty string; only a
/// missing element is an error.
pub fn extract_text(document: &Html, path: &str) -> Result<String, ExtractionError> {
    let selector = html_selector(path)?;
    let element = document
        .select(&selector)
        .next()
        .ok_or_else(|| ExtractionError::element_not_found(path))?;
    Ok(element.text().collect::<String>().trim().to_string())
}

/// First whitespace-separated token of `text`, dropping unit suffixes such
/// as `"1200 W"` or `"42 °C"`.
pub fn first_token(text: &str) -> Option<&str> {
    text.split_whitespace().next()
}

/// Extracts the text at `path` and parses its first token as `f64`.
///
/// # Example
///
/// ```no_run
/// // "450.5 Watt" parses as 450.5
/// let watts = extract_number(&document, "td:nth-child(1)")?;
/// ```
pub fn extract_number(document: &Html, path: &str) -> Result<f64, ExtractionError> {
    let text = extract_text(document, path)?;
    first_token(&text)
        .and_then(|token| token.parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .ok_or_else(|| ExtractionError::number_parse(path, text.as_str()))
}

/// Number of element children directly under the node matching
/// `container_path`, e.g. the `<tr>`s of a `<tbody>`.
pub fn count_rows(document: &Html, container_path: &str) -> Result<usize, ExtractionError> {
    let selector = html_selector(container_path)?;
    let container = document
        .select(&selector)
        .next()
        .ok_or_else(|| ExtractionError::element_not_found(container_path))?;
    Ok(container
        .children()
        .filter(|child| child.value().is_element())
        .count())
}
