//! Calendar day cells scraped from the page.

use scraper::{Html, Selector};

use crate::error::{DayCycleError, DayCycleResult};

/// One rendered day cell, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    /// Position among the matched cells.
    pub index: usize,
    /// Cell text with runs of whitespace collapsed to single spaces.
    pub text: String,
}

impl CalendarEvent {
    pub fn new(index: usize, text: &str) -> Self {
        CalendarEvent {
            index,
            text: normalize_whitespace(text),
        }
    }
}

/// Parsed CSS selector for the day cells.
#[derive(Debug, Clone)]
pub struct DaySelector(Selector);

impl DaySelector {
    pub fn parse(selector: &str) -> DayCycleResult<Self> {
        Selector::parse(selector)
            .map(DaySelector)
            .map_err(|e| DayCycleError::InvalidSelector {
                selector: selector.to_string(),
                reason: format!("{:?}", e),
            })
    }
}

/// Extract every day cell from an HTML document.
///
/// Sibling text nodes are separated by a space, so markup that splits "Day"
/// and "3" into separate elements still reads as "Day 3". A node that opens
/// with punctuation is attached directly: `<span>Tuesday</span>, August 25`
/// reads as "Tuesday, August 25".
pub fn parse_events(html: &str, selector: &DaySelector) -> Vec<CalendarEvent> {
    let document = Html::parse_document(html);

    document
        .select(&selector.0)
        .enumerate()
        .map(|(index, element)| CalendarEvent::new(index, &join_text_nodes(element.text())))
        .collect()
}

fn join_text_nodes<'a>(nodes: impl Iterator<Item = &'a str>) -> String {
    let mut text = String::new();
    for node in nodes {
        if !text.is_empty() && !node.starts_with(|c: char| c.is_ascii_punctuation()) {
            text.push(' ');
        }
        text.push_str(node);
    }
    text
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
