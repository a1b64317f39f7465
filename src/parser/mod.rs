//! Page adapters. Every CSS selector the crate depends on lives here.

pub mod activity;
pub mod films;
pub mod followers;
pub mod tags;

use scraper::ElementRef;

/// Concatenated text of an element and its descendants, trimmed.
fn text_of(el: ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}
