use std::sync::LazyLock;

use scraper::{Html, Selector};

use super::text_of;

static TAG_ITEM: LazyLock<Selector> = LazyLock::new(|| Selector::parse("li.hoverable").unwrap());
static ANCHOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").unwrap());

/// One entry of the tags listing.
#[derive(Debug, Clone, PartialEq)]
pub struct TagEntry {
    pub name: String,
    /// `href` of the first anchor, if the entry has one.
    pub link: Option<String>,
}

pub fn parse(html: &str) -> Vec<TagEntry> {
    let doc = Html::parse_document(html);
    doc.select(&TAG_ITEM)
        .map(|li| TagEntry {
            name: text_of(li),
            link: li
                .select(&ANCHOR)
                .next()
                .and_then(|a| a.value().attr("href"))
                .map(str::to_string),
        })
        .collect()
}
