use std::sync::LazyLock;

use scraper::{Html, Selector};

use crate::error::{Result, ScrapeError};

static AVATAR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a.avatar").unwrap());

/// Usernames from avatar links (`/name/` becomes `name`).
pub fn parse(html: &str) -> Result<Vec<String>> {
    let doc = Html::parse_document(html);
    doc.select(&AVATAR)
        .map(|a| {
            a.value()
                .attr("href")
                .map(|href| href.trim_matches('/').to_string())
                .ok_or(ScrapeError::MissingAttribute {
                    page: "followers",
                    element: "a",
                    attr: "href",
                })
        })
        .collect()
}
