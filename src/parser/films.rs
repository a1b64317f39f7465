use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::error::{Result, ScrapeError};

const PAGE: &str = "tag";

static POSTER_ITEM: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("li.poster-container").unwrap());
static POSTER: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div.poster").unwrap());
static IMAGE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("img").unwrap());

/// A film as listed on a tag page.
#[derive(Debug, Clone, PartialEq)]
pub struct FilmEntry {
    pub id: String,
    pub slug: String,
    /// Poster `alt` text.
    pub name: String,
}

/// Every poster on the page. All fields are required; a poster missing any
/// of them fails the whole page.
pub fn parse(html: &str) -> Result<Vec<FilmEntry>> {
    let doc = Html::parse_document(html);
    doc.select(&POSTER_ITEM).map(parse_entry).collect()
}

fn parse_entry(item: ElementRef) -> Result<FilmEntry> {
    let poster = item
        .select(&POSTER)
        .next()
        .ok_or(ScrapeError::MissingElement {
            page: PAGE,
            what: "div.poster inside li.poster-container",
        })?;
    let img = poster.select(&IMAGE).next().ok_or(ScrapeError::MissingElement {
        page: PAGE,
        what: "img inside div.poster",
    })?;

    Ok(FilmEntry {
        id: attr(poster, "div", "data-film-id")?,
        slug: attr(poster, "div", "data-film-slug")?,
        name: attr(img, "img", "alt")?,
    })
}

fn attr(el: ElementRef, element: &'static str, name: &'static str) -> Result<String> {
    el.value()
        .attr(name)
        .map(str::to_string)
        .ok_or(ScrapeError::MissingAttribute {
            page: PAGE,
            element,
            attr: name,
        })
}
