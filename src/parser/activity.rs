use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};
use tracing::debug;

static RATING: LazyLock<Selector> = LazyLock::new(|| Selector::parse("span.rating").unwrap());
static NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)?").unwrap());

/// Ratings on a friends-activity page, in document order.
///
/// A rating span carries its value as a class like `rated-8`. Spans with no
/// `marker`-prefixed class, or whose suffix holds no number, are skipped.
pub fn parse(html: &str, marker: &str) -> Vec<f64> {
    let doc = Html::parse_document(html);
    doc.select(&RATING)
        .filter_map(|span| {
            let class = span.value().classes().find(|c| c.starts_with(marker))?;
            let value = rating_value(&class[marker.len()..]);
            if value.is_none() {
                debug!(class, "skipping non-numeric rating marker");
            }
            value
        })
        .collect()
}

fn rating_value(suffix: &str) -> Option<f64> {
    NUMBER_RE.find(suffix)?.as_str().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activity_fixture() {
        let html = std::fs::read_to_string("tests/fixtures/activity_parasite.html").unwrap();
        assert_eq!(parse(&html, "rated-"), vec![8.0, 10.0, 7.0]);
    }

    #[test]
    fn fractional_suffix() {
        let html = r#"<span class="rating rated-3.5"></span><span class="rating rated-4"></span>"#;
        assert_eq!(parse(html, "rated-"), vec![3.5, 4.0]);
    }

    #[test]
    fn skips_unrated_and_non_numeric() {
        let html = r#"
            <span class="rating"></span>
            <span class="rating rated-"></span>
            <span class="rating rated-none"></span>
            <span class="rating rated-6"></span>
            <span class="rated-9">not a rating span</span>
        "#;
        assert_eq!(parse(html, "rated-"), vec![6.0]);
    }

    #[test]
    fn no_ratings() {
        assert!(parse("<p>No friends have rated this film.</p>", "rated-").is_empty());
    }
}
