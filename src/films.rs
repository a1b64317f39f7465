use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::Result;
use crate::fetch::Fetch;
use crate::parser;
use crate::settings::Settings;
use crate::tags::TagSet;

/// Wins recorded for a tag that carries no count.
pub const DEFAULT_WINS: &str = "1";

/// One row per film per matching tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilmRecord {
    #[serde(rename = "Winner")]
    pub winner: String,
    #[serde(rename = "Wins")]
    pub wins: String,
    #[serde(rename = "Film Name")]
    pub film_name: String,
    #[serde(rename = "Film ID")]
    pub film_id: String,
    #[serde(rename = "Film Slug")]
    pub film_slug: String,
    #[serde(rename = "Film Link")]
    pub film_link: String,
}

/// Split tag text into (winner, wins) on the first `delimiter`.
/// Both halves are kept verbatim.
pub fn split_tag(text: &str, delimiter: &str) -> (String, String) {
    match text.split_once(delimiter) {
        Some((winner, wins)) => (winner.to_string(), wins.to_string()),
        None => (text.to_string(), DEFAULT_WINS.to_string()),
    }
}

/// Fetch every tag page and build the film table, tag by tag in tag order.
pub fn collect(
    fetcher: &dyn Fetch,
    settings: &Settings,
    tags: &TagSet,
) -> Result<Vec<FilmRecord>> {
    let mut rows = Vec::new();

    for tag in tags.iter() {
        let url = settings.tag_page_url(&tag.link);
        let html = fetcher.get(&url)?;
        let entries = parser::films::parse(&html)?;
        debug!(tag = %tag.name, films = entries.len(), "tag page parsed");

        let (winner, wins) = split_tag(&tag.name, &settings.tag_delimiter);
        rows.extend(entries.into_iter().map(|film| FilmRecord {
            winner: winner.clone(),
            wins: wins.clone(),
            film_link: settings.film_url(&film.slug),
            film_name: film.name,
            film_id: film.id,
            film_slug: film.slug,
        }));
    }

    info!("Collected {} film rows from {} tags", rows.len(), tags.len());
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScrapeError;
    use crate::fetch::testing::FixtureFetcher;
    use crate::tags::Tag;

    const DELIM: &str = "   ";

    fn settings() -> Settings {
        Settings {
            base_url: "https://lb.test".into(),
            group: "club".into(),
            ..Default::default()
        }
    }

    fn tag_set(tags: &[(&str, &str)]) -> TagSet {
        let mut set = TagSet::default();
        for (name, link) in tags {
            set.insert(Tag {
                name: name.to_string(),
                link: link.to_string(),
            });
        }
        set
    }

    #[test]
    fn split_with_count() {
        assert_eq!(
            split_tag("Best Picture   12", DELIM),
            ("Best Picture".to_string(), "12".to_string())
        );
    }

    #[test]
    fn split_without_count_defaults_to_one() {
        assert_eq!(
            split_tag("Best Picture", DELIM),
            ("Best Picture".to_string(), "1".to_string())
        );
    }

    #[test]
    fn split_on_first_delimiter_only() {
        let (winner, wins) = split_tag("Palme d'Or   2   extra", DELIM);
        assert_eq!(winner, "Palme d'Or");
        assert_eq!(wins, "2   extra");
    }

    #[test]
    fn single_spaces_are_not_the_delimiter() {
        let (winner, wins) = split_tag("Best Picture 12", DELIM);
        assert_eq!(winner, "Best Picture 12");
        assert_eq!(wins, DEFAULT_WINS);
    }

    #[test]
    fn rows_per_tag_and_film() {
        let fetcher = FixtureFetcher::default()
            .with_fixture("https://lb.test/club/tag/best-picture/", "tag_best_picture")
            .with_fixture("https://lb.test/club/tag/best-director/", "tag_best_director");
        let tags = tag_set(&[
            ("Best Picture   3", "/club/tag/best-picture/"),
            ("Best Director", "/club/tag/best-director/"),
        ]);

        let rows = collect(&fetcher, &settings(), &tags).unwrap();
        assert_eq!(rows.len(), 5);

        assert_eq!(
            rows[0],
            FilmRecord {
                winner: "Best Picture".into(),
                wins: "3".into(),
                film_name: "Parasite".into(),
                film_id: "426406".into(),
                film_slug: "parasite-2019".into(),
                film_link: "https://lb.test/film/parasite-2019".into(),
            }
        );
        assert!(rows[3..].iter().all(|r| r.winner == "Best Director" && r.wins == "1"));

        // Parasite is under both tags and appears once for each.
        let parasite = rows.iter().filter(|r| r.film_slug == "parasite-2019").count();
        assert_eq!(parasite, 2);
    }

    #[test]
    fn tag_page_failure_aborts() {
        let fetcher = FixtureFetcher::default()
            .with_fixture("https://lb.test/club/tag/best-picture/", "tag_best_picture");
        let tags = tag_set(&[
            ("Best Picture   3", "/club/tag/best-picture/"),
            ("Gone   1", "/club/tag/gone/"),
        ]);
        assert!(matches!(
            collect(&fetcher, &settings(), &tags),
            Err(ScrapeError::Status { status: 404, .. })
        ));
    }
}
