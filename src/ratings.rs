use std::collections::HashMap;

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::fetch::Fetch;
use crate::films::FilmRecord;
use crate::parser;
use crate::settings::Settings;

/// Rating values per film slug, in first-seen slug order.
#[derive(Debug, Default)]
pub struct Ratings {
    entries: Vec<(String, Vec<f64>)>,
    index: HashMap<String, usize>,
}

impl Ratings {
    /// Store `values` for `slug`, replacing any earlier observation in place.
    pub fn insert(&mut self, slug: &str, values: Vec<f64>) {
        match self.index.get(slug) {
            Some(&i) => self.entries[i].1 = values,
            None => {
                self.index.insert(slug.to_string(), self.entries.len());
                self.entries.push((slug.to_string(), values));
            }
        }
    }

    #[cfg(test)]
    pub fn get(&self, slug: &str) -> Option<&[f64]> {
        self.index.get(slug).map(|&i| self.entries[i].1.as_slice())
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.index.contains_key(slug)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.entries.iter().map(|(s, v)| (s.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Ratings table row. "Film Title" holds the film slug.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingSummary {
    #[serde(rename = "Film Title")]
    pub slug: String,
    #[serde(rename = "Average Rating")]
    pub average: f64,
    #[serde(rename = "Number of Ratings")]
    pub count: usize,
}

/// Arithmetic mean, 0 for no values.
pub fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Fetch the friends-activity page for every film row.
///
/// A slug listed under several tags is fetched once per row unless
/// `settings.dedupe_slugs` is set; the last fetch is the one kept.
pub fn collect(
    fetcher: &dyn Fetch,
    settings: &Settings,
    films: &[FilmRecord],
) -> Result<Ratings> {
    let pb = ProgressBar::new(films.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("=> "),
    );

    let mut ratings = Ratings::default();
    let mut fetched = 0usize;

    for film in films {
        let slug = film.film_slug.as_str();
        pb.set_message(slug.to_string());
        if settings.dedupe_slugs && ratings.contains(slug) {
            pb.inc(1);
            continue;
        }

        let html = fetcher
            .get(&settings.activity_url(slug))
            .inspect_err(|_| pb.abandon())?;
        ratings.insert(slug, parser::activity::parse(&html, &settings.rating_marker));
        fetched += 1;
        pb.inc(1);
    }

    pb.finish_and_clear();
    info!(
        "Fetched {} activity pages for {} distinct films",
        fetched,
        ratings.len()
    );
    Ok(ratings)
}

pub fn summarize(ratings: &Ratings) -> Vec<RatingSummary> {
    ratings
        .iter()
        .map(|(slug, values)| RatingSummary {
            slug: slug.to_string(),
            average: average(values),
            count: values.len(),
        })
        .collect()
}
