use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

const ENV_PREFIX: &str = "BOXD";

/// Run settings, layered as defaults < config file < `BOXD_*` env vars.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Site root, no trailing slash required.
    pub base_url: String,
    /// Account whose tags, followers and friends activity are scraped.
    pub group: String,
    /// Case-insensitive substring a tag must contain to be kept.
    pub tag_keyword: String,
    /// Separates winner name from wins count inside a tag.
    pub tag_delimiter: String,
    /// Class prefix on rating spans, followed by the numeric rating.
    pub rating_marker: String,
    pub films_csv: PathBuf,
    pub ratings_csv: PathBuf,
    pub timeout_secs: u64,
    /// Fetch each distinct slug's activity page once instead of once per row.
    pub dedupe_slugs: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: "https://letterboxd.com".into(),
            group: "718cinemaclub".into(),
            tag_keyword: "win".into(),
            tag_delimiter: "   ".into(),
            rating_marker: "rated-".into(),
            films_csv: PathBuf::from("movies_by_tag.csv"),
            ratings_csv: PathBuf::from("ratings_by_movie.csv"),
            timeout_secs: 30,
            dedupe_slugs: false,
        }
    }
}

impl Settings {
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(File::from(path));
        }
        builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .context("Failed to load settings")?
            .try_deserialize()
            .context("Invalid settings")
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    pub fn tags_url(&self) -> String {
        format!("{}/{}/tags/", self.base(), self.group)
    }

    pub fn followers_url(&self) -> String {
        format!("{}/{}/followers/", self.base(), self.group)
    }

    /// Tag links on the listing page are site-relative.
    pub fn tag_page_url(&self, link: &str) -> String {
        format!("{}{}", self.base(), link)
    }

    pub fn film_url(&self, slug: &str) -> String {
        format!("{}/film/{}", self.base(), slug)
    }

    pub fn activity_url(&self, slug: &str) -> String {
        format!("{}/{}/friends/film/{}/", self.base(), self.group, slug)
    }
}
