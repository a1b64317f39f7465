use std::collections::HashMap;

use tracing::info;

use crate::error::{Result, ScrapeError};
use crate::fetch::Fetch;
use crate::parser;
use crate::settings::Settings;

#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    pub name: String,
    pub link: String,
}

/// Tags keyed by name, in first-seen order. Re-inserting a name keeps its
/// position and replaces the link.
#[derive(Debug, Default)]
pub struct TagSet {
    tags: Vec<Tag>,
    index: HashMap<String, usize>,
}

impl TagSet {
    pub fn insert(&mut self, tag: Tag) {
        match self.index.get(&tag.name) {
            Some(&i) => self.tags[i].link = tag.link,
            None => {
                self.index.insert(tag.name.clone(), self.tags.len());
                self.tags.push(tag);
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.tags.iter()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

pub fn matches_keyword(name: &str, keyword: &str) -> bool {
    name.to_lowercase().contains(&keyword.to_lowercase())
}

/// Fetch the group's tag listing and keep the tags matching the keyword.
pub fn discover(fetcher: &dyn Fetch, settings: &Settings) -> Result<TagSet> {
    let url = settings.tags_url();
    info!("Fetching tags: {}", url);
    let html = fetcher.get(&url)?;

    let mut tags = TagSet::default();
    for entry in parser::tags::parse(&html) {
        if !matches_keyword(&entry.name, &settings.tag_keyword) {
            continue;
        }
        let link = entry.link.ok_or(ScrapeError::MissingElement {
            page: "tags",
            what: "a[href] inside li.hoverable",
        })?;
        tags.insert(Tag {
            name: entry.name,
            link,
        });
    }

    info!("Tags matching {:?}: {}", settings.tag_keyword, tags.len());
    Ok(tags)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::testing::FixtureFetcher;

    fn settings() -> Settings {
        Settings {
            base_url: "https://lb.test".into(),
            group: "club".into(),
            ..Default::default()
        }
    }

    #[test]
    fn keyword_is_case_insensitive() {
        assert!(matches_keyword("Jury WINNER", "win"));
        assert!(matches_keyword("Best Picture Wins   2", "WIN"));
        assert!(matches_keyword("winter classics", "win"));
        assert!(!matches_keyword("horror", "win"));
    }

    #[test]
    fn discover_filters_listing() {
        let fetcher = FixtureFetcher::default().with_fixture("https://lb.test/club/tags/", "tags");
        let tags = discover(&fetcher, &settings()).unwrap();
        let names: Vec<&str> = tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Best Picture Win   3", "Best Director Win", "Jury WINNER"]);
    }

    #[test]
    fn duplicate_name_keeps_last_link() {
        let fetcher = FixtureFetcher::default().with_fixture("https://lb.test/club/tags/", "tags");
        let tags = discover(&fetcher, &settings()).unwrap();
        let picture = tags.iter().next().unwrap();
        assert_eq!(picture.link, "/club/tag/best-picture-win-3-b/");
    }

    #[test]
    fn unmatched_tag_without_link_is_ignored() {
        let html = r#"<li class="hoverable">horror</li>
            <li class="hoverable"><a href="/club/tag/win/">win</a></li>"#;
        let fetcher = FixtureFetcher::default().with("https://lb.test/club/tags/", html);
        assert_eq!(discover(&fetcher, &settings()).unwrap().len(), 1);
    }

    #[test]
    fn matched_tag_without_link_fails() {
        let html = r#"<li class="hoverable">big win</li>"#;
        let fetcher = FixtureFetcher::default().with("https://lb.test/club/tags/", html);
        assert!(matches!(
            discover(&fetcher, &settings()),
            Err(ScrapeError::MissingElement { page: "tags", .. })
        ));
    }

    #[test]
    fn listing_fetch_failure_propagates() {
        let fetcher = FixtureFetcher::default();
        assert!(matches!(
            discover(&fetcher, &settings()),
            Err(ScrapeError::Status { status: 404, .. })
        ));
    }
}
