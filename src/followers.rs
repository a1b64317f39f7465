use tracing::info;

use crate::error::Result;
use crate::fetch::Fetch;
use crate::parser;
use crate::settings::Settings;

/// Usernames on the first page of the group's followers.
pub fn list(fetcher: &dyn Fetch, settings: &Settings) -> Result<Vec<String>> {
    let url = settings.followers_url();
    info!("Fetching followers: {}", url);
    let followers = parser::followers::parse(&fetcher.get(&url)?)?;
    info!("Found {} followers", followers.len());
    Ok(followers)
}
