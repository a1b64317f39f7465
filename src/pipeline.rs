use tracing::{info, warn};

use crate::error::Result;
use crate::fetch::Fetch;
use crate::films::{self, FilmRecord};
use crate::ratings::{self, RatingSummary};
use crate::settings::Settings;
use crate::tags;

/// Both output tables of one run.
pub struct Report {
    pub films: Vec<FilmRecord>,
    pub ratings: Vec<RatingSummary>,
}

/// Tags → films → friends' ratings → summary. Any failure aborts the run.
pub fn run(fetcher: &dyn Fetch, settings: &Settings) -> Result<Report> {
    let tags = tags::discover(fetcher, settings)?;
    if tags.is_empty() {
        warn!("No tags contain {:?}", settings.tag_keyword);
    }

    let films = films::collect(fetcher, settings, &tags)?;
    let observed = ratings::collect(fetcher, settings, &films)?;
    let ratings = ratings::summarize(&observed);
    info!("Summarized ratings for {} films", ratings.len());

    Ok(Report { films, ratings })
}
