use thiserror::Error;

/// Failures while fetching or reading a site page.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("{page} page: missing {what}")]
    MissingElement {
        page: &'static str,
        what: &'static str,
    },

    #[error("{page} page: <{element}> has no `{attr}` attribute")]
    MissingAttribute {
        page: &'static str,
        element: &'static str,
        attr: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
