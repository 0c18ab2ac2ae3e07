// src/linkedin/mod.rs
use serde::Deserialize;

pub mod job_scraper;
pub mod types;
pub mod url_normalizer;

pub use job_scraper::{extract_job_details, JobScraper, JobSelectors};
pub use types::{JobDetails, SelectorSet};
pub use url_normalizer::{normalize, CanonicalJobUrl, InvalidUrlError, UrlRejection};

/// `linkedin:` section of `config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LinkedinSettings {
    pub selectors: SelectorSet,
}
