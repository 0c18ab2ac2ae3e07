// src/linkedin/job_scraper.rs
use super::types::{JobDetails, SelectorSet};
use anyhow::{Context, Result};
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use tracing::{error, info, warn};

/// Fetches public LinkedIn job pages and pulls out the description and the
/// hiring company.
///
/// Fetching is fail-soft: whatever goes wrong, [`JobScraper::fetch`] hands
/// back a [`JobDetails`] (empty when nothing could be read) and logs the
/// cause.
#[derive(Debug, Clone)]
pub struct JobScraper {
    client: Client,
    selectors: JobSelectors,
}

impl JobScraper {
    pub fn new(selectors: SelectorSet) -> Result<Self> {
        Self::with_client(Client::new(), selectors)
    }

    /// Use a caller-provided client. Timeouts, proxies and redirect policy
    /// are whatever that client was built with.
    pub fn with_client(client: Client, selectors: SelectorSet) -> Result<Self> {
        Ok(Self {
            client,
            selectors: JobSelectors::parse(&selectors)?,
        })
    }

    pub async fn fetch(&self, url: impl AsRef<str>) -> JobDetails {
        let url = url.as_ref();

        match self.try_fetch(url).await {
            Ok(details) => {
                info!(
                    "Extracted job from {} (description: {} chars, company: {})",
                    url,
                    details.description.len(),
                    details.company_name.as_deref().unwrap_or("unknown")
                );
                details
            }
            Err(e) => {
                error!("Error parsing job details from {}: {:#}", url, e);
                JobDetails::default()
            }
        }
    }

    async fn try_fetch(&self, url: &str) -> Result<JobDetails> {
        info!("Fetching job post: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to fetch job post")?;

        // Error pages are parsed like any other; they simply yield nothing.
        let status = response.status();
        if !status.is_success() {
            warn!("Job post {} answered with HTTP {}", url, status);
        }

        let html = response
            .text()
            .await
            .context("Failed to read response body")?;

        Ok(extract_job_details(&html, &self.selectors))
    }
}

/// A [`SelectorSet`] compiled once, up front.
#[derive(Debug, Clone)]
pub struct JobSelectors {
    description: Selector,
    company_link: Selector,
    company_fallback: Selector,
}

impl JobSelectors {
    pub fn parse(selectors: &SelectorSet) -> Result<Self> {
        Ok(Self {
            description: parse_selector("description", &selectors.description)?,
            company_link: parse_selector("company_link", &selectors.company_link)?,
            company_fallback: parse_selector("company_fallback", &selectors.company_fallback)?,
        })
    }
}

/// Pull the description and company name out of a job page.
///
/// The description is the full text of the first description container,
/// untouched. The company name is the trimmed text of the company link, or
/// of the fallback byline when the link is missing or blank.
pub fn extract_job_details(html: &str, selectors: &JobSelectors) -> JobDetails {
    let document = Html::parse_document(html);

    let description = document
        .select(&selectors.description)
        .next()
        .map(element_text)
        .unwrap_or_default();

    let company_name = first_trimmed_text(&document, &selectors.company_link)
        .or_else(|| first_trimmed_text(&document, &selectors.company_fallback));

    JobDetails {
        description,
        company_name,
    }
}

fn first_trimmed_text(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .next()
        .map(|element| element_text(element).trim().to_string())
        .filter(|text| !text.is_empty())
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

fn parse_selector(name: &str, selector: &str) -> Result<Selector> {
    Selector::parse(selector)
        .map_err(|e| anyhow::anyhow!("Invalid {} selector '{}': {:?}", name, selector, e))
}
