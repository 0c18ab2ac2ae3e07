// src/linkedin/types.rs
use serde::Deserialize;

/// What a job page yielded. The default value is the degraded result
/// returned when fetching or parsing fails.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobDetails {
    pub description: String,
    pub company_name: Option<String>,
}

impl JobDetails {
    pub fn has_description(&self) -> bool {
        !self.description.is_empty()
    }
}

/// CSS selectors for LinkedIn's public job page markup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SelectorSet {
    pub description: String,
    pub company_link: String,
    pub company_fallback: String,
}

impl Default for SelectorSet {
    fn default() -> Self {
        Self {
            description: "div.description__text".to_string(),
            company_link: "a.topcard__org-name-link".to_string(),
            company_fallback: "span.topcard__flavor".to_string(),
        }
    }
}
