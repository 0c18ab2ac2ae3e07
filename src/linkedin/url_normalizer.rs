// src/linkedin/url_normalizer.rs
//! Turns the LinkedIn job links people paste (search pages, collections,
//! direct postings) into the single job-view URL the scraper understands.

use std::fmt;
use thiserror::Error;
use tracing::error;
use url::Url;

pub const LINKEDIN_HOST: &str = "www.linkedin.com";
const JOB_ID_PARAM: &str = "currentJobId";
const JOB_VIEW_PREFIX: &str = "/jobs/view/";

/// A `https://www.linkedin.com/jobs/view/{id}/` URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalJobUrl {
    url: String,
    job_id: String,
}

impl CanonicalJobUrl {
    fn from_job_id(job_id: &str) -> Self {
        Self {
            url: format!("https://{}{}{}/", LINKEDIN_HOST, JOB_VIEW_PREFIX, job_id),
            job_id: job_id.to_string(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.url
    }

    pub fn job_id(&self) -> &str {
        &self.job_id
    }
}

impl fmt::Display for CanonicalJobUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

impl AsRef<str> for CanonicalJobUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

/// Why a link was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlRejection {
    #[error("could not parse URL: {0}")]
    Unparseable(String),
    #[error("URL must be from www.linkedin.com, got: {0}")]
    WrongHost(String),
    #[error("currentJobId parameter not found in URL")]
    MissingJobIdParam,
    #[error("Job ID not found in /jobs/view/ URL")]
    MissingJobIdSegment,
    #[error("Invalid job ID: {0}")]
    NonNumericJobId(String),
    #[error("Unsupported LinkedIn URL format. Expected /jobs/collections/ or /jobs/view/, got: {0}")]
    UnsupportedPath(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid LinkedIn job URL: {reason}")]
pub struct InvalidUrlError {
    reason: UrlRejection,
}

impl InvalidUrlError {
    pub fn reason(&self) -> &UrlRejection {
        &self.reason
    }
}

impl From<UrlRejection> for InvalidUrlError {
    fn from(reason: UrlRejection) -> Self {
        Self { reason }
    }
}

/// Validate a LinkedIn job link and rewrite it to its canonical job-view form.
///
/// Two shapes are accepted: any `www.linkedin.com` URL carrying a
/// `currentJobId` query parameter (the value is taken as-is), and
/// `/jobs/view/<digits>/...` paths.
pub fn normalize(raw: &str) -> Result<CanonicalJobUrl, InvalidUrlError> {
    extract_job_id(raw)
        .map(|job_id| CanonicalJobUrl::from_job_id(&job_id))
        .map_err(|reason| {
            error!("LinkedIn URL validation failed for {}: {}", raw, reason);
            InvalidUrlError::from(reason)
        })
}

fn extract_job_id(raw: &str) -> Result<String, UrlRejection> {
    let parsed = Url::parse(raw).map_err(|e| UrlRejection::Unparseable(e.to_string()))?;

    // Host and path are checked as written; `Url` normalizes both.
    let (netloc, path) = split_netloc_and_path(raw);
    if netloc != LINKEDIN_HOST {
        return Err(UrlRejection::WrongHost(netloc.to_string()));
    }

    if raw.contains(JOB_ID_PARAM) {
        return parsed
            .query_pairs()
            .find(|(key, value)| key == JOB_ID_PARAM && !value.is_empty())
            .map(|(_, value)| value.into_owned())
            .ok_or(UrlRejection::MissingJobIdParam);
    }

    if !path.starts_with(JOB_VIEW_PREFIX) {
        return Err(UrlRejection::UnsupportedPath(path.to_string()));
    }

    let job_id = path
        .trim_matches('/')
        .split('/')
        .nth(2)
        .filter(|segment| !segment.is_empty())
        .ok_or(UrlRejection::MissingJobIdSegment)?;

    if !job_id.bytes().all(|b| b.is_ascii_digit()) {
        return Err(UrlRejection::NonNumericJobId(job_id.to_string()));
    }

    Ok(job_id.to_string())
}

/// Network location and path exactly as they appear in `raw`: the
/// authority runs from `//` to the first `/`, `?` or `#`, the path from
/// there to the first `?` or `#`.
fn split_netloc_and_path(raw: &str) -> (&str, &str) {
    let after_scheme = raw.split_once(':').map_or(raw, |(_, rest)| rest);

    let (netloc, rest) = match after_scheme.strip_prefix("//") {
        Some(hierarchy) => {
            let end = hierarchy
                .find(&['/', '?', '#'][..])
                .unwrap_or(hierarchy.len());
            hierarchy.split_at(end)
        }
        None => ("", after_scheme),
    };

    let path_end = rest.find(&['?', '#'][..]).unwrap_or(rest.len());
    (netloc, &rest[..path_end])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejection(raw: &str) -> UrlRejection {
        normalize(raw).unwrap_err().reason().clone()
    }

    #[test]
    fn test_job_view_url_is_already_canonical() {
        let url = normalize("https://www.linkedin.com/jobs/view/123456789/").unwrap();
        assert_eq!(url.as_str(), "https://www.linkedin.com/jobs/view/123456789/");
        assert_eq!(url.job_id(), "123456789");
    }

    #[test]
    fn test_job_view_url_drops_trailing_segments_and_query() {
        let url =
            normalize("https://www.linkedin.com/jobs/view/987/apply/?refId=abc&trk=x").unwrap();
        assert_eq!(url.as_str(), "https://www.linkedin.com/jobs/view/987/");

        let url = normalize("https://www.linkedin.com/jobs/view/555").unwrap();
        assert_eq!(url.as_str(), "https://www.linkedin.com/jobs/view/555/");
    }

    #[test]
    fn test_current_job_id_query_is_rewritten() {
        let url = normalize("https://www.linkedin.com/jobs/search?currentJobId=42&other=1").unwrap();
        assert_eq!(url.as_str(), "https://www.linkedin.com/jobs/view/42/");

        let url = normalize(
            "https://www.linkedin.com/jobs/collections/recommended/?currentJobId=3912345678",
        )
        .unwrap();
        assert_eq!(url.to_string(), "https://www.linkedin.com/jobs/view/3912345678/");
    }

    #[test]
    fn test_current_job_id_is_not_digit_checked() {
        let url = normalize("https://www.linkedin.com/jobs/search?currentJobId=abc").unwrap();
        assert_eq!(url.job_id(), "abc");
    }

    #[test]
    fn test_first_non_blank_current_job_id_wins() {
        let url = normalize(
            "https://www.linkedin.com/jobs/search?currentJobId=&currentJobId=7&currentJobId=8",
        )
        .unwrap();
        assert_eq!(url.job_id(), "7");
    }

    #[test]
    fn test_blank_current_job_id_is_rejected() {
        assert_eq!(
            rejection("https://www.linkedin.com/jobs/search?currentJobId="),
            UrlRejection::MissingJobIdParam
        );
    }

    #[test]
    fn test_current_job_id_outside_query_is_rejected() {
        assert_eq!(
            rejection("https://www.linkedin.com/jobs/currentJobId/"),
            UrlRejection::MissingJobIdParam
        );
    }

    #[test]
    fn test_other_hosts_are_rejected() {
        for raw in [
            "https://linkedin.com/jobs/view/123/",
            "https://example.com/jobs/view/123/",
            "https://de.linkedin.com/jobs/view/123/",
            "https://www.linkedin.com.evil.io/jobs/view/123/",
            "https://www.linkedin.com:8443/jobs/view/123/",
            "https://user@www.linkedin.com/jobs/view/123/",
            "https://www.linkedin.com:443/jobs/view/123/",
            "https://WWW.LINKEDIN.COM/jobs/view/123/",
            "https://www.linked%69n.com/jobs/view/123/",
            "https://www.linkedin.com\\jobs\\view\\123",
        ] {
            assert!(
                matches!(rejection(raw), UrlRejection::WrongHost(_)),
                "expected host rejection for {}",
                raw
            );
        }
    }

    #[test]
    fn test_wrong_host_message_names_the_host() {
        let err = normalize("https://example.com:8080/jobs/view/1/").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid LinkedIn job URL: URL must be from www.linkedin.com, got: example.com:8080"
        );
    }

    #[test]
    fn test_non_numeric_job_id_is_rejected() {
        assert_eq!(
            rejection("https://www.linkedin.com/jobs/view/abc/"),
            UrlRejection::NonNumericJobId("abc".to_string())
        );
        assert_eq!(
            rejection("https://www.linkedin.com/jobs/view/12a3/"),
            UrlRejection::NonNumericJobId("12a3".to_string())
        );
    }

    #[test]
    fn test_missing_job_id_segment_is_rejected() {
        assert_eq!(
            rejection("https://www.linkedin.com/jobs/view/"),
            UrlRejection::MissingJobIdSegment
        );
        assert_eq!(
            rejection("https://www.linkedin.com/jobs/view//123/"),
            UrlRejection::MissingJobIdSegment
        );
    }

    #[test]
    fn test_unsupported_path_is_rejected() {
        assert_eq!(
            rejection("https://www.linkedin.com/in/someone/"),
            UrlRejection::UnsupportedPath("/in/someone/".to_string())
        );
        assert_eq!(
            rejection("https://www.linkedin.com/jobs/search?keywords=rust"),
            UrlRejection::UnsupportedPath("/jobs/search".to_string())
        );
        assert_eq!(
            rejection("https://www.linkedin.com/in/x/../../jobs/view/123/"),
            UrlRejection::UnsupportedPath("/in/x/../../jobs/view/123/".to_string())
        );
    }

    #[test]
    fn test_host_is_reported_as_written() {
        assert_eq!(
            rejection("https://WWW.LINKEDIN.COM/jobs/view/123/"),
            UrlRejection::WrongHost("WWW.LINKEDIN.COM".to_string())
        );
        assert_eq!(
            rejection("https://www.linkedin.com:443/jobs/view/123/"),
            UrlRejection::WrongHost("www.linkedin.com:443".to_string())
        );
    }

    #[test]
    fn test_percent_escapes_in_path_are_not_decoded() {
        assert_eq!(
            rejection("https://www.linkedin.com/jobs/view/%31%32/"),
            UrlRejection::NonNumericJobId("%31%32".to_string())
        );
    }

    #[test]
    fn test_split_netloc_and_path() {
        assert_eq!(
            split_netloc_and_path("https://www.linkedin.com/jobs/view/1/?a=b#c"),
            ("www.linkedin.com", "/jobs/view/1/")
        );
        assert_eq!(
            split_netloc_and_path("https://www.linkedin.com?currentJobId=1"),
            ("www.linkedin.com", "")
        );
        assert_eq!(split_netloc_and_path("mailto:someone"), ("", "someone"));
    }

    #[test]
    fn test_unparseable_input_is_a_validation_error() {
        let err = normalize("not a url").unwrap_err();
        assert!(matches!(err.reason(), UrlRejection::Unparseable(_)));
        assert!(err.to_string().starts_with("Invalid LinkedIn job URL: "));
    }
}
