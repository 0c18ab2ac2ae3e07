// src/utils.rs
use anyhow::{Context, Result};
use std::path::Path;

/// Whether a submitted job description is a link rather than pasted text
pub fn looks_like_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

/// Links that should go through LinkedIn normalization and scraping.
/// Anything else, URL or not, is stored as plain text.
pub fn is_linkedin_job_link(input: &str) -> bool {
    looks_like_url(input) && input.contains("linkedin.com/jobs")
}

/// Ensure directory exists
pub async fn ensure_directory(path: &Path) -> Result<()> {
    tokio::fs::create_dir_all(path)
        .await
        .with_context(|| format!("Failed to create directory: {}", path.display()))
}
