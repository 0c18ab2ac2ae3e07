//! Job-description intake for Landed Job: accepts pasted job descriptions or
//! LinkedIn job links, scrapes the linked postings and stores the result
//! against a resume.

pub mod database;
pub mod environment;
pub mod linkedin;
pub mod utils;
pub mod web;

pub use database::{DatabaseConfig, JobRecord, JobRepository};
pub use environment::AppConfig;
pub use linkedin::{normalize, CanonicalJobUrl, InvalidUrlError, JobDetails, JobScraper};
pub use web::{build_rocket, start_web_server};
