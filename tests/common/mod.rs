#![allow(dead_code)]

use landed_jobs::environment::EnvironmentConfig;
use landed_jobs::linkedin::{LinkedinSettings, SelectorSet};
use landed_jobs::{build_rocket, AppConfig, DatabaseConfig, JobScraper};
use rocket::local::asynchronous::Client;
use std::path::Path;
use std::sync::OnceLock;

static TRACING: OnceLock<()> = OnceLock::new();

pub fn init_test_tracing() {
    TRACING.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("landed_jobs=debug")
            .with_test_writer()
            .try_init();
    });
}

pub fn test_config(dir: &Path) -> AppConfig {
    AppConfig {
        environment: "test".to_string(),
        server: EnvironmentConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            data_dir: dir.join("data"),
            database_path: dir.join("data").join("landed_jobs.db"),
            cors_origins: vec!["http://localhost:3000".to_string()],
        },
        linkedin: LinkedinSettings::default(),
    }
}

/// A scraper that can never reach the real LinkedIn: the host is pinned to
/// the loopback interface, where nothing serves TLS for it.
pub fn offline_scraper() -> JobScraper {
    let client = reqwest::Client::builder()
        .resolve("www.linkedin.com", "127.0.0.1:443".parse().unwrap())
        .build()
        .unwrap();
    JobScraper::with_client(client, SelectorSet::default()).unwrap()
}

pub async fn test_client(dir: &Path) -> Client {
    test_client_with_config(test_config(dir)).await
}

pub async fn test_client_with_config(config: AppConfig) -> Client {
    init_test_tracing();

    let mut db_config = DatabaseConfig::new(config.server.database_path.clone());
    db_config.init_pool().await.unwrap();
    db_config.migrate().await.unwrap();

    let rocket = build_rocket(&config, db_config, offline_scraper());
    Client::tracked(rocket).await.expect("valid rocket instance")
}
