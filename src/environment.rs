// src/environment.rs
use crate::linkedin::LinkedinSettings;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Per-environment section of `config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    pub database_path: PathBuf,
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    local: EnvironmentConfig,
    production: EnvironmentConfig,
    #[serde(default)]
    linkedin: LinkedinSettings,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: String,
    pub server: EnvironmentConfig,
    pub linkedin: LinkedinSettings,
}

impl AppConfig {
    /// Load `config_path`, picking the section for `environment` (or the
    /// one named by the environment variables when `None`).
    pub fn load(config_path: &Path, environment: Option<&str>) -> Result<Self> {
        let environment = environment
            .map(str::to_string)
            .unwrap_or_else(Self::get_environment);
        info!(
            "Loading configuration for environment: {} from {}",
            environment,
            config_path.display()
        );

        if !config_path.exists() {
            anyhow::bail!(
                "{} not found. Server cannot start without configuration.",
                config_path.display()
            );
        }

        let config_content = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let mut config = Self::from_yaml(&config_content, &environment)?;
        config.apply_cors_override(std::env::var("CORS_ORIGINS").ok());
        Ok(config)
    }

    pub fn from_yaml(content: &str, environment: &str) -> Result<Self> {
        let config_file: ConfigFile =
            serde_yaml::from_str(content).context("Failed to parse configuration")?;

        let env_config = match environment {
            "production" => config_file.production,
            _ => config_file.local,
        };

        Ok(Self {
            environment: environment.to_string(),
            server: EnvironmentConfig {
                data_dir: Self::resolve_path(&env_config.data_dir)?,
                database_path: Self::resolve_path(&env_config.database_path)?,
                ..env_config
            },
            linkedin: config_file.linkedin,
        })
    }

    fn get_environment() -> String {
        std::env::var("LANDED_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .or_else(|_| std::env::var("ENV"))
            .unwrap_or_else(|_| "local".to_string())
    }

    fn resolve_path(path: &Path) -> Result<PathBuf> {
        if path.is_absolute() {
            Ok(path.to_path_buf())
        } else {
            let current_dir = std::env::current_dir().context("Failed to get current directory")?;
            Ok(current_dir.join(path))
        }
    }

    /// Replace the configured origins with a comma-separated list.
    pub fn apply_cors_override(&mut self, origins: Option<String>) {
        if let Some(origins) = origins {
            self.server.cors_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(str::to_string)
                .collect();
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.server.port = port;
        self
    }

    pub async fn ensure_directories(&self) -> Result<()> {
        crate::utils::ensure_directory(&self.server.data_dir).await?;

        if let Some(db_parent) = self.server.database_path.parent() {
            crate::utils::ensure_directory(db_parent).await?;
        }

        info!("All configured directories ensured to exist");
        Ok(())
    }
}
