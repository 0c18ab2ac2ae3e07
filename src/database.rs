// src/database.rs
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use std::path::PathBuf;
use tracing::{info, warn};
use uuid::Uuid;

/// A stored job description, tied to the resume it was uploaded for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct JobRecord {
    pub job_id: String,
    pub content: String,
    pub resume_id: String,
    pub company_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct DatabaseConfig {
    pub database_path: PathBuf,
    pub pool: Option<SqlitePool>,
}

impl DatabaseConfig {
    pub fn new(database_path: PathBuf) -> Self {
        Self {
            database_path,
            pool: None,
        }
    }

    /// Initialize the database connection pool
    pub async fn init_pool(&mut self) -> Result<()> {
        if let Some(parent) = self.database_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .context("Failed to create database directory")?;
        }

        let database_url = format!("sqlite:{}?mode=rwc", self.database_path.display());

        let pool = SqlitePool::connect(&database_url)
            .await
            .with_context(|| {
                format!(
                    "Failed to connect to database: {}",
                    self.database_path.display()
                )
            })?;
        self.pool = Some(pool);

        info!("Database connection pool initialized: {}", database_url);
        Ok(())
    }

    /// Get the database pool
    pub fn pool(&self) -> Result<&SqlitePool> {
        self.pool.as_ref().ok_or_else(|| {
            anyhow::anyhow!("Database pool not initialized. Call init_pool() first.")
        })
    }

    /// Run database migrations
    pub async fn migrate(&self) -> Result<()> {
        let pool = self.pool()?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS jobs (
                job_id TEXT PRIMARY KEY NOT NULL,
                content TEXT NOT NULL,
                resume_id TEXT NOT NULL,
                company_name TEXT,
                created_at TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await
        .context("Failed to create jobs table")?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_jobs_resume_id ON jobs(resume_id);")
            .execute(pool)
            .await
            .context("Failed to create jobs index")?;

        info!("Database migrations completed successfully");
        Ok(())
    }

    pub async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(self.pool()?)
            .await
            .context("Database health check failed")?;
        Ok(())
    }

    /// Close the pool, waiting for checked-out connections to come back.
    pub async fn close(&self) {
        match &self.pool {
            Some(pool) => {
                pool.close().await;
                info!("Database connection pool closed");
            }
            None => warn!("Database pool was never initialized; nothing to close"),
        }
    }
}

pub struct JobRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> JobRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create_job(
        &self,
        content: &str,
        resume_id: &str,
        company_name: Option<&str>,
    ) -> Result<JobRecord> {
        let job = JobRecord {
            job_id: Uuid::new_v4().to_string(),
            content: content.to_string(),
            resume_id: resume_id.to_string(),
            company_name: company_name.map(str::to_string),
            created_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO jobs (job_id, content, resume_id, company_name, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&job.job_id)
        .bind(&job.content)
        .bind(&job.resume_id)
        .bind(&job.company_name)
        .bind(job.created_at)
        .execute(self.pool)
        .await
        .context("Failed to insert job")?;

        info!(
            "Created job {} for resume {} (company: {})",
            job.job_id,
            job.resume_id,
            job.company_name.as_deref().unwrap_or("unknown")
        );
        Ok(job)
    }

    pub async fn get_job(&self, job_id: &str) -> Result<Option<JobRecord>> {
        let job = sqlx::query_as::<_, JobRecord>(
            r#"
            SELECT job_id, content, resume_id, company_name, created_at
            FROM jobs
            WHERE job_id = ?
            "#,
        )
        .bind(job_id)
        .fetch_optional(self.pool)
        .await
        .with_context(|| format!("Failed to load job {}", job_id))?;

        Ok(job)
    }
}
