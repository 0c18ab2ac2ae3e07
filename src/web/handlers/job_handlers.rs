// src/web/handlers/job_handlers.rs

use crate::database::{DatabaseConfig, JobRecord, JobRepository};
use crate::linkedin::{normalize, JobDetails, JobScraper};
use crate::utils::is_linkedin_job_link;
use crate::web::types::{ApiError, JobUploadRequest, JobUploadResponse};

use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info, warn};

/// What gets stored for one submitted job description.
#[derive(Debug)]
struct ResolvedJob {
    content: String,
    company_name: Option<String>,
}

pub async fn upload_jobs_handler(
    request: Json<JobUploadRequest>,
    scraper: &State<JobScraper>,
    db_config: &State<DatabaseConfig>,
) -> Result<Json<JobUploadResponse>, ApiError> {
    let request = request.into_inner();

    if request.job_descriptions.is_empty() {
        return Err(ApiError::BadRequest(
            "No job descriptions provided".to_string(),
        ));
    }

    let pool = db_config.pool().map_err(|e| {
        error!("Database connection failed: {}", e);
        ApiError::Database(e)
    })?;
    let repo = JobRepository::new(pool);

    // Items are stored as they are resolved; a later bad item does not
    // roll back the ones before it.
    let mut job_ids = Vec::with_capacity(request.job_descriptions.len());
    for raw in &request.job_descriptions {
        let resolved = resolve_job(raw, scraper).await?;

        let job = repo
            .create_job(
                &resolved.content,
                &request.resume_id,
                resolved.company_name.as_deref(),
            )
            .await
            .map_err(|e| {
                error!("Failed to store job for resume {}: {:#}", request.resume_id, e);
                ApiError::Database(e)
            })?;
        job_ids.push(job.job_id);
    }

    info!(
        "Stored {} job description(s) for resume {}",
        job_ids.len(),
        request.resume_id
    );

    Ok(Json(JobUploadResponse::success(job_ids, request)))
}

pub async fn get_job_handler(
    job_id: &str,
    db_config: &State<DatabaseConfig>,
) -> Result<Json<JobRecord>, ApiError> {
    let pool = db_config.pool().map_err(ApiError::Database)?;

    match JobRepository::new(pool).get_job(job_id).await {
        Ok(Some(job)) => Ok(Json(job)),
        Ok(None) => {
            warn!("Job {} not found", job_id);
            Err(ApiError::NotFound("Job not found".to_string()))
        }
        Err(e) => {
            error!("Failed to load job {}: {:#}", job_id, e);
            Err(ApiError::Database(e))
        }
    }
}

async fn resolve_job(raw: &str, scraper: &JobScraper) -> Result<ResolvedJob, ApiError> {
    let job_description = raw.trim();
    if job_description.is_empty() {
        return Err(ApiError::BadRequest("Empty job description".to_string()));
    }

    if !is_linkedin_job_link(job_description) {
        return Ok(ResolvedJob {
            content: job_description.to_string(),
            company_name: None,
        });
    }

    let url = normalize(job_description).map_err(linkedin_link_error)?;
    info!("Resolving LinkedIn job {}", url.job_id());

    resolved_from_details(scraper.fetch(&url).await)
}

fn resolved_from_details(details: JobDetails) -> Result<ResolvedJob, ApiError> {
    if !details.has_description() {
        return Err(linkedin_link_error(
            "Could not extract job description from LinkedIn link",
        ));
    }

    Ok(ResolvedJob {
        content: details.description,
        company_name: details.company_name,
    })
}

fn linkedin_link_error(reason: impl std::fmt::Display) -> ApiError {
    ApiError::BadRequest(format!("LinkedIn job link error: {}", reason))
}
