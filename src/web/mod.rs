// src/web/mod.rs

pub mod handlers;
pub mod types;

pub use handlers::*;
pub use types::*;

use crate::database::{DatabaseConfig, JobRecord};
use crate::environment::AppConfig;
use crate::linkedin::JobScraper;
use anyhow::{Context, Result};
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, Status};
use rocket::serde::json::Json;
use rocket::{catchers, get, options, post, routes, Build, Request, Response, Rocket, State};
use tracing::{error, info};

/// Adds CORS headers for the configured origins. `*` allows any origin and
/// is answered with the request's own origin.
pub struct Cors {
    allowed_origins: Vec<String>,
}

impl Cors {
    pub fn new(allowed_origins: Vec<String>) -> Self {
        Self { allowed_origins }
    }

    fn allow_origin(&self, origin: Option<&str>) -> Option<String> {
        let origin = origin?;
        self.allowed_origins
            .iter()
            .any(|o| o == "*" || o == origin)
            .then(|| origin.to_string())
    }
}

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, request: &'r Request<'_>, response: &mut Response<'r>) {
        let Some(origin) = self.allow_origin(request.headers().get_one("Origin")) else {
            return;
        };

        response.set_header(Header::new("Access-Control-Allow-Origin", origin));
        response.set_header(Header::new("Vary", "Origin"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "GET, POST, OPTIONS",
        ));
        if let Some(requested) = request.headers().get_one("Access-Control-Request-Headers") {
            response.set_header(Header::new(
                "Access-Control-Allow-Headers",
                requested.to_string(),
            ));
        }
        response.set_header(Header::new("Access-Control-Allow-Credentials", "true"));
    }
}

#[get("/")]
pub async fn root() -> Json<ServiceInfo> {
    handlers::root_handler().await
}

#[get("/health")]
pub async fn health(db_config: &State<DatabaseConfig>) -> Result<Json<HealthResponse>, ApiError> {
    handlers::health_handler(db_config).await
}

#[post("/jobs/upload", data = "<request>")]
pub async fn upload_jobs(
    request: Json<JobUploadRequest>,
    scraper: &State<JobScraper>,
    db_config: &State<DatabaseConfig>,
) -> Result<Json<JobUploadResponse>, ApiError> {
    handlers::upload_jobs_handler(request, scraper, db_config).await
}

#[get("/jobs/<job_id>")]
pub async fn get_job(
    job_id: &str,
    db_config: &State<DatabaseConfig>,
) -> Result<Json<JobRecord>, ApiError> {
    handlers::get_job_handler(job_id, db_config).await
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

// Error catchers

#[rocket::catch(400)]
pub fn bad_request() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Invalid request format",
        "BAD_REQUEST",
    ))
}

#[rocket::catch(404)]
pub fn not_found() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new("Not found", "NOT_FOUND"))
}

#[rocket::catch(422)]
pub fn unprocessable_entity() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Request body does not match the expected schema",
        "VALIDATION_ERROR",
    ))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Internal server error",
        "INTERNAL_ERROR",
    ))
}

/// Assemble the application around an initialized database and scraper.
pub fn build_rocket(
    config: &AppConfig,
    db_config: DatabaseConfig,
    scraper: JobScraper,
) -> Rocket<Build> {
    let figment = rocket::Config::figment()
        .merge(("address", config.server.host.clone()))
        .merge(("port", config.server.port));

    rocket::custom(figment)
        .attach(Cors::new(config.server.cors_origins.clone()))
        .manage(db_config)
        .manage(scraper)
        .register(
            "/",
            catchers![bad_request, not_found, unprocessable_entity, internal_error],
        )
        .mount("/", routes![root, options])
        .mount("/api/v1", routes![health, upload_jobs, get_job])
}

// Main server start function
pub async fn start_web_server(config: AppConfig) -> Result<()> {
    config.ensure_directories().await?;

    let mut db_config = DatabaseConfig::new(config.server.database_path.clone());

    if let Err(e) = db_config.init_pool().await {
        error!("Failed to initialize database: {:#}", e);
        return Err(e);
    }

    if let Err(e) = db_config.migrate().await {
        error!("Failed to run database migrations: {:#}", e);
        return Err(e);
    }

    let scraper = JobScraper::new(config.linkedin.selectors.clone())
        .context("Failed to configure LinkedIn job scraper")?;

    info!("Starting Landed Job API server ({})", config.environment);
    info!("Database: {}", db_config.database_path.display());
    info!(
        "Listening on http://{}:{}",
        config.server.host, config.server.port
    );

    match build_rocket(&config, db_config, scraper).launch().await {
        Ok(rocket) => {
            if let Some(db_config) = rocket.state::<DatabaseConfig>() {
                db_config.close().await;
            }
            info!("Server stopped");
            Ok(())
        }
        Err(e) => {
            let kind = e.kind().to_string();
            error!("Server failed: {}", kind);
            anyhow::bail!("Server failed: {}", kind)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wildcard_echoes_the_request_origin() {
        let cors = Cors::new(vec!["*".to_string()]);
        assert_eq!(
            cors.allow_origin(Some("https://x.example")).as_deref(),
            Some("https://x.example")
        );
        assert_eq!(cors.allow_origin(None), None);
    }

    #[test]
    fn test_listed_origin_is_echoed() {
        let cors = Cors::new(vec!["http://localhost:3000".to_string()]);
        assert_eq!(
            cors.allow_origin(Some("http://localhost:3000")).as_deref(),
            Some("http://localhost:3000")
        );
        assert_eq!(cors.allow_origin(Some("https://evil.example")), None);
        assert_eq!(cors.allow_origin(None), None);
    }
}
