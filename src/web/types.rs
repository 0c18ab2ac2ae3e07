// src/web/types.rs

use rocket::http::Status;
use rocket::response::{self, Responder};
use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};
use rocket::Request;
use thiserror::Error;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct JobUploadRequest {
    pub job_descriptions: Vec<String>,
    pub resume_id: String,
}

#[derive(Debug, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct JobUploadResponse {
    pub message: String,
    pub job_id: Vec<String>,
    pub request: JobUploadRequest,
}

impl JobUploadResponse {
    pub fn success(job_ids: Vec<String>, request: JobUploadRequest) -> Self {
        Self {
            message: "data successfully processed".to_string(),
            job_id: job_ids,
            request,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ServiceInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct StandardErrorResponse {
    pub success: bool,
    pub detail: String,
    pub error_code: String,
}

impl StandardErrorResponse {
    pub fn new(detail: impl Into<String>, error_code: impl Into<String>) -> Self {
        Self {
            success: false,
            detail: detail.into(),
            error_code: error_code.into(),
        }
    }
}

/// Errors a handler can answer with. Each maps to one status code.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Unavailable(String),
    #[error("Database error: {0:#}")]
    Database(anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> Status {
        match self {
            ApiError::BadRequest(_) => Status::BadRequest,
            ApiError::NotFound(_) => Status::NotFound,
            ApiError::Unavailable(_) => Status::ServiceUnavailable,
            ApiError::Database(_) => Status::InternalServerError,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Unavailable(_) => "SERVICE_UNAVAILABLE",
            ApiError::Database(_) => "DATABASE_ERROR",
        }
    }
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        // Storage details stay in the logs.
        let detail = match &self {
            ApiError::Database(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };
        let body = StandardErrorResponse::new(detail, self.error_code());
        (self.status(), Json(body)).respond_to(request)
    }
}
