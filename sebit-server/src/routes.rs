//! HTTP handlers for the SEBIT summary server.

use actix_web::{HttpRequest, HttpResponse, Responder, error, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

use sebit_core::{
    DetailMode, ModelDescriptor, StaticCatalog, SummaryError, SummaryReport,
    SummaryReportRequest, build_summary_report, describe_catalog, series_labels,
};

use crate::openapi::ApiDoc;

/// Largest accepted request body.
const JSON_LIMIT_BYTES: usize = 4 * 1024 * 1024;

#[derive(Debug, Clone, Copy, Default)]
/// Shared application state for handlers.
pub struct AppState {
    /// Validation mode applied to pre-built entries.
    pub detail_mode: DetailMode,
}

/// Error response payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Machine-readable error kind, e.g. `unknown_model`.
    pub kind: String,
    /// Human-readable error message.
    pub message: String,
    /// Model the error refers to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Offending field names.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<String>,
}

impl From<&SummaryError> for ErrorResponse {
    fn from(err: &SummaryError) -> Self {
        Self {
            kind: err.kind().to_string(),
            message: err.to_string(),
            model: err.model().map(str::to_string),
            fields: err.fields(),
        }
    }
}

/// Liveness payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Always `ok` while the server is answering.
    pub status: String,
}

/// Registered models and the series they report under.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ModelCatalogResponse {
    /// Series labels, in registry order.
    pub series: Vec<String>,
    /// Every registered model.
    pub models: Vec<ModelDescriptor>,
}

/// JSON extractor configuration that answers bad bodies with [`ErrorResponse`].
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_LIMIT_BYTES)
        .error_handler(|err, req: &HttpRequest| {
            log::warn!("rejected body for {}: {err}", req.path());
            let response = HttpResponse::BadRequest().json(ErrorResponse {
                kind: "invalid_request".to_string(),
                message: err.to_string(),
                model: None,
                fields: Vec::new(),
            });
            error::InternalError::from_response(err, response).into()
        })
}

#[utoipa::path(
    post,
    path = "/summary/report",
    request_body = SummaryReportRequest,
    responses(
        (status = 200, description = "Consolidated summary report", body = SummaryReport),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 422, description = "Request failed validation", body = ErrorResponse)
    ),
    tag = "summary"
)]
#[post("/summary/report")]
/// Build a consolidated report from model outputs or pre-built entries.
pub async fn summary_report(
    state: web::Data<AppState>,
    payload: web::Json<SummaryReportRequest>,
) -> impl Responder {
    let request = payload.into_inner();
    match build_summary_report(&request, state.detail_mode) {
        Ok(report) => {
            log::info!(
                "built report '{}' with {} models",
                report.report_label,
                report.total_models
            );
            HttpResponse::Ok().json(report)
        }
        Err(err) => {
            log::warn!("rejected summary request ({}): {err}", err.kind());
            HttpResponse::UnprocessableEntity().json(ErrorResponse::from(&err))
        }
    }
}

#[utoipa::path(
    get,
    path = "/summary/models",
    responses(
        (status = 200, description = "Registered models", body = ModelCatalogResponse)
    ),
    tag = "summary"
)]
#[get("/summary/models")]
/// List the registered models.
pub async fn summary_models() -> impl Responder {
    HttpResponse::Ok().json(ModelCatalogResponse {
        series: series_labels().into_iter().map(String::from).collect(),
        models: describe_catalog(&StaticCatalog),
    })
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Server is up", body = HealthResponse)
    ),
    tag = "system"
)]
#[get("/health")]
/// Liveness probe.
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
    })
}

#[utoipa::path(
    get,
    path = "/openapi.json",
    responses(
        (status = 200, description = "OpenAPI document", body = serde_json::Value)
    ),
    tag = "system"
)]
#[get("/openapi.json")]
/// Serve the OpenAPI document.
pub async fn openapi_json() -> impl Responder {
    HttpResponse::Ok().json(ApiDoc::openapi())
}
