use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;
use tracing::{info, warn};

use super::domain::{AnalyzeRequest, DocumentAnalysis};
use super::service::{AuditService, AuditServiceError};
use super::store::ReportStore;

/// Router exposing document analysis, stored reports and the rule catalogue.
pub fn audit_router<S>(service: Arc<AuditService<S>>) -> Router
where
    S: ReportStore + 'static,
{
    Router::new()
        .route("/api/v1/analyze", post(analyze_handler::<S>))
        .route("/api/v1/reports/:stem", get(report_handler::<S>))
        .route("/api/v1/rules", get(rules_handler::<S>))
        .with_state(service)
}

pub(crate) async fn analyze_handler<S>(
    State(service): State<Arc<AuditService<S>>>,
    axum::Json(request): axum::Json<AnalyzeRequest>,
) -> Response
where
    S: ReportStore + 'static,
{
    // Entailment scoring and report writes are blocking work.
    let outcome = tokio::task::spawn_blocking(move || analyze_all(&service, request)).await;

    match outcome {
        Ok(Ok(analyses)) => (StatusCode::OK, axum::Json(analyses)).into_response(),
        Ok(Err((filename, error))) => {
            warn!(%filename, %error, "analysis failed");
            let payload = json!({
                "error": format!("analysis failed for {filename}: {error}"),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
        Err(join_error) => {
            warn!(error = %join_error, "analysis task aborted");
            let payload = json!({
                "error": "analysis task aborted",
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

fn analyze_all<S>(
    service: &AuditService<S>,
    request: AnalyzeRequest,
) -> Result<Vec<DocumentAnalysis>, (String, AuditServiceError)>
where
    S: ReportStore + 'static,
{
    let mut analyses = Vec::with_capacity(request.documents.len());

    for document in request.documents {
        match service.analyze(&document.filename, &document.text) {
            Ok(analysis) => analyses.push(analysis),
            Err(AuditServiceError::EmptyDocument { filename }) => {
                info!(%filename, "skipping document without text");
            }
            Err(other) => return Err((document.filename, other)),
        }
    }

    Ok(analyses)
}

pub(crate) async fn report_handler<S>(
    State(service): State<Arc<AuditService<S>>>,
    Path(stem): Path<String>,
) -> Response
where
    S: ReportStore + 'static,
{
    match service.report(&stem) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(AuditServiceError::NotFound { stem }) => {
            let payload = json!({
                "error": "report not found",
                "stem": stem,
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn rules_handler<S>(State(service): State<Arc<AuditService<S>>>) -> Response
where
    S: ReportStore + 'static,
{
    let catalogue = service.catalogue();
    (StatusCode::OK, axum::Json(catalogue)).into_response()
}
