use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{InteractionEvent, LeadId, LeadRecord, LeadStatus, LeadSubmission};
use super::repository::{LeadRepository, RepositoryError};
use super::service::{LeadScoringService, LeadServiceError};
use crate::workflows::analytics::AnalyticsSink;

const DEFAULT_PIPELINE_LIMIT: usize = 50;

/// Router builder exposing lead intake, scoring and pipeline endpoints.
pub fn lead_router<R, S>(service: Arc<LeadScoringService<R, S>>) -> Router
where
    R: LeadRepository + 'static,
    S: AnalyticsSink + 'static,
{
    Router::new()
        .route(
            "/api/v1/leads",
            post(submit_handler::<R, S>).get(pipeline_handler::<R, S>),
        )
        .route("/api/v1/scoring/preview", post(preview_handler::<R, S>))
        .route("/api/v1/leads/:lead_id", get(status_handler::<R, S>))
        .route(
            "/api/v1/leads/:lead_id/interactions",
            post(interaction_handler::<R, S>),
        )
        .route(
            "/api/v1/leads/:lead_id/status",
            put(override_handler::<R, S>),
        )
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PipelineQuery {
    pub(crate) limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatusOverrideRequest {
    pub(crate) status: Option<LeadStatus>,
}

pub(crate) async fn submit_handler<R, S>(
    State(service): State<Arc<LeadScoringService<R, S>>>,
    axum::Json(submission): axum::Json<LeadSubmission>,
) -> Response
where
    R: LeadRepository + 'static,
    S: AnalyticsSink + 'static,
{
    match service.submit(submission) {
        Ok(entry) => (StatusCode::ACCEPTED, axum::Json(entry.status_view())).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn status_handler<R, S>(
    State(service): State<Arc<LeadScoringService<R, S>>>,
    Path(lead_id): Path<String>,
) -> Response
where
    R: LeadRepository + 'static,
    S: AnalyticsSink + 'static,
{
    match service.get(&LeadId(lead_id)) {
        Ok(entry) => (StatusCode::OK, axum::Json(entry.status_view())).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn interaction_handler<R, S>(
    State(service): State<Arc<LeadScoringService<R, S>>>,
    Path(lead_id): Path<String>,
    axum::Json(event): axum::Json<InteractionEvent>,
) -> Response
where
    R: LeadRepository + 'static,
    S: AnalyticsSink + 'static,
{
    match service.record_interaction(&LeadId(lead_id), event) {
        Ok(score) => (StatusCode::OK, axum::Json(score)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn override_handler<R, S>(
    State(service): State<Arc<LeadScoringService<R, S>>>,
    Path(lead_id): Path<String>,
    axum::Json(request): axum::Json<StatusOverrideRequest>,
) -> Response
where
    R: LeadRepository + 'static,
    S: AnalyticsSink + 'static,
{
    match service.override_status(&LeadId(lead_id), request.status) {
        Ok(score) => (StatusCode::OK, axum::Json(score)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn pipeline_handler<R, S>(
    State(service): State<Arc<LeadScoringService<R, S>>>,
    Query(query): Query<PipelineQuery>,
) -> Response
where
    R: LeadRepository + 'static,
    S: AnalyticsSink + 'static,
{
    let limit = query.limit.unwrap_or(DEFAULT_PIPELINE_LIMIT);
    match service.pipeline(limit) {
        Ok(entries) => {
            let views: Vec<_> = entries.iter().map(|entry| entry.status_view()).collect();
            (StatusCode::OK, axum::Json(views)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn preview_handler<R, S>(
    State(service): State<Arc<LeadScoringService<R, S>>>,
    axum::Json(record): axum::Json<LeadRecord>,
) -> Response
where
    R: LeadRepository + 'static,
    S: AnalyticsSink + 'static,
{
    let score = service.preview(&record);
    (StatusCode::OK, axum::Json(score)).into_response()
}

fn error_response(err: LeadServiceError) -> Response {
    let status = match &err {
        LeadServiceError::Intake(_) => StatusCode::UNPROCESSABLE_ENTITY,
        LeadServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        LeadServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        LeadServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    let payload = json!({ "error": err.to_string() });
    (status, axum::Json(payload)).into_response()
}
