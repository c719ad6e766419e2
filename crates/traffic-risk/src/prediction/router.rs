use super::service::PredictionService;
use super::views::{EvidenceResponse, PredictionResponse};
use crate::error::AppError;
use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

const DEFAULT_CITY: &str = "cdmx";

#[derive(Debug, Deserialize)]
pub struct PredictionQuery {
    #[serde(deserialize_with = "super::deserialize_date")]
    pub date: NaiveDate,
    #[serde(default = "default_city")]
    pub city: String,
}

fn default_city() -> String {
    DEFAULT_CITY.to_string()
}

/// Router exposing the prediction, evidence, and liveness endpoints.
pub fn prediction_router(service: Arc<PredictionService>) -> Router {
    Router::new()
        .route("/v1/predict", get(predict_handler))
        .route("/v1/evidence", get(evidence_handler))
        .route("/v1/healthz", get(healthz_handler))
        .with_state(service)
}

pub(crate) async fn predict_handler(
    State(service): State<Arc<PredictionService>>,
    Query(query): Query<PredictionQuery>,
) -> Json<PredictionResponse> {
    Json(service.predict(query.date, &query.city).await)
}

pub(crate) async fn evidence_handler(
    State(service): State<Arc<PredictionService>>,
    Query(query): Query<PredictionQuery>,
) -> Result<Json<EvidenceResponse>, AppError> {
    let evidence = service.evidence(query.date, &query.city).await?;
    Ok(Json(evidence))
}

pub(crate) async fn healthz_handler() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
