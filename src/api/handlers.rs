use crate::api::error::{ApiError, ApiResult};
use crate::core::service::{Calculation, SampleRequest, SeparabilityDemonstration, SigmoidService, StoredCurve};
use crate::domain::model::{ParameterPatch, ParameterRecord};
use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<SigmoidService>,
}

impl AppState {
    pub fn new(service: SigmoidService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DemoQuery {
    pub seed: Option<u64>,
}

/// 空 body 視為所有欄位皆省略
fn parse_body<T: DeserializeOwned + Default>(body: &Bytes) -> ApiResult<T> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| ApiError::bad_request(format!("Invalid JSON body: {}", e)))
}

/// 非整數 id 與不存在的 id 一樣回 404
fn parse_id(raw: &str) -> ApiResult<u64> {
    raw.parse::<u64>()
        .map_err(|_| ApiError::not_found("Parameters not found"))
}

/// POST /api/calculate/
pub async fn calculate_sigmoid(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<Calculation>> {
    let request: SampleRequest = parse_body(&body)?;
    tracing::debug!("Calculate request: {:?}", request);
    Ok(Json(state.service.calculate(request).await?))
}

/// GET /api/data/:param_id/
pub async fn get_sigmoid_data(
    State(state): State<AppState>,
    Path(param_id): Path<String>,
) -> ApiResult<Json<StoredCurve>> {
    let id = parse_id(&param_id)?;
    Ok(Json(state.service.sigmoid_data(id).await?))
}

/// GET /api/demo/nonlinear-separability/
pub async fn demonstrate_nonlinear_separability(
    State(state): State<AppState>,
    query: Result<Query<DemoQuery>, QueryRejection>,
) -> ApiResult<Json<SeparabilityDemonstration>> {
    let Query(query) = query?;
    Ok(Json(state.service.demonstrate(query.seed)?))
}

/// GET /api/parameters/
pub async fn list_parameters(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<ParameterRecord>>> {
    Ok(Json(state.service.list_parameters().await?))
}

/// POST /api/parameters/
pub async fn create_parameters(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<ParameterRecord>)> {
    let patch: ParameterPatch = parse_body(&body)?;
    let record = state.service.create_parameters(patch).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/parameters/:id/
pub async fn get_parameters(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ParameterRecord>> {
    let id = parse_id(&id)?;
    Ok(Json(state.service.get_parameters(id).await?))
}

/// PUT / PATCH /api/parameters/:id/
pub async fn update_parameters(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<ParameterRecord>> {
    let id = parse_id(&id)?;
    let patch: ParameterPatch = parse_body(&body)?;
    Ok(Json(state.service.update_parameters(id, patch).await?))
}

/// DELETE /api/parameters/:id/
pub async fn delete_parameters(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_id(&id)?;
    state.service.delete_parameters(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /health
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
