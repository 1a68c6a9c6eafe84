use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use serde_json::{json, Value};

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::{HealthResponse, RecommendRequest, RecommendResponse},
};

use super::AppState;

/// Basic API info
pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "Module Recommendation API",
        "description": "API voor het voorspellen van keuzemodule aanbevelingen",
        "status": "running",
        "endpoints": {
            "recommendations": "/api/recommend",
            "health": "/health"
        }
    }))
}

/// Health check with index status
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let ready = state.recommender.is_ready().await;
    let stats = state.recommender.get_stats().await;

    Json(HealthResponse {
        status: (if ready { "healthy" } else { "not ready" }).to_string(),
        dataset_loaded: ready,
        modules_count: stats.modules_count,
        features_count: stats.features_count,
    })
}

/// Recommends modules for a student profile
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    payload: Result<Json<RecommendRequest>, JsonRejection>,
) -> AppResult<Json<RecommendResponse>> {
    let Json(request) = payload?;
    let profile = request.into_profile()?;

    tracing::info!(
        request_id = %request_id,
        k = profile.k,
        interests = profile.interests.len(),
        skills = profile.skills.len(),
        favorites = profile.favorites.len(),
        "Processing recommendation request"
    );

    let response = state
        .recommender
        .get_recommendations(&profile)
        .await
        .map_err(|e| {
            tracing::warn!(request_id = %request_id, error = %e, "Recommendation failed");
            e
        })?;

    tracing::info!(
        request_id = %request_id,
        total_found = response.total_found,
        "Recommendations generated"
    );

    Ok(Json(response))
}
