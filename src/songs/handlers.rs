use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::{debug, error, info, instrument, warn};

use crate::{auth::session::SessionUser, db::MOODS, state::AppState};

use super::dto::{RecommendationFailure, RecommendationRequest, RecommendationResponse};
use super::services::songs_by_mood;

type Failure = (StatusCode, Json<RecommendationFailure>);

pub fn recommendation_routes() -> Router<AppState> {
    Router::new().route("/get_recommendations", post(get_recommendations))
}

#[instrument(skip(state, user, payload), fields(user_id = user.user_id))]
pub async fn get_recommendations(
    State(state): State<AppState>,
    user: SessionUser,
    payload: Result<Json<RecommendationRequest>, JsonRejection>,
) -> Result<Json<RecommendationResponse>, Failure> {
    let Json(req) = payload.map_err(|e| {
        warn!(error = %e, "rejected request body");
        (
            StatusCode::BAD_REQUEST,
            Json(RecommendationFailure::new("Invalid request body")),
        )
    })?;
    let mood = req.mood.unwrap_or_default();
    let module_type = req.module_type.unwrap_or_default();

    if mood.is_empty() {
        return Err((
            StatusCode::OK,
            Json(RecommendationFailure::new("No mood detected")),
        ));
    }

    if !MOODS.iter().any(|m| m.eq_ignore_ascii_case(&mood)) {
        debug!(mood = %mood, "mood outside the seeded catalog");
    }

    let songs = songs_by_mood(&state.db, &mood).await.map_err(|e| {
        error!(error = %e, mood = %mood, "recommendation lookup failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(RecommendationFailure::new("Could not load recommendations")),
        )
    })?;

    info!(mood = %mood, module_type = %module_type, count = songs.len(), "recommendations served");
    Ok(Json(RecommendationResponse {
        success: true,
        dominant_mood: mood,
        module_type,
        songs,
    }))
}
