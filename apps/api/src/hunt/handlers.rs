//! Axum route handlers for the hunt pipeline.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::hunt::models::{HuntPreferences, HuntResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct TriggerHuntResponse {
    pub status: &'static str,
    pub data: HuntResult,
}

/// POST /api/trigger-hunt
///
/// Runs a hunt synchronously with the posted preferences. Missing fields take
/// their defaults. Always succeeds; per-source failures are only logged.
pub async fn handle_trigger_hunt(
    State(state): State<AppState>,
    Json(preferences): Json<HuntPreferences>,
) -> Json<TriggerHuntResponse> {
    let data = state.hunt.run(preferences).await;

    Json(TriggerHuntResponse {
        status: "success",
        data,
    })
}
