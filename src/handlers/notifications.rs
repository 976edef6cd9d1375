use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::models::push::{RegisterTokenRequest, SendNotificationsRequest};
use crate::services::push::{DEFAULT_BODY, DEFAULT_TITLE};
use crate::store;
use crate::AppState;

/// POST /api/register_token — upsert the device's push registration. An
/// absent or empty token disables delivery for the device.
pub async fn register_token(
    State(state): State<AppState>,
    Json(body): Json<RegisterTokenRequest>,
) -> AppResult<Json<Value>> {
    let device_id = body
        .device_id
        .filter(|d| !d.is_empty())
        .ok_or(AppError::Validation("device_id is required".into()))?;
    let token = body.token.unwrap_or_default();

    let registration = store::push_tokens::register(&state.db, &device_id, &token).await?;

    Ok(Json(json!({
        "status": "success",
        "token": registration.token,
        "device_id": registration.device_id,
    })))
}

/// POST /api/send_notifications — dispatch immediately to every registered
/// device. Per-batch failures are reflected in the counts, not the status.
pub async fn send_notifications(
    State(state): State<AppState>,
    Json(body): Json<SendNotificationsRequest>,
) -> AppResult<Json<Value>> {
    let title = body
        .title
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| DEFAULT_TITLE.into());
    let message = body
        .body
        .filter(|b| !b.is_empty())
        .unwrap_or_else(|| DEFAULT_BODY.into());

    let summary = state
        .dispatcher
        .send(&title, &message)
        .await
        .map_err(AppError::Dispatch)?;

    Ok(Json(json!({
        "status": "notifications sent",
        "batches": summary.batches,
        "delivered": summary.delivered,
        "failed": summary.failed,
    })))
}
