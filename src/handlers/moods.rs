use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::models::mood::SaveMoodRequest;
use crate::store;
use crate::AppState;

pub async fn save_mood(
    State(state): State<AppState>,
    Json(body): Json<SaveMoodRequest>,
) -> AppResult<Json<Value>> {
    let device_id = body
        .device_id
        .filter(|d| !d.is_empty())
        .ok_or(AppError::Validation("device_id is required".into()))?;
    let payload = body
        .mood
        .ok_or(AppError::Validation("mood is required".into()))?;
    let entry = payload.into_entry().map_err(AppError::Validation)?;

    let date = entry
        .date_key(state.config.tz_offset())
        .ok_or(AppError::Validation("mood timestamp is out of range".into()))?;

    store::moods::append(&state.db, &device_id, date, &entry).await?;

    Ok(Json(json!({ "status": "success" })))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::handlers::testing::post_json;

    #[tokio::test]
    async fn test_save_mood_requires_device_id() {
        let (status, body) = post_json(
            "/api/save_mood",
            json!({ "mood": { "label": "Happy", "timestamp": 1_700_000_000_000i64 } }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], 400);
    }

    #[tokio::test]
    async fn test_save_mood_requires_mood_object() {
        let (status, _) = post_json("/api/save_mood", json!({ "device_id": "dev-1" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_save_mood_requires_timestamp() {
        let (status, body) = post_json(
            "/api/save_mood",
            json!({ "device_id": "dev-1", "mood": { "label": "Happy" } }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("timestamp"));
    }

    #[tokio::test]
    async fn test_save_mood_rejects_empty_device_id() {
        let (status, _) = post_json(
            "/api/save_mood",
            json!({ "device_id": "", "mood": { "label": "Happy", "timestamp": 1i64 } }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
