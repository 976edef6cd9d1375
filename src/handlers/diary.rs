use axum::{extract::State, Json};
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::models::mood::{MoodDiaryRequest, MoodEntry, MoodPayload};
use crate::models::diary::GenerateDiaryRequest;
use crate::services::prompt;
use crate::store;
use crate::AppState;

/// POST /api/mood-diary — generate a narrative from the submitted entries
/// without touching the store.
pub async fn mood_diary(
    State(state): State<AppState>,
    Json(body): Json<MoodDiaryRequest>,
) -> AppResult<Json<Value>> {
    let moods = body
        .moods
        .filter(|m| !m.is_empty())
        .ok_or(AppError::Validation("No moods provided".into()))?;
    let entries = moods
        .into_iter()
        .map(MoodPayload::into_entry)
        .collect::<Result<Vec<_>, _>>()
        .map_err(AppError::Validation)?;

    let prompt = prompt::build_prompt(
        &mut rand::thread_rng(),
        &entries,
        state.config.tz_offset(),
    );
    let summary = state
        .generator
        .generate(&prompt)
        .await
        .map_err(AppError::Generation)?;

    Ok(Json(json!({ "summary": summary })))
}

#[derive(Debug, Serialize)]
pub struct GenerateDiaryResponse {
    pub summary: String,
    pub moods: Vec<MoodEntry>,
    pub date: String,
    pub device_id: String,
    pub status: String,
}

/// POST /api/generate-diary-for-date — generate from the stored bucket and
/// persist the diary, replacing any prior record for that date.
pub async fn generate_for_date(
    State(state): State<AppState>,
    Json(body): Json<GenerateDiaryRequest>,
) -> AppResult<Json<GenerateDiaryResponse>> {
    let device_id = body
        .device_id
        .filter(|d| !d.is_empty())
        .ok_or(AppError::Validation("device_id is required".into()))?;
    let date_str = body
        .date
        .filter(|d| !d.is_empty())
        .ok_or(AppError::Validation("date is required".into()))?;
    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("date must be YYYY-MM-DD".into()))?;

    let entries = store::moods::entries_for_date(&state.db, &device_id, date).await?;
    if entries.is_empty() {
        return Err(AppError::NotFound("No mood data for this date".into()));
    }

    let prompt = prompt::build_prompt(
        &mut rand::thread_rng(),
        &entries,
        state.config.tz_offset(),
    );
    let summary = state
        .generator
        .generate(&prompt)
        .await
        .map_err(AppError::Generation)?;

    store::diaries::upsert(&state.db, &device_id, date, &summary, &entries).await?;

    Ok(Json(GenerateDiaryResponse {
        summary,
        moods: entries,
        date: date_str,
        device_id,
        status: "success".into(),
    }))
}
