use chrono::NaiveDate;
use sqlx::PgPool;

use crate::models::diary::DiaryRecord;
use crate::models::mood::MoodEntry;

/// Replace the device's diary for the date. Regeneration overwrites the
/// prior summary and mood sequence; other dates are unaffected.
pub async fn upsert(
    db: &PgPool,
    device_id: &str,
    date: NaiveDate,
    summary: &str,
    moods: &[MoodEntry],
) -> Result<DiaryRecord, sqlx::Error> {
    let moods_json =
        serde_json::to_value(moods).map_err(|e| sqlx::Error::decode(Box::new(e)))?;

    sqlx::query_as::<_, DiaryRecord>(
        r#"
        INSERT INTO diaries (device_id, diary_date, summary, moods)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (device_id, diary_date) DO UPDATE SET
            summary = $3,
            moods = $4,
            updated_at = NOW()
        RETURNING *
        "#,
    )
    .bind(device_id)
    .bind(date)
    .bind(summary)
    .bind(moods_json)
    .fetch_one(db)
    .await
}

pub async fn get(
    db: &PgPool,
    device_id: &str,
    date: NaiveDate,
) -> Result<Option<DiaryRecord>, sqlx::Error> {
    sqlx::query_as::<_, DiaryRecord>(
        "SELECT * FROM diaries WHERE device_id = $1 AND diary_date = $2",
    )
    .bind(device_id)
    .bind(date)
    .fetch_optional(db)
    .await
}
