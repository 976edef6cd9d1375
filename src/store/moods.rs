use chrono::NaiveDate;
use sqlx::PgPool;

use crate::models::mood::MoodEntry;

/// Append one entry to the device's bucket for the given date.
///
/// Single-statement upsert concatenating onto the JSONB array. Concurrent
/// appends for the same device/date serialize on the row lock, so no entry
/// is lost and other dates are untouched.
pub async fn append(
    db: &PgPool,
    device_id: &str,
    date: NaiveDate,
    entry: &MoodEntry,
) -> Result<(), sqlx::Error> {
    let entry_json =
        serde_json::to_value(entry).map_err(|e| sqlx::Error::decode(Box::new(e)))?;

    sqlx::query(
        r#"
        INSERT INTO mood_buckets (device_id, bucket_date, entries)
        VALUES ($1, $2, jsonb_build_array($3::jsonb))
        ON CONFLICT (device_id, bucket_date) DO UPDATE SET
            entries = mood_buckets.entries || excluded.entries,
            updated_at = NOW()
        "#,
    )
    .bind(device_id)
    .bind(date)
    .bind(entry_json)
    .execute(db)
    .await?;

    Ok(())
}

/// The date's entries in append order, empty if no bucket exists.
pub async fn entries_for_date(
    db: &PgPool,
    device_id: &str,
    date: NaiveDate,
) -> Result<Vec<MoodEntry>, sqlx::Error> {
    let entries: Option<serde_json::Value> = sqlx::query_scalar(
        "SELECT entries FROM mood_buckets WHERE device_id = $1 AND bucket_date = $2",
    )
    .bind(device_id)
    .bind(date)
    .fetch_optional(db)
    .await?;

    match entries {
        Some(value) => {
            serde_json::from_value(value).map_err(|e| sqlx::Error::Decode(Box::new(e)))
        }
        None => Ok(Vec::new()),
    }
}
