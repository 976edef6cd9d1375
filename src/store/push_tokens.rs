use sqlx::PgPool;

use crate::models::push::PushRegistration;

/// Upsert the device's push registration, last write wins. An empty token
/// disables delivery for the device; there is no delete path.
pub async fn register(
    db: &PgPool,
    device_id: &str,
    token: &str,
) -> Result<PushRegistration, sqlx::Error> {
    sqlx::query_as::<_, PushRegistration>(
        r#"
        INSERT INTO push_registrations (device_id, token, enabled)
        VALUES ($1, $2, $3)
        ON CONFLICT (device_id) DO UPDATE SET
            token = $2,
            enabled = $3,
            updated_at = NOW()
        RETURNING *
        "#,
    )
    .bind(device_id)
    .bind(token)
    .bind(!token.is_empty())
    .fetch_one(db)
    .await
}

/// Tokens eligible for delivery: enabled and non-empty.
pub async fn active_tokens(db: &PgPool) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT token FROM push_registrations WHERE enabled = true AND token <> ''",
    )
    .fetch_all(db)
    .await
}
