pub mod diary;
pub mod health;
pub mod moods;
pub mod notifications;

#[cfg(test)]
pub(crate) mod testing {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use sqlx::postgres::PgPoolOptions;
    use std::sync::Arc;
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::services::generator::DiaryGenerator;
    use crate::services::push::PushDispatcher;
    use crate::AppState;

    /// State whose pool never connects. Validation paths must reject before
    /// any store access, so these tests pass with no database at all.
    pub fn lazy_state() -> AppState {
        let config = Arc::new(Config {
            database_url: "postgres://localhost/moodiary_test".into(),
            host: "127.0.0.1".into(),
            port: 5000,
            gemini_api_key: String::new(),
            gemini_model: "gemini-1.5-flash".into(),
            gemini_base_url: "http://localhost:9/v1beta".into(),
            push_endpoint: "http://localhost:9/push".into(),
            utc_offset_minutes: 0,
            notify_hours: vec![9, 12, 15, 18, 21],
            notify_minute: 0,
        });
        let db = PgPoolOptions::new()
            .connect_lazy(&config.database_url)
            .expect("lazy pool");
        let client = reqwest::Client::new();
        let generator = Arc::new(DiaryGenerator::new(client.clone(), &config));
        let dispatcher = Arc::new(PushDispatcher::new(
            client,
            config.push_endpoint.clone(),
            db.clone(),
        ));
        AppState {
            db,
            config,
            generator,
            dispatcher,
        }
    }

    pub async fn post_json(uri: &str, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
        let app = crate::router(lazy_state());
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }
}
