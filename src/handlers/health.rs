use axum::Json;
use serde_json::{json, Value};

/// GET / — plain-text liveness probe, kept dependency-free.
pub async fn home() -> &'static str {
    "moodiary-api is running"
}

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "moodiary-api",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::handlers::testing::lazy_state;

    #[tokio::test]
    async fn test_home_returns_plain_text_liveness() {
        let app = crate::router(lazy_state());
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"moodiary-api is running");
    }

    #[tokio::test]
    async fn test_health_reports_service_name() {
        let app = crate::router(lazy_state());
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["service"], "moodiary-api");
    }
}
