use axum::{
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

mod config;
mod db;
mod error;
mod handlers;
mod models;
mod services;
mod store;

use config::Config;
use services::generator::DiaryGenerator;
use services::push::PushDispatcher;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<Config>,
    pub generator: Arc<DiaryGenerator>,
    pub dispatcher: Arc<PushDispatcher>,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "moodiary_api=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    let config = Arc::new(Config::from_env());

    // Database
    let db = db::create_pool(&config.database_url).await;

    sqlx::migrate!("./migrations")
        .run(&db)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations applied");

    // One shared outbound client with an explicit timeout; every external
    // call (generation, push delivery) goes through it.
    let http = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .build()
        .expect("Failed to build HTTP client");

    let generator = Arc::new(DiaryGenerator::new(http.clone(), &config));
    let dispatcher = Arc::new(PushDispatcher::new(
        http,
        config.push_endpoint.clone(),
        db.clone(),
    ));

    services::scheduler::spawn_notification_scheduler(dispatcher.clone(), config.clone());

    let state = AppState {
        db,
        config: config.clone(),
        generator,
        dispatcher,
    };

    let app = router(state);

    let addr = config.listen_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

pub fn router(state: AppState) -> Router {
    // Mobile clients call from arbitrary origins
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::health::home))
        .route("/health", get(handlers::health::health_check))
        .route("/api/mood-diary", post(handlers::diary::mood_diary))
        .route(
            "/api/register_token",
            post(handlers::notifications::register_token),
        )
        .route("/api/save_mood", post(handlers::moods::save_mood))
        .route(
            "/api/generate-diary-for-date",
            post(handlers::diary::generate_for_date),
        )
        .route(
            "/api/send_notifications",
            post(handlers::notifications::send_notifications),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
