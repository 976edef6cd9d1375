use rand::Rng;
use serde::Serialize;
use sqlx::PgPool;

use crate::store::push_tokens;

/// Push-delivery endpoints cap batch size; 100 per request.
pub const BATCH_SIZE: usize = 100;

pub const DEFAULT_TITLE: &str = "Mood Diary";
pub const DEFAULT_BODY: &str = "Don't forget to log your moods today!";

/// Fixed title/body candidates for scheduled reminders.
pub const NOTIFICATION_MESSAGES: [(&str, &str); 5] = [
    ("How are you feeling?", "Take a moment to log your mood."),
    ("Mood check-in", "A quick note now makes a richer diary tonight."),
    ("Your diary misses you", "Capture this moment before it slips away."),
    ("Pause and reflect", "One tap to record how your day is going."),
    ("Evening thoughts?", "Log your mood and let your diary tell the story."),
];

/// One message per token, in the delivery endpoint's batch format.
#[derive(Debug, Clone, Serialize)]
pub struct PushMessage {
    pub to: String,
    pub sound: String,
    pub title: String,
    pub body: String,
    pub data: serde_json::Value,
}

/// Aggregate outcome of one dispatch run. Per-batch failures are logged and
/// counted, never retried.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DispatchSummary {
    pub batches: usize,
    pub delivered: usize,
    pub failed: usize,
}

pub struct PushDispatcher {
    client: reqwest::Client,
    endpoint: String,
    db: PgPool,
}

impl PushDispatcher {
    pub fn new(client: reqwest::Client, endpoint: String, db: PgPool) -> Self {
        Self {
            client,
            endpoint,
            db,
        }
    }

    /// Read all deliverable tokens, batch them, POST each batch. A failed
    /// batch does not stop the others; only the token read itself is fatal.
    pub async fn send(&self, title: &str, body: &str) -> Result<DispatchSummary, anyhow::Error> {
        let tokens = push_tokens::active_tokens(&self.db).await?;
        if tokens.is_empty() {
            tracing::info!("No push tokens registered, nothing to send");
            return Ok(DispatchSummary {
                batches: 0,
                delivered: 0,
                failed: 0,
            });
        }

        let batches = build_batches(&tokens, title, body);
        let mut delivered = 0;
        let mut failed = 0;

        for (index, batch) in batches.iter().enumerate() {
            match self.post_batch(batch).await {
                Ok(status) => {
                    delivered += batch.len();
                    tracing::info!(batch = index, size = batch.len(), status = %status, "Push batch accepted");
                }
                Err(e) => {
                    failed += batch.len();
                    tracing::warn!(batch = index, size = batch.len(), error = %e, "Push batch failed");
                }
            }
        }

        Ok(DispatchSummary {
            batches: batches.len(),
            delivered,
            failed,
        })
    }

    async fn post_batch(&self, batch: &[PushMessage]) -> Result<reqwest::StatusCode, anyhow::Error> {
        let response = self.client.post(&self.endpoint).json(batch).send().await?;
        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("push endpoint returned {}", status);
        }
        Ok(status)
    }
}

/// Partition tokens into payload batches of at most `BATCH_SIZE`.
pub fn build_batches(tokens: &[String], title: &str, body: &str) -> Vec<Vec<PushMessage>> {
    tokens
        .chunks(BATCH_SIZE)
        .map(|chunk| {
            chunk
                .iter()
                .map(|token| PushMessage {
                    to: token.clone(),
                    sound: "default".into(),
                    title: title.into(),
                    body: body.into(),
                    data: serde_json::json!({}),
                })
                .collect()
        })
        .collect()
}

/// Uniformly random reminder pair from the fixed candidates.
pub fn pick_notification<R: Rng + ?Sized>(rng: &mut R) -> (&'static str, &'static str) {
    NOTIFICATION_MESSAGES[rng.gen_range(0..NOTIFICATION_MESSAGES.len())]
}
