use serde_json::Value;

use crate::config::Config;

/// Client for the external text-generation API. Constructed once in `main`
/// around the shared HTTP client and carried in `AppState`.
pub struct DiaryGenerator {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl DiaryGenerator {
    pub fn new(client: reqwest::Client, config: &Config) -> Self {
        Self {
            client,
            base_url: config.gemini_base_url.clone(),
            api_key: config.gemini_api_key.clone(),
            model: config.gemini_model.clone(),
        }
    }

    /// Send the assembled prompt and return the raw narrative text. Single
    /// attempt; any failure surfaces as one error for the caller to map to
    /// a generic 500.
    pub async fn generate(&self, prompt: &str) -> Result<String, anyhow::Error> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let response = self
            .client
            .post(&url)
            .header("content-type", "application/json")
            .json(&serde_json::json!({
                "contents": [{
                    "parts": [{ "text": prompt }]
                }]
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Generation API error {}: {}", status, body);
        }

        let body: Value = response.json().await?;
        extract_text(&body)
            .map(str::to_owned)
            .ok_or_else(|| anyhow::anyhow!("Generation response had no candidate text"))
    }
}

/// First candidate's text, per the generateContent response shape.
fn extract_text(response: &Value) -> Option<&str> {
    response["candidates"][0]["content"]["parts"][0]["text"].as_str()
}
