use chrono::FixedOffset;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,

    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,

    pub push_endpoint: String,

    /// Offset from UTC (minutes) used for date bucketing, entry rendering
    /// and the notification schedule.
    pub utc_offset_minutes: i32,
    /// Hours of day (local to the offset) at which notifications fire.
    pub notify_hours: Vec<u32>,
    pub notify_minute: u32,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "5000".into())
                .parse()
                .expect("PORT must be a number"),

            gemini_api_key: env::var("GEMINI_API_KEY").unwrap_or_else(|_| String::new()),
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-1.5-flash".into()),
            gemini_base_url: env::var("GEMINI_BASE_URL").unwrap_or_else(|_| {
                "https://generativelanguage.googleapis.com/v1beta".into()
            }),

            push_endpoint: env::var("PUSH_ENDPOINT")
                .unwrap_or_else(|_| "https://exp.host/--/api/v2/push/send".into()),

            utc_offset_minutes: env::var("UTC_OFFSET_MINUTES")
                .unwrap_or_else(|_| "0".into())
                .parse()
                .expect("UTC_OFFSET_MINUTES must be a number"),
            notify_hours: env::var("NOTIFY_HOURS")
                .unwrap_or_else(|_| "9,12,15,18,21".into())
                .split(',')
                .map(|h| h.trim().parse().expect("NOTIFY_HOURS must be hours 0-23"))
                .collect(),
            notify_minute: env::var("NOTIFY_MINUTE")
                .unwrap_or_else(|_| "0".into())
                .parse()
                .expect("NOTIFY_MINUTE must be a number"),
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn tz_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes * 60)
            .unwrap_or_else(|| FixedOffset::east_opt(0).expect("zero offset is valid"))
    }
}
