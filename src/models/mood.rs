use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

/// The closed set of overall-mood labels the generator is instructed to
/// choose from. The prompt templates spell these out verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mood {
    Happy,
    Relaxed,
    Cheerful,
    Motivated,
    Sleepy,
    Anxious,
    Sad,
    Crying,
    Frustrated,
    Angry,
    Neutral,
    Hopeful,
    Disappoint,
    Grateful,
    Confused,
    Calm,
    Excited,
    Thoughtful,
}

impl Mood {
    pub const ALL: [Mood; 18] = [
        Mood::Happy,
        Mood::Relaxed,
        Mood::Cheerful,
        Mood::Motivated,
        Mood::Sleepy,
        Mood::Anxious,
        Mood::Sad,
        Mood::Crying,
        Mood::Frustrated,
        Mood::Angry,
        Mood::Neutral,
        Mood::Hopeful,
        Mood::Disappoint,
        Mood::Grateful,
        Mood::Confused,
        Mood::Calm,
        Mood::Excited,
        Mood::Thoughtful,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "Happy",
            Mood::Relaxed => "Relaxed",
            Mood::Cheerful => "Cheerful",
            Mood::Motivated => "Motivated",
            Mood::Sleepy => "Sleepy",
            Mood::Anxious => "Anxious",
            Mood::Sad => "Sad",
            Mood::Crying => "Crying",
            Mood::Frustrated => "Frustrated",
            Mood::Angry => "Angry",
            Mood::Neutral => "Neutral",
            Mood::Hopeful => "Hopeful",
            Mood::Disappoint => "Disappoint",
            Mood::Grateful => "Grateful",
            Mood::Confused => "Confused",
            Mood::Calm => "Calm",
            Mood::Excited => "Excited",
            Mood::Thoughtful => "Thoughtful",
        }
    }

    /// Comma-separated label list, exactly as the prompt templates embed it.
    pub fn prompt_list() -> String {
        Mood::ALL
            .iter()
            .map(Mood::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// A single timestamped mood observation. Immutable once appended to a
/// day's bucket.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MoodEntry {
    /// Epoch milliseconds, as submitted by the client.
    pub timestamp: i64,
    pub label: String,
    #[serde(default)]
    pub note: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
}

impl MoodEntry {
    /// Calendar date this entry buckets under, in the service's configured
    /// offset. None if the timestamp is outside chrono's representable range.
    pub fn date_key(&self, tz: FixedOffset) -> Option<NaiveDate> {
        local_datetime(self.timestamp, tz).map(|dt| dt.date_naive())
    }
}

/// Wall-clock datetime for an epoch-millisecond timestamp in the given offset.
pub fn local_datetime(timestamp_ms: i64, tz: FixedOffset) -> Option<DateTime<FixedOffset>> {
    DateTime::from_timestamp_millis(timestamp_ms).map(|dt| dt.with_timezone(&tz))
}

/// Client mood payload. All fields optional so missing-field validation
/// happens in the handler (400) rather than in the JSON extractor.
#[derive(Debug, Clone, Deserialize)]
pub struct MoodPayload {
    pub timestamp: Option<i64>,
    pub label: Option<String>,
    pub note: Option<String>,
    pub emoji: Option<String>,
}

impl MoodPayload {
    /// Validate required fields and produce the stored entry. The error is
    /// the client-facing message for the 400 response.
    pub fn into_entry(self) -> Result<MoodEntry, String> {
        let timestamp = self.timestamp.ok_or("Mood entry is missing a timestamp")?;
        let label = match self.label {
            Some(l) if !l.is_empty() => l,
            _ => return Err("Mood entry is missing a label".into()),
        };
        Ok(MoodEntry {
            timestamp,
            label,
            note: self.note.unwrap_or_default(),
            emoji: self.emoji,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct MoodDiaryRequest {
    pub moods: Option<Vec<MoodPayload>>,
}

#[derive(Debug, Deserialize)]
pub struct SaveMoodRequest {
    pub device_id: Option<String>,
    pub mood: Option<MoodPayload>,
}
