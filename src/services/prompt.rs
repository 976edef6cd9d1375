use chrono::FixedOffset;
use rand::Rng;

use crate::models::mood::{local_datetime, Mood, MoodEntry};

/// The four diary prompt templates. Semantically equivalent, differing only
/// in tone; each one ends with the same sentinel-line instruction so the
/// client can parse the overall mood off the last line. `{mood_entries}` and
/// `{mood_list}` are substituted at build time.
const PROMPTS: [&str; 4] = [
    r#"Given the following list of time-stamped mood entries with short notes, write a warm, story-like mood diary for the user.
Walk through the user's emotional journey, narrating how they felt at each point in time.
Make the tone gentle and uplifting. Include a few poetic or metaphorical lines to enhance emotional depth.
Give thoughtful advice or encouragement based on the emotional patterns.
End the response with a new line that says:
"Overall, today you were [MOOD]" — where [MOOD] is selected from this list only (exact spelling):
{mood_list}

Mood entries:
{mood_entries}"#,
    r#"Pretend you're the user's emotional companion.
Create a comforting mood diary from these time-stamped emotions and notes.
Describe how the user felt throughout the day using narrative and emotion-aware language.
Insert short poetic reflections or metaphors where appropriate.
Offer one piece of kind, supportive advice based on the overall trend of their feelings.
Then, finish your message with:
"Overall, today you were [MOOD]" — selected from:
{mood_list}

Entries:
{mood_entries}"#,
    r#"Take the following mood diary entries with time, emotion, and a brief note.
Turn them into a soft, poetic narrative of the user's emotional day.
Your goal is to uplift and reflect.
Use light verse or poetic lines (but not rhyme-heavy), and create a story around the user's changing moods.
End with a line of comforting advice or hope.
Finally, conclude with this sentence on a new line:
"Overall, today you were [MOOD]"

Choose the [MOOD] from:
{mood_list}

Entries:
{mood_entries}"#,
    r#"Use the following entries (which include timestamp, mood, and a brief note) to write a creative summary of the user's day.
Present it as a flowing emotional narrative, tracing the user's journey through different moods.
Include metaphorical or poetic expressions where fitting.
Share one helpful tip or uplifting message for tomorrow.
Then on a new final line, output:
"Overall, today you were [MOOD]" — choosing one from:
{mood_list}

Diary entries:
{mood_entries}"#,
];

/// Render entries as `HH:MM LABEL: note` lines, wall-clock in the given
/// offset, preserving submission order. Entries with unrepresentable
/// timestamps are skipped.
pub fn render_entries(entries: &[MoodEntry], tz: FixedOffset) -> String {
    entries
        .iter()
        .filter_map(|entry| {
            local_datetime(entry.timestamp, tz)
                .map(|dt| format!("{} {}: {}", dt.format("%H:%M"), entry.label, entry.note))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Assemble the full generation prompt: render the entries, pick one of the
/// templates uniformly at random, substitute block and label list.
pub fn build_prompt<R: Rng + ?Sized>(
    rng: &mut R,
    entries: &[MoodEntry],
    tz: FixedOffset,
) -> String {
    let template = PROMPTS[rng.gen_range(0..PROMPTS.len())];
    template
        .replace("{mood_list}", &Mood::prompt_list())
        .replace("{mood_entries}", &render_entries(entries, tz))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn entry(timestamp: i64, label: &str, note: &str) -> MoodEntry {
        MoodEntry {
            timestamp,
            label: label.into(),
            note: note.into(),
            emoji: None,
        }
    }

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn test_render_reproduces_exact_wall_clock() {
        // 1700000000000 ms = 2023-11-14 22:13:20 UTC
        let rendered = render_entries(&[entry(1_700_000_000_000, "Happy", "coffee")], utc());
        assert_eq!(rendered, "22:13 Happy: coffee");
    }

    #[test]
    fn test_render_respects_offset() {
        let ist = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        let rendered = render_entries(&[entry(1_700_000_000_000, "Sleepy", "late")], ist);
        // 22:13:20 UTC + 05:30 = 03:43 next day
        assert_eq!(rendered, "03:43 Sleepy: late");
    }

    #[test]
    fn test_render_preserves_order() {
        let entries = vec![
            entry(1_700_000_000_000, "Anxious", "meeting"),
            entry(1_700_003_600_000, "Relaxed", "walk"),
        ];
        let rendered = render_entries(&entries, utc());
        assert_eq!(rendered, "22:13 Anxious: meeting\n23:13 Relaxed: walk");
    }

    #[test]
    fn test_prompt_contains_entries_sentinel_and_labels() {
        let mut rng = StdRng::seed_from_u64(7);
        let prompt = build_prompt(&mut rng, &[entry(1_700_000_000_000, "Happy", "coffee")], utc());
        assert!(prompt.contains("22:13 Happy: coffee"));
        assert!(prompt.contains("Overall, today you were [MOOD]"));
        for mood in Mood::ALL {
            assert!(prompt.contains(mood.as_str()), "missing {}", mood.as_str());
        }
        assert!(!prompt.contains("{mood_entries}"));
        assert!(!prompt.contains("{mood_list}"));
    }

    #[test]
    fn test_every_template_carries_the_sentinel() {
        for template in PROMPTS {
            assert!(template.contains(r#""Overall, today you were [MOOD]""#));
            assert!(template.contains("{mood_entries}"));
            assert!(template.contains("{mood_list}"));
        }
    }

    #[test]
    fn test_selection_is_deterministic_under_a_seed() {
        let entries = [entry(1_700_000_000_000, "Calm", "tea")];
        let a = build_prompt(&mut StdRng::seed_from_u64(42), &entries, utc());
        let b = build_prompt(&mut StdRng::seed_from_u64(42), &entries, utc());
        assert_eq!(a, b);
    }
}
