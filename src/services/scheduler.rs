use chrono::{DateTime, FixedOffset, NaiveTime, Timelike, Utc};
use std::sync::Arc;

use crate::config::Config;
use crate::services::push::{pick_notification, PushDispatcher};

/// Firings outside 09:00–22:00 local are dropped. Redundant with the
/// default hour list, but the hours are configurable and the window is not.
const WINDOW_START_HOUR: u32 = 9;
const WINDOW_END_HOUR: u32 = 22;

/// Background reminder loop: sleep until the next configured hour/minute in
/// the service offset, then dispatch a random reminder. Ticks are stateless;
/// a restart resumes the schedule with no catch-up of missed firings.
pub fn spawn_notification_scheduler(dispatcher: Arc<PushDispatcher>, config: Arc<Config>) {
    tokio::spawn(async move {
        let tz = config.tz_offset();
        let mut hours: Vec<u32> = config
            .notify_hours
            .iter()
            .copied()
            .filter(|h| *h < 24)
            .collect();
        hours.sort_unstable();
        hours.dedup();
        let minute = config.notify_minute.min(59);

        if hours.is_empty() {
            tracing::warn!("No valid notification hours configured, scheduler idle");
            return;
        }
        tracing::info!(?hours, minute, "Notification scheduler started");

        loop {
            let now = Utc::now().with_timezone(&tz);
            let Some(next) = next_fire_time(now, &hours, minute) else {
                tracing::warn!("Could not compute next firing time, retrying in an hour");
                tokio::time::sleep(std::time::Duration::from_secs(3600)).await;
                continue;
            };
            let wait = (next - now).to_std().unwrap_or_default();
            tracing::debug!(next = %next, "Sleeping until next notification slot");
            tokio::time::sleep(wait).await;

            let local = Utc::now().with_timezone(&tz);
            if !within_active_window(local.time()) {
                tracing::debug!(at = %local, "Outside active window, skipping dispatch");
                continue;
            }

            let (title, body) = pick_notification(&mut rand::thread_rng());
            match dispatcher.send(title, body).await {
                Ok(summary) => {
                    tracing::info!(
                        batches = summary.batches,
                        delivered = summary.delivered,
                        failed = summary.failed,
                        "Scheduled notifications dispatched"
                    );
                }
                Err(e) => {
                    tracing::error!(error = %e, "Scheduled dispatch failed");
                }
            }
        }
    });
}

/// Earliest configured firing strictly after `now`: today's remaining hours
/// first, else the first hour tomorrow. `hours` must be sorted.
fn next_fire_time(
    now: DateTime<FixedOffset>,
    hours: &[u32],
    minute: u32,
) -> Option<DateTime<FixedOffset>> {
    let tz = now.timezone();
    let at = |date: chrono::NaiveDate, hour: u32| {
        date.and_hms_opt(hour, minute, 0)
            .and_then(|dt| dt.and_local_timezone(tz).single())
    };

    let today = now.date_naive();
    for &hour in hours {
        if let Some(candidate) = at(today, hour) {
            if candidate > now {
                return Some(candidate);
            }
        }
    }

    let tomorrow = today.succ_opt()?;
    hours.first().and_then(|&hour| at(tomorrow, hour))
}

fn within_active_window(time: NaiveTime) -> bool {
    (WINDOW_START_HOUR..WINDOW_END_HOUR).contains(&time.hour())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local(h: u32, m: u32) -> DateTime<FixedOffset> {
        let tz = FixedOffset::east_opt(0).unwrap();
        chrono::NaiveDate::from_ymd_opt(2026, 8, 6)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
            .and_local_timezone(tz)
            .single()
            .unwrap()
    }

    const HOURS: [u32; 5] = [9, 12, 15, 18, 21];

    #[test]
    fn test_next_fire_picks_next_hour_today() {
        let next = next_fire_time(local(10, 30), &HOURS, 0).unwrap();
        assert_eq!(next, local(12, 0));
    }

    #[test]
    fn test_next_fire_is_strictly_after_now() {
        // Exactly on a slot: the following slot is next, never the current
        // instant (which would busy-loop).
        let next = next_fire_time(local(9, 0), &HOURS, 0).unwrap();
        assert_eq!(next, local(12, 0));
    }

    #[test]
    fn test_next_fire_rolls_over_to_tomorrow() {
        let next = next_fire_time(local(21, 30), &HOURS, 0).unwrap();
        assert_eq!(next.date_naive(), local(0, 0).date_naive().succ_opt().unwrap());
        assert_eq!(next.time(), NaiveTime::from_hms_opt(9, 0, 0).unwrap());
    }

    #[test]
    fn test_next_fire_honors_minute_offset() {
        let next = next_fire_time(local(9, 10), &HOURS, 15).unwrap();
        assert_eq!(next, local(9, 15));
    }

    #[test]
    fn test_active_window_edges() {
        assert!(!within_active_window(NaiveTime::from_hms_opt(8, 59, 0).unwrap()));
        assert!(within_active_window(NaiveTime::from_hms_opt(9, 0, 0).unwrap()));
        assert!(within_active_window(NaiveTime::from_hms_opt(21, 59, 0).unwrap()));
        assert!(!within_active_window(NaiveTime::from_hms_opt(22, 0, 0).unwrap()));
    }
}
