//! Slot generation and availability

use super::entry::QueueEntry;
use super::settings::SlotInterval;
use super::time::{format_time, parse_time};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Interval used when the configured one is non-positive or non-numeric
pub const DEFAULT_INTERVAL_MINUTES: u32 = 10;

/// Bookable window and slot length
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotConfig {
    pub day_start: String,
    pub day_end: String,
    pub slot_minutes: SlotInterval,
}

impl SlotConfig {
    pub fn new(day_start: impl Into<String>, day_end: impl Into<String>, minutes: i64) -> Self {
        Self {
            day_start: day_start.into(),
            day_end: day_end.into(),
            slot_minutes: SlotInterval::new(minutes),
        }
    }
}

/// Slot start times tiling `[dayStart, dayEnd)` with no partial trailing slot.
///
/// Recomputed on every call. A malformed bound, `dayStart >= dayEnd`, or an
/// interval that does not fit yields an empty list.
pub fn generate_slots(config: &SlotConfig) -> Vec<String> {
    let (start, end) = match (parse_time(&config.day_start), parse_time(&config.day_end)) {
        (Ok(start), Ok(end)) => (start, end),
        _ => {
            tracing::debug!(
                day_start = %config.day_start,
                day_end = %config.day_end,
                "Malformed day bounds, no slots generated"
            );
            return Vec::new();
        }
    };
    let step = config.slot_minutes.effective_minutes();

    let mut slots = Vec::new();
    let mut t = start;
    while t + step <= end {
        slots.push(format_time(t));
        t += step;
    }
    slots
}

/// Distinct slot times currently held in the queue
pub fn taken_times(queue: &[QueueEntry]) -> BTreeSet<String> {
    queue
        .iter()
        .map(|entry| entry.slot.time.as_str())
        .filter(|time| !time.is_empty())
        .map(str::to_string)
        .collect()
}

/// Generated slots minus taken ones, generator order preserved
pub fn available_slots(all: &[String], taken: &BTreeSet<String>) -> Vec<String> {
    all.iter().filter(|slot| !taken.contains(*slot)).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entry::{BookingMode, QueueEntry, SlotAssignment};
    use chrono::{TimeZone, Utc};

    fn entry(id: &str, time: &str) -> QueueEntry {
        QueueEntry::new(
            id,
            "guest",
            Utc.timestamp_millis_opt(1_000).unwrap(),
            SlotAssignment::new(BookingMode::Auto, time),
        )
    }

    #[test]
    fn test_half_hour_quarter_slots() {
        let config = SlotConfig::new("09:00", "09:30", 15);
        assert_eq!(generate_slots(&config), vec!["09:00", "09:15"]);
    }

    #[test]
    fn test_no_partial_trailing_slot() {
        let config = SlotConfig::new("09:00", "09:40", 15);
        assert_eq!(generate_slots(&config), vec!["09:00", "09:15"]);
    }

    #[test]
    fn test_slot_properties_hold_for_valid_configs() {
        for (start, end, interval) in [("08:00", "17:00", 15), ("09:10", "12:00", 7), ("00:00", "24:00", 60)] {
            let config = SlotConfig::new(start, end, interval);
            let slots = generate_slots(&config);
            let start_m = parse_time(start).unwrap();
            let end_m = parse_time(end).unwrap();
            let step = interval as u32;

            assert_eq!(slots.len() as u32, (end_m - start_m) / step);
            let minutes: Vec<u32> = slots.iter().map(|s| parse_time(s).unwrap()).collect();
            assert_eq!(minutes[0], start_m);
            for pair in minutes.windows(2) {
                assert_eq!(pair[1] - pair[0], step);
            }
            assert!(minutes.iter().all(|m| *m >= start_m && *m < end_m));
        }
    }

    #[test]
    fn test_inverted_or_empty_window_yields_nothing() {
        assert!(generate_slots(&SlotConfig::new("17:00", "09:00", 15)).is_empty());
        assert!(generate_slots(&SlotConfig::new("09:00", "09:00", 15)).is_empty());
        assert!(generate_slots(&SlotConfig::new("09:00", "09:10", 15)).is_empty());
        assert!(generate_slots(&SlotConfig::new("nine", "17:00", 15)).is_empty());
    }

    #[test]
    fn test_non_positive_interval_falls_back_to_default() {
        let zero = generate_slots(&SlotConfig::new("09:00", "09:30", 0));
        let negative = generate_slots(&SlotConfig::new("09:00", "09:30", -5));
        assert_eq!(zero, vec!["09:00", "09:10", "09:20"]);
        assert_eq!(negative, zero);
    }

    #[test]
    fn test_taken_and_available() {
        let all = generate_slots(&SlotConfig::new("09:00", "10:00", 15));
        let queue = vec![entry("a", "09:15"), entry("b", "09:45"), entry("c", "09:15")];

        let taken = taken_times(&queue);
        assert_eq!(taken.len(), 2);
        assert!(taken.contains("09:15") && taken.contains("09:45"));

        assert_eq!(available_slots(&all, &taken), vec!["09:00", "09:30"]);
    }
}
