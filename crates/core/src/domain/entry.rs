// Queue Entry Domain Model

use super::time::parse_time;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Entry ID (UUID v4)
pub type EntryId = String;

/// How the slot of an entry was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingMode {
    Manual,
    Auto,
}

impl BookingMode {
    /// Anything other than `manual` books automatically
    pub fn from_request(mode: Option<&str>) -> Self {
        match mode.map(str::trim) {
            Some("manual") => BookingMode::Manual,
            _ => BookingMode::Auto,
        }
    }
}

impl std::fmt::Display for BookingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookingMode::Manual => write!(f, "manual"),
            BookingMode::Auto => write!(f, "auto"),
        }
    }
}

/// Slot held by an entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotAssignment {
    #[serde(rename = "type")]
    pub kind: BookingMode,
    pub time: String,
}

impl SlotAssignment {
    pub fn new(kind: BookingMode, time: impl Into<String>) -> Self {
        Self {
            kind,
            time: time.into(),
        }
    }
}

/// A person waiting in the queue. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueEntry {
    pub id: EntryId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub slot: SlotAssignment,
    /// Cached minutes since midnight of `slot.time`
    pub slot_minutes: Option<u32>,
}

impl QueueEntry {
    /// Create a new entry
    ///
    /// # Arguments
    ///
    /// * `id` - Unique entry ID (injected, not generated)
    /// * `name` - Display name, stored trimmed
    /// * `created_at` - Creation timestamp (injected, not system time)
    /// * `slot` - Assigned slot
    pub fn new(
        id: impl Into<String>,
        name: impl AsRef<str>,
        created_at: DateTime<Utc>,
        slot: SlotAssignment,
    ) -> Self {
        let slot_minutes = parse_time(&slot.time).ok();
        Self {
            id: id.into(),
            name: name.as_ref().trim().to_string(),
            created_at,
            slot,
            slot_minutes,
        }
    }

    fn display_order(&self, other: &Self) -> Ordering {
        // Entries without a slot time sort after every scheduled one
        let by_slot = match (self.slot_minutes, other.slot_minutes) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        by_slot.then_with(|| self.created_at.cmp(&other.created_at))
    }
}

/// Queue as shown to the display: by slot time, then arrival.
///
/// Pure projection; the stored queue keeps insertion order. The sort is
/// stable, so full ties keep insertion order too.
pub fn sorted_view(queue: &[QueueEntry]) -> Vec<QueueEntry> {
    let mut view = queue.to_vec();
    view.sort_by(QueueEntry::display_order);
    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(millis: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(millis).unwrap()
    }

    fn entry(id: &str, time: &str, created: i64) -> QueueEntry {
        QueueEntry::new(id, id, at(created), SlotAssignment::new(BookingMode::Manual, time))
    }

    #[test]
    fn test_entry_caches_minutes_and_trims_name() {
        let e = QueueEntry::new(
            "id-1",
            "  Alice \n",
            at(0),
            SlotAssignment::new(BookingMode::Auto, "09:15"),
        );
        assert_eq!(e.name, "Alice");
        assert_eq!(e.slot_minutes, Some(555));
    }

    #[test]
    fn test_mode_from_request() {
        assert_eq!(BookingMode::from_request(Some("manual")), BookingMode::Manual);
        assert_eq!(BookingMode::from_request(Some("auto")), BookingMode::Auto);
        assert_eq!(BookingMode::from_request(Some("whatever")), BookingMode::Auto);
        assert_eq!(BookingMode::from_request(None), BookingMode::Auto);
    }

    #[test]
    fn test_sorted_by_slot_regardless_of_insertion() {
        let queue = vec![entry("late", "09:15", 2_000), entry("early", "09:00", 1_000)];
        let view = sorted_view(&queue);
        assert_eq!(view[0].id, "early");
        assert_eq!(view[1].id, "late");
        // Underlying order untouched
        assert_eq!(queue[0].id, "late");
    }

    #[test]
    fn test_unscheduled_sort_last_by_arrival() {
        let queue = vec![
            entry("no-time-b", "", 3_000),
            entry("no-time-a", "bogus", 2_000),
            entry("scheduled", "16:00", 4_000),
        ];
        let ids: Vec<_> = sorted_view(&queue).into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["scheduled", "no-time-a", "no-time-b"]);
    }

    #[test]
    fn test_same_slot_tie_breaks_on_created_at() {
        let queue = vec![entry("second", "10:00", 5_000), entry("first", "10:00", 1_000)];
        let view = sorted_view(&queue);
        assert_eq!(view[0].id, "first");
    }

    #[test]
    fn test_sorted_view_idempotent() {
        let queue = vec![
            entry("c", "11:00", 3),
            entry("a", "09:00", 1),
            entry("b", "10:00", 2),
        ];
        let once = sorted_view(&queue);
        let twice = sorted_view(&once);
        assert_eq!(once, twice);
        assert_eq!(once, sorted_view(&queue));
    }

    #[test]
    fn test_wire_shape() {
        let e = entry("x", "09:00", 0);
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(json["slot"]["type"], "manual");
        assert_eq!(json["slot"]["time"], "09:00");
        assert_eq!(json["slotMinutes"], 540);
        assert!(json["createdAt"].is_string());
    }
}
