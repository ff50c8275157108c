// Allocate Use Case

use crate::domain::{
    generate_slots, taken_times, BookingMode, QueueEntry, SlotAssignment, SlotConfig,
};
use crate::error::{AppError, Result};
use crate::port::{IdProvider, QueueRepository, SettingsRepository, TimeProvider};
use serde::{Deserialize, Serialize};

/// Booking request as received from a caller
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingRequest {
    #[serde(default)]
    pub name: String,

    /// `manual` or `auto`; anything else means `auto`
    #[serde(default)]
    pub mode: Option<String>,

    /// Requested slot, required for manual bookings
    #[serde(default)]
    pub time: Option<String>,
}

impl BookingRequest {
    pub fn auto(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mode: Some("auto".to_string()),
            time: None,
        }
    }

    pub fn manual(name: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mode: Some("manual".to_string()),
            time: Some(time.into()),
        }
    }
}

/// Choose a slot for a new entry against the given queue.
///
/// Pure with respect to the queue: the caller appends the returned entry.
pub fn book_slot(
    req: &BookingRequest,
    config: &SlotConfig,
    queue: &[QueueEntry],
    id_provider: &dyn IdProvider,
    time_provider: &dyn TimeProvider,
) -> Result<QueueEntry> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("name required".to_string()));
    }

    let mode = BookingMode::from_request(req.mode.as_deref());
    let slots = generate_slots(config);
    let taken = taken_times(queue);

    let chosen = match mode {
        BookingMode::Manual => {
            let requested = req.time.as_deref().map(str::trim).unwrap_or_default();
            if requested.is_empty() {
                return Err(AppError::Validation(
                    "time required for manual booking".to_string(),
                ));
            }
            if !slots.iter().any(|slot| slot == requested) {
                return Err(AppError::Validation("invalid slot".to_string()));
            }
            if taken.contains(requested) {
                return Err(AppError::Conflict("slot taken".to_string()));
            }
            requested.to_string()
        }
        BookingMode::Auto => slots
            .into_iter()
            .find(|slot| !taken.contains(slot))
            .ok_or_else(|| AppError::Conflict("no slots available".to_string()))?,
    };

    Ok(QueueEntry::new(
        id_provider.generate_id(),
        name,
        time_provider.now(),
        SlotAssignment::new(mode, chosen),
    ))
}

/// Execute booking use case (with transaction for atomicity)
///
/// # Arguments
///
/// * `queue_repo` - Queue repository; its transaction serializes bookings
/// * `settings_repo` - Source of the current slot configuration
/// * `id_provider` - ID generator (injected for determinism)
/// * `time_provider` - Time provider (injected for determinism)
/// * `req` - Booking request
pub async fn execute(
    queue_repo: &dyn QueueRepository,
    settings_repo: &dyn SettingsRepository,
    id_provider: &dyn IdProvider,
    time_provider: &dyn TimeProvider,
    req: BookingRequest,
) -> Result<QueueEntry> {
    let config = settings_repo.load().await?.slot_config();

    // Taken-slot check and append must not interleave with another booking
    let mut tx = queue_repo.begin_transaction().await?;

    let entry = match book_slot(&req, &config, &tx.entries(), id_provider, time_provider) {
        Ok(entry) => entry,
        Err(e) => {
            tx.rollback().await?;
            return Err(e);
        }
    };

    tx.insert(entry.clone());
    tx.commit().await?;

    tracing::info!(
        entry_id = %entry.id,
        mode = %entry.slot.kind,
        time = %entry.slot.time,
        "Slot booked"
    );

    Ok(entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::id_provider::SequentialIdProvider;
    use crate::port::time_provider::SteppingTimeProvider;

    struct Fixture {
        ids: SequentialIdProvider,
        clock: SteppingTimeProvider,
        config: SlotConfig,
        queue: Vec<QueueEntry>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                ids: SequentialIdProvider::default(),
                clock: SteppingTimeProvider::starting_at(1_700_000_000_000),
                config: SlotConfig::new("09:00", "09:30", 15),
                queue: Vec::new(),
            }
        }

        fn book(&mut self, req: BookingRequest) -> Result<QueueEntry> {
            let entry = book_slot(&req, &self.config, &self.queue, &self.ids, &self.clock)?;
            self.queue.push(entry.clone());
            Ok(entry)
        }
    }

    #[test]
    fn test_manual_then_conflict() {
        let mut f = Fixture::new();
        let alice = f.book(BookingRequest::manual("Alice", "09:00")).unwrap();
        assert_eq!(alice.slot.time, "09:00");
        assert_eq!(alice.slot.kind, BookingMode::Manual);

        let err = f.book(BookingRequest::manual("Eve", "09:00")).unwrap_err();
        assert!(matches!(err, AppError::Conflict(ref m) if m == "slot taken"));
        assert_eq!(f.queue.len(), 1);
    }

    #[test]
    fn test_auto_picks_earliest_then_exhausts() {
        let mut f = Fixture::new();
        f.book(BookingRequest::manual("Alice", "09:00")).unwrap();

        let bob = f.book(BookingRequest::auto("Bob")).unwrap();
        assert_eq!(bob.slot.time, "09:15");
        assert_eq!(bob.slot.kind, BookingMode::Auto);

        let err = f.book(BookingRequest::auto("Carol")).unwrap_err();
        assert!(matches!(err, AppError::Conflict(ref m) if m == "no slots available"));
    }

    #[test]
    fn test_auto_fills_gap_before_later_slots() {
        let mut f = Fixture::new();
        f.config = SlotConfig::new("09:00", "10:00", 15);
        f.book(BookingRequest::manual("A", "09:15")).unwrap();
        f.book(BookingRequest::manual("B", "09:45")).unwrap();

        assert_eq!(f.book(BookingRequest::auto("C")).unwrap().slot.time, "09:00");
        assert_eq!(f.book(BookingRequest::auto("D")).unwrap().slot.time, "09:30");
    }

    #[test]
    fn test_name_required() {
        let mut f = Fixture::new();
        let err = f.book(BookingRequest::auto("   ")).unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m == "name required"));
    }

    #[test]
    fn test_manual_validation() {
        let mut f = Fixture::new();
        let missing = BookingRequest {
            name: "Alice".into(),
            mode: Some("manual".into()),
            time: None,
        };
        assert!(matches!(f.book(missing).unwrap_err(), AppError::Validation(_)));

        let err = f.book(BookingRequest::manual("Alice", "09:05")).unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m == "invalid slot"));

        let err = f.book(BookingRequest::manual("Alice", "9:00")).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_unknown_mode_books_automatically() {
        let mut f = Fixture::new();
        let req = BookingRequest {
            name: "Dan".into(),
            mode: Some("asap".into()),
            time: Some("09:15".into()),
        };
        let entry = f.book(req).unwrap();
        assert_eq!(entry.slot.kind, BookingMode::Auto);
        assert_eq!(entry.slot.time, "09:00");
    }

    #[test]
    fn test_empty_config_has_no_slots() {
        let mut f = Fixture::new();
        f.config = SlotConfig::new("17:00", "09:00", 15);
        let err = f.book(BookingRequest::auto("Bob")).unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[test]
    fn test_no_duplicate_times_after_many_bookings() {
        let mut f = Fixture::new();
        f.config = SlotConfig::new("08:00", "12:00", 10);
        let mut accepted = 0;
        for i in 0..40 {
            let req = if i % 3 == 0 {
                BookingRequest::manual(format!("m{i}"), "09:00")
            } else {
                BookingRequest::auto(format!("a{i}"))
            };
            if f.book(req).is_ok() {
                accepted += 1;
            }
        }
        let taken = taken_times(&f.queue);
        assert_eq!(taken.len(), accepted);
        assert_eq!(accepted, 24);
    }
}
