// Domain Layer - Pure business logic and entities

pub mod background;
pub mod entry;
pub mod error;
pub mod settings;
pub mod slot;
pub mod time;

// Re-exports
pub use background::{BackgroundImage, ImageKind, DEFAULT_MAX_UPLOAD_BYTES};
pub use entry::{sorted_view, BookingMode, EntryId, QueueEntry, SlotAssignment};
pub use error::DomainError;
pub use settings::{Settings, SettingsPatch, SlotInterval};
pub use slot::{available_slots, generate_slots, taken_times, SlotConfig, DEFAULT_INTERVAL_MINUTES};
pub use time::{format_time, parse_time, MINUTES_PER_DAY};
