// Application Layer - Use Cases and Business Logic

pub mod background;
pub mod booking;
pub mod settings;

// Re-exports
pub use background::{BackgroundService, BackgroundUpload};
pub use booking::{BookingOutcome, BookingRequest, QueueService, SlotOverview};
pub use settings::SettingsService;
