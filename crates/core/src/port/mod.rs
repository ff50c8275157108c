// Port Layer - Interfaces for external dependencies

pub mod id_provider; // For deterministic testing
pub mod image_store;
pub mod queue_repository;
pub mod settings_repository;
pub mod time_provider;
pub mod transaction;

// Re-exports
pub use id_provider::IdProvider;
pub use image_store::ImageStore;
pub use queue_repository::QueueRepository;
pub use settings_repository::SettingsRepository;
pub use time_provider::TimeProvider;
pub use transaction::{QueueTransaction, Transaction};
