// Slotboard Infrastructure - In-Memory Adapter
// Implements: QueueRepository (with QueueTransaction), SettingsRepository
//
// State lives for the lifetime of the process only.

mod queue_repository;
mod settings_repository;
mod transaction;

pub use queue_repository::MemoryQueueRepository;
pub use settings_repository::MemorySettingsRepository;
pub use transaction::MemoryQueueTransaction;
