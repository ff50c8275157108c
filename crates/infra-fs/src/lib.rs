// Slotboard Infrastructure - Filesystem Adapters
// Implements: ImageStore

pub mod image_store;

pub use image_store::FsImageStore;
