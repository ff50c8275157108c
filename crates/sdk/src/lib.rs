//! Slotboard SDK - Rust Client Library
//!
//! Provides a convenient client for the Slotboard queue server.
//!
//! # Example
//!
//! ```no_run
//! use slotboard_sdk::SlotboardClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Connect to the server
//!     let client = SlotboardClient::connect("http://127.0.0.1:9979").await?;
//!
//!     // Take the earliest free slot
//!     let booked = client.book_auto("Alice").await?;
//!
//!     println!("{} booked {}", booked.item.name, booked.item.slot.time);
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod types;

pub use client::SlotboardClient;
pub use error::{Result, SdkError};
pub use types::{
    BookRequest, BookResponse, HealthResponse, QueueItem, QueueResponse, RemoveRequest,
    SettingsResponse, SlotInfo, SlotsResponse, UploadRequest, UploadResponse,
};
