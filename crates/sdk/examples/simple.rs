//! Simple SDK Example
//!
//! Demonstrates basic usage of the Slotboard SDK.
//!
//! # Usage
//!
//! 1. Start the server:
//!    ```bash
//!    cargo run --package slotboard-daemon
//!    ```
//!
//! 2. Run this example:
//!    ```bash
//!    cargo run --example simple
//!    ```

use serde_json::json;
use slotboard_sdk::SlotboardClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Slotboard SDK - Simple Example");
    println!("==============================\n");

    // 1. Connect to server
    println!("1. Connecting to server...");
    let client = SlotboardClient::connect("http://127.0.0.1:9979").await?;
    let health = client.health().await?;
    println!("   ✓ Connected (v{})\n", health.version);

    // 2. Shorten the day to a handful of slots
    println!("2. Configuring slots...");
    client
        .update_settings(json!({ "dayStart": "09:00", "dayEnd": "10:00", "slotMinutes": 15 }))
        .await?;
    let slots = client.slots().await?;
    println!("   ✓ Slots: {}\n", slots.slots.join(", "));

    // 3. Book one manual and one automatic slot
    println!("3. Booking...");
    let alice = client.book_manual("Alice", "09:30").await?;
    println!("   ✓ {} -> {}", alice.item.name, alice.item.slot.time);
    let bob = client.book_auto("Bob").await?;
    println!("   ✓ {} -> {}\n", bob.item.name, bob.item.slot.time);

    // 4. Show the queue in display order
    println!("4. Queue:");
    for item in client.list_queue().await?.queue {
        println!("   {}  {} ({})", item.slot.time, item.name, item.slot.kind);
    }

    // 5. Serve Bob
    client.remove(bob.item.id).await?;
    println!("\n5. Bob served; {} left", client.list_queue().await?.queue.len());

    Ok(())
}
