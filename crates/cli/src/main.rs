//! Slotboard CLI - Command-line interface for the Slotboard queue server

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::path::{Path, PathBuf};
use tabled::{Table, Tabled};

const DEFAULT_RPC_URL: &str = "http://127.0.0.1:9979";

/// Settings fields sent as JSON numbers; everything else is sent as a string
const NUMERIC_SETTINGS: &[&str] = &["slotMinutes", "viewBgOverlay", "viewShowCount"];

#[derive(Parser)]
#[command(name = "slotboard-cli")]
#[command(about = "Slotboard queue CLI", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// RPC server URL
    #[arg(long, env = "SLOTBOARD_RPC_URL", default_value = DEFAULT_RPC_URL)]
    rpc_url: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the queue in display order
    List,

    /// Book a slot (earliest free unless --time is given)
    Book {
        /// Name shown on the display
        name: String,

        /// Exact slot to book (HH:MM)
        #[arg(short, long)]
        time: Option<String>,
    },

    /// Remove an entry (served or cancelled)
    Remove {
        /// Entry ID
        id: String,
    },

    /// Show generated, taken and free slots
    Slots,

    /// Show current settings
    Settings,

    /// Update settings (e.g. `set dayStart=08:00 slotMinutes=20`)
    Set {
        /// key=value pairs
        #[arg(required = true)]
        assignments: Vec<String>,
    },

    /// Upload a PNG or JPEG background image
    Upload {
        /// Image file
        file: PathBuf,
    },

    /// Show server status
    Status,
}

#[derive(Serialize)]
struct JsonRpcRequest {
    jsonrpc: String,
    method: String,
    params: serde_json::Value,
    id: u64,
}

#[derive(Deserialize)]
struct JsonRpcResponse {
    #[allow(dead_code)]
    jsonrpc: String,
    #[allow(dead_code)]
    id: u64,
    result: Option<serde_json::Value>,
    error: Option<JsonRpcError>,
}

#[derive(Deserialize)]
struct JsonRpcError {
    code: i32,
    message: String,
}

#[derive(Deserialize)]
struct Slot {
    #[serde(rename = "type")]
    kind: String,
    time: String,
}

#[derive(Deserialize)]
struct QueueItem {
    id: String,
    name: String,
    slot: Slot,
}

#[derive(Tabled)]
struct QueueRow {
    #[tabled(rename = "#")]
    position: usize,
    time: String,
    name: String,
    mode: String,
    id: String,
}

async fn call_rpc(url: &str, method: &str, params: serde_json::Value) -> Result<serde_json::Value> {
    let request = JsonRpcRequest {
        jsonrpc: "2.0".to_string(),
        method: method.to_string(),
        params,
        id: 1,
    };

    let client = reqwest::Client::new();
    let response: JsonRpcResponse = client
        .post(url)
        .json(&request)
        .send()
        .await
        .context("Failed to connect to server")?
        .json()
        .await
        .context("Failed to parse response")?;

    if let Some(error) = response.error {
        anyhow::bail!("RPC error ({}): {}", error.code, error.message);
    }

    response
        .result
        .ok_or_else(|| anyhow::anyhow!("No result in response"))
}

fn print_queue(result: &serde_json::Value) -> Result<()> {
    let items: Vec<QueueItem> = serde_json::from_value(result["queue"].clone())?;
    if items.is_empty() {
        println!("{}", "Queue is empty".yellow());
        return Ok(());
    }

    let rows: Vec<QueueRow> = items
        .into_iter()
        .enumerate()
        .map(|(i, item)| QueueRow {
            position: i + 1,
            time: item.slot.time,
            name: item.name,
            mode: item.slot.kind,
            id: item.id,
        })
        .collect();
    println!("{}", Table::new(rows));
    Ok(())
}

/// Parse `key=value` into a settings patch entry
fn parse_assignment(raw: &str) -> Result<(String, serde_json::Value)> {
    let (key, value) = raw
        .split_once('=')
        .with_context(|| format!("Expected key=value, got {:?}", raw))?;
    let key = key.trim();
    if key.is_empty() {
        anyhow::bail!("Empty key in {:?}", raw);
    }

    let value = if NUMERIC_SETTINGS.contains(&key) {
        serde_json::from_str(value.trim())
            .with_context(|| format!("{} expects a number, got {:?}", key, value))?
    } else {
        serde_json::Value::String(value.to_string())
    };
    Ok((key.to_string(), value))
}

fn content_type_for(path: &Path) -> Result<&'static str> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "png" => Ok("image/png"),
        "jpg" | "jpeg" => Ok("image/jpeg"),
        _ => anyhow::bail!("Only PNG or JPEG allowed: {}", path.display()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::List => {
            let result = call_rpc(&cli.rpc_url, "queue.list.v1", json!({})).await?;
            print_queue(&result)?;
        }

        Commands::Book { name, time } => {
            let params = match time {
                Some(time) => json!({ "name": name, "mode": "manual", "time": time }),
                None => json!({ "name": name, "mode": "auto" }),
            };

            let result = call_rpc(&cli.rpc_url, "queue.book.v1", params).await?;
            let item: QueueItem = serde_json::from_value(result["item"].clone())?;

            println!(
                "{}",
                format!("✓ {} booked for {}", item.name, item.slot.time)
                    .green()
                    .bold()
            );
            println!();
            print_queue(&result)?;
        }

        Commands::Remove { id } => {
            let result = call_rpc(&cli.rpc_url, "queue.remove.v1", json!({ "id": id })).await?;

            println!("{}", format!("✓ Entry {} removed", id).green().bold());
            println!();
            print_queue(&result)?;
        }

        Commands::Slots => {
            let result = call_rpc(&cli.rpc_url, "slots.list.v1", json!({})).await?;
            let slots: Vec<String> = serde_json::from_value(result["slots"].clone())?;
            let taken: Vec<String> = serde_json::from_value(result["taken"].clone())?;

            if slots.is_empty() {
                println!("{}", "No slots configured".yellow());
            }
            for slot in &slots {
                if taken.contains(slot) {
                    println!("  {} {}", slot, "taken".red());
                } else {
                    println!("  {} {}", slot, "free".green());
                }
            }
            println!();
            println!(
                "  {} {} of {} free",
                "Available:".bold(),
                slots.len() - taken.iter().filter(|t| slots.contains(t)).count(),
                slots.len()
            );
        }

        Commands::Settings => {
            let result = call_rpc(&cli.rpc_url, "settings.get.v1", json!({})).await?;
            println!("{}", "Settings".cyan().bold());
            if let Some(settings) = result["settings"].as_object() {
                for (key, value) in settings {
                    println!("  {} {}", format!("{}:", key).bold(), value);
                }
            }
        }

        Commands::Set { assignments } => {
            let mut patch = serde_json::Map::new();
            for raw in &assignments {
                let (key, value) = parse_assignment(raw)?;
                patch.insert(key, value);
            }

            call_rpc(
                &cli.rpc_url,
                "settings.update.v1",
                serde_json::Value::Object(patch),
            )
            .await?;

            println!("{}", "✓ Settings updated".green().bold());
        }

        Commands::Upload { file } => {
            let content_type = content_type_for(&file)?;
            let bytes = tokio::fs::read(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;

            let params = json!({
                "contentType": content_type,
                "data": STANDARD.encode(&bytes),
            });
            let result = call_rpc(&cli.rpc_url, "background.upload.v1", params).await?;

            println!(
                "{}",
                format!("✓ Background uploaded: {}", result["url"].as_str().unwrap_or("?"))
                    .green()
                    .bold()
            );
        }

        Commands::Status => {
            println!("{}", "Server Status".cyan().bold());
            println!();

            match call_rpc(&cli.rpc_url, "system.health.v1", json!({})).await {
                Ok(health) => {
                    println!("  {} {}", "RPC URL:".bold(), cli.rpc_url);
                    println!("  {} {}", "Status:".bold(), "ONLINE".green());
                    println!("  {} {}", "Version:".bold(), health["version"]);
                    println!("  {} {} seconds", "Uptime:".bold(), health["uptime_seconds"]);
                }
                Err(e) => {
                    println!("  {} {}", "Status:".bold(), "ERROR".red());
                    println!("  {} {}", "Error:".bold(), e);
                }
            }
        }
    }

    Ok(())
}
