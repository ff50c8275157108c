//! JSON-RPC API Layer
//!
//! Implements the JSON-RPC 2.0 server the display and admin screens talk to,
//! and serves uploaded backgrounds from the same listener.

pub mod error;
pub mod handler;
pub mod server;
pub mod types;
pub mod uploads;

pub use handler::RpcHandler;
pub use jsonrpsee::server::ServerHandle;
pub use server::{RpcServer, RpcServerConfig};
pub use uploads::ServeUploadsLayer;
