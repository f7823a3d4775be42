// subinfo-api: Async Rust client for VPN subscription panels

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

pub use client::PanelClient;
pub use error::Error;
pub use models::{InfoResponse, WireTimestamp};
pub use transport::{TlsMode, TransportConfig};
