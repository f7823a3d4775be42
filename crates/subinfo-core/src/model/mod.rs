// ── Domain model ──
//
// Canonical types consumed by the view builder and the CLI. Wire types
// from `subinfo-api` are converted into these in `convert.rs`.

pub mod apps;
pub mod config_entry;
pub mod status;
pub mod subscription;

pub use apps::{AppCatalog, ClientApp, OperatingSystem, TutorialStep};
pub use config_entry::ConfigEntry;
pub use status::{StatusFlags, SubscriptionStatus, Tone, derive_status};
pub use subscription::SubscriptionInfo;
