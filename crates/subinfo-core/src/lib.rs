// subinfo-core: Subscription data layer between subinfo-api and the CLI.
//
// Loads a subscription, reconciles its configuration links, derives the
// display metrics, and builds the view-model the CLI renders.

pub mod backend;
pub mod config;
pub mod convert;
pub mod error;
pub mod i18n;
pub mod links;
pub mod loader;
pub mod metrics;
pub mod model;
pub mod panel;
pub mod view;

// ── Primary re-exports ──────────────────────────────────────────────
pub use backend::PanelBackend;
pub use config::{DisplayConfig, PanelConfig, Sections, TlsVerification};
pub use error::CoreError;
pub use i18n::{Locale, Translator};
pub use links::{LinkSource, ResolvedLinks};
pub use loader::{LoadState, SubscriptionLoader};
pub use metrics::{TimeMetrics, UsageMetrics};
pub use panel::Panel;
pub use view::{AppView, OsView, PanelView, StatusView, TutorialView, build_view};

pub use model::{
    AppCatalog, ClientApp, ConfigEntry, OperatingSystem, SubscriptionInfo, SubscriptionStatus,
    Tone, TutorialStep,
};
