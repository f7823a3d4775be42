// ── Panel orchestrator ──
//
// Owns the loader and the display settings. Each `refresh()` loads the
// subscription, resolves its links, and rebuilds the view-model from
// scratch; the result is published as a whole `Arc` snapshot.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use subinfo_api::transport::{TlsMode, TransportConfig};
use subinfo_api::PanelClient;
use tokio::sync::watch;
use tracing::debug;

use crate::backend::PanelBackend;
use crate::config::{DisplayConfig, PanelConfig, TlsVerification};
use crate::error::CoreError;
use crate::links;
use crate::loader::{LoadState, SubscriptionLoader};
use crate::model::AppCatalog;
use crate::view::{PanelView, build_view};

/// The main entry point for consumers.
pub struct Panel<B = PanelClient> {
    loader: SubscriptionLoader<B>,
    display: DisplayConfig,
    catalog: AppCatalog,
    view: watch::Sender<Option<Arc<PanelView>>>,
}

impl Panel<PanelClient> {
    /// Build a panel backed by the HTTP client. No request is made until
    /// [`refresh()`](Self::refresh).
    pub fn connect(
        config: &PanelConfig,
        display: DisplayConfig,
        catalog: AppCatalog,
    ) -> Result<Self, CoreError> {
        let client = PanelClient::new(config.url.clone(), &build_transport(config))?;
        debug!(url = %client.info_url(), "panel client ready");
        Ok(Self::with_backend(client, display, catalog))
    }

    /// One-shot: build, refresh once, return the view.
    pub async fn oneshot(
        config: &PanelConfig,
        display: DisplayConfig,
        catalog: AppCatalog,
    ) -> Result<Arc<PanelView>, CoreError> {
        Self::connect(config, display, catalog)?.refresh().await
    }
}

impl<B: PanelBackend> Panel<B> {
    pub fn with_backend(backend: B, display: DisplayConfig, catalog: AppCatalog) -> Self {
        let (view, _) = watch::channel(None);
        Self {
            loader: SubscriptionLoader::new(Arc::new(backend)),
            display,
            catalog,
            view,
        }
    }

    pub fn display(&self) -> &DisplayConfig {
        &self.display
    }

    pub fn catalog(&self) -> &AppCatalog {
        &self.catalog
    }

    /// Reload and rebuild the view as of now.
    pub async fn refresh(&self) -> Result<Arc<PanelView>, CoreError> {
        self.refresh_at(Utc::now()).await
    }

    /// Reload and rebuild the view, computing time metrics against `now`.
    ///
    /// A failed load clears the published view. A refresh overtaken by a
    /// newer one returns [`CoreError::Superseded`] and publishes nothing.
    pub async fn refresh_at(&self, now: DateTime<Utc>) -> Result<Arc<PanelView>, CoreError> {
        let loaded = match self.loader.load().await {
            Ok(loaded) => loaded,
            Err(CoreError::Superseded) => return Err(CoreError::Superseded),
            Err(e) => {
                self.view.send_replace(None);
                return Err(e);
            }
        };

        let resolved = links::resolve(&loaded.info, self.loader.backend().as_ref()).await;
        if !self.loader.is_latest(loaded.generation) {
            return Err(CoreError::Superseded);
        }

        let view = Arc::new(build_view(
            &loaded.info,
            &resolved,
            &self.display,
            &self.catalog,
            now,
        ));
        self.view.send_replace(Some(Arc::clone(&view)));
        Ok(view)
    }

    /// Latest published view, if any.
    pub fn current(&self) -> Option<Arc<PanelView>> {
        self.view.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<PanelView>>> {
        self.view.subscribe()
    }

    pub fn load_state(&self) -> watch::Receiver<LoadState> {
        self.loader.subscribe()
    }
}

fn build_transport(config: &PanelConfig) -> TransportConfig {
    let tls = match &config.tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
    };
    TransportConfig {
        tls,
        timeout: config.timeout,
        user_agent: config.user_agent.clone(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use base64::Engine as _;
    use base64::engine::general_purpose::STANDARD;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::backend::testing::FakeBackend;
    use crate::i18n::Locale;
    use crate::links::LinkSource;
    use crate::model::{SubscriptionInfo, SubscriptionStatus};

    fn display() -> DisplayConfig {
        let mut display = DisplayConfig::new("https://panel.example.com/sub/t0k3n".parse().unwrap());
        display.locale = Locale::En;
        display
    }

    fn info(links: Option<Vec<String>>) -> SubscriptionInfo {
        SubscriptionInfo {
            username: Some("bob".into()),
            used_traffic: Some(0.0),
            data_limit: None,
            expires_at: None,
            created_at: None,
            status: SubscriptionStatus::Active,
            subscription_url: Some("/sub/t0k3n".into()),
            links,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn refresh_resolves_configs_and_publishes() {
        let backend = FakeBackend::default()
            .with_info(Ok(info(None)))
            .with_configs(Ok(STANDARD.encode("vless://a#A\nvmess://b\nFalse")));
        let panel = Panel::with_backend(backend, display(), AppCatalog::default());
        let mut rx = panel.subscribe();

        let view = panel.refresh_at(now()).await.unwrap();

        assert_eq!(view.title, "bob Sub Info");
        assert_eq!(view.config_source, LinkSource::Base64);
        let names: Vec<_> = view.configs.as_ref().unwrap().iter().map(|c| c.name.clone()).collect();
        assert_eq!(names, vec!["A".to_owned(), "vmess #2".to_owned()]);
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().as_deref(), Some(view.as_ref()));
    }

    #[tokio::test]
    async fn failed_load_clears_view() {
        let backend = FakeBackend::default()
            .with_info(Ok(info(Some(vec!["vless://a".into()]))))
            .with_info(Err(CoreError::SubscriptionNotFound));
        let panel = Panel::with_backend(backend, display(), AppCatalog::default());

        panel.refresh_at(now()).await.unwrap();
        assert!(panel.current().is_some());

        let err = panel.refresh_at(now()).await.unwrap_err();
        assert!(matches!(err, CoreError::SubscriptionNotFound));
        assert!(panel.current().is_none());
        assert!(!panel.load_state().borrow().loading);
    }

    #[tokio::test]
    async fn refresh_replaces_view_wholesale() {
        let backend = FakeBackend::default()
            .with_info(Ok(info(Some(vec!["vless://a".into(), "vless://b".into()]))))
            .with_info(Ok(info(Some(vec!["vless://c".into()]))));
        let panel = Panel::with_backend(backend, display(), AppCatalog::default());

        panel.refresh_at(now()).await.unwrap();
        let second = panel.refresh_at(now()).await.unwrap();

        let uris: Vec<_> = second.configs.as_ref().unwrap().iter().map(|c| c.uri.clone()).collect();
        assert_eq!(uris, vec!["vless://c".to_owned()]);
    }

    #[test]
    fn transport_follows_panel_config() {
        let mut config = PanelConfig::new("https://p.example.com/sub/x".parse().unwrap());
        config.tls = TlsVerification::DangerAcceptInvalid;
        config.user_agent = Some("v2rayNG/1.8".into());

        let transport = build_transport(&config);

        assert!(matches!(transport.tls, TlsMode::DangerAcceptInvalid));
        assert_eq!(transport.user_agent.as_deref(), Some("v2rayNG/1.8"));
    }
}
