// ── Panel backend seam ──
//
// The loader and link resolver talk to the panel through this trait so
// they can be driven by the real HTTP client or by an in-memory fake.

use std::future::Future;

use subinfo_api::PanelClient;

use crate::error::CoreError;
use crate::model::SubscriptionInfo;

/// The two panel requests the core needs.
pub trait PanelBackend: Send + Sync {
    /// Fetch and convert subscription metadata.
    fn fetch_info(&self) -> impl Future<Output = Result<SubscriptionInfo, CoreError>> + Send;

    /// Fetch the raw configs body (plaintext or base64).
    fn fetch_configs(&self) -> impl Future<Output = Result<String, CoreError>> + Send;
}

impl PanelBackend for PanelClient {
    async fn fetch_info(&self) -> Result<SubscriptionInfo, CoreError> {
        Ok(self.get_info().await?.into())
    }

    async fn fetch_configs(&self) -> Result<String, CoreError> {
        Ok(self.get_configs().await?)
    }
}
