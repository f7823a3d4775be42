// Panel HTTP client
//
// Wraps `reqwest::Client` with subscription-scoped URL construction and
// status handling. The panel exposes two endpoints under the subscription
// URL: `/info` (JSON metadata) and the subscription itself (plaintext or
// base64 list of configuration links).

use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::models::InfoResponse;
use crate::transport::TransportConfig;

const BODY_PREVIEW_LEN: usize = 200;

/// Raw HTTP client for one subscription on a panel.
///
/// The subscription URL is the per-user link the panel hands out
/// (e.g. `https://panel.example.com/sub/<token>`). Both endpoint URLs are
/// derived from it once, at construction.
#[derive(Debug, Clone)]
pub struct PanelClient {
    http: reqwest::Client,
    subscription_url: Url,
    info_url: Url,
}

impl PanelClient {
    /// Create a client from a `TransportConfig`.
    pub fn new(subscription_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::with_client(http, subscription_url)
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, subscription_url: Url) -> Result<Self, Error> {
        let info_url = endpoint_url(&subscription_url, "info")?;
        Ok(Self {
            http,
            subscription_url,
            info_url,
        })
    }

    /// The subscription URL this client was built for.
    pub fn subscription_url(&self) -> &Url {
        &self.subscription_url
    }

    /// URL of the JSON info endpoint.
    pub fn info_url(&self) -> &Url {
        &self.info_url
    }

    /// URL of the plaintext configs endpoint.
    pub fn configs_url(&self) -> &Url {
        &self.subscription_url
    }

    // ── Endpoints ────────────────────────────────────────────────────

    /// Fetch subscription metadata.
    pub async fn get_info(&self) -> Result<InfoResponse, Error> {
        self.get_json(self.info_url.clone()).await
    }

    /// Fetch the raw configs body as text (untrimmed, undecoded).
    pub async fn get_configs(&self) -> Result<String, Error> {
        let url = self.configs_url().clone();
        debug!("GET {}", url);

        let resp = self
            .http
            .get(url)
            .header(reqwest::header::ACCEPT, "text/plain")
            .send()
            .await?;
        let body = Self::checked_body(resp).await?;
        trace!(bytes = body.len(), "configs body received");
        Ok(body)
    }

    // ── Request helpers ──────────────────────────────────────────────

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);

        let resp = self
            .http
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        let body = Self::checked_body(resp).await?;

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: format!("{e} (body preview: {:?})", preview(&body)),
            body,
        })
    }

    /// Read the body, mapping non-success statuses to `Error::Http`.
    async fn checked_body(resp: reqwest::Response) -> Result<String, Error> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Http {
                status: status.as_u16(),
                message: preview(&body).to_owned(),
            });
        }
        Ok(resp.text().await?)
    }
}

/// Append a path segment to the subscription URL, keeping its query.
fn endpoint_url(base: &Url, segment: &str) -> Result<Url, Error> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| Error::UnsupportedUrl(base.to_string()))?
        .pop_if_empty()
        .push(segment);
    Ok(url)
}

fn preview(body: &str) -> &str {
    match body.char_indices().nth(BODY_PREVIEW_LEN) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
