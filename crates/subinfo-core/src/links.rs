// ── Link resolution ──
//
// Turns a loaded subscription into the ordered list of configuration URIs.
// The list comes from exactly one place: the payload's own `links` field,
// or the configs endpoint (plaintext or base64). Failures in the second
// path degrade to an empty list and never propagate.

use base64::Engine as _;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use serde::Serialize;
use strum::Display;
use thiserror::Error;
use tracing::{debug, warn};

use crate::backend::PanelBackend;
use crate::model::SubscriptionInfo;

/// Trailing marker some panels append to signal "no more links".
pub const SENTINEL: &str = "False";

const LENIENT: GeneralPurposeConfig =
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent);
const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);

/// Where the resolved list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LinkSource {
    /// The info payload carried `links`.
    Direct,
    /// Configs endpoint, already plaintext.
    Plaintext,
    /// Configs endpoint, base64-encoded.
    Base64,
    /// Configs endpoint body could not be decoded.
    Undecodable,
    /// Configs endpoint could not be fetched.
    Unavailable,
}

/// The normalized configuration list for one payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedLinks {
    pub source: LinkSource,
    pub links: Vec<String>,
}

impl ResolvedLinks {
    pub fn empty(source: LinkSource) -> Self {
        Self {
            source,
            links: Vec::new(),
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self.source, LinkSource::Undecodable | LinkSource::Unavailable)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("invalid base64: {0}")]
    Base64(String),
    #[error("decoded body is not valid UTF-8")]
    Utf8,
}

/// A configs body after classification and decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedBody {
    pub source: LinkSource,
    pub text: String,
}

// ── Pure steps ───────────────────────────────────────────────────────

/// Drop the trailing sentinel, if present. Order of the rest is untouched.
pub fn strip_sentinel(mut links: Vec<String>) -> Vec<String> {
    if links.last().is_some_and(|last| last == SENTINEL) {
        links.pop();
    }
    links
}

/// Decode base64 text, accepting the standard and URL-safe alphabets with
/// or without padding. Embedded whitespace (line-wrapped bodies) is ignored.
pub fn decode_base64_text(encoded: &str) -> Result<String, DecodeError> {
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = STANDARD_LENIENT
        .decode(&compact)
        .or_else(|_| URL_SAFE_LENIENT.decode(&compact))
        .map_err(|e| DecodeError::Base64(e.to_string()))?;
    String::from_utf8(bytes).map_err(|_| DecodeError::Utf8)
}

/// Classify a configs body and decode it if needed.
///
/// A body mentioning `vmess` or `vless` is taken as plaintext; anything
/// else is treated as base64.
pub fn decode_configs_body(body: &str) -> Result<DecodedBody, DecodeError> {
    let trimmed = body.trim();
    if trimmed.contains("vmess") || trimmed.contains("vless") {
        return Ok(DecodedBody {
            source: LinkSource::Plaintext,
            text: trimmed.to_owned(),
        });
    }
    decode_base64_text(trimmed).map(|text| DecodedBody {
        source: LinkSource::Base64,
        text,
    })
}

/// Split decoded text into candidate links. Empty text yields no entries,
/// and blank lines are skipped.
pub fn split_links(text: &str) -> Vec<String> {
    let links = text
        .split('\n')
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty())
        .map(str::to_owned)
        .collect();
    strip_sentinel(links)
}

/// Normalize a raw configs body into a link list. Never fails: an
/// undecodable body is logged and yields an empty list.
pub fn links_from_body(body: &str) -> ResolvedLinks {
    match decode_configs_body(body) {
        Ok(decoded) => ResolvedLinks {
            source: decoded.source,
            links: split_links(&decoded.text),
        },
        Err(e) => {
            warn!(error = %e, "failed to decode configs body");
            ResolvedLinks::empty(LinkSource::Undecodable)
        }
    }
}

// ── Resolution ───────────────────────────────────────────────────────

/// Resolve the link list for a loaded payload.
///
/// Uses `info.links` when present (even if empty); otherwise performs a
/// single fetch of the configs endpoint. A failed fetch yields an empty
/// list tagged [`LinkSource::Unavailable`].
pub async fn resolve<B: PanelBackend>(info: &SubscriptionInfo, backend: &B) -> ResolvedLinks {
    if let Some(links) = &info.links {
        debug!(count = links.len(), "using direct link list");
        return ResolvedLinks {
            source: LinkSource::Direct,
            links: strip_sentinel(links.clone()),
        };
    }

    match backend.fetch_configs().await {
        Ok(body) => {
            let resolved = links_from_body(&body);
            debug!(source = %resolved.source, count = resolved.links.len(), "resolved configs");
            resolved
        }
        Err(e) => {
            warn!(error = %e, "configs fetch failed, showing no configs");
            ResolvedLinks::empty(LinkSource::Unavailable)
        }
    }
}
