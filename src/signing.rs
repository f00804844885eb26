//! Request signing for the `SwitchBot` cloud API
//!
//! Every request carries its own header set. `sign` is the base64-encoded
//! HMAC-SHA256, keyed by the API secret, of the token, the millisecond
//! timestamp `t` and the `nonce` concatenated with no separators. The
//! server rejects a set whose timestamp is stale or whose nonce it has
//! already seen, so a set must never be reused across requests.

use base64::Engine;
use chrono::Utc;
use hmac::{Hmac, Mac};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use sha2::Sha256;
use uuid::Uuid;

use crate::{Error, Result};

type HmacSha256 = Hmac<Sha256>;

/// `Content-Type` sent with every request
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// `charset` header value expected by the API
pub const CHARSET_UTF8: &str = "utf8";

/// Compute the request signature
///
/// Pure function of its inputs; the secret may be empty.
///
/// # Errors
///
/// Returns error if the MAC cannot be keyed
pub fn sign(token: &str, secret: &str, timestamp: i64, nonce: &Uuid) -> Result<String> {
    let payload = format!("{token}{timestamp}{nonce}");

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| Error::Signing(e.to_string()))?;
    mac.update(payload.as_bytes());

    Ok(base64::engine::general_purpose::STANDARD.encode(mac.finalize().into_bytes()))
}

/// Authentication headers for a single request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    /// API token, sent verbatim as `Authorization`
    pub authorization: String,

    /// Milliseconds since the Unix epoch at signing time
    pub timestamp: i64,

    /// Per-request random identifier
    pub nonce: Uuid,

    /// Base64 HMAC-SHA256 signature
    pub sign: String,
}

impl SignedHeaders {
    /// Sign now with a fresh nonce
    ///
    /// # Errors
    ///
    /// Returns error if signing fails
    pub fn generate(token: &str, secret: &str) -> Result<Self> {
        Self::at(token, secret, Utc::now().timestamp_millis(), Uuid::new_v4())
    }

    /// Sign with an explicit timestamp and nonce
    ///
    /// # Errors
    ///
    /// Returns error if signing fails
    pub fn at(token: &str, secret: &str, timestamp: i64, nonce: Uuid) -> Result<Self> {
        let sign = sign(token, secret, timestamp, &nonce)?;
        Ok(Self {
            authorization: token.to_string(),
            timestamp,
            nonce,
            sign,
        })
    }

    /// Header names and values exactly as sent
    #[must_use]
    pub fn pairs(&self) -> [(&'static str, String); 6] {
        [
            ("Authorization", self.authorization.clone()),
            ("Content-Type", CONTENT_TYPE_JSON.to_string()),
            ("charset", CHARSET_UTF8.to_string()),
            ("t", self.timestamp.to_string()),
            ("sign", self.sign.clone()),
            ("nonce", self.nonce.to_string()),
        ]
    }

    /// Convert into a header map for the HTTP client
    ///
    /// # Errors
    ///
    /// Returns error if a value (typically the token) contains bytes not
    /// allowed in a header
    pub fn to_header_map(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::with_capacity(6);
        for (name, value) in self.pairs() {
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|e| Error::InvalidHeader {
                    name,
                    reason: e.to_string(),
                })?;
            let header_value = HeaderValue::from_str(&value).map_err(|e| Error::InvalidHeader {
                name,
                reason: e.to_string(),
            })?;
            headers.insert(header_name, header_value);
        }
        Ok(headers)
    }
}
