//! Credential and endpoint configuration
//!
//! Each key resolves independently: a `.env` override file in the working
//! directory is consulted first, then the process environment. A key found
//! in neither place resolves to [`Credential::Missing`] without error, so a
//! missing token or secret only surfaces later as a rejected request.

mod env_file;

use secrecy::{ExposeSecret, SecretString};

pub use env_file::EnvFileSource;

use crate::Result;

/// Environment key holding the API token
pub const TOKEN_KEY: &str = "SWITCHBOT_API_TOKEN";

/// Environment key holding the API secret
pub const SECRET_KEY: &str = "SWITCHBOT_API_SECRET";

/// Environment key holding the target device identifier
pub const DEVICE_ID_KEY: &str = "SWITCHBOT_DEVICE_ID";

/// Environment key overriding the API base URL
pub const API_URL_KEY: &str = "SWITCHBOT_API_URL";

/// `SwitchBot` cloud API base URL
pub const DEFAULT_ENDPOINT: &str = "https://api.switch-bot.com/v1.1";

/// Override file name, relative to the working directory
pub const DEFAULT_ENV_FILE: &str = ".env";

/// A place credential values can be looked up by key
pub trait CredentialSource {
    /// Look up the value for `key`
    ///
    /// # Errors
    ///
    /// Returns error if the backing store exists but cannot be read
    fn lookup(&self, key: &str) -> Result<Option<String>>;
}

/// Reads keys from the process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvSource;

impl CredentialSource for ProcessEnvSource {
    fn lookup(&self, key: &str) -> Result<Option<String>> {
        Ok(std::env::var(key).ok())
    }
}

/// Consults `overlay` first and falls back to `fallback` per key
#[derive(Debug, Clone)]
pub struct LayeredSource<O, F> {
    overlay: O,
    fallback: F,
}

impl<O, F> LayeredSource<O, F> {
    /// Layer `overlay` over `fallback`
    #[must_use]
    pub const fn new(overlay: O, fallback: F) -> Self {
        Self { overlay, fallback }
    }
}

impl LayeredSource<EnvFileSource, ProcessEnvSource> {
    /// `.env` in the working directory over the process environment
    #[must_use]
    pub fn standard() -> Self {
        Self::new(EnvFileSource::new(DEFAULT_ENV_FILE), ProcessEnvSource)
    }
}

impl<O: CredentialSource, F: CredentialSource> CredentialSource for LayeredSource<O, F> {
    fn lookup(&self, key: &str) -> Result<Option<String>> {
        if let Some(value) = self.overlay.lookup(key)? {
            return Ok(Some(value));
        }
        self.fallback.lookup(key)
    }
}

/// A resolved credential value
///
/// `Missing` means no source defined the key at all, which is distinct
/// from a key that was defined with an empty value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential<T = String> {
    /// Key was defined (possibly empty)
    Value(T),
    /// Key was not defined by any source
    Missing,
}

impl<T> Credential<T> {
    /// Whether no source defined this key
    #[must_use]
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Borrow the value, if defined
    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Value(v) => Some(v),
            Self::Missing => None,
        }
    }

    /// Transform a defined value
    #[must_use]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Credential<U> {
        match self {
            Self::Value(v) => Credential::Value(f(v)),
            Self::Missing => Credential::Missing,
        }
    }
}

impl Credential<String> {
    /// The value, or `""` when missing
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.value().map_or("", String::as_str)
    }
}

impl<T> From<Option<T>> for Credential<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Missing, Self::Value)
    }
}

/// Token, secret and device identifier used for every request
///
/// Built once at startup and never mutated. `Debug` output redacts the
/// secret.
#[derive(Debug)]
pub struct Credentials {
    /// API token, sent as `Authorization` and signed
    pub api_token: Credential,

    /// API secret, the HMAC key
    pub api_secret: Credential<SecretString>,

    /// Target device identifier
    pub device_id: Credential,
}

impl Credentials {
    #[cfg(test)]
    pub(crate) fn new(
        api_token: impl Into<String>,
        api_secret: impl Into<String>,
        device_id: impl Into<String>,
    ) -> Self {
        Self {
            api_token: Credential::Value(api_token.into()),
            api_secret: Credential::Value(SecretString::from(api_secret.into())),
            device_id: Credential::Value(device_id.into()),
        }
    }

    /// Resolve all three keys from `source`
    ///
    /// Missing keys are logged and left as [`Credential::Missing`].
    ///
    /// # Errors
    ///
    /// Returns error if the source cannot be read
    pub fn resolve<S: CredentialSource + ?Sized>(source: &S) -> Result<Self> {
        let api_token = resolve_key(source, TOKEN_KEY)?;
        let api_secret = resolve_key(source, SECRET_KEY)?.map(SecretString::from);
        let device_id = resolve_key(source, DEVICE_ID_KEY)?;

        Ok(Self {
            api_token,
            api_secret,
            device_id,
        })
    }

    /// The secret as signing key bytes, `""` when missing
    pub(crate) fn expose_secret(&self) -> &str {
        self.api_secret.value().map_or("", |s| s.expose_secret())
    }
}

fn resolve_key<S: CredentialSource + ?Sized>(source: &S, key: &str) -> Result<Credential> {
    let credential = Credential::from(source.lookup(key)?);
    if credential.is_missing() {
        tracing::warn!(key, "credential not set; requests will fail authentication");
    } else {
        tracing::debug!(key, "resolved credential");
    }
    Ok(credential)
}

/// Client configuration
#[derive(Debug)]
pub struct Config {
    /// Resolved credentials
    pub credentials: Credentials,

    /// API base URL without a trailing slash
    pub endpoint: String,
}

impl Config {
    /// Load from `.env` and the process environment
    ///
    /// # Errors
    ///
    /// Returns error if `.env` exists but cannot be read
    pub fn load() -> Result<Self> {
        Self::from_source(&LayeredSource::standard())
    }

    /// Load from an arbitrary source
    ///
    /// # Errors
    ///
    /// Returns error if the source cannot be read
    pub fn from_source<S: CredentialSource + ?Sized>(source: &S) -> Result<Self> {
        let credentials = Credentials::resolve(source)?;

        let endpoint = source
            .lookup(API_URL_KEY)?
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        if endpoint != DEFAULT_ENDPOINT {
            tracing::info!(%endpoint, "using endpoint override");
        }

        Ok(Self {
            credentials,
            endpoint,
        })
    }
}
