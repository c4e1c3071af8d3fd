//! Proxy capability
//!
//! This module defines [`ProxyConfig`], the value sent to (or received from)
//! a remote automation endpoint under the `"proxy"` capability.
//!
//! A `ProxyConfig` starts out [`ProxyType::Unspecified`]. The first mode
//! specific attribute that gets set (or an explicit
//! [`set_proxy_type`](ProxyConfig::set_proxy_type)) locks the mode for the
//! lifetime of the value; setters belonging to another mode then fail with
//! [`Error::InvalidState`].
//!
//! See: <https://www.w3.org/TR/webdriver/#proxy>

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::api::capabilities::{CapabilitySource, PROXY_CAPABILITY};
use crate::error::{Error, Result};
use crate::protocol::ProxyType;

const PROXY_TYPE: &str = "proxyType";
const PROXY_AUTOCONFIG_URL: &str = "proxyAutoconfigUrl";
const AUTODETECT: &str = "autodetect";

/// The seven attributes owned by [`ProxyType::Manual`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ManualField {
    Ftp,
    Http,
    NoProxy,
    Ssl,
    Socks,
    SocksUsername,
    SocksPassword,
}

impl ManualField {
    // Order in which from_map applies them
    const ALL: [ManualField; 7] = [
        ManualField::Ftp,
        ManualField::Http,
        ManualField::NoProxy,
        ManualField::Ssl,
        ManualField::Socks,
        ManualField::SocksUsername,
        ManualField::SocksPassword,
    ];

    fn key(self) -> &'static str {
        match self {
            ManualField::Ftp => "ftpProxy",
            ManualField::Http => "httpProxy",
            ManualField::NoProxy => "noProxy",
            ManualField::Ssl => "sslProxy",
            ManualField::Socks => "socksProxy",
            ManualField::SocksUsername => "socksUsername",
            ManualField::SocksPassword => "socksPassword",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct ManualProxy {
    ftp_proxy: Option<String>,
    http_proxy: Option<String>,
    no_proxy: Option<String>,
    ssl_proxy: Option<String>,
    socks_proxy: Option<String>,
    socks_username: Option<String>,
    socks_password: Option<String>,
}

impl ManualProxy {
    fn get(&self, field: ManualField) -> Option<&str> {
        match field {
            ManualField::Ftp => self.ftp_proxy.as_deref(),
            ManualField::Http => self.http_proxy.as_deref(),
            ManualField::NoProxy => self.no_proxy.as_deref(),
            ManualField::Ssl => self.ssl_proxy.as_deref(),
            ManualField::Socks => self.socks_proxy.as_deref(),
            ManualField::SocksUsername => self.socks_username.as_deref(),
            ManualField::SocksPassword => self.socks_password.as_deref(),
        }
    }

    fn slot(&mut self, field: ManualField) -> &mut Option<String> {
        match field {
            ManualField::Ftp => &mut self.ftp_proxy,
            ManualField::Http => &mut self.http_proxy,
            ManualField::NoProxy => &mut self.no_proxy,
            ManualField::Ssl => &mut self.ssl_proxy,
            ManualField::Socks => &mut self.socks_proxy,
            ManualField::SocksUsername => &mut self.socks_username,
            ManualField::SocksPassword => &mut self.socks_password,
        }
    }
}

/// Mode discriminant plus the payload that mode owns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum ProxyState {
    #[default]
    Unspecified,
    Direct,
    Manual(ManualProxy),
    Pac {
        autoconfig_url: Option<String>,
    },
    Autodetect {
        enabled: bool,
    },
    System,
}

impl ProxyState {
    fn empty(proxy_type: ProxyType) -> Self {
        match proxy_type {
            ProxyType::Unspecified => ProxyState::Unspecified,
            ProxyType::Direct => ProxyState::Direct,
            ProxyType::Manual => ProxyState::Manual(ManualProxy::default()),
            ProxyType::Pac => ProxyState::Pac {
                autoconfig_url: None,
            },
            ProxyType::Autodetect => ProxyState::Autodetect { enabled: false },
            ProxyType::System => ProxyState::System,
        }
    }

    fn proxy_type(&self) -> ProxyType {
        match self {
            ProxyState::Unspecified => ProxyType::Unspecified,
            ProxyState::Direct => ProxyType::Direct,
            ProxyState::Manual(_) => ProxyType::Manual,
            ProxyState::Pac { .. } => ProxyType::Pac,
            ProxyState::Autodetect { .. } => ProxyType::Autodetect,
            ProxyState::System => ProxyType::System,
        }
    }
}

/// Proxy settings for a remote automation session.
///
/// # Example
///
/// ```ignore
/// use webdriver_proxy::protocol::{ProxyConfig, ProxyType};
///
/// let mut proxy = ProxyConfig::new();
/// proxy
///     .set_http_proxy("proxy.example.com:3128")?
///     .set_no_proxy("localhost,127.0.0.1")?;
///
/// assert_eq!(proxy.proxy_type(), ProxyType::Manual);
///
/// // A PAC url belongs to a different mode
/// assert!(proxy.set_proxy_autoconfig_url("http://example.com/proxy.pac").is_err());
///
/// let json = serde_json::to_value(&proxy)?;
/// assert_eq!(json["proxyType"], "manual");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct ProxyConfig {
    state: ProxyState,
}

impl ProxyConfig {
    /// Creates an unspecified proxy with nothing set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Direct connection, no proxy.
    pub fn direct() -> Self {
        Self {
            state: ProxyState::Direct,
        }
    }

    /// Use the operating system proxy settings.
    pub fn system() -> Self {
        Self {
            state: ProxyState::System,
        }
    }

    /// Proxy Auto-Configuration from the script at `url`.
    pub fn pac(url: impl Into<String>) -> Self {
        Self {
            state: ProxyState::Pac {
                autoconfig_url: Some(url.into()),
            },
        }
    }

    /// WPAD-style proxy discovery.
    pub fn autodetect() -> Self {
        Self {
            state: ProxyState::Autodetect { enabled: true },
        }
    }

    /// Builds a proxy from its wire representation.
    ///
    /// `proxyType` is matched case-insensitively and locks the mode before any
    /// other key is looked at. Null values and unknown keys are ignored. A key
    /// that belongs to a different mode than the locked one is skipped with a
    /// warning rather than failing the whole parse.
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownProxyType`] if `proxyType` names no known mode
    /// - [`Error::InvalidValue`] if a known key holds the wrong JSON type
    pub fn from_map(raw: &Map<String, Value>) -> Result<Self> {
        let mut proxy = Self::new();

        if let Some(token) = string_value(raw, PROXY_TYPE)? {
            proxy.set_proxy_type(token.parse()?)?;
        }

        for field in ManualField::ALL {
            if let Some(value) = string_value(raw, field.key())? {
                if let Err(e) = proxy.set_manual(field, value.to_string()) {
                    skip_field(field.key(), &e);
                }
            }
        }

        if let Some(url) = string_value(raw, PROXY_AUTOCONFIG_URL)? {
            if let Err(e) = proxy.set_proxy_autoconfig_url(url) {
                skip_field(PROXY_AUTOCONFIG_URL, &e);
            }
        }

        if let Some(enabled) = bool_value(raw, AUTODETECT)? {
            if let Err(e) = proxy.set_autodetect(enabled) {
                skip_field(AUTODETECT, &e);
            }
        }

        Ok(proxy)
    }

    /// Reads the `"proxy"` capability out of a capability container.
    ///
    /// Returns an unspecified proxy when the capability is absent or null.
    pub fn extract_from<C>(capabilities: &C) -> Result<Self>
    where
        C: CapabilitySource + ?Sized,
    {
        match capabilities.capability(PROXY_CAPABILITY) {
            None | Some(Value::Null) => Ok(Self::new()),
            Some(Value::Object(raw)) => Self::from_map(raw)
                .map_err(|e| e.context(format!("Invalid '{}' capability", PROXY_CAPABILITY))),
            Some(_) => Err(Error::InvalidValue {
                key: PROXY_CAPABILITY.to_string(),
                expected: "an object",
            }),
        }
    }

    /// Minimal wire representation: `proxyType` plus the attributes of the
    /// current mode that have been set.
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert(PROXY_TYPE.to_string(), json!(self.proxy_type().as_str()));

        match &self.state {
            ProxyState::Manual(manual) => {
                for field in ManualField::ALL {
                    if let Some(value) = manual.get(field) {
                        map.insert(field.key().to_string(), json!(value));
                    }
                }
            }
            ProxyState::Pac {
                autoconfig_url: Some(url),
            } => {
                map.insert(PROXY_AUTOCONFIG_URL.to_string(), json!(url));
            }
            ProxyState::Autodetect { enabled } => {
                map.insert(AUTODETECT.to_string(), json!(enabled));
            }
            _ => {}
        }

        map
    }

    /// The mode this proxy is locked to.
    pub fn proxy_type(&self) -> ProxyType {
        self.state.proxy_type()
    }

    /// Locks the mode explicitly.
    ///
    /// This is the only way to reach [`ProxyType::Direct`] and
    /// [`ProxyType::System`].
    ///
    /// # Errors
    ///
    /// [`Error::InvalidState`] once any mode is locked, even when
    /// `proxy_type` equals the current one.
    pub fn set_proxy_type(&mut self, proxy_type: ProxyType) -> Result<&mut Self> {
        let current = self.proxy_type();
        if current.is_locked() {
            return Err(Error::InvalidState(format!(
                "Proxy type is already '{}' and cannot be changed to '{}'",
                current, proxy_type
            )));
        }

        if proxy_type.is_locked() {
            tracing::debug!("Proxy type locked to '{}'", proxy_type);
        }
        self.state = ProxyState::empty(proxy_type);
        Ok(self)
    }

    pub fn ftp_proxy(&self) -> Option<&str> {
        self.manual_value(ManualField::Ftp)
    }

    pub fn set_ftp_proxy(&mut self, ftp_proxy: impl Into<String>) -> Result<&mut Self> {
        self.set_manual(ManualField::Ftp, ftp_proxy.into())
    }

    pub fn http_proxy(&self) -> Option<&str> {
        self.manual_value(ManualField::Http)
    }

    pub fn set_http_proxy(&mut self, http_proxy: impl Into<String>) -> Result<&mut Self> {
        self.set_manual(ManualField::Http, http_proxy.into())
    }

    /// Comma-separated list of hosts that bypass the proxy.
    pub fn no_proxy(&self) -> Option<&str> {
        self.manual_value(ManualField::NoProxy)
    }

    pub fn set_no_proxy(&mut self, no_proxy: impl Into<String>) -> Result<&mut Self> {
        self.set_manual(ManualField::NoProxy, no_proxy.into())
    }

    pub fn ssl_proxy(&self) -> Option<&str> {
        self.manual_value(ManualField::Ssl)
    }

    pub fn set_ssl_proxy(&mut self, ssl_proxy: impl Into<String>) -> Result<&mut Self> {
        self.set_manual(ManualField::Ssl, ssl_proxy.into())
    }

    pub fn socks_proxy(&self) -> Option<&str> {
        self.manual_value(ManualField::Socks)
    }

    pub fn set_socks_proxy(&mut self, socks_proxy: impl Into<String>) -> Result<&mut Self> {
        self.set_manual(ManualField::Socks, socks_proxy.into())
    }

    pub fn socks_username(&self) -> Option<&str> {
        self.manual_value(ManualField::SocksUsername)
    }

    pub fn set_socks_username(&mut self, username: impl Into<String>) -> Result<&mut Self> {
        self.set_manual(ManualField::SocksUsername, username.into())
    }

    pub fn socks_password(&self) -> Option<&str> {
        self.manual_value(ManualField::SocksPassword)
    }

    pub fn set_socks_password(&mut self, password: impl Into<String>) -> Result<&mut Self> {
        self.set_manual(ManualField::SocksPassword, password.into())
    }

    /// URL of the PAC script, if in [`ProxyType::Pac`] mode and set.
    pub fn proxy_autoconfig_url(&self) -> Option<&str> {
        match &self.state {
            ProxyState::Pac { autoconfig_url } => autoconfig_url.as_deref(),
            _ => None,
        }
    }

    /// Sets the PAC script URL, locking the mode to [`ProxyType::Pac`].
    pub fn set_proxy_autoconfig_url(&mut self, url: impl Into<String>) -> Result<&mut Self> {
        self.lock(ProxyType::Pac, PROXY_AUTOCONFIG_URL)?;
        if let ProxyState::Pac { autoconfig_url } = &mut self.state {
            *autoconfig_url = Some(url.into());
        }
        Ok(self)
    }

    /// Whether WPAD-style detection is enabled. `false` when unset.
    pub fn is_autodetect(&self) -> bool {
        matches!(self.state, ProxyState::Autodetect { enabled: true })
    }

    /// Enables or disables autodetection.
    ///
    /// Writing the value the flag already has is a no-op, so
    /// `set_autodetect(false)` never locks an unspecified proxy.
    pub fn set_autodetect(&mut self, autodetect: bool) -> Result<&mut Self> {
        if self.is_autodetect() == autodetect {
            return Ok(self);
        }

        self.lock(ProxyType::Autodetect, AUTODETECT)?;
        if let ProxyState::Autodetect { enabled } = &mut self.state {
            *enabled = autodetect;
        }
        Ok(self)
    }

    fn manual_value(&self, field: ManualField) -> Option<&str> {
        match &self.state {
            ProxyState::Manual(manual) => manual.get(field),
            _ => None,
        }
    }

    fn set_manual(&mut self, field: ManualField, value: String) -> Result<&mut Self> {
        self.lock(ProxyType::Manual, field.key())?;
        if let ProxyState::Manual(manual) = &mut self.state {
            *manual.slot(field) = Some(value);
        }
        Ok(self)
    }

    /// Locks an unspecified proxy to `owner`, or checks that the locked mode
    /// is `owner`. State is untouched on failure.
    fn lock(&mut self, owner: ProxyType, key: &str) -> Result<()> {
        let current = self.proxy_type();
        if !current.is_locked() {
            tracing::debug!("Proxy type locked to '{}' by '{}'", owner, key);
            self.state = ProxyState::empty(owner);
        } else if current != owner {
            return Err(Error::InvalidState(format!(
                "Cannot set '{}' on a '{}' proxy (requires '{}')",
                key, current, owner
            )));
        }
        Ok(())
    }
}

impl fmt::Display for ProxyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Proxy(")?;
        match &self.state {
            ProxyState::Unspecified => {}
            ProxyState::Pac { autoconfig_url } => {
                write!(f, "pac: {}", autoconfig_url.as_deref().unwrap_or_default())?
            }
            other => f.write_str(other.proxy_type().as_str())?,
        }

        let schemes = [
            ("ftp", ManualField::Ftp),
            ("http", ManualField::Http),
            ("ssl", ManualField::Ssl),
            ("socks", ManualField::Socks),
        ];
        for (label, field) in schemes {
            if let Some(value) = self.manual_value(field) {
                write!(f, ", {}={}", label, value)?;
            }
        }

        f.write_str(")")
    }
}

impl TryFrom<Map<String, Value>> for ProxyConfig {
    type Error = Error;

    fn try_from(raw: Map<String, Value>) -> Result<Self> {
        Self::from_map(&raw)
    }
}

impl From<ProxyConfig> for Map<String, Value> {
    fn from(proxy: ProxyConfig) -> Self {
        proxy.to_map()
    }
}

fn string_value<'a>(raw: &'a Map<String, Value>, key: &str) -> Result<Option<&'a str>> {
    match raw.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(Error::InvalidValue {
            key: key.to_string(),
            expected: "a string",
        }),
    }
}

fn bool_value(raw: &Map<String, Value>, key: &str) -> Result<Option<bool>> {
    match raw.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(Value::String(s)) if s.eq_ignore_ascii_case("true") => Ok(Some(true)),
        Some(Value::String(s)) if s.eq_ignore_ascii_case("false") => Ok(Some(false)),
        Some(_) => Err(Error::InvalidValue {
            key: key.to_string(),
            expected: "a boolean",
        }),
    }
}

fn skip_field(key: &str, error: &Error) {
    tracing::warn!("Ignoring proxy key '{}': {}", key, error);
}
