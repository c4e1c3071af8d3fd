// Proxy type enumeration
//
// The mutually exclusive strategies a proxy capability can describe.
// Wire form is the lower-cased variant name ("direct", "manual", ...).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// The proxy strategy a [`ProxyConfig`](crate::protocol::ProxyConfig) is locked to.
///
/// # Example
///
/// ```ignore
/// use webdriver_proxy::protocol::ProxyType;
///
/// let mode: ProxyType = "PAC".parse()?;
/// assert_eq!(mode, ProxyType::Pac);
/// assert_eq!(mode.as_str(), "pac");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProxyType {
    /// No mode chosen yet (initial state)
    #[default]
    Unspecified,
    /// Direct connection, no proxy
    Direct,
    /// Per-scheme proxies configured by hand
    Manual,
    /// Proxy Auto-Configuration script
    Pac,
    /// WPAD-style proxy discovery
    Autodetect,
    /// Use the operating system settings
    System,
}

impl ProxyType {
    /// Lower-cased wire name of this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProxyType::Unspecified => "unspecified",
            ProxyType::Direct => "direct",
            ProxyType::Manual => "manual",
            ProxyType::Pac => "pac",
            ProxyType::Autodetect => "autodetect",
            ProxyType::System => "system",
        }
    }

    /// Returns true for every mode except `Unspecified`.
    pub fn is_locked(&self) -> bool {
        !matches!(self, ProxyType::Unspecified)
    }
}

impl fmt::Display for ProxyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProxyType {
    type Err = Error;

    /// Parses a mode token case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "unspecified" => Ok(ProxyType::Unspecified),
            "direct" => Ok(ProxyType::Direct),
            "manual" => Ok(ProxyType::Manual),
            "pac" => Ok(ProxyType::Pac),
            "autodetect" => Ok(ProxyType::Autodetect),
            "system" => Ok(ProxyType::System),
            _ => Err(Error::UnknownProxyType(s.to_string())),
        }
    }
}
