// Capability container
//
// A minimal key/value bag of session capabilities, as exchanged with a remote
// automation endpoint during session creation. Proxy settings live under the
// well-known "proxy" key.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;
use crate::protocol::ProxyConfig;

/// Capability name under which proxy settings are stored.
pub const PROXY_CAPABILITY: &str = "proxy";

/// Read access to a set of named capabilities.
///
/// [`ProxyConfig::extract_from`] only needs this, so any map-like container
/// can be handed to it.
pub trait CapabilitySource {
    /// Returns the raw value stored under `name`, if any.
    fn capability(&self, name: &str) -> Option<&Value>;
}

impl CapabilitySource for Map<String, Value> {
    fn capability(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }
}

impl CapabilitySource for HashMap<String, Value> {
    fn capability(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }
}

/// Session capabilities
///
/// # Example
///
/// ```ignore
/// use webdriver_proxy::{Capabilities, ProxyConfig};
///
/// let mut caps = Capabilities::new();
/// caps.set_capability("browserName", "firefox")
///     .set_proxy(&ProxyConfig::pac("http://example.com/proxy.pac"));
///
/// let json = caps.to_json()?;
/// let proxy = Capabilities::from_json(&json)?.proxy()?;
/// assert_eq!(proxy.proxy_autoconfig_url(), Some("http://example.com/proxy.pac"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Capabilities {
    entries: Map<String, Value>,
}

impl Capabilities {
    /// Creates an empty capability set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses capabilities from a JSON object.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the capabilities to a JSON object.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Returns the raw value stored under `name`.
    pub fn capability(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    /// Stores `value` under `name`, replacing any previous value.
    pub fn set_capability(
        &mut self,
        name: impl Into<String>,
        value: impl Into<Value>,
    ) -> &mut Self {
        self.entries.insert(name.into(), value.into());
        self
    }

    /// Stores `proxy` in its wire form under [`PROXY_CAPABILITY`].
    pub fn set_proxy(&mut self, proxy: &ProxyConfig) -> &mut Self {
        self.entries
            .insert(PROXY_CAPABILITY.to_string(), Value::Object(proxy.to_map()));
        self
    }

    /// Typed view of the proxy capability.
    ///
    /// An absent capability yields an unspecified [`ProxyConfig`].
    pub fn proxy(&self) -> Result<ProxyConfig> {
        ProxyConfig::extract_from(self)
    }
}

impl CapabilitySource for Capabilities {
    fn capability(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }
}

impl From<Map<String, Value>> for Capabilities {
    fn from(entries: Map<String, Value>) -> Self {
        Self { entries }
    }
}
