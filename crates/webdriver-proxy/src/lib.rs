//! webdriver-proxy: the proxy capability of a remote browser automation session
//!
//! A [`ProxyConfig`] describes how the remote browser should reach the
//! network: directly, through hand-configured proxies, through a PAC script,
//! by autodetection, or with the system settings. Exactly one of these modes
//! applies, and the first attribute set on a fresh value decides which.
//!
//! # Examples
//!
//! ## Manual Proxy
//!
//! ```ignore
//! use webdriver_proxy::{ProxyConfig, ProxyType};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut proxy = ProxyConfig::new();
//!     proxy
//!         .set_http_proxy("http.proxy:1234")?
//!         .set_ssl_proxy("ssl.proxy:1234")?
//!         .set_no_proxy("localhost,127.0.0.*")?;
//!
//!     assert_eq!(proxy.proxy_type(), ProxyType::Manual);
//!
//!     // Attributes of other modes are rejected once the mode is locked
//!     assert!(proxy.set_proxy_autoconfig_url("http://aaa/bbb.pac").is_err());
//!     assert_eq!(proxy.http_proxy(), Some("http.proxy:1234"));
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Reading the Proxy from Capabilities
//!
//! ```ignore
//! use webdriver_proxy::{Capabilities, ProxyType};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let caps = Capabilities::from_json(
//!         r#"{"browserName":"firefox","proxy":{"proxyType":"PAC","proxyAutoconfigUrl":"http://aaa/bbb.pac"}}"#,
//!     )?;
//!
//!     let proxy = caps.proxy()?;
//!     assert_eq!(proxy.proxy_type(), ProxyType::Pac);
//!     assert_eq!(proxy.to_map().len(), 2);
//!
//!     Ok(())
//! }
//! ```

pub mod api;
mod error;
pub mod protocol;

// Re-export error types
pub use error::{Error, Result};

// Re-export the proxy value and its mode
pub use protocol::{ProxyConfig, ProxyType};

// Re-export the capability container
pub use api::{Capabilities, CapabilitySource, PROXY_CAPABILITY};
