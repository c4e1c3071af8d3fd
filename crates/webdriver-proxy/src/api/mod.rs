// Public API types module
//
// Container types that carry proxy settings to and from a remote endpoint.

pub mod capabilities;

pub use capabilities::{Capabilities, CapabilitySource, PROXY_CAPABILITY};
