// Copyright 2024 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// Protocol Objects - Rust representations of the proxy capability
//
// Architecture:
// - ProxyType is the closed set of proxy modes
// - ProxyConfig holds the locked mode and the attributes that mode owns,
//   and converts to and from the capability's JSON object form

pub mod proxy;
pub mod proxy_type;

pub use proxy::ProxyConfig;
pub use proxy_type::ProxyType;
