// Shared helpers for integration tests

use serde_json::{Map, Value};
use std::sync::Once;

static INIT: Once = Once::new();

/// Installs a fmt subscriber once per test binary.
///
/// Filter with `RUST_LOG`, e.g. `RUST_LOG=webdriver_proxy=debug`.
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Unwraps a `json!({...})` literal into its object map.
#[allow(dead_code)]
pub fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {}", other),
    }
}
