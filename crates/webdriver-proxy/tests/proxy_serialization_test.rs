// ProxyConfig wire form tests
//
// Verifies from_map / to_map against the JSON object shape used by the
// "proxy" capability, and that serde goes through the same shape.

mod common;

use common::object;
use serde::{Deserialize, Serialize};
use serde_json::json;
use webdriver_proxy::{Error, ProxyConfig, ProxyType};

fn full_manual_proxy() -> ProxyConfig {
    let mut proxy = ProxyConfig::new();
    proxy.set_proxy_type(ProxyType::Manual).unwrap();
    proxy
        .set_http_proxy("http.proxy:1234")
        .unwrap()
        .set_ftp_proxy("ftp.proxy")
        .unwrap()
        .set_ssl_proxy("ssl.proxy")
        .unwrap()
        .set_no_proxy("localhost,127.0.0.*")
        .unwrap()
        .set_socks_proxy("socks.proxy:65555")
        .unwrap()
        .set_socks_username("test1")
        .unwrap()
        .set_socks_password("test2")
        .unwrap();
    proxy
}

#[test]
fn test_manual_proxy_from_map() {
    let raw = object(json!({
        "proxyType": "manual",
        "httpProxy": "http.proxy:1234",
        "ftpProxy": "ftp.proxy",
        "sslProxy": "ssl.proxy",
        "noProxy": "localhost,127.0.0.*",
        "socksProxy": "socks.proxy:65555",
        "socksUsername": "test1",
        "socksPassword": "test2",
    }));

    let proxy = ProxyConfig::from_map(&raw).expect("Failed to parse manual proxy");

    assert_eq!(proxy.proxy_type(), ProxyType::Manual);
    assert_eq!(proxy.ftp_proxy(), Some("ftp.proxy"));
    assert_eq!(proxy.http_proxy(), Some("http.proxy:1234"));
    assert_eq!(proxy.ssl_proxy(), Some("ssl.proxy"));
    assert_eq!(proxy.socks_proxy(), Some("socks.proxy:65555"));
    assert_eq!(proxy.socks_username(), Some("test1"));
    assert_eq!(proxy.socks_password(), Some("test2"));
    assert_eq!(proxy.no_proxy(), Some("localhost,127.0.0.*"));

    assert!(proxy.proxy_autoconfig_url().is_none());
    assert!(!proxy.is_autodetect());
}

#[test]
fn test_manual_proxy_to_map() {
    let map = full_manual_proxy().to_map();

    assert_eq!(map["proxyType"], "manual");
    assert_eq!(map["ftpProxy"], "ftp.proxy");
    assert_eq!(map["httpProxy"], "http.proxy:1234");
    assert_eq!(map["sslProxy"], "ssl.proxy");
    assert_eq!(map["socksProxy"], "socks.proxy:65555");
    assert_eq!(map["socksUsername"], "test1");
    assert_eq!(map["socksPassword"], "test2");
    assert_eq!(map["noProxy"], "localhost,127.0.0.*");
    assert_eq!(map.len(), 8);
}

#[test]
fn test_pac_proxy_from_map() {
    let raw = object(json!({
        "proxyType": "PAC",
        "proxyAutoconfigUrl": "http://aaa/bbb.pac",
    }));

    let proxy = ProxyConfig::from_map(&raw).expect("Failed to parse PAC proxy");

    assert_eq!(proxy.proxy_type(), ProxyType::Pac);
    assert_eq!(proxy.proxy_autoconfig_url(), Some("http://aaa/bbb.pac"));

    assert!(proxy.ftp_proxy().is_none());
    assert!(proxy.http_proxy().is_none());
    assert!(proxy.ssl_proxy().is_none());
    assert!(proxy.socks_proxy().is_none());
    assert!(proxy.socks_username().is_none());
    assert!(proxy.socks_password().is_none());
    assert!(proxy.no_proxy().is_none());
    assert!(!proxy.is_autodetect());
}

#[test]
fn test_pac_proxy_to_map() {
    let mut proxy = ProxyConfig::new();
    proxy.set_proxy_type(ProxyType::Pac).unwrap();
    proxy.set_proxy_autoconfig_url("http://aaa/bbb.pac").unwrap();

    let map = proxy.to_map();

    assert_eq!(map["proxyType"], "pac");
    assert_eq!(map["proxyAutoconfigUrl"], "http://aaa/bbb.pac");
    assert_eq!(map.len(), 2);
}

#[test]
fn test_autodetect_proxy_from_map() {
    let raw = object(json!({
        "proxyType": "AUTODETECT",
        "autodetect": true,
    }));

    let proxy = ProxyConfig::from_map(&raw).expect("Failed to parse autodetect proxy");

    assert_eq!(proxy.proxy_type(), ProxyType::Autodetect);
    assert!(proxy.is_autodetect());

    assert!(proxy.ftp_proxy().is_none());
    assert!(proxy.http_proxy().is_none());
    assert!(proxy.ssl_proxy().is_none());
    assert!(proxy.socks_proxy().is_none());
    assert!(proxy.socks_username().is_none());
    assert!(proxy.socks_password().is_none());
    assert!(proxy.no_proxy().is_none());
    assert!(proxy.proxy_autoconfig_url().is_none());
}

#[test]
fn test_autodetect_proxy_to_map() {
    let mut proxy = ProxyConfig::new();
    proxy.set_proxy_type(ProxyType::Autodetect).unwrap();
    proxy.set_autodetect(true).unwrap();

    let map = proxy.to_map();

    assert_eq!(map["proxyType"], "autodetect");
    assert_eq!(map["autodetect"], true);
    assert_eq!(map.len(), 2);
}

#[test]
fn test_system_and_direct_from_map() {
    for (token, mode) in [("system", ProxyType::System), ("DIRECT", ProxyType::Direct)] {
        let proxy = ProxyConfig::from_map(&object(json!({ "proxyType": token })))
            .expect("Failed to parse proxy");

        assert_eq!(proxy.proxy_type(), mode);
        assert!(proxy.ftp_proxy().is_none());
        assert!(proxy.http_proxy().is_none());
        assert!(proxy.ssl_proxy().is_none());
        assert!(proxy.socks_proxy().is_none());
        assert!(proxy.socks_username().is_none());
        assert!(proxy.socks_password().is_none());
        assert!(proxy.no_proxy().is_none());
        assert!(!proxy.is_autodetect());
        assert!(proxy.proxy_autoconfig_url().is_none());
    }
}

#[test]
fn test_system_and_direct_to_map() {
    let map = ProxyConfig::system().to_map();
    assert_eq!(map["proxyType"], "system");
    assert_eq!(map.len(), 1);

    let mut proxy = ProxyConfig::new();
    proxy.set_proxy_type(ProxyType::Direct).unwrap();
    let map = proxy.to_map();
    assert_eq!(map["proxyType"], "direct");
    assert_eq!(map.len(), 1);
}

#[test]
fn test_round_trip_every_mode() {
    let mut autodetect = ProxyConfig::new();
    autodetect.set_autodetect(true).unwrap();

    let proxies = [
        ProxyConfig::direct(),
        ProxyConfig::system(),
        ProxyConfig::pac("http://aaa/bbb.pac"),
        autodetect,
        full_manual_proxy(),
    ];

    for proxy in proxies {
        let restored =
            ProxyConfig::from_map(&proxy.to_map()).expect("Failed to parse to_map output");
        assert_eq!(restored, proxy, "round trip changed {}", proxy);
    }
}

#[test]
fn test_null_values_are_ignored() {
    common::init_tracing();

    let raw = object(json!({
        "ftpProxy": null,
        "httpProxy": "http://www.example.com",
        "autodetect": null,
    }));

    let proxy = ProxyConfig::from_map(&raw).expect("null values must not fail");

    assert!(proxy.ftp_proxy().is_none());
    assert!(!proxy.is_autodetect());
    assert_eq!(proxy.http_proxy(), Some("http://www.example.com"));
    assert_eq!(proxy.proxy_type(), ProxyType::Manual);
}

#[test]
fn test_unknown_keys_are_ignored() {
    let raw = object(json!({
        "proxyType": "pac",
        "proxyAutoconfigUrl": "http://aaa/bbb.pac",
        "socksVersion": 5,
    }));

    let proxy = ProxyConfig::from_map(&raw).unwrap();
    assert_eq!(proxy.to_map().len(), 2);
}

#[test]
fn test_unknown_proxy_type_fails() {
    let err = ProxyConfig::from_map(&object(json!({ "proxyType": "tor" }))).unwrap_err();

    assert!(matches!(err, Error::UnknownProxyType(ref token) if token == "tor"));
}

#[test]
fn test_serde_uses_wire_form() {
    #[derive(Serialize, Deserialize)]
    struct Session {
        proxy: ProxyConfig,
    }

    let session = Session {
        proxy: ProxyConfig::pac("http://aaa/bbb.pac"),
    };

    let value = serde_json::to_value(&session).expect("Failed to serialize");
    assert_eq!(
        value,
        json!({ "proxy": { "proxyType": "pac", "proxyAutoconfigUrl": "http://aaa/bbb.pac" } })
    );

    let parsed: Session = serde_json::from_value(value).expect("Failed to deserialize");
    assert_eq!(parsed.proxy, session.proxy);
}

#[test]
fn test_serde_reports_parse_errors() {
    let result: Result<ProxyConfig, _> = serde_json::from_str(r#"{"proxyType":"bogus"}"#);
    let err = result.unwrap_err();

    assert!(err.to_string().contains("bogus"), "unexpected error: {}", err);
}
