//! The configuration surface: option table, expiry grammar, settings files.

use std::fs;

use tracknet::base::error::ConfigError;
use tracknet::config::options::apply_option;
use tracknet::config::settings::TrackingSettings;
use tracknet::config::{CookieStyle, TrackingConfig};
use tracknet::filter::{Disposition, RequestParts, TrackingFilter};

#[test]
fn test_option_table_builds_a_working_filter() {
    let mut config = TrackingConfig::new();
    for (name, value) in [
        ("tracking", "on"),
        ("name", "visitor"),
        ("style", "netscape"),
        ("expires", "plus 1 hour 30 minutes"),
        ("dnt_exempt", "OPTOUT"),
    ] {
        apply_option(&mut config, name, value).unwrap();
    }
    assert_eq!(config.expires, 5400);

    let filter = TrackingFilter::new(config);
    let mut parts = RequestParts::new("203.0.113.5");
    assert_eq!(filter.process(&mut parts), Disposition::Handled);
    let cookie = parts
        .headers_out
        .get(http::header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(cookie.starts_with("visitor=203.0.113.5."));
    assert!(cookie.contains("; expires="));
}

#[test]
fn test_unknown_option_is_fatal() {
    let mut config = TrackingConfig::new();
    assert!(matches!(
        apply_option(&mut config, "cookie_flavour", "chocolate"),
        Err(ConfigError::UnknownSetting(_))
    ));
}

#[test]
fn test_expiry_grammar_through_the_table() {
    let cases = [
        ("600", 600),
        ("plus 1 year", 365 * 86400),
        ("2 months 3 days", 2 * 30 * 86400 + 3 * 86400),
        ("plus 1 w 2 d", 9 * 86400),
    ];
    for (text, seconds) in cases {
        let mut config = TrackingConfig::new();
        apply_option(&mut config, "expires", text).unwrap();
        assert_eq!(config.expires, seconds, "{text:?}");
    }

    let mut config = TrackingConfig::new();
    assert!(apply_option(&mut config, "expires", "soon").is_err());
    assert!(apply_option(&mut config, "expires", "plus 2").is_err());
    assert!(apply_option(&mut config, "expires", "2 fortnights").is_err());
}

#[test]
fn test_domain_rules_through_the_table() {
    let mut config = TrackingConfig::new();
    assert!(matches!(
        apply_option(&mut config, "domain", "example.com"),
        Err(ConfigError::DomainLeadingDot(_))
    ));
    assert!(matches!(
        apply_option(&mut config, "domain", ".localdomain"),
        Err(ConfigError::DomainEmbeddedDot(_))
    ));
    apply_option(&mut config, "domain", ".example.com").unwrap();
}

#[test]
fn test_cookie_name_change_is_never_stale() {
    // The extraction pattern follows the name through any number of
    // reconfigurations.
    let mut config = TrackingConfig::new();
    apply_option(&mut config, "name", "first").unwrap();
    apply_option(&mut config, "name", "second").unwrap();
    assert_eq!(config.pattern().extract("first=a; second=b"), Some("b"));
}

#[test]
fn test_settings_file_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tracking.json");
    fs::write(
        &path,
        r#"{
            "tracking": true,
            "style": "rfc2965",
            "name": "visitor",
            "domain": ".example.com",
            "expires": "plus 2 weeks",
            "dnt_exempt": ["OPTOUT", "NOTRACK"],
            "dnt_exempt_browsers": ["MSIE (7|8|9|10)\\."]
        }"#,
    )
    .unwrap();

    let config = TrackingSettings::load(&path).unwrap().into_config().unwrap();
    assert!(config.enabled);
    assert_eq!(config.style, CookieStyle::Cookie2);
    assert_eq!(config.cookie_name(), "visitor");
    assert_eq!(config.cookie_domain(), Some(".example.com"));
    assert_eq!(config.expires, 14 * 86400);
    assert_eq!(config.dnt_exempt.len(), 2);
    assert_eq!(config.dnt_exempt_browsers().len(), 1);
}

#[test]
fn test_settings_reject_bad_browser_pattern() {
    let settings =
        TrackingSettings::from_json(r#"{"dnt_exempt_browsers": ["MSIE ["]}"#).unwrap();
    assert!(matches!(
        settings.into_config(),
        Err(ConfigError::BrowserPattern { .. })
    ));
}

#[test]
fn test_missing_settings_file() {
    let err = TrackingSettings::load(std::path::Path::new("/nonexistent/tracking.json"));
    assert!(matches!(err, Err(ConfigError::SettingsIo(_))));
}
