//! Per-scope tracking configuration.
//!
//! One [`TrackingConfig`] is built per routing scope during setup and is
//! immutable at request time: concurrent requests evaluate against the same
//! value with no locking. All validated state (the cookie name and its
//! compiled pattern, the domain, browser exemption patterns, header-typed
//! settings) is reachable only through setters, so it can never go stale or
//! skip validation.

pub mod expiry;
pub mod options;
pub mod settings;

use crate::base::error::ConfigError;
use crate::pattern::CookiePattern;
use http::header::HeaderName;
use regex::Regex;

/// Default cookie name, compatible with the classic Apache tracking module.
pub const DEFAULT_COOKIE_NAME: &str = "Apache";

/// Default note key carrying the final tracking value for access logging.
pub const DEFAULT_NOTE_NAME: &str = "cookie";

/// Default note key flagging whether the value was generated this request.
pub const DEFAULT_GENERATED_NOTE_NAME: &str = "cookie_generated";

/// Default name of the mirrored request/response header.
pub const DEFAULT_HEADER_NAME: &str = "X-UUID";

/// Default cookie value meaning "tracking refused".
pub const DEFAULT_DNT_VALUE: &str = "DNT";

/// Fixed expiration text used when complying with DNT. A rolling expiry
/// would itself be a tracking vector, so DNT cookies get one shared fixed
/// expiration point instead.
pub const DEFAULT_DNT_EXPIRES: &str = "Fri, 01-Jan-38 00:00:00 GMT";

/// Unix timestamp of 2038-01-01, the fixed DNT expiration point. Kept
/// pre-32-bit-overflow.
pub const DEFAULT_DNT_MAX_AGE: i64 = 2_145_916_800;

/// Maximum length of a tracking value: at least an IPv6-ish address plus
/// separators plus a microsecond timestamp.
pub const DEFAULT_MAX_VALUE_LENGTH: usize = 40;

/// The cookie rendering dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CookieStyle {
    /// Not configured; renders as [`CookieStyle::Netscape`].
    #[default]
    Unset,
    /// Original Netscape `expires=` syntax.
    Netscape,
    /// RFC 2109, using `max-age=`.
    Cookie,
    /// RFC 2965, using `max-age=` and `Set-Cookie2`.
    Cookie2,
}

impl CookieStyle {
    /// Parse a configured style name, case-insensitively.
    ///
    /// `Cookie` and `Cookie2` also answer to their RFC numbers.
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        if value.eq_ignore_ascii_case("netscape") {
            Ok(CookieStyle::Netscape)
        } else if value.eq_ignore_ascii_case("cookie") || value.eq_ignore_ascii_case("rfc2109") {
            Ok(CookieStyle::Cookie)
        } else if value.eq_ignore_ascii_case("cookie2") || value.eq_ignore_ascii_case("rfc2965") {
            Ok(CookieStyle::Cookie2)
        } else {
            Err(ConfigError::InvalidStyle(value.to_string()))
        }
    }

    /// Response header the rendered cookie is added under.
    pub fn response_header(self) -> HeaderName {
        match self {
            CookieStyle::Cookie2 => HeaderName::from_static("set-cookie2"),
            _ => http::header::SET_COOKIE,
        }
    }

    /// Whether this dialect renders `max-age=` instead of `expires=`.
    pub fn uses_max_age(self) -> bool {
        matches!(self, CookieStyle::Cookie | CookieStyle::Cookie2)
    }
}

/// Immutable per-scope configuration for the tracking filter.
///
/// Plain policy fields are public; anything carrying a validation invariant
/// (the cookie name paired with its compiled pattern, the domain, the
/// browser exemption patterns) goes through a setter.
#[derive(Debug, Clone)]
pub struct TrackingConfig {
    /// Whether the filter runs at all in this scope.
    pub enabled: bool,

    /// Rendering dialect; exactly one governs any given request.
    pub style: CookieStyle,

    /// Cookie lifetime in seconds; `0` renders a session cookie with no
    /// expiration attribute, even under DNT.
    pub expires: i64,

    /// Whether to mirror the tracking value into a request/response header.
    pub send_header: bool,

    /// Name of the mirrored header.
    pub header_name: HeaderName,

    /// Note key for the final tracking value (access logging).
    pub note_name: String,

    /// Note key for the generated-this-request flag (`"1"`/`"0"`).
    pub generated_note_name: String,

    /// Cookie value to set when refusing to track.
    pub dnt_value: String,

    /// Whether to set the refusal marker at all when complying with DNT.
    pub set_dnt_cookie: bool,

    /// Whether to comply with browser Do Not Track settings.
    pub comply_with_dnt: bool,

    /// Fixed expiration point (unix seconds) for DNT cookies.
    pub dnt_max_age: i64,

    /// Rendered form of the fixed DNT expiration, for the Netscape dialect.
    pub dnt_expires: String,

    /// Tracking values never to be touched, compared case-insensitively in
    /// declaration order.
    pub dnt_exempt: Vec<String>,

    /// Header to trust for the client address instead of the peer address.
    pub ip_header: Option<HeaderName>,

    /// Upper bound on any tracking value set by this filter.
    pub max_value_length: usize,

    cookie_name: String,
    pattern: CookiePattern,
    cookie_domain: Option<String>,
    dnt_exempt_browsers: Vec<Regex>,
}

impl TrackingConfig {
    /// A disabled configuration with the classic defaults and the pattern
    /// compiled for the default cookie name.
    pub fn new() -> Self {
        let pattern =
            CookiePattern::compile(DEFAULT_COOKIE_NAME).expect("default pattern should compile");
        Self {
            enabled: false,
            style: CookieStyle::Unset,
            expires: 0,
            send_header: false,
            header_name: HeaderName::from_static("x-uuid"),
            note_name: DEFAULT_NOTE_NAME.to_string(),
            generated_note_name: DEFAULT_GENERATED_NOTE_NAME.to_string(),
            dnt_value: DEFAULT_DNT_VALUE.to_string(),
            set_dnt_cookie: true,
            comply_with_dnt: true,
            dnt_max_age: DEFAULT_DNT_MAX_AGE,
            dnt_expires: DEFAULT_DNT_EXPIRES.to_string(),
            dnt_exempt: Vec::new(),
            ip_header: None,
            max_value_length: DEFAULT_MAX_VALUE_LENGTH,
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            pattern,
            cookie_domain: None,
            dnt_exempt_browsers: Vec::new(),
        }
    }

    /// The configured cookie name.
    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// The compiled extraction pattern; always reflects [`Self::cookie_name`].
    pub fn pattern(&self) -> &CookiePattern {
        &self.pattern
    }

    /// The configured cookie domain, if any.
    pub fn cookie_domain(&self) -> Option<&str> {
        self.cookie_domain.as_deref()
    }

    /// Browser exemption patterns, in declaration order.
    pub fn dnt_exempt_browsers(&self) -> &[Regex] {
        &self.dnt_exempt_browsers
    }

    /// Set the cookie name, recompiling the extraction pattern.
    pub fn set_cookie_name(&mut self, name: &str) -> Result<(), ConfigError> {
        self.pattern = CookiePattern::compile(name)?;
        self.cookie_name = name.to_string();
        Ok(())
    }

    /// Set the cookie domain.
    ///
    /// Domains must begin with a dot and contain at least one further
    /// embedded dot, e.g. `.example.com`.
    pub fn set_cookie_domain(&mut self, domain: &str) -> Result<(), ConfigError> {
        if domain.is_empty() {
            return Err(ConfigError::EmptySetting("cookie domain"));
        }
        if !domain.starts_with('.') {
            return Err(ConfigError::DomainLeadingDot(domain.to_string()));
        }
        if !domain[1..].contains('.') {
            return Err(ConfigError::DomainEmbeddedDot(domain.to_string()));
        }
        self.cookie_domain = Some(domain.to_string());
        Ok(())
    }

    /// Set the mirrored header name.
    pub fn set_header_name(&mut self, name: &str) -> Result<(), ConfigError> {
        self.header_name = parse_header_name(name, "header name")?;
        Ok(())
    }

    /// Set the header to trust for the client address.
    pub fn set_ip_header(&mut self, name: &str) -> Result<(), ConfigError> {
        self.ip_header = Some(parse_header_name(name, "ip header")?);
        Ok(())
    }

    /// Append a DNT-exempt tracking value.
    pub fn push_dnt_exempt(&mut self, value: &str) -> Result<(), ConfigError> {
        if value.is_empty() {
            return Err(ConfigError::EmptySetting("dnt exempt value"));
        }
        self.dnt_exempt.push(value.to_string());
        Ok(())
    }

    /// Append and compile a DNT-exempt browser pattern.
    ///
    /// Patterns are compiled here, during setup, and matched against the
    /// `User-Agent` header in declaration order at request time.
    pub fn push_dnt_exempt_browser(&mut self, pattern: &str) -> Result<(), ConfigError> {
        if pattern.is_empty() {
            return Err(ConfigError::EmptySetting("dnt exempt browser pattern"));
        }
        let compiled = Regex::new(pattern).map_err(|source| ConfigError::BrowserPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        self.dnt_exempt_browsers.push(compiled);
        Ok(())
    }
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_header_name(name: &str, setting: &'static str) -> Result<HeaderName, ConfigError> {
    if name.is_empty() {
        return Err(ConfigError::EmptySetting(setting));
    }
    name.parse::<HeaderName>()
        .map_err(|_| ConfigError::InvalidHeaderName(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TrackingConfig::new();
        assert!(!config.enabled);
        assert_eq!(config.style, CookieStyle::Unset);
        assert_eq!(config.cookie_name(), "Apache");
        assert_eq!(config.expires, 0);
        assert!(config.set_dnt_cookie);
        assert!(config.comply_with_dnt);
        assert_eq!(config.dnt_value, "DNT");
        assert_eq!(config.dnt_max_age, 2_145_916_800);
        assert_eq!(config.max_value_length, 40);
        assert_eq!(config.pattern().cookie_name(), "Apache");
    }

    #[test]
    fn test_style_parse() {
        assert_eq!(CookieStyle::parse("Netscape").unwrap(), CookieStyle::Netscape);
        assert_eq!(CookieStyle::parse("cookie").unwrap(), CookieStyle::Cookie);
        assert_eq!(CookieStyle::parse("RFC2109").unwrap(), CookieStyle::Cookie);
        assert_eq!(CookieStyle::parse("Cookie2").unwrap(), CookieStyle::Cookie2);
        assert_eq!(CookieStyle::parse("rfc2965").unwrap(), CookieStyle::Cookie2);
        assert!(CookieStyle::parse("netscape3").is_err());
    }

    #[test]
    fn test_style_response_header() {
        assert_eq!(
            CookieStyle::Cookie2.response_header().as_str(),
            "set-cookie2"
        );
        assert_eq!(
            CookieStyle::Netscape.response_header(),
            http::header::SET_COOKIE
        );
        assert!(!CookieStyle::Unset.uses_max_age());
        assert!(CookieStyle::Cookie.uses_max_age());
        assert!(CookieStyle::Cookie2.uses_max_age());
    }

    #[test]
    fn test_cookie_name_recompiles_pattern() {
        let mut config = TrackingConfig::new();
        config.set_cookie_name("track.id").unwrap();
        assert_eq!(config.cookie_name(), "track.id");
        assert_eq!(config.pattern().extract("track.id=v"), Some("v"));
        assert_eq!(config.pattern().extract("Apache=v"), None);
    }

    #[test]
    fn test_domain_validation() {
        let mut config = TrackingConfig::new();
        assert!(matches!(
            config.set_cookie_domain("example.com"),
            Err(ConfigError::DomainLeadingDot(_))
        ));
        assert!(matches!(
            config.set_cookie_domain(".com"),
            Err(ConfigError::DomainEmbeddedDot(_))
        ));
        config.set_cookie_domain(".example.com").unwrap();
        assert_eq!(config.cookie_domain(), Some(".example.com"));
    }

    #[test]
    fn test_header_name_validation() {
        let mut config = TrackingConfig::new();
        assert!(config.set_header_name("not a header").is_err());
        config.set_header_name("X-Visitor").unwrap();
        assert_eq!(config.header_name.as_str(), "x-visitor");
    }

    #[test]
    fn test_browser_pattern_compiled_at_setup() {
        let mut config = TrackingConfig::new();
        assert!(matches!(
            config.push_dnt_exempt_browser("MSIE [0-9"),
            Err(ConfigError::BrowserPattern { .. })
        ));
        config.push_dnt_exempt_browser("MSIE 10\\.0").unwrap();
        assert_eq!(config.dnt_exempt_browsers().len(), 1);
    }

    #[test]
    fn test_empty_values_rejected() {
        let mut config = TrackingConfig::new();
        assert!(config.set_cookie_name("").is_err());
        assert!(config.set_header_name("").is_err());
        assert!(config.push_dnt_exempt("").is_err());
        assert!(config.push_dnt_exempt_browser("").is_err());
    }
}
